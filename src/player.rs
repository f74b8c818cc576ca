//! Paint script playback.
//!
//! Replays the actions of a `PaintScript` against a fresh `Canvas`.
//! Brush and layer names are resolved as each action runs.

use crate::canvas::{Canvas, CanvasOptions, LayerId};
use crate::error::{PaletteaError, Result};
use crate::types::{Action, BrushDescriptor, LayerSpec, PaintScript};

/// Counts gathered while playing a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaySummary {
    /// Stroke actions painted.
    pub strokes: usize,
    /// Samples rendered, after interpolation.
    pub samples: usize,
    /// Tip blits issued.
    pub dabs: usize,
    /// Undo actions that reverted a stroke.
    pub undos: usize,
    /// Redo actions that reapplied a stroke.
    pub redos: usize,
}

/// The canvas left after playback, with its summary.
#[derive(Debug)]
pub struct Played {
    pub canvas: Canvas,
    pub summary: PlaySummary,
}

/// Play a script onto a new canvas.
///
/// `options.background` is replaced by the script's canvas background.
/// Stops at the first failing action; the error names the action.
pub fn play(script: &PaintScript, options: CanvasOptions) -> Result<Played> {
    let options = CanvasOptions {
        background: script.canvas.background,
        ..options
    };
    let mut canvas = Canvas::with_options(script.canvas.width, script.canvas.height, options);
    setup_layers(&mut canvas, &script.layers)?;

    let mut summary = PlaySummary::default();
    for (i, action) in script.actions.iter().enumerate() {
        log::trace!("action #{}: {}", i + 1, action.keyword());
        apply(&mut canvas, script, action, &mut summary).map_err(|e| PaletteaError::Build {
            message: format!(
                "'{}' action #{} ({}) failed: {}",
                script.name,
                i + 1,
                action.keyword(),
                e
            ),
            help: None,
        })?;
    }

    log::debug!(
        "played '{}': {} stroke(s), {} dab(s), {} layer(s)",
        script.name,
        summary.strokes,
        summary.dabs,
        canvas.layers().len()
    );
    Ok(Played { canvas, summary })
}

/// Lay out the initial layers. The canvas starts with `Layer 1`, which takes
/// the first spec; the rest are added above it. The top layer ends up active.
fn setup_layers(canvas: &mut Canvas, specs: &[LayerSpec]) -> Result<()> {
    let Some((first, rest)) = specs.split_first() else {
        return Ok(());
    };

    let stack = canvas.layers_mut();
    let base = stack.active_id();
    stack.rename(base, &first.name)?;
    apply_flags(canvas, base, first)?;

    for spec in rest {
        let id = canvas.layers_mut().add(Some(&spec.name));
        apply_flags(canvas, id, spec)?;
    }
    Ok(())
}

fn apply_flags(canvas: &mut Canvas, id: LayerId, spec: &LayerSpec) -> Result<()> {
    let stack = canvas.layers_mut();
    stack.set_visible(id, spec.visible)?;
    stack.set_locked(id, spec.locked)
}

fn apply(
    canvas: &mut Canvas,
    script: &PaintScript,
    action: &Action,
    summary: &mut PlaySummary,
) -> Result<()> {
    match action {
        Action::Stroke {
            brush,
            layer,
            samples,
        } => {
            let brush = find_brush(script, brush)?;
            if let Some(name) = layer {
                let id = find_layer(canvas, name)?;
                canvas.layers_mut().set_active(id)?;
            }
            let stats = canvas.paint(samples, brush)?;
            summary.strokes += 1;
            summary.samples += stats.samples;
            summary.dabs += stats.dabs;
        }
        Action::Undo => {
            if canvas.undo() {
                summary.undos += 1;
            } else {
                log::debug!("nothing to undo");
            }
        }
        Action::Redo => {
            if canvas.redo() {
                summary.redos += 1;
            } else {
                log::debug!("nothing to redo");
            }
        }
        Action::Clear => canvas.reset(),
        Action::AddLayer(name) => {
            canvas.layers_mut().add(Some(name));
        }
        Action::Select(name) => {
            let id = find_layer(canvas, name)?;
            canvas.layers_mut().set_active(id)?;
        }
        Action::Show(name) => {
            let id = find_layer(canvas, name)?;
            canvas.layers_mut().set_visible(id, true)?;
        }
        Action::Hide(name) => {
            let id = find_layer(canvas, name)?;
            canvas.layers_mut().set_visible(id, false)?;
        }
        Action::Lock(name) => {
            let id = find_layer(canvas, name)?;
            canvas.layers_mut().set_locked(id, true)?;
        }
        Action::Unlock(name) => {
            let id = find_layer(canvas, name)?;
            canvas.layers_mut().set_locked(id, false)?;
        }
        Action::Delete(name) => {
            let id = find_layer(canvas, name)?;
            canvas.layers_mut().delete(id)?;
        }
        Action::Move { layer, to } => {
            let id = find_layer(canvas, layer)?;
            canvas.layers_mut().move_to(id, *to)?;
        }
    }
    Ok(())
}

fn find_brush<'a>(script: &'a PaintScript, name: &str) -> Result<&'a BrushDescriptor> {
    script.brushes.get(name).ok_or_else(|| PaletteaError::Build {
        message: format!("unknown brush '{}'", name),
        help: Some(format!(
            "Defined brushes: {}",
            script.brushes.keys().cloned().collect::<Vec<_>>().join(", ")
        )),
    })
}

fn find_layer(canvas: &Canvas, name: &str) -> Result<LayerId> {
    canvas
        .layers()
        .find(name)
        .map(|l| l.id)
        .ok_or_else(|| PaletteaError::Layer {
            message: format!("unknown layer '{}'", name),
            help: Some(format!("Layers: {}", canvas.layers().names().join(", "))),
        })
}
