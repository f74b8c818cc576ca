//! Validation checks for paint scripts.
//!
//! Each check takes a `&PaintScript` and returns a `ValidationResult`.

use std::collections::{BTreeSet, HashSet};

use crate::types::{Action, PaintScript};

use super::warning::{Diagnostic, ValidationResult};

/// Check the canvas has a drawable area.
pub fn check_canvas(script: &PaintScript) -> ValidationResult {
    let mut result = ValidationResult::new();

    let canvas = &script.canvas;
    if canvas.width == 0 || canvas.height == 0 {
        result.push(
            Diagnostic::error(
                "palettea::validate::empty-canvas",
                format!("Canvas is {}x{}", canvas.width, canvas.height),
            )
            .with_help("Give the canvas a non-zero width and height"),
        );
    }

    result
}

/// Check brush parameters that make a brush paint nothing or paint oddly.
pub fn check_brushes(script: &PaintScript) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, brush) in &script.brushes {
        if brush.size.is_nan() || brush.size <= 0.0 {
            result.push(
                Diagnostic::warning(
                    "palettea::validate::brush-size",
                    format!("Brush '{}' has size {}, it will paint nothing", name, brush.size),
                )
                .with_help("Use a positive size"),
            );
        }

        if !(0.0..=1.0).contains(&brush.opacity) {
            result.push(
                Diagnostic::warning(
                    "palettea::validate::brush-opacity",
                    format!(
                        "Brush '{}' has opacity {}, it will be clamped to [0, 1]",
                        name, brush.opacity
                    ),
                )
                .with_help("Use an opacity between 0 and 1"),
            );
        }

        if brush.tip.is_empty() {
            result.push(Diagnostic::error(
                "palettea::validate::empty-tip",
                format!("Brush '{}' has an empty tip image", name),
            ));
        }

        for flag in brush.unapplied_dynamics() {
            result.push(
                Diagnostic::warning(
                    "palettea::validate::unapplied-dynamics",
                    format!("Brush '{}' enables {} which is not applied when painting", name, flag),
                )
                .with_help(unapplied_help(flag)),
            );
        }
    }

    result
}

fn unapplied_help(setting: &str) -> &'static str {
    match setting {
        "tilt_size" | "tilt_opacity" => "Tilt is recorded on samples but does not modulate the stroke",
        "grain" => "The grain texture is loaded but not applied to dabs",
        _ => "The value is kept with the brush; remove it to silence this warning",
    }
}

/// Check that brushes are used by at least one stroke.
pub fn check_unused_brushes(script: &PaintScript) -> ValidationResult {
    let mut result = ValidationResult::new();

    let used: HashSet<&str> = script
        .actions
        .iter()
        .filter_map(|a| match a {
            Action::Stroke { brush, .. } => Some(brush.as_str()),
            _ => None,
        })
        .collect();

    for name in script.brushes.keys() {
        if !used.contains(name.as_str()) {
            result.warning(
                "palettea::validate::unused-brush",
                format!("Brush '{}' is never used", name),
            );
        }
    }

    result
}

/// Check stroke samples: empty strokes, pressure range, points off canvas.
pub fn check_samples(script: &PaintScript) -> ValidationResult {
    let mut result = ValidationResult::new();
    let width = script.canvas.width as f64;
    let height = script.canvas.height as f64;

    for (i, action) in script.actions.iter().enumerate() {
        let Action::Stroke { samples, .. } = action else {
            continue;
        };
        let index = i + 1;

        if samples.is_empty() {
            result.push(
                Diagnostic::warning("palettea::validate::empty-stroke", "Stroke has no points")
                    .at(index),
            );
            continue;
        }

        if let Some(bad) = samples
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.pressure))
        {
            result.push(
                Diagnostic::warning(
                    "palettea::validate::pressure-range",
                    format!("Stroke has pressure {} outside [0, 1]", bad.pressure),
                )
                .at(index),
            );
        }

        if samples.iter().any(|s| !s.x.is_finite() || !s.y.is_finite()) {
            result.push(
                Diagnostic::error(
                    "palettea::validate::non-finite-point",
                    "Stroke has a non-finite coordinate",
                )
                .at(index),
            );
        } else {
            let outside = samples
                .iter()
                .filter(|s| s.x < 0.0 || s.y < 0.0 || s.x > width || s.y > height)
                .count();
            if outside > 0 {
                result.push(
                    Diagnostic::warning(
                        "palettea::validate::off-canvas",
                        format!(
                            "{} of {} point(s) lie outside the {}x{} canvas",
                            outside,
                            samples.len(),
                            script.canvas.width,
                            script.canvas.height
                        ),
                    )
                    .at(index),
                );
            }
        }
    }

    result
}

#[derive(Debug, Clone)]
struct SimLayer {
    id: usize,
    name: String,
    locked: bool,
}

/// Layer stack as it evolves through the script, without pixels.
struct LayerSim {
    layers: Vec<SimLayer>,
    active: usize,
    next_id: usize,
}

impl LayerSim {
    fn new() -> Self {
        let mut sim = Self {
            layers: Vec::new(),
            active: 0,
            next_id: 0,
        };
        sim.reset();
        sim
    }

    fn reset(&mut self) {
        self.layers.clear();
        self.add("Layer 1", false);
    }

    fn add(&mut self, name: &str, locked: bool) {
        self.layers.push(SimLayer {
            id: self.next_id,
            name: name.to_string(),
            locked,
        });
        self.active = self.next_id;
        self.next_id += 1;
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    fn active_layer(&self) -> Option<&SimLayer> {
        self.layers.iter().find(|l| l.id == self.active)
    }
}

/// Walk the actions tracking layers and history, checking references.
///
/// Reports unknown brushes and layers, strokes onto locked layers, deleting
/// the only layer, and undo/redo with nothing to act on. At most
/// `history_limit` strokes can be undone, as on the canvas.
pub fn check_actions(script: &PaintScript, history_limit: usize) -> ValidationResult {
    let history_limit = history_limit.max(1);
    let mut result = ValidationResult::new();
    let mut sim = LayerSim::new();
    let mut undo_depth = 0usize;
    let mut redo_depth = 0usize;

    if let Some((first, rest)) = script.layers.split_first() {
        sim.layers[0].name = first.name.clone();
        sim.layers[0].locked = first.locked;
        for spec in rest {
            sim.add(&spec.name, spec.locked);
        }
    }

    let mut seen = BTreeSet::new();
    for spec in &script.layers {
        if !seen.insert(spec.name.as_str()) {
            result.push(
                Diagnostic::warning(
                    "palettea::validate::duplicate-layer",
                    format!("Layer '{}' is declared more than once", spec.name),
                )
                .with_help("Actions always refer to the lowest layer with a name"),
            );
        }
    }

    for (i, action) in script.actions.iter().enumerate() {
        let index = i + 1;

        let target = match action {
            Action::Stroke { layer, .. } => layer.as_deref(),
            Action::Select(name)
            | Action::Show(name)
            | Action::Hide(name)
            | Action::Lock(name)
            | Action::Unlock(name)
            | Action::Delete(name) => Some(name.as_str()),
            Action::Move { layer, .. } => Some(layer.as_str()),
            Action::Undo | Action::Redo | Action::Clear | Action::AddLayer(_) => None,
        };

        let position = match target {
            Some(name) => match sim.position(name) {
                Some(p) => Some(p),
                None => {
                    let names: Vec<&str> = sim.layers.iter().map(|l| l.name.as_str()).collect();
                    result.push(
                        Diagnostic::error(
                            "palettea::validate::missing-layer",
                            format!("{} refers to layer '{}' which does not exist", action.keyword(), name),
                        )
                        .at(index)
                        .with_help(format!("Layers at this point: {}", names.join(", "))),
                    );
                    continue;
                }
            },
            None => None,
        };

        match action {
            Action::Stroke { brush, .. } => {
                if !script.brushes.contains_key(brush) {
                    let known: Vec<&str> = script.brushes.keys().map(String::as_str).collect();
                    result.push(
                        Diagnostic::error(
                            "palettea::validate::missing-brush",
                            format!("Stroke uses brush '{}' which is not defined", brush),
                        )
                        .at(index)
                        .with_help(if known.is_empty() {
                            "Define it under `brushes:`".to_string()
                        } else {
                            format!("Defined brushes: {}", known.join(", "))
                        }),
                    );
                }
                if let Some(p) = position {
                    sim.active = sim.layers[p].id;
                }
                if let Some(layer) = sim.active_layer() {
                    if layer.locked {
                        result.push(
                            Diagnostic::error(
                                "palettea::validate::locked-layer",
                                format!("Stroke paints on locked layer '{}'", layer.name),
                            )
                            .at(index)
                            .with_help("Add an `unlock` action before the stroke"),
                        );
                    }
                }
                undo_depth = (undo_depth + 1).min(history_limit);
                redo_depth = 0;
            }
            Action::Undo => {
                if undo_depth == 0 {
                    result.push(
                        Diagnostic::warning(
                            "palettea::validate::nothing-to-undo",
                            "Undo has no stroke to revert",
                        )
                        .at(index),
                    );
                } else {
                    undo_depth -= 1;
                    redo_depth += 1;
                }
            }
            Action::Redo => {
                if redo_depth == 0 {
                    result.push(
                        Diagnostic::warning(
                            "palettea::validate::nothing-to-redo",
                            "Redo has no stroke to reapply",
                        )
                        .at(index),
                    );
                } else {
                    redo_depth -= 1;
                    undo_depth += 1;
                }
            }
            Action::Clear => {
                sim.reset();
                undo_depth = 0;
                redo_depth = 0;
            }
            Action::AddLayer(name) => {
                if sim.position(name).is_some() {
                    result.push(
                        Diagnostic::warning(
                            "palettea::validate::duplicate-layer",
                            format!("Layer '{}' already exists", name),
                        )
                        .at(index)
                        .with_help("Actions always refer to the lowest layer with a name"),
                    );
                }
                sim.add(name, false);
            }
            Action::Select(_) => {
                if let Some(p) = position {
                    sim.active = sim.layers[p].id;
                }
            }
            Action::Lock(_) | Action::Unlock(_) => {
                if let Some(p) = position {
                    sim.layers[p].locked = matches!(action, Action::Lock(_));
                }
            }
            Action::Delete(name) => {
                if sim.layers.len() <= 1 {
                    result.push(
                        Diagnostic::error(
                            "palettea::validate::last-layer",
                            format!("Deleting '{}' would leave the canvas without layers", name),
                        )
                        .at(index)
                        .with_help("Add another layer first"),
                    );
                } else if let Some(p) = position {
                    let removed = sim.layers.remove(p);
                    if removed.id == sim.active {
                        if let Some(top) = sim.layers.last() {
                            sim.active = top.id;
                        }
                    }
                }
            }
            Action::Move { layer, to } => {
                let top = sim.layers.len() - 1;
                if *to > top {
                    result.push(
                        Diagnostic::warning(
                            "palettea::validate::move-clamped",
                            format!("Moving '{}' to {} is past the top; it goes to {}", layer, to, top),
                        )
                        .at(index),
                    );
                }
                if let Some(p) = position {
                    let moved = sim.layers.remove(p);
                    let to = (*to).min(sim.layers.len());
                    sim.layers.insert(to, moved);
                }
            }
            Action::Show(_) | Action::Hide(_) => {}
        }
    }

    result
}
