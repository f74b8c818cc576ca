//! Stroke renderer - stamps a brush tip at every sample of a stroke.
//!
//! Each sample is mapped one-to-one to a set of dabs (one per symmetry
//! position). Every dab runs inside its own `StateGuard`, so alpha, blend
//! mode and transform changes are undone even when the blit fails.

use kurbo::Rect;

use crate::error::Result;
use crate::types::{BrushDescriptor, InputSample};

use super::surface::{StateGuard, Surface};
use super::symmetry;

/// Counts from one `draw_stroke` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrokeStats {
    /// Samples consumed.
    pub samples: usize,
    /// Tip blits issued (samples x symmetry positions).
    pub dabs: usize,
}

/// Paints strokes onto a borrowed surface.
pub struct StrokeRenderer<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: Surface + ?Sized> StrokeRenderer<'s, S> {
    pub fn new(surface: &'s mut S) -> Self {
        Self { surface }
    }

    /// Paint `samples` with `brush`.
    ///
    /// A failed blit is not retried: the error propagates immediately and
    /// whatever was already painted stays on the surface.
    pub fn draw_stroke(
        &mut self,
        samples: &[InputSample],
        brush: &BrushDescriptor,
    ) -> Result<StrokeStats> {
        let mut stats = StrokeStats::default();
        if samples.is_empty() {
            return Ok(stats);
        }

        let flags = brush.symmetry_flags();
        log::debug!(
            "stroke with brush '{}': {} sample(s), blend {}, {} mirror(s)",
            brush.name,
            samples.len(),
            brush.blend_mode,
            flags.mirror_count()
        );

        for sample in samples {
            let size = brush.effective_size(sample) as f64;
            let opacity = brush.effective_opacity(sample);
            let width = self.surface.width() as f64;
            let height = self.surface.height() as f64;

            for position in symmetry::expand(sample.position(), flags, width, height) {
                log::trace!(
                    "dab at ({:.1}, {:.1}) size {:.2} opacity {:.3}",
                    position.x,
                    position.y,
                    size,
                    opacity
                );
                let mut surface = StateGuard::new(&mut *self.surface);
                surface.set_global_alpha(opacity);
                surface.set_blend_mode(brush.blend_mode);
                surface.translate(position.x, position.y);
                surface.rotate(brush.rotation as f64);
                let half = size / 2.0;
                surface.draw_image(&brush.tip, Rect::new(-half, -half, half, half))?;
                stats.dabs += 1;
            }
            stats.samples += 1;
        }

        Ok(stats)
    }
}
