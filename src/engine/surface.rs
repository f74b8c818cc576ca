//! The drawing-surface boundary the stroke renderer paints through.

use std::ops::{Deref, DerefMut};

use kurbo::Rect;

use crate::error::Result;
use crate::types::{BlendMode, TipImage};

/// A 2D raster surface with canvas-style drawing state.
///
/// State set through `set_global_alpha`, `set_blend_mode`, `translate` and
/// `rotate` persists until the matching `restore` of an earlier `save`.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Push the current drawing state.
    fn save(&mut self);

    /// Pop the most recently saved drawing state.
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f32);

    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Post-multiply a translation onto the current transform.
    fn translate(&mut self, x: f64, y: f64);

    /// Post-multiply a rotation (radians) onto the current transform.
    fn rotate(&mut self, radians: f64);

    /// Blit `image` into `dest`, given in the current coordinate frame.
    fn draw_image(&mut self, image: &TipImage, dest: Rect) -> Result<()>;
}

/// Scoped drawing state: `save` on creation, `restore` on drop.
///
/// The restore runs on every exit path, including `?` returns and panics,
/// so state set inside the scope never leaks into the next draw.
pub struct StateGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> StateGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for StateGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for StateGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for StateGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording surface used by renderer tests.

    use super::*;
    use crate::error::PaletteaError;

    /// One call made against a `RecordingSurface`.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Save,
        Restore,
        Alpha(f32),
        Blend(BlendMode),
        Translate(f64, f64),
        Rotate(f64),
        Draw(Rect),
    }

    /// Surface that records calls and can be told to fail a given draw.
    pub struct RecordingSurface {
        pub width: u32,
        pub height: u32,
        pub calls: Vec<Call>,
        /// 1-based index of the draw call that should fail.
        pub fail_on_draw: Option<usize>,
        draws: usize,
    }

    impl RecordingSurface {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                calls: Vec::new(),
                fail_on_draw: None,
                draws: 0,
            }
        }

        pub fn count(&self, wanted: fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| wanted(c)).count()
        }

        pub fn draws(&self) -> Vec<Rect> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Draw(r) => Some(*r),
                    _ => None,
                })
                .collect()
        }

        pub fn translations(&self) -> Vec<(f64, f64)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Translate(x, y) => Some((*x, *y)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn save(&mut self) {
            self.calls.push(Call::Save);
        }

        fn restore(&mut self) {
            self.calls.push(Call::Restore);
        }

        fn set_global_alpha(&mut self, alpha: f32) {
            self.calls.push(Call::Alpha(alpha));
        }

        fn set_blend_mode(&mut self, mode: BlendMode) {
            self.calls.push(Call::Blend(mode));
        }

        fn translate(&mut self, x: f64, y: f64) {
            self.calls.push(Call::Translate(x, y));
        }

        fn rotate(&mut self, radians: f64) {
            self.calls.push(Call::Rotate(radians));
        }

        fn draw_image(&mut self, _image: &TipImage, dest: Rect) -> Result<()> {
            self.draws += 1;
            self.calls.push(Call::Draw(dest));
            if self.fail_on_draw == Some(self.draws) {
                return Err(PaletteaError::Render {
                    message: "injected draw failure".to_string(),
                    help: None,
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Call, RecordingSurface};
    use super::*;

    #[test]
    fn test_guard_saves_and_restores() {
        let mut surface = RecordingSurface::new(10, 10);
        {
            let mut guard = StateGuard::new(&mut surface);
            guard.set_global_alpha(0.5);
        }
        assert_eq!(
            surface.calls,
            vec![Call::Save, Call::Alpha(0.5), Call::Restore]
        );
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn paint(surface: &mut RecordingSurface, tip: &TipImage) -> Result<()> {
            let mut guard = StateGuard::new(surface);
            guard.draw_image(tip, Rect::new(0.0, 0.0, 1.0, 1.0))?;
            guard.set_global_alpha(0.1);
            Ok(())
        }

        let mut surface = RecordingSurface::new(10, 10);
        surface.fail_on_draw = Some(1);
        let tip = TipImage::new(image::RgbaImage::new(1, 1));

        assert!(paint(&mut surface, &tip).is_err());
        assert_eq!(surface.calls.last(), Some(&Call::Restore));
        assert_eq!(surface.count(|c| matches!(c, Call::Alpha(_))), 0);
    }
}
