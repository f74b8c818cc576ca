//! Per-pixel compositing.
//!
//! Pixels are stored as straight (non-premultiplied) RGBA8. Maths is done in
//! unit floats. Porter-Duff operators use the (Fa, Fb) factor table; the
//! separable blend modes mix the blended colour into the source and are then
//! composited source-over.

use crate::types::{unit_to_byte, BlendMode};

/// Composite a source pixel over a backdrop pixel.
///
/// `src_alpha` is the source coverage already multiplied by the global alpha;
/// the source pixel's own alpha channel is ignored.
pub fn composite(mode: BlendMode, src: [u8; 4], src_alpha: f32, dst: [u8; 4]) -> [u8; 4] {
    let a_s = src_alpha.clamp(0.0, 1.0);
    let a_b = dst[3] as f32 / 255.0;
    let cs = unit_rgb(src);
    let cb = unit_rgb(dst);

    if mode.is_separable_blend() {
        let a_o = a_s + a_b * (1.0 - a_s);
        let mut out = [0.0f32; 3];
        for i in 0..3 {
            let mixed = (1.0 - a_b) * cs[i] + a_b * blend_channel(mode, cb[i], cs[i]);
            let co = a_s * mixed + (1.0 - a_s) * a_b * cb[i];
            out[i] = if a_o > 0.0 { co / a_o } else { 0.0 };
        }
        return pack(out, a_o);
    }

    let (fa, fb) = porter_duff_factors(mode, a_s, a_b);
    let a_o = (a_s * fa + a_b * fb).min(1.0);
    let mut out = [0.0f32; 3];
    for i in 0..3 {
        let co = a_s * fa * cs[i] + a_b * fb * cb[i];
        out[i] = if a_o > 0.0 { co / a_o } else { 0.0 };
    }
    pack(out, a_o)
}

fn porter_duff_factors(mode: BlendMode, a_s: f32, a_b: f32) -> (f32, f32) {
    match mode {
        BlendMode::Copy => (1.0, 0.0),
        BlendMode::SourceIn => (a_b, 0.0),
        BlendMode::SourceOut => (1.0 - a_b, 0.0),
        BlendMode::SourceAtop => (a_b, 1.0 - a_s),
        BlendMode::DestinationOver => (1.0 - a_b, 1.0),
        BlendMode::DestinationIn => (0.0, a_s),
        BlendMode::DestinationOut => (0.0, 1.0 - a_s),
        BlendMode::DestinationAtop => (1.0 - a_b, a_s),
        BlendMode::Lighter => (1.0, 1.0),
        BlendMode::Xor => (1.0 - a_b, 1.0 - a_s),
        // SourceOver and anything separable that reaches here.
        _ => (1.0, 1.0 - a_s),
    }
}

/// The separable blend function B(Cb, Cs).
fn blend_channel(mode: BlendMode, cb: f32, cs: f32) -> f32 {
    match mode {
        BlendMode::Multiply => cb * cs,
        BlendMode::Screen => screen(cb, cs),
        BlendMode::Overlay => hard_light(cs, cb),
        BlendMode::Darken => cb.min(cs),
        BlendMode::Lighten => cb.max(cs),
        BlendMode::ColorDodge => {
            if cb == 0.0 {
                0.0
            } else if cs >= 1.0 {
                1.0
            } else {
                (cb / (1.0 - cs)).min(1.0)
            }
        }
        BlendMode::ColorBurn => {
            if cb >= 1.0 {
                1.0
            } else if cs <= 0.0 {
                0.0
            } else {
                1.0 - ((1.0 - cb) / cs).min(1.0)
            }
        }
        BlendMode::HardLight => hard_light(cb, cs),
        BlendMode::SoftLight => {
            if cs <= 0.5 {
                cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
            } else {
                let d = if cb <= 0.25 {
                    ((16.0 * cb - 12.0) * cb + 4.0) * cb
                } else {
                    cb.sqrt()
                };
                cb + (2.0 * cs - 1.0) * (d - cb)
            }
        }
        BlendMode::Difference => (cb - cs).abs(),
        BlendMode::Exclusion => cb + cs - 2.0 * cb * cs,
        _ => cs,
    }
}

fn screen(cb: f32, cs: f32) -> f32 {
    cb + cs - cb * cs
}

fn hard_light(cb: f32, cs: f32) -> f32 {
    if cs <= 0.5 {
        cb * 2.0 * cs
    } else {
        screen(cb, 2.0 * cs - 1.0)
    }
}

fn unit_rgb(px: [u8; 4]) -> [f32; 3] {
    [
        px[0] as f32 / 255.0,
        px[1] as f32 / 255.0,
        px[2] as f32 / 255.0,
    ]
}

fn pack(rgb: [f32; 3], alpha: f32) -> [u8; 4] {
    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }
    [
        unit_to_byte(rgb[0]),
        unit_to_byte(rgb[1]),
        unit_to_byte(rgb[2]),
        unit_to_byte(alpha),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    #[test]
    fn test_source_over_opaque_replaces() {
        assert_eq!(composite(BlendMode::SourceOver, RED, 1.0, WHITE), RED);
    }

    #[test]
    fn test_source_over_half_alpha_over_white() {
        assert_eq!(
            composite(BlendMode::SourceOver, RED, 0.5, WHITE),
            [255, 128, 128, 255]
        );
    }

    #[test]
    fn test_source_over_onto_transparent_keeps_colour() {
        assert_eq!(
            composite(BlendMode::SourceOver, RED, 0.5, CLEAR),
            [255, 0, 0, 128]
        );
    }

    #[test]
    fn test_zero_alpha_leaves_backdrop() {
        assert_eq!(composite(BlendMode::SourceOver, RED, 0.0, WHITE), WHITE);
    }

    #[test]
    fn test_destination_out_erases() {
        assert_eq!(composite(BlendMode::DestinationOut, RED, 1.0, WHITE), CLEAR);
        let half = composite(BlendMode::DestinationOut, RED, 0.5, WHITE);
        assert_eq!(half, [255, 255, 255, 128]);
    }

    #[test]
    fn test_destination_over_keeps_opaque_backdrop() {
        assert_eq!(composite(BlendMode::DestinationOver, RED, 1.0, WHITE), WHITE);
        assert_eq!(composite(BlendMode::DestinationOver, RED, 1.0, CLEAR), RED);
    }

    #[test]
    fn test_source_in_needs_backdrop() {
        assert_eq!(composite(BlendMode::SourceIn, RED, 1.0, CLEAR), CLEAR);
        assert_eq!(composite(BlendMode::SourceIn, RED, 1.0, WHITE), RED);
    }

    #[test]
    fn test_copy_ignores_backdrop() {
        assert_eq!(
            composite(BlendMode::Copy, RED, 0.5, WHITE),
            [255, 0, 0, 128]
        );
    }

    #[test]
    fn test_xor_of_two_opaque_is_clear() {
        assert_eq!(composite(BlendMode::Xor, RED, 1.0, WHITE), CLEAR);
    }

    #[test]
    fn test_lighter_adds_and_clamps() {
        let grey = [100, 100, 100, 255];
        assert_eq!(composite(BlendMode::Lighter, grey, 1.0, grey), [200, 200, 200, 255]);
        assert_eq!(composite(BlendMode::Lighter, WHITE, 1.0, WHITE), WHITE);
    }

    #[test]
    fn test_multiply() {
        let grey = [128, 128, 128, 255];
        assert_eq!(composite(BlendMode::Multiply, grey, 1.0, WHITE), grey);
        assert_eq!(composite(BlendMode::Multiply, RED, 1.0, grey), [128, 0, 0, 255]);
    }

    #[test]
    fn test_multiply_onto_transparent_is_source() {
        assert_eq!(composite(BlendMode::Multiply, RED, 1.0, CLEAR), RED);
    }

    #[test]
    fn test_screen_darken_lighten_difference() {
        let dark = [64, 64, 64, 255];
        let light = [192, 192, 192, 255];
        assert_eq!(composite(BlendMode::Screen, dark, 1.0, WHITE), WHITE);
        assert_eq!(composite(BlendMode::Darken, dark, 1.0, light), dark);
        assert_eq!(composite(BlendMode::Lighten, dark, 1.0, light), light);
        assert_eq!(composite(BlendMode::Difference, WHITE, 1.0, WHITE), [0, 0, 0, 255]);
    }
}
