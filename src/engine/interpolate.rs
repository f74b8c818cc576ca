//! Stroke densification.
//!
//! Pointer events arrive far apart when the pen moves quickly. Before
//! rendering, each segment between consecutive samples is filled with
//! evenly spaced samples so the stamped dabs form a continuous mark.

use kurbo::{Point, Rect};

use crate::types::{BrushDescriptor, InputSample, Tilt};

/// Smallest distance between generated samples, in pixels.
pub const MIN_STEP: f64 = 1.0;

/// Step length for a brush: `spacing * size`, never below `MIN_STEP`.
pub fn step_for(brush: &BrushDescriptor) -> f64 {
    let step = (brush.spacing * brush.size) as f64;
    if step.is_finite() {
        step.max(MIN_STEP)
    } else {
        MIN_STEP
    }
}

/// Area in which generated samples can still leave a mark: the canvas grown
/// by the largest dab size any of `samples` produces.
pub fn paint_bounds(
    brush: &BrushDescriptor,
    samples: &[InputSample],
    width: u32,
    height: u32,
) -> Rect {
    let margin = samples
        .iter()
        .map(|s| brush.effective_size(s).abs() as f64)
        .filter(|m| m.is_finite())
        .fold(0.0, f64::max);
    Rect::new(0.0, 0.0, width as f64, height as f64).inflate(margin, margin)
}

/// Insert samples every `step` pixels along each segment.
///
/// The first sample is kept as is; every input sample after it is kept as
/// the end of its segment. Generated samples are only placed on the part of
/// a segment inside `bounds`, so the output size depends on the bounds and
/// not on how far away a point lies. Pressure is interpolated linearly,
/// tilt only when both ends of a segment carry one.
pub fn densify(samples: &[InputSample], step: f64, bounds: Rect) -> Vec<InputSample> {
    let step = if step.is_finite() { step.max(MIN_STEP) } else { MIN_STEP };
    let Some(first) = samples.first() else {
        return Vec::new();
    };
    // A clipped segment is never longer than width + height of the bounds.
    let max_inserted = ((bounds.width() + bounds.height()) / step).ceil();
    let max_inserted = if max_inserted.is_finite() {
        max_inserted as usize + 2
    } else {
        0
    };

    let mut out = vec![*first];
    for pair in samples.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let distance = a.position().distance(b.position());
        if distance.is_finite() && distance > 0.0 {
            if let Some((t0, t1)) = clip_segment(a.position(), b.position(), bounds) {
                // Steps along the whole segment; the last one may be short.
                let n = distance / step;
                let lo = (t0 * n).ceil().max(1.0);
                let hi = (t1 * n).floor().min(n.ceil() - 1.0);
                if hi >= lo {
                    let count = ((hi - lo) as usize).saturating_add(1).min(max_inserted);
                    for k in 0..count {
                        let t = (lo + k as f64) / n;
                        out.push(lerp_sample(&a, &b, t));
                    }
                }
            }
        }
        out.push(b);
    }
    out
}

/// Parameter range `[t0, t1]` of the segment `a..b` that lies inside
/// `bounds`, or `None` when it misses them (Liang-Barsky).
fn clip_segment(a: Point, b: Point, bounds: Rect) -> Option<(f64, f64)> {
    let d = b - a;
    let edges = [
        (-d.x, a.x - bounds.x0),
        (d.x, bounds.x1 - a.x),
        (-d.y, a.y - bounds.y0),
        (d.y, bounds.y1 - a.y),
    ];
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    (t0 <= t1).then_some((t0, t1))
}

fn lerp_sample(a: &InputSample, b: &InputSample, t: f64) -> InputSample {
    let tf = t as f32;
    let tilt = match (a.tilt, b.tilt) {
        (Some(ta), Some(tb)) => Some(Tilt {
            x: ta.x + (tb.x - ta.x) * tf,
            y: ta.y + (tb.y - ta.y) * tf,
        }),
        _ => None,
    };
    InputSample {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
        pressure: a.pressure + (b.pressure - a.pressure) * tf,
        tilt,
    }
}
