//! Symmetry expansion of a single paint position.

use kurbo::Point;

use crate::types::SymmetryFlags;

/// Expand one canvas point into the positions to paint for it.
///
/// The original point always comes first, followed by the horizontal,
/// vertical and point mirrors for each enabled flag, in that order.
pub fn expand(point: Point, flags: SymmetryFlags, width: f64, height: f64) -> Vec<Point> {
    let mut positions = Vec::with_capacity(1 + flags.mirror_count());
    positions.push(point);
    if flags.horizontal {
        positions.push(Point::new(width - point.x, point.y));
    }
    if flags.vertical {
        positions.push(Point::new(point.x, height - point.y));
    }
    if flags.both {
        positions.push(Point::new(width - point.x, height - point.y));
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_flags_returns_original() {
        for (x, y) in [(0.0, 0.0), (12.5, 99.0), (-3.0, 400.0)] {
            let out = expand(Point::new(x, y), SymmetryFlags::NONE, 100.0, 100.0);
            assert_eq!(out, vec![Point::new(x, y)]);
        }
    }

    #[test]
    fn test_horizontal_only() {
        let out = expand(Point::new(20.0, 30.0), SymmetryFlags::horizontal(), 100.0, 100.0);
        assert_eq!(out, vec![Point::new(20.0, 30.0), Point::new(80.0, 30.0)]);
    }

    #[test]
    fn test_vertical_only() {
        let out = expand(Point::new(20.0, 30.0), SymmetryFlags::vertical(), 100.0, 50.0);
        assert_eq!(out, vec![Point::new(20.0, 30.0), Point::new(20.0, 20.0)]);
    }

    #[test]
    fn test_all_flags_fixed_order() {
        let out = expand(Point::new(10.0, 20.0), SymmetryFlags::all(), 200.0, 100.0);
        assert_eq!(
            out,
            vec![
                Point::new(10.0, 20.0),
                Point::new(190.0, 20.0),
                Point::new(10.0, 80.0),
                Point::new(190.0, 80.0),
            ]
        );
    }

    #[test]
    fn test_both_without_axes() {
        let flags = SymmetryFlags {
            both: true,
            ..SymmetryFlags::NONE
        };
        let out = expand(Point::new(1.0, 2.0), flags, 10.0, 10.0);
        assert_eq!(out, vec![Point::new(1.0, 2.0), Point::new(9.0, 8.0)]);
    }

    #[test]
    fn test_expansion_is_repeatable() {
        let p = Point::new(33.0, 44.0);
        let first = expand(p, SymmetryFlags::all(), 640.0, 480.0);
        let second = expand(p, SymmetryFlags::all(), 640.0, 480.0);
        assert_eq!(first, second);
    }
}
