use crate::models::{Point, Rect};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Closest approach of a point to a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Foot of the perpendicular, clamped onto the segment.
    pub foot: Point,
    /// Distance from the query point to `foot`.
    pub distance: f64,
    /// Distance along the segment from its start to `foot`.
    pub along: f64,
}

/// Project `p` onto segment `a`-`b`. When the perpendicular foot falls outside
/// the segment the nearer endpoint is used instead.
pub fn project_onto_segment(p: Point, a: Point, b: Point) -> SegmentProjection {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq <= f64::EPSILON {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let foot = Point::new(a.x + t * dx, a.y + t * dy);
    SegmentProjection {
        foot,
        distance: distance(p, foot),
        along: t * len_sq.sqrt(),
    }
}

/// Iterate the closed polygon's edges as `(index, start, end)`.
pub fn edges(polygon: &[Point]) -> impl Iterator<Item = (usize, Point, Point)> + '_ {
    let n = polygon.len();
    let count = if n < 2 { 0 } else { n };
    (0..count).map(move |i| (i, polygon[i], polygon[(i + 1) % n]))
}

pub fn polygon_bounds(polygon: &[Point]) -> Option<Rect> {
    let first = *polygon.first()?;
    Some(
        polygon
            .iter()
            .fold(Rect::from_corners(first, first), |acc, &p| {
                acc.union(&Rect::from_corners(p, p))
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_diagonal() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_inside_segment() {
        let p = project_onto_segment(
            Point::new(5.0, 2.5),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((p.distance - 2.5).abs() < 1e-9);
        assert!((p.along - 5.0).abs() < 1e-9);
        assert_eq!(p.foot, Point::new(5.0, 0.0));
    }

    #[test]
    fn test_projection_clamps_to_nearer_endpoint() {
        let p = project_onto_segment(
            Point::new(103.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert_eq!(p.foot, Point::new(100.0, 0.0));
        assert!((p.distance - 5.0).abs() < 1e-9);
        assert!((p.along - 100.0).abs() < 1e-9);

        let before = project_onto_segment(
            Point::new(-3.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert_eq!(before.foot, Point::new(0.0, 0.0));
        assert!((before.along - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_degenerate_segment() {
        let a = Point::new(2.0, 2.0);
        let p = project_onto_segment(Point::new(5.0, 6.0), a, a);
        assert!((p.distance - 5.0).abs() < 1e-9);
        assert_eq!(p.along, 0.0);
    }

    #[test]
    fn test_edges_close_the_polygon() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(edges(&square).count(), 4);
        let last = edges(&square).last().unwrap();
        assert_eq!(last, (3, Point::new(0.0, 10.0), Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_polygon_bounds() {
        assert!(polygon_bounds(&[]).is_none());
        let b = polygon_bounds(&[
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(b.min, Point::new(-2.0, -1.0));
        assert_eq!(b.max, Point::new(3.0, 4.0));
    }
}
