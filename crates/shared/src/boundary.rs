//! Boundary polygon editing: vertex insertion, deletion and snapped drags.

use crate::calc::{distance, edges, midpoint};
use crate::grid::snap_to_foot;
use crate::models::Point;

/// A venue polygon never drops below a triangle.
pub const MIN_VERTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Alignment line drawn while a dragged vertex is snapped to a neighbor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide {
    pub axis: Axis,
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub point: Point,
    pub guides: Vec<SnapGuide>,
}

/// Splice the midpoint of edge `edge` (vertex `edge` to `edge + 1`, wrapping)
/// in after vertex `edge`. Returns the new vertex's index.
pub fn insert_vertex(boundary: &mut Vec<Point>, edge: usize) -> Option<usize> {
    let n = boundary.len();
    if n < 2 || edge >= n {
        return None;
    }
    let mid = midpoint(boundary[edge], boundary[(edge + 1) % n]);
    boundary.insert(edge + 1, mid);
    Some(edge + 1)
}

/// Remove vertex `index`. A no-op returning `false` when the polygon is
/// already at [`MIN_VERTICES`] or the index is out of range.
pub fn delete_vertex(boundary: &mut Vec<Point>, index: usize) -> bool {
    if boundary.len() <= MIN_VERTICES || index >= boundary.len() {
        return false;
    }
    boundary.remove(index);
    true
}

fn neighbours(boundary: &[Point], index: usize) -> Option<(Point, Point)> {
    let n = boundary.len();
    if n < 2 || index >= n {
        return None;
    }
    Some((boundary[(index + n - 1) % n], boundary[(index + 1) % n]))
}

/// Pick the neighbor coordinate to snap to on one axis, if any is close enough.
/// The previous neighbor wins a tie.
fn snap_axis(candidate: f64, prev: f64, next: f64, threshold: f64) -> Option<bool> {
    let dp = (candidate - prev).abs();
    let dn = (candidate - next).abs();
    match (dp <= threshold, dn <= threshold) {
        (true, true) => Some(dp <= dn),
        (true, false) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Snap a dragged vertex's candidate position. Each axis independently snaps
/// exactly onto the nearer neighbor within `threshold` feet, or otherwise
/// rounds to a whole foot.
pub fn snap_vertex(boundary: &[Point], index: usize, candidate: Point, threshold: f64) -> SnapResult {
    let Some((prev, next)) = neighbours(boundary, index) else {
        return SnapResult {
            point: Point::new(snap_to_foot(candidate.x), snap_to_foot(candidate.y)),
            guides: Vec::new(),
        };
    };

    let mut point = candidate;
    let mut anchors: Vec<(Axis, Point)> = Vec::new();

    match snap_axis(candidate.x, prev.x, next.x, threshold) {
        Some(use_prev) => {
            let n = if use_prev { prev } else { next };
            point.x = n.x;
            anchors.push((Axis::X, n));
        }
        None => point.x = snap_to_foot(candidate.x),
    }
    match snap_axis(candidate.y, prev.y, next.y, threshold) {
        Some(use_prev) => {
            let n = if use_prev { prev } else { next };
            point.y = n.y;
            anchors.push((Axis::Y, n));
        }
        None => point.y = snap_to_foot(candidate.y),
    }

    let guides = anchors
        .into_iter()
        .map(|(axis, from)| SnapGuide { axis, from, to: point })
        .collect();
    SnapResult { point, guides }
}

/// Snap and write vertex `index`. Returns the guides to display, or `None`
/// if the index is out of range.
pub fn move_vertex(
    boundary: &mut [Point],
    index: usize,
    candidate: Point,
    threshold: f64,
) -> Option<Vec<SnapGuide>> {
    if index >= boundary.len() || !candidate.is_finite() {
        return None;
    }
    let snapped = snap_vertex(boundary, index, candidate, threshold);
    boundary[index] = snapped.point;
    Some(snapped.guides)
}

/// Length readout for one boundary edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLength {
    pub index: usize,
    pub start: Point,
    pub end: Point,
    pub length: f64,
}

impl EdgeLength {
    pub fn midpoint(&self) -> Point {
        midpoint(self.start, self.end)
    }
}

pub fn edge_lengths(outline: &[Point]) -> Vec<EdgeLength> {
    edges(outline)
        .map(|(index, start, end)| EdgeLength {
            index,
            start,
            end,
            length: distance(start, end),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Venue;

    fn square() -> Vec<Point> {
        Venue::rectangle(10.0, 10.0)
    }

    #[test]
    fn test_insert_vertex_midpoint() {
        let mut poly = square();
        assert_eq!(insert_vertex(&mut poly, 0), Some(1));
        assert_eq!(poly.len(), 5);
        assert_eq!(poly[1], Point::new(5.0, 0.0));
    }

    #[test]
    fn test_insert_vertex_closing_edge() {
        let mut poly = square();
        assert_eq!(insert_vertex(&mut poly, 3), Some(4));
        assert_eq!(poly[4], Point::new(0.0, 5.0));
        assert_eq!(insert_vertex(&mut poly, 9), None);
    }

    #[test]
    fn test_delete_vertex_keeps_triangle() {
        let mut poly = square();
        assert!(delete_vertex(&mut poly, 0));
        assert_eq!(poly.len(), 3);
        let before = poly.clone();
        assert!(!delete_vertex(&mut poly, 0));
        assert_eq!(poly, before);
    }

    #[test]
    fn test_snap_to_neighbour_x() {
        // Vertex 1 of the square sits between (0,0) and (10,10).
        let poly = square();
        let result = snap_vertex(&poly, 1, Point::new(10.3, 4.6), 0.5);
        assert_eq!(result.point, Point::new(10.0, 5.0));
        assert_eq!(result.guides.len(), 1);
        assert_eq!(result.guides[0].axis, Axis::X);
        assert_eq!(result.guides[0].from, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_snap_both_axes() {
        let poly = square();
        let result = snap_vertex(&poly, 1, Point::new(9.7, 0.2), 0.5);
        assert_eq!(result.point, Point::new(10.0, 0.0));
        assert_eq!(result.guides.len(), 2);
    }

    #[test]
    fn test_no_snap_rounds_to_foot() {
        let poly = square();
        let result = snap_vertex(&poly, 1, Point::new(13.4, 6.6), 0.5);
        assert_eq!(result.point, Point::new(13.0, 7.0));
        assert!(result.guides.is_empty());
    }

    #[test]
    fn test_move_vertex_writes_point() {
        let mut poly = square();
        let guides = move_vertex(&mut poly, 2, Point::new(12.2, 9.9), 0.5).unwrap();
        assert_eq!(poly[2], Point::new(12.0, 10.0));
        assert_eq!(guides.len(), 1);
        assert!(move_vertex(&mut poly, 7, Point::ORIGIN, 0.5).is_none());
    }

    #[test]
    fn test_edge_lengths() {
        let lengths = edge_lengths(&[Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 4.0)]);
        assert_eq!(lengths.len(), 3);
        assert_eq!(lengths[0].length, 3.0);
        assert_eq!(lengths[1].length, 4.0);
        assert_eq!(lengths[2].length, 5.0);
        assert_eq!(lengths[2].midpoint(), Point::new(1.5, 2.0));
    }
}
