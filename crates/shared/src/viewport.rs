use serde::{Deserialize, Serialize};

use crate::grid::{feet_to_px, FEET_TO_PIXEL};
use crate::models::{Point, Rect, Size};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;

/// Multiplier applied by the zoom-in / zoom-out buttons.
pub const ZOOM_STEP: f64 = 1.2;

/// Clamp a requested scale into `[MIN_SCALE, MAX_SCALE]`. NaN is rejected.
pub fn clamp_scale(scale: f64) -> Option<f64> {
    if scale.is_nan() {
        None
    } else {
        Some(scale.clamp(MIN_SCALE, MAX_SCALE))
    }
}

/// Venue-feet to screen-pixel transform:
/// `screen = feet * FEET_TO_PIXEL * scale + pan`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub pan: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            scale: 1.0,
            pan: Point::ORIGIN,
        }
    }
}

impl Viewport {
    pub fn new(scale: f64, pan: Point) -> Self {
        Viewport {
            scale: clamp_scale(scale).unwrap_or(1.0),
            pan,
        }
    }

    /// Screen pixels per foot under the current scale.
    pub fn pixels_per_foot(&self) -> f64 {
        FEET_TO_PIXEL * self.scale
    }

    pub fn to_screen(&self, venue: Point) -> Point {
        let k = self.pixels_per_foot();
        Point::new(venue.x * k + self.pan.x, venue.y * k + self.pan.y)
    }

    pub fn to_venue(&self, screen: Point) -> Point {
        let k = self.pixels_per_foot();
        Point::new((screen.x - self.pan.x) / k, (screen.y - self.pan.y) / k)
    }

    pub fn rect_to_screen(&self, venue: Rect) -> Rect {
        Rect::from_corners(self.to_screen(venue.min), self.to_screen(venue.max))
    }

    /// Convert a screen-pixel displacement into feet.
    pub fn screen_delta_to_feet(&self, dx: f64, dy: f64) -> Point {
        let k = self.pixels_per_foot();
        Point::new(dx / k, dy / k)
    }

    /// Change scale while keeping the venue point under `anchor` fixed on
    /// screen. Returns `false` and leaves the transform untouched when the
    /// input is degenerate.
    pub fn zoom_to_point(&mut self, new_scale: f64, anchor: Point) -> bool {
        let Some(scale) = clamp_scale(new_scale) else {
            return false;
        };
        let under_anchor = self.to_venue(anchor);
        let k = FEET_TO_PIXEL * scale;
        let pan = Point::new(anchor.x - under_anchor.x * k, anchor.y - under_anchor.y * k);
        if !under_anchor.is_finite() || !pan.is_finite() {
            return false;
        }
        self.scale = scale;
        self.pan = pan;
        true
    }

    /// Multiply the scale by `ratio` around `anchor` (pinch, zoom buttons).
    pub fn zoom_by_ratio(&mut self, ratio: f64, anchor: Point) -> bool {
        if !ratio.is_finite() || ratio <= 0.0 {
            return false;
        }
        self.zoom_to_point(self.scale * ratio, anchor)
    }

    /// Wheel zoom: each notch moves the scale by `sensitivity` of itself.
    /// Scrolling up (negative delta) zooms in.
    pub fn zoom_by_wheel(&mut self, delta_y: f64, anchor: Point, sensitivity: f64) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let direction = -delta_y.signum();
        self.zoom_to_point(self.scale + sensitivity * direction * self.scale, anchor)
    }

    pub fn zoom_in(&mut self, anchor: Point) -> bool {
        self.zoom_by_ratio(ZOOM_STEP, anchor)
    }

    pub fn zoom_out(&mut self, anchor: Point) -> bool {
        self.zoom_by_ratio(1.0 / ZOOM_STEP, anchor)
    }

    /// Fit `content` (feet) into `container` (pixels) minus `margin`, centered.
    /// `cap` bounds the resulting scale from above.
    pub fn fit(&mut self, container: Size, content: Rect, margin: f64, cap: Option<f64>) -> bool {
        let content_w = feet_to_px(content.width());
        let content_h = feet_to_px(content.height());
        if !container.is_usable() || !(content_w > 0.0 && content_h > 0.0) {
            return false;
        }
        let available_w = (container.width - margin).max(1.0);
        let available_h = (container.height - margin).max(1.0);
        let mut scale = (available_w / content_w).min(available_h / content_h);
        if let Some(cap) = cap {
            scale = scale.min(cap);
        }
        let Some(scale) = clamp_scale(scale) else {
            return false;
        };

        let k = FEET_TO_PIXEL * scale;
        let center = content.center();
        let target = container.center();
        let pan = Point::new(target.x - center.x * k, target.y - center.y * k);
        if !pan.is_finite() {
            return false;
        }
        self.scale = scale;
        self.pan = pan;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn test_to_screen_and_back() {
        let vp = Viewport::new(2.0, Point::new(15.0, -30.0));
        let s = vp.to_screen(Point::new(3.0, 4.0));
        assert!(approx(s, Point::new(75.0, 50.0)));
        assert!(approx(vp.to_venue(s), Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_zoom_to_point_keeps_anchor() {
        let mut vp = Viewport::new(1.0, Point::new(20.0, 40.0));
        let anchor = Point::new(300.0, 200.0);
        let before = vp.to_venue(anchor);
        assert!(vp.zoom_to_point(2.5, anchor));
        assert!((vp.scale - 2.5).abs() < 1e-12);
        assert!(approx(vp.to_venue(anchor), before));
    }

    #[test]
    fn test_zoom_clamps_scale() {
        let mut vp = Viewport::default();
        vp.zoom_to_point(50.0, Point::ORIGIN);
        assert_eq!(vp.scale, MAX_SCALE);
        vp.zoom_to_point(0.0001, Point::ORIGIN);
        assert_eq!(vp.scale, MIN_SCALE);
        vp.zoom_to_point(f64::INFINITY, Point::ORIGIN);
        assert_eq!(vp.scale, MAX_SCALE);
    }

    #[test]
    fn test_degenerate_zoom_leaves_transform_unchanged() {
        let mut vp = Viewport::new(1.5, Point::new(7.0, 9.0));
        let before = vp;
        assert!(!vp.zoom_to_point(f64::NAN, Point::new(1.0, 1.0)));
        assert!(!vp.zoom_to_point(2.0, Point::new(f64::NAN, 1.0)));
        assert!(!vp.zoom_by_ratio(0.0, Point::ORIGIN));
        assert!(!vp.zoom_by_ratio(f64::INFINITY, Point::ORIGIN));
        assert_eq!(vp, before);

        // A corrupted zero scale makes the inverse divide by zero.
        let mut broken = Viewport {
            scale: 0.0,
            pan: Point::ORIGIN,
        };
        assert!(!broken.zoom_to_point(1.0, Point::new(5.0, 5.0)));
        assert_eq!(broken.scale, 0.0);
    }

    #[test]
    fn test_wheel_direction() {
        let mut vp = Viewport::default();
        vp.zoom_by_wheel(-100.0, Point::ORIGIN, 0.1);
        assert!((vp.scale - 1.1).abs() < 1e-9);
        vp.zoom_by_wheel(3.0, Point::ORIGIN, 0.1);
        assert!((vp.scale - 0.99).abs() < 1e-9);
        assert!(!vp.zoom_by_wheel(0.0, Point::ORIGIN, 0.1));
    }

    #[test]
    fn test_zoom_buttons() {
        let mut vp = Viewport::default();
        vp.zoom_in(Point::ORIGIN);
        assert!((vp.scale - 1.2).abs() < 1e-9);
        vp.zoom_out(Point::ORIGIN);
        assert!((vp.scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_centers_content() {
        let mut vp = Viewport::default();
        let container = Size::new(840.0, 640.0);
        let room = Rect::from_origin_size(Point::ORIGIN, 100.0, 100.0);
        assert!(vp.fit(container, room, 40.0, None));
        // available 800x600 over 1000x1000 px of content
        assert!((vp.scale - 0.6).abs() < 1e-9);
        assert!(approx(vp.to_screen(room.center()), container.center()));
    }

    #[test]
    fn test_fit_offset_polygon_bounds() {
        let mut vp = Viewport::default();
        let container = Size::new(1000.0, 500.0);
        let content = Rect::from_corners(Point::new(20.0, 10.0), Point::new(60.0, 30.0));
        assert!(vp.fit(container, content, 40.0, None));
        assert!(approx(vp.to_screen(content.center()), container.center()));
    }

    #[test]
    fn test_fit_cap() {
        let mut vp = Viewport::default();
        let small = Rect::from_origin_size(Point::new(10.0, 10.0), 8.0, 3.0);
        assert!(vp.fit(Size::new(1200.0, 900.0), small, 40.0, Some(2.0)));
        assert_eq!(vp.scale, 2.0);
    }

    #[test]
    fn test_fit_rejects_empty_container() {
        let mut vp = Viewport::default();
        let room = Rect::from_origin_size(Point::ORIGIN, 10.0, 10.0);
        assert!(!vp.fit(Size::new(0.0, 300.0), room, 40.0, None));
        let flat = Rect::from_origin_size(Point::ORIGIN, 10.0, 0.0);
        assert!(!vp.fit(Size::new(300.0, 300.0), flat, 40.0, None));
        assert_eq!(vp, Viewport::default());
    }
}
