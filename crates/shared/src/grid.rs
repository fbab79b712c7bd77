/// Venue unit system.
///
/// One grid unit is one foot. At scale 1.0 a foot is drawn as
/// `FEET_TO_PIXEL` screen pixels; the viewport multiplies by its scale on top.
pub const FEET_TO_PIXEL: f64 = 10.0;

/// Convert a length in feet to unscaled canvas pixels.
pub fn feet_to_px(feet: f64) -> f64 {
    feet * FEET_TO_PIXEL
}

/// Grid snap: round a coordinate to the nearest whole foot.
pub fn snap_to_foot(feet: f64) -> f64 {
    feet.round()
}

/// Format a length for display, dropping the fraction when it is whole.
pub fn format_feet(feet: f64) -> String {
    if (feet - feet.round()).abs() < 1e-9 {
        format!("{}ft", feet.round() as i64)
    } else {
        format!("{:.1}ft", feet)
    }
}

/// "100ft x 80ft" style readout for the toolbar.
pub fn format_dimensions(width: f64, height: f64) -> String {
    format!("{} x {}", format_feet(width), format_feet(height))
}
