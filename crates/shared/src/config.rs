use serde::{Deserialize, Serialize};

use crate::labeling::LabelingConfig;

/// Tunables for the editor core. Every field has a documented default, and a
/// partial JSON/TOML document fills the rest from [`EditorConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub labeling: LabelingConfig,
    /// A dragged boundary vertex snaps to a neighbor's x or y within this many feet.
    pub vertex_snap_ft: f64,
    /// Pointer travel below this many pixels is a click, not a drag.
    pub move_threshold_px: f64,
    /// Relative scale change per wheel notch.
    pub wheel_sensitivity: f64,
    /// Pixels kept free around the content by fit-to-screen.
    pub fit_margin_px: f64,
    /// Upper scale bound when fitting to the tables' bounding box.
    pub tables_fit_cap: f64,
    /// Hit radius of boundary vertex and edge-midpoint handles, in pixels.
    pub handle_radius_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            labeling: LabelingConfig::default(),
            vertex_snap_ft: 0.5,
            move_threshold_px: 2.0,
            wheel_sensitivity: 0.1,
            fit_margin_px: 40.0,
            tables_fit_cap: 2.0,
            handle_radius_px: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: EditorConfig =
            serde_json::from_str(r#"{"labeling":{"wallThresholdFt":6.0},"moveThresholdPx":4}"#)
                .unwrap();
        assert_eq!(cfg.labeling.wall_threshold_ft, 6.0);
        assert_eq!(cfg.labeling.row_height_ft, 4.0);
        assert_eq!(cfg.move_threshold_px, 4.0);
        assert_eq!(cfg.vertex_snap_ft, 0.5);
    }
}
