//! Spatial auto-labeling.
//!
//! Tables near the venue boundary are labeled first, in the order met while
//! walking the border in vertex order. The remaining interior tables follow in
//! reading order (row buckets top to bottom, then left to right). Labels are
//! recomputed from scratch on every call; identical input always yields
//! identical output.

use serde::{Deserialize, Serialize};

use crate::calc::{distance, edges, project_onto_segment};
use crate::models::{FloorPlan, Point, Table, TableId};

pub const LABEL_PREFIX: &str = "T-";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelingConfig {
    /// A table whose center is within this many feet of the boundary is a wall table.
    pub wall_threshold_ft: f64,
    /// Height of the reading-order row buckets for interior tables.
    pub row_height_ft: f64,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        LabelingConfig {
            wall_threshold_ft: 8.0,
            row_height_ft: 4.0,
        }
    }
}

impl LabelingConfig {
    fn row_height(&self) -> f64 {
        if self.row_height_ft.is_finite() && self.row_height_ft > 0.0 {
            self.row_height_ft
        } else {
            LabelingConfig::default().row_height_ft
        }
    }
}

/// Closest approach of a point to the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallProximity {
    /// Minimum distance to any edge, in feet.
    pub distance: f64,
    /// Perimeter-walk position of the closest approach: full lengths of the
    /// edges before the nearest one plus the distance along it.
    pub walk: f64,
    /// Index of the nearest edge (vertex `edge` to vertex `edge + 1`).
    pub edge: usize,
}

/// Find the nearest boundary edge to `p`. Ties go to the earlier edge.
pub fn wall_proximity(outline: &[Point], p: Point) -> Option<WallProximity> {
    let mut walked = 0.0;
    let mut best: Option<WallProximity> = None;
    for (i, a, b) in edges(outline) {
        let proj = project_onto_segment(p, a, b);
        let closer = match best {
            None => true,
            Some(current) => proj.distance < current.distance,
        };
        if closer {
            best = Some(WallProximity {
                distance: proj.distance,
                walk: walked + proj.along,
                edge: i,
            });
        }
        walked += distance(a, b);
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Within the wall threshold; `walk` is the perimeter-walk position.
    Wall { walk: f64 },
    Interior,
}

pub fn classify(outline: &[Point], table: &Table, config: &LabelingConfig) -> Placement {
    match wall_proximity(outline, table.center()) {
        Some(prox) if prox.distance <= config.wall_threshold_ft => Placement::Wall { walk: prox.walk },
        _ => Placement::Interior,
    }
}

/// Table ids in label order: wall tables by perimeter walk, then interior
/// tables by row bucket and x. Table id breaks any remaining tie.
pub fn label_order(outline: &[Point], tables: &[Table], config: &LabelingConfig) -> Vec<TableId> {
    let row_height = config.row_height();
    let mut wall: Vec<(f64, TableId)> = Vec::new();
    let mut interior: Vec<(i64, f64, TableId)> = Vec::new();

    for table in tables {
        match classify(outline, table, config) {
            Placement::Wall { walk } => wall.push((walk, table.id)),
            Placement::Interior => {
                let center = table.center();
                let row = (center.y / row_height).floor() as i64;
                interior.push((row, center.x, table.id));
            }
        }
    }

    wall.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    interior.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.total_cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    wall.into_iter()
        .map(|(_, id)| id)
        .chain(interior.into_iter().map(|(_, _, id)| id))
        .collect()
}

pub fn label_for(position: usize) -> String {
    format!("{LABEL_PREFIX}{}", position + 1)
}

/// `(table id, label)` pairs in label order.
pub fn compute_labels(
    outline: &[Point],
    tables: &[Table],
    config: &LabelingConfig,
) -> Vec<(TableId, String)> {
    label_order(outline, tables, config)
        .into_iter()
        .enumerate()
        .map(|(i, id)| (id, label_for(i)))
        .collect()
}

/// Relabel every table of `plan` in place. Returns whether any label changed.
pub fn apply_labels(plan: &mut FloorPlan, config: &LabelingConfig) -> bool {
    let outline = plan.venue.outline();
    let labels = compute_labels(&outline, &plan.tables, config);
    let mut changed = false;
    for (id, label) in labels {
        if let Some(table) = plan.table_mut(id) {
            if table.label != label {
                table.label = label;
                changed = true;
            }
        }
    }
    tracing::trace!(tables = plan.tables.len(), changed, "relabeled tables");
    changed
}
