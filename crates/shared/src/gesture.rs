//! Gesture arbitration.
//!
//! One [`GestureState`] is active at a time. A pointer-down picks the session
//! from the hit target, edit mode, button and pointer count; moves update it
//! once the pointer has travelled past the click threshold; the final
//! pointer-up settles it (click semantics, relabel, commit) and returns to
//! [`GestureState::Idle`].

use crate::boundary;
use crate::calc::distance;
use crate::editor::{EditMode, FloorPlanEditor, Panel};
use crate::grid::snap_to_foot;
use crate::hit_test::HitTarget;
use crate::input::{InputEvent, PointerEvent, PointerPhase};
use crate::models::{Point, Rect, TableId};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Panning {
        origin: Point,
        start_pan: Point,
        moved: bool,
        /// Table pressed in zone mode; a click assigns the active zone to it.
        clicked_table: Option<TableId>,
    },
    DraggingTables {
        origin: Point,
        struck: TableId,
        /// Pre-drag position of every participant.
        snapshot: Vec<(TableId, Point)>,
        moved: bool,
        additive: bool,
        /// The struck table joined the selection on this press.
        added_on_down: bool,
    },
    DraggingVertex {
        origin: Point,
        index: usize,
        start: Point,
        moved: bool,
    },
    /// Two fingers zoom by their spread and pan by their midpoint.
    Pinching {
        /// Finger distance at the previous sample, in pixels.
        baseline: f64,
        /// Finger midpoint at the previous sample.
        last_mid: Point,
    },
    BoxSelecting {
        origin: Point,
        current: Point,
        moved: bool,
        additive: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Idle,
    Panning,
    DraggingTables,
    DraggingVertex,
    Pinching,
    BoxSelecting,
}

impl GestureState {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureState::Idle => GestureKind::Idle,
            GestureState::Panning { .. } => GestureKind::Panning,
            GestureState::DraggingTables { .. } => GestureKind::DraggingTables,
            GestureState::DraggingVertex { .. } => GestureKind::DraggingVertex,
            GestureState::Pinching { .. } => GestureKind::Pinching,
            GestureState::BoxSelecting { .. } => GestureKind::BoxSelecting,
        }
    }

    pub fn has_moved(&self) -> bool {
        match self {
            GestureState::Panning { moved, .. }
            | GestureState::DraggingTables { moved, .. }
            | GestureState::DraggingVertex { moved, .. }
            | GestureState::BoxSelecting { moved, .. } => *moved,
            GestureState::Idle | GestureState::Pinching { .. } => false,
        }
    }

    /// Screen-space marquee once a box-select has moved.
    pub fn marquee(&self) -> Option<Rect> {
        match self {
            GestureState::BoxSelecting {
                origin,
                current,
                moved: true,
                ..
            } => Some(Rect::from_corners(*origin, *current)),
            _ => None,
        }
    }
}

/// Mark `moved` once the pointer is `threshold` pixels from `origin`.
/// Returns whether the session counts as moved.
fn crossed(moved: &mut bool, origin: Point, position: Point, threshold: f64) -> bool {
    if !*moved && distance(origin, position) >= threshold {
        *moved = true;
    }
    *moved
}

impl FloorPlanEditor {
    pub fn handle(&mut self, event: impl Into<InputEvent>) {
        match event.into() {
            InputEvent::Wheel { position, delta_y } => {
                self.wheel(position, delta_y);
            }
            InputEvent::Pointer(ev) => match ev.phase {
                PointerPhase::Down => self.pointer_down(&ev),
                PointerPhase::Move => self.pointer_move(&ev),
                PointerPhase::Up => self.pointer_up(&ev),
            },
        }
    }

    fn pointer_down(&mut self, ev: &PointerEvent) {
        if ev.pointer_count >= 2 {
            self.finish_gesture();
            self.gesture = GestureState::Pinching {
                baseline: ev.pinch_distance().unwrap_or(0.0),
                last_mid: ev.pinch_midpoint().unwrap_or(ev.position),
            };
            tracing::debug!("pinch started");
            return;
        }
        if !matches!(self.gesture, GestureState::Idle) {
            self.finish_gesture();
        }

        let origin = ev.position;
        let additive = ev.modifiers.additive;
        self.gesture = match (self.mode, ev.target) {
            (EditMode::Boundary, HitTarget::Vertex(index)) => self.start_vertex_drag(origin, index),
            (EditMode::Boundary, HitTarget::Edge(edge)) => match self.insert_vertex(edge) {
                Some(index) => self.start_vertex_drag(origin, index),
                None => self.start_pan(origin, None),
            },
            (EditMode::Tables, HitTarget::Table(id)) if self.plan.table(id).is_some() => {
                self.start_table_drag(origin, id, additive)
            }
            (EditMode::Zones, HitTarget::Table(id)) => self.start_pan(origin, Some(id)),
            _ if ev.button.is_pan_trigger() => self.start_pan(origin, None),
            (EditMode::Tables, _) => {
                if !additive {
                    self.selection.clear();
                    self.panel = None;
                }
                GestureState::BoxSelecting {
                    origin,
                    current: origin,
                    moved: false,
                    additive,
                }
            }
            _ => self.start_pan(origin, None),
        };
        tracing::debug!(gesture = ?self.gesture.kind(), target = ?ev.target, "gesture started");
    }

    fn start_pan(&self, origin: Point, clicked_table: Option<TableId>) -> GestureState {
        GestureState::Panning {
            origin,
            start_pan: self.viewport.pan,
            moved: false,
            clicked_table,
        }
    }

    fn start_vertex_drag(&self, origin: Point, index: usize) -> GestureState {
        match self.plan.venue.boundary.get(index) {
            Some(&start) => GestureState::DraggingVertex {
                origin,
                index,
                start,
                moved: false,
            },
            None => self.start_pan(origin, None),
        }
    }

    fn start_table_drag(&mut self, origin: Point, struck: TableId, additive: bool) -> GestureState {
        let mut added_on_down = false;
        if !self.selection.contains(struck) {
            if additive {
                self.selection.insert(struck);
                added_on_down = true;
            } else {
                self.selection.select_only(struck);
            }
        }
        let snapshot = self
            .selected_tables()
            .map(|t| (t.id, t.position()))
            .collect();
        GestureState::DraggingTables {
            origin,
            struck,
            snapshot,
            moved: false,
            additive,
            added_on_down,
        }
    }

    fn pointer_move(&mut self, ev: &PointerEvent) {
        let threshold = self.config.move_threshold_px;
        let position = ev.position;
        match &mut self.gesture {
            GestureState::Idle => {}
            GestureState::Panning {
                origin,
                start_pan,
                moved,
                ..
            } => {
                if crossed(moved, *origin, position, threshold) {
                    self.viewport.pan = start_pan.offset(position.x - origin.x, position.y - origin.y);
                }
            }
            GestureState::DraggingTables {
                origin,
                snapshot,
                moved,
                ..
            } => {
                if !crossed(moved, *origin, position, threshold) {
                    return;
                }
                let delta = self
                    .viewport
                    .screen_delta_to_feet(position.x - origin.x, position.y - origin.y);
                for (id, start) in snapshot.iter() {
                    if let Some(table) = self.plan.table_mut(*id) {
                        table.set_position(Point::new(
                            snap_to_foot(start.x + delta.x),
                            snap_to_foot(start.y + delta.y),
                        ));
                    }
                }
            }
            GestureState::DraggingVertex {
                origin,
                index,
                start,
                moved,
            } => {
                if !crossed(moved, *origin, position, threshold) {
                    return;
                }
                let delta = self
                    .viewport
                    .screen_delta_to_feet(position.x - origin.x, position.y - origin.y);
                let candidate = start.offset(delta.x, delta.y);
                if let Some(guides) = boundary::move_vertex(
                    &mut self.plan.venue.boundary,
                    *index,
                    candidate,
                    self.config.vertex_snap_ft,
                ) {
                    self.snap_guides = guides;
                }
            }
            GestureState::Pinching { baseline, last_mid } => {
                let (Some(d), Some(mid)) = (ev.pinch_distance(), ev.pinch_midpoint()) else {
                    return;
                };
                if *baseline >= 1.0 {
                    self.viewport.zoom_by_ratio(d / *baseline, *last_mid);
                }
                self.viewport.pan = self
                    .viewport
                    .pan
                    .offset(mid.x - last_mid.x, mid.y - last_mid.y);
                *baseline = d;
                *last_mid = mid;
            }
            GestureState::BoxSelecting {
                origin,
                current,
                moved,
                ..
            } => {
                crossed(moved, *origin, position, threshold);
                *current = position;
            }
        }
    }

    fn pointer_up(&mut self, ev: &PointerEvent) {
        if matches!(self.gesture, GestureState::Pinching { .. }) && ev.pointer_count > 0 {
            return;
        }
        let gesture = std::mem::take(&mut self.gesture);
        self.snap_guides.clear();
        tracing::debug!(gesture = ?gesture.kind(), moved = gesture.has_moved(), "gesture ended");

        match gesture {
            GestureState::Panning {
                moved: false,
                clicked_table,
                ..
            } => match clicked_table {
                Some(id) => self.toggle_active_zone_on(id),
                None => self.clear_selection(),
            },
            GestureState::DraggingTables {
                moved: false,
                struck,
                additive,
                added_on_down,
                ..
            } => {
                if !additive {
                    self.selection.select_only(struck);
                } else if !added_on_down {
                    self.selection.remove(struck);
                }
                self.panel = (!self.selection.is_empty()).then_some(Panel::Table);
            }
            GestureState::BoxSelecting { moved: false, .. } => {
                self.panel = None;
            }
            other => self.settle(other),
        }
    }

    /// End `gesture` without click semantics: moved drags commit and a moved
    /// marquee applies.
    fn settle(&mut self, gesture: GestureState) {
        match gesture {
            GestureState::DraggingTables { moved: true, .. } => self.relabel_and_commit_tables(),
            GestureState::DraggingVertex { moved: true, .. } => self.commit_venue(),
            GestureState::BoxSelecting {
                origin,
                current,
                moved: true,
                additive,
            } => {
                let hits = self.tables_in_marquee(Rect::from_corners(origin, current));
                if additive {
                    self.selection.extend(hits);
                } else {
                    self.selection.replace(hits);
                }
                self.panel = (!self.selection.is_empty()).then_some(Panel::Table);
            }
            _ => {}
        }
    }

    /// Settle whatever session is active, e.g. when a second finger lands.
    fn finish_gesture(&mut self) {
        let gesture = std::mem::take(&mut self.gesture);
        self.snap_guides.clear();
        self.settle(gesture);
    }

    /// Ids of tables whose screen rectangle overlaps `marquee`.
    pub fn tables_in_marquee(&self, marquee: Rect) -> Vec<TableId> {
        self.plan
            .tables
            .iter()
            .filter(|t| self.viewport.rect_to_screen(t.rect()).overlaps(&marquee))
            .map(|t| t.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{Axis, SnapGuide};
    use crate::config::EditorConfig;
    use crate::input::{PointerButton, PointerEvent};
    use crate::models::{FloorPlan, Size, Table, Venue};
    use crate::store::Commit;
    use crate::viewport::Viewport;

    /// Scale 1.0 with no pan: one foot is ten pixels.
    fn editor_with(tables: &[(TableId, f64, f64)]) -> FloorPlanEditor {
        let mut plan = FloorPlan::new("e1", "Show", Venue::new(100.0, 100.0));
        for &(id, x, y) in tables {
            plan.tables.push(Table::new(id, Point::new(x, y)));
        }
        let mut ed = FloorPlanEditor::new(plan, EditorConfig::default());
        ed.container = Size::new(800.0, 600.0);
        ed.viewport = Viewport::default();
        ed
    }

    fn press(ed: &mut FloorPlanEditor, at: Point) -> PointerEvent {
        let ev = PointerEvent::down(at).with_target(ed.hit_test(at));
        ed.handle(ev);
        ev
    }

    fn drag(ed: &mut FloorPlanEditor, from: Point, to: Point) {
        press(ed, from);
        ed.handle(PointerEvent::moved(to));
        ed.handle(PointerEvent::up(to));
    }

    #[test]
    fn test_click_on_table_selects_without_moving() {
        let mut ed = editor_with(&[(1, 0.0, 0.0), (2, 10.0, 0.0)]);
        ed.selection.replace([1, 2]);
        press(&mut ed, Point::new(5.0, 5.0));
        ed.handle(PointerEvent::moved(Point::new(6.0, 6.0)));
        ed.handle(PointerEvent::up(Point::new(6.0, 6.0)));

        assert_eq!(ed.selection().ids(), vec![1]);
        assert_eq!(ed.plan().table(1).unwrap().position(), Point::new(0.0, 0.0));
        assert_eq!(ed.panel(), Some(Panel::Table));
        assert!(ed.take_commits().is_empty());
    }

    #[test]
    fn test_multi_select_drag_preserves_offset() {
        let mut ed = editor_with(&[(1, 0.0, 0.0), (2, 10.0, 0.0)]);
        ed.selection.replace([1, 2]);
        drag(&mut ed, Point::new(5.0, 5.0), Point::new(55.0, 55.0));

        assert_eq!(ed.plan().table(1).unwrap().position(), Point::new(5.0, 5.0));
        assert_eq!(ed.plan().table(2).unwrap().position(), Point::new(15.0, 5.0));
        assert_eq!(ed.selection().ids(), vec![1, 2]);
        assert!(matches!(ed.take_commits().as_slice(), [Commit::Tables(_)]));
        assert_eq!(ed.gesture(), &GestureState::Idle);
    }

    #[test]
    fn test_drag_unselected_table_collapses_selection() {
        let mut ed = editor_with(&[(1, 0.0, 0.0), (2, 20.0, 0.0)]);
        ed.selection.select_only(1);
        drag(&mut ed, Point::new(205.0, 5.0), Point::new(235.0, 5.0));
        assert_eq!(ed.selection().ids(), vec![2]);
        assert_eq!(ed.plan().table(2).unwrap().x, 23.0);
        assert_eq!(ed.plan().table(1).unwrap().x, 0.0);
    }

    #[test]
    fn test_drag_snaps_to_whole_feet_at_scale() {
        let mut ed = editor_with(&[(1, 10.0, 10.0)]);
        ed.viewport = Viewport::new(2.0, Point::ORIGIN);
        // 37px at 20px/ft is 1.85ft.
        drag(&mut ed, Point::new(210.0, 210.0), Point::new(247.0, 210.0));
        assert_eq!(ed.plan().table(1).unwrap().position(), Point::new(12.0, 10.0));
    }

    #[test]
    fn test_shift_click_toggles() {
        let mut ed = editor_with(&[(1, 0.0, 0.0), (2, 20.0, 0.0)]);
        ed.selection.select_only(1);
        let at = Point::new(205.0, 5.0);
        ed.handle(PointerEvent::down(at).with_target(ed.hit_test(at)).additive());
        ed.handle(PointerEvent::up(at));
        assert_eq!(ed.selection().ids(), vec![1, 2]);

        ed.handle(PointerEvent::down(at).with_target(ed.hit_test(at)).additive());
        ed.handle(PointerEvent::up(at));
        assert_eq!(ed.selection().ids(), vec![1]);
    }

    #[test]
    fn test_click_empty_canvas_clears() {
        let mut ed = editor_with(&[(1, 0.0, 0.0)]);
        ed.select_table(1).unwrap();
        let at = Point::new(500.0, 500.0);
        ed.handle(PointerEvent::down(at));
        ed.handle(PointerEvent::up(at));
        assert!(ed.selection().is_empty());
        assert_eq!(ed.panel(), None);
    }

    #[test]
    fn test_box_select() {
        let mut ed = editor_with(&[(1, 0.0, 0.0), (2, 20.0, 0.0), (3, 50.0, 50.0)]);
        let from = Point::new(-10.0, -10.0);
        press(&mut ed, from);
        ed.handle(PointerEvent::moved(Point::new(250.0, 20.0)));
        assert_eq!(
            ed.marquee(),
            Some(Rect::from_corners(from, Point::new(250.0, 20.0)))
        );
        ed.handle(PointerEvent::up(Point::new(250.0, 20.0)));
        assert_eq!(ed.selection().ids(), vec![1, 2]);
        assert_eq!(ed.marquee(), None);
    }

    #[test]
    fn test_box_select_uses_current_transform() {
        // 25px per foot, venue origin at (40, -30) on screen.
        let mut ed = editor_with(&[(1, 0.0, 0.0), (2, 20.0, 0.0)]);
        ed.viewport = Viewport::new(2.5, Point::new(40.0, -30.0));
        // Table 1 spans (40,-30)-(240,45) on screen, table 2 starts at x=540.
        // Read as unscaled feet the marquee would cover table 2 instead.
        drag(&mut ed, Point::new(300.0, 60.0), Point::new(200.0, 20.0));
        assert_eq!(ed.selection().ids(), vec![1]);
        assert_eq!(ed.panel(), Some(Panel::Table));
    }

    #[test]
    fn test_empty_marquee_leaves_selection_empty() {
        let mut ed = editor_with(&[(1, 0.0, 0.0)]);
        ed.selection.select_only(1);
        drag(&mut ed, Point::new(600.0, 600.0), Point::new(700.0, 700.0));
        assert!(ed.selection().is_empty());
    }

    #[test]
    fn test_additive_box_select_extends() {
        let mut ed = editor_with(&[(1, 0.0, 0.0), (2, 50.0, 50.0)]);
        ed.selection.select_only(2);
        ed.handle(PointerEvent::down(Point::new(-5.0, -5.0)).additive());
        ed.handle(PointerEvent::moved(Point::new(20.0, 20.0)));
        ed.handle(PointerEvent::up(Point::new(20.0, 20.0)));
        assert_eq!(ed.selection().ids(), vec![1, 2]);
    }

    #[test]
    fn test_right_button_pans() {
        let mut ed = editor_with(&[]);
        ed.handle(PointerEvent::down(Point::new(100.0, 100.0)).with_button(PointerButton::Secondary));
        assert_eq!(ed.gesture().kind(), GestureKind::Panning);
        ed.handle(PointerEvent::moved(Point::new(130.0, 80.0)));
        assert_eq!(ed.viewport().pan, Point::new(30.0, -20.0));
        // Later moves are measured from the press, not the previous sample.
        ed.handle(PointerEvent::moved(Point::new(140.0, 80.0)));
        assert_eq!(ed.viewport().pan, Point::new(40.0, -20.0));
        ed.handle(PointerEvent::up(Point::new(140.0, 80.0)));
        assert_eq!(ed.gesture(), &GestureState::Idle);
    }

    #[test]
    fn test_pan_below_threshold_is_a_click() {
        let mut ed = editor_with(&[]);
        ed.set_mode(EditMode::Zones);
        ed.handle(PointerEvent::down(Point::new(100.0, 100.0)));
        ed.handle(PointerEvent::moved(Point::new(101.0, 101.0)));
        assert_eq!(ed.viewport().pan, Point::ORIGIN);
        assert!(!ed.gesture().has_moved());
    }

    #[test]
    fn test_pinch_zoom_keeps_midpoint_fixed() {
        let mut ed = editor_with(&[]);
        let a = Point::new(100.0, 100.0);
        let b = Point::new(200.0, 100.0);
        ed.handle(PointerEvent::pinch(PointerPhase::Down, a, b));
        assert_eq!(
            ed.gesture(),
            &GestureState::Pinching {
                baseline: 100.0,
                last_mid: Point::new(150.0, 100.0),
            }
        );

        let mid = Point::new(150.0, 100.0);
        let under = ed.viewport().to_venue(mid);
        ed.handle(PointerEvent::pinch(
            PointerPhase::Move,
            Point::new(50.0, 100.0),
            Point::new(250.0, 100.0),
        ));
        assert!((ed.viewport().scale - 2.0).abs() < 1e-9);
        let after = ed.viewport().to_venue(mid);
        assert!((after.x - under.x).abs() < 1e-9 && (after.y - under.y).abs() < 1e-9);

        // Lifting one finger keeps the pinch alive; the last ends it.
        ed.handle(PointerEvent::up(mid).with_pointer_count(1));
        assert_eq!(ed.gesture().kind(), GestureKind::Pinching);
        ed.handle(PointerEvent::up(mid));
        assert_eq!(ed.gesture(), &GestureState::Idle);
    }

    #[test]
    fn test_two_finger_translation_pans() {
        let mut ed = editor_with(&[]);
        ed.viewport = Viewport::new(1.0, Point::new(20.0, 20.0));
        ed.handle(PointerEvent::pinch(
            PointerPhase::Down,
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
        ));
        ed.handle(PointerEvent::pinch(
            PointerPhase::Move,
            Point::new(150.0, 200.0),
            Point::new(250.0, 200.0),
        ));
        assert_eq!(ed.viewport().scale, 1.0);
        assert_eq!(ed.viewport().pan, Point::new(70.0, 120.0));

        // Spread and slide together: the venue point under the old midpoint
        // follows the fingers to the new one.
        let under = ed.viewport().to_venue(Point::new(200.0, 200.0));
        ed.handle(PointerEvent::pinch(
            PointerPhase::Move,
            Point::new(110.0, 210.0),
            Point::new(310.0, 210.0),
        ));
        assert!((ed.viewport().scale - 2.0).abs() < 1e-9);
        let after = ed.viewport().to_venue(Point::new(210.0, 210.0));
        assert!((after.x - under.x).abs() < 1e-9 && (after.y - under.y).abs() < 1e-9);
    }

    #[test]
    fn test_second_finger_commits_table_drag() {
        let mut ed = editor_with(&[(1, 0.0, 0.0)]);
        press(&mut ed, Point::new(5.0, 5.0));
        ed.handle(PointerEvent::moved(Point::new(45.0, 5.0)));
        ed.handle(PointerEvent::pinch(
            PointerPhase::Down,
            Point::new(45.0, 5.0),
            Point::new(145.0, 5.0),
        ));
        assert_eq!(ed.gesture().kind(), GestureKind::Pinching);
        assert_eq!(ed.plan().table(1).unwrap().x, 4.0);
        assert!(matches!(ed.take_commits().as_slice(), [Commit::Tables(_)]));
    }

    #[test]
    fn test_vertex_drag_snaps_and_commits() {
        let mut ed = editor_with(&[]);
        ed.set_mode(EditMode::Boundary);
        ed.take_commits();
        // Vertex 1 is (100, 0) ft = (1000, 0) px.
        let at = Point::new(1000.0, 0.0);
        press(&mut ed, at);
        assert_eq!(ed.gesture().kind(), GestureKind::DraggingVertex);
        ed.handle(PointerEvent::moved(Point::new(1003.0, 123.0)));
        assert_eq!(ed.plan().venue.boundary[1], Point::new(100.0, 12.0));
        assert_eq!(ed.snap_guides().len(), 1);

        ed.handle(PointerEvent::up(Point::new(1003.0, 123.0)));
        assert!(ed.snap_guides().is_empty());
        assert!(matches!(ed.take_commits().first(), Some(Commit::Venue(_))));
    }

    #[test]
    fn test_edge_handle_inserts_and_drags() {
        let mut ed = editor_with(&[]);
        ed.set_mode(EditMode::Boundary);
        // Midpoint of the top edge is (50, 0) ft.
        let at = Point::new(500.0, 0.0);
        press(&mut ed, at);
        assert_eq!(ed.plan().venue.boundary.len(), 5);
        ed.handle(PointerEvent::moved(Point::new(500.0, -50.0)));
        ed.handle(PointerEvent::up(Point::new(500.0, -50.0)));
        assert_eq!(ed.plan().venue.boundary[1], Point::new(50.0, -5.0));
    }

    #[test]
    fn test_zone_mode_click_assigns_zone() {
        let mut ed = editor_with(&[(1, 0.0, 0.0)]);
        let zone = ed.add_zone("VIP", "#f59e0b", 50.0).unwrap();
        ed.set_mode(EditMode::Zones);
        let at = Point::new(5.0, 5.0);
        press(&mut ed, at);
        ed.handle(PointerEvent::up(at));
        assert_eq!(ed.plan().table(1).unwrap().zone_id, Some(zone));
        assert_eq!(ed.plan().table(1).unwrap().position(), Point::ORIGIN);
    }

    #[test]
    fn test_wheel_zooms_around_cursor() {
        let mut ed = editor_with(&[]);
        let cursor = Point::new(300.0, 200.0);
        let under = ed.viewport().to_venue(cursor);
        ed.handle(InputEvent::Wheel {
            position: cursor,
            delta_y: -120.0,
        });
        assert!((ed.viewport().scale - 1.1).abs() < 1e-9);
        let after = ed.viewport().to_venue(cursor);
        assert!((after.x - under.x).abs() < 1e-9);
    }

    #[test]
    fn test_panel_hidden_during_gesture() {
        let mut ed = editor_with(&[(1, 0.0, 0.0)]);
        ed.select_table(1).unwrap();
        press(&mut ed, Point::new(5.0, 5.0));
        assert_eq!(ed.panel(), None);
        ed.handle(PointerEvent::up(Point::new(5.0, 5.0)));
        assert_eq!(ed.panel(), Some(Panel::Table));
    }

    #[test]
    fn test_release_clears_snap_guides() {
        let mut ed = editor_with(&[]);
        ed.snap_guides.push(SnapGuide {
            axis: Axis::X,
            from: Point::ORIGIN,
            to: Point::ORIGIN,
        });
        ed.handle(PointerEvent::down(Point::new(900.0, 900.0)));
        ed.handle(PointerEvent::up(Point::new(900.0, 900.0)));
        assert!(ed.snap_guides().is_empty());
    }
}
