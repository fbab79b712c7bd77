//! The editor state value.
//!
//! [`FloorPlanEditor`] owns the floor plan for one open event together with
//! the viewport, selection, edit mode and the active gesture. Every input
//! event and command reads the current values straight from `self`, so a
//! burst of events between two renders never works from a stale transform.
//! Input handling lives in [`crate::gesture`].

use crate::boundary::{self, EdgeLength, SnapGuide};
use crate::config::EditorConfig;
use crate::error::InputError;
use crate::gesture::GestureState;
use crate::grid::snap_to_foot;
use crate::hit_test::{self, HitTarget};
use crate::labeling::apply_labels;
use crate::models::{
    parse_dimension, FloorPlan, Point, Rect, Size, Table, TableId, TableStatus, Venue, Zone, ZoneId,
};
use crate::selection::{common_value, FieldValue, Selection};
use crate::store::Commit;
use crate::viewport::Viewport;

/// Which layer of the plan pointer input edits. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Tables,
    Boundary,
    Zones,
}

/// Side panel the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Edit view for the current selection.
    Table,
    Venue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

#[derive(Debug, Clone)]
pub struct FloorPlanEditor {
    pub(crate) plan: FloorPlan,
    pub(crate) viewport: Viewport,
    pub(crate) container: Size,
    pub(crate) selection: Selection,
    pub(crate) mode: EditMode,
    pub(crate) panel: Option<Panel>,
    pub(crate) gesture: GestureState,
    pub(crate) snap_guides: Vec<SnapGuide>,
    pub(crate) active_zone: Option<ZoneId>,
    pub(crate) config: EditorConfig,
    pub(crate) pending: Vec<Commit>,
}

impl Default for FloorPlanEditor {
    fn default() -> Self {
        FloorPlanEditor::new(FloorPlan::default(), EditorConfig::default())
    }
}

impl FloorPlanEditor {
    pub fn new(plan: FloorPlan, config: EditorConfig) -> Self {
        FloorPlanEditor {
            plan,
            viewport: Viewport::default(),
            container: Size::default(),
            selection: Selection::new(),
            mode: EditMode::Tables,
            panel: None,
            gesture: GestureState::Idle,
            snap_guides: Vec::new(),
            active_zone: None,
            config,
            pending: Vec::new(),
        }
    }

    /// Open a different plan. Transient state is dropped and the view is
    /// refitted to the room.
    pub fn load(&mut self, plan: FloorPlan) {
        tracing::debug!(event_id = %plan.event_id, tables = plan.tables.len(), "loading floor plan");
        self.plan = plan;
        self.selection.clear();
        self.mode = EditMode::Tables;
        self.panel = None;
        self.gesture = GestureState::Idle;
        self.snap_guides.clear();
        self.active_zone = None;
        self.pending.clear();
        self.fit_to_room();
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn snap_guides(&self) -> &[SnapGuide] {
        &self.snap_guides
    }

    pub fn active_zone(&self) -> Option<ZoneId> {
        self.active_zone
    }

    /// The marquee rectangle in screen pixels while box-selecting.
    pub fn marquee(&self) -> Option<Rect> {
        self.gesture.marquee()
    }

    pub fn is_interacting(&self) -> bool {
        !matches!(self.gesture, GestureState::Idle)
    }

    /// The open panel. Hidden while a gesture is in progress.
    pub fn panel(&self) -> Option<Panel> {
        if self.is_interacting() {
            None
        } else {
            self.panel
        }
    }

    pub fn hit_test(&self, screen: Point) -> HitTarget {
        hit_test::hit_test(
            &self.plan,
            &self.viewport,
            self.mode,
            screen,
            self.config.handle_radius_px,
        )
    }

    pub fn outline(&self) -> Vec<Point> {
        self.plan.venue.outline()
    }

    pub fn edge_lengths(&self) -> Vec<EdgeLength> {
        boundary::edge_lengths(&self.outline())
    }

    pub fn selected_tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.selection.iter().filter_map(|id| self.plan.table(id))
    }

    /// Drain the sub-object replacements queued since the last call.
    pub fn take_commits(&mut self) -> Vec<Commit> {
        std::mem::take(&mut self.pending)
    }

    // Viewport

    /// Record the canvas size and refit the room into it.
    pub fn resize(&mut self, container: Size) {
        if self.container == container {
            return;
        }
        self.container = container;
        self.fit_to_room();
    }

    pub fn fit_to_room(&mut self) -> bool {
        self.viewport.fit(
            self.container,
            self.plan.venue.bounds(),
            self.config.fit_margin_px,
            None,
        )
    }

    /// Fit the tables' bounding box, falling back to the room when empty.
    pub fn fit_to_tables(&mut self) -> bool {
        match self.plan.tables_bounds() {
            Some(bounds) => self.viewport.fit(
                self.container,
                bounds,
                self.config.fit_margin_px,
                Some(self.config.tables_fit_cap),
            ),
            None => self.fit_to_room(),
        }
    }

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in(self.container.center())
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out(self.container.center())
    }

    pub fn wheel(&mut self, position: Point, delta_y: f64) -> bool {
        self.viewport
            .zoom_by_wheel(delta_y, position, self.config.wheel_sensitivity)
    }

    // Modes and panels

    pub fn set_mode(&mut self, mode: EditMode) {
        if self.mode == mode {
            return;
        }
        self.gesture = GestureState::Idle;
        self.snap_guides.clear();
        if self.mode == EditMode::Tables {
            self.selection.clear();
            if self.panel == Some(Panel::Table) {
                self.panel = None;
            }
        }
        match mode {
            EditMode::Boundary => self.ensure_boundary(),
            EditMode::Zones => {
                if self.active_zone.is_none() {
                    self.active_zone = self.plan.zones.first().map(|z| z.id);
                }
            }
            EditMode::Tables => {}
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "edit mode changed");
        self.mode = mode;
    }

    pub fn open_venue_panel(&mut self) {
        self.panel = Some(Panel::Venue);
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    /// Escape: drop the selection and any open panel.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.panel = None;
    }

    pub fn select_table(&mut self, id: TableId) -> Result<(), InputError> {
        if self.plan.table(id).is_none() {
            return Err(InputError::UnknownTable(id));
        }
        self.selection.select_only(id);
        self.panel = Some(Panel::Table);
        Ok(())
    }

    // Tables

    /// Add a default table centered on the view, kept inside the room and on
    /// the foot grid. The new table becomes the selection.
    pub fn add_table(&mut self) -> TableId {
        let bounds = self.plan.venue.bounds();
        let center = if self.container.is_usable() {
            self.viewport.to_venue(self.container.center())
        } else {
            bounds.center()
        };
        let id = self.plan.next_table_id();
        let mut table = Table::new(id, Point::ORIGIN);
        let x = (center.x - table.width / 2.0)
            .min(bounds.max.x - table.width)
            .max(bounds.min.x);
        let y = (center.y - table.height / 2.0)
            .min(bounds.max.y - table.height)
            .max(bounds.min.y);
        table.set_position(Point::new(snap_to_foot(x), snap_to_foot(y)));

        tracing::debug!(id, x = table.x, y = table.y, "table added");
        self.plan.tables.push(table);
        self.selection.select_only(id);
        self.panel = Some(Panel::Table);
        self.relabel_and_commit_tables();
        id
    }

    /// Delete every selected table. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids();
        let removed = self.plan.remove_tables(&ids);
        self.selection.clear();
        if self.panel == Some(Panel::Table) {
            self.panel = None;
        }
        if removed > 0 {
            tracing::debug!(removed, "tables deleted");
            self.relabel_and_commit_tables();
        }
        removed
    }

    fn for_each_selected(&mut self, mut f: impl FnMut(&mut Table)) -> Result<usize, InputError> {
        if self.selection.is_empty() {
            return Err(InputError::EmptySelection);
        }
        let mut count = 0;
        for table in self
            .plan
            .tables
            .iter_mut()
            .filter(|t| self.selection.contains(t.id))
        {
            f(table);
            count += 1;
        }
        Ok(count)
    }

    pub fn rotate_selected(&mut self) -> Result<usize, InputError> {
        let count = self.for_each_selected(Table::rotate)?;
        self.relabel_and_commit_tables();
        Ok(count)
    }

    pub fn set_selected_status(&mut self, status: TableStatus) -> Result<usize, InputError> {
        let count = self.for_each_selected(|t| t.status = status)?;
        self.commit_tables();
        Ok(count)
    }

    pub fn set_selected_vendor(&mut self, vendor_id: Option<String>) -> Result<usize, InputError> {
        let vendor_id = vendor_id.filter(|v| !v.trim().is_empty());
        let count = self.for_each_selected(|t| t.vendor_id = vendor_id.clone())?;
        self.commit_tables();
        Ok(count)
    }

    pub fn assign_selected_zone(&mut self, zone: Option<ZoneId>) -> Result<usize, InputError> {
        if let Some(id) = zone {
            if self.plan.zone(id).is_none() {
                return Err(InputError::UnknownZone(id));
            }
        }
        let count = self.for_each_selected(|t| t.zone_id = zone)?;
        self.commit_tables();
        Ok(count)
    }

    pub fn selected_dimension(&self, dim: Dimension) -> FieldValue<f64> {
        common_value(self.selected_tables().map(|t| match dim {
            Dimension::Width => t.width,
            Dimension::Height => t.height,
        }))
    }

    pub fn selected_status(&self) -> FieldValue<TableStatus> {
        common_value(self.selected_tables().map(|t| t.status))
    }

    pub fn selected_zone(&self) -> FieldValue<Option<ZoneId>> {
        common_value(self.selected_tables().map(|t| t.zone_id))
    }

    /// Apply an operator-entered width or height to every selected table.
    /// Invalid text leaves every table as it was.
    pub fn set_selected_dimension(&mut self, dim: Dimension, raw: &str) -> Result<f64, InputError> {
        let value = parse_dimension(raw).inspect_err(|err| {
            tracing::warn!(?dim, input = raw, %err, "rejected table dimension");
        })?;
        self.for_each_selected(|t| match dim {
            Dimension::Width => t.width = value,
            Dimension::Height => t.height = value,
        })?;
        self.relabel_and_commit_tables();
        Ok(value)
    }

    // Venue

    pub fn set_venue_dimension(&mut self, dim: Dimension, raw: &str) -> Result<f64, InputError> {
        let value = parse_dimension(raw).inspect_err(|err| {
            tracing::warn!(?dim, input = raw, %err, "rejected venue dimension");
        })?;
        match dim {
            Dimension::Width => self.plan.venue.width = value,
            Dimension::Height => self.plan.venue.height = value,
        }
        self.commit_venue();
        Ok(value)
    }

    fn ensure_boundary(&mut self) {
        if !self.plan.venue.has_boundary() {
            self.plan.venue.boundary = Venue::rectangle(self.plan.venue.width, self.plan.venue.height);
        }
    }

    /// Split edge `edge` at its midpoint. Returns the new vertex index.
    pub fn insert_vertex(&mut self, edge: usize) -> Option<usize> {
        self.ensure_boundary();
        let index = boundary::insert_vertex(&mut self.plan.venue.boundary, edge)?;
        self.commit_venue();
        Some(index)
    }

    /// Remove a boundary vertex. Silently refused at three vertices.
    pub fn delete_vertex(&mut self, index: usize) -> bool {
        self.ensure_boundary();
        if !boundary::delete_vertex(&mut self.plan.venue.boundary, index) {
            tracing::debug!(index, "vertex delete refused");
            return false;
        }
        self.commit_venue();
        true
    }

    /// Replace the boundary with the nominal width x height rectangle.
    pub fn reset_boundary(&mut self) {
        self.plan.venue.boundary = Venue::rectangle(self.plan.venue.width, self.plan.venue.height);
        self.commit_venue();
    }

    // Zones

    pub fn add_zone(&mut self, name: &str, color: &str, price: f64) -> Result<ZoneId, InputError> {
        let price = validate_price(price)?;
        let id = self.plan.next_zone_id();
        self.plan.zones.push(Zone {
            id,
            name: name.trim().to_string(),
            color: color.to_string(),
            price,
        });
        if self.active_zone.is_none() {
            self.active_zone = Some(id);
        }
        self.commit_zones();
        Ok(id)
    }

    pub fn update_zone(
        &mut self,
        id: ZoneId,
        name: &str,
        color: &str,
        price: f64,
    ) -> Result<(), InputError> {
        let price = validate_price(price)?;
        let zone = self.plan.zone_mut(id).ok_or(InputError::UnknownZone(id))?;
        zone.name = name.trim().to_string();
        zone.color = color.to_string();
        zone.price = price;
        self.commit_zones();
        Ok(())
    }

    /// Delete a zone; tables that referenced it keep existing with no zone.
    pub fn delete_zone(&mut self, id: ZoneId) -> Option<usize> {
        let cleared = self.plan.delete_zone(id)?;
        if self.active_zone == Some(id) {
            self.active_zone = self.plan.zones.first().map(|z| z.id);
        }
        tracing::debug!(zone = id, cleared, "zone deleted");
        self.commit_zones();
        if cleared > 0 {
            self.commit_tables();
        }
        Some(cleared)
    }

    pub fn set_active_zone(&mut self, zone: Option<ZoneId>) -> Result<(), InputError> {
        if let Some(id) = zone {
            if self.plan.zone(id).is_none() {
                return Err(InputError::UnknownZone(id));
            }
        }
        self.active_zone = zone;
        Ok(())
    }

    /// Zone-mode click: assign the active zone, or clear it if the table
    /// already has it.
    pub(crate) fn toggle_active_zone_on(&mut self, id: TableId) {
        let Some(zone) = self.active_zone else {
            tracing::debug!(table = id, "zone click ignored, no active zone");
            return;
        };
        let Some(table) = self.plan.table_mut(id) else {
            return;
        };
        table.zone_id = if table.zone_id == Some(zone) {
            None
        } else {
            Some(zone)
        };
        self.commit_tables();
    }

    // Labels and commits

    /// Re-derive every label. Returns whether any label changed.
    pub fn relabel(&mut self) -> bool {
        apply_labels(&mut self.plan, &self.config.labeling)
    }

    pub(crate) fn relabel_and_commit_tables(&mut self) {
        self.relabel();
        self.commit_tables();
    }

    pub(crate) fn commit_tables(&mut self) {
        self.pending.push(Commit::Tables(self.plan.tables.clone()));
    }

    /// Queue the venue and, since wall distances may have changed, the
    /// tables when their labels moved.
    pub(crate) fn commit_venue(&mut self) {
        self.pending.push(Commit::Venue(self.plan.venue.clone()));
        if self.relabel() {
            self.commit_tables();
        }
    }

    fn commit_zones(&mut self) {
        self.pending.push(Commit::Zones(self.plan.zones.clone()));
    }
}

fn validate_price(price: f64) -> Result<f64, InputError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(InputError::InvalidPrice(price))
    }
}
