pub mod floor_plan_view;
pub mod help_overlay;
pub mod table_panel;
pub mod toolbar;
pub mod venue_panel;

use dioxus::prelude::*;
use floorplan_shared::{FloorPlanEditor, InputError};

use crate::api;

/// Run `f` against the editor, then ship whatever it queued to the backend.
/// Persistence is never awaited here.
pub fn edit<R>(mut editor: Signal<FloorPlanEditor>, f: impl FnOnce(&mut FloorPlanEditor) -> R) -> R {
    let (result, event_id, commits) = {
        let mut ed = editor.write();
        let result = f(&mut ed);
        let commits = ed.take_commits();
        (result, ed.plan().event_id.clone(), commits)
    };
    api::send_commits(&event_id, commits);
    result
}

/// Message for a panel's error line, or `None` when the edit went through.
pub fn input_error_text<T>(result: Result<T, InputError>) -> Option<String> {
    result.err().map(|e| e.to_string())
}
