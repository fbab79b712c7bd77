use dioxus::logger::tracing;
use dioxus::prelude::*;
use floorplan_shared::FloorPlanEditor;
use gloo_timers::future::TimeoutFuture;

use crate::api;
use crate::components::floor_plan_view::FloorPlanView;
use crate::components::help_overlay::HelpOverlay;
use crate::components::table_panel::TablePanel;
use crate::components::toolbar::Toolbar;
use crate::components::venue_panel::VenuePanel;
use crate::coords;

/// How often the canvas size is re-measured.
const RESIZE_POLL_MS: u32 = 250;

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready,
    NotFound,
    Failed(String),
}

#[component]
pub fn FloorPlanPage(event_id: String) -> Element {
    let mut editor = use_signal(FloorPlanEditor::default);
    let mut state = use_signal(|| LoadState::Loading);
    let show_help = use_signal(|| false);

    let _loader = use_resource(move || {
        let event_id = event_id.clone();
        async move {
            match api::fetch_floor_plan(&event_id).await {
                Ok(Some(plan)) => {
                    let mut ed = editor.write();
                    ed.load(plan);
                    if let Some(size) = coords::canvas_size() {
                        ed.resize(size);
                    }
                    state.set(LoadState::Ready);
                }
                Ok(None) => state.set(LoadState::NotFound),
                Err(e) => {
                    tracing::error!(event_id = %event_id, error = %e, "failed to load floor plan");
                    state.set(LoadState::Failed(e));
                }
            }
        }
    });

    // Keep the editor's container size in step with the canvas element.
    use_future(move || async move {
        loop {
            if let Some(size) = coords::canvas_size() {
                if size.is_usable() && editor.peek().container() != size {
                    editor.write().resize(size);
                }
            }
            TimeoutFuture::new(RESIZE_POLL_MS).await;
        }
    });

    let current = state.read().clone();
    match current {
        LoadState::Loading => rsx! {
            div { class: "status-page", "Loading floor plan\u{2026}" }
        },
        LoadState::NotFound => rsx! {
            div { class: "status-page",
                h2 { "Event not found" }
                Link { to: crate::Route::Home {}, "Back to start" }
            }
        },
        LoadState::Failed(message) => rsx! {
            div { class: "status-page",
                h2 { "Could not load the floor plan" }
                p { "{message}" }
            }
        },
        LoadState::Ready => rsx! {
            div { class: "app",
                Toolbar { editor, show_help }
                div { class: "workspace",
                    FloorPlanView { editor, show_help }
                    TablePanel { editor }
                    VenuePanel { editor }
                }
                HelpOverlay { show: show_help }
            }
        },
    }
}
