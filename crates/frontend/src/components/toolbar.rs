use dioxus::prelude::*;
use floorplan_shared::grid;
use floorplan_shared::{EditMode, FloorPlanEditor};

use crate::api;
use crate::components::{edit, input_error_text};

const MODES: [(EditMode, &str); 3] = [
    (EditMode::Tables, "Tables"),
    (EditMode::Boundary, "Boundary"),
    (EditMode::Zones, "Zones"),
];

#[component]
pub fn Toolbar(editor: Signal<FloorPlanEditor>, show_help: Signal<bool>) -> Element {
    let ed = editor.read();
    let mode = ed.mode();
    let name = ed.plan().name.clone();
    let event_id = ed.plan().event_id.clone();
    let dimensions = grid::format_dimensions(ed.plan().venue.width, ed.plan().venue.height);
    let zoom_pct = (ed.viewport().scale * 100.0).round();
    let zones: Vec<(u64, String, String)> = ed
        .plan()
        .zones
        .iter()
        .map(|z| (z.id, z.name.clone(), z.color.clone()))
        .collect();
    let active_zone = ed.active_zone();
    let table_count = ed.plan().tables.len();
    drop(ed);

    let mut copied = use_signal(|| false);
    let mut zone_error = use_signal(|| None::<String>);

    rsx! {
        div { class: "toolbar",
            div { class: "toolbar-title",
                h1 { "{name}" }
                span { class: "dimensions", "{dimensions} \u{00b7} {table_count} tables" }
            }

            div { class: "mode-switch",
                for (m, label) in MODES {
                    button {
                        class: if mode == m { "active" } else { "" },
                        onclick: move |_| {
                            editor.write().set_mode(m);
                        },
                        "{label}"
                    }
                }
            }

            div { class: "zoom-controls",
                button { title: "Zoom out", onclick: move |_| { editor.write().zoom_out(); }, "\u{2212}" }
                span { class: "zoom-readout", "{zoom_pct}%" }
                button { title: "Zoom in", onclick: move |_| { editor.write().zoom_in(); }, "+" }
                button { onclick: move |_| { editor.write().fit_to_room(); }, "Fit room" }
                button { onclick: move |_| { editor.write().fit_to_tables(); }, "Fit tables" }
            }

            div { class: "actions",
                if mode == EditMode::Tables {
                    button {
                        class: "primary",
                        onclick: move |_| {
                            edit(editor, |ed| ed.add_table());
                        },
                        "Add table"
                    }
                }
                button {
                    onclick: move |_| editor.write().open_venue_panel(),
                    "Venue"
                }
                button {
                    class: "secondary",
                    onclick: move |_| {
                        let Some(origin) = api::origin() else { return };
                        let url = api::build_event_url(&origin, &event_id);
                        wasm_bindgen_futures::spawn_local(async move {
                            if let Some(window) = web_sys::window() {
                                let clipboard = window.navigator().clipboard();
                                if wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&url))
                                    .await
                                    .is_ok()
                                {
                                    copied.set(true);
                                }
                            }
                        });
                    },
                    if *copied.read() { "Link copied" } else { "Copy link" }
                }
                button {
                    class: "secondary",
                    title: "Help (H)",
                    onclick: move |_| {
                        let shown = *show_help.read();
                        show_help.set(!shown);
                    },
                    "?"
                }
            }

            if mode == EditMode::Zones {
                div { class: "zone-palette",
                    if zones.is_empty() {
                        span { class: "hint", "Add zones in the venue settings to paint tables." }
                    }
                    for (id, zone_name, color) in zones {
                        button {
                            key: "{id}",
                            class: if active_zone == Some(id) { "zone-chip active" } else { "zone-chip" },
                            style: "border-color: {color};",
                            onclick: move |_| {
                                let result = editor.write().set_active_zone(Some(id));
                                zone_error.set(input_error_text(result));
                            },
                            span { class: "swatch", style: "background: {color};" }
                            "{zone_name}"
                        }
                    }
                    if let Some(message) = &*zone_error.read() {
                        span { class: "field-error", "{message}" }
                    }
                }
            }
        }
    }
}
