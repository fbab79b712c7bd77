use dioxus::prelude::*;
use floorplan_shared::editor::Dimension;
use floorplan_shared::models::TableStatus;
use floorplan_shared::selection::FieldValue;
use floorplan_shared::{FloorPlanEditor, InputError, Panel};

use crate::components::{edit, input_error_text};

/// Text shown in a numeric field: the shared value, or empty when the
/// selection disagrees.
pub fn dimension_text(value: &FieldValue<f64>) -> String {
    match value {
        FieldValue::Uniform(v) => floorplan_shared::grid::format_feet(*v)
            .trim_end_matches("ft")
            .to_string(),
        FieldValue::Mixed | FieldValue::Empty => String::new(),
    }
}

pub fn dimension_placeholder(value: &FieldValue<f64>) -> &'static str {
    if value.is_mixed() {
        "Mixed"
    } else {
        ""
    }
}

#[component]
pub fn TablePanel(editor: Signal<FloorPlanEditor>) -> Element {
    let mut error = use_signal(|| None::<String>);

    let ed = editor.read();
    if ed.panel() != Some(Panel::Table) || ed.selection().is_empty() {
        return rsx! {};
    }

    let heading = match ed.selection().single().and_then(|id| ed.plan().table(id)) {
        Some(table) => format!("Table {}", table.label),
        None => format!("{} tables", ed.selection().len()),
    };
    let width = ed.selected_dimension(Dimension::Width);
    let height = ed.selected_dimension(Dimension::Height);
    let status = ed.selected_status().uniform();
    let zone = ed.selected_zone();
    let vendor = common_vendor(&ed);
    let zones: Vec<(u64, String)> = ed
        .plan()
        .zones
        .iter()
        .map(|z| (z.id, z.name.clone()))
        .collect();
    drop(ed);

    let zone_value = match zone {
        FieldValue::Uniform(Some(id)) => id.to_string(),
        FieldValue::Uniform(None) => "none".to_string(),
        FieldValue::Mixed | FieldValue::Empty => String::new(),
    };
    let status_value = status.map(|s| s.as_str()).unwrap_or("");
    let width_text = dimension_text(&width);
    let height_text = dimension_text(&height);
    let vendor_text = vendor.clone().unwrap_or_default();

    let mut set_dimension = move |dim: Dimension, raw: String| {
        match edit(editor, |ed| ed.set_selected_dimension(dim, &raw)) {
            Ok(_) => error.set(None),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let mut report = move |result: Result<usize, InputError>| error.set(input_error_text(result));

    rsx! {
        div { class: "panel side-panel",
            div { class: "panel-header",
                h3 { "{heading}" }
                button {
                    class: "close",
                    onclick: move |_| editor.write().close_panel(),
                    "\u{00d7}"
                }
            }

            div { class: "field-row",
                label { "Width (ft)" }
                input {
                    r#type: "text",
                    inputmode: "decimal",
                    value: "{width_text}",
                    placeholder: dimension_placeholder(&width),
                    onchange: move |evt: Event<FormData>| set_dimension(Dimension::Width, evt.value()),
                }
            }
            div { class: "field-row",
                label { "Height (ft)" }
                input {
                    r#type: "text",
                    inputmode: "decimal",
                    value: "{height_text}",
                    placeholder: dimension_placeholder(&height),
                    onchange: move |evt: Event<FormData>| set_dimension(Dimension::Height, evt.value()),
                }
            }
            if let Some(message) = &*error.read() {
                div { class: "field-error", "{message}" }
            }

            div { class: "field-row",
                label { "Status" }
                select {
                    value: "{status_value}",
                    onchange: move |evt: Event<FormData>| {
                        match evt.value().parse::<TableStatus>() {
                            Ok(status) => report(edit(editor, |ed| ed.set_selected_status(status))),
                            Err(e) => error.set(Some(e)),
                        }
                    },
                    if status.is_none() {
                        option { value: "", disabled: true, selected: true, "Mixed" }
                    }
                    for s in TableStatus::ALL {
                        option {
                            value: s.as_str(),
                            selected: status == Some(s),
                            "{s}"
                        }
                    }
                }
            }

            div { class: "field-row",
                label { "Vendor" }
                input {
                    r#type: "text",
                    value: "{vendor_text}",
                    placeholder: if vendor.is_none() { "Unassigned" } else { "" },
                    onchange: move |evt: Event<FormData>| {
                        let value = evt.value();
                        let vendor_id = (!value.trim().is_empty()).then(|| value.trim().to_string());
                        report(edit(editor, |ed| ed.set_selected_vendor(vendor_id)));
                    },
                }
            }

            div { class: "field-row",
                label { "Zone" }
                select {
                    value: "{zone_value}",
                    onchange: move |evt: Event<FormData>| {
                        let value = evt.value();
                        let zone = if value == "none" {
                            None
                        } else {
                            match value.parse::<u64>() {
                                Ok(id) => Some(id),
                                Err(_) => return,
                            }
                        };
                        report(edit(editor, |ed| ed.assign_selected_zone(zone)));
                    },
                    if zone.is_mixed() {
                        option { value: "", disabled: true, selected: true, "Mixed" }
                    }
                    option { value: "none", selected: zone_value == "none", "No zone" }
                    for (id, name) in zones {
                        option {
                            key: "{id}",
                            value: "{id}",
                            selected: zone_value == id.to_string(),
                            "{name}"
                        }
                    }
                }
            }

            div { class: "panel-actions",
                button {
                    onclick: move |_| {
                        report(edit(editor, |ed| ed.rotate_selected()));
                    },
                    "Rotate"
                }
                button {
                    class: "danger",
                    onclick: move |_| {
                        edit(editor, |ed| ed.delete_selected());
                    },
                    "Delete"
                }
            }
        }
    }
}

/// The vendor shared by every selected table, if they agree on one.
fn common_vendor(editor: &FloorPlanEditor) -> Option<String> {
    floorplan_shared::selection::common_value(editor.selected_tables().map(|t| t.vendor_id.clone()))
        .uniform()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_text_uniform() {
        assert_eq!(dimension_text(&FieldValue::Uniform(8.0)), "8");
        assert_eq!(dimension_text(&FieldValue::Uniform(2.5)), "2.5");
    }

    #[test]
    fn test_mixed_dimension_is_blank_with_placeholder() {
        let mixed: FieldValue<f64> = FieldValue::Mixed;
        assert_eq!(dimension_text(&mixed), "");
        assert_eq!(dimension_placeholder(&mixed), "Mixed");
        assert_eq!(dimension_placeholder(&FieldValue::Uniform(3.0)), "");
    }
}
