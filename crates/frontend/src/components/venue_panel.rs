use dioxus::prelude::*;
use floorplan_shared::editor::Dimension;
use floorplan_shared::grid::format_feet;
use floorplan_shared::models::Zone;
use floorplan_shared::{FloorPlanEditor, Panel};

use crate::components::edit;

const NEW_ZONE_COLOR: &str = "#8b5cf6";

/// Parse an operator-entered zone price. Blank means free.
pub fn parse_price(raw: &str) -> Result<f64, String> {
    let raw = raw.trim().trim_start_matches('$');
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| format!("\"{raw}\" is not a price"))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ZoneField {
    Name,
    Color,
    Price,
}

fn update_zone_field(
    editor: Signal<FloorPlanEditor>,
    zone: &Zone,
    field: ZoneField,
    raw: &str,
) -> Result<(), String> {
    let (mut name, mut color, mut price) = (zone.name.clone(), zone.color.clone(), zone.price);
    match field {
        ZoneField::Name => name = raw.to_string(),
        ZoneField::Color => color = raw.to_string(),
        ZoneField::Price => price = parse_price(raw)?,
    }
    edit(editor, |ed| ed.update_zone(zone.id, &name, &color, price)).map_err(|e| e.to_string())
}

#[component]
pub fn VenuePanel(editor: Signal<FloorPlanEditor>) -> Element {
    let mut error = use_signal(|| None::<String>);
    let mut new_zone_name = use_signal(String::new);
    let mut new_zone_price = use_signal(String::new);

    let ed = editor.read();
    if ed.panel() != Some(Panel::Venue) {
        return rsx! {};
    }
    let venue = &ed.plan().venue;
    let width_text = format_feet(venue.width).trim_end_matches("ft").to_string();
    let height_text = format_feet(venue.height).trim_end_matches("ft").to_string();
    let vertex_count = venue.outline().len();
    let custom_boundary = venue.has_boundary();
    let zones = ed.plan().zones.clone();
    drop(ed);

    let mut set_dimension = move |dim: Dimension, raw: String| {
        match edit(editor, |ed| ed.set_venue_dimension(dim, &raw)) {
            Ok(_) => error.set(None),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let mut report = move |result: Result<(), String>| error.set(result.err());

    rsx! {
        div { class: "panel side-panel",
            div { class: "panel-header",
                h3 { "Venue" }
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
                    onchange: move |evt: Event<FormData>| set_dimension(Dimension::Width, evt.value()),
                }
            }
            div { class: "field-row",
                label { "Height (ft)" }
                input {
                    r#type: "text",
                    inputmode: "decimal",
                    value: "{height_text}",
                    onchange: move |evt: Event<FormData>| set_dimension(Dimension::Height, evt.value()),
                }
            }

            div { class: "field-row",
                span { class: "hint",
                    if custom_boundary {
                        "Custom boundary with {vertex_count} corners"
                    } else {
                        "Rectangular room"
                    }
                }
                button {
                    class: "secondary",
                    onclick: move |_| edit(editor, |ed| ed.reset_boundary()),
                    "Reset boundary"
                }
            }

            if let Some(message) = &*error.read() {
                div { class: "field-error", "{message}" }
            }

            h3 { "Zones" }
            for zone in zones {
                div { class: "zone-row", key: "{zone.id}",
                    input {
                        r#type: "color",
                        value: "{zone.color}",
                        onchange: {
                            let zone = zone.clone();
                            move |evt: Event<FormData>| {
                                report(update_zone_field(editor, &zone, ZoneField::Color, &evt.value()));
                            }
                        },
                    }
                    input {
                        r#type: "text",
                        class: "zone-name",
                        value: "{zone.name}",
                        onchange: {
                            let zone = zone.clone();
                            move |evt: Event<FormData>| {
                                report(update_zone_field(editor, &zone, ZoneField::Name, &evt.value()));
                            }
                        },
                    }
                    input {
                        r#type: "text",
                        class: "zone-price",
                        inputmode: "decimal",
                        value: "{zone.price}",
                        onchange: {
                            let zone = zone.clone();
                            move |evt: Event<FormData>| {
                                report(update_zone_field(editor, &zone, ZoneField::Price, &evt.value()));
                            }
                        },
                    }
                    button {
                        class: "danger",
                        title: "Delete zone",
                        onclick: move |_| {
                            edit(editor, |ed| ed.delete_zone(zone.id));
                        },
                        "\u{00d7}"
                    }
                }
            }

            div { class: "zone-row new-zone",
                input {
                    r#type: "text",
                    placeholder: "New zone name",
                    value: "{new_zone_name}",
                    oninput: move |evt: Event<FormData>| new_zone_name.set(evt.value()),
                }
                input {
                    r#type: "text",
                    class: "zone-price",
                    placeholder: "Price",
                    value: "{new_zone_price}",
                    oninput: move |evt: Event<FormData>| new_zone_price.set(evt.value()),
                }
                button {
                    onclick: move |_| {
                        let name = new_zone_name.read().trim().to_string();
                        if name.is_empty() {
                            return;
                        }
                        let result = parse_price(&new_zone_price.read()).and_then(|price| {
                            edit(editor, |ed| ed.add_zone(&name, NEW_ZONE_COLOR, price))
                                .map_err(|e| e.to_string())
                        });
                        match result {
                            Ok(_) => {
                                new_zone_name.set(String::new());
                                new_zone_price.set(String::new());
                                error.set(None);
                            }
                            Err(e) => error.set(Some(e)),
                        }
                    },
                    "Add zone"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("25"), Ok(25.0));
        assert_eq!(parse_price(" $12.50 "), Ok(12.5));
        assert_eq!(parse_price(""), Ok(0.0));
        assert!(parse_price("free").is_err());
    }
}
