use dioxus::prelude::*;
use floorplan_shared::models::{parse_dimension, DEFAULT_VENUE_HEIGHT_FT, DEFAULT_VENUE_WIDTH_FT};

use crate::api;
use crate::Route;

/// Pull an event id out of a pasted link or bare id.
pub fn event_id_from_input(raw: &str) -> Option<String> {
    let raw = raw.trim().trim_end_matches('/');
    let id = raw.rsplit('/').next()?;
    (!id.is_empty()).then(|| id.to_string())
}

#[component]
pub fn Home() -> Element {
    let mut name = use_signal(|| "New Event".to_string());
    let mut width = use_signal(|| DEFAULT_VENUE_WIDTH_FT.to_string());
    let mut height = use_signal(|| DEFAULT_VENUE_HEIGHT_FT.to_string());
    let mut open_id = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut creating = use_signal(|| false);

    let on_create = move |_: Event<MouseData>| {
        let dims = parse_dimension(&width.read()).and_then(|w| Ok((w, parse_dimension(&height.read())?)));
        let (w, h) = match dims {
            Ok(dims) => dims,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let event_name = name.read().trim().to_string();
        creating.set(true);
        spawn(async move {
            match api::create_event(&event_name, w, h).await {
                Ok(plan) => {
                    navigator().push(Route::EventView { id: plan.event_id });
                }
                Err(e) => {
                    error.set(Some(format!("Failed to create event: {e}")));
                    creating.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "home",
            h1 { "Floor Plan Editor" }

            div { class: "panel",
                h3 { "New event" }
                div { class: "field-row",
                    label { "Name" }
                    input {
                        r#type: "text",
                        value: "{name}",
                        oninput: move |evt: Event<FormData>| name.set(evt.value()),
                    }
                }
                div { class: "field-row",
                    label { "Width (ft)" }
                    input {
                        r#type: "text",
                        inputmode: "decimal",
                        value: "{width}",
                        oninput: move |evt: Event<FormData>| width.set(evt.value()),
                    }
                }
                div { class: "field-row",
                    label { "Height (ft)" }
                    input {
                        r#type: "text",
                        inputmode: "decimal",
                        value: "{height}",
                        oninput: move |evt: Event<FormData>| height.set(evt.value()),
                    }
                }
                button {
                    class: "primary",
                    disabled: *creating.read(),
                    onclick: on_create,
                    "Create floor plan"
                }
            }

            div { class: "panel",
                h3 { "Open event" }
                div { class: "field-row",
                    input {
                        r#type: "text",
                        placeholder: "Event id or link",
                        value: "{open_id}",
                        oninput: move |evt: Event<FormData>| open_id.set(evt.value()),
                    }
                    button {
                        onclick: move |_| {
                            if let Some(id) = event_id_from_input(&open_id.read()) {
                                navigator().push(Route::EventView { id });
                            }
                        },
                        "Open"
                    }
                }
            }

            if let Some(message) = &*error.read() {
                div { class: "field-error", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_from_link() {
        assert_eq!(
            event_id_from_input("https://plans.example.com/event/abc-123/"),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn test_event_id_bare() {
        assert_eq!(event_id_from_input("  abc-123 "), Some("abc-123".to_string()));
        assert_eq!(event_id_from_input("   "), None);
    }
}
