use dioxus::prelude::*;

/// Key chords and what they do on the canvas.
const SHORTCUTS: &[(&[&str], &str)] = &[
    (&["Del", "Backspace"], "Delete selected tables"),
    (&["Esc"], "Clear selection / close panels"),
    (&["F"], "Fit the room to the screen"),
    (&["+", "-"], "Zoom in / out"),
    (&["H", "?"], "Toggle this help"),
];

const SECTIONS: &[(&str, &str)] = &[
    (
        "Tables",
        "Drag a table to move it; every selected table moves together and lands on whole feet. \
         Drag on empty floor to box-select. Hold Shift, Ctrl or Cmd to add to the selection, \
         or click a selected table with it held to remove that table.",
    ),
    (
        "Moving around",
        "Scroll to zoom at the cursor. Drag with the right or middle mouse button to pan. \
         On touch screens pinch to zoom and slide two fingers to pan.",
    ),
    (
        "Boundary",
        "In Boundary mode drag a corner to reshape the room. Corners snap to line up with their \
         neighbours. Press the small handle in the middle of a wall to add a corner there, and \
         double-click a corner to remove it. A room always keeps at least three corners.",
    ),
    (
        "Zones",
        "In Zones mode pick a zone from the palette and click tables to paint them. \
         Clicking a table that already has the active zone clears it.",
    ),
    (
        "Labels",
        "Tables are numbered automatically. Tables along the walls come first, in order around \
         the room. The rest follow row by row, left to right.",
    ),
];

#[component]
pub fn HelpOverlay(show: Signal<bool>) -> Element {
    if !*show.read() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "help-overlay-backdrop",
            onclick: move |_| show.set(false),

            div {
                class: "help-overlay",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "Help" }

                div { class: "shortcut-section",
                    h3 { "Keyboard" }
                    for (keys, action) in SHORTCUTS.iter() {
                        div { class: "shortcut-row",
                            span { class: "shortcut-keys",
                                for (i, key) in keys.iter().enumerate() {
                                    if i > 0 { " / " }
                                    kbd { "{key}" }
                                }
                            }
                            span { "{action}" }
                        }
                    }
                }

                div { class: "help-divider" }

                for (title, body) in SECTIONS.iter() {
                    div { class: "help-info-section",
                        h3 { "{title}" }
                        p { "{body}" }
                    }
                }

                button {
                    class: "close-help",
                    onclick: move |_| show.set(false),
                    "Close"
                }
            }
        }
    }
}
