use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use floorplan_shared::input::{PointerButton, PointerEvent, PointerPhase};
use floorplan_shared::models::{Point, Size};
use wasm_bindgen::JsCast;

/// DOM id of the canvas element every pointer position is measured against.
pub const CANVAS_ID: &str = "floor-plan-canvas";

/// Convert client (viewport) coordinates to canvas-relative pixels.
pub fn client_to_container(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Point {
    Point::new(client_x - rect_left, client_y - rect_top)
}

/// Bounding client rect of the canvas element.
pub fn canvas_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(CANVAS_ID)?;
    Some(element.get_bounding_client_rect())
}

pub fn canvas_size() -> Option<Size> {
    canvas_rect().map(|rect| Size::new(rect.width(), rect.height()))
}

/// Give the canvas keyboard focus so shortcuts work without a click first.
pub fn focus_canvas() {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CANVAS_ID))
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(element) = element {
        let _ = element.focus();
    }
}

/// Client coordinates to canvas pixels using the live canvas position.
pub fn to_canvas(client_x: f64, client_y: f64) -> Option<Point> {
    let rect = canvas_rect()?;
    Some(client_to_container(client_x, client_y, rect.left(), rect.top()))
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
pub fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

pub fn pointer_button(button: Option<MouseButton>) -> PointerButton {
    match button {
        Some(MouseButton::Secondary) => PointerButton::Secondary,
        Some(MouseButton::Auxiliary) => PointerButton::Middle,
        _ => PointerButton::Primary,
    }
}

/// Build the pointer sample for a touch event from the canvas positions of
/// the fingers still down. Two or more fingers become a pinch sample;
/// lifting the last finger reports an `Up` at `last`.
pub fn touch_event(phase: PointerPhase, touches: &[Point], last: Point) -> PointerEvent {
    match touches {
        [a, b, ..] => PointerEvent::pinch(phase, *a, *b).with_pointer_count(touches.len()),
        [only] => {
            let ev = match phase {
                PointerPhase::Down => PointerEvent::down(*only),
                PointerPhase::Move => PointerEvent::moved(*only),
                PointerPhase::Up => PointerEvent::up(*only).with_pointer_count(1),
            };
            ev.with_button(PointerButton::Touch)
        }
        [] => PointerEvent::up(last).with_button(PointerButton::Touch),
    }
}
