//! Device-agnostic input.
//!
//! The host converts mouse, touch and wheel events into these types before
//! they reach the gesture state machine, so the editor never branches on the
//! input device.

use crate::calc::{distance, midpoint};
use crate::hit_test::HitTarget;
use crate::models::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
    Touch,
}

impl PointerButton {
    /// Right and middle mouse buttons pan even over empty canvas.
    pub fn is_pan_trigger(self) -> bool {
        matches!(self, PointerButton::Secondary | PointerButton::Middle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift (or Ctrl/Cmd) held: extend the selection instead of replacing it.
    pub additive: bool,
}

/// One pointer or touch sample.
///
/// `pointer_count` is the number of pointers down *after* this event: 1 for
/// a mouse press, 2 once a second finger lands, 0 after the last release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub button: PointerButton,
    /// Screen pixels relative to the canvas.
    pub position: Point,
    /// Second touch point while two fingers are down.
    pub second: Option<Point>,
    pub pointer_count: usize,
    pub target: HitTarget,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    fn with_phase(phase: PointerPhase, position: Point, pointer_count: usize) -> Self {
        PointerEvent {
            phase,
            button: PointerButton::Primary,
            position,
            second: None,
            pointer_count,
            target: HitTarget::None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn down(position: Point) -> Self {
        Self::with_phase(PointerPhase::Down, position, 1)
    }

    pub fn moved(position: Point) -> Self {
        Self::with_phase(PointerPhase::Move, position, 1)
    }

    pub fn up(position: Point) -> Self {
        Self::with_phase(PointerPhase::Up, position, 0)
    }

    /// A two-finger sample. `phase` is `Down` when the second finger lands.
    pub fn pinch(phase: PointerPhase, a: Point, b: Point) -> Self {
        PointerEvent {
            button: PointerButton::Touch,
            second: Some(b),
            ..Self::with_phase(phase, a, 2)
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_target(mut self, target: HitTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_pointer_count(mut self, count: usize) -> Self {
        self.pointer_count = count;
        self
    }

    pub fn additive(mut self) -> Self {
        self.modifiers.additive = true;
        self
    }

    pub fn pinch_midpoint(&self) -> Option<Point> {
        self.second.map(|b| midpoint(self.position, b))
    }

    pub fn pinch_distance(&self) -> Option<f64> {
        self.second.map(|b| distance(self.position, b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// Mouse wheel over the canvas. Negative `delta_y` scrolls up (zoom in).
    Wheel { position: Point, delta_y: f64 },
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}
