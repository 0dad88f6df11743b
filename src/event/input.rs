//! Pointer event types wrapping crossterm for decoupling.
//!
//! Defines [`PointerEvent`] and supporting types. Crossterm mouse events are
//! converted via `From` impls so the scroll engine never depends on crossterm
//! directly; browser-like hosts build `PointerEvent`s themselves.

use crate::geometry::Point;

/// Wheel delta produced by one crossterm scroll notch, in host units.
pub const WHEEL_LINE: f64 = 1.0;

// ---------------------------------------------------------------------------
// PointerButton / PointerAction / PointerEvent
// ---------------------------------------------------------------------------

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// Pointer action kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Down(PointerButton),
    Up(PointerButton),
    Move,
    /// Pointer left the container's box.
    Leave,
    /// Wheel rotation. Positive `y` scrolls towards the end of the content.
    Wheel { delta: Point },
}

/// A pointer event with action and position relative to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerAction,
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub fn new(kind: PointerAction, position: Point) -> Self {
        Self { kind, position }
    }

    /// A primary-button press at `(x, y)`.
    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerAction::Down(PointerButton::Primary), Point::new(x, y))
    }

    /// A primary-button release at `(x, y)`.
    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerAction::Up(PointerButton::Primary), Point::new(x, y))
    }

    /// A move to `(x, y)`.
    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerAction::Move, Point::new(x, y))
    }

    /// A vertical wheel rotation by `delta_y` at `(x, y)`.
    pub fn wheel(x: f64, y: f64, delta_y: f64) -> Self {
        Self::new(
            PointerAction::Wheel { delta: Point::new(0.0, delta_y) },
            Point::new(x, y),
        )
    }
}

// ---------------------------------------------------------------------------
// EventOutcome
// ---------------------------------------------------------------------------

/// What a handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventOutcome {
    /// The handler consumed the event; default handling is suppressed.
    Consumed,
    /// The event propagates to outer handlers (e.g. the page scrolls).
    Bubble,
}

impl EventOutcome {
    /// Whether default handling should be suppressed.
    pub fn is_consumed(self) -> bool {
        self == EventOutcome::Consumed
    }
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

/// Convert a crossterm mouse button to our `PointerButton`.
fn convert_mouse_button(b: crossterm::event::MouseButton) -> PointerButton {
    match b {
        crossterm::event::MouseButton::Left => PointerButton::Primary,
        crossterm::event::MouseButton::Right => PointerButton::Secondary,
        crossterm::event::MouseButton::Middle => PointerButton::Auxiliary,
    }
}

/// Convert a crossterm `MouseEvent` into our `PointerEvent`.
///
/// Cell column/row become the x/y coordinates; a drag is a move, since the
/// engine tracks the pressed button itself.
impl From<crossterm::event::MouseEvent> for PointerEvent {
    fn from(me: crossterm::event::MouseEvent) -> Self {
        use crossterm::event::MouseEventKind;

        let kind = match me.kind {
            MouseEventKind::Down(b) => PointerAction::Down(convert_mouse_button(b)),
            MouseEventKind::Up(b) => PointerAction::Up(convert_mouse_button(b)),
            MouseEventKind::Drag(_) | MouseEventKind::Moved => PointerAction::Move,
            MouseEventKind::ScrollUp => PointerAction::Wheel { delta: Point::new(0.0, -WHEEL_LINE) },
            MouseEventKind::ScrollDown => PointerAction::Wheel { delta: Point::new(0.0, WHEEL_LINE) },
            MouseEventKind::ScrollLeft => PointerAction::Wheel { delta: Point::new(-WHEEL_LINE, 0.0) },
            MouseEventKind::ScrollRight => PointerAction::Wheel { delta: Point::new(WHEEL_LINE, 0.0) },
        };
        PointerEvent {
            kind,
            position: Point::new(f64::from(me.column), f64::from(me.row)),
        }
    }
}

/// Try to convert a crossterm `Event` into a `PointerEvent`.
///
/// Returns `None` for anything that is not a mouse event.
pub fn try_from_crossterm(event: crossterm::event::Event) -> Option<PointerEvent> {
    match event {
        crossterm::event::Event::Mouse(me) => Some(PointerEvent::from(me)),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    fn ct_mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn constructors() {
        let e = PointerEvent::down(1.0, 2.0);
        assert_eq!(e.kind, PointerAction::Down(PointerButton::Primary));
        assert_eq!(e.position, Point::new(1.0, 2.0));

        let w = PointerEvent::wheel(0.0, 0.0, 40.0);
        assert_eq!(w.kind, PointerAction::Wheel { delta: Point::new(0.0, 40.0) });
    }

    #[test]
    fn outcome_is_consumed() {
        assert!(EventOutcome::Consumed.is_consumed());
        assert!(!EventOutcome::Bubble.is_consumed());
    }

    // ── crossterm conversions ────────────────────────────────────────

    #[test]
    fn convert_mouse_down() {
        let e = PointerEvent::from(ct_mouse(MouseEventKind::Down(MouseButton::Left), 5, 10));
        assert_eq!(e.kind, PointerAction::Down(PointerButton::Primary));
        assert_eq!(e.position, Point::new(5.0, 10.0));
    }

    #[test]
    fn convert_mouse_up_right() {
        let e = PointerEvent::from(ct_mouse(MouseEventKind::Up(MouseButton::Right), 0, 0));
        assert_eq!(e.kind, PointerAction::Up(PointerButton::Secondary));
    }

    #[test]
    fn convert_drag_is_move() {
        let e = PointerEvent::from(ct_mouse(MouseEventKind::Drag(MouseButton::Left), 3, 4));
        assert_eq!(e.kind, PointerAction::Move);
        let e = PointerEvent::from(ct_mouse(MouseEventKind::Moved, 3, 4));
        assert_eq!(e.kind, PointerAction::Move);
    }

    #[test]
    fn convert_scroll_directions() {
        let up = PointerEvent::from(ct_mouse(MouseEventKind::ScrollUp, 0, 0));
        assert_eq!(up.kind, PointerAction::Wheel { delta: Point::new(0.0, -WHEEL_LINE) });
        let down = PointerEvent::from(ct_mouse(MouseEventKind::ScrollDown, 0, 0));
        assert_eq!(down.kind, PointerAction::Wheel { delta: Point::new(0.0, WHEEL_LINE) });
        let left = PointerEvent::from(ct_mouse(MouseEventKind::ScrollLeft, 0, 0));
        assert_eq!(left.kind, PointerAction::Wheel { delta: Point::new(-WHEEL_LINE, 0.0) });
    }

    #[test]
    fn try_from_non_mouse_event() {
        assert!(try_from_crossterm(crossterm::event::Event::FocusGained).is_none());
        let mouse = crossterm::event::Event::Mouse(ct_mouse(MouseEventKind::Moved, 1, 1));
        assert!(try_from_crossterm(mouse).is_some());
    }
}
