//! Host capabilities consumed by scrollable widgets.
//!
//! A [`ScrollHost`] is the native scrolling element: it owns the real scroll
//! offset and reports extents. The widget never stores geometry between
//! events; it samples the host on every reflow. A [`ScrollObserver`] receives
//! the notifications the widget emits back to page logic.

use crate::geometry::Axis;
use crate::widget::scroll::{AxisGeometry, ScrollState};

// ---------------------------------------------------------------------------
// ScrollHost
// ---------------------------------------------------------------------------

/// The native scroll container a widget drives.
pub trait ScrollHost {
    /// Current native scroll offset along `axis`.
    fn scroll_offset(&self, axis: Axis) -> f64;

    /// Set the native scroll offset. Implementations clamp to their native
    /// bounds the way a browser does.
    fn set_scroll_offset(&mut self, axis: Axis, offset: f64);

    /// Visible extent of the container along `axis`.
    fn container_extent(&self, axis: Axis) -> f64;

    /// Full extent of the content along `axis`.
    fn content_extent(&self, axis: Axis) -> f64;

    /// Start delivering wheel events from the inner element (non-passive, so
    /// they can be consumed).
    fn add_wheel_listener(&mut self);

    /// Stop delivering wheel events from the inner element.
    fn remove_wheel_listener(&mut self);

    /// Route pointer moves and releases from the whole document to the widget
    /// until [`release_pointer`](Self::release_pointer).
    fn capture_pointer(&mut self);

    /// Undo [`capture_pointer`](Self::capture_pointer).
    fn release_pointer(&mut self);

    /// Sample all scroll metrics for `axis`.
    fn geometry(&self, axis: Axis) -> AxisGeometry {
        AxisGeometry::new(
            self.container_extent(axis),
            self.content_extent(axis),
            self.scroll_offset(axis),
        )
    }
}

// ---------------------------------------------------------------------------
// ScrollObserver
// ---------------------------------------------------------------------------

/// Notifications emitted by a scroll container. All methods default to no-ops.
pub trait ScrollObserver {
    /// The discrete scroll position of `axis` changed.
    fn on_scroll_state_change(&mut self, _axis: Axis, _state: ScrollState) {}

    /// The native element scrolled.
    fn on_scroll(&mut self) {}

    /// A scroll may have moved other elements on the page; listeners that
    /// position popups relative to it should re-measure.
    fn on_layout_change(&mut self) {}
}

/// An observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScrollObserver for NoopObserver {}
