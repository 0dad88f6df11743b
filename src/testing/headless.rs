//! Headless scroll host: an in-memory stand-in for a native scroll element.
//!
//! [`HeadlessHost`] implements [`ScrollHost`] with synthetic geometry and
//! records listener and pointer-capture traffic, so scroll widgets can be
//! driven and inspected without a browser or terminal.
//! [`RecordingObserver`] captures every notification a widget emits.

use crate::geometry::Axis;
use crate::widget::host::{ScrollHost, ScrollObserver};
use crate::widget::scroll::ScrollState;

// ---------------------------------------------------------------------------
// HeadlessHost
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AxisMetrics {
    container: f64,
    content: f64,
    offset: f64,
}

impl AxisMetrics {
    fn max_offset(&self) -> f64 {
        (self.content - self.container).max(0.0)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}

/// A synthetic scroll element.
///
/// Offsets are clamped to `[0, content - container]` like a browser clamps
/// `scrollTop`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessHost {
    vertical: AxisMetrics,
    horizontal: AxisMetrics,
    wheel_listeners: usize,
    pointer_captured: bool,
    captures: usize,
    releases: usize,
}

impl HeadlessHost {
    /// A host that may overflow vertically; horizontally the content fits.
    pub fn new(container_height: f64, content_height: f64) -> Self {
        Self {
            vertical: AxisMetrics { container: container_height, content: content_height, offset: 0.0 },
            horizontal: AxisMetrics { container: 200.0, content: 200.0, offset: 0.0 },
            ..Default::default()
        }
    }

    /// Set the horizontal extents (builder).
    pub fn with_width(mut self, container_width: f64, content_width: f64) -> Self {
        self.horizontal = AxisMetrics { container: container_width, content: content_width, offset: 0.0 };
        self
    }

    /// Start at the given offset (builder).
    pub fn with_offset(mut self, axis: Axis, offset: f64) -> Self {
        self.set_scroll_offset(axis, offset);
        self
    }

    /// Change the content extent, as when children are added or removed.
    pub fn set_content_extent(&mut self, axis: Axis, extent: f64) {
        let metrics = self.metrics_mut(axis);
        metrics.content = extent;
        metrics.clamp();
    }

    /// Change the container extent, as on resize.
    pub fn set_container_extent(&mut self, axis: Axis, extent: f64) {
        let metrics = self.metrics_mut(axis);
        metrics.container = extent;
        metrics.clamp();
    }

    /// Number of wheel listeners currently installed.
    pub fn wheel_listeners(&self) -> usize {
        self.wheel_listeners
    }

    /// Whether document-level pointer listeners are installed.
    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Total `(captures, releases)` seen.
    pub fn capture_counts(&self) -> (usize, usize) {
        (self.captures, self.releases)
    }

    fn metrics(&self, axis: Axis) -> &AxisMetrics {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    fn metrics_mut(&mut self, axis: Axis) -> &mut AxisMetrics {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }
}

impl ScrollHost for HeadlessHost {
    fn scroll_offset(&self, axis: Axis) -> f64 {
        self.metrics(axis).offset
    }

    fn set_scroll_offset(&mut self, axis: Axis, offset: f64) {
        let metrics = self.metrics_mut(axis);
        metrics.offset = offset;
        metrics.clamp();
    }

    fn container_extent(&self, axis: Axis) -> f64 {
        self.metrics(axis).container
    }

    fn content_extent(&self, axis: Axis) -> f64 {
        self.metrics(axis).content
    }

    fn add_wheel_listener(&mut self) {
        self.wheel_listeners += 1;
    }

    fn remove_wheel_listener(&mut self) {
        self.wheel_listeners = self.wheel_listeners.saturating_sub(1);
    }

    fn capture_pointer(&mut self) {
        self.pointer_captured = true;
        self.captures += 1;
    }

    fn release_pointer(&mut self) {
        self.pointer_captured = false;
        self.releases += 1;
    }
}

// ---------------------------------------------------------------------------
// RecordingObserver
// ---------------------------------------------------------------------------

/// A notification seen by [`RecordingObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    ScrollStateChange(Axis, ScrollState),
    Scroll,
    LayoutChange,
}

/// Records every notification, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingObserver {
    pub notifications: Vec<Notification>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the scroll state changes, in order.
    pub fn state_changes(&self) -> Vec<(Axis, ScrollState)> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::ScrollStateChange(axis, state) => Some((*axis, *state)),
                _ => None,
            })
            .collect()
    }

    /// Drain and return all notifications.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl ScrollObserver for RecordingObserver {
    fn on_scroll_state_change(&mut self, axis: Axis, state: ScrollState) {
        self.notifications.push(Notification::ScrollStateChange(axis, state));
    }

    fn on_scroll(&mut self) {
        self.notifications.push(Notification::Scroll);
    }

    fn on_layout_change(&mut self) {
        self.notifications.push(Notification::LayoutChange);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_clamped() {
        let mut host = HeadlessHost::new(100.0, 400.0);
        host.set_scroll_offset(Axis::Vertical, 1_000.0);
        assert_eq!(host.scroll_offset(Axis::Vertical), 300.0);
        host.set_scroll_offset(Axis::Vertical, -5.0);
        assert_eq!(host.scroll_offset(Axis::Vertical), 0.0);
    }

    #[test]
    fn shrinking_content_reclamps() {
        let mut host = HeadlessHost::new(100.0, 400.0).with_offset(Axis::Vertical, 250.0);
        host.set_content_extent(Axis::Vertical, 200.0);
        assert_eq!(host.scroll_offset(Axis::Vertical), 100.0);
    }

    #[test]
    fn horizontal_fits_by_default() {
        let host = HeadlessHost::new(100.0, 400.0);
        assert!(!host.geometry(Axis::Horizontal).overflows());
        assert!(host.geometry(Axis::Vertical).overflows());
    }

    #[test]
    fn listener_bookkeeping() {
        let mut host = HeadlessHost::new(100.0, 100.0);
        host.add_wheel_listener();
        assert_eq!(host.wheel_listeners(), 1);
        host.remove_wheel_listener();
        host.remove_wheel_listener();
        assert_eq!(host.wheel_listeners(), 0);

        host.capture_pointer();
        assert!(host.pointer_captured());
        host.release_pointer();
        assert!(!host.pointer_captured());
        assert_eq!(host.capture_counts(), (1, 1));
    }

    #[test]
    fn recording_observer_filters_state_changes() {
        let mut observer = RecordingObserver::new();
        observer.on_scroll();
        observer.on_scroll_state_change(Axis::Vertical, ScrollState::Bottom);
        observer.on_layout_change();
        assert_eq!(observer.state_changes(), vec![(Axis::Vertical, ScrollState::Bottom)]);
        assert_eq!(observer.take().len(), 3);
        assert!(observer.notifications.is_empty());
    }
}
