//! Scroll axis state and synthetic scrollbar geometry.
//!
//! `ScrollAxisState` is what the render step reads for one scrollbar. It is
//! recomputed from an [`AxisGeometry`] sample by [`ScrollAxisState::reflow`];
//! the free functions hold the drag and wheel arithmetic so the container
//! widget only sequences host calls around them.

/// Smallest thumb length, so a very long document still yields a grabbable thumb.
pub const MIN_SCROLL_SIZE: f64 = 20.0;

/// Extra space the inner element is stretched by to push native scrollbars out of view.
pub const HIDE_SCROLLBAR_OFFSET: f64 = 30.0;

/// Width of the band along the trailing edge in which the pointer hovers a scrollbar.
pub const HOVER_PROXIMITY: f64 = 12.0;

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Discrete scroll position reported to observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScrollState {
    /// At the start of the content.
    #[default]
    Top,
    /// Somewhere in between.
    Scroll,
    /// At the end of the content.
    Bottom,
}

impl ScrollState {
    /// Classify a native scroll offset.
    ///
    /// An offset at zero is `Top` even when the content fits, matching what a
    /// freshly mounted container reports.
    pub fn from_geometry(geometry: AxisGeometry) -> Self {
        if geometry.offset <= 0.0 {
            ScrollState::Top
        } else if geometry.offset >= geometry.max_offset() {
            ScrollState::Bottom
        } else {
            ScrollState::Scroll
        }
    }
}

// ---------------------------------------------------------------------------
// AxisGeometry
// ---------------------------------------------------------------------------

/// Native scroll metrics of one axis, sampled from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisGeometry {
    /// Visible extent of the container.
    pub container: f64,
    /// Full extent of the scrollable content.
    pub content: f64,
    /// Current native scroll offset.
    pub offset: f64,
}

impl AxisGeometry {
    /// Create a new geometry sample.
    pub const fn new(container: f64, content: f64, offset: f64) -> Self {
        Self { container, content, offset }
    }

    /// Whether the content overflows the container.
    #[inline]
    pub fn overflows(&self) -> bool {
        self.container < self.content
    }

    /// The largest native offset: `max(0, content - container)`.
    #[inline]
    pub fn max_offset(&self) -> f64 {
        (self.content - self.container).max(0.0)
    }

    /// Whether a wheel rotation by `delta` cannot move the content any
    /// further because the container is already at that end.
    pub fn at_extremity(&self, delta: f64) -> bool {
        (delta > 0.0 && self.content <= self.offset + self.container) || (delta < 0.0 && self.offset <= 0.0)
    }
}

// ---------------------------------------------------------------------------
// ScrollAxisState
// ---------------------------------------------------------------------------

/// Synthetic scrollbar state for one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollAxisState {
    /// Whether the scrollbar is shown (content overflows).
    pub active: bool,
    /// Thumb length.
    pub size: f64,
    /// Thumb offset from the start of the track.
    pub pos: f64,
    /// Pointer is within the hover band of this scrollbar.
    pub hover: bool,
    /// The thumb is being dragged.
    pub scrolling: bool,
    /// Last discrete scroll position.
    pub scroll_state: ScrollState,
}

/// What a [`ScrollAxisState::reflow`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reflow {
    /// The discrete scroll state changed and observers should be told.
    pub state_changed: bool,
}

impl ScrollAxisState {
    /// Recompute thumb geometry from `geometry`.
    ///
    /// Returns `None` when nothing changed, so callers can skip re-rendering.
    pub fn reflow(&mut self, geometry: AxisGeometry) -> Option<Reflow> {
        let active = geometry.overflows();
        if !active && !self.active {
            return None;
        }

        let (size, pos) = if active { thumb_geometry(geometry) } else { (0.0, 0.0) };

        if self.active == active && self.size == size && self.pos == pos {
            return None;
        }

        let scroll_state = ScrollState::from_geometry(geometry);
        let state_changed = scroll_state != self.scroll_state;

        self.active = active;
        self.size = size;
        self.pos = pos;
        self.scroll_state = scroll_state;

        Some(Reflow { state_changed })
    }

    /// Update the hover flag. Returns `true` if it changed.
    pub fn set_hover(&mut self, hover: bool) -> bool {
        if self.hover == hover {
            return false;
        }
        self.hover = hover;
        true
    }

    /// Whether the thumb should render in its highlighted form.
    pub fn highlighted(&self) -> bool {
        self.hover || self.scrolling
    }

    /// Whether `coordinate` (measured from the track start) falls on the thumb.
    pub fn thumb_contains(&self, coordinate: f64) -> bool {
        self.active && coordinate >= self.pos && coordinate <= self.pos + self.size
    }
}

/// Thumb `(size, pos)` for an overflowing axis.
///
/// `size = max(container / content * container, MIN_SCROLL_SIZE)` and
/// `pos = offset / (content - container) * (container - size)`, kept within
/// `0..=container - size` (a track shorter than the minimum thumb pins it at 0).
pub fn thumb_geometry(geometry: AxisGeometry) -> (f64, f64) {
    let AxisGeometry { container, content, offset } = geometry;
    let size = ((container / content) * container).max(MIN_SCROLL_SIZE);
    let travel = (container - size).max(0.0);
    let pos = ((offset / (content - container)) * (container - size)).clamp(0.0, travel);
    (size, pos)
}

/// How many native scroll units one unit of thumb travel represents.
///
/// Zero when the thumb fills the whole track, since it cannot travel.
pub fn drag_ratio(geometry: AxisGeometry, thumb_size: f64) -> f64 {
    let travel = geometry.container - thumb_size;
    if travel <= 0.0 {
        return 0.0;
    }
    (geometry.content - geometry.container) / travel
}

/// Whether the pointer at `distance` from the trailing edge hovers the scrollbar.
#[inline]
pub fn within_hover_band(distance: f64) -> bool {
    distance <= HOVER_PROXIMITY
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -----------------------------------------------------------------------
    // ScrollState
    // -----------------------------------------------------------------------

    #[test]
    fn scroll_state_classification() {
        assert_eq!(ScrollState::from_geometry(AxisGeometry::new(100.0, 400.0, 0.0)), ScrollState::Top);
        assert_eq!(ScrollState::from_geometry(AxisGeometry::new(100.0, 400.0, 150.0)), ScrollState::Scroll);
        assert_eq!(ScrollState::from_geometry(AxisGeometry::new(100.0, 400.0, 300.0)), ScrollState::Bottom);
    }

    #[test]
    fn scroll_state_when_content_fits() {
        assert_eq!(ScrollState::from_geometry(AxisGeometry::new(100.0, 50.0, 0.0)), ScrollState::Top);
    }

    // -----------------------------------------------------------------------
    // AxisGeometry
    // -----------------------------------------------------------------------

    #[test]
    fn max_offset_clamps_to_zero() {
        assert_eq!(AxisGeometry::new(100.0, 400.0, 0.0).max_offset(), 300.0);
        assert_eq!(AxisGeometry::new(100.0, 40.0, 0.0).max_offset(), 0.0);
    }

    #[test]
    fn extremity_detection() {
        let top = AxisGeometry::new(100.0, 400.0, 0.0);
        assert!(top.at_extremity(-10.0));
        assert!(!top.at_extremity(10.0));

        let bottom = AxisGeometry::new(100.0, 400.0, 300.0);
        assert!(bottom.at_extremity(10.0));
        assert!(!bottom.at_extremity(-10.0));

        let middle = AxisGeometry::new(100.0, 400.0, 120.0);
        assert!(!middle.at_extremity(10.0));
        assert!(!middle.at_extremity(-10.0));
        assert!(!middle.at_extremity(0.0));
    }

    // -----------------------------------------------------------------------
    // Reflow
    // -----------------------------------------------------------------------

    #[test]
    fn reflow_inactive_to_inactive_is_noop() {
        let mut state = ScrollAxisState::default();
        assert_eq!(state.reflow(AxisGeometry::new(100.0, 80.0, 0.0)), None);
        assert_eq!(state.reflow(AxisGeometry::new(100.0, 100.0, 0.0)), None);
        assert_eq!(state, ScrollAxisState::default());
    }

    #[test]
    fn reflow_activates_on_overflow() {
        let mut state = ScrollAxisState::default();
        let change = state.reflow(AxisGeometry::new(100.0, 400.0, 0.0));
        assert_eq!(change, Some(Reflow { state_changed: false }));
        assert!(state.active);
        assert_eq!(state.size, 25.0);
        assert_eq!(state.pos, 0.0);
    }

    #[test]
    fn reflow_position_tracks_offset() {
        let mut state = ScrollAxisState::default();
        state.reflow(AxisGeometry::new(100.0, 400.0, 150.0));
        // (150 / 300) * (100 - 25)
        assert_eq!(state.pos, 37.5);
        assert_eq!(state.scroll_state, ScrollState::Scroll);
    }

    #[test]
    fn reflow_respects_min_size() {
        let mut state = ScrollAxisState::default();
        state.reflow(AxisGeometry::new(100.0, 10_000.0, 9_900.0));
        assert_eq!(state.size, MIN_SCROLL_SIZE);
        assert_eq!(state.pos, 100.0 - MIN_SCROLL_SIZE);
    }

    #[test]
    fn reflow_deactivates_when_overflow_resolves() {
        let mut state = ScrollAxisState::default();
        state.reflow(AxisGeometry::new(100.0, 400.0, 300.0));
        assert_eq!(state.scroll_state, ScrollState::Bottom);

        let change = state.reflow(AxisGeometry::new(100.0, 100.0, 0.0));
        assert_eq!(change, Some(Reflow { state_changed: true }));
        assert!(!state.active);
        assert_eq!(state.size, 0.0);
        assert_eq!(state.pos, 0.0);
        assert_eq!(state.scroll_state, ScrollState::Top);
    }

    #[test]
    fn reflow_unchanged_geometry_is_noop() {
        let mut state = ScrollAxisState::default();
        state.reflow(AxisGeometry::new(100.0, 400.0, 50.0));
        assert_eq!(state.reflow(AxisGeometry::new(100.0, 400.0, 50.0)), None);
    }

    #[test]
    fn reflow_invariants_hold_across_samples() {
        for container in [1.0, 10.0, 19.5, 20.0, 57.0, 100.0, 333.0] {
            for content in [container + 1.0, container * 2.0, container * 50.0] {
                let max = content - container;
                for offset in [0.0, max / 3.0, max / 2.0, max] {
                    let mut state = ScrollAxisState::default();
                    state.reflow(AxisGeometry::new(container, content, offset));
                    assert!(state.active);
                    assert!(state.size >= MIN_SCROLL_SIZE);
                    assert!(state.pos >= 0.0);
                    assert!(state.pos <= (container - state.size).max(0.0) + 1e-9);
                }
            }
        }
    }

    #[test]
    fn thumb_pinned_when_track_shorter_than_min_size() {
        let mut state = ScrollAxisState::default();
        state.reflow(AxisGeometry::new(10.0, 11.0, 1.0));
        assert!(state.active);
        assert_eq!(state.size, MIN_SCROLL_SIZE);
        assert_eq!(state.pos, 0.0);
    }

    #[test]
    fn reflow_keeps_hover_and_scrolling() {
        let mut state = ScrollAxisState { hover: true, scrolling: true, ..Default::default() };
        state.reflow(AxisGeometry::new(100.0, 400.0, 0.0));
        assert!(state.hover);
        assert!(state.scrolling);
    }

    // -----------------------------------------------------------------------
    // Drag, hover
    // -----------------------------------------------------------------------

    #[test]
    fn drag_ratio_maps_thumb_travel_to_content() {
        let geometry = AxisGeometry::new(100.0, 400.0, 0.0);
        // (400 - 100) / (100 - 25)
        assert_eq!(drag_ratio(geometry, 25.0), 4.0);
    }

    #[test]
    fn drag_ratio_zero_when_thumb_fills_track() {
        assert_eq!(drag_ratio(AxisGeometry::new(20.0, 21.0, 0.0), 20.0), 0.0);
    }

    #[test]
    fn hover_band() {
        assert!(within_hover_band(0.0));
        assert!(within_hover_band(12.0));
        assert!(!within_hover_band(12.5));
    }

    #[test]
    fn set_hover_reports_change() {
        let mut state = ScrollAxisState::default();
        assert!(state.set_hover(true));
        assert!(!state.set_hover(true));
        assert!(state.highlighted());
        assert!(state.set_hover(false));
        assert!(!state.highlighted());
    }

    #[test]
    fn thumb_contains_only_when_active() {
        let mut state = ScrollAxisState::default();
        assert!(!state.thumb_contains(0.0));
        state.reflow(AxisGeometry::new(100.0, 400.0, 150.0));
        assert!(state.thumb_contains(40.0));
        assert!(!state.thumb_contains(10.0));
        assert!(!state.thumb_contains(70.0));
    }
}
