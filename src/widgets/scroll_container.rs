//! ScrollContainer widget: custom scrollbars over a native scroll element.
//!
//! The native element keeps doing the actual scrolling, with its own
//! scrollbars pushed out of view (see [`InnerStyle`]). The container observes
//! its geometry and renders synthetic thumbs on top, translating thumb drags
//! back into native scroll offsets.
//!
//! Every operation is a no-op while no host is attached, so events that
//! arrive before mount or after unmount are harmless.

use std::fmt;

use crate::event::input::{EventOutcome, PointerAction, PointerButton, PointerEvent};
use crate::geometry::{Axis, Point, Rect};
use crate::widget::host::{NoopObserver, ScrollHost, ScrollObserver};
use crate::widget::scroll::{
    drag_ratio, within_hover_band, ScrollAxisState, HIDE_SCROLLBAR_OFFSET,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A CSS length: a pixel count or any raw CSS value (`"50vh"`, `"100%"`).
#[derive(Debug, Clone, PartialEq)]
pub enum Length {
    Px(f64),
    Css(String),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{px}px"),
            Length::Css(value) => f.write_str(value),
        }
    }
}

impl From<f64> for Length {
    fn from(px: f64) -> Self {
        Length::Px(px)
    }
}

impl From<&str> for Length {
    fn from(value: &str) -> Self {
        Length::Css(value.to_owned())
    }
}

/// How the native element animates programmatic scrolls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehaviour {
    #[default]
    Auto,
    Smooth,
}

impl fmt::Display for ScrollBehaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollBehaviour::Auto => f.write_str("auto"),
            ScrollBehaviour::Smooth => f.write_str("smooth"),
        }
    }
}

/// Configuration for a [`ScrollContainer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollContainerConfig {
    /// Render thumbs in the inverted (light-on-dark) color scheme.
    pub invert: bool,
    /// Maximum width of the wrapper.
    pub max_width: Option<Length>,
    /// Maximum height of the inner scroll element.
    pub max_height: Option<Length>,
    /// Native scroll behaviour.
    pub scroll_behaviour: ScrollBehaviour,
    /// Keep wheel scrolling inside the container from scrolling the page.
    pub prevent_window_scroll: bool,
}

impl ScrollContainerConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inverted color scheme (builder).
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set the maximum width (builder).
    pub fn with_max_width(mut self, width: impl Into<Length>) -> Self {
        self.max_width = Some(width.into());
        self
    }

    /// Set the maximum height (builder).
    pub fn with_max_height(mut self, height: impl Into<Length>) -> Self {
        self.max_height = Some(height.into());
        self
    }

    /// Set the scroll behaviour (builder).
    pub fn with_scroll_behaviour(mut self, behaviour: ScrollBehaviour) -> Self {
        self.scroll_behaviour = behaviour;
        self
    }

    /// Set whether page scrolling is prevented (builder).
    pub fn with_prevent_window_scroll(mut self, prevent: bool) -> Self {
        self.prevent_window_scroll = prevent;
        self
    }
}

// ---------------------------------------------------------------------------
// Render data
// ---------------------------------------------------------------------------

/// Inline style and class flags for one thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbStyle {
    /// Which scrollbar this thumb belongs to.
    pub axis: Axis,
    /// Offset from the track start (`top` or `left`).
    pub pos: f64,
    /// Thumb length (`height` or `width`).
    pub size: f64,
    /// Hovered or being dragged.
    pub highlighted: bool,
    /// Light thumb for dark backgrounds.
    pub inverted: bool,
}

impl ThumbStyle {
    /// CSS class names for this thumb.
    pub fn class_names(&self) -> Vec<&'static str> {
        let (base, hover) = match self.axis {
            Axis::Vertical => ("scroll", "scroll-hover"),
            Axis::Horizontal => ("scroll-x", "scroll-x-hover"),
        };
        let mut classes = vec![base];
        if self.inverted {
            classes.push("scroll-invert");
        }
        if self.highlighted {
            classes.push(hover);
        }
        classes
    }
}

impl fmt::Display for ThumbStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis {
            Axis::Vertical => write!(f, "top: {}px; height: {}px", self.pos, self.size),
            Axis::Horizontal => write!(f, "left: {}px; width: {}px", self.pos, self.size),
        }
    }
}

/// Inline style of the inner (natively scrolling) element.
///
/// The element is stretched by [`HIDE_SCROLLBAR_OFFSET`] to the right and
/// bottom via negative margins, and padded back by the same amount minus the
/// native scrollbar width, so native scrollbars sit outside the clip box.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerStyle {
    /// Height cap from the config; unbounded when `None`.
    pub max_height: Option<Length>,
    /// Native `scroll-behavior` of the inner element.
    pub scroll_behaviour: ScrollBehaviour,
    /// Right and bottom padding: the hide offset minus the native scrollbar width.
    pub padding: f64,
    /// Negative right and bottom margin pushing native scrollbars out of view.
    pub margin: f64,
}

impl fmt::Display for InnerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(max_height) = &self.max_height {
            write!(f, "max-height: {max_height}; ")?;
        }
        write!(
            f,
            "scroll-behavior: {}; padding: 0 {p}px {p}px 0; margin: 0 -{m}px -{m}px 0",
            self.scroll_behaviour,
            p = self.padding,
            m = self.margin,
        )
    }
}

// ---------------------------------------------------------------------------
// Programmatic scrolling target
// ---------------------------------------------------------------------------

/// Position of a descendant element within the scroll content.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementBounds {
    /// Offset of the element's top edge from the content start.
    pub top: f64,
    /// Element height.
    pub height: f64,
}

impl ElementBounds {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

// ---------------------------------------------------------------------------
// ScrollContainer
// ---------------------------------------------------------------------------

/// An in-flight thumb drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    axis: Axis,
    /// Pointer coordinate along `axis` when the drag began.
    start: f64,
    /// Native offset when the drag began.
    initial_offset: f64,
}

/// Custom-scrollbar container driving a native [`ScrollHost`].
///
/// # Examples
///
/// ```ignore
/// use scrollkit::geometry::Axis;
/// use scrollkit::testing::HeadlessHost;
/// use scrollkit::widgets::{ScrollContainer, ScrollContainerConfig};
///
/// let mut container = ScrollContainer::new(ScrollContainerConfig::new());
/// container.mount(HeadlessHost::new(100.0, 400.0));
/// assert!(container.axis(Axis::Vertical).active);
/// ```
#[derive(Debug)]
pub struct ScrollContainer<H: ScrollHost, O: ScrollObserver = NoopObserver> {
    config: ScrollContainerConfig,
    host: Option<H>,
    observer: O,
    scroll_y: ScrollAxisState,
    scroll_x: ScrollAxisState,
    drag: Option<DragSession>,
}

impl<H: ScrollHost> ScrollContainer<H, NoopObserver> {
    /// Create an unmounted container without an observer.
    pub fn new(config: ScrollContainerConfig) -> Self {
        Self::with_observer(config, NoopObserver)
    }
}

impl<H: ScrollHost, O: ScrollObserver> ScrollContainer<H, O> {
    /// Create an unmounted container that reports to `observer`.
    pub fn with_observer(config: ScrollContainerConfig, observer: O) -> Self {
        Self {
            config,
            host: None,
            observer,
            scroll_y: ScrollAxisState::default(),
            scroll_x: ScrollAxisState::default(),
            drag: None,
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Attach the native element and compute initial scrollbar state.
    ///
    /// Replaces (and tears down) any previously attached host.
    pub fn mount(&mut self, mut host: H) {
        self.unmount();
        if self.config.prevent_window_scroll {
            host.add_wheel_listener();
            log::debug!("scroll container: wheel listener added on mount");
        }
        self.host = Some(host);
        self.reflow_all();
    }

    /// Apply a new configuration, reconcile the wheel listener, and reflow.
    pub fn update(&mut self, config: ScrollContainerConfig) {
        let was = self.config.prevent_window_scroll;
        let now = config.prevent_window_scroll;
        self.config = config;

        if let Some(host) = self.host.as_mut() {
            if was && !now {
                host.remove_wheel_listener();
                log::debug!("scroll container: wheel listener removed");
            }
            if !was && now {
                host.add_wheel_listener();
                log::debug!("scroll container: wheel listener added");
            }
        }
        self.reflow_all();
    }

    /// Detach the native element, ending any drag and removing listeners.
    ///
    /// Returns the host, if one was attached. Axis state is kept as last
    /// rendered; a later `mount` recomputes it.
    pub fn unmount(&mut self) -> Option<H> {
        self.on_drag_end();
        let mut host = self.host.take()?;
        if self.config.prevent_window_scroll {
            host.remove_wheel_listener();
        }
        log::debug!("scroll container: unmounted");
        Some(host)
    }

    /// Whether a host is attached.
    pub fn is_mounted(&self) -> bool {
        self.host.is_some()
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Scrollbar state of `axis`.
    pub fn axis(&self, axis: Axis) -> &ScrollAxisState {
        match axis {
            Axis::Vertical => &self.scroll_y,
            Axis::Horizontal => &self.scroll_x,
        }
    }

    /// Borrow the attached host.
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Borrow the attached host mutably (e.g. to change content size).
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn config(&self) -> &ScrollContainerConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Whether a thumb drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ── Reflow ───────────────────────────────────────────────────────

    /// Recompute the scrollbar of `axis` from the host's current geometry.
    pub fn reflow(&mut self, axis: Axis) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let geometry = host.geometry(axis);
        let state = match axis {
            Axis::Vertical => &mut self.scroll_y,
            Axis::Horizontal => &mut self.scroll_x,
        };
        let Some(change) = state.reflow(geometry) else {
            return;
        };

        log::debug!(
            "scroll container: {} reflow active={} size={} pos={}",
            axis,
            state.active,
            state.size,
            state.pos
        );
        if change.state_changed {
            self.observer.on_scroll_state_change(axis, state.scroll_state);
        }
    }

    /// Reflow both axes, vertical first.
    pub fn reflow_all(&mut self) {
        for axis in Axis::ALL {
            self.reflow(axis);
        }
    }

    /// Handle a native scroll event from the inner element.
    ///
    /// Consumed when page scrolling is prevented; otherwise the page is told
    /// its layout may have changed.
    pub fn on_native_scroll(&mut self) -> EventOutcome {
        if self.host.is_none() {
            return EventOutcome::Bubble;
        }
        self.reflow_all();
        self.observer.on_scroll();
        if self.config.prevent_window_scroll {
            return EventOutcome::Consumed;
        }
        self.observer.on_layout_change();
        EventOutcome::Bubble
    }

    // ── Drag ─────────────────────────────────────────────────────────

    /// Start dragging the thumb of `axis` from `pointer`.
    ///
    /// Captures the pointer at document level so the release is seen even
    /// when it happens outside the container.
    pub fn begin_drag(&mut self, axis: Axis, pointer: Point) -> EventOutcome {
        if !self.axis(axis).active || self.host.is_none() {
            return EventOutcome::Bubble;
        }
        self.on_drag_end();

        let Some(host) = self.host.as_mut() else {
            return EventOutcome::Bubble;
        };
        let session = DragSession {
            axis,
            start: axis.coordinate(pointer),
            initial_offset: host.scroll_offset(axis),
        };
        host.capture_pointer();
        self.drag = Some(session);
        self.axis_mut(axis).scrolling = true;

        log::debug!(
            "scroll container: {} drag started at offset {}",
            axis,
            session.initial_offset
        );
        EventOutcome::Consumed
    }

    /// Move the native offset proportionally to the pointer's travel.
    pub fn on_drag_move(&mut self, pointer: Point) -> EventOutcome {
        let Some(session) = self.drag else {
            return EventOutcome::Bubble;
        };
        let thumb_size = self.axis(session.axis).size;
        let Some(host) = self.host.as_mut() else {
            return EventOutcome::Bubble;
        };

        let ratio = drag_ratio(host.geometry(session.axis), thumb_size);
        let delta = (session.axis.coordinate(pointer) - session.start) * ratio;
        host.set_scroll_offset(session.axis, session.initial_offset + delta);

        self.reflow(session.axis);
        EventOutcome::Consumed
    }

    /// Finish the current drag and release the pointer capture.
    pub fn on_drag_end(&mut self) -> EventOutcome {
        let Some(session) = self.drag.take() else {
            return EventOutcome::Bubble;
        };
        if let Some(host) = self.host.as_mut() {
            host.release_pointer();
        }
        self.axis_mut(session.axis).scrolling = false;
        log::debug!("scroll container: {} drag ended", session.axis);
        EventOutcome::Consumed
    }

    // ── Wheel ────────────────────────────────────────────────────────

    /// Wheel over the inner element, delivered only while page scrolling is
    /// prevented.
    ///
    /// At an extremity the event bubbles so the page can scroll; otherwise
    /// the delta is applied here and the page stays put.
    pub fn on_native_wheel(&mut self, delta: f64) -> EventOutcome {
        if !self.config.prevent_window_scroll {
            return EventOutcome::Bubble;
        }
        self.apply_wheel(delta)
    }

    /// Wheel over the vertical thumb itself.
    pub fn on_thumb_wheel(&mut self, delta: f64) -> EventOutcome {
        self.apply_wheel(delta)
    }

    fn apply_wheel(&mut self, delta: f64) -> EventOutcome {
        let Some(host) = self.host.as_mut() else {
            return EventOutcome::Bubble;
        };
        let geometry = host.geometry(Axis::Vertical);
        if delta == 0.0 || geometry.at_extremity(delta) {
            log::trace!("scroll container: wheel {delta} bubbles at offset {}", geometry.offset);
            return EventOutcome::Bubble;
        }
        host.set_scroll_offset(Axis::Vertical, geometry.offset + delta);
        self.reflow(Axis::Vertical);
        EventOutcome::Consumed
    }

    // ── Hover ────────────────────────────────────────────────────────

    /// Update hover flags from a pointer position within `bounds`, the
    /// container's bounding box.
    pub fn on_pointer_move(&mut self, pointer: Point, bounds: Rect) {
        for axis in Axis::ALL {
            let hover = within_hover_band(bounds.distance_to_trailing_edge(axis, pointer));
            self.axis_mut(axis).set_hover(hover);
        }
    }

    /// Clear hover flags when the pointer leaves the container.
    pub fn on_pointer_leave(&mut self) {
        for axis in Axis::ALL {
            self.axis_mut(axis).set_hover(false);
        }
    }

    // ── Routing ──────────────────────────────────────────────────────

    /// Route a pointer event. `bounds` is the container's bounding box.
    ///
    /// Moves and releases are handled wherever they occur while a drag is in
    /// progress, matching a document-level capture.
    pub fn handle_pointer(&mut self, event: PointerEvent, bounds: Rect) -> EventOutcome {
        let pointer = event.position;
        match event.kind {
            PointerAction::Down(PointerButton::Primary) => match self.thumb_under(pointer, bounds) {
                Some(axis) => self.begin_drag(axis, pointer),
                None => EventOutcome::Bubble,
            },
            PointerAction::Down(_) => EventOutcome::Bubble,
            PointerAction::Move => {
                let outcome = self.on_drag_move(pointer);
                if bounds.contains(pointer) {
                    self.on_pointer_move(pointer, bounds);
                } else if !self.is_dragging() {
                    self.on_pointer_leave();
                }
                outcome
            }
            PointerAction::Up(_) => self.on_drag_end(),
            PointerAction::Leave => {
                self.on_pointer_leave();
                EventOutcome::Bubble
            }
            PointerAction::Wheel { delta } => {
                if self.thumb_under(pointer, bounds) == Some(Axis::Vertical) {
                    self.on_thumb_wheel(delta.y)
                } else {
                    self.on_native_wheel(delta.y)
                }
            }
        }
    }

    /// The axis whose thumb is under `pointer`, if any.
    fn thumb_under(&self, pointer: Point, bounds: Rect) -> Option<Axis> {
        if !bounds.contains(pointer) {
            return None;
        }
        Axis::ALL.into_iter().find(|&axis| {
            let state = self.axis(axis);
            let origin = match axis {
                Axis::Vertical => bounds.y,
                Axis::Horizontal => bounds.x,
            };
            within_hover_band(bounds.distance_to_trailing_edge(axis, pointer))
                && state.thumb_contains(axis.coordinate(pointer) - origin)
        })
    }

    // ── Programmatic scrolling ───────────────────────────────────────

    /// Scroll to the start of the content.
    pub fn scroll_to_top(&mut self) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        host.set_scroll_offset(Axis::Vertical, 0.0);
        self.reflow(Axis::Vertical);
    }

    /// Scroll to the end of the content.
    pub fn scroll_to_bottom(&mut self) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let max = host.geometry(Axis::Vertical).max_offset();
        host.set_scroll_offset(Axis::Vertical, max);
        self.reflow(Axis::Vertical);
    }

    /// Scroll the minimum amount needed to bring `target` fully into view.
    ///
    /// Scrolls up when the target starts above the visible range, down when
    /// it ends below it, and not at all when it is already visible. A target
    /// taller than the container is aligned by its top edge.
    pub fn scroll_to(&mut self, target: ElementBounds) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let geometry = host.geometry(Axis::Vertical);

        let max_scroll = target.top;
        let min_scroll = (target.top + target.height - geometry.container).min(max_scroll);
        let next = if geometry.offset > max_scroll {
            max_scroll
        } else if geometry.offset < min_scroll {
            min_scroll
        } else {
            return;
        };

        host.set_scroll_offset(Axis::Vertical, next);
        self.reflow(Axis::Vertical);
    }

    // ── Render data ──────────────────────────────────────────────────

    /// Style of the thumb of `axis`, or `None` when it is not shown.
    pub fn thumb_style(&self, axis: Axis) -> Option<ThumbStyle> {
        let state = self.axis(axis);
        if !state.active {
            return None;
        }
        Some(ThumbStyle {
            axis,
            pos: state.pos,
            size: state.size,
            highlighted: state.highlighted(),
            inverted: self.config.invert,
        })
    }

    /// Style of the inner element given the platform's native scrollbar width.
    pub fn inner_style(&self, native_scrollbar_width: f64) -> InnerStyle {
        InnerStyle {
            max_height: self.config.max_height.clone(),
            scroll_behaviour: self.config.scroll_behaviour,
            padding: HIDE_SCROLLBAR_OFFSET - native_scrollbar_width,
            margin: HIDE_SCROLLBAR_OFFSET,
        }
    }

    /// Inline style of the outer wrapper.
    pub fn wrapper_style(&self) -> String {
        match &self.config.max_width {
            Some(width) => format!("max-width: {width}"),
            None => String::new(),
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut ScrollAxisState {
        match axis {
            Axis::Vertical => &mut self.scroll_y,
            Axis::Horizontal => &mut self.scroll_x,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
