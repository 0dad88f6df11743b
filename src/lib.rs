//! # scrollkit
//!
//! Custom scrollbars over native scroll elements, and the polling helper that
//! browser automation uses to wait for UI state.
//!
//! The scroll engine never touches a DOM directly. It drives a
//! [`ScrollHost`](widget::ScrollHost), so the same geometry and drag logic
//! runs against a browser element, a terminal viewport, or the in-memory
//! [`HeadlessHost`](testing::HeadlessHost) in tests.
//!
//! ## Core Systems
//!
//! - **[`geometry`]** — Axis, Point, Rect primitives
//! - **[`event`]** — Pointer events (with crossterm conversions) and handler outcomes
//! - **[`widget`]** — Scroll axis state, thumb math, host and observer traits
//! - **[`widgets`]** — `ScrollContainer`: reflow, drag, wheel, hover, programmatic scrolling
//! - **[`testing`]** — `Waiter` polling loop, CI environment detection, headless host

// Foundation
pub mod geometry;

// Events
pub mod event;

// Widget system
pub mod widget;
pub mod widgets;

// Test automation
pub mod testing;
