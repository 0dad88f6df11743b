//! Widget building blocks: scroll axis state and host capabilities.

pub mod host;
pub mod scroll;

pub use host::{NoopObserver, ScrollHost, ScrollObserver};
pub use scroll::{AxisGeometry, ScrollAxisState, ScrollState, HIDE_SCROLLBAR_OFFSET, MIN_SCROLL_SIZE};
