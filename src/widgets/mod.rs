//! Built-in widgets: ScrollContainer.

pub mod scroll_container;

pub use scroll_container::{
    ElementBounds, InnerStyle, Length, ScrollBehaviour, ScrollContainer, ScrollContainerConfig, ThumbStyle,
};
