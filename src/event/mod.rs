//! Event system: pointer input and handler outcomes.

pub mod input;

pub use input::{EventOutcome, PointerAction, PointerButton, PointerEvent};
