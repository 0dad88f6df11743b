//! Testing support: the polling waiter used by browser automation, and a
//! headless scroll host for driving widgets without a browser.
//!
//! Use the [`Waiter`] to block a test until the page reaches a state. Use
//! [`HeadlessHost`] with a [`RecordingObserver`] to exercise a
//! [`ScrollContainer`](crate::widgets::ScrollContainer) end to end.

pub mod environment;
pub mod headless;
pub mod waiter;

pub use environment::{CiEnvironment, FirstWaitFlag, FixedEnvironment, TeamCity};
pub use headless::{HeadlessHost, Notification, RecordingObserver};
pub use waiter::{FailureReporter, PanicReporter, WaitError, Waited, Waiter, WaiterConfig};
