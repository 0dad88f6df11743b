//! Waiter: poll a condition until it holds or a deadline passes.
//!
//! Browser-driving tests cannot observe "the page is ready" directly, so they
//! re-check a predicate on a fixed interval. The [`Waiter`] does that on the
//! calling thread (or, with [`Waiter::wait_async`], on a tokio task) and hands
//! timeouts to a caller-supplied failure hook instead of deciding pass/fail
//! itself.
//!
//! Predicate errors are retried, except [`WaitError::StaleReference`]: the
//! element the predicate inspects is gone, and polling again cannot bring it
//! back.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::environment::{CiEnvironment, FirstWaitFlag, TeamCity};

/// Timeout used when a call does not specify one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Pause between predicate attempts.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Multiplier applied to the first wait of a process under CI.
pub const FIRST_TIMEOUT_FACTOR: u32 = 3;

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// Errors a predicate can raise.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// The inspected element no longer exists. Never retried.
    #[error("stale element reference: {0}")]
    StaleReference(String),
    /// A transient failure described by a message.
    #[error("{0}")]
    Predicate(String),
    /// Any other transient failure.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl WaitError {
    /// Whether this error aborts the wait immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WaitError::StaleReference(_))
    }
}

/// How a wait ended when it did not abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waited {
    /// The predicate held.
    Satisfied,
    /// The deadline passed; the failure hook has been invoked.
    TimedOut,
}

// ---------------------------------------------------------------------------
// FailureReporter
// ---------------------------------------------------------------------------

/// Surfaces a timed-out wait as a test failure.
pub trait FailureReporter {
    fn fail(&self, message: String);
}

/// Fails the current test by panicking, which is how the Rust test harness
/// records a failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl FailureReporter for PanicReporter {
    fn fail(&self, message: String) {
        panic!("{message}");
    }
}

impl<F: Fn(String)> FailureReporter for F {
    fn fail(&self, message: String) {
        self(message)
    }
}

// ---------------------------------------------------------------------------
// WaiterConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Waiter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaiterConfig {
    /// Timeout for calls that pass `None`.
    pub default_timeout: Duration,
    /// Pause between attempts.
    pub poll_interval: Duration,
    /// Multiplier for the first wait under CI.
    pub first_timeout_factor: u32,
}

impl Default for WaiterConfig {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT,
            poll_interval: POLL_INTERVAL,
            first_timeout_factor: FIRST_TIMEOUT_FACTOR,
        }
    }
}

impl WaiterConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default timeout (builder).
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set the poll interval (builder).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the first-wait multiplier (builder).
    pub fn with_first_timeout_factor(mut self, factor: u32) -> Self {
        self.first_timeout_factor = factor;
        self
    }
}

// ---------------------------------------------------------------------------
// Waiter
// ---------------------------------------------------------------------------

enum Poll {
    Satisfied,
    TimedOut(Option<WaitError>),
}

/// Handles one attempt's result. `Some` ends the loop.
fn settle(result: Result<bool, WaitError>, last_error: &mut Option<WaitError>) -> Option<Result<Poll, WaitError>> {
    match result {
        Ok(true) => Some(Ok(Poll::Satisfied)),
        Ok(false) => None,
        Err(err) if err.is_fatal() => Some(Err(err)),
        Err(err) => {
            log::trace!("waiter: predicate failed, retrying: {err}");
            *last_error = Some(err);
            None
        }
    }
}

/// Polls predicates with a bounded deadline.
///
/// # Examples
///
/// ```ignore
/// use std::sync::Arc;
/// use std::time::Duration;
/// use scrollkit::testing::{FirstWaitFlag, PanicReporter, Waiter};
///
/// // One flag for the whole test run, shared by every waiter.
/// let first_wait = Arc::new(FirstWaitFlag::new());
/// let waiter = Waiter::from_env(first_wait.clone());
/// waiter.wait_until(|| page.is_loaded(), "load page", "", Some(Duration::from_secs(5)), &PanicReporter);
/// ```
#[derive(Clone)]
pub struct Waiter {
    config: WaiterConfig,
    environment: Arc<dyn CiEnvironment>,
    first_wait: Arc<FirstWaitFlag>,
}

impl std::fmt::Debug for Waiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Waiter")
            .field("config", &self.config)
            .field("first_wait", &self.first_wait)
            .finish_non_exhaustive()
    }
}

impl Waiter {
    /// Create a waiter. Every waiter of a process should share `first_wait`.
    pub fn new(config: WaiterConfig, environment: Arc<dyn CiEnvironment>, first_wait: Arc<FirstWaitFlag>) -> Self {
        Self { config, environment, first_wait }
    }

    /// A waiter with default config that detects TeamCity.
    ///
    /// `first_wait` must be the flag shared by every waiter of the run, or the
    /// first-call inflation is granted once per waiter instead of once per run.
    pub fn from_env(first_wait: Arc<FirstWaitFlag>) -> Self {
        Self::new(WaiterConfig::default(), Arc::new(TeamCity), first_wait)
    }

    pub fn config(&self) -> &WaiterConfig {
        &self.config
    }

    /// The timeout a call will actually use.
    ///
    /// Under CI the first call of the process (across every waiter sharing
    /// the flag) is multiplied by the configured factor. Consumes the flag.
    fn effective_timeout(&self, timeout: Option<Duration>) -> Duration {
        let timeout = timeout.unwrap_or(self.config.default_timeout);
        if !self.environment.is_ci() || !self.first_wait.consume_once() {
            return timeout;
        }
        let inflated = timeout.saturating_mul(self.config.first_timeout_factor);
        log::debug!(
            "waiter: first wait under CI, timeout raised from {} ms to {} ms",
            timeout.as_millis(),
            inflated.as_millis()
        );
        inflated
    }

    /// Poll until the deadline: attempt, check the deadline, sleep.
    fn poll<P>(&self, mut predicate: P, timeout: Duration) -> Result<Poll, WaitError>
    where
        P: FnMut() -> Result<bool, WaitError>,
    {
        let stopwatch = Instant::now();
        let mut last_error = None;
        loop {
            if let Some(done) = settle(predicate(), &mut last_error) {
                return done;
            }
            if stopwatch.elapsed() >= timeout {
                return Ok(Poll::TimedOut(last_error));
            }
            thread::sleep(self.config.poll_interval);
        }
    }

    /// Block until `predicate` returns `Ok(true)`.
    ///
    /// Transient errors are retried and the last one is passed to
    /// `on_timeout` if the deadline passes. A [`WaitError::StaleReference`]
    /// is returned at once, without sleeping or retrying.
    pub fn wait<P, F>(&self, predicate: P, timeout: Option<Duration>, on_timeout: F) -> Result<Waited, WaitError>
    where
        P: FnMut() -> Result<bool, WaitError>,
        F: FnOnce(Option<WaitError>),
    {
        let timeout = self.effective_timeout(timeout);
        match self.poll(predicate, timeout)? {
            Poll::Satisfied => Ok(Waited::Satisfied),
            Poll::TimedOut(last_error) => {
                log::warn!("waiter: condition not met within {} ms", timeout.as_millis());
                on_timeout(last_error);
                Ok(Waited::TimedOut)
            }
        }
    }

    /// Block until `predicate` returns `true`, reporting a timeout as
    /// "action `description` did not complete".
    ///
    /// The predicate cannot fail; `false` is the only failure signal.
    pub fn wait_until<P>(
        &self,
        mut predicate: P,
        description: &str,
        actual_text: &str,
        timeout: Option<Duration>,
        reporter: &dyn FailureReporter,
    ) -> Waited
    where
        P: FnMut() -> bool,
    {
        let timeout = self.effective_timeout(timeout);
        match self.poll(|| Ok(predicate()), timeout) {
            Ok(Poll::Satisfied) => Waited::Satisfied,
            Ok(Poll::TimedOut(_)) | Err(_) => {
                let message = format!(
                    "action {description} did not complete within {} ms. {actual_text}",
                    timeout.as_millis()
                );
                log::warn!("waiter: {message}");
                reporter.fail(message.trim_end().to_owned());
                Waited::TimedOut
            }
        }
    }

    /// Like [`wait`](Self::wait), but builds the failure message from the
    /// effective timeout in milliseconds and the last predicate error.
    pub fn wait_described<P, D>(
        &self,
        predicate: P,
        describe: D,
        timeout: Option<Duration>,
        reporter: &dyn FailureReporter,
    ) -> Result<Waited, WaitError>
    where
        P: FnMut() -> Result<bool, WaitError>,
        D: FnOnce(u128, Option<&WaitError>) -> String,
    {
        let timeout = self.effective_timeout(timeout);
        match self.poll(predicate, timeout)? {
            Poll::Satisfied => Ok(Waited::Satisfied),
            Poll::TimedOut(last_error) => {
                let message = describe(timeout.as_millis(), last_error.as_ref());
                log::warn!("waiter: {message}");
                reporter.fail(message);
                Ok(Waited::TimedOut)
            }
        }
    }

    /// The async form of [`wait`](Self::wait): sleeps with tokio instead of
    /// blocking the thread.
    pub async fn wait_async<P, F>(
        &self,
        mut predicate: P,
        timeout: Option<Duration>,
        on_timeout: F,
    ) -> Result<Waited, WaitError>
    where
        P: FnMut() -> Result<bool, WaitError>,
        F: FnOnce(Option<WaitError>),
    {
        let timeout = self.effective_timeout(timeout);
        let stopwatch = tokio::time::Instant::now();
        let mut last_error = None;
        loop {
            if let Some(done) = settle(predicate(), &mut last_error) {
                return done.map(|_| Waited::Satisfied);
            }
            if stopwatch.elapsed() >= timeout {
                break;
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
        log::warn!("waiter: condition not met within {} ms", timeout.as_millis());
        on_timeout(last_error);
        Ok(Waited::TimedOut)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
