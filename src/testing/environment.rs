//! Process environment seen by test automation.
//!
//! [`CiEnvironment`] answers whether the process runs under a CI build agent.
//! [`FirstWaitFlag`] is the one-shot switch that lets exactly one wait per
//! process get a longer timeout there: the first wait of a run usually pays
//! for browser start-up and page compilation.

use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable set by TeamCity build agents.
pub const TEAMCITY_VERSION_VAR: &str = "TEAMCITY_VERSION";

// ---------------------------------------------------------------------------
// CiEnvironment
// ---------------------------------------------------------------------------

/// Detects a continuous-integration environment.
pub trait CiEnvironment: Send + Sync {
    fn is_ci(&self) -> bool;
}

/// Detects TeamCity by its agent environment variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamCity;

impl CiEnvironment for TeamCity {
    fn is_ci(&self) -> bool {
        std::env::var_os(TEAMCITY_VERSION_VAR).is_some()
    }
}

/// A fixed answer, for hosts that detect CI themselves and for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedEnvironment(pub bool);

impl CiEnvironment for FixedEnvironment {
    fn is_ci(&self) -> bool {
        self.0
    }
}

// ---------------------------------------------------------------------------
// FirstWaitFlag
// ---------------------------------------------------------------------------

/// A flag that can be consumed once.
///
/// Share one instance (behind an `Arc`) between every waiter of a process.
#[derive(Debug, Default)]
pub struct FirstWaitFlag {
    consumed: AtomicBool,
}

impl FirstWaitFlag {
    /// Create an unconsumed flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the flag. Returns `true` only for the first call.
    pub fn consume_once(&self) -> bool {
        !self.consumed.swap(true, Ordering::Relaxed)
    }

    /// Whether the flag has been consumed.
    pub fn is_consumed(&self) -> bool {
        self.consumed.load(Ordering::Relaxed)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_fires_once() {
        let flag = FirstWaitFlag::new();
        assert!(!flag.is_consumed());
        assert!(flag.consume_once());
        assert!(flag.is_consumed());
        assert!(!flag.consume_once());
        assert!(!flag.consume_once());
    }

    #[test]
    fn flag_fires_once_across_threads() {
        let flag = std::sync::Arc::new(FirstWaitFlag::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let flag = flag.clone();
                std::thread::spawn(move || flag.consume_once())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap_or(false))
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn fixed_environment() {
        assert!(FixedEnvironment(true).is_ci());
        assert!(!FixedEnvironment(false).is_ci());
    }
}
