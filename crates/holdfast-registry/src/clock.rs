//! # Registry Clock
//!
//! Creation timestamps come from an external time source, so the registry
//! takes its clock as a trait object rather than calling `Utc::now`
//! directly. [`SystemClock`] is the production implementation;
//! [`FixedClock`] makes tests deterministic.

use chrono::{DateTime, Utc};

/// Time source for anchor creation timestamps.
pub trait Clock: Send + Sync {
    /// Current time. Expected to be monotonic enough for record-keeping;
    /// the registry never compares or orders timestamps itself.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a single instant.
///
/// For tests and replay tooling that need reproducible timestamps.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
