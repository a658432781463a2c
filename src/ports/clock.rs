//! Clock port.
//!
//! Time-dependent work (the auto-delete sweeper) reads the current instant
//! through this trait so tests can control it.

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}
