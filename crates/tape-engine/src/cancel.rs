//! Cooperative cancellation for long validation runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

/// Shared stop signal checked between rules.
///
/// Clones observe the same flag, so a caller can hand one clone to the engine
/// and trip the other from a signal handler or UI thread.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the run to stop before its next rule.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The run observed its cancel flag and stopped; partial results are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("validation run aborted by cancellation")]
pub struct RunAborted;
