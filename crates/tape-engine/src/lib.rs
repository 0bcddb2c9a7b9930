//! Execution engine for loan-tape validation.
//!
//! Ties a rule catalogue to a parsed tape: plans which rules can run against
//! the tape's columns, evaluates the runnable ones row by row with fault
//! containment, and aggregates findings into a deterministic result.

mod cancel;
mod engine;
mod evaluate;
mod plan;

pub use cancel::{CancelFlag, RunAborted};
pub use engine::Engine;
pub use plan::{Binding, BoundParam, ExecutionPlan, PlanEntry};
