//! Per-row predicates, grouped by the slice of the tape they inspect.
//!
//! Every function here has the same shape: it receives the cells bound to its
//! declared parameters, in order, and answers whether the row should be
//! flagged. Coercion faults bubble up as [`EvalError`](crate::EvalError) and
//! are contained by the caller, which treats a faulting row as flagged.

pub mod amounts;
pub mod arm;
pub mod credit;
pub mod dates;
pub mod income;
pub mod loan;
pub mod property;
pub mod required;
