//! Rule catalogue for loan-tape validation.
//!
//! The crate splits into three layers. [`descriptor`] defines what a rule is:
//! a name, a parameter contract, and a per-row predicate. [`predicates`]
//! holds the predicate bodies, grouped by subject. [`policy`] carries the
//! deployment knobs the execution engine reads: alias substitutions, warning
//! and tolerance lists, and the variadic column feeds. [`catalog`] assembles
//! the built-in set of all three.

pub mod catalog;
pub mod descriptor;
pub mod policy;
pub mod predicates;
mod support;

pub use catalog::{ARM_FIELDS, REQUIRED_FIELDS, catalog, default_policies};
pub use descriptor::{EvalError, ParamSpec, Predicate, RuleDef, RuleEval, RuleSet};
pub use policy::RulePolicies;
