//! Rule descriptors and the ordered catalogue they form.
//!
//! A rule is a name, a parameter contract, and a pure predicate over one
//! row's cells. The contract is declared up front so the planner can decide
//! whether a rule is runnable before any row is touched; the predicate never
//! sees the tape, only the cells bound to its parameters.

use std::fmt;

use tape_model::CellValue;
use thiserror::Error;

/// Fault raised when a predicate cannot coerce a cell into the value it
/// needs. A fault is not a verdict; the evaluator records the offending row
/// as flagged so a malfunctioning check can never silently pass bad data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("{0} is not numeric")]
    NotNumeric(&'static str),
    #[error("{0} is not an integer")]
    NotInteger(&'static str),
    #[error("{0} is not a date")]
    NotDate(&'static str),
    #[error("{0} received the wrong number of arguments")]
    Arity(&'static str),
    #[error("{0} divides by zero")]
    DivisionByZero(&'static str),
}

/// Outcome of one predicate call: `Ok(true)` flags the row.
pub type RuleEval = Result<bool, EvalError>;

/// Per-row check over the cells bound to a rule's parameters, in declared
/// parameter order.
pub type Predicate = fn(&[&CellValue]) -> RuleEval;

/// Parameter contract of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSpec {
    /// A fixed list of named parameters, each resolved to one tape column.
    Fixed(&'static [&'static str]),
    /// One variadic parameter fed by a policy-supplied column list.
    Varargs(&'static str),
}

impl ParamSpec {
    /// Names declared by the contract; a varargs contract declares one.
    pub fn names(&self) -> &[&'static str] {
        match self {
            Self::Fixed(names) => names,
            Self::Varargs(name) => std::slice::from_ref(name),
        }
    }

    pub fn is_varargs(&self) -> bool {
        matches!(self, Self::Varargs(_))
    }
}

/// One catalogue entry: a named check plus its parameter contract.
#[derive(Clone)]
pub struct RuleDef {
    pub name: &'static str,
    pub params: ParamSpec,
    pub predicate: Predicate,
}

impl RuleDef {
    pub const fn fixed(
        name: &'static str,
        params: &'static [&'static str],
        predicate: Predicate,
    ) -> Self {
        Self {
            name,
            params: ParamSpec::Fixed(params),
            predicate,
        }
    }

    pub const fn varargs(name: &'static str, param: &'static str, predicate: Predicate) -> Self {
        Self {
            name,
            params: ParamSpec::Varargs(param),
            predicate,
        }
    }
}

impl fmt::Debug for RuleDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// The full catalogue, held in lexicographic name order so every run visits
/// rules in the same sequence regardless of registration order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RuleDef>,
}

impl RuleSet {
    pub fn new(mut rules: Vec<RuleDef>) -> Self {
        rules.sort_by_key(|rule| rule.name);
        Self { rules }
    }

    pub fn rules(&self) -> &[RuleDef] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RuleDef> {
        self.rules
            .binary_search_by(|rule| rule.name.cmp(name))
            .ok()
            .map(|index| &self.rules[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleDef> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RuleDef;
    type IntoIter = std::slice::Iter<'a, RuleDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
