//! Binds rule parameters to tape columns before anything runs.
//!
//! Planning walks the catalogue once and decides, per rule, whether it can
//! run against this tape and which concrete columns feed each parameter.
//! Rules whose columns cannot all be found are skipped with a recorded
//! reason rather than evaluated against garbage.

use tape_model::{SkipReason, Tape};
use tape_resolve::ColumnMaps;
use tape_rules::{ParamSpec, RuleDef, RulePolicies, RuleSet};

/// One rule parameter after planning: the name shown in reports and the tape
/// column backing it, when one resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundParam {
    pub display: String,
    pub column: Option<String>,
}

/// Planning outcome for a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Every parameter is accounted for; unresolved entries are tolerated
    /// only for rules the policies exempt, and evaluate as missing values.
    Runnable(Vec<BoundParam>),
    /// The rule will not run against this tape.
    Skipped {
        reason: SkipReason,
        missing_columns: Vec<String>,
    },
}

/// A catalogue rule paired with its binding decision.
#[derive(Debug, Clone)]
pub struct PlanEntry<'a> {
    pub rule: &'a RuleDef,
    pub binding: Binding,
}

/// Full execution plan for one tape.
#[derive(Debug, Clone)]
pub struct ExecutionPlan<'a> {
    entries: Vec<PlanEntry<'a>>,
    loan_column: Option<String>,
}

impl<'a> ExecutionPlan<'a> {
    /// Resolve every rule in the catalogue against the tape's headers.
    pub fn build(rules: &'a RuleSet, policies: &RulePolicies, tape: &Tape) -> Self {
        let maps = ColumnMaps::build(tape.columns());
        let loan_column = maps
            .resolve_column(policies.loan_identifier())
            .map(str::to_string);
        let entries = rules
            .iter()
            .map(|rule| PlanEntry {
                rule,
                binding: bind_rule(rule, policies, &maps),
            })
            .collect();
        Self {
            entries,
            loan_column,
        }
    }

    /// Rules in catalogue order, each with its binding.
    pub fn entries(&self) -> &[PlanEntry<'a>] {
        &self.entries
    }

    /// The tape column carrying loan identifiers, when one resolved.
    pub fn loan_column(&self) -> Option<&str> {
        self.loan_column.as_deref()
    }
}

fn bind_rule(rule: &RuleDef, policies: &RulePolicies, maps: &ColumnMaps) -> Binding {
    match rule.params {
        ParamSpec::Varargs(param) => bind_varargs(rule.name, param, policies, maps),
        ParamSpec::Fixed(params) => bind_fixed(rule, params, policies, maps),
    }
}

/// Varargs rules take their column list from policy configuration; without
/// one there is nothing to bind.
fn bind_varargs(
    rule: &'static str,
    param: &'static str,
    policies: &RulePolicies,
    maps: &ColumnMaps,
) -> Binding {
    let Some(columns) = policies.varargs_columns(rule) else {
        return Binding::Skipped {
            reason: SkipReason::MissingVarargsMapping,
            missing_columns: vec![param.to_string()],
        };
    };
    let mut bound = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();
    for column in columns {
        match maps.resolve_column(column) {
            Some(resolved) => bound.push(BoundParam {
                display: column.clone(),
                column: Some(resolved.to_string()),
            }),
            None => missing.push(column.clone()),
        }
    }
    if !missing.is_empty() {
        return Binding::Skipped {
            reason: SkipReason::MissingColumns,
            missing_columns: missing,
        };
    }
    Binding::Runnable(bound)
}

fn bind_fixed(
    rule: &RuleDef,
    params: &'static [&'static str],
    policies: &RulePolicies,
    maps: &ColumnMaps,
) -> Binding {
    let aliases = policies.aliases();
    let mut bound = Vec::with_capacity(params.len());
    let mut missing: Vec<String> = Vec::new();
    for param in params {
        // Reports name the column the rule was looking for, so aliased
        // parameters show their target column name, not the internal one.
        let display = aliases
            .get(*param)
            .cloned()
            .unwrap_or_else(|| (*param).to_string());
        let column = maps.resolve_param(param, aliases).map(str::to_string);
        if column.is_none() && !missing.contains(&display) {
            missing.push(display.clone());
        }
        bound.push(BoundParam { display, column });
    }
    let tolerated =
        policies.allows_missing(rule.name) || policies.is_required_fields_rule(rule.name);
    if !missing.is_empty() && !tolerated {
        return Binding::Skipped {
            reason: SkipReason::MissingColumns,
            missing_columns: missing,
        };
    }
    Binding::Runnable(bound)
}
