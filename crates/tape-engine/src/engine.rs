//! Orchestrates a full validation run: plan, evaluate, aggregate.

use tape_model::{RuleCount, Severity, SkippedRule, Tape, ValidationResult};
use tape_rules::{RulePolicies, RuleSet};
use tracing::debug;

use crate::cancel::{CancelFlag, RunAborted};
use crate::evaluate::{evaluate_required_fields, evaluate_rule};
use crate::plan::{Binding, ExecutionPlan};

/// Drives a rule catalogue over parsed tapes.
///
/// The engine owns its catalogue and policies so one instance can validate
/// any number of tapes; each run re-plans against that tape's headers.
pub struct Engine {
    rules: RuleSet,
    policies: RulePolicies,
    cancel: CancelFlag,
}

impl Engine {
    pub fn new(rules: RuleSet, policies: RulePolicies) -> Self {
        Self {
            rules,
            policies,
            cancel: CancelFlag::new(),
        }
    }

    /// Use an externally held cancel flag instead of the engine's own.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn policies(&self) -> &RulePolicies {
        &self.policies
    }

    /// Validate one tape.
    ///
    /// Every catalogue rule lands in exactly one of the result's summary
    /// tables: executed rules keep a count row even at zero findings, and
    /// rules that could not run are recorded as skipped with their reason.
    pub fn run(&self, tape: &Tape) -> Result<ValidationResult, RunAborted> {
        let plan = ExecutionPlan::build(&self.rules, &self.policies, tape);
        let mut result = ValidationResult {
            row_count: tape.row_count(),
            columns: tape.columns().to_vec(),
            ..ValidationResult::default()
        };
        for entry in plan.entries() {
            if self.cancel.is_cancelled() {
                debug!(rule = entry.rule.name, "cancelled before rule");
                return Err(RunAborted);
            }
            let params = match &entry.binding {
                Binding::Skipped {
                    reason,
                    missing_columns,
                } => {
                    debug!(
                        rule = entry.rule.name,
                        reason = reason.as_str(),
                        missing = missing_columns.join(", "),
                        "rule skipped"
                    );
                    result.skipped_rules.push(SkippedRule {
                        rule: entry.rule.name.to_string(),
                        reason: *reason,
                        missing_columns: missing_columns.join(", "),
                    });
                    continue;
                }
                Binding::Runnable(params) => params,
            };
            let required = self.policies.is_required_fields_rule(entry.rule.name)
                && !entry.rule.params.is_varargs();
            let count = if required {
                let records = evaluate_required_fields(params, tape, plan.loan_column());
                let count = records.len() as u64;
                result.missing_required_fields.extend(records);
                count
            } else {
                let findings = evaluate_rule(entry.rule, params, tape, plan.loan_column());
                let count = findings.len() as u64;
                match self.policies.severity(entry.rule.name) {
                    Severity::Issue => result.issues.extend(findings),
                    Severity::Warning => result.warnings.extend(findings),
                }
                count
            };
            let summary = RuleCount {
                rule: entry.rule.name.to_string(),
                issue_count: count,
            };
            match self.policies.severity(entry.rule.name) {
                Severity::Issue => result.rule_summary.push(summary),
                Severity::Warning => result.warning_summary.push(summary),
            }
        }
        // The catalogue already iterates in name order; sorting keeps the
        // output stable even if a caller assembled an unsorted rule set.
        result.rule_summary.sort_by(|a, b| a.rule.cmp(&b.rule));
        result.warning_summary.sort_by(|a, b| a.rule.cmp(&b.rule));
        result.skipped_rules.sort_by(|a, b| a.rule.cmp(&b.rule));
        if result.skipped_rules.is_empty() {
            debug!("all validation rules resolved to input columns");
        }
        debug!(
            rows = result.row_count,
            issues = result.issue_count(),
            warnings = result.warning_count(),
            skipped = result.skipped_rule_count(),
            "validation run complete"
        );
        Ok(result)
    }
}
