//! Deployment policies that travel with the catalogue.
//!
//! Policies are read-only for the duration of a run. They carry the alias
//! table used during parameter resolution, the column lists feeding variadic
//! rules, the rules that tolerate unresolved parameters, the warning
//! allow-list, and the designation of the required-fields and loan-identifier
//! checks.

use std::collections::{BTreeMap, BTreeSet};

use tape_model::Severity;

#[derive(Debug, Clone)]
pub struct RulePolicies {
    aliases: BTreeMap<String, String>,
    varargs_columns: BTreeMap<String, Vec<String>>,
    allow_missing: BTreeSet<String>,
    warning_rules: BTreeSet<String>,
    required_fields_rule: Option<String>,
    loan_identifier: String,
}

impl Default for RulePolicies {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::new(),
            varargs_columns: BTreeMap::new(),
            allow_missing: BTreeSet::new(),
            warning_rules: BTreeSet::new(),
            required_fields_rule: None,
            loan_identifier: "loan_number".to_string(),
        }
    }
}

impl RulePolicies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute `column` for the parameter named `param` during resolution.
    pub fn with_alias(mut self, param: impl Into<String>, column: impl Into<String>) -> Self {
        self.aliases.insert(param.into(), column.into());
        self
    }

    /// Feed the variadic rule `rule` from the given columns, in order.
    pub fn with_varargs_columns<I, S>(mut self, rule: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.varargs_columns
            .insert(rule.into(), columns.into_iter().map(Into::into).collect());
        self
    }

    /// Let `rule` run even when some of its parameters do not resolve.
    pub fn with_allow_missing(mut self, rule: impl Into<String>) -> Self {
        self.allow_missing.insert(rule.into());
        self
    }

    /// Report `rule` findings as warnings instead of issues.
    pub fn with_warning(mut self, rule: impl Into<String>) -> Self {
        self.warning_rules.insert(rule.into());
        self
    }

    /// Designate the rule whose findings expand into per-field records.
    pub fn with_required_fields_rule(mut self, rule: impl Into<String>) -> Self {
        self.required_fields_rule = Some(rule.into());
        self
    }

    /// Column carrying the loan identifier attached to findings.
    pub fn with_loan_identifier(mut self, column: impl Into<String>) -> Self {
        self.loan_identifier = column.into();
        self
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    pub fn varargs_columns(&self, rule: &str) -> Option<&[String]> {
        self.varargs_columns.get(rule).map(Vec::as_slice)
    }

    pub fn allows_missing(&self, rule: &str) -> bool {
        self.allow_missing.contains(rule)
    }

    pub fn severity(&self, rule: &str) -> Severity {
        if self.warning_rules.contains(rule) {
            Severity::Warning
        } else {
            Severity::Issue
        }
    }

    pub fn is_required_fields_rule(&self, rule: &str) -> bool {
        self.required_fields_rule.as_deref() == Some(rule)
    }

    pub fn required_fields_rule(&self) -> Option<&str> {
        self.required_fields_rule.as_deref()
    }

    pub fn loan_identifier(&self) -> &str {
        &self.loan_identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_defaults_to_issue() {
        let policies = RulePolicies::new().with_warning("soft_check");
        assert_eq!(policies.severity("soft_check"), Severity::Warning);
        assert_eq!(policies.severity("hard_check"), Severity::Issue);
    }

    #[test]
    fn loan_identifier_defaults_to_loan_number() {
        assert_eq!(RulePolicies::new().loan_identifier(), "loan_number");
        let custom = RulePolicies::new().with_loan_identifier("account_id");
        assert_eq!(custom.loan_identifier(), "account_id");
    }

    #[test]
    fn varargs_columns_preserve_order() {
        let policies =
            RulePolicies::new().with_varargs_columns("incomes_check", ["wage", "other", "total"]);
        assert_eq!(
            policies.varargs_columns("incomes_check"),
            Some(["wage".to_string(), "other".to_string(), "total".to_string()].as_slice())
        );
        assert_eq!(policies.varargs_columns("unknown"), None);
    }
}
