use serde::{Deserialize, Serialize};

/// Rule classification. Issues block tape acceptance; warnings are
/// informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Issue,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Issue => "issue",
            Severity::Warning => "warning",
        }
    }
}

/// Why a rule was excluded from execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Required tape columns could not be resolved (schema problem).
    MissingColumns,
    /// A variable-arity rule has no configured field list (catalogue
    /// configuration problem).
    MissingVarargsMapping,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingColumns => "missing_columns",
            SkipReason::MissingVarargsMapping => "missing_varargs_mapping",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flagged row for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: String,
    pub row_index: usize,
    /// Loan identifier for the row, when the loan-number column resolved.
    pub loan_number: Option<String>,
    /// Resolved columns the rule read, comma-joined for display.
    pub columns: String,
}

/// One blank required field on one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingField {
    pub field: String,
    pub loan_number: Option<String>,
}

/// Per-rule flagged-row count. Zero counts are kept so a clean rule is
/// distinguishable from a skipped one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCount {
    pub rule: String,
    pub issue_count: u64,
}

/// A rule excluded at planning time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRule {
    pub rule: String,
    pub reason: SkipReason,
    /// Unresolved names, comma-joined in declared parameter order.
    pub missing_columns: String,
}

/// The complete outcome of one validation run. Summary sequences are
/// sorted by rule name; detail sequences are in (rule, row) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub row_count: usize,
    pub columns: Vec<String>,
    pub issues: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub missing_required_fields: Vec<MissingField>,
    pub rule_summary: Vec<RuleCount>,
    pub warning_summary: Vec<RuleCount>,
    pub skipped_rules: Vec<SkippedRule>,
}

impl ValidationResult {
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Rules that actually ran, either bucket.
    pub fn executed_rule_count(&self) -> usize {
        self.rule_summary.len() + self.warning_summary.len()
    }

    pub fn skipped_rule_count(&self) -> usize {
        self.skipped_rules.len()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_counts() {
        let result = ValidationResult {
            row_count: 3,
            issues: vec![Finding {
                rule: "state".to_string(),
                row_index: 1,
                loan_number: Some("1002".to_string()),
                columns: "State".to_string(),
            }],
            rule_summary: vec![RuleCount {
                rule: "state".to_string(),
                issue_count: 1,
            }],
            warning_summary: vec![RuleCount {
                rule: "negative_incomes".to_string(),
                issue_count: 0,
            }],
            ..ValidationResult::default()
        };
        assert_eq!(result.issue_count(), 1);
        assert_eq!(result.warning_count(), 0);
        assert_eq!(result.executed_rule_count(), 2);
        assert!(result.has_issues());
    }

    #[test]
    fn skip_reason_serializes_snake_case() {
        let json = serde_json::to_string(&SkipReason::MissingVarargsMapping).unwrap();
        assert_eq!(json, "\"missing_varargs_mapping\"");
        assert_eq!(SkipReason::MissingColumns.to_string(), "missing_columns");
    }
}
