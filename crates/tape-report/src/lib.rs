//! Renders a validation result as a report directory.
//!
//! The directory holds one CSV sheet per table plus `report.json`, the full
//! result serialized for downstream tooling. Sheets mirror the result's
//! deterministic ordering, except `rule_summary.csv`, which ranks rules by
//! descending issue count so the worst offenders read first.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tape_model::ValidationResult;
use tracing::debug;

mod json;
mod sheets;

/// Write the full report directory, creating it if needed.
///
/// Returns the paths written, in sheet order.
pub fn write_report(result: &ValidationResult, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let paths = vec![
        sheets::write_rule_summary(dir, result)?,
        sheets::write_summary(dir, result)?,
        sheets::write_issues(dir, result)?,
        sheets::write_warnings(dir, result)?,
        sheets::write_missing_required_fields(dir, result)?,
        sheets::write_skipped_rules(dir, result)?,
        json::write_json(dir, result)?,
    ];
    debug!(dir = %dir.display(), sheets = paths.len(), "report written");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use tape_model::{
        Finding, MissingField, RuleCount, SkipReason, SkippedRule, ValidationResult,
    };

    use super::write_report;

    fn finding(rule: &str, row_index: usize, loan: &str, columns: &str) -> Finding {
        Finding {
            rule: rule.to_string(),
            row_index,
            loan_number: Some(loan.to_string()),
            columns: columns.to_string(),
        }
    }

    fn sample_result() -> ValidationResult {
        ValidationResult {
            row_count: 3,
            columns: vec!["Loan Number".into(), "State".into()],
            issues: vec![
                finding("blank_state", 1, "1002", "State"),
                finding("negative_amount", 1, "1002", "Amount"),
                finding("negative_amount", 2, "1003", "Amount"),
            ],
            warnings: vec![finding("negative_incomes", 1, "1002", "Wage Income")],
            missing_required_fields: vec![MissingField {
                field: "State".to_string(),
                loan_number: Some("1002".to_string()),
            }],
            rule_summary: vec![
                RuleCount {
                    rule: "blank_state".to_string(),
                    issue_count: 1,
                },
                RuleCount {
                    rule: "huge_amount".to_string(),
                    issue_count: 0,
                },
                RuleCount {
                    rule: "negative_amount".to_string(),
                    issue_count: 2,
                },
                RuleCount {
                    rule: "required_fields".to_string(),
                    issue_count: 1,
                },
            ],
            warning_summary: vec![RuleCount {
                rule: "negative_incomes".to_string(),
                issue_count: 1,
            }],
            skipped_rules: vec![SkippedRule {
                rule: "high_rate".to_string(),
                reason: SkipReason::MissingColumns,
                missing_columns: "interest_rate".to_string(),
            }],
        }
    }

    #[test]
    fn writes_every_sheet_and_the_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_report(&sample_result(), dir.path()).unwrap();
        let names: Vec<&str> = paths
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "rule_summary.csv",
                "summary.csv",
                "issues.csv",
                "warnings.csv",
                "missing_required_fields.csv",
                "skipped_rules.csv",
                "report.json",
            ],
        );
        for path in &paths {
            assert!(path.exists());
        }
    }

    #[test]
    fn rule_summary_keeps_only_nonzero_counts_sorted_descending() {
        let dir = tempfile::tempdir().unwrap();
        write_report(&sample_result(), dir.path()).unwrap();
        let sheet = std::fs::read_to_string(dir.path().join("rule_summary.csv")).unwrap();
        let lines: Vec<&str> = sheet.lines().collect();
        // ties on count keep rule-name order from the result
        assert_eq!(
            lines,
            vec![
                "rule,issue_count",
                "negative_amount,2",
                "blank_state,1",
                "required_fields,1",
            ],
        );
    }

    #[test]
    fn summary_sheet_reports_run_metrics() {
        let dir = tempfile::tempdir().unwrap();
        write_report(&sample_result(), dir.path()).unwrap();
        let sheet = std::fs::read_to_string(dir.path().join("summary.csv")).unwrap();
        let lines: Vec<&str> = sheet.lines().collect();
        assert_eq!(
            lines,
            vec![
                "metric,value",
                "row_count,3",
                "issue_count,3",
                "warning_count,1",
                "executed_rules,5",
                "skipped_rules,1",
            ],
        );
    }

    #[test]
    fn detail_sheets_write_headers_even_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_report(&ValidationResult::default(), dir.path()).unwrap();
        let sheet = std::fs::read_to_string(dir.path().join("issues.csv")).unwrap();
        assert_eq!(sheet.trim_end(), "rule,row_index,loan_number,columns");
    }

    #[test]
    fn skipped_sheet_spells_out_the_reason() {
        let dir = tempfile::tempdir().unwrap();
        write_report(&sample_result(), dir.path()).unwrap();
        let sheet = std::fs::read_to_string(dir.path().join("skipped_rules.csv")).unwrap();
        assert!(sheet.contains("high_rate,missing_columns,interest_rate"));
    }

    #[test]
    fn json_document_round_trips_the_result() {
        let dir = tempfile::tempdir().unwrap();
        write_report(&sample_result(), dir.path()).unwrap();
        let raw = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
        let document: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(document["generated_at"].is_string());
        assert_eq!(document["row_count"], 3);
        assert_eq!(document["issues"][0]["rule"], "blank_state");
        assert_eq!(document["skipped_rules"][0]["reason"], "missing_columns");
    }
}
