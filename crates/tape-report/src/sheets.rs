//! CSV sheet writers for one validation run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tape_model::{RuleCount, ValidationResult};

/// Write one sheet: a fixed header row, then serde-serialized records.
///
/// The header is written even when there are no records, so every sheet
/// opens as a table.
fn write_sheet<T: Serialize>(
    path: &Path,
    headers: &[&str],
    records: impl IntoIterator<Item = T>,
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(headers)
        .with_context(|| format!("write {}", path.display()))?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Issue-count leaderboard: rules that flagged at least one row, heaviest
/// first. The sort is stable so ties keep their rule-name order.
pub(crate) fn write_rule_summary(dir: &Path, result: &ValidationResult) -> Result<PathBuf> {
    let mut ranked: Vec<&RuleCount> = result
        .rule_summary
        .iter()
        .filter(|count| count.issue_count > 0)
        .collect();
    ranked.sort_by(|a, b| b.issue_count.cmp(&a.issue_count));
    let path = dir.join("rule_summary.csv");
    write_sheet(&path, &["rule", "issue_count"], ranked)?;
    Ok(path)
}

pub(crate) fn write_summary(dir: &Path, result: &ValidationResult) -> Result<PathBuf> {
    let metrics = [
        ("row_count", result.row_count as u64),
        ("issue_count", result.issue_count() as u64),
        ("warning_count", result.warning_count() as u64),
        ("executed_rules", result.executed_rule_count() as u64),
        ("skipped_rules", result.skipped_rule_count() as u64),
    ];
    let path = dir.join("summary.csv");
    write_sheet(&path, &["metric", "value"], metrics)?;
    Ok(path)
}

pub(crate) fn write_issues(dir: &Path, result: &ValidationResult) -> Result<PathBuf> {
    let path = dir.join("issues.csv");
    write_sheet(
        &path,
        &["rule", "row_index", "loan_number", "columns"],
        &result.issues,
    )?;
    Ok(path)
}

pub(crate) fn write_warnings(dir: &Path, result: &ValidationResult) -> Result<PathBuf> {
    let path = dir.join("warnings.csv");
    write_sheet(
        &path,
        &["rule", "row_index", "loan_number", "columns"],
        &result.warnings,
    )?;
    Ok(path)
}

pub(crate) fn write_missing_required_fields(
    dir: &Path,
    result: &ValidationResult,
) -> Result<PathBuf> {
    let path = dir.join("missing_required_fields.csv");
    write_sheet(
        &path,
        &["field", "loan_number"],
        &result.missing_required_fields,
    )?;
    Ok(path)
}

pub(crate) fn write_skipped_rules(dir: &Path, result: &ValidationResult) -> Result<PathBuf> {
    let path = dir.join("skipped_rules.csv");
    write_sheet(
        &path,
        &["rule", "reason", "missing_columns"],
        &result.skipped_rules,
    )?;
    Ok(path)
}
