//! Terminal summary tables for a validation run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tape_model::{RuleCount, Severity, ValidationResult};

use crate::commands::RunOutcome;

/// How many flagged rules the terminal shows; the full list is in the report.
const TOP_RULES: usize = 10;

pub fn print_summary(outcome: &RunOutcome) {
    println!("Tape: {}", outcome.tape_path.display());
    println!("Report: {}", outcome.report_dir.display());
    let result = &outcome.result;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows"), Cell::new(result.row_count)]);
    table.add_row(vec![
        Cell::new("Issues"),
        count_cell(result.issue_count() as u64, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Warnings"),
        count_cell(result.warning_count() as u64, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Rules executed"),
        Cell::new(result.executed_rule_count()),
    ]);
    table.add_row(vec![
        Cell::new("Rules skipped"),
        count_cell(result.skipped_rule_count() as u64, Color::Yellow),
    ]);
    println!("{table}");
    print_top_rules(result);
}

/// Rules that flagged at least one row, heaviest first.
fn print_top_rules(result: &ValidationResult) {
    let mut ranked: Vec<(&RuleCount, Severity)> = result
        .rule_summary
        .iter()
        .map(|count| (count, Severity::Issue))
        .chain(
            result
                .warning_summary
                .iter()
                .map(|count| (count, Severity::Warning)),
        )
        .filter(|(count, _)| count.issue_count > 0)
        .collect();
    if ranked.is_empty() {
        return;
    }
    ranked.sort_by(|a, b| b.0.issue_count.cmp(&a.0.issue_count));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Severity"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (count, severity) in ranked.iter().take(TOP_RULES) {
        table.add_row(vec![
            Cell::new(&count.rule),
            severity_cell(*severity),
            count_cell(count.issue_count, severity_color(*severity)),
        ]);
    }
    println!();
    println!("Flagged rules:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: u64, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(value).fg(Color::DarkGrey)
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Issue => Cell::new("ISSUE").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Issue => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}
