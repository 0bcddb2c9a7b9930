//! Row-by-row rule evaluation with fault containment.
//!
//! A predicate that returns an error for a row does not stop the run and
//! does not silently pass: the row is counted as flagged and the fault is
//! logged. Unresolved parameters of exempted rules evaluate as missing
//! cells.

use tape_model::{CellValue, Finding, MissingField, Tape};
use tape_rules::RuleDef;
use tracing::debug;

use crate::plan::BoundParam;

const MISSING: CellValue = CellValue::Missing;

/// Tape columns backing each bound parameter, fetched once per rule.
struct ColumnView<'t> {
    columns: Vec<Option<&'t [CellValue]>>,
    loans: Option<&'t [CellValue]>,
}

impl<'t> ColumnView<'t> {
    fn new(params: &[BoundParam], tape: &'t Tape, loan_column: Option<&str>) -> Self {
        let columns = params
            .iter()
            .map(|param| param.column.as_deref().and_then(|name| tape.column(name)))
            .collect();
        let loans = loan_column.and_then(|name| tape.column(name));
        Self { columns, loans }
    }

    fn args(&self, row: usize) -> Vec<&'t CellValue> {
        self.columns
            .iter()
            .map(|column| column.and_then(|cells| cells.get(row)).unwrap_or(&MISSING))
            .collect()
    }

    fn loan_number(&self, row: usize) -> Option<String> {
        self.loans
            .and_then(|cells| cells.get(row))
            .map(CellValue::display)
    }
}

/// The comma-joined resolved column list shown on every finding a rule emits.
fn columns_label(params: &[BoundParam]) -> String {
    params
        .iter()
        .filter_map(|param| param.column.as_deref())
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_flagged(rule: &RuleDef, args: &[&CellValue], row: usize) -> bool {
    match (rule.predicate)(args) {
        Ok(flagged) => flagged,
        Err(error) => {
            debug!(rule = rule.name, row, %error, "rule faulted on row; counting it as flagged");
            true
        }
    }
}

/// Run one rule over every row and collect a finding per flagged row.
pub fn evaluate_rule(
    rule: &RuleDef,
    params: &[BoundParam],
    tape: &Tape,
    loan_column: Option<&str>,
) -> Vec<Finding> {
    let view = ColumnView::new(params, tape, loan_column);
    let columns = columns_label(params);
    let mut findings = Vec::new();
    for row in 0..tape.row_count() {
        let args = view.args(row);
        if row_flagged(rule, &args, row) {
            findings.push(Finding {
                rule: rule.name.to_string(),
                row_index: row,
                loan_number: view.loan_number(row),
                columns: columns.clone(),
            });
        }
    }
    findings
}

/// Audit the required-field parameters directly: one record per (row, blank
/// field) pair, naming the resolved column when there is one. The rule's
/// predicate is not consulted; blankness is the whole check.
pub fn evaluate_required_fields(
    params: &[BoundParam],
    tape: &Tape,
    loan_column: Option<&str>,
) -> Vec<MissingField> {
    let view = ColumnView::new(params, tape, loan_column);
    let labels: Vec<&str> = params
        .iter()
        .map(|param| param.column.as_deref().unwrap_or(&param.display))
        .collect();
    let mut records = Vec::new();
    for row in 0..tape.row_count() {
        let args = view.args(row);
        let mut loan_number = None;
        for (label, arg) in labels.iter().zip(&args) {
            if arg.is_blank() {
                records.push(MissingField {
                    field: (*label).to_string(),
                    loan_number: loan_number
                        .get_or_insert_with(|| view.loan_number(row))
                        .clone(),
                });
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use tape_model::{CellValue, Tape};
    use tape_rules::{EvalError, RuleDef, RuleEval};

    use super::{evaluate_required_fields, evaluate_rule};
    use crate::plan::BoundParam;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn number(value: f64) -> CellValue {
        CellValue::Number(value)
    }

    fn bound(display: &str, column: Option<&str>) -> BoundParam {
        BoundParam {
            display: display.to_string(),
            column: column.map(str::to_string),
        }
    }

    fn negative(args: &[&CellValue]) -> RuleEval {
        let [amount] = args else {
            return Err(EvalError::Arity("negative"));
        };
        match amount.as_f64() {
            Some(value) => Ok(value < 0.0),
            None if amount.is_blank() => Ok(false),
            None => Err(EvalError::NotNumeric("amount")),
        }
    }

    fn any_blank(args: &[&CellValue]) -> RuleEval {
        Ok(args.iter().any(|arg| arg.is_blank()))
    }

    fn tape() -> Tape {
        Tape::from_rows(
            vec!["Loan Number".into(), "Amount".into(), "State".into()],
            vec![
                vec![text("1001"), number(-5.0), text("CA")],
                vec![text("1002"), text("garbage"), CellValue::Missing],
                vec![text("1003"), number(10.0), text("TX")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn flags_and_faults_both_produce_findings() {
        let tape = tape();
        let rule = RuleDef::fixed("negative", &["amount"], negative);
        let params = vec![bound("amount", Some("Amount"))];
        let findings = evaluate_rule(&rule, &params, &tape, Some("Loan Number"));
        let rows: Vec<usize> = findings.iter().map(|f| f.row_index).collect();
        assert_eq!(rows, vec![0, 1]);
        assert_eq!(findings[0].loan_number.as_deref(), Some("1001"));
        assert_eq!(findings[0].columns, "Amount");
    }

    #[test]
    fn unresolved_param_evaluates_as_missing() {
        let tape = tape();
        let rule = RuleDef::fixed("blanks", &["amount", "gross_margin"], any_blank);
        let params = vec![
            bound("amount", Some("Amount")),
            bound("gross_margin", None),
        ];
        let findings = evaluate_rule(&rule, &params, &tape, None);
        // every row has the placeholder blank, so every row is flagged
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].loan_number, None);
        assert_eq!(findings[0].columns, "Amount");
    }

    #[test]
    fn required_fields_expand_per_blank_field() {
        let tape = tape();
        let params = vec![
            bound("state", Some("State")),
            bound("gross_margin", None),
        ];
        let records = evaluate_required_fields(&params, &tape, Some("Loan Number"));
        // rows 0 and 2 miss only the placeholder; row 1 misses both fields
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].field, "gross_margin");
        assert_eq!(records[0].loan_number.as_deref(), Some("1001"));
        assert_eq!(records[1].field, "State");
        assert_eq!(records[1].loan_number.as_deref(), Some("1002"));
        assert_eq!(records[2].field, "gross_margin");
        assert_eq!(records[2].loan_number.as_deref(), Some("1002"));
        assert_eq!(records[3].field, "gross_margin");
        assert_eq!(records[3].loan_number.as_deref(), Some("1003"));
    }
}
