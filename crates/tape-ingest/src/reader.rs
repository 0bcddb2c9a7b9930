//! CSV parsing and cell typing.
//!
//! Cells are typed independently: blank, number, date, boolean, then text in
//! that order. Currency and percentage strings are left as text; predicates
//! decide what to make of them. Rows without a loan number never reach the
//! engine, matching how tapes circulate with trailing junk rows.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tape_model::{CellValue, Tape};
use tracing::debug;

use crate::error::IngestError;

/// The literal header that identifies loan rows. Rows with a blank cell in
/// this column are dropped before validation.
const LOAN_NUMBER_HEADER: &str = "Loan Number";

/// Load a tape from a CSV file on disk.
pub fn load_tape(path: impl AsRef<Path>) -> Result<Tape, IngestError> {
    let reader = ReaderBuilder::new().from_path(path.as_ref())?;
    read_tape_from(reader)
}

/// Load a tape from any reader producing CSV text.
pub fn read_tape<R: Read>(input: R) -> Result<Tape, IngestError> {
    read_tape_from(ReaderBuilder::new().from_reader(input))
}

fn read_tape_from<R: Read>(mut reader: csv::Reader<R>) -> Result<Tape, IngestError> {
    let headers = reader.headers()?.clone();
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let header = if index == 0 {
                header.strip_prefix('\u{feff}').unwrap_or(header)
            } else {
                header
            };
            header.trim().to_string()
        })
        .collect();
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyTape);
    }

    let loan_index = columns
        .iter()
        .position(|column| column == LOAN_NUMBER_HEADER);
    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let record = record?;
        let cells: Vec<CellValue> = record.iter().map(type_cell).collect();
        if let Some(index) = loan_index
            && cells.get(index).is_none_or(CellValue::is_blank)
        {
            dropped += 1;
            continue;
        }
        rows.push(cells);
    }
    if dropped > 0 {
        debug!(dropped, "dropped rows with a blank loan number");
    }
    Ok(Tape::from_rows(columns, rows)?)
}

/// Type one raw cell. Numbers win over dates, so compact codes like
/// `20240131` stay numeric and get read as dates lazily when a rule asks.
fn type_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        return CellValue::Number(number);
    }
    let text = CellValue::Text(trimmed.to_string());
    if let Some(date) = text.as_date() {
        return CellValue::Date(date);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }
    text
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use chrono::NaiveDate;
    use tape_model::CellValue;

    use super::{load_tape, read_tape, type_cell};
    use crate::error::IngestError;

    #[test]
    fn types_cells_by_content() {
        assert_eq!(type_cell(""), CellValue::Missing);
        assert_eq!(type_cell("   "), CellValue::Missing);
        assert_eq!(type_cell(" 42 "), CellValue::Number(42.0));
        assert_eq!(type_cell("-3.5e2"), CellValue::Number(-350.0));
        assert_eq!(type_cell("20240131"), CellValue::Number(20_240_131.0));
        assert_eq!(
            type_cell("2024-01-31"),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
        );
        assert_eq!(
            type_cell("3/15/2023 00:00:00"),
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()),
        );
        assert_eq!(type_cell("True"), CellValue::Bool(true));
        assert_eq!(type_cell("FALSE"), CellValue::Bool(false));
        assert_eq!(type_cell("$1,000"), CellValue::Text("$1,000".to_string()));
    }

    #[test]
    fn nan_cells_read_as_blank_numbers() {
        let CellValue::Number(value) = type_cell("nan") else {
            panic!("nan should parse numerically");
        };
        assert!(value.is_nan());
        assert!(type_cell("nan").is_blank());
    }

    #[test]
    fn reads_headers_and_rows() {
        let tape = read_tape("Loan Number,State,Original Loan Amount\n1001,CA,250000\n1002,TX,\n".as_bytes())
            .unwrap();
        assert_eq!(
            tape.columns(),
            ["Loan Number", "State", "Original Loan Amount"],
        );
        assert_eq!(tape.row_count(), 2);
        assert_eq!(
            tape.value("Original Loan Amount", 0),
            Some(&CellValue::Number(250_000.0)),
        );
        assert_eq!(
            tape.value("Original Loan Amount", 1),
            Some(&CellValue::Missing),
        );
    }

    #[test]
    fn strips_bom_and_trims_headers() {
        let tape = read_tape("\u{feff}Loan Number , State \n1001,CA\n".as_bytes()).unwrap();
        assert_eq!(tape.columns(), ["Loan Number", "State"]);
    }

    #[test]
    fn drops_rows_with_blank_loan_numbers() {
        let tape = read_tape("Loan Number,State\n1001,CA\n,TX\n  ,NV\n1004,AZ\n".as_bytes())
            .unwrap();
        assert_eq!(tape.row_count(), 2);
        assert_eq!(tape.value("State", 1), Some(&CellValue::Text("AZ".into())));
    }

    #[test]
    fn keeps_all_rows_without_a_loan_number_column() {
        let tape = read_tape("Account,State\n,CA\n,TX\n".as_bytes()).unwrap();
        assert_eq!(tape.row_count(), 2);
    }

    #[test]
    fn ragged_row_is_an_error() {
        let error = read_tape("Loan Number,State\n1001,CA,extra\n".as_bytes()).unwrap_err();
        assert!(matches!(error, IngestError::Csv(_)));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            read_tape("".as_bytes()),
            Err(IngestError::EmptyTape),
        ));
    }

    #[test]
    fn loads_from_a_file_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Loan Number,State\n1001,CA\n").unwrap();
        let tape = load_tape(file.path()).unwrap();
        assert_eq!(tape.row_count(), 1);
        assert_eq!(
            tape.value("Loan Number", 0),
            Some(&CellValue::Number(1001.0)),
        );
    }
}
