use std::collections::BTreeMap;

use crate::error::TapeError;
use crate::value::CellValue;

/// A rectangular loan tape: one row per loan, columns as found in the
/// source file (original header spellings, original order).
///
/// Storage is column-major so a rule touching three columns never walks
/// the other ~150. Row identity is the zero-based position within the
/// tape.
#[derive(Debug, Clone)]
pub struct Tape {
    columns: Vec<String>,
    cells: BTreeMap<String, Vec<CellValue>>,
    row_count: usize,
}

impl Tape {
    /// Builds a tape from row-major data, enforcing rectangularity and
    /// unique column names.
    pub fn from_rows(
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, TapeError> {
        let mut cells: BTreeMap<String, Vec<CellValue>> = BTreeMap::new();
        for column in &columns {
            if cells
                .insert(column.clone(), Vec::with_capacity(rows.len()))
                .is_some()
            {
                return Err(TapeError::DuplicateColumn(column.clone()));
            }
        }
        let row_count = rows.len();
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TapeError::RaggedRow {
                    row: index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (column, value) in columns.iter().zip(row) {
                if let Some(values) = cells.get_mut(column) {
                    values.push(value);
                }
            }
        }
        Ok(Self {
            columns,
            cells,
            row_count,
        })
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// All values of one column, in row order. None if the column does
    /// not exist (lookup is exact; fuzzy resolution happens upstream).
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.cells.get(name).map(Vec::as_slice)
    }

    pub fn value(&self, column: &str, row: usize) -> Option<&CellValue> {
        self.cells.get(column).and_then(|values| values.get(row))
    }
}
