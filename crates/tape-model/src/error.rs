use thiserror::Error;

#[derive(Debug, Error)]
pub enum TapeError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
