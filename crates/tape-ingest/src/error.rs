use thiserror::Error;

use tape_model::TapeError;

/// Why a tape file could not be loaded.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read tape: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Tape(#[from] TapeError),
    #[error("tape has no header row")]
    EmptyTape,
}
