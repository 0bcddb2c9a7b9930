//! Data model for loan-tape validation: the tape itself, the closed cell
//! value variant, and the result structures a validation run produces.

pub mod error;
pub mod result;
pub mod tape;
pub mod value;

pub use error::TapeError;
pub use result::{
    Finding, MissingField, RuleCount, Severity, SkipReason, SkippedRule, ValidationResult,
};
pub use tape::Tape;
pub use value::CellValue;
