//! Loads delimited loan tapes into the tape model.
//!
//! The header row defines the column list; every cell below it is typed by
//! inference so rules can work with numbers, dates, and booleans without
//! re-parsing strings. Excel workbooks are not read here; convert them to
//! CSV first.

mod error;
mod reader;

pub use error::IngestError;
pub use reader::{load_tape, read_tape};
