//! Column-name resolution: matching a rule's semantic parameter names to
//! the free-form headers of a real tape.

pub mod maps;
pub mod normalize;

pub use maps::ColumnMaps;
pub use normalize::{canonical_key, normalize_name};
