use std::collections::BTreeMap;

use crate::normalize::{canonical_key, normalize_name};

/// Lookup maps from normalization keys to the original tape columns that
/// produce them, built once per tape.
///
/// Each key holds every column that collapses to it, in tape order; only
/// the first is used for resolution, but keeping the rest makes collisions
/// observable instead of silent.
#[derive(Debug, Clone, Default)]
pub struct ColumnMaps {
    normalized: BTreeMap<String, Vec<String>>,
    canonical: BTreeMap<String, Vec<String>>,
}

impl ColumnMaps {
    pub fn build<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut maps = Self::default();
        for column in columns {
            let column = column.as_ref();
            maps.normalized
                .entry(normalize_name(column))
                .or_default()
                .push(column.to_string());
            maps.canonical
                .entry(canonical_key(column))
                .or_default()
                .push(column.to_string());
        }
        for (key, originals) in maps.normalized.iter().chain(maps.canonical.iter()) {
            if originals.len() > 1 {
                tracing::debug!(key, columns = ?originals, "column key collision; first occurrence wins");
            }
        }
        maps
    }

    /// Resolves a name to a tape column. An exact normalized hit always
    /// wins; the looser canonical key is only a fallback and never
    /// overrides it. First occurrence wins within a key.
    pub fn resolve_column(&self, name: &str) -> Option<&str> {
        if let Some(originals) = self.normalized.get(&normalize_name(name)) {
            return originals.first().map(String::as_str);
        }
        self.canonical
            .get(&canonical_key(name))
            .and_then(|originals| originals.first())
            .map(String::as_str)
    }

    /// Resolves a rule parameter name: substitute it through the alias map
    /// (exact lookup, pass-through when absent), then resolve as a column.
    pub fn resolve_param(&self, param: &str, aliases: &BTreeMap<String, String>) -> Option<&str> {
        let name = aliases.get(param).map_or(param, String::as_str);
        self.resolve_column(name)
    }

    /// Normalized keys shared by more than one column.
    pub fn collisions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.normalized
            .iter()
            .filter(|(_, originals)| originals.len() > 1)
            .map(|(key, originals)| (key.as_str(), originals.as_slice()))
    }
}
