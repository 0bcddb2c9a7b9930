//! Machine-readable report document.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tape_model::ValidationResult;

/// The full result plus when it was generated.
#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_at: String,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

pub(crate) fn write_json(dir: &Path, result: &ValidationResult) -> Result<PathBuf> {
    let path = dir.join("report.json");
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    let document = ReportDocument {
        generated_at: Utc::now().to_rfc3339(),
        result,
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &document)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
