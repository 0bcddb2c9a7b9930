//! Command handlers for the tape auditor.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::Table;
use tracing::info;

use tape_engine::Engine;
use tape_model::ValidationResult;
use tape_rules::{ParamSpec, catalog, default_policies};

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

const DEFAULT_REPORT_DIR: &str = "tape-validation-report";

/// Everything the `run` command produced, for the terminal summary.
pub struct RunOutcome {
    pub tape_path: PathBuf,
    pub report_dir: PathBuf,
    pub result: ValidationResult,
}

pub fn run_tape(args: &RunArgs) -> Result<RunOutcome> {
    let started = Utc::now();
    let report_dir = report_dir(args, &started);
    info!(tape = %args.tape.display(), "loading tape");
    let tape = tape_ingest::load_tape(&args.tape)
        .with_context(|| format!("load {}", args.tape.display()))?;
    info!(
        rows = tape.row_count(),
        columns = tape.columns().len(),
        "running validations"
    );
    let engine = Engine::new(catalog(), default_policies());
    let result = engine.run(&tape).context("validation run")?;
    info!(dir = %report_dir.display(), "writing report");
    tape_report::write_report(&result, &report_dir)
        .with_context(|| format!("write report to {}", report_dir.display()))?;
    info!("validation complete");
    Ok(RunOutcome {
        tape_path: args.tape.clone(),
        report_dir,
        result,
    })
}

pub fn run_rules() -> Result<()> {
    let rules = catalog();
    let policies = default_policies();
    let mut table = Table::new();
    table.set_header(vec!["Rule", "Severity", "Parameters"]);
    apply_table_style(&mut table);
    for rule in &rules {
        let params = match rule.params {
            ParamSpec::Fixed(names) => names.join(", "),
            ParamSpec::Varargs(name) => format!("{name}..."),
        };
        table.add_row(vec![
            rule.name.to_string(),
            policies.severity(rule.name).as_str().to_string(),
            params,
        ]);
    }
    println!("{table}");
    Ok(())
}

/// The report directory for this run: the requested (or default) directory,
/// its final component suffixed with the run timestamp unless suppressed.
fn report_dir(args: &RunArgs, started: &DateTime<Utc>) -> PathBuf {
    let base = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));
    if args.no_timestamp {
        return base;
    }
    let label = started.format("%Y%m%d_%H%M%S");
    match base.file_name().and_then(|name| name.to_str()) {
        Some(name) => base.with_file_name(format!("{name}_{label}")),
        None => base.join(label.to_string()),
    }
}
