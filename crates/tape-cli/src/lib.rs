//! CLI library components for the tape auditor.

pub mod logging;
