//! JSON report persistence.
//!
//! Records per-file results, the summary, and enough metadata (input hashes,
//! solver command, timestamps) to compare runs later.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::report::Summary;
use crate::run::FileResult;

/// Report written by `judge dir --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JudgeReport {
    pub input_dir: String,
    pub command: Vec<String>,
    pub timeout_secs: u64,
    pub start_time: String,
    pub end_time: String,
    pub summary: Summary,
    pub files: Vec<FileResult>,
}

/// Input for building a report from a finished judge run.
#[derive(Debug)]
pub struct ReportInput<'a> {
    pub input_dir: &'a Path,
    pub command: &'a [String],
    pub timeout_secs: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: Summary,
    pub files: Vec<FileResult>,
}

impl JudgeReport {
    pub fn new(input: ReportInput<'_>) -> Self {
        Self {
            input_dir: input.input_dir.display().to_string(),
            command: input.command.to_vec(),
            timeout_secs: input.timeout_secs,
            start_time: input.started_at.to_rfc3339(),
            end_time: input.finished_at.to_rfc3339(),
            summary: input.summary,
            files: input.files,
        }
    }
}

pub fn write_report(path: &Path, report: &JudgeReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write report {}", path.display()))?;
    debug!(path = %path.display(), "report written");
    Ok(())
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
