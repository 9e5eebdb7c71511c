//! CLI command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use gridlab::io::config::JudgeConfig;
use tracing::{debug, info, warn};

use crate::report::{Summary, summarize};
use crate::results::{JudgeReport, ReportInput, write_report};
use crate::run::{FileResult, run_file};

/// Regular files directly under `input_dir`, sorted by path.
pub fn input_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        bail!("input directory {} not found", input_dir.display());
    }
    let mut files = Vec::new();
    for entry in
        fs::read_dir(input_dir).with_context(|| format!("read {}", input_dir.display()))?
    {
        let entry = entry.context("read entry")?;
        if entry.file_type().context("read file type")?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Judge every input file and print one line per file plus totals.
pub fn judge_dir(
    input_dir: &Path,
    command: &[String],
    cfg: &JudgeConfig,
    json: Option<&Path>,
) -> Result<Summary> {
    if command.is_empty() {
        bail!("solver command is empty");
    }
    let files = input_files(input_dir)?;
    info!(files = files.len(), "judging input directory");

    let started_at = Utc::now();
    let mut results = Vec::with_capacity(files.len());
    for path in &files {
        let result = match run_file(path, command, cfg) {
            Ok(result) => result,
            Err(err) => {
                warn!(path = %path.display(), err = %format!("{err:#}"), "file not judged");
                FileResult::unjudged(path, &err)
            }
        };
        println!(
            "judge: file={} outcome={} score={}",
            path.display(),
            result.outcome.as_str(),
            result.score
        );
        results.push(result);
    }
    let finished_at = Utc::now();

    let summary = summarize(&results);
    println!(
        "judge: files={} scored={} invalid_output={} timed_out={} failed={}",
        summary.files, summary.scored, summary.invalid_output, summary.timed_out, summary.failed
    );
    println!("judge: total={}", summary.total_score);
    println!("judge: average={:.2}", summary.average_score);

    if let Some(json_path) = json {
        let report = JudgeReport::new(ReportInput {
            input_dir,
            command,
            timeout_secs: cfg.timeout_secs,
            started_at,
            finished_at,
            summary: summary.clone(),
            files: results,
        });
        write_report(json_path, &report)?;
        debug!(path = %json_path.display(), "json report written");
    }
    Ok(summary)
}
