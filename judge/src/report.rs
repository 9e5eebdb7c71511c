use serde::{Deserialize, Serialize};

use crate::outcome::Outcome;
use crate::run::FileResult;

/// Totals over every judged file.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub files: usize,
    pub total_score: u64,
    /// `total_score / files`, 0 when no files were judged.
    pub average_score: f64,
    pub scored: usize,
    pub invalid_output: usize,
    pub timed_out: usize,
    pub failed: usize,
    pub avg_duration_secs: Option<f64>,
}

pub fn summarize(results: &[FileResult]) -> Summary {
    let mut summary = Summary::default();
    let mut total_duration = 0.0;

    for result in results {
        summary.files += 1;
        summary.total_score += result.score;
        total_duration += result.duration_secs;
        match result.outcome {
            Outcome::Scored => summary.scored += 1,
            Outcome::InvalidOutput => summary.invalid_output += 1,
            Outcome::TimedOut => summary.timed_out += 1,
            Outcome::Failed => summary.failed += 1,
        }
    }

    if summary.files > 0 {
        summary.average_score = summary.total_score as f64 / summary.files as f64;
        summary.avg_duration_secs = Some(total_duration / summary.files as f64);
    }
    summary
}
