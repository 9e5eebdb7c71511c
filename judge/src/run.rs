//! Single-file execution.
//!
//! Pipes one instance file into the solver, then replays and scores whatever
//! it printed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use gridlab::core::engine::Engine;
use gridlab::core::instance::Instance;
use gridlab::io::config::JudgeConfig;
use gridlab::io::instance_text::parse_instance;
use gridlab::io::process::run_command_with_timeout;
use gridlab::io::solution_text::parse_solution;
use gridlab::score::{Evaluation, evaluate};

use crate::outcome::{Outcome, classify_outcome};
use crate::results::sha256_hex;

/// Result of running the solver on one input file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileResult {
    pub path: PathBuf,
    /// SHA-256 of the input file bytes.
    pub input_sha256: String,
    pub outcome: Outcome,
    /// 0 unless `outcome` is `scored`.
    pub score: u64,
    pub sse: Option<u64>,
    pub applied: Option<usize>,
    pub duration_secs: f64,
    /// Why the run was not scored.
    pub error: Option<String>,
}

impl FileResult {
    /// A file that could not be judged at all (unreadable or not an
    /// instance). Recorded as `failed` with a zero score.
    pub fn unjudged(path: &Path, err: &anyhow::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            input_sha256: fs::read(path).map(|bytes| sha256_hex(&bytes)).unwrap_or_default(),
            outcome: Outcome::Failed,
            score: 0,
            sse: None,
            applied: None,
            duration_secs: 0.0,
            error: Some(format!("{err:#}")),
        }
    }
}

/// Run `command` with the file at `path` on stdin and score its stdout.
///
/// Errors only for problems with the input file or spawning the solver;
/// solver misbehavior is reported through the outcome.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn run_file(path: &Path, command: &[String], cfg: &JudgeConfig) -> Result<FileResult> {
    let Some((program, args)) = command.split_first() else {
        bail!("solver command is empty");
    };
    let input = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let input_sha256 = sha256_hex(&input);
    let text = std::str::from_utf8(&input)
        .with_context(|| format!("input {} is not UTF-8", path.display()))?;
    let instance = parse_instance(text).with_context(|| format!("parse {}", path.display()))?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    let output = run_command_with_timeout(
        cmd,
        Some(input),
        Duration::from_secs(cfg.timeout_secs),
        cfg.output_limit_bytes,
    )
    .with_context(|| format!("run solver on {}", path.display()))?;

    let replay = if output.timed_out || !output.status.success() {
        None
    } else if output.stdout_truncated > 0 {
        Some(Err(format!(
            "solver output exceeded {} bytes",
            cfg.output_limit_bytes
        )))
    } else {
        Some(replay_output(&output.stdout, instance))
    };
    let outcome = classify_outcome(
        output.timed_out,
        output.status.code(),
        matches!(replay, Some(Ok(_))),
    );

    let (evaluation, error) = match replay {
        Some(Ok(eval)) => (Some(eval), None),
        Some(Err(reason)) => (None, Some(reason)),
        None if output.timed_out => (
            None,
            Some(format!("timed out after {}s", cfg.timeout_secs)),
        ),
        None => (None, Some(exit_reason(&output.stderr, output.status.code()))),
    };
    if let Some(reason) = &error {
        warn!(outcome = outcome.as_str(), reason = %reason, "solver run not scored");
    }

    let result = FileResult {
        path: path.to_path_buf(),
        input_sha256,
        outcome,
        score: evaluation.map_or(0, |eval| eval.score),
        sse: evaluation.map(|eval| eval.sse),
        applied: evaluation.map(|eval| eval.applied),
        duration_secs: output.elapsed.as_secs_f64(),
        error,
    };
    info!(outcome = outcome.as_str(), score = result.score, "file judged");
    Ok(result)
}

/// Parse solver stdout as a solution, install it, and evaluate the end state.
fn replay_output(stdout: &[u8], instance: Instance) -> std::result::Result<Evaluation, String> {
    let text = std::str::from_utf8(stdout).map_err(|err| format!("stdout is not UTF-8: {err}"))?;
    let timeline = parse_solution(text, &instance).map_err(|err| format!("{err:#}"))?;
    debug!(entries = timeline.len(), "solution parsed");
    let mut engine = Engine::new(instance);
    engine
        .install(timeline)
        .map_err(|err| format!("install: {err}"))?;
    Ok(evaluate(&engine))
}

fn exit_reason(stderr: &[u8], code: Option<i32>) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let last_line = stderr.lines().last().unwrap_or("").trim();
    let status = match code {
        Some(code) => format!("exit code {code}"),
        None => "killed by signal".to_string(),
    };
    if last_line.is_empty() {
        status
    } else {
        format!("{status}: {last_line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlab::test_support::{Fixture, two_by_two};

    fn cfg() -> JudgeConfig {
        JudgeConfig {
            timeout_secs: 5,
            output_limit_bytes: 4096,
        }
    }

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn exit_reason_includes_last_stderr_line() {
        assert_eq!(exit_reason(b"warming up\nboom\n", Some(3)), "exit code 3: boom");
        assert_eq!(exit_reason(b"", None), "killed by signal");
    }

    #[test]
    fn empty_command_is_rejected() {
        let fixture = Fixture::new(&two_by_two());
        assert!(run_file(&fixture.instance_path, &[], &cfg()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn scores_valid_solution() {
        let fixture = Fixture::new(&two_by_two());
        let result =
            run_file(&fixture.instance_path, &sh("cat >/dev/null; printf '1\\n0 0 0\\n'"), &cfg())
                .expect("run");
        assert_eq!(result.outcome, Outcome::Scored);
        assert_eq!(result.score, 800_000_000);
        assert_eq!(result.sse, Some(0));
        assert_eq!(result.applied, Some(1));
        assert_eq!(result.error, None);
        assert_eq!(result.input_sha256.len(), 64);
    }

    #[cfg(unix)]
    #[test]
    fn out_of_bounds_solution_is_invalid_output() {
        let fixture = Fixture::new(&two_by_two());
        let result = run_file(&fixture.instance_path, &sh("printf '1\\n0 1 1\\n'"), &cfg())
            .expect("run");
        assert_eq!(result.outcome, Outcome::InvalidOutput);
        assert_eq!(result.score, 0);
        assert!(result.error.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_failed() {
        let fixture = Fixture::new(&two_by_two());
        let result =
            run_file(&fixture.instance_path, &sh("echo nope >&2; exit 4"), &cfg()).expect("run");
        assert_eq!(result.outcome, Outcome::Failed);
        assert_eq!(result.error.as_deref(), Some("exit code 4: nope"));
    }

    #[cfg(unix)]
    #[test]
    fn slow_solver_times_out() {
        let fixture = Fixture::new(&two_by_two());
        let short = JudgeConfig {
            timeout_secs: 1,
            ..cfg()
        };
        let command = vec!["sleep".to_string(), "5".to_string()];
        let result = run_file(&fixture.instance_path, &command, &short).expect("run");
        assert_eq!(result.outcome, Outcome::TimedOut);
        assert_eq!(result.score, 0);
    }

    #[cfg(unix)]
    #[test]
    fn huge_declared_count_is_invalid_output() {
        let fixture = Fixture::new(&two_by_two());
        let result = run_file(
            &fixture.instance_path,
            &sh("cat >/dev/null; printf '4000000000\\n0 0 0\\n'"),
            &cfg(),
        )
        .expect("run");
        assert_eq!(result.outcome, Outcome::InvalidOutput);
        assert_eq!(result.score, 0);
        assert!(
            result
                .error
                .as_deref()
                .is_some_and(|reason| reason.contains("expected 4000000000 entries"))
        );
    }

    #[test]
    fn unjudged_file_is_failed_with_reason() {
        let fixture = Fixture::new(&two_by_two());
        let err = anyhow::anyhow!("parse instance");
        let result = FileResult::unjudged(&fixture.instance_path, &err);
        assert_eq!(result.outcome, Outcome::Failed);
        assert_eq!(result.score, 0);
        assert_eq!(result.input_sha256.len(), 64);
        assert_eq!(result.error.as_deref(), Some("parse instance"));
    }

    #[test]
    fn unreadable_instance_is_an_error() {
        let fixture = Fixture::new(&two_by_two());
        let path = fixture.solution("broken.txt", "2 1\n1 2\n");
        assert!(run_file(&path, &sh("true"), &cfg()).is_err());
    }
}
