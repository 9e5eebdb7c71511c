use serde::{Deserialize, Serialize};

/// How one solver run on one input file ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Exited 0 and printed a valid solution.
    Scored,
    /// Exited 0 but stdout was not a valid solution for the input.
    InvalidOutput,
    TimedOut,
    /// Non-zero exit or killed by a signal.
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Scored => "scored",
            Outcome::InvalidOutput => "invalid_output",
            Outcome::TimedOut => "timed_out",
            Outcome::Failed => "failed",
        }
    }
}

/// Classify a finished run. `solution_valid` is only consulted for a clean exit.
pub fn classify_outcome(timed_out: bool, exit_code: Option<i32>, solution_valid: bool) -> Outcome {
    if timed_out {
        return Outcome::TimedOut;
    }
    match exit_code {
        Some(0) if solution_valid => Outcome::Scored,
        Some(0) => Outcome::InvalidOutput,
        Some(_) | None => Outcome::Failed,
    }
}
