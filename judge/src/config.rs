//! Judge configuration merging.
//!
//! Applies command-line overrides to the `[judge]` table of `gridlab.toml`.

use anyhow::Result;
use gridlab::io::config::{GridlabConfig, JudgeConfig};

/// Apply CLI overrides to the loaded config and re-validate.
pub fn apply_overrides(mut base: GridlabConfig, timeout_secs: Option<u64>) -> Result<JudgeConfig> {
    if let Some(timeout_secs) = timeout_secs {
        base.judge.timeout_secs = timeout_secs;
    }
    base.validate()?;
    Ok(base.judge)
}
