//! Workspace configuration stored in `gridlab.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::generator::GeneratorParams;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "gridlab.toml";

/// Gridlab configuration (TOML).
///
/// Missing fields default to the values that reproduce the historical
/// contest inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GridlabConfig {
    pub generator: GeneratorParams,
    pub judge: JudgeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JudgeConfig {
    /// Wall-clock limit per solver run, in seconds.
    pub timeout_secs: u64,

    /// Discard solver stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            output_limit_bytes: 10_000_000,
        }
    }
}

impl GridlabConfig {
    pub fn validate(&self) -> Result<()> {
        self.generator
            .check()
            .map_err(|err| anyhow!("[generator] {}", err))?;
        if self.judge.timeout_secs == 0 {
            return Err(anyhow!("judge.timeout_secs must be > 0"));
        }
        if self.judge.output_limit_bytes == 0 {
            return Err(anyhow!("judge.output_limit_bytes must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GridlabConfig::default()`.
pub fn load_config(path: &Path) -> Result<GridlabConfig> {
    if !path.exists() {
        let cfg = GridlabConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GridlabConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &GridlabConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
