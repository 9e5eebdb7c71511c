//! Instance and solution files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::instance::Instance;
use crate::core::serializer::serialize;
use crate::core::timeline::Application;
use crate::io::instance_text::parse_instance;
use crate::io::solution_text::parse_solution;

/// File name used for the generated instance of `seed`.
pub fn instance_file_name(seed: u32) -> String {
    format!("input_{seed}.txt")
}

/// Path of the generated instance of `seed` under `dir`.
pub fn instance_path(dir: &Path, seed: u32) -> PathBuf {
    dir.join(instance_file_name(seed))
}

pub fn read_instance(path: &Path) -> Result<Instance> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read instance {}", path.display()))?;
    parse_instance(&text).with_context(|| format!("parse instance {}", path.display()))
}

/// Write the canonical text of `instance` to `path`, creating parent dirs.
pub fn write_instance(path: &Path, instance: &Instance) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, serialize(instance))
        .with_context(|| format!("write instance {}", path.display()))
}

pub fn read_solution(path: &Path, instance: &Instance) -> Result<Vec<Application>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read solution {}", path.display()))?;
    parse_solution(&text, instance).with_context(|| format!("parse solution {}", path.display()))
}
