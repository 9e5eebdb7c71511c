//! Test-only helpers for building small instances and fixture files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::instance::Instance;
use crate::core::timeline::Application;
use crate::io::instance_store::write_instance;

/// 2x2 instance with one operation `(h=1, w=2, a=1, b=9)`.
///
/// Initial `[[1,2],[3,4]]`, target `[[9,2],[3,4]]`; applying op 0 at the
/// origin solves it.
pub fn two_by_two() -> Instance {
    match Instance::from_flat(2, vec![1, 2, 3, 4], vec![9, 2, 3, 4], &[1, 2, 1, 9]) {
        Ok(instance) => instance,
        Err(err) => panic!("two_by_two fixture is invalid: {err}"),
    }
}

pub fn app(op_id: u32, x: u32, y: u32) -> Application {
    Application { op_id, x, y }
}

/// Temporary directory holding one instance file and optional solutions.
pub struct Fixture {
    pub dir: TempDir,
    pub instance_path: PathBuf,
}

impl Fixture {
    pub fn new(instance: &Instance) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let instance_path = dir.path().join("input.txt");
        write_instance(&instance_path, instance).expect("write instance");
        Self { dir, instance_path }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` as a solution file named `name`.
    pub fn solution(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write solution");
        path
    }
}
