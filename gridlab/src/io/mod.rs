//! I/O helpers for gridlab commands.

pub mod config;
pub mod instance_store;
pub mod instance_text;
pub mod process;
pub mod solution_text;
