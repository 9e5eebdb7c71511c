//! Stable exit codes for gridlab CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid input, config, or solution, or any other error.
pub const INVALID: i32 = 1;
/// `gridlab show --time` asked for a time outside `0..=len`.
pub const OUT_OF_RANGE: i32 = 2;
