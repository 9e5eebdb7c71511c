//! Failure signals raised by the engine core.
//!
//! Every variant leaves the engine in the state it had before the failing
//! call. Nothing is clamped or repaired.

use thiserror::Error;

/// Errors produced by grid construction, catalog loading and timeline edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A flattened tuple list did not divide into whole tuples.
    #[error("{what}: length {len} is not a multiple of {arity}")]
    MalformedLength {
        what: &'static str,
        len: usize,
        arity: usize,
    },

    /// A grid buffer did not hold exactly `n * n` cells.
    #[error("{which} grid: expected {expected} cells for n={n}, got {actual}")]
    GridSize {
        which: &'static str,
        n: usize,
        expected: usize,
        actual: usize,
    },

    /// A grid cell holds a value above [`MAX_VALUE`](super::grid::MAX_VALUE).
    #[error("{which} grid: cell ({row}, {col}) = {value} exceeds {max}")]
    ValueOutOfRange {
        which: &'static str,
        row: usize,
        col: usize,
        value: u32,
        max: u32,
    },

    /// A catalog entry breaks the operation invariants for this grid size.
    #[error("operation {op_id}: {reason}")]
    InvalidOperation { op_id: usize, reason: String },

    /// A timeline entry references an operation the catalog does not hold.
    #[error("application {index}: op_id {op_id} out of range (catalog has {count})")]
    UnknownOperation {
        index: usize,
        op_id: u32,
        count: usize,
    },

    /// A timeline entry places its rectangle partly outside the grid.
    #[error(
        "application {index}: {h}x{w} rectangle at ({x}, {y}) does not fit in {n}x{n} grid"
    )]
    OutOfBounds {
        index: usize,
        x: u32,
        y: u32,
        h: u32,
        w: u32,
        n: usize,
    },

    /// Generator parameters that cannot produce a valid instance.
    #[error("generator parameters: {reason}")]
    InvalidParams { reason: String },

    /// A seek target lies past the end of the installed timeline.
    #[error("seek target {target} outside [0, {len}]")]
    SeekOutOfRange { target: usize, len: usize },
}
