//! Fixed-size square grids stored row-major.

use crate::core::error::EngineError;

/// Largest value a grid cell (or an operation's `a`/`b`) may hold.
pub const MAX_VALUE: u32 = 50;

/// An `n x n` grid of values in `[0, MAX_VALUE]`.
///
/// The dimension is fixed at construction; no method resizes the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    n: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// Build a grid from a row-major buffer, checking size and value range.
    ///
    /// `which` names the grid in error messages (`"initial"`, `"target"`).
    pub fn from_cells(which: &'static str, n: usize, cells: Vec<u32>) -> Result<Self, EngineError> {
        let expected = n * n;
        if cells.len() != expected {
            return Err(EngineError::GridSize {
                which,
                n,
                expected,
                actual: cells.len(),
            });
        }
        if let Some(index) = cells.iter().position(|&value| value > MAX_VALUE) {
            return Err(EngineError::ValueOutOfRange {
                which,
                row: index / n,
                col: index % n,
                value: cells[index],
                max: MAX_VALUE,
            });
        }
        Ok(Self { n, cells })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Row-major view of all `n * n` cells.
    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.n + col]
    }

    pub fn row(&self, row: usize) -> &[u32] {
        let start = row * self.n;
        &self.cells[start..start + self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunks_exact(0) panics; an empty grid simply has no rows.
        self.cells.chunks_exact(self.n.max(1))
    }

    /// Overwrite every cell with the contents of `other` (same dimension).
    pub(crate) fn copy_from(&mut self, other: &Grid) {
        debug_assert_eq!(self.n, other.n);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Conditional replace: inside the `h x w` rectangle whose top-left
    /// corner is `(x, y)`, every cell equal to `a` becomes `b`.
    ///
    /// Callers must have checked the rectangle against `n`.
    pub(crate) fn replace_in_rect(&mut self, x: usize, y: usize, h: usize, w: usize, a: u32, b: u32) {
        for row in x..x + h {
            let start = row * self.n + y;
            for cell in &mut self.cells[start..start + w] {
                if *cell == a {
                    *cell = b;
                }
            }
        }
    }
}

/// Sum of squared per-cell differences between two grids of equal size.
pub fn squared_error(current: &[u32], target: &[u32]) -> u64 {
    debug_assert_eq!(current.len(), target.len());
    current
        .iter()
        .zip(target)
        .map(|(&c, &t)| {
            let diff = u64::from(c.abs_diff(t));
            diff * diff
        })
        .sum()
}
