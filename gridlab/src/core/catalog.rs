//! Immutable catalog of conditional-replace operations.

use crate::core::error::EngineError;
use crate::core::grid::MAX_VALUE;

/// A conditional-replace template: inside an `h x w` rectangle, cells equal
/// to `a` become `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub h: u32,
    pub w: u32,
    pub a: u32,
    pub b: u32,
}

impl Operation {
    /// Check the operation invariants against grid dimension `n`.
    pub fn check(&self, op_id: usize, n: usize) -> Result<(), EngineError> {
        let invalid = |reason: String| EngineError::InvalidOperation { op_id, reason };
        if self.h == 0 || self.w == 0 {
            return Err(invalid(format!("empty {}x{} rectangle", self.h, self.w)));
        }
        if self.h as usize > n || self.w as usize > n {
            return Err(invalid(format!(
                "{}x{} rectangle larger than {}x{} grid",
                self.h, self.w, n, n
            )));
        }
        if self.a > MAX_VALUE || self.b > MAX_VALUE {
            return Err(invalid(format!(
                "values {} -> {} outside [0, {}]",
                self.a, self.b, MAX_VALUE
            )));
        }
        if self.a == self.b {
            return Err(invalid(format!("replaces {} with itself", self.a)));
        }
        Ok(())
    }
}

/// Operations indexed by `op_id`, frozen after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    ops: Vec<Operation>,
}

impl Catalog {
    /// Build a catalog for an `n x n` grid, validating every entry.
    pub fn new(ops: Vec<Operation>, n: usize) -> Result<Self, EngineError> {
        for (op_id, op) in ops.iter().enumerate() {
            op.check(op_id, n)?;
        }
        Ok(Self { ops })
    }

    /// Build a catalog from a flat `h w a b h w a b ...` list.
    pub fn from_flat(values: &[u32], n: usize) -> Result<Self, EngineError> {
        if values.len() % 4 != 0 {
            return Err(EngineError::MalformedLength {
                what: "operation list",
                len: values.len(),
                arity: 4,
            });
        }
        let ops = values
            .chunks_exact(4)
            .map(|chunk| Operation {
                h: chunk[0],
                w: chunk[1],
                a: chunk[2],
                b: chunk[3],
            })
            .collect();
        Self::new(ops, n)
    }

    pub fn get(&self, op_id: usize) -> Option<&Operation> {
        self.ops.get(op_id)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.ops.iter()
    }
}
