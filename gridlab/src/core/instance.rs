//! A complete puzzle instance: dimension, grids and operation catalog.

use crate::core::catalog::Catalog;
use crate::core::error::EngineError;
use crate::core::grid::Grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    initial: Grid,
    target: Grid,
    catalog: Catalog,
}

impl Instance {
    /// Assemble an instance from already-validated parts of matching size.
    pub fn new(initial: Grid, target: Grid, catalog: Catalog) -> Result<Self, EngineError> {
        if target.n() != initial.n() {
            return Err(EngineError::GridSize {
                which: "target",
                n: initial.n(),
                expected: initial.n() * initial.n(),
                actual: target.as_slice().len(),
            });
        }
        for (op_id, op) in catalog.iter().enumerate() {
            op.check(op_id, initial.n())?;
        }
        Ok(Self {
            initial,
            target,
            catalog,
        })
    }

    /// Load an instance from flat buffers: two row-major grids and a flat
    /// `h w a b` operation list. Nothing is kept if any part is malformed.
    pub fn from_flat(
        n: usize,
        initial: Vec<u32>,
        target: Vec<u32>,
        ops: &[u32],
    ) -> Result<Self, EngineError> {
        let initial = Grid::from_cells("initial", n, initial)?;
        let target = Grid::from_cells("target", n, target)?;
        let catalog = Catalog::from_flat(ops, n)?;
        Self::new(initial, target, catalog)
    }

    pub fn n(&self) -> usize {
        self.initial.n()
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn target(&self) -> &Grid {
        &self.target
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
