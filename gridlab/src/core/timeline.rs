//! Timeline entries and their bounds checks.

use crate::core::catalog::{Catalog, Operation};
use crate::core::error::EngineError;

/// One placement of a catalog operation: `catalog[op_id]` with its
/// rectangle's top-left corner at row `x`, column `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Application {
    pub op_id: u32,
    pub x: u32,
    pub y: u32,
}

/// The rectangle an application covers, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
}

/// Split a flat `op_id x y op_id x y ...` list into applications.
pub fn applications_from_flat(values: &[u32]) -> Result<Vec<Application>, EngineError> {
    if values.len() % 3 != 0 {
        return Err(EngineError::MalformedLength {
            what: "application list",
            len: values.len(),
            arity: 3,
        });
    }
    Ok(values
        .chunks_exact(3)
        .map(|chunk| Application {
            op_id: chunk[0],
            x: chunk[1],
            y: chunk[2],
        })
        .collect())
}

/// Resolve `app` (entry `index` of a timeline) against the catalog and grid
/// size, returning the operation and the region it covers.
pub fn resolve(
    app: &Application,
    index: usize,
    catalog: &Catalog,
    n: usize,
) -> Result<(Operation, Region), EngineError> {
    let op = *catalog
        .get(app.op_id as usize)
        .ok_or(EngineError::UnknownOperation {
            index,
            op_id: app.op_id,
            count: catalog.len(),
        })?;
    let fits = |start: u32, extent: u32| {
        (start as usize)
            .checked_add(extent as usize)
            .is_some_and(|end| end <= n)
    };
    if !fits(app.x, op.h) || !fits(app.y, op.w) {
        return Err(EngineError::OutOfBounds {
            index,
            x: app.x,
            y: app.y,
            h: op.h,
            w: op.w,
            n,
        });
    }
    let region = Region {
        row: app.x as usize,
        col: app.y as usize,
        height: op.h as usize,
        width: op.w as usize,
    };
    Ok((op, region))
}
