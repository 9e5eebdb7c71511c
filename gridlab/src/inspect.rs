//! State inspection for `gridlab show` and `gridlab score`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::core::engine::Engine;
use crate::core::grid::Grid;
use crate::core::serializer::write_grid;
use crate::core::timeline::Region;
use crate::io::instance_store::{read_instance, read_solution};
use crate::score::{Evaluation, evaluate};

/// Engine state at one cursor position.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub evaluation: Evaluation,
    pub len: usize,
    pub active: Option<Region>,
    /// `op_id` of the most recently applied entry.
    pub active_op: Option<u32>,
    pub current: Grid,
}

/// Load an instance and an optional solution into a fresh engine.
///
/// The solution is installed, leaving the cursor at its end.
pub fn load_engine(instance_path: &Path, solution_path: Option<&Path>) -> Result<Engine> {
    let instance = read_instance(instance_path)?;
    let timeline = match solution_path {
        Some(path) => read_solution(path, &instance)?,
        None => Vec::new(),
    };
    let mut engine = Engine::new(instance);
    engine.install(timeline).context("install solution")?;
    Ok(engine)
}

/// Seek to `time` (or stay at the end) and capture the resulting state.
pub fn inspect_at(engine: &mut Engine, time: Option<usize>) -> Result<Inspection> {
    if let Some(time) = time {
        engine
            .seek(time)
            .with_context(|| format!("seek to time {time}"))?;
    }
    debug!(cursor = engine.cursor(), len = engine.len(), "inspecting");
    Ok(Inspection {
        evaluation: evaluate(engine),
        len: engine.len(),
        active: engine.active_region(),
        active_op: engine.active_application().map(|app| app.op_id),
        current: engine.current_grid().clone(),
    })
}

#[instrument(skip_all, fields(instance = %instance_path.display()))]
pub fn inspect(
    instance_path: &Path,
    solution_path: Option<&Path>,
    time: Option<usize>,
) -> Result<Inspection> {
    let mut engine = load_engine(instance_path, solution_path)?;
    inspect_at(&mut engine, time)
}

/// Render an inspection as `key: value` lines followed by the grid rows.
pub fn render(inspection: &Inspection) -> String {
    let eval = &inspection.evaluation;
    let mut out = format!(
        "time: {}/{}\nsse: {}\nmean_error: {:.2}\nscore: {}\n",
        eval.applied,
        inspection.len,
        eval.sse,
        eval.mean_error(),
        eval.score
    );
    match (inspection.active_op, inspection.active) {
        (Some(op_id), Some(region)) => out.push_str(&format!(
            "active_op: {}\nactive: rows {}..{} cols {}..{}\n",
            op_id,
            region.row,
            region.row + region.height,
            region.col,
            region.col + region.width
        )),
        _ => out.push_str("active_op: none\nactive: none\n"),
    }
    out.push_str("grid:\n");
    write_grid(&mut out, &inspection.current);
    out
}
