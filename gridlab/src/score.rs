//! Caller-side scoring from the engine's published state.
//!
//! `score = round(1e9 * N^2 / (N^2 + applied + SSE))`, where `applied` is the
//! engine cursor and `SSE` the squared error against the target grid.

use serde::Serialize;

use crate::core::engine::Engine;

/// Score inputs and result for one engine state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub n: usize,
    /// Timeline entries applied (the cursor).
    pub applied: usize,
    pub sse: u64,
    pub score: u64,
}

impl Evaluation {
    /// Mean squared error per cell, `SSE / N^2`.
    pub fn mean_error(&self) -> f64 {
        let cells = self.n * self.n;
        if cells == 0 {
            return 0.0;
        }
        self.sse as f64 / cells as f64
    }
}

pub fn score(n: usize, applied: usize, sse: u64) -> u64 {
    let cells = (n * n) as f64;
    let denominator = cells + applied as f64 + sse as f64;
    if denominator == 0.0 {
        return 0;
    }
    (1e9 * cells / denominator).round() as u64
}

/// Evaluate the engine at its current cursor.
pub fn evaluate(engine: &Engine) -> Evaluation {
    let sse = engine.squared_error();
    let applied = engine.cursor();
    Evaluation {
        n: engine.n(),
        applied,
        sse,
        score: score(engine.n(), applied, sse),
    }
}
