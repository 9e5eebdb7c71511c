//! Seeded instance generation.
//!
//! With default parameters the draw order follows the historical contest
//! generator (size, initial cells, target cells, then `h w a b` per
//! operation) up to the first `a != b` redraw. That redraw takes one extra
//! value, so later operations diverge from the historical catalog.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::grid::MAX_VALUE;
use crate::core::instance::Instance;
use crate::core::mt::Mt19937;

/// Shape of generated instances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorParams {
    /// Smallest grid dimension `n`.
    pub min_size: u32,
    /// Largest grid dimension `n` (inclusive).
    pub max_size: u32,
    /// Number of catalog operations `T`.
    pub op_count: u32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            min_size: 15,
            max_size: 60,
            op_count: 3000,
        }
    }
}

impl GeneratorParams {
    pub fn check(&self) -> Result<(), EngineError> {
        let invalid = |reason: String| Err(EngineError::InvalidParams { reason });
        if self.min_size == 0 {
            return invalid("min_size must be > 0".to_string());
        }
        if self.min_size > self.max_size {
            return invalid(format!(
                "min_size {} exceeds max_size {}",
                self.min_size, self.max_size
            ));
        }
        if self.op_count == 0 {
            return invalid("op_count must be > 0".to_string());
        }
        Ok(())
    }
}

/// Generate the instance for `seed`.
pub fn generate(seed: u32, params: &GeneratorParams) -> Result<Instance, EngineError> {
    generate_with(&mut Mt19937::new(seed), params)
}

/// Generate an instance drawing from `rng`.
pub fn generate_with<R: RngCore>(
    rng: &mut R,
    params: &GeneratorParams,
) -> Result<Instance, EngineError> {
    params.check()?;

    let span = params.max_size - params.min_size + 1;
    let n = rng.next_u32() % span + params.min_size;
    let cells = (n as usize) * (n as usize);

    let initial: Vec<u32> = (0..cells).map(|_| rng.next_u32() % MAX_VALUE).collect();
    let target: Vec<u32> = (0..cells).map(|_| rng.next_u32() % MAX_VALUE).collect();

    let mut ops = Vec::with_capacity(params.op_count as usize * 4);
    for _ in 0..params.op_count {
        let h = rng.next_u32() % n + 1;
        let w = rng.next_u32() % n + 1;
        let a = rng.next_u32() % MAX_VALUE;
        let mut b = rng.next_u32() % MAX_VALUE;
        if b == a {
            b = (a + 1 + rng.next_u32() % (MAX_VALUE - 1)) % MAX_VALUE;
        }
        ops.extend_from_slice(&[h, w, a, b]);
    }

    Instance::from_flat(n as usize, initial, target, &ops)
}
