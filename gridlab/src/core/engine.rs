//! Timeline engine: owns the grids, the installed timeline and the cursor.
//!
//! `current` always equals `timeline[0..cursor)` applied to `initial`.
//! Forward seeks step `current` incrementally. Backward seeks rebuild it from
//! `initial`, since conditional replace cannot be inverted without a per-cell
//! log of overwritten values.

use tracing::{debug, instrument};

use crate::core::catalog::Operation;
use crate::core::error::EngineError;
use crate::core::grid::{Grid, squared_error};
use crate::core::instance::Instance;
use crate::core::timeline::{Application, Region, applications_from_flat, resolve};

/// A timeline entry with its catalog lookup and bounds already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    op: Operation,
    region: Region,
}

impl Step {
    fn apply(&self, grid: &mut Grid) {
        grid.replace_in_rect(
            self.region.row,
            self.region.col,
            self.region.height,
            self.region.width,
            self.op.a,
            self.op.b,
        );
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    instance: Instance,
    current: Grid,
    steps: Vec<Step>,
    apps: Vec<Application>,
    cursor: usize,
}

impl Engine {
    /// Load an instance with an empty timeline (cursor 0, `current == initial`).
    pub fn new(instance: Instance) -> Self {
        let current = instance.initial().clone();
        Self {
            instance,
            current,
            steps: Vec::new(),
            apps: Vec::new(),
            cursor: 0,
        }
    }

    /// Replace the timeline wholesale and move the cursor to its end.
    ///
    /// Every entry is checked before anything changes; on error the previous
    /// timeline, cursor and grid are kept.
    #[instrument(skip_all, fields(len = timeline.len()))]
    pub fn install(&mut self, timeline: Vec<Application>) -> Result<(), EngineError> {
        let catalog = self.instance.catalog();
        let n = self.instance.n();
        let steps = timeline
            .iter()
            .enumerate()
            .map(|(index, app)| {
                let (op, region) = resolve(app, index, catalog, n)?;
                Ok(Step { op, region })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        let mut current = self.instance.initial().clone();
        for step in &steps {
            step.apply(&mut current);
        }

        self.cursor = steps.len();
        self.current = current;
        self.steps = steps;
        self.apps = timeline;
        debug!(cursor = self.cursor, "timeline installed");
        Ok(())
    }

    /// [`install`](Self::install) from a flat `op_id x y` list.
    pub fn install_flat(&mut self, values: &[u32]) -> Result<(), EngineError> {
        let timeline = applications_from_flat(values)?;
        self.install(timeline)
    }

    /// Move the cursor to `target`, recomputing `current`.
    pub fn seek(&mut self, target: usize) -> Result<(), EngineError> {
        let len = self.steps.len();
        if target > len {
            return Err(EngineError::SeekOutOfRange { target, len });
        }
        if target > self.cursor {
            for step in &self.steps[self.cursor..target] {
                step.apply(&mut self.current);
            }
        } else if target < self.cursor {
            self.current.copy_from(self.instance.initial());
            for step in &self.steps[..target] {
                step.apply(&mut self.current);
            }
        }
        debug!(from = self.cursor, to = target, "seek");
        self.cursor = target;
        Ok(())
    }

    /// Number of leading timeline entries reflected in [`current`](Self::current).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn n(&self) -> usize {
        self.instance.n()
    }

    pub fn initial(&self) -> &[u32] {
        self.instance.initial().as_slice()
    }

    pub fn target(&self) -> &[u32] {
        self.instance.target().as_slice()
    }

    pub fn current(&self) -> &[u32] {
        self.current.as_slice()
    }

    pub fn current_grid(&self) -> &Grid {
        &self.current
    }

    pub fn timeline(&self) -> &[Application] {
        &self.apps
    }

    /// Rectangle touched by the most recently applied entry, if any.
    pub fn active_region(&self) -> Option<Region> {
        self.cursor
            .checked_sub(1)
            .map(|index| self.steps[index].region)
    }

    /// Timeline entry at `cursor - 1`, the one most recently applied.
    pub fn active_application(&self) -> Option<&Application> {
        self.cursor.checked_sub(1).map(|index| &self.apps[index])
    }

    /// Squared error between `current` and `target`.
    pub fn squared_error(&self) -> u64 {
        squared_error(self.current(), self.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::{GeneratorParams, generate};
    use crate::core::mt::Mt19937;
    use crate::test_support::{app, two_by_two};
    use rand::RngCore;

    #[test]
    fn install_applies_conditional_replace_exactly() {
        let mut engine = Engine::new(two_by_two());
        engine.install(vec![app(0, 0, 0)]).expect("install");
        assert_eq!(engine.cursor(), 1);
        assert_eq!(engine.current(), &[9, 2, 3, 4]);

        engine.seek(0).expect("seek");
        assert_eq!(engine.cursor(), 0);
        assert_eq!(engine.current(), &[1, 2, 3, 4]);
    }

    #[test]
    fn new_engine_starts_at_initial() {
        let engine = Engine::new(two_by_two());
        assert_eq!(engine.cursor(), 0);
        assert!(engine.is_empty());
        assert_eq!(engine.current(), engine.initial());
        assert_eq!(engine.active_region(), None);
    }

    #[test]
    fn seek_past_end_fails_without_change() {
        let mut engine = Engine::new(two_by_two());
        engine.install(vec![app(0, 0, 0)]).expect("install");
        let before = engine.current().to_vec();

        let err = engine.seek(2).expect_err("out of range");
        assert_eq!(err, EngineError::SeekOutOfRange { target: 2, len: 1 });
        assert_eq!(engine.cursor(), 1);
        assert_eq!(engine.current(), before.as_slice());
    }

    #[test]
    fn install_rejects_bad_entry_and_keeps_previous_state() {
        let mut engine = Engine::new(two_by_two());
        engine.install(vec![app(0, 0, 0)]).expect("install");
        engine.seek(0).expect("seek");

        // Entry 1 overhangs the 2x2 grid: the 1x2 rectangle at column 1.
        let err = engine
            .install(vec![app(0, 1, 0), app(0, 0, 1)])
            .expect_err("bounds");
        assert!(matches!(err, EngineError::OutOfBounds { index: 1, .. }));
        assert_eq!(engine.cursor(), 0);
        assert_eq!(engine.timeline(), &[app(0, 0, 0)]);
        assert_eq!(engine.current(), &[1, 2, 3, 4]);

        let err = engine.install(vec![app(7, 0, 0)]).expect_err("op id");
        assert!(matches!(err, EngineError::UnknownOperation { op_id: 7, .. }));
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn install_flat_rejects_partial_triple() {
        let mut engine = Engine::new(two_by_two());
        assert!(matches!(
            engine.install_flat(&[0, 0]),
            Err(EngineError::MalformedLength { .. })
        ));
        engine.install_flat(&[0, 1, 0]).expect("install");
        assert_eq!(engine.current(), &[1, 2, 3, 4]);
    }

    #[test]
    fn empty_timeline_is_valid() {
        let mut engine = Engine::new(two_by_two());
        engine.install(Vec::new()).expect("install");
        assert_eq!(engine.cursor(), 0);
        engine.seek(0).expect("seek no-op");
        assert!(engine.seek(1).is_err());
    }

    #[test]
    fn active_region_tracks_cursor() {
        let mut engine = Engine::new(two_by_two());
        engine
            .install(vec![app(0, 0, 0), app(0, 1, 0)])
            .expect("install");
        let region = engine.active_region().expect("region");
        assert_eq!((region.row, region.col, region.height, region.width), (1, 0, 1, 2));
        engine.seek(1).expect("seek");
        assert_eq!(engine.active_region().map(|r| r.row), Some(0));
        assert_eq!(engine.active_application(), Some(&app(0, 0, 0)));
        engine.seek(0).expect("seek");
        assert_eq!(engine.active_application(), None);
    }

    #[test]
    fn squared_error_reflects_current_grid() {
        let mut engine = Engine::new(two_by_two());
        // target is [[9, 2], [3, 4]]
        assert_eq!(engine.squared_error(), 64);
        engine.install(vec![app(0, 0, 0)]).expect("install");
        assert_eq!(engine.squared_error(), 0);
    }

    /// Random valid timeline over a generated instance.
    fn random_timeline(engine: &Engine, seed: u32, len: usize) -> Vec<Application> {
        let mut rng = Mt19937::new(seed);
        let n = engine.n() as u32;
        let catalog = engine.instance().catalog();
        (0..len)
            .map(|_| {
                let op_id = rng.next_u32() % catalog.len() as u32;
                let op = catalog.get(op_id as usize).expect("op");
                let x = rng.next_u32() % (n - op.h + 1);
                let y = rng.next_u32() % (n - op.w + 1);
                app(op_id, x, y)
            })
            .collect()
    }

    fn reference_state(engine: &Engine, t: usize) -> Vec<u32> {
        let mut fresh = Engine::new(engine.instance().clone());
        fresh
            .install(engine.timeline()[..t].to_vec())
            .expect("install prefix");
        fresh.current().to_vec()
    }

    #[test]
    fn forward_steps_match_direct_seek() {
        let params = GeneratorParams {
            op_count: 40,
            ..GeneratorParams::default()
        };
        let mut engine = Engine::new(generate(11, &params).expect("generate"));
        let timeline = random_timeline(&engine, 3, 60);
        engine.install(timeline).expect("install");

        for (t1, t2) in [(0, 60), (10, 35), (35, 36), (59, 60), (0, 0)] {
            engine.seek(t1).expect("seek t1");
            engine.seek(t2).expect("seek t2");
            let stepped = engine.current().to_vec();

            engine.install(engine.timeline().to_vec()).expect("reinstall");
            engine.seek(t2).expect("direct");
            assert_eq!(stepped, engine.current(), "t1={t1} t2={t2}");
        }
    }

    #[test]
    fn state_depends_only_on_cursor_not_path() {
        let params = GeneratorParams {
            op_count: 25,
            ..GeneratorParams::default()
        };
        let mut engine = Engine::new(generate(7, &params).expect("generate"));
        let timeline = random_timeline(&engine, 99, 50);
        engine.install(timeline).expect("install");

        for t in [17, 3, 50, 49, 0, 25, 25, 8, 44] {
            engine.seek(t).expect("seek");
            assert_eq!(engine.cursor(), t);
            assert_eq!(engine.current(), reference_state(&engine, t).as_slice(), "t={t}");
        }
    }
}
