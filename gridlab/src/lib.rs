//! Grid puzzle engine: conditional-replace timelines with seek.
//!
//! An instance is an N x N grid of values, a target grid, and a catalog of
//! rectangular "replace `a` with `b`" operations. A solution is a timeline of
//! placed operations; the engine applies it and can seek to any prefix.
//!
//! - **[`core`]**: Pure, deterministic logic (grids, catalog, engine,
//!   generator, serializer). No I/O.
//! - **[`io`]**: Side-effecting operations (instance/solution text, files,
//!   config, solver processes).
//!
//! Orchestration modules ([`generate`], [`inspect`], [`score`]) combine the
//! two to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod generate;
pub mod inspect;
pub mod io;
pub mod logging;
pub mod score;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
