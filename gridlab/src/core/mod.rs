//! Deterministic, pure logic for grids, operations and timelines.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod generator;
pub mod grid;
pub mod instance;
pub mod mt;
pub mod serializer;
pub mod timeline;
