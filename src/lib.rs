//! procrastinot — a hierarchical to-do engine behind a line-oriented shell.
//!
//! The crate splits into an engine and a shell. `model` owns the data: an
//! arena of tasks wired together by ids, plus named lists that reference
//! tasks without owning them. `ops` mutates and queries the arena, `render`
//! turns query results into indented checkbox trees, and `cli` parses the
//! line protocol and maps engine results to the exact strings users see.

pub mod cli;
pub mod error;
pub mod model;
pub mod ops;
pub mod render;
