//! TUI Pairs (workspace facade crate).
//!
//! Re-exports the member crates under `tui_pairs::{core,input,term,types}` and
//! holds the front-end glue shared by the binary and the integration tests.

pub mod app;
pub mod store;

pub use tui_pairs_core as core;
pub use tui_pairs_input as input;
pub use tui_pairs_term as term;
pub use tui_pairs_types as types;
