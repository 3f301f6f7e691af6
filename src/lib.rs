//! Blockfall (workspace facade crate).
//!
//! Re-exports the game crates under `blockfall::{core,input,term,types}` and
//! holds the launch configuration used by the binary.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::{init_logging, Args, Config};
