//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `blockfall::{core,input,term,types}` so binaries,
//! integration tests and benches share one import path. The terminal runner's
//! environment configuration lives in [`config`].

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::{AppConfig, ConfigError};
