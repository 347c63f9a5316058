pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod search;
pub mod storage;
pub mod test_utils;

pub use error::{Result, ScoutError};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
