//! Library exports for mesa-cli.
//!
//! The CLI structure is exported for documentation tooling and tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
