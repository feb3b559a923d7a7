//! Tooling & Integration Layer
//!
//! Command-line access to a project's take list.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
