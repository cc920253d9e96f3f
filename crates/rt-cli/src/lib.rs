//! Race timeline CLI library.
//!
//! This crate provides the CLI interface for race timeline analysis.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
