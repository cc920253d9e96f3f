//! CLI subcommand implementations.

pub mod analyze;
pub mod export;
pub mod races;
pub mod range;
pub mod util;
