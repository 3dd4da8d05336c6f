//! CLI subcommand implementations.

pub mod analyze;
