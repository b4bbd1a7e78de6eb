//! CLI module
//!
//! Command-line interface for querying rent transactions.
//!
//! # Commands
//!
//! - `query` - Query one district and month
//! - `regions` - List supported regions
//! - `result-codes` - List documented upstream result codes
//! - `parse` - Decode and classify a saved response body

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{failure_message, success_message, Runner};
