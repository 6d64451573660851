//! CLI module
//!
//! Command-line interface for querying the management API.
//!
//! # Commands
//!
//! - `get` - Fetch an endpoint, optionally walking every page

mod commands;
mod runner;

pub use commands::{parse_key_val, Cli, Commands};
pub use runner::Runner;
