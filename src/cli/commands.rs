//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Identity-management API client CLI
#[derive(Parser, Debug)]
#[command(name = "idm-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Tenant domain (overrides the config file)
    #[arg(short, long, global = true)]
    pub domain: Option<String>,

    /// Bearer token sent as the Authorization header
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// GET an endpoint and print the result
    Get {
        /// Endpoint path relative to the base path (e.g. `users` or `roles/rol_1/users`)
        path: String,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Walk every page and print one JSON item per line
        #[arg(long)]
        paginate: bool,

        /// Stop after this many items when paginating
        #[arg(long)]
        max_items: Option<usize>,
    },
}

/// Parse a `key=value` pair
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
