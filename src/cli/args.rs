//! CLI argument definitions using clap
//!
//! Commands:
//! - histql prepare --config <path>
//! - histql describe-key <hex>
//! - histql encode-symbol <text>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// histql - point-in-time queries over blockchain history
#[derive(Parser, Debug)]
#[command(name = "histql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum log severity written to stderr (trace, info, warn, error, fatal)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prepare a query config and print the resolved registry
    Prepare {
        /// Path to the query config file
        #[arg(long, default_value = "./queries.json")]
        config: PathBuf,
    },

    /// Render a hex-encoded store key in readable form
    DescribeKey {
        /// Key bytes as hex
        key: String,
    },

    /// Show the numeric and key encodings of a name
    EncodeSymbol {
        /// Name text, up to 13 characters of `.12345a-z`
        text: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
