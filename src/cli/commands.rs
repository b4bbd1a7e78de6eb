//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Apartment rent transaction client
#[derive(Parser, Debug)]
#[command(name = "rtms-rent")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Query rent transactions for one district and month
    Query {
        /// 5-digit region code or district name
        #[arg(short, long)]
        region: String,

        /// Contract year-month (YYYYMM)
        #[arg(short, long)]
        deal_ymd: String,

        /// Page number
        #[arg(long, default_value = "1")]
        page_no: u32,

        /// Records per page
        #[arg(long, default_value = "10")]
        num_of_rows: u32,
    },

    /// List supported regions
    Regions {
        /// Only regions of this province
        #[arg(long)]
        sido: Option<String>,
    },

    /// List documented upstream result codes
    ResultCodes,

    /// Decode and classify a saved response body
    Parse {
        /// File holding the raw response body
        file: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Indented JSON
    Pretty,
}
