//! Command-line interface

pub mod output;

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Migrates a Flow package to TypeScript
#[derive(Debug, Parser, Clone)]
#[command(name = "sink")]
#[command(version)]
#[command(about = "Migrates a Flow-typed package to TypeScript", long_about = None)]
pub struct Cli {
    /// Package directory to migrate
    pub paths: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
