//! Command-line interface for strand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "strand")]
#[command(about = "C# P/Invoke binding generator for native libraries", long_about = None)]
pub struct Cli {
    /// Log rule decisions (overrides the default `STRAND_LOG` level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate bindings from a bindings file
    Generate {
        /// Bindings file (TOML)
        bindings: PathBuf,
        /// Write the generated source here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Translate without writing output and report skipped functions
    Check {
        /// Bindings file (TOML)
        bindings: PathBuf,
    },
}
