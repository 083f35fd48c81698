//! # CLI Argument Definitions
//!
//! This module defines the command-line interface (CLI) structure using the `clap` crate.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cargo xtask")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Developer and CI toolkit for the workspace")]
pub struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The main subcommand to execute.
    #[command(subcommand)]
    pub command: AppCommands,
}

/// Enumeration of available application subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Manage generated API documentation
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum DocsAction {
    /// Build the docs and push them to the pages branch (only when DOC=true)
    Publish {
        /// Settings file (defaults to 'publish.toml' in the root, if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory the export runs in (defaults to the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Print the resolved steps without running them
        #[arg(long)]
        dry_run: bool,
    },
    /// Only write the root index.html redirect into the doc directory
    Redirect {
        /// Crate to redirect to (defaults to the CRATE variable)
        #[arg(long = "crate")]
        crate_name: Option<String>,

        /// Directory containing the doc output (defaults to the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}
