#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::docs;
use crate::models::args::{AppCommands, Cli, DocsAction};
use crate::services::logging;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    match cli.command {
        AppCommands::Docs { action } => match action {
            DocsAction::Publish { config, root, dry_run } => {
                docs::publish_docs(config.as_deref(), root.as_deref(), dry_run)?;
            },
            DocsAction::Redirect { crate_name, root } => {
                docs::write_redirect(crate_name.as_deref(), root.as_deref())?;
            },
        },
    }

    Ok(())
}
