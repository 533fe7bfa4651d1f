//! Jotter CLI - manage notes and their options from the command line
//!
//! Drives the same options menu the note editor shows: pinning, markdown,
//! sharing, publishing and collaborators.

mod cli;
mod commands;
mod error;
mod terminal;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::collab::run_collab;
use crate::commands::common::{resolve_config_path, resolve_db_path};
use crate::commands::link::run_link;
use crate::commands::list::run_list;
use crate::commands::menu::run_menu;
use crate::commands::search::run_search;
use crate::commands::select::run_select;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jotter=info,warn")),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path)?;
    let config_path = resolve_config_path(cli.config);
    let config_path = config_path.as_deref();

    match cli.command {
        Commands::Add { content } => run_add(&content, &db_path)?,
        Commands::List { limit, json } => run_list(limit, json, &db_path)?,
        Commands::Search { query, limit, json } => run_search(&query, limit, json, &db_path)?,
        Commands::Menu { id, json } => run_menu(&id, json, &db_path, config_path)?,
        Commands::Select { id, row, json } => {
            run_select(&id, &row, json, &db_path, config_path)?;
        }
        Commands::Collab { command } => run_collab(command, &db_path, config_path)?,
        Commands::Link { id, suffix } => {
            run_link(&id, suffix.as_deref(), &db_path, config_path)?;
        }
    }

    Ok(())
}
