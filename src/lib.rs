//! carelog library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use core::backup::BackupLogic;
use db::initialize::init_db;
use db::pool::DbPool;
use errors::AppResult;
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Service { .. } => cli::commands::service::handle(&cli.command, cfg),
        Commands::Helper { .. } => cli::commands::helper::handle(&cli.command, cfg),
        Commands::Client { .. } => cli::commands::client::handle(&cli.command, cfg),
        Commands::Slot { .. } => cli::commands::slot::handle(&cli.command, cfg),
        Commands::Record { .. } => cli::commands::record::handle(&cli.command, cfg),
        Commands::Daily { .. } => cli::commands::daily::handle(&cli.command, cfg),
        Commands::Performance { .. } => cli::commands::performance::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Settings { .. } => cli::commands::settings::handle(&cli.command, cfg),
    }
}

/// Bring the schema up to date and take the scheduled backup when due.
/// `init` creates the database itself, `config` never touches it and
/// `db` leaves migrations to `--migrate`.
fn prepare_database(command: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(
        command,
        Commands::Init | Commands::Config { .. } | Commands::Db { .. }
    ) {
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    if !matches!(command, Commands::Backup { .. }) {
        BackupLogic::run_if_due(&pool, cfg);
    }
    Ok(())
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = expand_tilde(custom_db).to_string_lossy().to_string();
    }

    prepare_database(&cli.command, &cfg)?;

    dispatch(&cli, &cfg)
}
