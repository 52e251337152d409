//! Visitor Console
//!
//! Command-line front end for the visitor access console. Entity data lives
//! in memory for the life of the process; only the session is persisted.

use std::io;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visitor_core::config::default_config_path;
use visitor_core::{
    ConsoleConfig, DataStore, MemoryStorage, Result, SessionManager, SessionStorage,
    SqliteStorage,
};

mod cli;
mod console;
mod notifier;
mod shell;

use cli::{Cli, Command};
use console::Console;
use notifier::ConsoleNotifier;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => ConsoleConfig::load(&path)?,
        None => ConsoleConfig::default(),
    };
    let store = DataStore::from_config(&config.store);

    if cli.ephemeral {
        execute(store, MemoryStorage::new(), cli.command)
    } else {
        let path = config.session_db_path()?;
        tracing::debug!(path = %path.display(), "Opening session storage");
        execute(store, SqliteStorage::open(&path)?, cli.command)
    }
}

fn execute<S: SessionStorage>(store: DataStore, storage: S, command: Command) -> Result<()> {
    let session = SessionManager::new(storage, ConsoleNotifier);
    let mut console = Console::new(store, session);

    match command {
        Command::Shell => shell::run(&mut console, io::stdin().lock(), io::stdout()),
        command => {
            let outcome = console.run(command)?;
            println!("{}", outcome);
            Ok(())
        }
    }
}
