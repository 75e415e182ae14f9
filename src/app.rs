//! Wiring between the CLI, configuration and the library components.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;

use crate::args::{Cli, Command, FavoritesCommand};
use crate::config::{Config, ConfigStore};
use crate::favorites::FavoritesStore;
use crate::listings::Catalog;
use crate::server::ApiServer;
use crate::storage::FileStorage;

/// Load the config file named by `--config` (or the default one) and apply
/// the command-line overrides on top of it.
pub fn open_config(cli: &Cli) -> anyhow::Result<ConfigStore> {
    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let store = ConfigStore::open(path)?;

    if let Some(storage) = cli.storage.clone() {
        store.update(move |config| config.storage.path = Some(storage.clone()));
    }
    if let Command::Serve { bind: Some(bind) } = &cli.command {
        let bind = bind.clone();
        store.update(move |config| config.server.bind_addr = bind.clone());
    }

    Ok(store)
}

/// File-backed favorites store for the given configuration.
pub fn favorites_store(config: &Config) -> FavoritesStore {
    let storage = FileStorage::new(config.storage_path());
    tracing::debug!(path = %storage.path().display(), "Using favorites storage");
    FavoritesStore::new(Arc::new(storage), config.storage.favorites_key.clone())
}

/// Run a `favorites` subcommand, writing its output to `out`.
pub fn run_favorites(
    command: &FavoritesCommand,
    store: &FavoritesStore,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        FavoritesCommand::List => {
            for id in &store.favorites() {
                writeln!(out, "{}", id)?;
            }
        }
        FavoritesCommand::Check { id } => {
            writeln!(out, "{}", store.is_favorite(id))?;
        }
        FavoritesCommand::Toggle { id } => {
            let favorited = store.toggle_favorite(id);
            writeln!(out, "{}", favorited)?;
        }
        FavoritesCommand::Clear => {
            writeln!(out, "{}", store.clear())?;
        }
    }
    Ok(())
}

/// Bind the listing API and serve until Ctrl-C or SIGTERM.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let mut server = ApiServer::new(&config.server, Catalog::fixture());
    let addr = server
        .try_bind(&config.server.bind_addr)
        .await
        .context("Failed to bind listing API")?;
    println!("Listing API listening on http://{}", addr);
    server.run().await?;
    Ok(())
}
