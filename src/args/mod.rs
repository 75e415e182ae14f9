//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "idxsite")]
#[command(about = "Real-estate listing site backend: favorites and mock listing API")]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Storage file holding favorites (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the mock listing API
    Serve {
        /// Bind address, e.g. 127.0.0.1:3000 (overrides config)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Manage locally saved favorite listings
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Print favorited listing ids, one per line
    List,

    /// Print whether a listing is favorited
    Check {
        /// Listing id
        id: String,
    },

    /// Toggle a listing and print its new state
    Toggle {
        /// Listing id
        id: String,
    },

    /// Remove all favorites and print how many were removed
    Clear,
}
