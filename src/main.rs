use clap::Parser;

use idxsite::app;
use idxsite::args::{Cli, Command};
use idxsite::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = app::open_config(&cli)?.get();
    init_tracing(&config.logging)?;

    match &cli.command {
        Command::Serve { .. } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(app::serve(&config))
        }
        Command::Favorites(command) => {
            let store = app::favorites_store(&config);
            let mut stdout = std::io::stdout().lock();
            app::run_favorites(command, &store, &mut stdout)
        }
    }
}
