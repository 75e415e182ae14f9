use std::fs::OpenOptions;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Initialize tracing for the process.
///
/// `RUST_LOG` wins over `config.level`. Output goes to `config.file`
/// (appended) when set, otherwise to stderr so stdout stays clean for
/// command output.
///
/// Calling this twice is harmless: the second subscriber is dropped.
pub fn init_tracing(config: &LoggingConfig) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(UtcTime::rfc_3339()),
            )
        }
        None => None,
    };

    let stderr_layer = file_layer.is_none().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_timer(UtcTime::rfc_3339())
    });

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing already initialized");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_output_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("idxsite.log");
        let config = LoggingConfig {
            level: "debug".to_string(),
            file: Some(path.clone()),
        };

        init_tracing(&config).unwrap();

        assert!(path.exists());
    }
}
