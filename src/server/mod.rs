//! HTTP server for the mock listing API.

mod connection;
pub mod error;
pub mod health;
pub mod router;
pub mod shutdown;

use std::future::IntoFuture;
use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::listings::{Catalog, Paging};
use crate::server::connection::ConnectionCounter;

pub use error::ApiError;
pub use health::HealthStatus;
pub use router::{build_router, AppState};
pub use shutdown::ShutdownManager;

/// How many ports above the configured one are tried when it is busy.
pub const PORT_FALLBACK_RANGE: u16 = 100;

/// How long `run` waits for open connections after a shutdown signal.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidBindAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("Could not find available port in range {start}-{end}")]
    NoFreePort { start: u16, end: u16 },

    #[error("try_bind() must be called before run()")]
    NotBound,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The listing API: a catalog behind an axum router, bound ahead of time.
pub struct ApiServer {
    /// Local address; meaningful once [`try_bind`](Self::try_bind) succeeded.
    pub addr: SocketAddr,
    /// Held from `try_bind` until `run` so the port cannot be taken in between.
    listener: Option<TcpListener>,
    state: AppState,
    shutdown: Arc<ShutdownManager>,
}

impl ApiServer {
    pub fn new(config: &ServerConfig, catalog: Catalog) -> Self {
        let paging = Paging {
            default_limit: config.default_page_size,
            max_limit: config.max_page_size,
        };
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            listener: None,
            state: AppState::new(catalog, paging),
            shutdown: Arc::default(),
        }
    }

    /// Bind `bind_addr`, or the first free port among the next
    /// [`PORT_FALLBACK_RANGE`] ports when it is taken.
    pub async fn try_bind(&mut self, bind_addr: &str) -> Result<SocketAddr, ServerError> {
        let requested: SocketAddr = bind_addr
            .parse()
            .map_err(|source| ServerError::InvalidBindAddress {
                addr: bind_addr.to_string(),
                source,
            })?;

        let listener = bind_with_fallback(requested).await?;
        let local = listener.local_addr()?;
        if local.port() != requested.port() && requested.port() != 0 {
            tracing::warn!(%requested, actual = %local, "Requested port busy, using fallback");
        }

        self.addr = local;
        self.listener = Some(listener);
        tracing::info!(addr = %local, "Listing API bound");
        Ok(local)
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve on the listener from [`try_bind`](Self::try_bind) until a
    /// shutdown signal, then drain open connections for up to
    /// [`DRAIN_TIMEOUT`].
    pub async fn run(self) -> Result<(), ServerError> {
        let Self {
            addr,
            listener,
            state,
            shutdown,
        } = self;
        let listener = listener.ok_or(ServerError::NotBound)?;

        tracing::info!(%addr, "Serving listing API");

        let make_service = build_router(state).into_make_service();
        let counted = ConnectionCounter::new(make_service, shutdown.clone());
        let signal = shutdown.clone();
        axum::serve(listener, counted)
            .with_graceful_shutdown(async move {
                if let Err(e) = signal.wait_for_shutdown().await {
                    tracing::error!(error = %e, "Failed to install signal handlers");
                }
            })
            .into_future()
            .await?;

        shutdown.wait_for_connections(DRAIN_TIMEOUT).await;
        tracing::info!(%addr, "Listing API stopped");
        Ok(())
    }
}

async fn bind_with_fallback(requested: SocketAddr) -> Result<TcpListener, ServerError> {
    let first = requested.port();
    let last = first.saturating_add(PORT_FALLBACK_RANGE);

    for port in first..=last {
        match TcpListener::bind(SocketAddr::new(requested.ip(), port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) => tracing::debug!(port, error = %e, "Bind failed, trying next port"),
        }
    }

    Err(ServerError::NoFreePort {
        start: first,
        end: last,
    })
}

/// Stops a running [`ApiServer`] from another task.
#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
