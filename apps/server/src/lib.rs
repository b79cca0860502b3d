//! # Valida CPF Server
//!
//! An Axum web server exposing Brazilian CPF validation at `GET|POST /api/cpf`,
//! a health check at `/health` and the `OpenAPI` reference at `/docs`.
//!
//! ## Example
//! ```no_run
//! use valida_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use axum_server::Handle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use valida_kernel::domain::config::{ApiConfig, LoggingConfig, RuntimeProfile, RuntimeSettings};
use valida_kernel::server::ApiState;
use valida_logger::{LevelFilter, Logger};
use valida_runtime::RuntimeConfig;

/// How long in-flight requests may take to finish after a shutdown signal.
const SHUTDOWN_GRACE: std::time::Duration = std::time::Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Caps the size of POST bodies read by the CPF endpoint.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.cfg.cpf.max_body_bytes = limit;
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The configured SSL certificate or key file does not exist
    /// * The CPF body limit is zero
    ///
    /// # Examples
    /// ```no_run
    /// # use valida_server::Server;
    /// # fn example() -> anyhow::Result<()> {
    /// let server = Server::builder().port(8080).build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        if self.cfg.cpf.max_body_bytes == 0 {
            return Err(anyhow!("cpf.max_body_bytes must be greater than zero"));
        }

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, max_body_bytes = self.cfg.cpf.max_body_bytes, "Initializing server");

        Ok(Server { state: ApiState::new(self.cfg) })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The fully assembled Axum router, without binding a socket.
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        info!(
            address = %address,
            ssl = cfg.server.ssl.is_some(),
            "Starting server"
        );

        let app = self.router();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        if let Some(ssl_config) = &cfg.server.ssl {
            info!("Starting HTTPS server on https://{address}");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Starting HTTP server on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Installs the global tracing subscriber described by the `logging` section.
///
/// # Errors
/// Returns an error for an unknown level or an invalid logger configuration.
pub fn init_logger(name: &str, cfg: &LoggingConfig) -> Result<Logger> {
    let level: LevelFilter =
        cfg.level.parse().map_err(|e| anyhow!("Invalid log level '{}': {e}", cfg.level))?;

    let mut builder = Logger::builder()
        .name(name)
        .level(level)
        .console(cfg.console)
        .max_files(cfg.max_files)
        .json(cfg.json);
    if let Some(filter) = &cfg.env_filter {
        builder = builder.env_filter(filter);
    }
    if let Some(path) = &cfg.path {
        builder = builder.path(path);
    }

    builder.init().context("Failed to initialize logging")
}

/// Maps the `runtime` section onto a Tokio runtime preset.
#[must_use]
pub fn runtime_config(settings: &RuntimeSettings) -> RuntimeConfig {
    let config = match settings.profile {
        RuntimeProfile::HighPerformance => RuntimeConfig::high_performance(),
        RuntimeProfile::MemoryEfficient => RuntimeConfig::memory_efficient(),
        RuntimeProfile::Default => RuntimeConfig::default(),
    };

    match settings.worker_threads {
        Some(threads) => config.with_worker_threads(threads),
        None => config,
    }
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
