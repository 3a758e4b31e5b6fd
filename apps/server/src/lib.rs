//! # Lead Registration Server
//!
//! An `Axum` server exposing the registration relay (`POST /api/send-email`), a health
//! check and the `OpenAPI` documentation, with optional TLS and graceful shutdown.
//!
//! ## Example
//! ```no_run
//! use leadform_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(5000)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use axum_server::Handle;
use leadform::domain::config::ApiConfig;
use leadform::features::registration::server::Mailer;
use leadform::kernel::config::load_api_config;
use leadform::kernel::server::ApiState;
use leadform_logger::Logger;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Loads the server configuration from `path` and the environment, then installs the logger
/// described by its `log` section.
///
/// The configuration is read before any subscriber exists, so what was loaded is reported
/// once logging is live.
///
/// # Errors
/// Returns an error if the configuration is malformed or the logger cannot be installed.
pub fn bootstrap(path: impl AsRef<Path>) -> Result<(ApiConfig, Logger)> {
    let path = path.as_ref();
    let cfg = load_api_config(Some(path)).context("Critical: Configuration is malformed")?;
    let log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.log)?;

    info!(
        path = %path.display(),
        port = cfg.server.port,
        tls = cfg.server.ssl.is_some(),
        smtp = %cfg.mail.host,
        recipient = %cfg.mail.recipient,
        "Configuration loaded"
    );

    Ok((cfg, log))
}

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
    mailer: Option<Arc<dyn Mailer>>,
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

    /// Relays registrations through `mailer` instead of the SMTP transport built from
    /// `mail.*`.
    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
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
                    warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and wires the server.
    ///
    /// # Process
    /// 1. Checks the TLS files when TLS is configured
    /// 2. Initializes the feature slices (building the SMTP mailer unless one was injected)
    /// 3. Constructs the application state
    /// 4. Builds the router with docs, tracing and CORS layers
    ///
    /// # Errors
    /// Returns an error if:
    /// * SSL certificate/key files are missing
    /// * SMTP credentials are missing and no mailer was injected
    /// * A configured CORS origin is not a valid header value
    pub fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let slices = leadform::init(&self.cfg, self.mailer)
            .map_err(|e| anyhow!("Platform bootstrap failed: {e}"))?;

        let state = ApiState::builder()
            .config(self.cfg)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;

        let app = router::init(state.clone())?;

        Ok(Server { state, app })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
    app: Router,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        info!(address = %address, ssl = cfg.server.ssl.is_some(), "Starting server");

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
                .serve(self.app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Starting HTTP server on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(self.app.into_make_service())
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

    /// A clone of the assembled router, for in-process requests.
    #[must_use]
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

/// Waits for Ctrl+C or, on Unix, SIGTERM.
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
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
