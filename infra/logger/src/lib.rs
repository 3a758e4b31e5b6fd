//! # Logger
//!
//! Installs the process-wide `tracing` subscriber: an [`EnvFilter`](tracing_subscriber::EnvFilter)
//! (default level, optional directives, `RUST_LOG` respected), a compact ANSI console layer and,
//! when a directory is set, a non-blocking rotated file layer in text or JSON.
//!
//! ## Example
//!
//! ```rust
//! # use leadform_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("leadform-server")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;

pub use crate::builder::{LoggerBuilder, NoName, WithName};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use leadform_domain::config::{LogConfig, LogFormat};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// Handle to the installed subscriber. Dropping it flushes and stops the file writer.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder; the name prefixes rotated files (`leadform-server.2026-10-19.log`).
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Shorthand for `builder().name(name).settings(config)?.init()`.
    ///
    /// # Errors
    /// See [`LoggerBuilder::settings`] and [`LoggerBuilder::init`].
    pub fn from_config(name: impl Into<String>, config: &LogConfig) -> Result<Self, LoggerError> {
        Self::builder().name(name).settings(config)?.init()
    }

    /// True when a file writer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
