//! Kernel utilities shared across slices and apps.
//! Keep this crate lightweight: configuration loading plus the server state and system routes.
//!
//! ## Config loading
//! ```rust,no_run
//! use leadform_kernel::config::load_config;
//! use leadform_kernel::domain::config::DesktopConfig;
//!
//! let cfg: DesktopConfig = load_config(Some("desktop")).unwrap_or_default();
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use leadform_domain as domain;
