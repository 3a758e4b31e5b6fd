//! Facade crate for the registration relay and its shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `leadform` with the desired feature flags (`server`/`client`).
//! - Call `leadform::init` (server) to register feature slices.

pub use leadform_domain as domain;
pub use leadform_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use leadform_kernel::server::router::system_router;
        pub use leadform_registration::server::router as registration_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use leadform_registration as registration;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "client")]
        "client",
        "registration",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// `mailer` replaces the SMTP relay built from `config.mail`, which is what tests and
/// local runs without credentials use.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    config: &domain::config::ApiConfig,
    mailer: Option<std::sync::Arc<dyn features::registration::server::Mailer>>,
) -> Result<Vec<domain::registry::InitializedSlice>, features::registration::RegistrationError> {
    use features::registration::server::SmtpMailer;

    let mailer = match mailer {
        Some(mailer) => mailer,
        None => std::sync::Arc::new(SmtpMailer::from_config(&config.mail)?),
    };

    Ok(vec![features::registration::init(&config.mail, mailer)?])
}
