//! # Registration
//!
//! The lead registration feature: a form of eight fields whose content is relayed by email.
//!
//! * [`model`] and [`policy`] are shared: the submission, its wire form and the
//!   required-field policy.
//! * `server` adds the `POST /api/send-email` endpoint, the email template and the
//!   [`Mailer`](server::Mailer) seam with its SMTP implementation.
//! * `client` adds the form state machine and the HTTP transport used by front ends.

#[cfg(feature = "client")]
pub mod client;
mod error;
pub mod model;
pub mod policy;
#[cfg(feature = "server")]
pub mod server;

pub use crate::error::{RegistrationError, RegistrationErrorExt};
pub use crate::model::{ApiReply, Field, SendEmailRequest, Submission};
pub use crate::policy::FormPolicy;

#[cfg(feature = "server")]
pub use server_slice::{Registration, RegistrationInner, init};

#[cfg(feature = "server")]
mod server_slice {
    use crate::error::RegistrationError;
    use crate::server::Mailer;
    use leadform_kernel::domain::config::MailConfig;
    use leadform_kernel::domain::registry::InitializedSlice;
    use std::sync::Arc;

    /// Registration feature state
    #[leadform_derive::leadform_slice]
    pub struct Registration {
        pub mail: MailConfig,
        pub mailer: Arc<dyn Mailer>,
    }

    /// Initialize the registration feature with the mailer that will relay submissions.
    ///
    /// # Errors
    /// [`RegistrationError::Config`] when no recipient is configured.
    pub fn init(
        mail: &MailConfig,
        mailer: Arc<dyn Mailer>,
    ) -> Result<InitializedSlice, RegistrationError> {
        if mail.recipient.trim().is_empty() {
            return Err(RegistrationError::Config {
                message: "mail.recipient is empty".into(),
                context: Some("Initializing registration slice".into()),
            });
        }

        tracing::info!(recipient = %mail.recipient, ?mailer, "Registration server slice initialized");

        let inner = RegistrationInner { mail: mail.clone(), mailer };

        Ok(InitializedSlice::new(Registration::new(inner)))
    }
}
