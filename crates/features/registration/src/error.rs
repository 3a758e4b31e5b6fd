use std::borrow::Cow;

/// A specialized [`RegistrationError`] enum of this crate.
#[leadform_derive::leadform_error]
pub enum RegistrationError {
    /// A sender or recipient that is not a valid mailbox.
    #[cfg(feature = "server")]
    #[error("Mail address error{}: {source}", format_context(.context))]
    Address { source: lettre::address::AddressError, context: Option<Cow<'static, str>> },
    /// The message could not be assembled.
    #[cfg(feature = "server")]
    #[error("Mail build error{}: {source}", format_context(.context))]
    Message { source: lettre::error::Error, context: Option<Cow<'static, str>> },
    /// Connection, authentication or delivery failure reported by the relay.
    #[cfg(feature = "server")]
    #[error("SMTP error{}: {source}", format_context(.context))]
    Smtp { source: lettre::transport::smtp::Error, context: Option<Cow<'static, str>> },
    /// The slice is missing from the API state.
    #[cfg(feature = "server")]
    #[error("Registration state error{}: {source}", format_context(.context))]
    State {
        source: leadform_kernel::server::ApiStateError,
        context: Option<Cow<'static, str>>,
    },
    /// Mail settings that cannot work.
    #[error("Registration config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal registration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
mod response {
    use super::RegistrationError;
    use crate::model::ApiReply;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};

    /// Every failure is logged with its detail and reported to the caller as a generic 500.
    impl IntoResponse for RegistrationError {
        fn into_response(self) -> Response {
            tracing::error!(error = %self, "Error sending email");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiReply::failed())).into_response()
        }
    }
}
