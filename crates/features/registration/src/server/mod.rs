//! Email relay endpoint.

mod handler;
mod mailer;
mod template;

pub use handler::send_email;
pub use mailer::{Mailer, SmtpMailer};
pub use template::{Email, body, compose, escape_html};

use leadform_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Registration routes, documented in the `OpenAPI` document.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(handler::send_email))
}
