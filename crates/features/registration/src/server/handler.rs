use super::template::compose;
use crate::Registration;
use crate::error::{RegistrationError, RegistrationErrorExt};
use crate::model::{ApiReply, SendEmailRequest};
use axum::Json;
use axum::extract::State;
use leadform_derive::api_handler;
use leadform_domain::constants::REGISTRATION_TAG;
use leadform_kernel::server::ApiState;
use tracing::info;

/// Relays one registration to the configured recipient.
#[api_handler(
    post,
    path = "/api/send-email",
    request_body = SendEmailRequest,
    responses(
        (status = OK, description = "Registration relayed", body = ApiReply),
        (status = INTERNAL_SERVER_ERROR, description = "Relay failed", body = ApiReply),
    ),
    tag = REGISTRATION_TAG,
)]
pub async fn send_email(
    State(state): State<ApiState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<ApiReply>, RegistrationError> {
    let slice = state.try_get_slice::<Registration>().context("Resolving registration slice")?;
    let email = compose(&request, &slice.mail);

    slice.mailer.send(&email).await.context("Relaying registration")?;
    info!(to = %email.to, subject = %email.subject, "Registration email sent");

    Ok(Json(ApiReply::sent()))
}
