use crate::model::Submission;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::borrow::Cow;
use tracing::debug;

#[leadform_derive::leadform_error]
pub enum TransportError {
    /// The endpoint URL does not parse.
    #[error("Invalid endpoint{}: {message}", format_context(.context))]
    Endpoint { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The request could not be sent or its reply could not be read.
    #[error("Request failed{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },
    /// Internal fallback, also used by test transports.
    #[error("{message}{}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Whatever the endpoint answered, decoded leniently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplyBody {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ReplyBody {
    /// Decodes a reply, yielding an empty body for anything that is not a JSON object.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

/// HTTP status plus decoded body of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: ReplyBody,
}

impl TransportReply {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends a submission to the relay endpoint.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Issues exactly one request; no retries.
    ///
    /// # Errors
    /// Network-level failures only. Non-2xx replies are returned as [`TransportReply`].
    async fn send(&self, submission: &Submission) -> Result<TransportReply, TransportError>;
}

/// `reqwest` transport posting JSON to one fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// # Errors
    /// [`TransportError::Endpoint`] when `endpoint` is not an absolute URL.
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), endpoint)
    }

    /// Uses a preconfigured client (proxies, timeouts, custom roots).
    ///
    /// # Errors
    /// Same as [`HttpTransport::new`].
    pub fn with_client(client: Client, endpoint: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint).map_err(|e| TransportError::Endpoint {
            message: format!("{endpoint}: {e}").into(),
            context: None,
        })?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn send(&self, submission: &Submission) -> Result<TransportReply, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .context("Posting registration")?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.context("Reading reply")?;
        debug!(status, len = bytes.len(), "Registration endpoint replied");

        Ok(TransportReply { status, body: ReplyBody::parse(&bytes) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_endpoint_is_rejected() {
        let err = HttpTransport::new("/api/send-email").expect_err("needs a base");
        assert!(matches!(err, TransportError::Endpoint { .. }));
        assert!(HttpTransport::new("https://relay.example.dz/api/send-email").is_ok());
    }

    #[test]
    fn reply_body_is_lenient() {
        assert_eq!(ReplyBody::parse(b"<html>Bad Gateway</html>"), ReplyBody::default());
        assert_eq!(ReplyBody::parse(b""), ReplyBody::default());

        let body = ReplyBody::parse(br#"{"success":false,"error":"quota","extra":1}"#);
        assert_eq!(body.success, Some(false));
        assert_eq!(body.error.as_deref(), Some("quota"));
        assert_eq!(body.message, None);
    }

    #[test]
    fn success_range() {
        let reply = |status| TransportReply { status, body: ReplyBody::default() };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(302).is_success());
        assert!(!reply(500).is_success());
    }
}
