use super::template::Email;
use crate::error::{RegistrationError, RegistrationErrorExt};
use async_trait::async_trait;
use leadform_domain::config::{MailConfig, SmtpTls};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::PoolConfig;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use tracing::{debug, info};

/// Delivers rendered registration emails.
#[async_trait]
pub trait Mailer: fmt::Debug + Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    /// Any failure to address, build or deliver the message.
    async fn send(&self, email: &Email) -> Result<(), RegistrationError>;
}

/// Pooled async SMTP relay, built once at startup and shared by every request.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl SmtpMailer {
    /// Builds the transport from the mail settings. No connection is opened yet.
    ///
    /// # Errors
    /// [`RegistrationError::Config`] when the credentials are missing, or
    /// [`RegistrationError::Smtp`] when the TLS parameters for the host cannot be built.
    pub fn from_config(mail: &MailConfig) -> Result<Self, RegistrationError> {
        if !mail.has_credentials() {
            return Err(RegistrationError::Config {
                message: "SMTP username and password are required".into(),
                context: Some("Set EMAIL_USER and EMAIL_PASSWORD or mail.username/mail.password".into()),
            });
        }

        let builder = match mail.tls {
            SmtpTls::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.host)
                .context("Preparing implicit TLS relay")?,
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&mail.host)
                .context("Preparing STARTTLS relay")?,
            SmtpTls::Plain => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&mail.host),
        };

        let transport = builder
            .port(mail.port)
            .credentials(Credentials::new(mail.username.clone(), mail.password.clone()))
            .pool_config(PoolConfig::new())
            .build();

        info!(host = %mail.host, port = mail.port, tls = ?mail.tls, "SMTP mailer configured");

        Ok(Self { transport, host: mail.host.clone(), port: mail.port })
    }
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<(), RegistrationError> {
        let message = Message::builder()
            .from(email.from.parse::<Mailbox>().context("Parsing sender address")?)
            .to(email.to.parse::<Mailbox>().context("Parsing recipient address")?)
            .subject(email.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(email.text.clone(), email.html.clone()))
            .context("Building registration message")?;

        let response = self.transport.send(message).await.context("Relaying over SMTP")?;
        debug!(code = %response.code(), "SMTP relay accepted message");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_mandatory() {
        let err = SmtpMailer::from_config(&MailConfig::default()).expect_err("no credentials");
        assert!(matches!(err, RegistrationError::Config { .. }));
    }

    #[tokio::test]
    async fn transport_builds_without_connecting() {
        let mail = MailConfig {
            host: "localhost".into(),
            port: 2525,
            tls: SmtpTls::Plain,
            username: "relay@example.dz".into(),
            password: "secret".into(),
            ..MailConfig::default()
        };

        let mailer = SmtpMailer::from_config(&mail).expect("builds lazily");
        let debug = format!("{mailer:?}");
        assert!(debug.contains("localhost"));
        assert!(!debug.contains("secret"));
    }
}
