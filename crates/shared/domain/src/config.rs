use crate::constants::SEND_EMAIL_PATH;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level server configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub log: LogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into handlers.
///
/// Decoded through [`ApiConfigInner`] directly, so untyped sources (environment strings)
/// still convert into numbers.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(from = "ApiConfigInner")]
pub struct ApiConfig {
    inner: Arc<ApiConfigInner>,
}

impl From<ApiConfigInner> for ApiConfig {
    fn from(inner: ApiConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
    /// Allowed CORS origins; empty means any origin. A single string is split on commas.
    #[serde(deserialize_with = "origin_list")]
    pub cors_origins: Vec<String>,
}

fn origin_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Origins;

    impl<'de> Visitor<'de> for Origins {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list of origins or a comma-separated string")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut origins = Vec::with_capacity(seq.size_hint().unwrap_or_default());
            while let Some(origin) = seq.next_element::<String>()? {
                origins.push(origin);
            }
            Ok(origins)
        }
    }

    deserializer.deserialize_any(Origins)
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// Implicit TLS from the first byte (port 465).
    #[default]
    Wrapper,
    /// Plain connection upgraded with `STARTTLS` (port 587).
    StartTls,
    /// Unencrypted, for local relays and test servers only.
    #[serde(rename = "none")]
    Plain,
}

/// Outbound mail: SMTP account and the fixed destination of every registration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub tls: SmtpTls,
    pub username: String,
    pub password: String,
    /// Sender address; the authenticated account when unset.
    pub from: Option<String>,
    pub recipient: String,
    /// Constant business unit printed in every email.
    pub business_unit: String,
}

impl MailConfig {
    /// The address registrations are sent from.
    #[must_use]
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }

    /// True when both halves of the SMTP credentials are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("recipient", &self.recipient)
            .field("business_unit", &self.business_unit)
            .finish()
    }
}

/// Output format of the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings shared by the server and the desktop app.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is unset (`error`..`trace`, or `off`).
    pub level: String,
    /// Extra directives such as `leadform_registration=debug,hyper=info`.
    pub filter: Option<String>,
    pub console: bool,
    /// Directory for daily-rotated log files; no file output when unset.
    pub directory: Option<PathBuf>,
    pub format: LogFormat,
    pub max_files: usize,
}

/// Required-field policy offered by the registration form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyPreset {
    /// Name, mobile, source and location are mandatory.
    #[default]
    Standard,
    /// Every field is mandatory.
    Strict,
}

/// Desktop form client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Absolute URL of the send-email route.
    pub endpoint: String,
    pub policy: PolicyPreset,
    pub window: WindowConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            ssl: None,
            cors_origins: Vec::new(),
        }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_owned(),
            port: 465,
            tls: SmtpTls::Wrapper,
            username: String::new(),
            password: String::new(),
            from: None,
            recipient: "formation@insag.edu.dz".to_owned(),
            business_unit: "Formations Diplômantes".to_owned(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            console: true,
            directory: None,
            format: LogFormat::Text,
            max_files: 10,
        }
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            endpoint: format!("http://localhost:5000{SEND_EMAIL_PATH}"),
            policy: PolicyPreset::Standard,
            window: WindowConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: "Formulaire d'inscription".to_owned(), width: 720.0, height: 860.0 }
    }
}
