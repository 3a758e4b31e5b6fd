use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, Map};
use leadform_domain::config::ApiConfig;
use leadform_domain::constants::ENV_PREFIX;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Custom error type for config loading.
#[leadform_derive::leadform_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
    #[error("Invalid config value{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Flat variables understood by the server for compatibility with plain `.env` deployments.
const PORT_VAR: &str = "PORT";
const LEGACY_STRING_VARS: [(&str, &str); 2] =
    [("EMAIL_USER", "mail.username"), ("EMAIL_PASSWORD", "mail.password")];

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest precedence first:
/// 1. **Base File**: an optional file (e.g., `server.toml`). Defaults to `"server"` in the
///    working directory; the extension is resolved by the `config` crate. A missing file is not
///    an error, every structure carries defaults.
/// 2. **Environment Overrides**: variables prefixed with `LEADFORM__`, nested with double
///    underscores (`LEADFORM__MAIL__USERNAME` maps to `mail.username`).
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed, or if the merged values do not
/// match the structure of `T`.
///
/// # Example
/// ```rust
/// use leadform_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    layered(path, None)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

/// Loads the server configuration: [`load_config`] layers plus the flat `PORT`,
/// `EMAIL_USER` and `EMAIL_PASSWORD` variables, which take precedence over everything else.
///
/// # Errors
/// Same as [`load_config`], and [`ConfigError::Invalid`] when `PORT` is not a valid port number.
pub fn load_api_config(path: Option<impl AsRef<Path>>) -> Result<ApiConfig, ConfigError> {
    load_api_config_from(path, None)
}

/// [`load_api_config`] reading both the `LEADFORM__` overrides and the flat variables from
/// `vars` instead of the process environment when it is given.
///
/// # Errors
/// Same as [`load_api_config`].
pub fn load_api_config_from(
    path: Option<impl AsRef<Path>>,
    vars: Option<Map<String, String>>,
) -> Result<ApiConfig, ConfigError> {
    let lookup = |name: &str| match &vars {
        Some(vars) => vars.get(name).cloned(),
        None => std::env::var(name).ok(),
    };
    let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let flat_port = present(PORT_VAR);
    let flat_strings: Vec<_> = LEGACY_STRING_VARS
        .iter()
        .filter_map(|&(name, key)| present(name).map(|value| (name, key, value)))
        .collect();

    let mut builder = layered(path, vars);

    if let Some(raw) = flat_port {
        let port = raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
            message: format!("{PORT_VAR}={raw}: {e}").into(),
            context: Some("Parsing listening port".into()),
        })?;
        builder = builder.set_override("server.port", i64::from(port)).context("Applying PORT")?;
    }

    for (name, key, value) in flat_strings {
        debug!(variable = name, key, "Applying flat environment override");
        builder = builder.set_override(key, value).context("Applying flat override")?;
    }

    builder
        .build()
        .context("Failed to build server config")?
        .try_deserialize::<ApiConfig>()
        .context("Failed to deserialize server config")
}

fn layered(
    path: Option<impl AsRef<Path>>,
    vars: Option<Map<String, String>>,
) -> ConfigBuilder<DefaultState> {
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    info!("Loading config from {}", effective_path.display());

    Config::builder().add_source(File::from(effective_path.as_path()).required(false)).add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .convert_case(config::Case::Snake)
            .source(vars),
    )
}
