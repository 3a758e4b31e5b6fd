use crate::Logger;
use crate::error::LoggerError;
use leadform_domain::config::{LogConfig, LogFormat};
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) level: LevelFilter,
    pub(crate) directives: Option<String>,
    pub(crate) console: bool,
    pub(crate) directory: Option<PathBuf>,
    pub(crate) format: LogFormat,
    pub(crate) rotation: Rotation,
    pub(crate) max_files: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            directives: None,
            console: true,
            directory: None,
            format: LogFormat::Text,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// Configures the global tracing subscriber. A name is mandatory before [`LoggerBuilder::init`]
/// becomes available; it prefixes the rolling log files.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    pub(crate) settings: Settings,
    name: N,
}

impl LoggerBuilder<NoName> {
    pub(crate) fn new() -> Self {
        Self { settings: Settings::default(), name: NoName }
    }

    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { settings: self.settings, name: WithName(name.into()) }
    }
}

impl LoggerBuilder<WithName> {
    /// Applies a [`LogConfig`] section on top of the current settings.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] when `level` is not a level name.
    pub fn settings(mut self, config: &LogConfig) -> Result<Self, LoggerError> {
        self.settings.level =
            config.level.trim().parse().map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Unknown log level '{}': {e}", config.level).into(),
                context: Some("log.level".into()),
            })?;
        self.settings.directives = config.filter.clone().filter(|f| !f.trim().is_empty());
        self.settings.console = config.console;
        self.settings.directory = config.directory.clone();
        self.settings.format = config.format;
        self.settings.max_files = config.max_files;
        Ok(self)
    }

    /// Minimum level emitted when neither `RUST_LOG` nor directives say otherwise.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Adds programmatic filter directives (e.g., `leadform_registration=debug,hyper=info`).
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Also writes to rotated files in `directory`, created on init.
    #[must_use]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.settings.directory = Some(directory.into());
        self
    }

    #[must_use]
    pub const fn format(mut self, format: LogFormat) -> Self {
        self.settings.format = format;
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    /// Installs the subscriber.
    ///
    /// The returned [`Logger`] owns the file writer's worker guard; keep it alive until
    /// shutdown or buffered lines are lost.
    ///
    /// # Errors
    /// [`LoggerError::Subscriber`] if a global subscriber is already set,
    /// [`LoggerError::InvalidConfiguration`] for unusable settings and
    /// [`LoggerError::Appender`] when the log directory cannot be used.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: WithName(name) } = self;
        validate(&settings, &name)?;

        let filter = env_filter(&settings)?;
        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

        if settings.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &settings.directory {
            Some(directory) => {
                fs::create_dir_all(directory).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Creating {}", directory.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(settings.rotation.clone())
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(settings.max_files)
                    .build(directory)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let file = layer().with_writer(writer).with_ansi(false);
                layers.push(match settings.format {
                    LogFormat::Text => file.boxed(),
                    LogFormat::Json => file.json().boxed(),
                });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;

        tracing::debug!(name = %name, level = %settings.level, "Logger initialized");
        Ok(Logger { guard })
    }
}

fn validate(settings: &Settings, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if !settings.console && settings.directory.is_none() {
        return Err(LoggerError::InvalidConfiguration {
            message: "No output enabled; turn on the console or set a log directory".into(),
            context: None,
        });
    }

    if settings.directory.is_some() && settings.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: Some("File output".into()),
        });
    }

    Ok(())
}

fn env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    match &settings.directives {
        None => Ok(builder.from_env_lossy()),
        Some(directives) => builder.parse(directives).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("Invalid filter '{directives}': {e}").into(),
                context: None,
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_console_at_info() {
        let builder = LoggerBuilder::new().name("leadform-test");
        assert!(builder.settings.console);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert!(builder.settings.directory.is_none());
        assert_eq!(builder.settings.max_files, DEFAULT_MAX_FILES);
    }

    #[test]
    fn settings_apply_a_config_section() {
        let config = LogConfig {
            level: " debug ".into(),
            filter: Some("leadform_registration=trace".into()),
            console: false,
            directory: Some("logs".into()),
            format: LogFormat::Json,
            max_files: 3,
        };

        let builder = LoggerBuilder::new().name("leadform-test").settings(&config).expect("valid");
        assert_eq!(builder.settings.level, LevelFilter::DEBUG);
        assert_eq!(builder.settings.directives.as_deref(), Some("leadform_registration=trace"));
        assert!(!builder.settings.console);
        assert_eq!(builder.settings.format, LogFormat::Json);
        assert_eq!(builder.settings.max_files, 3);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let config = LogConfig { level: "loud".into(), ..LogConfig::default() };
        let err = LoggerBuilder::new().name("leadform-test").settings(&config).expect_err("bad level");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn init_rejects_unusable_settings_before_installing() {
        let err = LoggerBuilder::new().name("  ").init().expect_err("empty name");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerBuilder::new().name("silent").console(false).init().expect_err("no output");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let dir = tempdir().expect("tempdir");
        let err = LoggerBuilder::new()
            .name("rotating")
            .directory(dir.path())
            .max_files(0)
            .init()
            .expect_err("zero files");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerBuilder::new()
            .name("filtered")
            .directives("leadform=[")
            .init()
            .expect_err("bad directive");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
