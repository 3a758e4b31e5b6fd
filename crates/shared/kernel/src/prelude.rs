//! Common imports for slices and apps.

pub use crate::config::{ConfigError, ConfigErrorExt, load_api_config, load_config};
pub use leadform_domain::config::{ApiConfig, DesktopConfig, MailConfig};
pub use leadform_domain::registry::{FeatureSlice, InitializedSlice};

#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateError};
