//! Names shared between the server, the client and the API documentation.

/// `OpenAPI` tag for operational endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the registration relay.
pub const REGISTRATION_TAG: &str = "Registration";

pub const HEALTH_PATH: &str = "/health";
pub const SEND_EMAIL_PATH: &str = "/api/send-email";
pub const DOCS_PATH: &str = "/docs";

/// Prefix of the layered environment overrides (`LEADFORM__MAIL__USERNAME`).
pub const ENV_PREFIX: &str = "LEADFORM";

/// Subject prefix of every relayed registration.
pub const SUBJECT_PREFIX: &str = "Nouvelle inscription";
