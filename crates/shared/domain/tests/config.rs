use leadform_domain::config::{
    ApiConfig, DesktopConfig, LogFormat, MailConfig, PolicyPreset, ServerConfig, SmtpTls,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 5000);
    assert!(server.ssl.is_none());
    assert!(server.cors_origins.is_empty());

    let mail = MailConfig::default();
    assert_eq!(mail.host, "smtp.gmail.com");
    assert_eq!(mail.port, 465);
    assert_eq!(mail.tls, SmtpTls::Wrapper);
    assert_eq!(mail.recipient, "formation@insag.edu.dz");
    assert_eq!(mail.business_unit, "Formations Diplômantes");
    assert!(!mail.has_credentials());

    let desktop = DesktopConfig::default();
    assert_eq!(desktop.policy, PolicyPreset::Standard);
    assert!(desktop.endpoint.ends_with("/api/send-email"));
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080, "cors_origins": ["https://inscription.example"] },
        "mail": {
            "host": "localhost",
            "port": 2525,
            "tls": "none",
            "username": "relay@example.com",
            "password": "secret",
            "recipient": "inbox@example.com"
        }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.cors_origins, vec!["https://inscription.example".to_owned()]);
    assert_eq!(cfg.mail.tls, SmtpTls::Plain);
    assert_eq!(cfg.mail.recipient, "inbox@example.com");
    assert_eq!(cfg.mail.business_unit, "Formations Diplômantes");
    assert!(cfg.mail.has_credentials());
}

#[test]
fn sender_falls_back_to_username() {
    let mut mail =
        MailConfig { username: "relay@example.com".to_owned(), ..MailConfig::default() };
    assert_eq!(mail.sender(), "relay@example.com");

    mail.from = Some("noreply@example.com".to_owned());
    assert_eq!(mail.sender(), "noreply@example.com");
}

#[test]
fn mail_debug_redacts_password() {
    let mail = MailConfig { password: "hunter2".to_owned(), ..MailConfig::default() };
    let rendered = format!("{mail:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn config_mutation_does_not_leak_into_clones() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 9000;

    assert_eq!(original.server.port, 5000);
    assert_eq!(changed.server.port, 9000);
}

#[test]
fn policy_preset_parses_lowercase() {
    let strict: PolicyPreset = serde_json::from_value(json!("strict")).expect("preset");
    assert_eq!(strict, PolicyPreset::Strict);
    assert!(serde_json::from_value::<PolicyPreset>(json!("lenient")).is_err());
}

#[test]
fn log_section_parses_format_and_directory() {
    let raw = json!({ "log": { "level": "debug", "directory": "logs", "format": "json" } });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.log.level, "debug");
    assert_eq!(cfg.log.format, LogFormat::Json);
    assert_eq!(cfg.log.directory.as_deref(), Some(std::path::Path::new("logs")));
    assert_eq!(cfg.log.max_files, 10);
    assert!(cfg.log.console);
}

#[test]
fn cors_origins_accept_a_comma_separated_string() {
    let raw = json!({ "server": { "cors_origins": "https://a.example, https://b.example,," } });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.cors_origins, ["https://a.example", "https://b.example"]);
}
