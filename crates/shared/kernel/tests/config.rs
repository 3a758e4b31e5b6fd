use config::Map;
use leadform_kernel::config::{ConfigError, load_api_config_from, load_config};
use leadform_kernel::domain::config::{DesktopConfig, LogFormat, PolicyPreset, SmtpTls};
use std::fs;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
    Some(pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect())
}

fn no_env() -> Option<Map<String, String>> {
    env(&[])
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let cfg = load_api_config_from(Some(dir.path().join("absent.toml")), no_env()).expect("defaults");

    assert_eq!(cfg.server.port, 5000);
    assert_eq!(cfg.mail.host, "smtp.gmail.com");
    assert_eq!(cfg.mail.tls, SmtpTls::Wrapper);
}

#[test]
fn toml_file_overrides_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8081

[mail]
host = "localhost"
port = 1025
tls = "none"
recipient = "inbox@example.com"
"#,
    )
    .expect("write config");

    let cfg = load_api_config_from(Some(&path), no_env()).expect("config");
    assert_eq!(cfg.server.port, 8081);
    assert_eq!(cfg.mail.port, 1025);
    assert_eq!(cfg.mail.tls, SmtpTls::Plain);
    assert_eq!(cfg.mail.recipient, "inbox@example.com");
    assert_eq!(cfg.mail.business_unit, "Formations Diplômantes");
}

#[test]
fn flat_variables_win_over_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "[server]\nport = 8081\n[mail]\nusername = \"file@example.com\"\n")
        .expect("write config");

    let vars = env(&[
        ("PORT", "5050"),
        ("EMAIL_USER", "relay@example.com"),
        ("EMAIL_PASSWORD", "app-password"),
        ("LEADFORM__SERVER__PORT", "6060"),
    ]);
    let cfg = load_api_config_from(Some(&path), vars).expect("config");

    assert_eq!(cfg.server.port, 5050);
    assert_eq!(cfg.mail.username, "relay@example.com");
    assert_eq!(cfg.mail.password, "app-password");
    assert!(cfg.mail.has_credentials());
}

#[test]
fn blank_flat_variables_are_ignored() {
    let dir = tempdir().expect("tempdir");
    let cfg = load_api_config_from(
        Some(dir.path().join("absent.toml")),
        env(&[("EMAIL_USER", "   ")]),
    )
    .expect("config");

    assert!(cfg.mail.username.is_empty());
}

#[test]
fn invalid_port_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let err = load_api_config_from(Some(dir.path().join("absent.toml")), env(&[("PORT", "http")]))
        .expect_err("port must be numeric");

    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn prefixed_variables_override_typed_keys() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "[server]\nport = 8081\n[mail]\nusername = \"file@example.com\"\n")
        .expect("write config");

    let vars = env(&[
        ("LEADFORM__SERVER__PORT", "6060"),
        ("LEADFORM__SERVER__CORS_ORIGINS", "https://a.example,https://b.example"),
        ("LEADFORM__MAIL__PORT", "587"),
        ("LEADFORM__MAIL__TLS", "starttls"),
        ("LEADFORM__MAIL__USERNAME", "env@example.com"),
        ("LEADFORM__MAIL__PASSWORD", "0123456"),
        ("LEADFORM__MAIL__BUSINESS_UNIT", "ExecEd"),
        ("LEADFORM__LOG__MAX_FILES", "3"),
        ("LEADFORM__LOG__CONSOLE", "false"),
        ("LEADFORM__LOG__FORMAT", "json"),
        ("UNRELATED__SERVER__PORT", "1"),
    ]);
    let cfg = load_api_config_from(Some(&path), vars).expect("config");

    assert_eq!(cfg.server.port, 6060);
    assert_eq!(cfg.server.cors_origins, ["https://a.example", "https://b.example"]);
    assert_eq!(cfg.mail.port, 587);
    assert_eq!(cfg.mail.tls, SmtpTls::StartTls);
    assert_eq!(cfg.mail.username, "env@example.com");
    assert_eq!(cfg.mail.password, "0123456");
    assert_eq!(cfg.mail.business_unit, "ExecEd");
    assert_eq!(cfg.log.max_files, 3);
    assert!(!cfg.log.console);
    assert_eq!(cfg.log.format, LogFormat::Json);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[server\nport = ").expect("write config");

    let err = load_api_config_from(Some(&path), no_env()).expect_err("parse failure");
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
}

#[test]
fn desktop_config_loads_from_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("desktop.toml");
    fs::write(
        &path,
        "endpoint = \"https://relay.example.com/api/send-email\"\npolicy = \"strict\"\n",
    )
    .expect("write config");

    let cfg: DesktopConfig = load_config(Some(&path)).expect("config");
    assert_eq!(cfg.endpoint, "https://relay.example.com/api/send-email");
    assert_eq!(cfg.policy, PolicyPreset::Strict);
    assert_eq!(cfg.window.title, "Formulaire d'inscription");
}
