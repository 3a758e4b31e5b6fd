#![cfg(feature = "server")]

use async_trait::async_trait;
use leadform::domain::config::ApiConfig;
use leadform::features::registration::server::{Email, Mailer};
use leadform::features::registration::{Registration, RegistrationError};
use std::sync::Arc;

#[derive(Debug)]
struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn send(&self, _email: &Email) -> Result<(), RegistrationError> {
        Ok(())
    }
}

#[test]
fn injected_mailer_registers_registration() {
    let slices = leadform::init(&ApiConfig::default(), Some(Arc::new(NullMailer))).expect("init");
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].id, std::any::TypeId::of::<Registration>());
}

#[test]
fn default_mailer_needs_credentials() {
    let err = leadform::init(&ApiConfig::default(), None).expect_err("no credentials");
    assert!(matches!(err, RegistrationError::Config { .. }));
}

#[test]
fn registration_is_always_listed() {
    assert!(leadform::features::is_enabled("registration"));
    assert!(leadform::features::is_enabled("server"));
}
