#![cfg(feature = "server")]

use async_trait::async_trait;
use leadform_kernel::domain::config::MailConfig;
use leadform_registration::server::{Email, Mailer};
use leadform_registration::{Registration, RegistrationError, init};
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
fn init_creates_slice() {
    let slice = init(&MailConfig::default(), Arc::new(NullMailer)).expect("init should succeed");
    assert_eq!(slice.id, std::any::TypeId::of::<Registration>());

    let registration = slice.downcast_ref::<Registration>().expect("registration slice");
    assert_eq!(registration.mail.recipient, "formation@insag.edu.dz");
}

#[test]
fn init_requires_recipient() {
    let mail = MailConfig { recipient: " ".into(), ..MailConfig::default() };
    let err = init(&mail, Arc::new(NullMailer)).expect_err("no recipient");
    assert!(matches!(err, RegistrationError::Config { .. }));
}
