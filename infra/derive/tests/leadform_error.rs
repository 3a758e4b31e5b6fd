use leadform_derive::leadform_error;
use std::borrow::Cow;

#[leadform_error]
pub enum RelayError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal relay error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn failing_io() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("disk unplugged"))
}

fn relay() -> Result<(), RelayError> {
    failing_io()?;
    Ok(())
}

#[test]
fn leadform_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/leadform_error_pass.rs");
    t.pass("tests/ui/leadform_error_message_only.rs");
}

#[test]
fn question_mark_converts_source_without_context() {
    let err = relay().expect_err("io failure should propagate");
    assert!(matches!(err, RelayError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "IO error: disk unplugged");
}

#[test]
fn context_on_source_result_is_rendered() {
    let err = failing_io().context("Writing relay log").expect_err("io failure");
    assert_eq!(err.to_string(), "IO error (Writing relay log): disk unplugged");
}

#[test]
fn context_on_own_result_overwrites_slot() {
    let err = relay().context("Relaying registration").expect_err("io failure");
    assert!(matches!(
        err,
        RelayError::Io { context: Some(ref c), .. } if c == "Relaying registration"
    ));
}

#[test]
fn internal_variant_accepts_plain_strings() {
    let borrowed = RelayError::from("mailer missing");
    assert_eq!(borrowed.to_string(), "Internal relay error: mailer missing");

    let owned = RelayError::from(format!("slot {}", 3));
    assert!(matches!(owned, RelayError::Internal { ref message, .. } if message == "slot 3"));
}
