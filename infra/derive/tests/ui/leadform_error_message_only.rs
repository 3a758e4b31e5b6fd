use leadform_derive::leadform_error;
use std::borrow::Cow;

#[leadform_error]
pub enum RelayError {
    #[error("Relay rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {}
