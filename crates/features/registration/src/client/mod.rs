//! Form client: local validation and submission over HTTP.

mod form;
mod transport;

pub use form::{CONNECTION_MESSAGE, FAILURE_MESSAGE, RegistrationForm, SUCCESS_MESSAGE, Status};
pub use transport::{
    HttpTransport, ReplyBody, SubmissionTransport, TransportError, TransportErrorExt,
    TransportReply,
};
