use super::transport::{SubmissionTransport, TransportError, TransportReply};
use crate::model::{Field, Submission};
use crate::policy::FormPolicy;
use tracing::{debug, warn};

pub const SUCCESS_MESSAGE: &str = "Votre formulaire a été envoyé avec succès !";
pub const FAILURE_MESSAGE: &str = "Erreur lors de l'envoi du formulaire";
pub const CONNECTION_MESSAGE: &str = "Erreur de connexion. Veuillez réessayer.";

/// Outcome banner of the last submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Success(String),
    Error(String),
}

impl Status {
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Success(message) | Self::Error(message) => Some(message),
        }
    }
}

/// Registration form state. Performs no I/O itself; [`RegistrationForm::submit`] drives a
/// transport, or callers pair [`RegistrationForm::begin_submit`] with
/// [`RegistrationForm::complete`] around their own request.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    policy: FormPolicy,
    submission: Submission,
    submitting: bool,
    status: Status,
}

impl RegistrationForm {
    #[must_use]
    pub fn new(policy: FormPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    #[must_use]
    pub const fn policy(&self) -> &FormPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn submission(&self) -> &Submission {
        &self.submission
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.submission.get(field)
    }

    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.submission.set(field, value);
    }

    /// Every required field holds non-whitespace text.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.policy.is_satisfied_by(&self.submission)
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.submitting
    }

    /// Starts an attempt and returns the snapshot to send, or `None` when the form
    /// cannot be submitted right now.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }

        self.status = Status::Idle;
        self.submitting = true;
        Some(self.submission.clone())
    }

    /// Records the outcome of the attempt started by [`RegistrationForm::begin_submit`].
    pub fn complete(&mut self, outcome: Result<TransportReply, TransportError>) {
        self.submitting = false;

        self.status = match outcome {
            Ok(reply) if reply.is_success() => {
                self.submission = Submission::default();
                Status::Success(SUCCESS_MESSAGE.to_owned())
            },
            Ok(reply) => {
                debug!(status = reply.status, "Registration rejected by endpoint");
                let body = reply.body;
                let message = [body.message, body.error]
                    .into_iter()
                    .flatten()
                    .find(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| FAILURE_MESSAGE.to_owned());
                Status::Error(message)
            },
            Err(err) => {
                warn!(error = %err, "Registration could not reach endpoint");
                Status::Error(format!("{CONNECTION_MESSAGE} {err}"))
            },
        };
    }

    /// Runs one attempt against `transport`. Returns `false` without calling it when the
    /// form cannot be submitted.
    pub async fn submit<T>(&mut self, transport: &T) -> bool
    where
        T: SubmissionTransport + ?Sized,
    {
        let Some(snapshot) = self.begin_submit() else {
            return false;
        };

        let outcome = transport.send(&snapshot).await;
        self.complete(outcome);
        true
    }
}
