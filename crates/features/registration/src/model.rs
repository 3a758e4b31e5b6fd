//! Wire and form model shared by the endpoint and the form client.

use leadform_derive::api_model;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One of the eight registration form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Mobile,
    Company,
    Position,
    Formation,
    Source,
    Location,
}

impl Field {
    /// Every field, in form display order.
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Email,
        Self::Mobile,
        Self::Company,
        Self::Position,
        Self::Formation,
        Self::Source,
        Self::Location,
    ];

    /// JSON key of the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::Company => "company",
            Self::Position => "position",
            Self::Formation => "formation",
            Self::Source => "source",
            Self::Location => "location",
        }
    }

    /// Label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Nom et prénom",
            Self::Email => "Email",
            Self::Mobile => "Mobile",
            Self::Company => "Nom de l'entreprise",
            Self::Position => "Poste de travail",
            Self::Formation => "Formation",
            Self::Source => "Source",
            Self::Location => "Lieu de formation",
        }
    }

    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Jean Dupont",
            Self::Email => "jean@example.com",
            Self::Mobile => "06 12 34 56 78",
            Self::Company => "Nom de l'entreprise",
            Self::Position => "Votre poste actuel",
            Self::Formation => "Sélectionnez une formation",
            Self::Source => "Comment nous avez-vous connu ?",
            Self::Location => "Sélectionnez un lieu",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The values entered in one form interaction.
///
/// Absent or `null` keys decode to empty strings and unknown keys are ignored, so any
/// JSON object is a valid submission.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Submission {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub email: String,
    #[serde(deserialize_with = "lenient")]
    pub mobile: String,
    #[serde(deserialize_with = "lenient")]
    pub company: String,
    #[serde(deserialize_with = "lenient")]
    pub position: String,
    #[serde(deserialize_with = "lenient")]
    pub formation: String,
    #[serde(deserialize_with = "lenient")]
    pub source: String,
    #[serde(deserialize_with = "lenient")]
    pub location: String,
}

impl Submission {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Mobile => &self.mobile,
            Field::Company => &self.company,
            Field::Position => &self.position,
            Field::Formation => &self.formation,
            Field::Source => &self.source,
            Field::Location => &self.location,
        }
    }

    pub const fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Mobile => &mut self.mobile,
            Field::Company => &mut self.company,
            Field::Position => &mut self.position,
            Field::Formation => &mut self.formation,
            Field::Source => &mut self.source,
            Field::Location => &mut self.location,
        }
    }

    /// Replaces one field and leaves the others untouched.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }
}

/// Body accepted by `POST /api/send-email`.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Default)]
#[serde(default)]
pub struct SendEmailRequest {
    #[serde(flatten)]
    pub submission: Submission,
    /// Acquisition medium, printed as-is in the email.
    #[serde(deserialize_with = "lenient_opt")]
    pub medium: Option<String>,
    /// Accepted for older clients; the configured business unit is always used.
    #[serde(deserialize_with = "lenient_opt")]
    pub business_unit: Option<String>,
}

impl From<Submission> for SendEmailRequest {
    fn from(submission: Submission) -> Self {
        Self { submission, ..Self::default() }
    }
}

/// Reply of the send-email endpoint.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub success: bool,
    pub message: String,
}

impl ApiReply {
    pub const SENT: &'static str = "Email sent successfully";
    pub const FAILED: &'static str = "Failed to send email";

    #[must_use]
    pub fn sent() -> Self {
        Self { success: true, message: Self::SENT.to_owned() }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self { success: false, message: Self::FAILED.to_owned() }
    }
}

fn lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt(deserializer).map(Option::unwrap_or_default)
}

/// Strings pass through, `null` is absent and scalars keep their JSON text.
fn lenient_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Bool(flag) => flag.to_string(),
        Scalar::Int(number) => number.to_string(),
        Scalar::Float(number) => number.to_string(),
    }))
}
