//! Email rendering for a registration.

use crate::model::SendEmailRequest;
use leadform_domain::config::MailConfig;
use leadform_domain::constants::SUBJECT_PREFIX;

/// A fully rendered message, independent of the delivery mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Renders a registration into the message sent to the configured recipient.
#[must_use]
pub fn compose(request: &SendEmailRequest, mail: &MailConfig) -> Email {
    let text = body(request, &mail.business_unit);
    let html = format!("<pre>{}</pre>", escape_html(&text));

    Email {
        from: mail.sender().to_owned(),
        to: mail.recipient.clone(),
        subject: format!("{SUBJECT_PREFIX} - {}", request.submission.name),
        text,
        html,
    }
}

/// Plain-text body: one `::label : 'value'` line per entry, in a fixed order.
#[must_use]
pub fn body(request: &SendEmailRequest, business_unit: &str) -> String {
    let s = &request.submission;
    let lines = [
        ("nom et prénom", s.name.as_str()),
        ("Email", s.email.as_str()),
        ("Mobile", s.mobile.as_str()),
        ("Business unit", business_unit),
        ("Source", s.source.as_str()),
        ("Formation", s.formation.as_str()),
        ("Poste de travail", s.position.as_str()),
        ("Lieu de Formation", s.location.as_str()),
        ("Medium", request.medium.as_deref().unwrap_or_default()),
        ("Nom de l'entreprise", s.company.as_str()),
    ];

    lines.iter().map(|(label, value)| format!("::{label} : '{value}'\n")).collect()
}

/// Entity-encodes the characters that are significant in HTML text and attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
