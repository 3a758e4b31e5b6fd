#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace crates: error enums with context
//! support, API data models, `OpenAPI`-aware handlers and feature slices.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! leadform-derive.workspace = true
//! ```
//!
//! Examples below are `ignore`d because they need the consuming crate's dependencies.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a standard API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` unless already present.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consuming crate enables its `server` feature.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` by default.
///
/// # Arguments
///
/// * `rename_all = "snake_case"` - Overrides the rename policy.
/// * `deny_unknown_fields = false` - Accepts payloads carrying extra keys.
///
/// # Example
///
/// ```rust,ignore
/// use leadform_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct ApiReply {
///     pub success: bool,
///     pub message: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Bridges an Axum handler with `OpenAPI` documentation.
///
/// Accepts the `utoipa::path` arguments (`post`, `path = "..."`, `request_body = ...`,
/// `responses(...)`, `tag = ...`) and forwards them when the consuming crate
/// enables its `server` feature.
///
/// # Example
///
/// ```rust,ignore
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Turns an enum into a workspace error type.
///
/// # Features
///
/// * Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * Generates a `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>`
///   and to `Result<T, Source>` for every wrapped source error.
/// * Implements `From<Source>` for variants with a `source` field, so `?` works.
/// * Implements `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * Emits a private `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// * Applied to an enum with named-field variants only.
/// * A variant with a `source` field (or a `#[source]`/`#[from]` field) must also
///   carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[leadform_derive::leadform_error]
/// pub enum MailError {
///     #[error("SMTP error{}: {source}", format_context(.context))]
///     Smtp { source: lettre::transport::smtp::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn send() -> Result<(), MailError> {
///     transport.send(message).context("Relaying registration")?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn leadform_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Defines a feature slice handle.
///
/// Generates `<Name>Inner` holding the fields, an `Arc`-backed `<Name>` wrapper
/// with `new`, `Deref` to the inner state and a `FeatureSlice` impl so the handle
/// can be registered in the API state.
///
/// # Example
/// ```rust,ignore
/// #[leadform_derive::leadform_slice]
/// pub struct Registration {
///     pub mailer: Arc<dyn Mailer>,
/// }
///
/// let slice = Registration::new(RegistrationInner { mailer });
/// ```
#[proc_macro_attribute]
pub fn leadform_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
