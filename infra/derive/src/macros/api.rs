use super::error::derived_names;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::{Attribute, ItemFn, ItemStruct, LitBool, LitStr};

const DEFAULT_RENAME: &str = "camelCase";

#[derive(Default)]
struct ModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<LitBool>,
}

/// Serde settings already written by hand on the struct.
#[derive(Default)]
struct ExistingSerde {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

/// Expands `#[api_model]`: common derives, optional `ToSchema`, serde policy.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match model_attributes(args, &input) {
        Ok(attrs) => quote! {
            #attrs
            #input
        },
        Err(err) => err.to_compile_error(),
    }
}

/// Expands `#[api_handler]`: forwards the arguments to `utoipa::path` behind the `server` feature.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn model_attributes(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let args = parse_model_args(args)?;
    let existing = existing_serde(&input.attrs)?;
    let derives = derived_names(&input.attrs);

    let mut wanted = Vec::new();
    for (name, path) in [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ] {
        if !derives.contains(name) {
            wanted.push(path);
        }
    }
    let derive_attr = if wanted.is_empty() { quote! {} } else { quote! { #[derive(#(#wanted),*)] } };

    let schema_attr = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let rename = args.rename_all.unwrap_or_else(|| LitStr::new(DEFAULT_RENAME, Span::call_site()));
    let rename_attr = match &existing.rename_all {
        None => quote! { #[serde(rename_all = #rename)] },
        Some(current) if current.value() == rename.value() => quote! {},
        Some(current) => {
            return Err(syn::Error::new_spanned(
                current,
                "conflicting serde rename_all; drop it or pass the same value to api_model",
            ));
        },
    };

    let deny = args.deny_unknown_fields.as_ref().is_none_or(|flag| flag.value);
    let deny_attr = match (existing.deny_unknown_fields, deny) {
        (true, false) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set through serde; remove it before disabling",
            ));
        },
        (false, true) => quote! { #[serde(deny_unknown_fields)] },
        _ => quote! {},
    };

    Ok(quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
    })
}

fn parse_model_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let mut parsed = ModelArgs::default();

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("rename_all") {
            if parsed.rename_all.is_some() {
                return Err(meta.error("duplicate rename_all"));
            }
            parsed.rename_all = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("deny_unknown_fields") {
            if parsed.deny_unknown_fields.is_some() {
                return Err(meta.error("duplicate deny_unknown_fields"));
            }
            parsed.deny_unknown_fields = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported argument; expected rename_all or deny_unknown_fields"))
        }
    });
    parser.parse2(args)?;

    Ok(parsed)
}

fn existing_serde(attrs: &[Attribute]) -> syn::Result<ExistingSerde> {
    let mut found = ExistingSerde::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                found.rename_all = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                found.deny_unknown_fields = true;
            } else if meta.input.peek(syn::Token![=]) {
                // Other serde container options are left to serde itself.
                let _: syn::Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                meta.parse_nested_meta(|_| Ok(()))?;
            }
            Ok(())
        })?;
    }

    Ok(found)
}
