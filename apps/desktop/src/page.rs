use crate::FormContext;
use dioxus::prelude::*;
use leadform::features::registration::Field;
use leadform::features::registration::client::{RegistrationForm, Status};

const TITLE: &str = "Formulaire d'inscription";
const SUBMIT_LABEL: &str = "Envoyer";
const SENDING_LABEL: &str = "Envoi en cours…";

/// The registration form, wired to the [`FormContext`] provided at launch.
#[component]
pub fn RegistrationPage() -> Element {
    let ctx = use_context::<FormContext>();
    let mut form = use_signal(|| RegistrationForm::new(ctx.policy.clone()));

    let (status, submitting, can_submit) = {
        let state = form.read();
        (state.status().clone(), state.is_submitting(), state.can_submit())
    };

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(snapshot) = form.write().begin_submit() else {
            return;
        };

        let transport = ctx.transport.clone();
        spawn(async move {
            let outcome = transport.send(&snapshot).await;
            form.write().complete(outcome);
        });
    };

    let banner = match status {
        Status::Idle => rsx! {},
        Status::Success(message) => rsx! {
            div { class: "alert success", role: "status", "{message}" }
        },
        Status::Error(message) => rsx! {
            div { class: "alert error", role: "alert", "{message}" }
        },
    };
    let button_label = if submitting { SENDING_LABEL } else { SUBMIT_LABEL };

    rsx! {
        main {
            h1 { "{TITLE}" }
            form { novalidate: true, onsubmit,
                div { class: "grid",
                    for field in Field::ALL {
                        FieldControl { key: "{field}", field, form }
                    }
                }
                {banner}
                button { r#type: "submit", disabled: !can_submit, "{button_label}" }
            }
        }
    }
}

/// Text input for free-text fields, select for enumerated ones.
#[component]
fn FieldControl(field: Field, form: Signal<RegistrationForm>) -> Element {
    let (value, required, choices) = {
        let state = form.read();
        (
            state.value(field).to_owned(),
            state.policy().is_required(field),
            state.policy().choices(field).map(<[String]>::to_vec),
        )
    };

    let id = field.key();
    let label = if required { format!("{} *", field.label()) } else { field.label().to_owned() };
    let placeholder = field.placeholder();

    let control = match choices {
        Some(choices) => rsx! {
            select {
                id: "{id}",
                value: "{value}",
                onchange: move |evt: FormEvent| form.write().set_field(field, evt.value()),
                option { value: "", disabled: true, selected: value.is_empty(), "{placeholder}" }
                for choice in choices {
                    option { key: "{choice}", value: "{choice}", "{choice}" }
                }
            }
        },
        None => rsx! {
            input {
                id: "{id}",
                name: "{id}",
                r#type: input_type(field),
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| form.write().set_field(field, evt.value()),
            }
        },
    };

    rsx! {
        div { class: "field",
            label { r#for: "{id}", "{label}" }
            {control}
        }
    }
}

const fn input_type(field: Field) -> &'static str {
    match field {
        Field::Email => "email",
        Field::Mobile => "tel",
        _ => "text",
    }
}
