use dioxus::prelude::*;

use crate::forms::{is_valid_email, LoginForm, PASSWORD_MIN_LEN};
use crate::login::{submit_login, LoginOutcome};
use crate::{use_auth, use_auth_handle};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Admin sign-in form.
///
/// Platform packages decide where an admitted user goes through `on_admitted`.
#[component]
pub fn LoginView(on_admitted: EventHandler<()>) -> Element {
    let handle = use_auth_handle();
    let mut auth = use_auth();
    let mut form = use_signal(LoginForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let handle = handle.clone();
        async move {
            loading.set(true);
            error.set(None);
            auth.with_mut(|state| state.notice = None);

            let outcome = submit_login(handle.service(), &form(), handle.base_url()).await;
            loading.set(false);
            match outcome {
                LoginOutcome::Admitted => on_admitted.call(()),
                LoginOutcome::Refused(message) => error.set(Some(message)),
            }
        }
    };

    let current = form();
    let email_invalid = !current.email.is_empty() && !is_valid_email(&current.email);
    let password_short =
        !current.password.is_empty() && current.password.chars().count() < PASSWORD_MIN_LEN;
    let can_submit = current.is_valid() && !loading();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div { class: "login-container",
            form { class: "login-card", onsubmit: handle_submit,
                h1 { "Admin Login" }
                p { class: "login-subtitle", "Sign in to manage your portfolio" }

                if let Some(notice) = auth().notice {
                    div { class: "message warning", "{notice}" }
                }

                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    r#type: "email",
                    placeholder: "admin@example.com",
                    value: "{current.email}",
                    oninput: move |evt| {
                        form.write().email = evt.value();
                        error.set(None);
                    },
                }
                if email_invalid {
                    span { class: "field-error", "Please enter a valid email address" }
                }

                label { r#for: "password", "Password" }
                div { class: "password-field",
                    input {
                        id: "password",
                        r#type: current.password_input_type(),
                        value: "{current.password}",
                        oninput: move |evt| {
                            form.write().password = evt.value();
                            error.set(None);
                        },
                    }
                    button {
                        r#type: "button",
                        class: "toggle-password",
                        onclick: move |_| form.write().toggle_password_visibility(),
                        if current.show_password { "Hide" } else { "Show" }
                    }
                }
                if password_short {
                    span { class: "field-error",
                        "Password must be at least {PASSWORD_MIN_LEN} characters"
                    }
                }

                if let Some(message) = error() {
                    div { class: "message error", "{message}" }
                }

                button {
                    r#type: "submit",
                    class: "btn primary",
                    disabled: !can_submit,
                    if loading() { "Signing in..." } else { "Sign In" }
                }
            }
        }
    }
}
