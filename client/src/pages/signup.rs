//! Sign-up form: email, password and nickname for a new local account.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;

use crate::net::types::SignUpRequest;

const MISSING_FIELDS_MESSAGE: &str = "Enter email, password and nickname.";
const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address.";

/// Trim and check the sign-up inputs. The password is taken verbatim.
pub(crate) fn validate_sign_up_input(email: &str, password: &str, nickname: &str) -> Result<SignUpRequest, &'static str> {
    let email = email.trim();
    let nickname = nickname.trim();
    if email.is_empty() || password.is_empty() || nickname.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
        _ => return Err(INVALID_EMAIL_MESSAGE),
    }
    Ok(SignUpRequest { email: email.to_owned(), password: password.to_owned(), nickname: nickname.to_owned() })
}

/// Account-creation form. `on_back` returns to the login view.
#[component]
pub fn SignUpForm(on_submit: Callback<SignUpRequest>, on_back: Callback<()>) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let nickname = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_sign_up_input(&email.get_untracked(), &password.get_untracked(), &nickname.get_untracked()) {
            Ok(request) => {
                info.set(String::new());
                on_submit.run(request);
            }
            Err(message) => info.set(message.to_owned()),
        }
    };
    let on_back_click = move |_| on_back.run(());

    view! {
        <div class="login-card">
            <h1>"Sign up"</h1>
            <form class="login-form" on:submit=on_form_submit>
                <label class="login-label" for="signup-email">"Email"</label>
                <input
                    id="signup-email"
                    class="login-input"
                    type="email"
                    autocomplete="email"
                    required=true
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <label class="login-label" for="signup-password">"Password"</label>
                <input
                    id="signup-password"
                    class="login-input"
                    type="password"
                    autocomplete="new-password"
                    required=true
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <label class="login-label" for="signup-nickname">"Nickname"</label>
                <input
                    id="signup-nickname"
                    class="login-input"
                    type="text"
                    autocomplete="nickname"
                    required=true
                    prop:value=move || nickname.get()
                    on:input=move |ev| nickname.set(event_target_value(&ev))
                />
                <button class="login-button" type="submit">"Create account"</button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="login-message">{move || info.get()}</p>
            </Show>
            <p class="login-card__footer">
                "Already registered? "
                <button class="login-link" type="button" on:click=on_back_click>
                    "Log in"
                </button>
            </p>
        </div>
    }
}
