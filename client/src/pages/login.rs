//! Login form: identifier/secret submission, Kakao redirect, sign-up link.

use leptos::prelude::*;

use crate::state::login_form::{Credentials, DEFAULT_IDENTITY_PROVIDER_URL, Field, LoginFormCore, LoginHost};
use crate::util::navigation::navigate_to;

/// Browser-side [`LoginHost`]: callbacks from the parent plus real navigation.
#[derive(Clone, Copy)]
struct BrowserLoginHost {
    on_submit: Callback<Credentials>,
    on_sign_up: Callback<()>,
}

impl LoginHost for BrowserLoginHost {
    fn authenticate(&self, credentials: Credentials) {
        self.on_submit.run(credentials);
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = navigate_to(url) {
            #[cfg(feature = "hydrate")]
            log::warn!("{e}");
            #[cfg(not(feature = "hydrate"))]
            drop(e);
        }
    }

    fn request_sign_up(&self) {
        self.on_sign_up.run(());
    }
}

/// Two required inputs, a submit button, a Kakao button and a sign-up link.
///
/// `on_submit` is the authentication collaborator; it receives the payload
/// exactly once per accepted submission. The browser's own form submission
/// is always suppressed.
#[component]
pub fn LoginForm(
    on_submit: Callback<Credentials>,
    on_sign_up: Callback<()>,
    #[prop(optional, into)] identity_provider_url: Option<String>,
) -> impl IntoView {
    let url = identity_provider_url.unwrap_or_else(|| DEFAULT_IDENTITY_PROVIDER_URL.to_owned());
    let form = RwSignal::new(LoginFormCore::new(url));
    let host = BrowserLoginHost { on_submit, on_sign_up };

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.with_untracked(LoginFormCore::submit).dispatch(&host);
    };
    let on_kakao = move |_| form.with_untracked(LoginFormCore::login_with_identity_provider).dispatch(&host);
    let on_sign_up_click = move |_| form.with_untracked(LoginFormCore::request_sign_up).dispatch(&host);

    view! {
        <div class="login-card">
            <h1>"Log in"</h1>
            <form class="login-form" on:submit=on_form_submit>
                <label class="login-label" for={Field::Identifier.input_id()}>{Field::Identifier.label()}</label>
                <input
                    id={Field::Identifier.input_id()}
                    class="login-input"
                    type={Field::Identifier.input_type()}
                    name="identifier"
                    autocomplete={Field::Identifier.autocomplete()}
                    required=true
                    prop:value=move || form.with(|f| f.identifier().to_owned())
                    on:input=move |ev| form.update(|f| f.set_identifier(event_target_value(&ev)))
                />
                <label class="login-label" for={Field::Secret.input_id()}>{Field::Secret.label()}</label>
                <input
                    id={Field::Secret.input_id()}
                    class="login-input"
                    type={Field::Secret.input_type()}
                    name="secret"
                    autocomplete={Field::Secret.autocomplete()}
                    required=true
                    prop:value=move || form.with(|f| f.secret().to_owned())
                    on:input=move |ev| form.update(|f| f.set_secret(event_target_value(&ev)))
                />
                <button class="login-button" type="submit">"Log in"</button>
            </form>
            <button class="login-button login-button--kakao" type="button" on:click=on_kakao>
                "Log in with Kakao"
            </button>
            <p class="login-card__footer">
                "No account? "
                <button class="login-link" type="button" on:click=on_sign_up_click>
                    "Sign up"
                </button>
            </p>
        </div>
    }
}
