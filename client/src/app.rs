//! Root component, SSR shell and the auth page that hosts both forms.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::net::types::SignUpRequest;
use crate::pages::login::LoginForm;
use crate::pages::signup::SignUpForm;
use crate::state::auth::AuthState;
use crate::state::login_form::{Credentials, IDENTITY_PROVIDER_META_NAME, IdentityProviderUrl};

/// HTML document wrapper rendered by the server around [`App`].
///
/// The identity-provider URL is written into `<head>` so the hydrating client
/// sees the same value the server rendered with.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let IdentityProviderUrl(identity_provider_url) =
        IdentityProviderUrl::resolve(use_context::<IdentityProviderUrl>().map(|url| url.0));

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=IDENTITY_PROVIDER_META_NAME content=identity_provider_url/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Sign in"/>
        <Router>
            <main>
                <Routes fallback=|| "Page not found.">
                    <Route path=path!("/") view=AuthPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Which form the auth page is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthView {
    #[default]
    Login,
    SignUp,
}

impl AuthView {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::SignUp,
            Self::SignUp => Self::Login,
        }
    }
}

/// Probe `/auth/me` and store the result. Browser only.
#[cfg(feature = "hydrate")]
fn refresh_current_user(auth: RwSignal<AuthState>) {
    auth.update(|a| a.loading = true);
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user().await;
        auth.set(AuthState { user, loading: false });
    });
}

/// Owns the login/sign-up switch and wires both forms to the server.
#[component]
pub fn AuthPage() -> impl IntoView {
    // Server and first client render agree on "nobody signed in"; the probe
    // below replaces the forms once the cookie turns out to be valid.
    let auth = RwSignal::new(AuthState::default());
    let view_mode = RwSignal::new(AuthView::Login);
    let message = RwSignal::new(String::new());
    let IdentityProviderUrl(identity_provider_url) =
        IdentityProviderUrl::resolve(use_context::<IdentityProviderUrl>().map(|url| url.0));

    #[cfg(feature = "hydrate")]
    Effect::new(move |_| refresh_current_user(auth));

    let on_login = Callback::new(move |credentials: Credentials| {
        message.set("Signing in...".to_owned());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            log::debug!("login submitted for {}", credentials.identifier);
            match crate::net::api::login(&credentials).await {
                Ok(_) => {
                    message.set(String::new());
                    refresh_current_user(auth);
                }
                Err(e) => message.set(e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        drop(credentials);
    });

    let on_register = Callback::new(move |request: SignUpRequest| {
        message.set("Creating account...".to_owned());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::sign_up(&request).await {
                Ok(_) => {
                    message.set(String::new());
                    view_mode.set(AuthView::Login);
                    refresh_current_user(auth);
                }
                Err(e) => message.set(e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        drop(request);
    });

    let switch_view = Callback::new(move |()| {
        message.set(String::new());
        view_mode.update(|v| *v = v.toggled());
    });

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::logout().await {
                Ok(()) => auth.set(AuthState { user: None, loading: false }),
                Err(e) => message.set(e),
            }
        });
    };

    view! {
        <div class="login-page">
            <Show when=move || auth.with(|a| a.user.is_some())>
                <div class="login-card">
                    <p class="login-message">
                        "Signed in as "
                        <strong>{move || auth.with(|a| a.display_name().unwrap_or_default().to_owned())}</strong>
                    </p>
                    <button class="login-button" type="button" on:click=on_logout>"Log out"</button>
                </div>
            </Show>
            <Show when=move || auth.with(AuthState::should_show_forms)>
                {
                    let identity_provider_url = identity_provider_url.clone();
                    move || match view_mode.get() {
                        AuthView::Login => view! {
                            <LoginForm
                                on_submit=on_login
                                on_sign_up=switch_view
                                identity_provider_url=identity_provider_url.clone()
                            />
                        }
                        .into_any(),
                        AuthView::SignUp => view! { <SignUpForm on_submit=on_register on_back=switch_view/> }.into_any(),
                    }
                }
            </Show>
            <Show when=move || !message.get().is_empty()>
                <p class="login-message">{move || message.get()}</p>
            </Show>
        </div>
    }
}
