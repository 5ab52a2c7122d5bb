//! Browser client for the sign-in flow.
//!
//! Compiled twice: with `ssr` it is rendered by the axum server, with
//! `hydrate` it runs as WebAssembly and takes over the server-rendered DOM.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Root component, HTML shell and the login/sign-up switch |
//! | [`pages`] | `LoginForm` and `SignUpForm` components |
//! | [`state`] | Headless form and session state |
//! | [`net`] | REST helpers and wire types |
//! | [`util`] | Browser navigation |

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and hydrate the SSR markup.
///
/// Context the server provided while rendering is gone in the browser, so the
/// identity-provider URL is read back from the `<meta>` tag `app::shell` wrote.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use leptos::context::provide_context;
    use state::login_form::{IDENTITY_PROVIDER_META_NAME, IdentityProviderUrl};

    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger unavailable: {e}").into());
    }

    let identity_provider_url =
        IdentityProviderUrl::resolve(util::navigation::meta_content(IDENTITY_PROVIDER_META_NAME));
    leptos::mount::hydrate_body(move || {
        provide_context(identity_provider_url);
        app::App()
    });
}
