//! Full-document navigation and values the server render leaves in `<head>`.

/// Replace the current document with `url`.
///
/// # Errors
///
/// Returns an error string when no browser window is available (SSR, native
/// tests) or the browser refuses the navigation.
pub fn navigate_to(url: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or_else(|| "no browser window".to_owned())?;
        window.location().set_href(url).map_err(|e| format!("navigation to {url} failed: {e:?}"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(format!("navigation to {url} requires a browser"))
    }
}

/// `content` of `<meta name="{name}">` in the current document.
#[cfg(feature = "hydrate")]
pub fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    match document.query_selector(&format!("meta[name=\"{name}\"]")) {
        Ok(element) => element?.get_attribute("content"),
        Err(e) => {
            log::warn!("meta lookup for {name} failed: {e:?}");
            None
        }
    }
}
