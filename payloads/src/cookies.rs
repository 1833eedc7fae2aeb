//! Cross-site request forgery token lookup.
//!
//! The API issues an `XSRF-TOKEN` cookie from its csrf-cookie endpoint and
//! expects the url-decoded value back in the `X-XSRF-TOKEN` header on every
//! request.

use reqwest::Url;

pub const XSRF_COOKIE: &str = "XSRF-TOKEN";
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Somewhere cookies for a url can be read from.
pub trait CookieSource: Send + Sync {
    /// The `name=value; name=value` cookie string that applies to `url`.
    fn cookie_string(&self, url: &Url) -> Option<String>;
}

#[cfg(not(target_arch = "wasm32"))]
impl CookieSource for reqwest::cookie::Jar {
    fn cookie_string(&self, url: &Url) -> Option<String> {
        use reqwest::cookie::CookieStore;

        self.cookies(url)
            .and_then(|value| value.to_str().ok().map(str::to_owned))
    }
}

/// Reads `document.cookie`; the browser owns the actual cookie jar.
#[cfg(target_arch = "wasm32")]
pub(crate) struct DocumentCookies;

#[cfg(target_arch = "wasm32")]
impl CookieSource for DocumentCookies {
    fn cookie_string(&self, _url: &Url) -> Option<String> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let document = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
        document.cookie().ok()
    }
}

/// Extract the url-decoded `XSRF-TOKEN` value from a cookie string.
pub fn xsrf_token(cookie_string: &str) -> Option<String> {
    let raw = cookie_string
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(XSRF_COOKIE)?.strip_prefix('='))?;
    if raw.is_empty() {
        return None;
    }
    match urlencoding::decode(raw) {
        Ok(token) => Some(token.into_owned()),
        Err(e) => {
            tracing::warn!("Ignoring undecodable XSRF-TOKEN cookie: {e}");
            None
        }
    }
}
