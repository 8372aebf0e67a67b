//! The one-time toast notice cookie.
//!
//! Notices ride in the `toastMessage` cookie: URL-encoded JSON
//! `{message, description}` with a one-day lifetime, shared with the
//! rest of the session through the client's cookie jar. Taking a notice
//! clears the cookie so it shows at most once.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use url::{Url, form_urlencoded};

use sewa_core::Notices;
use sewa_core::notice::{Notice, TOAST_COOKIE, TOAST_MAX_AGE_SECS};

/// Reads and writes the pending-notice cookie in a shared jar.
#[derive(Clone)]
pub struct ToastCookie {
    jar: Arc<Jar>,
    base: Url,
}

impl ToastCookie {
    pub(crate) fn new(jar: Arc<Jar>, base: Url) -> Self {
        Self { jar, base }
    }

    fn write(&self, value: &str, max_age: u64) {
        let cookie = format!("{TOAST_COOKIE}={value}; Max-Age={max_age}; Path=/");
        self.jar.add_cookie_str(&cookie, &self.base);
    }

    fn read_raw(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base)?;
        let header = header.to_str().ok()?.to_string();
        header
            .split("; ")
            .find_map(|pair| {
                pair.strip_prefix(TOAST_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
            })
            .map(str::to_string)
    }
}

impl Notices for ToastCookie {
    fn put(&self, notice: &Notice) {
        let Ok(json) = serde_json::to_string(notice) else {
            return;
        };
        let encoded: String = form_urlencoded::byte_serialize(json.as_bytes()).collect();
        self.write(&encoded, TOAST_MAX_AGE_SECS);
    }

    fn take(&self) -> Option<Notice> {
        let raw = self.read_raw()?;
        // Clear by overwrite before decoding so a malformed value
        // cannot wedge the slot.
        self.write("", 0);
        let decoded = decode_component(&raw)?;
        serde_json::from_str(&decoded).ok()
    }
}

/// Decode one URL-encoded cookie value.
fn decode_component(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(key, value)| format!("{key}{value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast_at(base: &str) -> ToastCookie {
        ToastCookie::new(Arc::new(Jar::default()), Url::parse(base).unwrap())
    }

    #[test]
    fn put_then_take_round_trips() {
        let toasts = toast_at("https://api.example.com");
        let notice = Notice::new("Your session has expired", "Please sign in again to continue.");

        toasts.put(&notice);
        assert_eq!(toasts.take(), Some(notice));
    }

    #[test]
    fn take_consumes_the_notice() {
        let toasts = toast_at("https://api.example.com");
        toasts.put(&Notice::session_expired());

        assert!(toasts.take().is_some());
        assert!(toasts.take().is_none());
    }

    #[test]
    fn put_replaces_any_pending_notice() {
        let toasts = toast_at("https://api.example.com");
        toasts.put(&Notice::new("first", "one"));
        toasts.put(&Notice::new("second", "two"));

        assert_eq!(toasts.take(), Some(Notice::new("second", "two")));
    }

    #[test]
    fn take_on_empty_jar_is_none() {
        let toasts = toast_at("https://api.example.com");
        assert!(toasts.take().is_none());
    }

    #[test]
    fn encoded_value_is_cookie_safe() {
        let toasts = toast_at("https://api.example.com");
        // Characters that would break a cookie header if left raw.
        let notice = Notice::new("semi;colon", "equals=and space");

        toasts.put(&notice);
        assert_eq!(toasts.take(), Some(notice));
    }

    #[test]
    fn decode_handles_plain_and_escaped_text() {
        assert_eq!(decode_component("abc"), Some("abc".to_string()));
        assert_eq!(decode_component("a%20b"), Some("a b".to_string()));
        assert_eq!(decode_component(""), None);
    }
}
