//! Route paths and the sign-in redirect convention.
//!
//! Protected screens that fail verification are sent to the auth page
//! with a `redirect` query parameter naming the screen to return to
//! after login. A redirect already present in the incoming URL wins
//! over the current path.

use url::form_urlencoded;

/// Path of the sign-in screen.
pub const AUTH_PATH: &str = "/auth";

/// Query parameter carrying the post-login return path.
pub const REDIRECT_PARAM: &str = "redirect";

/// Check whether `path` belongs to the auth flow.
///
/// Matches `/auth` and anything beneath it, but not lookalikes such as
/// `/authors`.
pub fn is_auth_path(path: &str) -> bool {
    path == AUTH_PATH
        || path
            .strip_prefix(AUTH_PATH)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// The location a guarded screen was mounted at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    path: String,
    supplied_redirect: Option<String>,
}

impl RouteContext {
    /// A route with no query string.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            supplied_redirect: None,
        }
    }

    /// Parse a location that may carry a query string.
    ///
    /// Only the first `redirect` parameter is honored.
    pub fn parse(location: &str) -> Self {
        match location.split_once('?') {
            Some((path, query)) => {
                let supplied = form_urlencoded::parse(query.as_bytes())
                    .find_map(|(key, value)| {
                        (key == REDIRECT_PARAM).then(|| value.into_owned())
                    });
                Self {
                    path: path.to_string(),
                    supplied_redirect: supplied,
                }
            }
            None => Self::new(location),
        }
    }

    /// Path portion of the location.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The `redirect` parameter supplied in the incoming URL, decoded.
    pub fn supplied_redirect(&self) -> Option<&str> {
        self.supplied_redirect.as_deref()
    }

    /// Check whether this route is part of the auth flow.
    pub fn is_auth_page(&self) -> bool {
        is_auth_path(&self.path)
    }
}

/// Build the sign-in redirect for a route.
///
/// The return target is the route's own path unless the incoming URL
/// already carried a `redirect` parameter, which is preserved.
pub fn auth_redirect(route: &RouteContext) -> String {
    let target = route.supplied_redirect().unwrap_or(route.path());
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair(REDIRECT_PARAM, target)
        .finish();
    format!("{AUTH_PATH}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_paths_match_exactly_and_beneath() {
        assert!(is_auth_path("/auth"));
        assert!(is_auth_path("/auth/reset"));
        assert!(!is_auth_path("/authors"));
        assert!(!is_auth_path("/inventory"));
        assert!(!is_auth_path("/"));
    }

    #[test]
    fn parse_without_query() {
        let route = RouteContext::parse("/inventory");
        assert_eq!(route.path(), "/inventory");
        assert_eq!(route.supplied_redirect(), None);
    }

    #[test]
    fn parse_decodes_redirect_param() {
        let route = RouteContext::parse("/inventory?redirect=%2Forders%2F42");
        assert_eq!(route.path(), "/inventory");
        assert_eq!(route.supplied_redirect(), Some("/orders/42"));
    }

    #[test]
    fn parse_honors_first_redirect_only() {
        let route = RouteContext::parse("/x?redirect=%2Fa&redirect=%2Fb");
        assert_eq!(route.supplied_redirect(), Some("/a"));
    }

    #[test]
    fn parse_ignores_other_params() {
        let route = RouteContext::parse("/inventory?page=2&search=tent");
        assert_eq!(route.supplied_redirect(), None);
    }

    #[test]
    fn redirect_targets_current_path() {
        let route = RouteContext::new("/dashboard");
        assert_eq!(auth_redirect(&route), "/auth?redirect=%2Fdashboard");
    }

    #[test]
    fn redirect_preserves_supplied_target() {
        let route = RouteContext::parse("/inventory?redirect=/foo");
        assert_eq!(auth_redirect(&route), "/auth?redirect=%2Ffoo");
    }

    #[test]
    fn redirect_encodes_nested_paths() {
        let route = RouteContext::new("/orders/42/items");
        assert_eq!(auth_redirect(&route), "/auth?redirect=%2Forders%2F42%2Fitems");
    }
}
