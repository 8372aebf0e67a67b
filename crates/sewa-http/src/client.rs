//! The authenticated API client.
//!
//! All back-office traffic flows through [`ApiClient`]. It attaches the
//! ambient cookie session to every request, unwraps the standard
//! `{success, data, message}` envelope, and on a 401 from an eligible
//! request performs one silent refresh-and-retry cycle before giving up.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use sewa_core::envelope::Envelope;
use sewa_core::error::{AuthError, Error, HttpError, InvalidInputError, TransportError};
use sewa_core::notice::Notice;
use sewa_core::routes::{AUTH_PATH, is_auth_path};
use sewa_core::traits::{Navigator, Notices, SessionUser, VerifySession};
use sewa_core::{ApiUrl, Credentials, Result, RouteGuard};

use crate::endpoints::{CHECK_AUTH, LOGIN, LOGOUT, LoginRequest, REFRESH_SESSION};
use crate::toast::ToastCookie;

/// Per-call options: extra query parameters and a credentials override.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    anonymous: bool,
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Send without the ambient cookie session.
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

/// A re-issuable description of one request.
///
/// The retry cycle needs to send the same request twice, so the method,
/// path, query and body are kept as plain data rather than as a built
/// `reqwest` request.
#[derive(Debug, Clone)]
struct RequestSpec {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    anonymous: bool,
}

impl RequestSpec {
    fn new(method: Method, path: &str, options: RequestOptions) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: options.query,
            body: None,
            anonymous: options.anonymous,
        }
    }

    fn with_body<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|err| InvalidInputError::Body {
            reason: err.to_string(),
        })?;
        self.body = Some(value);
        Ok(self)
    }
}

/// One delivery of a request, carrying the single-retry marker.
///
/// The marker is never flipped in place: `retry()` produces the marked
/// successor that replaces the original in the dispatch loop, so an
/// attempt value can never claim both states.
#[derive(Debug)]
struct Attempt<'a> {
    spec: &'a RequestSpec,
    retried: bool,
}

impl<'a> Attempt<'a> {
    fn first(spec: &'a RequestSpec) -> Self {
        Self {
            spec,
            retried: false,
        }
    }

    fn retry(&self) -> Self {
        Self {
            spec: self.spec,
            retried: true,
        }
    }
}

/// The configured request sender for the back-office API.
///
/// Cheap to clone; all clones share one cookie jar, so a session
/// refreshed through any of them re-arms the rest.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base: ApiUrl,
    /// Sender with the ambient cookie session attached.
    http: reqwest::Client,
    /// Cookie-less sender for anonymous calls.
    bare: reqwest::Client,
    jar: Arc<Jar>,
    navigator: Arc<dyn Navigator>,
    toasts: ToastCookie,
}

impl ApiClient {
    /// Create a client for `base`, wiring up the shared cookie jar and
    /// the host's navigation seam.
    pub fn new(base: ApiUrl, navigator: Arc<dyn Navigator>) -> Self {
        let jar = Arc::new(Jar::default());
        let user_agent = concat!("sewa/", env!("CARGO_PKG_VERSION"));

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .cookie_provider(jar.clone())
            .build()
            .expect("failed to build HTTP client");
        let bare = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .expect("failed to build HTTP client");

        let toasts = ToastCookie::new(jar.clone(), base.as_url().clone());

        Self {
            inner: Arc::new(ClientInner {
                base,
                http,
                bare,
                jar,
                navigator,
                toasts,
            }),
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.inner.base
    }

    /// The one-time notice store backed by this client's cookie jar.
    pub fn toasts(&self) -> &ToastCookie {
        &self.inner.toasts
    }

    /// A route guard wired to this client's session check and notices.
    pub fn guard(&self) -> RouteGuard<'_> {
        RouteGuard::new(self, &self.inner.toasts)
    }

    /// Current `Cookie` header value for the API origin, if any.
    pub fn cookie_snapshot(&self) -> Option<String> {
        let header = self.inner.jar.cookies(self.inner.base.as_url())?;
        header.to_str().ok().map(str::to_string)
    }

    /// Add a cookie (a `Set-Cookie`-style string) to the ambient jar.
    pub fn add_cookie(&self, cookie: &str) {
        self.inner.jar.add_cookie_str(cookie, self.inner.base.as_url());
    }

    /// GET `path` and unwrap the envelope payload.
    #[instrument(skip(self), fields(base = %self.inner.base))]
    pub async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.get_with(path, RequestOptions::new()).await
    }

    /// GET `path` with per-call options.
    #[instrument(skip(self, options), fields(base = %self.inner.base))]
    pub async fn get_with<T>(&self, path: &str, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let spec = RequestSpec::new(Method::GET, path, options);
        self.request(spec).await
    }

    /// POST `body` to `path` and unwrap the envelope payload.
    #[instrument(skip(self, body), fields(base = %self.inner.base))]
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let spec = RequestSpec::new(Method::POST, path, RequestOptions::new()).with_body(body)?;
        self.request(spec).await
    }

    /// POST `body` to `path` where the envelope carries no payload of
    /// interest.
    #[instrument(skip(self, body), fields(base = %self.inner.base))]
    pub async fn post_no_response<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize,
    {
        let spec = RequestSpec::new(Method::POST, path, RequestOptions::new()).with_body(body)?;
        self.request_envelope::<serde_json::Value>(spec)
            .await?
            .into_unit()
    }

    /// PUT `body` to `path` and unwrap the envelope payload.
    #[instrument(skip(self, body), fields(base = %self.inner.base))]
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let spec = RequestSpec::new(Method::PUT, path, RequestOptions::new()).with_body(body)?;
        self.request(spec).await
    }

    /// PATCH `body` to `path` and unwrap the envelope payload.
    #[instrument(skip(self, body), fields(base = %self.inner.base))]
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let spec = RequestSpec::new(Method::PATCH, path, RequestOptions::new()).with_body(body)?;
        self.request(spec).await
    }

    /// DELETE `path`, checking the envelope's success flag only.
    #[instrument(skip(self), fields(base = %self.inner.base))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        let spec = RequestSpec::new(Method::DELETE, path, RequestOptions::new());
        self.request_envelope::<serde_json::Value>(spec)
            .await?
            .into_unit()
    }

    /// Call the check-session endpoint and return the raw envelope.
    ///
    /// The guard wants `success` and the session-out flag as data, so
    /// nothing is unwrapped here. The call still rides the retry
    /// pipeline like any other request.
    #[instrument(skip(self), fields(base = %self.inner.base))]
    pub async fn check_auth(&self) -> Result<Envelope<SessionUser>> {
        let spec = RequestSpec::new(Method::POST, CHECK_AUTH, RequestOptions::new());
        self.request_envelope(spec).await
    }

    /// Sign in. The server's session cookies are absorbed into the
    /// ambient jar as a side effect of the response.
    #[instrument(skip(self, credentials), fields(base = %self.inner.base, email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser> {
        let body = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        };
        let spec = RequestSpec::new(Method::POST, LOGIN, RequestOptions::new()).with_body(&body)?;
        let user = self.request::<SessionUser>(spec).await?;
        info!("session established");
        Ok(user)
    }

    /// Sign out, letting the server clear its cookies.
    #[instrument(skip(self), fields(base = %self.inner.base))]
    pub async fn logout(&self) -> Result<()> {
        let spec = RequestSpec::new(Method::POST, LOGOUT, RequestOptions::new());
        self.request_envelope::<serde_json::Value>(spec)
            .await?
            .into_unit()
    }

    /// Renew the ambient session via the refresh endpoint.
    ///
    /// On a session-out flag or a 401 from the endpoint itself the
    /// session is finished: the expiry notice is queued, navigation to
    /// the auth page is forced, and the error propagates so any retry
    /// chain stops. Other failures propagate without a redirect.
    #[instrument(skip(self), fields(base = %self.inner.base))]
    pub async fn refresh_session(&self) -> Result<()> {
        info!("refreshing session");
        let spec = RequestSpec::new(Method::POST, REFRESH_SESSION, RequestOptions::new());
        let response = self.dispatch(&spec).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // No usable refresh token left; the session is gone.
            let error = self.http_error(response).await;
            self.session_ended();
            return Err(error.into());
        }
        if !status.is_success() {
            return Err(self.http_error(response).await.into());
        }

        let envelope: Envelope<serde_json::Value> =
            response.json().await.map_err(|err| Error::from(classify(err)))?;
        if envelope.is_session_out() {
            // The session itself is invalid, not just the access token.
            // Close it out fully before sending the user back to sign in.
            // Logout is best-effort and bypasses the retry pipeline: a 401
            // here must not re-enter the refresh path.
            let logout = RequestSpec::new(Method::POST, LOGOUT, RequestOptions::new());
            if let Err(err) = self.dispatch(&logout).await {
                debug!(error = %err, "logout during session-out failed");
            }
            self.session_ended();
            return Err(AuthError::SessionOut.into());
        }
        envelope.into_unit()?;
        debug!("session refreshed");
        Ok(())
    }

    /// Issue `spec` and unwrap the envelope payload.
    async fn request<T>(&self, spec: RequestSpec) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let path = spec.path.clone();
        self.request_envelope::<T>(spec).await?.into_data().map_err(|err| {
            warn!(%path, error = %err, "API rejected request");
            err
        })
    }

    /// Issue `spec` through the retry pipeline and decode the envelope.
    async fn request_envelope<T>(&self, spec: RequestSpec) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.send(spec).await?;
        let status = response.status();
        if status.is_success() {
            response
                .json::<Envelope<T>>()
                .await
                .map_err(|err| Error::from(classify(err)))
        } else {
            Err(self.http_error(response).await.into())
        }
    }

    /// Dispatch with the single refresh-and-retry cycle.
    ///
    /// This loop owns the retry invariants: the refresh endpoint and
    /// requests issued from an auth-flow page never enter the retry
    /// path, and a replayed request's response is returned as-is
    /// whatever its status.
    async fn send(&self, spec: RequestSpec) -> Result<reqwest::Response> {
        let mut attempt = Attempt::first(&spec);
        loop {
            let response = self.dispatch(attempt.spec).await?;
            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }
            if attempt.spec.path == REFRESH_SESSION {
                // A 401 straight from the refresh endpoint ends the
                // session; never refresh the refresh.
                self.session_ended();
                return Ok(response);
            }
            if attempt.retried || is_auth_path(&self.inner.navigator.current_path()) {
                return Ok(response);
            }

            debug!(path = %attempt.spec.path, "401 received, refreshing session");
            self.refresh_session().await?;
            attempt = attempt.retry();
        }
    }

    /// Send one request. No retry logic at this layer.
    async fn dispatch(&self, spec: &RequestSpec) -> Result<reqwest::Response> {
        let url = self.inner.base.request_url(&spec.path);
        let sender = if spec.anonymous {
            &self.inner.bare
        } else {
            &self.inner.http
        };

        let mut builder = sender.request(spec.method.clone(), url);
        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }

        builder.send().await.map_err(|err| {
            let transport = classify(err);
            warn!(path = %spec.path, error = %transport, "transport failure");
            Error::Transport(transport)
        })
    }

    /// Decode an error response into an [`HttpError`], logging
    /// everything except routine 401s.
    async fn http_error(&self, response: reqwest::Response) -> HttpError {
        let status = response.status().as_u16();
        let path = response.url().path().to_string();

        // Error envelopes still follow the standard shape when the
        // server produced them; anything else parses to no message.
        let body = response.json::<ErrorBody>().await.ok();
        let message = body.and_then(|b| b.message);

        if status == 401 {
            debug!(%path, "unauthorized response");
        } else {
            warn!(%path, status, "request failed");
        }
        HttpError::new(status, message)
    }

    /// Queue the session-expired notice and force navigation to the
    /// auth page. The triggering error still propagates to the caller.
    fn session_ended(&self) {
        self.inner.toasts.put(&Notice::session_expired());
        self.inner.navigator.force(AUTH_PATH);
    }
}

#[async_trait]
impl VerifySession for ApiClient {
    async fn verify_session(&self) -> Result<Envelope<SessionUser>> {
        self.check_auth().await
    }
}

// Intentionally hide the jar contents in Debug output
impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.inner.base)
            .field("jar", &"[REDACTED]")
            .finish()
    }
}

/// Error envelope body, as far as errors can be trusted to follow it.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Classify a reqwest failure into the transport taxonomy.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sewa_core::Location;

    #[test]
    fn client_creation() {
        let base = ApiUrl::new("https://api.example.com").unwrap();
        let client = ApiClient::new(base.clone(), Arc::new(Location::new("/")));
        assert_eq!(client.base().as_str(), base.as_str());
    }

    #[test]
    fn debug_hides_jar_contents() {
        let base = ApiUrl::new("https://api.example.com").unwrap();
        let client = ApiClient::new(base, Arc::new(Location::new("/")));
        client.add_cookie("sid=super-secret; Path=/");

        let debug = format!("{:?}", client);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn retry_marker_is_a_new_value() {
        let spec = RequestSpec::new(Method::GET, "/inventory", RequestOptions::new());
        let first = Attempt::first(&spec);
        let replay = first.retry();

        assert!(!first.retried);
        assert!(replay.retried);
        assert_eq!(replay.spec.path, "/inventory");
    }

    #[test]
    fn options_accumulate_query_params() {
        let options = RequestOptions::new()
            .query("page", "2")
            .query("perPage", "50");
        let spec = RequestSpec::new(Method::GET, "/orders", options);

        assert_eq!(spec.query.len(), 2);
        assert_eq!(spec.query[0], ("page".to_string(), "2".to_string()));
        assert!(!spec.anonymous);
    }
}
