//! HTTP client: session lifecycle, authentication, and request dispatch.
//!
//! DESIGN
//! ======
//! The session is an `Option`: absent until `static_login` or `recreate`,
//! then open until `close`, after which it reports itself closed until the
//! next `recreate`. `request` and `ws_connect` never create a session on
//! their own; calling them without an open one is an error.
//!
//! TRADE-OFFS
//! ==========
//! No retry and no backoff. The pause gate is exposed for callers that need a
//! global cooldown, but `request` does not consult it.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::body::ResponseBody;
use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::gate::PauseGate;
use crate::route::{ParamValue, Route};
use crate::session::{Connector, ReqwestConnector, RequestBody, Session, SessionRequest};

/// Header carrying the token (`APIKey`). Header names are case-insensitive and
/// go out lowercase on the wire.
pub const AUTH_HEADER: &str = "apikey";

/// Path of the identity-check endpoint used by `static_login`.
pub const ME_PATH: &str = "/me";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Absent,
    Open,
    Closed,
}

// =============================================================================
// REQUEST OPTIONS
// =============================================================================

/// Transport extras for a single request.
///
/// When both a JSON and a text body are set, the JSON body is sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub json: Option<serde_json::Value>,
    pub text: Option<String>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.json = Some(value);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Client for the BetterBots.gg API.
///
/// Generic over the [`Connector`] so tests can swap in a scripted transport.
pub struct HttpClient<C: Connector = ReqwestConnector> {
    connector: C,
    base_url: String,
    session: Option<C::Session>,
    token: Option<String>,
    pause: PauseGate,
}

impl HttpClient<ReqwestConnector> {
    /// Client against the public API with default timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        let connector = ReqwestConnector::from(&config);
        Self::with_connector(connector, config.base_url)
    }

    /// Build a client from `BETTERBOTS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds an unusable value.
    pub fn from_env() -> Result<Self, HttpError> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }
}

impl Default for HttpClient<ReqwestConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> HttpClient<C> {
    pub fn with_connector(connector: C, base_url: impl Into<String>) -> Self {
        Self { connector, base_url: base_url.into(), session: None, token: None, pause: PauseGate::new() }
    }

    /// The installed token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Global pause gate. Starts open; the client never closes it.
    #[must_use]
    pub fn pause_gate(&self) -> &PauseGate {
        &self.pause
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.session {
            None => SessionState::Absent,
            Some(session) if session.is_closed() => SessionState::Closed,
            Some(_) => SessionState::Open,
        }
    }

    /// Build a [`Route`] against this client's base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Route`] if the template cannot be resolved.
    pub fn route(&self, method: Method, path: &str, params: &[(&str, ParamValue)]) -> Result<Route, HttpError> {
        Ok(Route::with_base(&self.base_url, method, path, params)?)
    }

    /// Replace a closed (or absent) session with a new one. No-op while the
    /// current session is open. The token is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the connector cannot build a session.
    pub fn recreate(&mut self) -> Result<(), HttpError> {
        if self.state() == SessionState::Open {
            return Ok(());
        }
        self.session = Some(self.connector.connect()?);
        tracing::debug!("session recreated");
        Ok(())
    }

    /// Send `route` through the live session and decode the response.
    ///
    /// # Errors
    ///
    /// - [`HttpError::NoSession`] / [`HttpError::SessionClosed`] without an open session
    /// - [`HttpError::InvalidHeader`] if an option header is malformed
    /// - [`HttpError::Status`] for any status outside 2xx, with the decoded body
    ///   (kept as text when it claims JSON but does not parse)
    /// - [`HttpError::Transport`] if no response arrived
    /// - [`HttpError::Decode`] if a 2xx body declared as JSON does not parse
    pub async fn request(&self, route: &Route, options: RequestOptions) -> Result<ResponseBody, HttpError> {
        let session = self.live_session()?;
        let headers = self.build_headers(&options.headers)?;
        let body = match (options.json, options.text) {
            (Some(json), _) => Some(RequestBody::Json(json)),
            (None, Some(text)) => Some(RequestBody::Text(text)),
            (None, None) => None,
        };

        tracing::debug!(method = %route.method(), url = route.url(), "requesting");

        let request = SessionRequest {
            method: route.method().clone(),
            url: route.url().to_owned(),
            headers,
            query: options.query,
            body,
        };
        let response = session.send(request).await?;
        let status = response.status;

        tracing::debug!(method = %route.method(), url = route.url(), status, "response received");

        let content_type = response.content_type.as_deref();
        if (200..300).contains(&status) {
            ResponseBody::decode(content_type, response.text)
        } else {
            let body = ResponseBody::decode_lossy(content_type, response.text);
            Err(HttpError::Status { status, body })
        }
    }

    /// [`HttpClient::request`] followed by typed deserialization.
    ///
    /// # Errors
    ///
    /// Everything `request` returns, plus [`HttpError::Decode`] when the body
    /// does not match `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        route: &Route,
        options: RequestOptions,
    ) -> Result<T, HttpError> {
        self.request(route, options).await?.into_typed()
    }

    /// Open a WebSocket through the live session and hand back the raw socket.
    ///
    /// # Errors
    ///
    /// Returns an error without an open session or if the handshake fails.
    pub async fn ws_connect(&self, url: &str) -> Result<<C::Session as Session>::Socket, HttpError> {
        self.live_session()?.ws_connect(url).await
    }

    /// Close the session if there is one. Safe to call repeatedly.
    pub async fn close(&self) {
        if let Some(session) = &self.session {
            session.close().await;
            tracing::info!("client closed");
        }
    }

    /// Start a fresh session, install `token`, and validate it with `GET /me`.
    ///
    /// On failure the previous token is restored before the error is returned.
    /// A 401 from the service becomes [`HttpError::InvalidToken`]; every other
    /// error is returned as-is.
    ///
    /// # Errors
    ///
    /// See above.
    pub async fn static_login(&mut self, token: impl Into<String>) -> Result<ResponseBody, HttpError> {
        let route = self.route(Method::GET, ME_PATH, &[])?;

        let session = self.connector.connect()?;
        if let Some(previous) = self.session.replace(session) {
            previous.close().await;
        }

        let previous_token = self.token.replace(token.into());
        let result = self.request(&route, RequestOptions::default()).await;
        match result {
            Ok(profile) => {
                tracing::info!("login succeeded");
                Ok(profile)
            }
            Err(error) => {
                self.token = previous_token;
                tracing::debug!(error = %error, "login failed; previous token restored");
                match error {
                    HttpError::Status { status: 401, .. } => Err(HttpError::InvalidToken),
                    other => Err(other),
                }
            }
        }
    }

    fn live_session(&self) -> Result<&C::Session, HttpError> {
        match &self.session {
            None => Err(HttpError::NoSession),
            Some(session) if session.is_closed() => Err(HttpError::SessionClosed),
            Some(session) => Ok(session),
        }
    }

    fn build_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, HttpError> {
        let mut headers = HeaderMap::new();
        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
            let value = HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
            headers.append(name, value);
        }

        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(token)
                .map_err(|_| HttpError::InvalidHeader("token is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(AUTH_HEADER), value);
        }

        Ok(headers)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
