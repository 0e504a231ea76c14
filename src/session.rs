//! Session: the transport the client sends through.
//!
//! DESIGN
//! ======
//! `Connector` is the configuration handed to the client at construction;
//! every call to `connect` yields a fresh `Session`. The client owns at most
//! one session at a time and decides when to create and close it.
//!
//! `ReqwestSession` wraps a pooled `reqwest::Client` for HTTP and dials
//! WebSocket upgrades with `tokio-tungstenite` using the same user agent and
//! connect timeout. Closing drops the `reqwest::Client`; the pool goes with it
//! once in-flight requests holding a clone finish.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderValue, header::USER_AGENT};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::config::{ClientConfig, Timeouts};
use crate::error::HttpError;

/// Raw WebSocket handle produced by [`ReqwestSession::ws_connect`].
pub type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Payload attached to an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text(String),
}

/// One fully prepared HTTP request.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// A response read to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub text: String,
}

// =============================================================================
// TRAITS
// =============================================================================

/// Builds sessions from a fixed transport configuration.
pub trait Connector: Send + Sync {
    type Session: Session;

    /// Create a new, open session.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport cannot be constructed.
    fn connect(&self) -> Result<Self::Session, HttpError>;
}

/// A reusable network session. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Session: Send + Sync {
    /// Handle returned by a WebSocket upgrade.
    type Socket: Send;

    /// Send one request and read the whole body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::SessionClosed`] after `close`, or a transport
    /// error if no response arrives.
    async fn send(&self, request: SessionRequest) -> Result<SessionResponse, HttpError>;

    /// Open a WebSocket against `url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::SessionClosed`] after `close`, or a handshake error.
    async fn ws_connect(&self, url: &str) -> Result<Self::Socket, HttpError>;

    /// Release every network resource held by the session. Idempotent.
    async fn close(&self);

    fn is_closed(&self) -> bool;
}

// =============================================================================
// REQWEST
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReqwestConnector {
    user_agent: String,
    timeouts: Timeouts,
}

impl ReqwestConnector {
    #[must_use]
    pub fn new(user_agent: impl Into<String>, timeouts: Timeouts) -> Self {
        Self { user_agent: user_agent.into(), timeouts }
    }
}

impl From<&ClientConfig> for ReqwestConnector {
    fn from(config: &ClientConfig) -> Self {
        Self::new(config.user_agent.clone(), config.timeouts)
    }
}

impl Connector for ReqwestConnector {
    type Session = ReqwestSession;

    fn connect(&self) -> Result<ReqwestSession, HttpError> {
        let http = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(Duration::from_secs(self.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(self.timeouts.connect_secs))
            .build()
            .map_err(|e| HttpError::ClientBuild(e.to_string()))?;

        Ok(ReqwestSession {
            http: Mutex::new(Some(http)),
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.timeouts.connect_secs),
        })
    }
}

pub struct ReqwestSession {
    http: Mutex<Option<reqwest::Client>>,
    user_agent: String,
    connect_timeout: Duration,
}

impl ReqwestSession {
    fn client(&self) -> Result<reqwest::Client, HttpError> {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(HttpError::SessionClosed)
    }
}

#[async_trait::async_trait]
impl Session for ReqwestSession {
    type Socket = Socket;

    async fn send(&self, request: SessionRequest) -> Result<SessionResponse, HttpError> {
        let http = self.client()?;

        let mut builder = http.request(request.method, &request.url).headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            Some(RequestBody::Json(json)) => builder.json(&json),
            Some(RequestBody::Text(text)) => builder.body(text),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let text = response.text().await?;

        Ok(SessionResponse { status, content_type, text })
    }

    async fn ws_connect(&self, url: &str) -> Result<Socket, HttpError> {
        if self.is_closed() {
            return Err(HttpError::SessionClosed);
        }

        let mut request = url
            .into_client_request()
            .map_err(|e| HttpError::WsConnect(Box::new(e)))?;
        let user_agent =
            HeaderValue::from_str(&self.user_agent).map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
        request.headers_mut().insert(USER_AGENT, user_agent);

        let (stream, response) = tokio::time::timeout(self.connect_timeout, connect_async(request))
            .await
            .map_err(|_| HttpError::Transport(format!("websocket connect to {url} timed out")))?
            .map_err(|e| HttpError::WsConnect(Box::new(e)))?;

        tracing::debug!(%url, status = response.status().as_u16(), "websocket connected");
        Ok(stream)
    }

    async fn close(&self) {
        let http = self.http.lock().unwrap_or_else(PoisonError::into_inner).take();
        if http.is_some() {
            tracing::debug!("session closed");
        }
    }

    fn is_closed(&self) -> bool {
        self.http.lock().unwrap_or_else(PoisonError::into_inner).is_none()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
