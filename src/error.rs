//! Error taxonomy for client operations.

use crate::body::ResponseBody;
use crate::route::RouteError;

/// Errors produced by [`HttpClient`](crate::HttpClient) and its sessions.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The route template could not be resolved. Raised before any I/O.
    #[error("route formatting failed: {0}")]
    Route(#[from] RouteError),

    /// The service rejected the token passed to `static_login` with 401.
    #[error("invalid token")]
    InvalidToken,

    /// The service answered outside the 2xx range.
    #[error("request failed with status {status}")]
    Status { status: u16, body: ResponseBody },

    /// The request never produced a response (connect, TLS, read failure).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The WebSocket handshake failed.
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),

    /// `request` or `ws_connect` was called before any session existed.
    #[error("no session; call static_login or recreate first")]
    NoSession,

    /// `request` or `ws_connect` was called on a closed session.
    #[error("session is closed; call recreate first")]
    SessionClosed,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// A header name or value supplied in request options is invalid.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A body declared as JSON (or expected as a typed value) did not parse.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configuration value is unusable.
    #[error("config error: {0}")]
    Config(String),
}

impl HttpError {
    /// HTTP status carried by a [`HttpError::Status`] failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoded body carried by a [`HttpError::Status`] failure.
    #[must_use]
    pub fn body(&self) -> Option<&ResponseBody> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
