//! Decoded response bodies.

use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Content type that triggers JSON decoding. Compared exactly.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A response body, decoded by its declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body declared as `application/json`.
    Json(serde_json::Value),
    /// Any other body, as UTF-8 text.
    Text(String),
}

impl ResponseBody {
    /// Decode `text` according to `content_type`.
    ///
    /// Only an exact `application/json` content type is parsed; anything else,
    /// including a missing header, yields the raw text.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if a body declared as JSON does not parse.
    pub fn decode(content_type: Option<&str>, text: String) -> Result<Self, HttpError> {
        if content_type == Some(JSON_CONTENT_TYPE) {
            return Ok(Self::Json(serde_json::from_str(&text)?));
        }
        Ok(Self::Text(text))
    }

    /// Like [`ResponseBody::decode`], but a body that claims JSON and does not
    /// parse is kept as text. Used for error responses, where the status
    /// matters more than the payload.
    #[must_use]
    pub fn decode_lossy(content_type: Option<&str>, text: String) -> Self {
        if content_type != Some(JSON_CONTENT_TYPE) {
            return Self::Text(text);
        }
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// Deserialize the body into `T`. Text bodies are parsed as JSON too, for
    /// services that omit the content type.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if the body does not deserialize as `T`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value)?),
            Self::Text(text) => Ok(serde_json::from_str(&text)?),
        }
    }
}

impl std::fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
#[path = "body_test.rs"]
mod tests;
