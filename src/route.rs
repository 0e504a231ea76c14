//! Route: one logical API call resolved to a concrete URL.
//!
//! DESIGN
//! ======
//! A `Route` is built per call and discarded afterwards. The URL is resolved
//! once at construction so a bad template fails before anything touches the
//! network. Text parameters are percent-encoded; raw parameters (ids, counts,
//! flags) are inserted as written.
//!
//! Templates use `{name}` placeholders. When parameters are supplied, `{{` and
//! `}}` stand for literal braces. When no parameters are supplied the template
//! is used untouched, braces included.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;

/// Fixed origin of the BetterBots.gg API.
pub const BASE_URL: &str = "https://api.betterbots.gg";

/// Everything except RFC 3986 unreserved characters gets escaped, `/` included.
const PATH_PARAM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

// =============================================================================
// ERROR
// =============================================================================

/// Formatting errors raised while resolving a route template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A `{placeholder}` in the template has no matching parameter.
    #[error("missing value for path parameter `{0}`")]
    MissingParameter(String),

    /// A `{` or `}` in the template is not part of a placeholder or escape.
    #[error("unbalanced brace at byte {0} in path template")]
    UnbalancedBrace(usize),
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// A value substituted into a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// User-supplied text; percent-encoded on substitution.
    Text(String),
    /// Literal value (numbers, booleans); inserted verbatim.
    Raw(String),
}

impl ParamValue {
    fn render(&self) -> String {
        match self {
            Self::Text(text) => utf8_percent_encode(text, PATH_PARAM_ENCODE_SET).to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

macro_rules! raw_param_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Raw(value.to_string())
                }
            }
        )*
    };
}

raw_param_from!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool);

// =============================================================================
// ROUTE
// =============================================================================

/// A method + URL pair identifying one remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    method: Method,
    path: String,
    url: String,
}

impl Route {
    /// Resolve `path` against [`BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if a placeholder has no parameter or a brace is
    /// unbalanced.
    pub fn new(method: Method, path: &str, params: &[(&str, ParamValue)]) -> Result<Self, RouteError> {
        Self::with_base(BASE_URL, method, path, params)
    }

    /// Resolve `path` against an explicit origin.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if a placeholder has no parameter or a brace is
    /// unbalanced.
    pub fn with_base(
        base: &str,
        method: Method,
        path: &str,
        params: &[(&str, ParamValue)],
    ) -> Result<Self, RouteError> {
        let url = format!("{base}{path}");
        let url = if params.is_empty() { url } else { substitute(&url, params)? };
        Ok(Self { method, path: path.to_owned(), url })
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The unresolved path template.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The resolved, fully-qualified URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn substitute(template: &str, params: &[(&str, ParamValue)]) -> Result<String, RouteError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            offset += pos + 2;
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            offset += pos + 2;
            continue;
        }
        if tail.starts_with('}') {
            return Err(RouteError::UnbalancedBrace(offset + pos));
        }

        let Some(close) = tail.find('}') else {
            return Err(RouteError::UnbalancedBrace(offset + pos));
        };
        let name = &tail[1..close];
        if name.contains('{') {
            return Err(RouteError::UnbalancedBrace(offset + pos));
        }
        let value = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| RouteError::MissingParameter(name.to_owned()))?;
        out.push_str(&value.render());

        rest = &tail[close + 1..];
        offset += pos + close + 1;
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[path = "route_test.rs"]
mod tests;
