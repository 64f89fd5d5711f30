//! Error types shared by the route-grammar modules.

use std::fmt;
use thiserror::Error;

/// Error returned when parsing an [`HttpMethod`](crate::HttpMethod) from text fails.
///
/// Contains the unrecognised method text for diagnostic purposes.
///
/// # Examples
/// ```
/// use wp_request_patterns::HttpMethod;
/// let err = "FETCH".parse::<HttpMethod>().unwrap_err();
/// assert_eq!(err.0, "FETCH");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMethodParseError(pub String);

impl fmt::Display for HttpMethodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported HTTP method: {}", self.0)
    }
}

impl std::error::Error for HttpMethodParseError {}

/// Errors surfaced while turning route components into validators.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The inner pattern of a named group is not a valid regular expression.
    #[error("invalid pattern `{pattern}` in path component: {source}")]
    Regex {
        /// Inner pattern as written in the route string.
        pattern: String,
        /// Compilation failure reported by the `regex` crate.
        #[source]
        source: regex::Error,
    },
    /// A route declared an HTTP method outside the supported set.
    #[error(transparent)]
    Method(#[from] HttpMethodParseError),
}
