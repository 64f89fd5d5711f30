//! HTTP method type and the allowed-method set carried by route leaves.
//!
//! Routes declare their methods in upper case (`GET`, `POST`); builders report
//! them in lower case. Whenever `get` is allowed `head` is too, and vice versa.

use crate::errors::HttpMethodParseError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// HTTP method a route may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum HttpMethod {
    /// Retrieve a resource.
    Get,
    /// Retrieve only the headers of a resource.
    Head,
    /// Create a resource.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
    /// Describe the communication options of a resource.
    Options,
}

impl HttpMethod {
    /// Return the method as a lower-case string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use wp_request_patterns::HttpMethod;
    ///
    /// assert_eq!(HttpMethod::Get.as_str(), "get");
    /// assert_eq!(HttpMethod::Delete.as_str(), "delete");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Head => "head",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = HttpMethodParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [
            Self::Get,
            Self::Head,
            Self::Post,
            Self::Put,
            Self::Patch,
            Self::Delete,
            Self::Options,
        ]
        .into_iter()
        .find(|method| trimmed.eq_ignore_ascii_case(method.as_str()))
        .ok_or_else(|| HttpMethodParseError(trimmed.to_string()))
    }
}

impl TryFrom<&str> for HttpMethod {
    type Error = HttpMethodParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = HttpMethodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Ordered set of allowed methods with the get/head pairing applied.
///
/// # Examples
/// ```
/// use wp_request_patterns::{HttpMethod, MethodSet};
/// let methods: MethodSet = [HttpMethod::Get, HttpMethod::Post].into_iter().collect();
/// assert!(methods.contains(HttpMethod::Head));
/// assert_eq!(methods.to_string(), "get, head, post");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodSet(BTreeSet<HttpMethod>);

impl MethodSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Methods a builder supports before any leaf narrows them.
    #[must_use]
    pub fn builder_default() -> Self {
        [
            HttpMethod::Head,
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
        ]
        .into_iter()
        .collect()
    }

    /// Every method an ad hoc route accepts unless told otherwise.
    #[must_use]
    pub fn all_writable() -> Self {
        [
            HttpMethod::Head,
            HttpMethod::Get,
            HttpMethod::Patch,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
        ]
        .into_iter()
        .collect()
    }

    /// Whether `method` is allowed.
    #[must_use]
    pub fn contains(&self, method: HttpMethod) -> bool {
        self.0.contains(&method)
    }

    /// Whether no method is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of allowed methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the allowed methods in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.0.iter().copied()
    }

    /// Merge `other` into this set.
    pub fn union_with(&mut self, other: &Self) {
        self.0.extend(other.iter());
    }

    fn pair_get_and_head(&mut self) {
        if self.0.contains(&HttpMethod::Get) {
            self.0.insert(HttpMethod::Head);
        }
        if self.0.contains(&HttpMethod::Head) {
            self.0.insert(HttpMethod::Get);
        }
    }
}

impl FromIterator<HttpMethod> for MethodSet {
    fn from_iter<I: IntoIterator<Item = HttpMethod>>(iter: I) -> Self {
        let mut set = Self(iter.into_iter().collect());
        set.pair_get_and_head();
        set
    }
}

impl Extend<HttpMethod> for MethodSet {
    fn extend<I: IntoIterator<Item = HttpMethod>>(&mut self, iter: I) {
        self.0.extend(iter);
        self.pair_get_and_head();
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(|method| method.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}
