//! Validators applied to path values before a request path is rendered.

use crate::errors::PatternError;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Predicate deciding whether a value may occupy a path slot.
///
/// Dynamic components validate against their inner pattern anchored to the
/// whole value; literal components accept only their own text. Both checks
/// ignore case.
///
/// # Examples
/// ```
/// use wp_request_patterns::Validator;
/// let id = Validator::pattern(r"[\d]+").unwrap();
/// assert!(id.validate("42"));
/// assert!(!id.validate("abc"));
/// assert!(Validator::pattern("").unwrap().validate("anything at all"));
/// assert!(Validator::literal("revisions").validate("Revisions"));
/// ```
#[derive(Debug, Clone)]
pub enum Validator {
    /// Accepts every value, including the empty string.
    Any,
    /// Accepts values fully matched by `source`.
    Pattern {
        /// Inner pattern as written in the route.
        source: String,
        /// `source` compiled with anchors and case folding.
        regex: Regex,
    },
    /// Accepts exactly the literal text.
    Literal(String),
}

impl Validator {
    /// Compile a validator from the inner pattern of a named group.
    ///
    /// An empty pattern yields [`Validator::Any`].
    ///
    /// # Errors
    /// Returns [`PatternError::Regex`] when the pattern does not compile.
    pub fn pattern(source: &str) -> Result<Self, PatternError> {
        if source.is_empty() {
            return Ok(Self::Any);
        }
        let regex = RegexBuilder::new(&format!("^(?:{source})$"))
            .case_insensitive(true)
            .build()
            .map_err(|err| PatternError::Regex {
                pattern: source.to_owned(),
                source: err,
            })?;
        Ok(Self::Pattern {
            source: source.to_owned(),
            regex,
        })
    }

    /// Build a validator accepting only `text`.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Check `value` against this validator.
    #[must_use]
    pub fn validate(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern { regex, .. } => regex.is_match(value),
            Self::Literal(text) => text.to_lowercase() == value.to_lowercase(),
        }
    }

    /// The pattern or literal text this validator accepts, for diagnostics.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Any => "",
            Self::Pattern { source, .. } => source,
            Self::Literal(text) => text,
        }
    }
}

// Compiled regexes carry no equality; two validators are equal when they were
// built from the same source text.
impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, Self::Any) => true,
            (Self::Pattern { source: a, .. }, Self::Pattern { source: b, .. })
            | (Self::Literal(a), Self::Literal(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Validator {}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("<any>"),
            Self::Pattern { source, .. } => write!(f, "/{source}/"),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests compile known-good patterns")]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r"[\d]+", "7", true)]
    #[case(r"[\d]+", "abc", false)]
    #[case(r"[\d]+", "7a", false)]
    #[case(r"[\w-]+", "hello-world", true)]
    #[case(r"[a-z]+", "ABC", true)]
    #[case("a|b", "ab", false)]
    #[case(r"[^.\/]+(?:\/[^.\/]+)?", "akismet/akismet", true)]
    fn anchors_patterns_to_whole_value(
        #[case] source: &str,
        #[case] value: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(Validator::pattern(source).unwrap().validate(value), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("12/34")]
    fn empty_pattern_accepts_everything(#[case] value: &str) {
        let validator = Validator::pattern("").unwrap();
        assert_eq!(validator, Validator::Any);
        assert!(validator.validate(value));
    }

    #[test]
    fn literal_matching_is_exact_but_case_insensitive() {
        let validator = Validator::literal("revisions");
        assert!(validator.validate("REVISIONS"));
        assert!(!validator.validate("revision"));
        assert!(!validator.validate("my-revisions"));
    }

    #[test]
    fn reports_uncompilable_patterns() {
        let Err(err) = Validator::pattern("[unclosed") else {
            panic!("pattern should be rejected");
        };
        assert!(matches!(err, PatternError::Regex { ref pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn equality_follows_source_text() {
        assert_eq!(
            Validator::pattern(r"[\d]+").unwrap(),
            Validator::pattern(r"[\d]+").unwrap()
        );
        assert_ne!(Validator::pattern(r"[\d]+").unwrap(), Validator::literal(r"[\d]+"));
    }
}
