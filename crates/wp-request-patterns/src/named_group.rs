//! Named capture-group recognition for route path components.
//!
//! WordPress registers routes with PCRE-style named groups. Three opening
//! markers are accepted (`(?P<name>`, `(?<name>` and `(?'name'`), followed by
//! an inner pattern running up to the group's closing parenthesis. The inner
//! pattern may itself contain one nested group and a trailing `?`, which is
//! enough for every pattern WordPress core registers.

use regex::Regex;
use std::sync::LazyLock;

/// Regular-expression source recognising one named group.
///
/// Capture 1 is the group name, capture 2 the inner pattern.
pub(crate) const NAMED_GROUP_SOURCE: &str = r"\(\?(?:P?<|')([^>']+)[>']([^)]*\)?\??)\)";

/// Same grammar as [`NAMED_GROUP_SOURCE`] without capture groups, used when a
/// whole token has to be isolated.
pub(crate) const NAMED_GROUP_TOKEN: &str = r"\(\?(?:P?<|')[^>']+[>'][^)]*\)?\??\)";

#[expect(
    clippy::expect_used,
    reason = "constant pattern is exercised by the unit tests below"
)]
static NAMED_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAMED_GROUP_SOURCE).expect("named-group pattern must compile"));

/// A named capture group found inside a path component.
///
/// # Examples
/// ```
/// use wp_request_patterns::extract_named_group;
/// let group = extract_named_group(r"(?P<id>[\d]+)").unwrap();
/// assert_eq!(group.name, "id");
/// assert_eq!(group.pattern, r"[\d]+");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedGroup {
    /// Name given to the captured value, e.g. `parent` or `plugin_slug`.
    pub name: String,
    /// Inner validation pattern; empty means "accept anything".
    pub pattern: String,
    /// Byte offset where the group opens within the component.
    pub start: usize,
    /// Byte offset one past the group's closing parenthesis.
    pub end: usize,
}

impl NamedGroup {
    /// Whether the group occupies the entire `component` it was extracted from.
    ///
    /// Components such as `market=(?P<market>[\w]+)` contain a group but also
    /// literal text, and are not treated as dynamic.
    #[must_use]
    pub fn spans(&self, component: &str) -> bool {
        self.start == 0 && self.end == component.len()
    }
}

/// Find the first named group in `component`, returning `None` when there is none.
///
/// Malformed markers (for example a missing `>`) simply do not match.
#[must_use]
pub fn extract_named_group(component: &str) -> Option<NamedGroup> {
    let caps = NAMED_GROUP.captures(component)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?.as_str().to_owned();
    let pattern = caps.get(2).map_or_else(String::new, |m| m.as_str().to_owned());
    Some(NamedGroup {
        name,
        pattern,
        start: whole.start(),
        end: whole.end(),
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise extraction results")]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r"(?P<id>[\d]+)", "id", r"[\d]+")]
    #[case(r"(?<id>[\d]+)", "id", r"[\d]+")]
    #[case(r"(?'id'[\d]+)", "id", r"[\d]+")]
    #[case(r"(?P<slug>[\w-]+)", "slug", r"[\w-]+")]
    #[case(r"(?P<plugin>[^.\/]+(?:\/[^.\/]+)?)", "plugin", r"[^.\/]+(?:\/[^.\/]+)?")]
    #[case("(?P<id>)", "id", "")]
    fn extracts_name_and_pattern(
        #[case] component: &str,
        #[case] name: &str,
        #[case] pattern: &str,
    ) {
        let group = extract_named_group(component).unwrap();
        assert_eq!(group.name, name);
        assert_eq!(group.pattern, pattern);
        assert!(group.spans(component));
    }

    #[rstest]
    #[case("posts")]
    #[case("")]
    #[case(r"(?P<id[\d]+)")]
    #[case(r"(?:[\d]+)")]
    #[case(r"([\d]+)")]
    fn ignores_components_without_named_groups(#[case] component: &str) {
        assert!(extract_named_group(component).is_none());
    }

    #[test]
    fn reports_groups_embedded_in_literal_text() {
        let component = r"market=(?P<market>[\w]+)";
        let group = extract_named_group(component).unwrap();
        assert_eq!(group.name, "market");
        assert_eq!(group.start, 7);
        assert!(!group.spans(component));
    }

    #[test]
    fn token_source_matches_same_groups() {
        let token = Regex::new(NAMED_GROUP_TOKEN).unwrap();
        assert!(token.is_match(r"(?P<plugin>[^.\/]+(?:\/[^.\/]+)?)"));
        assert!(!token.is_match("posts"));
    }
}
