//! Splitting route strings into path components.

use crate::named_group::NAMED_GROUP_TOKEN;
use regex::Regex;
use std::sync::LazyLock;

// A group token swallows any non-slash text around it so that components such
// as `market=(?P<market>[\w]+)` stay in one piece.
#[expect(
    clippy::expect_used,
    reason = "constant pattern is exercised by the unit tests below"
)]
static GROUP_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[^/]*{NAMED_GROUP_TOKEN}[^/]*"))
        .expect("group component pattern must compile")
});

/// Split a route string into its ordered path components.
///
/// Named groups are isolated first and kept whole, even when their inner
/// pattern contains `/`. Everything between them is split on `/`, and the
/// empty strings left by leading, trailing or doubled slashes are dropped.
///
/// # Examples
/// ```
/// use wp_request_patterns::split_path;
/// assert_eq!(
///     split_path(r"/wp/v2/posts/(?P<parent>[\d]+)/revisions"),
///     vec!["wp", "v2", "posts", r"(?P<parent>[\d]+)", "revisions"],
/// );
/// ```
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    let mut components = Vec::new();
    let mut cursor = 0;
    for token in GROUP_COMPONENT.find_iter(path) {
        push_literal_parts(&mut components, path.get(cursor..token.start()));
        components.push(token.as_str());
        cursor = token.end();
    }
    push_literal_parts(&mut components, path.get(cursor..));
    components
}

fn push_literal_parts<'a>(components: &mut Vec<&'a str>, text: Option<&'a str>) {
    if let Some(text) = text {
        components.extend(text.split('/').filter(|part| !part.is_empty()));
    }
}
