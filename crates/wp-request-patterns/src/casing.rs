//! Alias casing helpers.

use convert_case::{Boundary, Case, Casing};

/// Convert a snake- or kebab-case alias into the camel-case capability name.
///
/// Only underscores and hyphens separate words. Input without either is
/// returned unchanged, so `postID` and `abc123def` keep their spelling.
///
/// # Examples
/// ```
/// use wp_request_patterns::camel_case;
/// assert_eq!(camel_case("plugin_slug"), "pluginSlug");
/// assert_eq!(camel_case("category-name"), "categoryName");
/// assert_eq!(camel_case("pluginSlug"), "pluginSlug");
/// assert_eq!(camel_case("postID"), "postID");
/// ```
#[must_use]
pub fn camel_case(alias: &str) -> String {
    if !alias.contains(['_', '-']) {
        return alias.to_owned();
    }
    alias
        .with_boundaries(&[Boundary::Underscore, Boundary::Hyphen])
        .to_case(Case::Camel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("id", "id")]
    #[case("parent", "parent")]
    #[case("plugin_slug", "pluginSlug")]
    #[case("category-name", "categoryName")]
    #[case("per_page", "perPage")]
    #[case("by-author", "byAuthor")]
    #[case("pluginSlug", "pluginSlug")]
    #[case("postID", "postID")]
    #[case("abc123def", "abc123def")]
    #[case("wp_pattern_category", "wpPatternCategory")]
    #[case("v2-items", "v2Items")]
    fn converts_aliases(#[case] alias: &str, #[case] expected: &str) {
        assert_eq!(camel_case(alias), expected);
    }

    #[rstest]
    #[case("plugin_slug")]
    #[case("category-name")]
    #[case("revisions")]
    #[case("postID")]
    fn conversion_is_idempotent(#[case] alias: &str) {
        let once = camel_case(alias);
        assert_eq!(camel_case(&once), once);
    }
}
