//! Classification of path components into literal and dynamic segments.

use crate::errors::PatternError;
use crate::named_group::{NamedGroup, extract_named_group};
use crate::validator::Validator;

/// One path component of a route, classified.
///
/// # Examples
/// ```
/// use wp_request_patterns::{MergeKey, Segment};
/// let segment = Segment::classify(r"(?P<parent>[\d]+)");
/// assert!(segment.is_dynamic());
/// assert_eq!(segment.alias(), "parent");
/// assert_eq!(segment.merge_key(), MergeKey::Pattern(r"[\d]+".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Fixed text such as `posts` or `revisions`.
    Literal(String),
    /// A named group standing for a caller-supplied value.
    Dynamic(NamedGroup),
}

/// Key under which sibling nodes are merged while building a route tree.
///
/// Dynamic segments merge on their pattern, not their name, because one value
/// is often called differently across routes (`id` against `parent`). Groups
/// with an empty pattern fall back to their name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MergeKey {
    /// Literal component text.
    Literal(String),
    /// Inner pattern of a named group.
    Pattern(String),
    /// Name of a named group whose pattern is empty.
    Name(String),
}

impl Segment {
    /// Classify a component produced by [`split_path`](crate::split_path).
    ///
    /// A component is dynamic only when a named group spans all of it;
    /// components mixing literal text and a group stay literal.
    #[must_use]
    pub fn classify(component: &str) -> Self {
        match extract_named_group(component) {
            Some(group) if group.spans(component) => Self::Dynamic(group),
            _ => Self::Literal(component.to_owned()),
        }
    }

    /// Whether this segment is a named group.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// Name under which the segment can be addressed.
    #[must_use]
    pub fn alias(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Dynamic(group) => &group.name,
        }
    }

    /// Key used to merge this segment with siblings at the same depth.
    #[must_use]
    pub fn merge_key(&self) -> MergeKey {
        match self {
            Self::Literal(text) => MergeKey::Literal(text.clone()),
            Self::Dynamic(group) if group.pattern.is_empty() => MergeKey::Name(group.name.clone()),
            Self::Dynamic(group) => MergeKey::Pattern(group.pattern.clone()),
        }
    }

    /// Build the validator for values stored in this segment's slot.
    ///
    /// # Errors
    /// Returns [`PatternError::Regex`] when a dynamic segment's pattern does
    /// not compile.
    pub fn validator(&self) -> Result<Validator, PatternError> {
        match self {
            Self::Literal(text) => Ok(Validator::literal(text.clone())),
            Self::Dynamic(group) => Validator::pattern(&group.pattern),
        }
    }
}
