//! Error type returned by tree building, bootstrap and request building.

use crate::aliases::AliasConflict;
use std::path::PathBuf;
use thiserror::Error;
use wp_request_patterns::{HttpMethod, MethodSet, PatternError};

/// Errors raised while compiling routes or driving a request builder.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A route string contains a component that cannot become a validator.
    #[error("invalid route `{route}`: {source}")]
    InvalidRoute {
        /// Route string as registered.
        route: String,
        /// Underlying pattern failure.
        #[source]
        source: PatternError,
    },
    /// A route has no resource component after its namespace.
    #[error("route `{0}` has no resource component")]
    EmptyRoute(String),
    /// Alias conflicts were found while strict conflict handling is enabled.
    #[error("{} setter alias conflict(s); first: {}", .0.len(), first_conflict(.0))]
    AliasConflicts(Vec<AliasConflict>),
    /// No routes were bootstrapped for the requested namespace.
    #[error("namespace `{0}` was not bootstrapped")]
    UnknownNamespace(String),
    /// The namespace exists but has no such resource.
    #[error("namespace `{namespace}` has no resource `{resource}`")]
    UnknownResource {
        /// Namespace that was searched.
        namespace: String,
        /// Resource that was requested.
        resource: String,
    },
    /// A builder was asked for a method it does not carry.
    #[error("`{resource}` requests have no method `{name}`")]
    UnknownCapability {
        /// Resource the builder addresses.
        resource: String,
        /// Requested method name.
        name: String,
    },
    /// A dynamic path setter was invoked without a value.
    #[error("`{0}` requires a value")]
    MissingValue(String),
    /// A path slot already holds a value.
    #[error("Cannot overwrite value {existing}")]
    PathPartOccupied {
        /// Level of the occupied slot.
        level: usize,
        /// Value currently stored.
        existing: String,
    },
    /// A stored path value fails every validator defined at its level.
    #[error(
        "Invalid path component: {value} does not match{} {}",
        any_of(.accepted),
        .accepted.join(", ")
    )]
    InvalidPathComponent {
        /// Offending value.
        value: String,
        /// Components accepted at that level.
        accepted: Vec<String>,
    },
    /// A level between the resource and the deepest set slot is empty.
    #[error("Incomplete URL! Missing component: /{0}")]
    IncompletePath(String),
    /// The method is not allowed for the path currently built.
    #[error("Unsupported method {method}; supported methods are: {supported}")]
    UnsupportedMethod {
        /// Method that was attempted.
        method: HttpMethod,
        /// Methods the builder currently allows.
        supported: MethodSet,
    },
    /// A routes file could not be read.
    #[error("failed to read routes from {}: {source}", .path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A routes document is not valid JSON for a route map.
    #[error("failed to parse routes: {0}")]
    Json(#[from] serde_json::Error),
}

fn any_of(accepted: &[String]) -> &'static str {
    if accepted.len() > 1 { " any of" } else { "" }
}

fn first_conflict(conflicts: &[AliasConflict]) -> String {
    conflicts
        .first()
        .map_or_else(String::new, ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralises_invalid_component_alternatives() {
        let single = RouteError::InvalidPathComponent {
            value: "abc".into(),
            accepted: vec![r"(?P<id>[\d]+)".into()],
        };
        assert_eq!(
            single.to_string(),
            r"Invalid path component: abc does not match (?P<id>[\d]+)"
        );

        let several = RouteError::InvalidPathComponent {
            value: "abc".into(),
            accepted: vec!["revisions".into(), "autosaves".into()],
        };
        assert_eq!(
            several.to_string(),
            "Invalid path component: abc does not match any of revisions, autosaves"
        );
    }

    #[test]
    fn formats_incomplete_paths() {
        let err = RouteError::IncompletePath("posts/ ??? /revisions".into());
        assert_eq!(
            err.to_string(),
            "Incomplete URL! Missing component: /posts/ ??? /revisions"
        );
    }

    #[test]
    fn lists_supported_methods() {
        let err = RouteError::UnsupportedMethod {
            method: HttpMethod::Delete,
            supported: [HttpMethod::Get].into_iter().collect(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported method delete; supported methods are: get, head"
        );
    }
}
