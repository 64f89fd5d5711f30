//! Route definitions consumed by the tree builder.
//!
//! The input mirrors the `routes` object of a WordPress REST API index: route
//! pattern strings mapped to their namespace, the methods they accept and the
//! endpoints (with argument specs) registered on them. Only argument names
//! matter here; argument specs are kept as opaque JSON values.

use crate::error::RouteError;
use derive_more::{Deref, From};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use wp_request_patterns::HttpMethod;

/// One endpoint registered on a route.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndpointDefinition {
    /// Methods served by this endpoint.
    #[serde(default)]
    pub methods: Vec<HttpMethod>,
    /// Arguments accepted by this endpoint, keyed by name.
    #[serde(default, deserialize_with = "args_map")]
    pub args: BTreeMap<String, Value>,
}

impl EndpointDefinition {
    /// Create an endpoint serving `methods` with no arguments.
    #[must_use]
    pub fn new(methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        Self {
            methods: methods.into_iter().collect(),
            args: BTreeMap::new(),
        }
    }

    /// Add arguments by name, each with an empty spec.
    #[must_use]
    pub fn with_args<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(
            names
                .into_iter()
                .map(|name| (name.into(), Value::Object(serde_json::Map::new()))),
        );
        self
    }
}

/// Everything registered for one route pattern.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RouteDefinition {
    /// Namespace owning the route, e.g. `wp/v2`.
    #[serde(default)]
    pub namespace: String,
    /// Methods accepted at the route's full path.
    #[serde(default)]
    pub methods: Vec<HttpMethod>,
    /// Endpoints registered on the route.
    #[serde(default)]
    pub endpoints: Vec<EndpointDefinition>,
}

impl RouteDefinition {
    /// Create a definition in `namespace` with no methods or endpoints.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Set the methods accepted at the route's path.
    #[must_use]
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Append an endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: EndpointDefinition) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Names of the arguments accepted by any endpoint serving `GET`.
    pub fn get_arg_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.endpoints
            .iter()
            .filter(|endpoint| endpoint.methods.contains(&HttpMethod::Get))
            .flat_map(|endpoint| endpoint.args.keys().map(String::as_str))
    }
}

/// Route patterns mapped to their definitions.
///
/// Routes iterate in sorted order, which makes every build over the same map
/// deterministic, including which branch wins a setter alias.
///
/// # Examples
/// ```
/// use wp_request::RouteMap;
/// let routes = RouteMap::from_json_str(
///     r#"{ "/wp/v2/posts": { "namespace": "wp/v2", "methods": ["GET", "POST"] } }"#,
/// )
/// .unwrap();
/// assert_eq!(routes.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deref, From)]
pub struct RouteMap(BTreeMap<String, RouteDefinition>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RouteDocument {
    Index {
        routes: BTreeMap<String, RouteDefinition>,
    },
    Bare(BTreeMap<String, RouteDefinition>),
}

impl RouteMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `definition` under `route`, replacing any previous entry.
    pub fn insert(&mut self, route: impl Into<String>, definition: RouteDefinition) {
        self.0.insert(route.into(), definition);
    }

    /// Return a copy with `definition` registered under `route`.
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>, definition: RouteDefinition) -> Self {
        self.insert(route, definition);
        self
    }

    /// Parse a routes document.
    ///
    /// Accepts either a bare routes object or a full API index with a
    /// top-level `routes` key.
    ///
    /// # Errors
    /// Returns [`RouteError::Json`] when the text is not a routes document.
    pub fn from_json_str(text: &str) -> Result<Self, RouteError> {
        let document: RouteDocument = serde_json::from_str(text)?;
        Ok(match document {
            RouteDocument::Index { routes } | RouteDocument::Bare(routes) => Self(routes),
        })
    }

    /// Read and parse a routes document from disk.
    ///
    /// # Errors
    /// Returns [`RouteError::Io`] when the file cannot be read and
    /// [`RouteError::Json`] when it does not hold a routes document.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RouteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

impl FromIterator<(String, RouteDefinition)> for RouteMap {
    fn from_iter<I: IntoIterator<Item = (String, RouteDefinition)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// PHP encodes an empty associative array as `[]`, so endpoints without
// arguments arrive with a list instead of an object.
fn args_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Args {
        Map(BTreeMap<String, Value>),
        List(Vec<Value>),
    }

    Ok(match Args::deserialize(deserializer)? {
        Args::Map(map) => map,
        Args::List(_) => BTreeMap::new(),
    })
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests parse known-good documents")]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "name": "Example",
        "namespaces": ["wp/v2"],
        "routes": {
            "/wp/v2/posts": {
                "namespace": "wp/v2",
                "methods": ["GET", "POST"],
                "endpoints": [
                    { "methods": ["GET"], "args": { "page": {}, "per_page": { "default": 10 } } },
                    { "methods": ["POST"], "args": { "title": {} } }
                ],
                "_links": { "self": "https://example.com/wp-json/wp/v2/posts" }
            },
            "/wp/v2/settings": {
                "namespace": "wp/v2",
                "methods": ["GET"],
                "endpoints": [ { "methods": ["GET"], "args": [] } ]
            }
        }
    }"#;

    #[test]
    fn parses_full_index_documents() {
        let routes = RouteMap::from_json_str(INDEX).expect("index should parse");
        assert_eq!(routes.len(), 2);
        let posts = routes.get("/wp/v2/posts").expect("posts route present");
        assert_eq!(posts.namespace, "wp/v2");
        assert_eq!(posts.methods, vec![HttpMethod::Get, HttpMethod::Post]);
        let args: Vec<_> = posts.get_arg_names().collect();
        assert_eq!(args, vec!["page", "per_page"]);
    }

    #[test]
    fn tolerates_empty_argument_lists() {
        let routes = RouteMap::from_json_str(INDEX).expect("index should parse");
        let settings = routes.get("/wp/v2/settings").expect("settings route present");
        assert_eq!(settings.get_arg_names().count(), 0);
    }

    #[test]
    fn parses_bare_route_objects() {
        let routes = RouteMap::from_json_str(
            r#"{ "/wp/v2/tags": { "namespace": "wp/v2", "methods": ["get"] } }"#,
        )
        .expect("bare map should parse");
        assert!(routes.contains_key("/wp/v2/tags"));
    }

    #[test]
    fn rejects_unknown_methods() {
        let result = RouteMap::from_json_str(
            r#"{ "/wp/v2/tags": { "namespace": "wp/v2", "methods": ["FETCH"] } }"#,
        );
        assert!(matches!(result, Err(RouteError::Json(_))));
    }

    #[test]
    fn builder_helpers_assemble_definitions() {
        let definition = RouteDefinition::new("wp/v2")
            .with_methods([HttpMethod::Get])
            .with_endpoint(EndpointDefinition::new([HttpMethod::Get]).with_args(["search"]))
            .with_endpoint(EndpointDefinition::new([HttpMethod::Post]).with_args(["title"]));
        let args: Vec<_> = definition.get_arg_names().collect();
        assert_eq!(args, vec!["search"]);
    }
}
