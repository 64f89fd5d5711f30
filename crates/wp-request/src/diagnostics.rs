//! JSON export of a bootstrapped catalog for external tooling.

use crate::catalog::EndpointCatalog;
use crate::endpoint::Capability;
use serde::Serialize;

#[derive(Serialize)]
struct DumpedLevel<'a> {
    level: usize,
    component: &'a str,
    validator: &'a str,
    methods: Option<Vec<&'static str>>,
}

#[derive(Serialize)]
struct DumpedResource<'a> {
    name: &'a str,
    levels: Vec<DumpedLevel<'a>>,
    setters: Vec<&'a str>,
    mixins: Vec<&'a str>,
    alias_conflicts: Vec<String>,
}

#[derive(Serialize)]
struct DumpedNamespace<'a> {
    name: &'a str,
    resources: Vec<DumpedResource<'a>>,
}

#[derive(Serialize)]
struct CatalogDump<'a> {
    namespaces: Vec<DumpedNamespace<'a>>,
}

impl EndpointCatalog {
    /// Serialise every namespace and resource as JSON.
    ///
    /// # Errors
    /// Returns any error raised by `serde_json` while serialising.
    ///
    /// # Examples
    /// ```
    /// use wp_request::{EndpointCatalog, MixinRegistry, RouteDefinition, RouteMap};
    /// use wp_request_patterns::HttpMethod;
    ///
    /// let routes = RouteMap::new()
    ///     .with_route("/wp/v2/posts", RouteDefinition::new("wp/v2").with_methods([HttpMethod::Get]));
    /// let catalog = EndpointCatalog::bootstrap(&routes, &MixinRegistry::new(), Default::default())?;
    /// let json = catalog.dump().expect("serialise catalog");
    /// assert!(json.contains("\"posts\""));
    /// # Ok::<(), wp_request::RouteError>(())
    /// ```
    pub fn dump(&self) -> serde_json::Result<String> {
        let namespaces = self
            .namespaces()
            .map(|namespace| DumpedNamespace {
                name: namespace.name(),
                resources: namespace
                    .resources()
                    .map(|(name, factory)| {
                        let ctor = factory.ctor();
                        let levels = ctor
                            .levels()
                            .iter()
                            .flat_map(|(level, shapes)| {
                                shapes.iter().map(|shape| DumpedLevel {
                                    level: *level,
                                    component: &shape.component,
                                    validator: shape.validator.source(),
                                    methods: shape
                                        .methods
                                        .as_ref()
                                        .map(|methods| methods.iter().map(|m| m.as_str()).collect()),
                                })
                            })
                            .collect();
                        let (setters, mixins) = ctor.capabilities().fold(
                            (Vec::new(), Vec::new()),
                            |(mut setters, mut mixins), (name, capability)| {
                                match capability {
                                    Capability::PathPart(_) => setters.push(name),
                                    Capability::Mixin(_) => mixins.push(name),
                                }
                                (setters, mixins)
                            },
                        );
                        DumpedResource {
                            name,
                            levels,
                            setters,
                            mixins,
                            alias_conflicts: ctor
                                .alias_conflicts()
                                .iter()
                                .map(ToString::to_string)
                                .collect(),
                        }
                    })
                    .collect(),
            })
            .collect();
        serde_json::to_string_pretty(&CatalogDump { namespaces })
    }
}
