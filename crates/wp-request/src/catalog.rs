//! Bootstrapping endpoint factories for every namespace in a route map.

use crate::aliases::AliasConflict;
use crate::config::BuildOptions;
use crate::endpoint::{EndpointCtor, EndpointFactory};
use crate::error::RouteError;
use crate::handler::build_handler_spec;
use crate::mixin::MixinRegistry;
use crate::routes::RouteMap;
use crate::tree::build_route_tree_with;
use std::collections::BTreeMap;

/// Endpoint factories for one namespace, keyed by resource.
#[derive(Debug, Clone)]
pub struct NamespaceEndpoints {
    name: String,
    resources: BTreeMap<String, EndpointFactory>,
}

impl NamespaceEndpoints {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: BTreeMap::new(),
        }
    }

    /// Namespace name, e.g. `wp/v2`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Factory for `resource`.
    ///
    /// # Errors
    /// Returns [`RouteError::UnknownResource`] when the namespace has no such
    /// resource.
    pub fn resource(&self, resource: &str) -> Result<&EndpointFactory, RouteError> {
        self.resources
            .get(resource)
            .ok_or_else(|| RouteError::UnknownResource {
                namespace: self.name.clone(),
                resource: resource.to_owned(),
            })
    }

    /// Factories sorted by resource name.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &EndpointFactory)> + '_ {
        self.resources
            .iter()
            .map(|(name, factory)| (name.as_str(), factory))
    }
}

/// Endpoint factories for every bootstrapped namespace.
#[derive(Debug, Clone, Default)]
pub struct EndpointCatalog {
    namespaces: BTreeMap<String, NamespaceEndpoints>,
}

impl EndpointCatalog {
    /// Compile `routes` into endpoint factories.
    ///
    /// Each call builds an independent catalog; nothing is cached between
    /// calls.
    ///
    /// # Errors
    /// Returns [`RouteError::InvalidRoute`] for uncompilable route patterns
    /// when `options.strict_patterns` is set and, when `options.fail_on_alias_conflict` is set,
    /// [`RouteError::AliasConflicts`] if any setter alias was dropped.
    pub fn bootstrap(
        routes: &RouteMap,
        mixins: &MixinRegistry,
        options: BuildOptions,
    ) -> Result<Self, RouteError> {
        let tree = build_route_tree_with(routes, &options)?;
        let mut catalog = Self::default();
        for namespace in tree.namespaces() {
            let Some(resources) = tree.resources(namespace) else {
                continue;
            };
            for resource in resources.values() {
                let spec = build_handler_spec(namespace, resource, &options);
                catalog.insert(EndpointFactory::new(EndpointCtor::new(&spec, mixins)));
            }
        }
        log::debug!(
            "bootstrapped {} namespace(s) from {} route(s)",
            catalog.namespaces.len(),
            routes.len()
        );
        if options.fail_on_alias_conflict {
            let conflicts: Vec<AliasConflict> = catalog.alias_conflicts().cloned().collect();
            if !conflicts.is_empty() {
                return Err(RouteError::AliasConflicts(conflicts));
            }
        }
        Ok(catalog)
    }

    /// Add or replace the factory for its namespace and resource.
    pub fn insert(&mut self, factory: EndpointFactory) {
        let namespace = factory.ctor().namespace().to_owned();
        let resource = factory.ctor().resource().to_owned();
        self.namespaces
            .entry(namespace.clone())
            .or_insert_with(|| NamespaceEndpoints::new(namespace))
            .resources
            .insert(resource, factory);
    }

    /// Factories of `namespace`.
    ///
    /// # Errors
    /// Returns [`RouteError::UnknownNamespace`] when the namespace was not
    /// bootstrapped.
    pub fn namespace(&self, namespace: &str) -> Result<&NamespaceEndpoints, RouteError> {
        self.namespaces
            .get(namespace)
            .ok_or_else(|| RouteError::UnknownNamespace(namespace.to_owned()))
    }

    /// Factory for `resource` in `namespace`.
    ///
    /// # Errors
    /// Returns [`RouteError::UnknownNamespace`] or
    /// [`RouteError::UnknownResource`].
    pub fn resource(&self, namespace: &str, resource: &str) -> Result<&EndpointFactory, RouteError> {
        self.namespace(namespace)?.resource(resource)
    }

    /// Bootstrapped namespaces, sorted by name.
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceEndpoints> + '_ {
        self.namespaces.values()
    }

    /// Alias conflicts across every resource.
    pub fn alias_conflicts(&self) -> impl Iterator<Item = &AliasConflict> + '_ {
        self.namespaces
            .values()
            .flat_map(|namespace| namespace.resources.values())
            .flat_map(|factory| factory.ctor().alias_conflicts())
    }
}
