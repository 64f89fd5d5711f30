//! Endpoint descriptors and the factories that create request builders.
//!
//! Every resource shares the single [`RequestBuilder`] type; what differs is
//! the [`EndpointCtor`] table it dispatches method calls through.

use crate::aliases::AliasConflict;
use crate::handler::{HandlerSpec, LevelSpec};
use crate::mixin::{MixinEntry, MixinRegistry};
use crate::request::{RequestBuilder, RequestOptions};
use crate::setter::PathPartSetter;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Names of the builder's own generic operations in capability spelling.
///
/// A setter or mixin under one of these names would be indistinguishable from
/// the operation it shadows (`param` adds a raw query parameter,
/// `setPathPart` writes a slot by level, `validatePath` checks the stored
/// path), so none is ever attached. Resource vocabulary such as `namespace`
/// or `status` stays available.
pub const RESERVED_NAMES: &[&str] = &["param", "setPathPart", "validatePath"];

/// A named method a builder can dispatch to.
#[derive(Debug, Clone)]
pub enum Capability {
    /// Fills one or two path slots.
    PathPart(PathPartSetter),
    /// Adjusts query parameters.
    Mixin(MixinEntry),
}

impl Capability {
    /// Short label used in logs and diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PathPart(_) => "path",
            Self::Mixin(_) => "mixin",
        }
    }
}

/// Immutable descriptor table shared by every builder for one resource.
#[derive(Debug, Clone)]
pub struct EndpointCtor {
    namespace: String,
    resource: String,
    levels: BTreeMap<usize, Vec<LevelSpec>>,
    capabilities: BTreeMap<String, Capability>,
    conflicts: Vec<AliasConflict>,
}

impl EndpointCtor {
    /// Build the descriptor table for `spec`, attaching mixins from `mixins`
    /// for every `GET` argument the resource accepts.
    ///
    /// Path setters take precedence over mixins of the same name; reserved
    /// builder names are never attached.
    #[must_use]
    pub fn new(spec: &HandlerSpec, mixins: &MixinRegistry) -> Self {
        let mut ctor = Self {
            namespace: spec.namespace().to_owned(),
            resource: spec.resource().to_owned(),
            levels: spec.levels().clone(),
            capabilities: BTreeMap::new(),
            conflicts: spec.alias_conflicts().to_vec(),
        };
        for (alias, setter) in spec.setters().iter() {
            ctor.attach(alias, Capability::PathPart(setter.clone()));
        }
        for arg in spec.get_args() {
            if let Some(entry) = mixins.get(arg) {
                ctor.attach(entry.method(), Capability::Mixin(entry.clone()));
            }
        }
        ctor
    }

    /// Attach an extra mixin, keeping any capability already under its name.
    #[must_use]
    pub fn with_mixin(mut self, entry: MixinEntry) -> Self {
        let method = entry.method().to_owned();
        self.attach(&method, Capability::Mixin(entry));
        self
    }

    fn attach(&mut self, name: &str, capability: Capability) {
        if RESERVED_NAMES.contains(&name) {
            log::debug!(
                "{}/{}: {} `{name}` shadowed by a builder method",
                self.namespace,
                self.resource,
                capability.kind()
            );
            return;
        }
        if let Some(existing) = self.capabilities.get(name) {
            log::debug!(
                "{}/{}: {} `{name}` shadowed by {} of the same name",
                self.namespace,
                self.resource,
                capability.kind(),
                existing.kind()
            );
            return;
        }
        self.capabilities.insert(name.to_owned(), capability);
    }

    /// Namespace requests are rendered under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resource bound to path slot 0.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Accepted shapes per depth, used for path validation.
    #[must_use]
    pub const fn levels(&self) -> &BTreeMap<usize, Vec<LevelSpec>> {
        &self.levels
    }

    /// Capability registered under `name`.
    #[must_use]
    pub fn capability(&self, name: &str) -> Option<&Capability> {
        self.capabilities.get(name)
    }

    /// All capabilities, sorted by name.
    pub fn capabilities(&self) -> impl Iterator<Item = (&str, &Capability)> + '_ {
        self.capabilities
            .iter()
            .map(|(name, capability)| (name.as_str(), capability))
    }

    /// Alias conflicts recorded while building the resource.
    #[must_use]
    pub fn alias_conflicts(&self) -> &[AliasConflict] {
        &self.conflicts
    }
}

/// Creates request builders for one resource.
#[derive(Debug, Clone)]
pub struct EndpointFactory {
    ctor: Arc<EndpointCtor>,
}

impl EndpointFactory {
    /// Wrap a descriptor table.
    #[must_use]
    pub fn new(ctor: EndpointCtor) -> Self {
        Self {
            ctor: Arc::new(ctor),
        }
    }

    /// Create a builder with path slot 0 bound to the resource.
    #[must_use]
    pub fn create(&self, options: RequestOptions) -> RequestBuilder {
        RequestBuilder::new(Arc::clone(&self.ctor), options)
    }

    /// The descriptor table behind this factory.
    #[must_use]
    pub fn ctor(&self) -> &EndpointCtor {
        &self.ctor
    }
}
