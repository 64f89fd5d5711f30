//! Conflict-aware registry of setter aliases.
//!
//! Sibling branches of a resource tree may expose the same alias, for example
//! `name` at two different depths. The first registration keeps the alias;
//! later registrations that would behave differently are recorded as
//! [`AliasConflict`]s and logged instead of vanishing silently.

use crate::setter::PathPartSetter;
use std::collections::BTreeMap;
use std::fmt;

/// Tree node an alias pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    /// Raw component text of the node.
    pub component: String,
    /// Level of the node.
    pub level: usize,
}

impl fmt::Display for NodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` at level {}", self.component, self.level)
    }
}

/// Two tree nodes competing for one setter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConflict {
    /// Namespace of the resource.
    pub namespace: String,
    /// Resource whose tree holds both nodes.
    pub resource: String,
    /// Camel-cased setter name.
    pub alias: String,
    /// Node that kept the alias.
    pub kept: NodeSummary,
    /// Node whose setter was dropped.
    pub dropped: NodeSummary,
}

impl fmt::Display for AliasConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "setter `{}` on {}/{} kept for {} and dropped for {}",
            self.alias, self.namespace, self.resource, self.kept, self.dropped
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AliasEntry {
    setter: PathPartSetter,
    origin: NodeSummary,
}

/// Setter table for one resource, keyed by camel-cased alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRegistry {
    namespace: String,
    resource: String,
    entries: BTreeMap<String, AliasEntry>,
    conflicts: Vec<AliasConflict>,
}

impl AliasRegistry {
    /// Create an empty registry for `namespace`/`resource`.
    #[must_use]
    pub fn new(namespace: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            resource: resource.into(),
            entries: BTreeMap::new(),
            conflicts: Vec::new(),
        }
    }

    /// Register `setter` under `alias` unless the alias is taken.
    ///
    /// Returns `true` when the setter was stored. Re-registering an identical
    /// setter is a no-op; a different setter is dropped and recorded as a
    /// conflict.
    pub fn register(&mut self, alias: String, origin: NodeSummary, setter: PathPartSetter) -> bool {
        let Some(existing) = self.entries.get(&alias) else {
            self.entries.insert(alias, AliasEntry { setter, origin });
            return true;
        };
        if existing.setter == setter {
            return false;
        }
        let conflict = AliasConflict {
            namespace: self.namespace.clone(),
            resource: self.resource.clone(),
            alias,
            kept: existing.origin.clone(),
            dropped: origin,
        };
        log::warn!("{conflict}");
        self.conflicts.push(conflict);
        false
    }

    /// Setter registered under `alias`.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&PathPartSetter> {
        self.entries.get(alias).map(|entry| &entry.setter)
    }

    /// Node that owns `alias`.
    #[must_use]
    pub fn origin(&self, alias: &str) -> Option<&NodeSummary> {
        self.entries.get(alias).map(|entry| &entry.origin)
    }

    /// Registered aliases and their setters, sorted by alias.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathPartSetter)> + '_ {
        self.entries
            .iter()
            .map(|(alias, entry)| (alias.as_str(), &entry.setter))
    }

    /// Registered aliases, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no alias is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Conflicts recorded so far.
    #[must_use]
    pub fn conflicts(&self) -> &[AliasConflict] {
        &self.conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(component: &str, level: usize) -> NodeSummary {
        NodeSummary {
            component: component.into(),
            level,
        }
    }

    fn dynamic(level: usize) -> PathPartSetter {
        PathPartSetter::Dynamic {
            level,
            methods: None,
        }
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = AliasRegistry::new("wp/v2", "posts");
        assert!(registry.register("name".into(), summary("(?P<name>[a-z]+)", 1), dynamic(1)));
        assert!(!registry.register("name".into(), summary(r"(?P<name>[\d]+)", 2), dynamic(2)));
        assert_eq!(registry.get("name").map(PathPartSetter::level), Some(1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn records_conflicts_between_different_setters() {
        let mut registry = AliasRegistry::new("wp/v2", "posts");
        registry.register("name".into(), summary("(?P<name>[a-z]+)", 1), dynamic(1));
        registry.register("name".into(), summary(r"(?P<name>[\d]+)", 2), dynamic(2));
        let [conflict] = registry.conflicts() else {
            panic!("expected exactly one conflict");
        };
        assert_eq!(conflict.alias, "name");
        assert_eq!(conflict.kept.level, 1);
        assert_eq!(conflict.dropped.level, 2);
        assert_eq!(
            conflict.to_string(),
            r"setter `name` on wp/v2/posts kept for `(?P<name>[a-z]+)` at level 1 and dropped for `(?P<name>[\d]+)` at level 2"
        );
    }

    #[test]
    fn identical_setters_are_not_conflicts() {
        let mut registry = AliasRegistry::new("wp/v2", "posts");
        registry.register("parentId".into(), summary("(?P<parent_id>)", 1), dynamic(1));
        registry.register("parentId".into(), summary("(?P<parentId>)", 1), dynamic(1));
        assert!(registry.conflicts().is_empty());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["parentId"]);
    }
}
