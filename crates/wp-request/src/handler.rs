//! Flattening a resource tree into per-resource handler tables.
//!
//! The walk records, per depth, every shape a path slot may take (used when
//! validating a rendered path) and registers one setter per alias of every
//! node below the resource.

use crate::aliases::{AliasConflict, AliasRegistry, NodeSummary};
use crate::config::BuildOptions;
use crate::setter::PathPartSetter;
use crate::tree::{LevelNode, ResourceTree};
use std::collections::{BTreeMap, BTreeSet};
use wp_request_patterns::{MethodSet, Validator, camel_case};

/// One accepted shape of a path slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSpec {
    /// Raw component text, shown when validation fails.
    pub component: String,
    /// Validator for values stored in the slot.
    pub validator: Validator,
    /// Methods allowed when a route ends at this shape.
    pub methods: Option<MethodSet>,
}

/// Flattened description of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSpec {
    namespace: String,
    resource: String,
    levels: BTreeMap<usize, Vec<LevelSpec>>,
    setters: AliasRegistry,
    get_args: BTreeSet<String>,
}

impl HandlerSpec {
    /// Namespace of the resource.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resource name.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Accepted shapes per depth.
    #[must_use]
    pub const fn levels(&self) -> &BTreeMap<usize, Vec<LevelSpec>> {
        &self.levels
    }

    /// Setters keyed by camel-cased alias.
    #[must_use]
    pub const fn setters(&self) -> &AliasRegistry {
        &self.setters
    }

    /// `GET` arguments accepted anywhere under the resource.
    #[must_use]
    pub const fn get_args(&self) -> &BTreeSet<String> {
        &self.get_args
    }

    /// Alias conflicts found while registering setters.
    #[must_use]
    pub fn alias_conflicts(&self) -> &[AliasConflict] {
        self.setters.conflicts()
    }
}

/// Build the handler tables for one resource tree.
///
/// # Examples
/// ```
/// use wp_request::{BuildOptions, RouteDefinition, RouteMap, build_handler_spec, build_route_tree};
/// use wp_request_patterns::HttpMethod;
///
/// let routes = RouteMap::new().with_route(
///     r"/wp/v2/posts/(?P<parent_id>[\d]+)",
///     RouteDefinition::new("wp/v2").with_methods([HttpMethod::Get]),
/// );
/// let tree = build_route_tree(&routes).unwrap();
/// let posts = tree.resource("wp/v2", "posts").unwrap();
/// let spec = build_handler_spec("wp/v2", posts, &BuildOptions::default());
/// assert!(spec.setters().get("parentId").is_some());
/// assert_eq!(spec.levels().len(), 2);
/// ```
#[must_use]
pub fn build_handler_spec(
    namespace: &str,
    tree: &ResourceTree,
    options: &BuildOptions,
) -> HandlerSpec {
    let mut spec = HandlerSpec {
        namespace: namespace.to_owned(),
        resource: tree.name().to_owned(),
        levels: BTreeMap::new(),
        setters: AliasRegistry::new(namespace, tree.name()),
        get_args: tree.get_args().clone(),
    };
    walk(&mut spec, tree.root(), options);
    spec
}

fn walk(spec: &mut HandlerSpec, node: &LevelNode, options: &BuildOptions) {
    spec.levels.entry(node.level()).or_default().push(LevelSpec {
        component: node.component().to_owned(),
        validator: node.validator().clone(),
        methods: node.methods().cloned(),
    });

    // Level 0 is the resource itself, bound when a builder is created.
    if node.level() > 0 {
        let setter = PathPartSetter::for_node(node, options.child_promotion);
        for name in node.names() {
            let origin = NodeSummary {
                component: node.component().to_owned(),
                level: node.level(),
            };
            spec.setters
                .register(camel_case(name), origin, setter.clone());
        }
    }

    for child in node.children() {
        walk(spec, child, options);
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests build known-good routes")]
mod tests {
    use super::*;
    use crate::routes::{RouteDefinition, RouteMap};
    use crate::tree::build_route_tree;
    use wp_request_patterns::HttpMethod;

    fn spec_for(routes: &RouteMap, options: &BuildOptions) -> HandlerSpec {
        let tree = build_route_tree(routes).expect("routes should build");
        let posts = tree.resource("wp/v2", "posts").expect("posts should exist");
        build_handler_spec("wp/v2", posts, options)
    }

    fn get() -> RouteDefinition {
        RouteDefinition::new("wp/v2").with_methods([HttpMethod::Get])
    }

    fn revision_routes() -> RouteMap {
        RouteMap::new()
            .with_route("/wp/v2/posts", get())
            .with_route(r"/wp/v2/posts/(?P<id>[\d]+)", get())
            .with_route(r"/wp/v2/posts/(?P<parent>[\d]+)/revisions", get())
            .with_route(r"/wp/v2/posts/(?P<parent>[\d]+)/revisions/(?P<id>[\d]+)", get())
            .with_route(r"/wp/v2/posts/(?P<parent>[\d]+)/autosaves", get())
    }

    #[test]
    fn collection_only_resources_have_no_setters() {
        let spec = spec_for(
            &RouteMap::new().with_route("/wp/v2/posts", get()),
            &BuildOptions::default(),
        );
        assert!(spec.setters().is_empty());
        assert_eq!(spec.levels().len(), 1);
        assert_eq!(spec.resource(), "posts");
    }

    #[test]
    fn registers_every_alias_of_merged_nodes() {
        let spec = spec_for(&revision_routes(), &BuildOptions::default());
        let names: Vec<_> = spec.setters().names().collect();
        assert_eq!(names, vec!["autosaves", "id", "parent", "revisions"]);
        assert_eq!(spec.setters().get("id").map(PathPartSetter::level), Some(1));
        assert_eq!(spec.setters().get("parent").map(PathPartSetter::level), Some(1));
    }

    #[test]
    fn records_sibling_shapes_per_level() {
        let spec = spec_for(&revision_routes(), &BuildOptions::default());
        let level_two: Vec<_> = spec
            .levels()
            .get(&2)
            .map(|shapes| shapes.iter().map(|shape| shape.component.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(level_two, vec!["autosaves", "revisions"]);
    }

    #[test]
    fn collection_setters_promote_their_single_dynamic_child() {
        let spec = spec_for(&revision_routes(), &BuildOptions::default());
        let revisions = spec.setters().get("revisions").expect("revisions setter");
        assert!(revisions.promotes_child());
        let autosaves = spec.setters().get("autosaves").expect("autosaves setter");
        assert!(!autosaves.promotes_child());
    }

    #[test]
    fn promotion_can_be_disabled() {
        let options = BuildOptions::default().with_child_promotion(false);
        let spec = spec_for(&revision_routes(), &options);
        let revisions = spec.setters().get("revisions").expect("revisions setter");
        assert!(!revisions.promotes_child());
    }

    #[test]
    fn later_aliases_at_other_depths_are_dropped_and_reported() {
        let routes = RouteMap::new()
            .with_route("/wp/v2/posts/(?P<name>[a-z]+)", get())
            .with_route(r"/wp/v2/posts/by-author/(?P<name>[\d]+)", get());
        let spec = spec_for(&routes, &BuildOptions::default());
        assert_eq!(spec.setters().get("name").map(PathPartSetter::level), Some(1));
        assert!(spec.setters().get("byAuthor").is_some());
        let [conflict] = spec.alias_conflicts() else {
            panic!("expected one conflict");
        };
        assert_eq!(conflict.dropped.level, 2);
        assert_eq!(conflict.resource, "posts");
    }

    #[test]
    fn building_twice_yields_equal_specs() {
        let routes = revision_routes();
        let first = spec_for(&routes, &BuildOptions::default());
        let second = spec_for(&routes, &BuildOptions::default());
        assert_eq!(first.levels(), second.levels());
        assert_eq!(first.setters(), second.setters());
    }
}
