//! Route tree construction.
//!
//! Every route of a namespace is split into components; the first component
//! names the resource and the rest extend that resource's tree. Routes that
//! describe the same position share a node: literal components merge on their
//! text and named groups merge on their pattern, so `(?P<id>[\d]+)` and
//! `(?P<parent>[\d]+)` become one node answering to both names.
//!
//! The fold is pure: each step takes the tree by value and hands back the
//! extended tree, so independent builds never share nodes.

use crate::config::BuildOptions;
use crate::error::RouteError;
use crate::routes::{RouteDefinition, RouteMap};
use std::collections::{BTreeMap, BTreeSet};
use wp_request_patterns::{MergeKey, MethodSet, Segment, Validator, split_path};


/// One path position shared by one or more routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelNode {
    component: String,
    key: MergeKey,
    dynamic: bool,
    level: usize,
    names: Vec<String>,
    validator: Validator,
    methods: Option<MethodSet>,
    children: Option<Vec<LevelNode>>,
}

impl LevelNode {
    fn vacant(part: &Part<'_>, level: usize) -> Self {
        Self {
            component: part.component.to_owned(),
            key: part.segment.merge_key(),
            dynamic: part.segment.is_dynamic(),
            level,
            names: Vec::new(),
            validator: Validator::Any,
            methods: None,
            children: None,
        }
    }

    /// Raw component text as first seen, e.g. `revisions` or `(?P<id>[\d]+)`.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Key this node was merged under.
    #[must_use]
    pub const fn merge_key(&self) -> &MergeKey {
        &self.key
    }

    /// Whether the node stands for a caller-supplied value.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Zero-based depth; the resource itself is level 0.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Aliases the node answers to, in the order they were first seen.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Validator for values stored at this node's level.
    #[must_use]
    pub const fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Methods allowed when a route ends here, if any route does.
    #[must_use]
    pub const fn methods(&self) -> Option<&MethodSet> {
        self.methods.as_ref()
    }

    /// Child nodes, in the order their first route was folded in.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether no route continues past this node.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Dynamic children of this node.
    pub fn dynamic_children(&self) -> impl Iterator<Item = &Self> + '_ {
        self.children().iter().filter(|child| child.dynamic)
    }

    fn absorb(mut self, part: &Part<'_>, rest: &[Part<'_>], methods: &MethodSet) -> Self {
        let alias = part.segment.alias();
        if !self.names.iter().any(|name| name == alias) {
            self.names.push(alias.to_owned());
        }
        self.validator = part.validator.clone();

        let Some((next, tail)) = rest.split_first() else {
            self.methods
                .get_or_insert_with(MethodSet::new)
                .union_with(methods);
            return self;
        };

        let level = self.level + 1;
        let children = self.children.get_or_insert_with(Vec::new);
        let key = next.segment.merge_key();
        match children.iter().position(|child| child.key == key) {
            Some(index) => {
                let child = children.remove(index).absorb(next, tail, methods);
                children.insert(index, child);
            }
            None => children.push(Self::vacant(next, level).absorb(next, tail, methods)),
        }
        self
    }
}

/// A classified route component with its compiled validator.
struct Part<'a> {
    segment: Segment,
    component: &'a str,
    validator: Validator,
}

/// The tree of every route under one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTree {
    name: String,
    root: LevelNode,
    get_args: BTreeSet<String>,
}

impl ResourceTree {
    /// Resource name, the first component after the namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Level-0 node for the resource itself.
    #[must_use]
    pub const fn root(&self) -> &LevelNode {
        &self.root
    }

    /// Names of all `GET` arguments accepted anywhere under the resource.
    #[must_use]
    pub const fn get_args(&self) -> &BTreeSet<String> {
        &self.get_args
    }
}

/// Route trees for every namespace, keyed by namespace then resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTree {
    namespaces: BTreeMap<String, BTreeMap<String, ResourceTree>>,
}

impl RouteTree {
    /// Fold one route into the tree.
    ///
    /// Routes without a namespace, the namespace root itself and routes with
    /// nothing after the namespace are skipped. A named group whose pattern
    /// the `regex` crate rejects accepts any value unless
    /// `options.strict_patterns` is set.
    ///
    /// # Errors
    /// Returns [`RouteError::InvalidRoute`] when a named group's pattern does
    /// not compile and `options.strict_patterns` is set.
    pub fn with_route(
        mut self,
        route: &str,
        definition: &RouteDefinition,
        options: &BuildOptions,
    ) -> Result<Self, RouteError> {
        let namespace = definition.namespace.as_str();
        let Some(relative) = relative_route(route, namespace) else {
            log::trace!("skipping route `{route}`: no resource below namespace `{namespace}`");
            return Ok(self);
        };
        let parts = split_path(&relative)
            .into_iter()
            .map(|component| part(route, component, options.strict_patterns))
            .collect::<Result<Vec<_>, _>>()?;
        let Some((resource_part, rest)) = parts.split_first() else {
            log::trace!("skipping route `{route}`: no components");
            return Ok(self);
        };

        let methods: MethodSet = definition.methods.iter().copied().collect();
        let resources = self.namespaces.entry(namespace.to_owned()).or_default();
        let resource = resource_part.component;
        let (root, mut get_args) = resources.remove(resource).map_or_else(
            || (LevelNode::vacant(resource_part, 0), BTreeSet::new()),
            |tree| (tree.root, tree.get_args),
        );
        let root = root.absorb(resource_part, rest, &methods);
        get_args.extend(definition.get_arg_names().map(str::to_owned));
        resources.insert(
            resource.to_owned(),
            ResourceTree {
                name: resource.to_owned(),
                root,
                get_args,
            },
        );
        Ok(self)
    }

    /// Namespaces present in the tree.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> + '_ {
        self.namespaces.keys().map(String::as_str)
    }

    /// Resources of `namespace`, keyed by name.
    #[must_use]
    pub fn resources(&self, namespace: &str) -> Option<&BTreeMap<String, ResourceTree>> {
        self.namespaces.get(namespace)
    }

    /// Tree of one resource.
    #[must_use]
    pub fn resource(&self, namespace: &str, resource: &str) -> Option<&ResourceTree> {
        self.resources(namespace)?.get(resource)
    }
}

/// Build the route tree for every namespace in `routes`.
///
/// Uses lenient [`BuildOptions::default`]; see [`build_route_tree_with`].
///
/// # Errors
/// Never fails with default options; the `Result` mirrors
/// [`build_route_tree_with`].
///
/// # Examples
/// ```
/// use wp_request::{RouteDefinition, RouteMap, build_route_tree};
/// use wp_request_patterns::HttpMethod;
///
/// let routes = RouteMap::new().with_route(
///     r"/wp/v2/posts/(?P<id>[\d]+)",
///     RouteDefinition::new("wp/v2").with_methods([HttpMethod::Get]),
/// );
/// let tree = build_route_tree(&routes).unwrap();
/// let posts = tree.resource("wp/v2", "posts").unwrap();
/// assert_eq!(posts.root().children()[0].names(), ["id"]);
/// ```
pub fn build_route_tree(routes: &RouteMap) -> Result<RouteTree, RouteError> {
    build_route_tree_with(routes, &BuildOptions::default())
}

/// Build the route tree for every namespace in `routes` under `options`.
///
/// # Errors
/// Returns [`RouteError::InvalidRoute`] for the first route whose named-group
/// pattern does not compile when `options.strict_patterns` is set.
pub fn build_route_tree_with(
    routes: &RouteMap,
    options: &BuildOptions,
) -> Result<RouteTree, RouteError> {
    routes
        .iter()
        .try_fold(RouteTree::default(), |tree, (route, definition)| {
            tree.with_route(route, definition, options)
        })
}

/// Strip the namespace prefix and a trailing optional-slash marker.
///
/// Returns `None` for routes that cannot address a resource.
fn relative_route(route: &str, namespace: &str) -> Option<String> {
    if namespace.is_empty() {
        return None;
    }
    let trimmed = route.strip_suffix("/?").unwrap_or(route);
    if trimmed == format!("/{namespace}") {
        return None;
    }
    Some(trimmed.replacen(&format!("/{namespace}/"), "", 1))
}

fn part<'a>(route: &str, component: &'a str, strict: bool) -> Result<Part<'a>, RouteError> {
    let segment = Segment::classify(component);
    if !segment.is_dynamic() && component.contains("(?") {
        log::debug!(
            "route `{route}`: component `{component}` is not a single named group; treating it as literal"
        );
    }
    let validator = match segment.validator() {
        Ok(validator) => validator,
        Err(source) if strict => {
            return Err(RouteError::InvalidRoute {
                route: route.to_owned(),
                source,
            });
        }
        Err(source) => {
            log::warn!("route `{route}`: {source}; `{component}` will accept any value");
            Validator::Any
        }
    };
    Ok(Part {
        segment,
        component,
        validator,
    })
}
