//! Route-table driven request builders for the WordPress REST API.
//!
//! A route map (the `routes` object of a WordPress API index) is compiled
//! into a tree per namespace and resource, flattened into handler specs, and
//! turned into [`EndpointFactory`]s. Each factory creates a
//! [`RequestBuilder`] whose path setters and query mixins are looked up by
//! name in the resource's descriptor table.
//!
//! ```
//! use wp_request::{BuildOptions, EndpointCatalog, MixinRegistry, RequestOptions, RouteDefinition, RouteMap};
//! use wp_request_patterns::HttpMethod;
//!
//! let get = || RouteDefinition::new("wp/v2").with_methods([HttpMethod::Get]);
//! let routes = RouteMap::new()
//!     .with_route(r"/wp/v2/posts/(?P<parent>[\d]+)/revisions", get())
//!     .with_route(r"/wp/v2/posts/(?P<parent>[\d]+)/revisions/(?P<id>[\d]+)", get());
//! let catalog = EndpointCatalog::bootstrap(
//!     &routes,
//!     &MixinRegistry::wordpress_defaults(),
//!     BuildOptions::default(),
//! )?;
//! let mut request = catalog.resource("wp/v2", "posts")?.create(RequestOptions::default());
//! request.set("parent", 5)?.set("revisions", 9)?;
//! assert_eq!(request.render_path()?, "wp/v2/posts/5/revisions/9");
//! # Ok::<(), wp_request::RouteError>(())
//! ```

mod aliases;
mod catalog;
pub mod config;
#[cfg(feature = "diagnostics")]
mod diagnostics;
mod endpoint;
mod error;
mod handler;
mod mixin;
mod register;
mod request;
mod routes;
mod setter;
mod tree;

pub use aliases::{AliasConflict, AliasRegistry, NodeSummary};
pub use catalog::{EndpointCatalog, NamespaceEndpoints};
pub use config::BuildOptions;
pub use endpoint::{Capability, EndpointCtor, EndpointFactory, RESERVED_NAMES};
pub use error::RouteError;
pub use handler::{HandlerSpec, LevelSpec, build_handler_spec};
pub use mixin::{MixinEntry, MixinRegistry, ParamMode, ParamSetter, QueryMixin, QueryParams};
pub use register::{RegisterOptions, register_route};
pub use request::{RequestBuilder, RequestOptions};
pub use routes::{EndpointDefinition, RouteDefinition, RouteMap};
pub use setter::{ChildPromotion, PathPartSetter};
pub use tree::{LevelNode, ResourceTree, RouteTree, build_route_tree, build_route_tree_with};
