//! Ad hoc endpoints for routes missing from the bootstrapped route map.

use crate::config::BuildOptions;
use crate::endpoint::{EndpointCtor, EndpointFactory};
use crate::error::RouteError;
use crate::handler::build_handler_spec;
use crate::mixin::{MixinEntry, MixinRegistry, ParamSetter};
use crate::routes::{RouteDefinition, RouteMap};
use crate::tree::build_route_tree_with;
use wp_request_patterns::{HttpMethod, MethodSet, camel_case};

/// Settings for [`register_route`].
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    /// Methods the route accepts; all writable methods when `None`.
    pub methods: Option<Vec<HttpMethod>>,
    /// Query parameters to expose as builder methods.
    pub params: Vec<String>,
    /// Where known parameters find their mixins.
    pub mixins: MixinRegistry,
    /// Tree and setter options.
    pub build: BuildOptions,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self {
            methods: None,
            params: Vec::new(),
            mixins: MixinRegistry::wordpress_defaults(),
            build: BuildOptions::from_env(),
        }
    }
}

impl RegisterOptions {
    /// Restrict the route to `methods`.
    #[must_use]
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.methods = Some(methods.into_iter().collect());
        self
    }

    /// Expose `params` as query-parameter methods.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(params.into_iter().map(Into::into));
        self
    }
}

/// Build a factory for one route under `namespace`, e.g.
/// `register_route("myplugin/v1", "/author/(?P<id>\\d+)", ..)`.
///
/// # Errors
/// Returns [`RouteError::EmptyRoute`] when `rest_base` names no resource,
/// [`RouteError::InvalidRoute`] for uncompilable patterns and, in strict
/// mode, [`RouteError::AliasConflicts`].
///
/// # Examples
/// ```
/// use wp_request::{RegisterOptions, RequestOptions, register_route};
/// let books = register_route(
///     "/myplugin/v1/",
///     "/books/(?P<id>[\\d]+)",
///     RegisterOptions::default().with_params(["per_page"]),
/// )?;
/// let mut request = books.create(RequestOptions::default());
/// request.set("id", 3)?.set("perPage", 10)?;
/// assert_eq!(request.render_path()?, "myplugin/v1/books/3");
/// # Ok::<(), wp_request::RouteError>(())
/// ```
pub fn register_route(
    namespace: &str,
    rest_base: &str,
    options: RegisterOptions,
) -> Result<EndpointFactory, RouteError> {
    let namespace = namespace.trim_matches('/');
    let route = format!("/{namespace}/{}", rest_base.trim_start_matches('/'));
    let methods: MethodSet = options
        .methods
        .map_or_else(MethodSet::all_writable, |methods| methods.into_iter().collect());
    let definition = RouteDefinition::new(namespace).with_methods(methods.iter());
    let routes = RouteMap::new().with_route(route.clone(), definition);
    let tree = build_route_tree_with(&routes, &options.build)?;
    let resource = tree
        .resources(namespace)
        .and_then(|resources| resources.values().next())
        .ok_or_else(|| RouteError::EmptyRoute(route.clone()))?;

    let spec = build_handler_spec(namespace, resource, &options.build);
    if options.build.fail_on_alias_conflict && !spec.alias_conflicts().is_empty() {
        return Err(RouteError::AliasConflicts(spec.alias_conflicts().to_vec()));
    }
    let mut ctor = EndpointCtor::new(&spec, &options.mixins);
    for param in &options.params {
        let entry = options.mixins.get(param).cloned().unwrap_or_else(|| {
            MixinEntry::new(camel_case(param), ParamSetter::replace(param.as_str()))
        });
        ctor = ctor.with_mixin(entry);
    }
    log::debug!("registered ad hoc route `{route}`");
    Ok(EndpointFactory::new(ctor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestOptions;

    #[test]
    fn normalises_namespace_slashes() -> Result<(), RouteError> {
        let factory = register_route("/myplugin/v1/", "/authors", RegisterOptions::default())?;
        assert_eq!(factory.ctor().namespace(), "myplugin/v1");
        assert_eq!(factory.ctor().resource(), "authors");
        let request = factory.create(RequestOptions::default());
        assert_eq!(request.render_path()?, "myplugin/v1/authors");
        Ok(())
    }

    #[test]
    fn defaults_to_every_writable_method() -> Result<(), RouteError> {
        let factory = register_route(
            "myplugin/v1",
            r"authors/(?P<id>[\d]+)",
            RegisterOptions::default(),
        )?;
        let mut request = factory.create(RequestOptions::default());
        request.set("id", 1)?;
        assert_eq!(
            request.supported_methods().to_string(),
            "get, head, post, put, patch, delete"
        );
        Ok(())
    }

    #[test]
    fn explicit_methods_get_head_pairing() -> Result<(), RouteError> {
        let factory = register_route(
            "myplugin/v1",
            r"authors/(?P<id>[\d]+)",
            RegisterOptions::default().with_methods([HttpMethod::Get]),
        )?;
        let mut request = factory.create(RequestOptions::default());
        request.set("id", 1)?;
        assert_eq!(request.supported_methods().to_string(), "get, head");
        Ok(())
    }

    #[test]
    fn unknown_params_become_generic_setters() -> Result<(), RouteError> {
        let factory = register_route(
            "myplugin/v1",
            "books",
            RegisterOptions::default().with_params(["page", "book_genre"]),
        )?;
        let mut request = factory.create(RequestOptions::default());
        request.set("page", 2)?.set("bookGenre", "fantasy")?;
        assert_eq!(request.render_query(), "book_genre=fantasy&page=2");
        Ok(())
    }

    #[test]
    fn routes_without_a_resource_are_rejected() {
        let result = register_route("myplugin/v1", "/", RegisterOptions::default());
        assert!(matches!(result, Err(RouteError::EmptyRoute(route)) if route == "/myplugin/v1/"));
    }
}
