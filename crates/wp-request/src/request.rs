//! The generic request builder every endpoint factory produces.

use crate::endpoint::{Capability, EndpointCtor};
use crate::error::RouteError;
use crate::mixin::QueryParams;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use wp_request_patterns::{HttpMethod, MethodSet};

/// Options passed to every builder a factory creates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Base URL of the REST API, e.g. `https://example.com/wp-json/`.
    pub endpoint: String,
}

impl RequestOptions {
    /// Options targeting `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

/// Fluent builder for one request against one resource.
///
/// Path setters and query mixins are dispatched by name through the
/// resource's [`EndpointCtor`].
///
/// # Examples
/// ```
/// use wp_request::{EndpointCatalog, MixinRegistry, RequestOptions, RouteDefinition, RouteMap};
/// use wp_request_patterns::HttpMethod;
///
/// let routes = RouteMap::new().with_route(
///     r"/wp/v2/posts/(?P<id>[\d]+)",
///     RouteDefinition::new("wp/v2").with_methods([HttpMethod::Get]),
/// );
/// let catalog = EndpointCatalog::bootstrap(&routes, &MixinRegistry::new(), Default::default())?;
/// let mut request = catalog
///     .resource("wp/v2", "posts")?
///     .create(RequestOptions::new("https://example.com/wp-json/"));
/// request.set("id", 7)?;
/// assert_eq!(request.render_uri()?, "https://example.com/wp-json/wp/v2/posts/7");
/// # Ok::<(), wp_request::RouteError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    ctor: Arc<EndpointCtor>,
    options: RequestOptions,
    path: BTreeMap<usize, String>,
    supported_methods: MethodSet,
    query: QueryParams,
}

impl RequestBuilder {
    pub(crate) fn new(ctor: Arc<EndpointCtor>, options: RequestOptions) -> Self {
        let mut path = BTreeMap::new();
        path.insert(0, ctor.resource().to_owned());
        Self {
            ctor,
            options,
            path,
            supported_methods: MethodSet::builder_default(),
            query: QueryParams::new(),
        }
    }

    /// Namespace the request is rendered under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.ctor.namespace()
    }

    /// Resource bound to path slot 0.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.ctor.resource()
    }

    /// Options the builder was created with.
    #[must_use]
    pub const fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Call the capability registered under `name`.
    ///
    /// # Errors
    /// Returns [`RouteError::UnknownCapability`] when the resource has no
    /// such method, or the error raised by the capability itself.
    pub fn invoke(&mut self, name: &str, value: Option<String>) -> Result<&mut Self, RouteError> {
        let ctor = Arc::clone(&self.ctor);
        match ctor.capability(name) {
            Some(Capability::PathPart(setter)) => setter.apply(name, self, value)?,
            Some(Capability::Mixin(entry)) => entry.mixin().apply(&mut self.query, value)?,
            None => {
                return Err(RouteError::UnknownCapability {
                    resource: ctor.resource().to_owned(),
                    name: name.to_owned(),
                });
            }
        }
        Ok(self)
    }

    /// Call the capability `name` with a value.
    ///
    /// # Errors
    /// See [`RequestBuilder::invoke`].
    pub fn set(&mut self, name: &str, value: impl fmt::Display) -> Result<&mut Self, RouteError> {
        self.invoke(name, Some(value.to_string()))
    }

    /// Call the capability `name` without a value, e.g. `revisions`.
    ///
    /// # Errors
    /// See [`RequestBuilder::invoke`].
    pub fn select(&mut self, name: &str) -> Result<&mut Self, RouteError> {
        self.invoke(name, None)
    }

    /// Set an arbitrary query parameter, replacing previous values.
    pub fn param(&mut self, name: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.query.insert(name.into(), vec![value.to_string()]);
        self
    }

    /// Store `value` in path slot `level`.
    ///
    /// # Errors
    /// Returns [`RouteError::PathPartOccupied`] when the slot already holds a
    /// value.
    pub fn set_path_part(
        &mut self,
        level: usize,
        value: impl Into<String>,
    ) -> Result<&mut Self, RouteError> {
        if let Some(existing) = self.path.get(&level) {
            return Err(RouteError::PathPartOccupied {
                level,
                existing: existing.clone(),
            });
        }
        self.path.insert(level, value.into());
        Ok(self)
    }

    /// Value stored in path slot `level`.
    #[must_use]
    pub fn path_part(&self, level: usize) -> Option<&str> {
        self.path.get(&level).map(String::as_str)
    }

    /// Stored path slots in level order.
    pub fn path_parts(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.path.iter().map(|(level, value)| (*level, value.as_str()))
    }

    /// Methods allowed for the path built so far.
    #[must_use]
    pub const fn supported_methods(&self) -> &MethodSet {
        &self.supported_methods
    }

    pub(crate) fn replace_supported_methods(&mut self, methods: MethodSet) {
        self.supported_methods = methods;
    }

    /// Query parameters set so far.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Check every stored slot against the shapes its level accepts.
    ///
    /// Levels the resource does not define are skipped.
    ///
    /// # Errors
    /// Returns [`RouteError::InvalidPathComponent`] when a value matches no
    /// shape at its level, or [`RouteError::IncompletePath`] when a level
    /// below the deepest stored slot is empty.
    pub fn validate_path(&self) -> Result<(), RouteError> {
        let Some(max_level) = self.path.keys().next_back().copied() else {
            return Ok(());
        };
        let levels = self.ctor.levels();
        let mut rendered = Vec::new();
        let mut complete = true;
        for level in 0..=max_level {
            let Some(shapes) = levels.get(&level) else {
                continue;
            };
            let Some(value) = self.path.get(&level) else {
                rendered.push(" ??? ");
                complete = false;
                continue;
            };
            if !shapes.iter().any(|shape| shape.validator.validate(value)) {
                return Err(RouteError::InvalidPathComponent {
                    value: value.clone(),
                    accepted: shapes.iter().map(|shape| shape.component.clone()).collect(),
                });
            }
            rendered.push(value.as_str());
        }
        if complete {
            Ok(())
        } else {
            Err(RouteError::IncompletePath(rendered.join("/")))
        }
    }

    /// Validated path below the API root, e.g. `wp/v2/posts/7`.
    ///
    /// # Errors
    /// See [`RequestBuilder::validate_path`].
    pub fn render_path(&self) -> Result<String, RouteError> {
        self.validate_path()?;
        let parts: Vec<&str> = std::iter::once(self.namespace())
            .chain(self.path.values().map(String::as_str))
            .filter(|part| !part.is_empty())
            .collect();
        Ok(parts.join("/"))
    }

    /// Query string without the leading `?`.
    ///
    /// Multi-valued parameters use the `name[]=value` form.
    #[must_use]
    pub fn render_query(&self) -> String {
        let mut pairs = Vec::new();
        for (name, values) in &self.query {
            let name = urlencoding::encode(name);
            let suffix = if values.len() > 1 { "[]" } else { "" };
            for value in values {
                pairs.push(format!("{name}{suffix}={}", urlencoding::encode(value)));
            }
        }
        pairs.join("&")
    }

    /// Full request URI: endpoint, path and query string.
    ///
    /// # Errors
    /// See [`RequestBuilder::validate_path`].
    pub fn render_uri(&self) -> Result<String, RouteError> {
        let path = self.render_path()?;
        let base = self.options.endpoint.trim_end_matches('/');
        let query = self.render_query();
        let mut uri = format!("{base}/{path}");
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(&query);
        }
        Ok(uri)
    }

    /// Ensure `method` is allowed for the path built so far.
    ///
    /// # Errors
    /// Returns [`RouteError::UnsupportedMethod`] otherwise.
    pub fn check_method(&self, method: HttpMethod) -> Result<(), RouteError> {
        if self.supported_methods.contains(method) {
            Ok(())
        } else {
            Err(RouteError::UnsupportedMethod {
                method,
                supported: self.supported_methods.clone(),
            })
        }
    }
}
