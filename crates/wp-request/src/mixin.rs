//! Query-parameter mixins attached to builders by supported argument.
//!
//! A resource whose `GET` endpoints accept, say, `per_page` gains a `perPage`
//! method when the registry holds a mixin for `per_page`. The registry only
//! decides which methods exist; each mixin decides what it does to the query.

use crate::error::RouteError;
use hashbrown::HashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use wp_request_patterns::camel_case;

/// Query parameters accumulated on a builder, keyed by parameter name.
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// Behaviour attached to a builder for one query argument.
pub trait QueryMixin: fmt::Debug + Send + Sync {
    /// Apply the mixin to `query`, optionally with a value.
    ///
    /// # Errors
    /// Implementations return [`RouteError`] when the value is unusable.
    fn apply(&self, query: &mut QueryParams, value: Option<String>) -> Result<(), RouteError>;
}

/// How a [`ParamSetter`] stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    /// Each call replaces the previous value.
    Replace,
    /// Each call adds a value, for list arguments such as `include`.
    Append,
}

/// Mixin storing its value under a fixed parameter name.
///
/// Calling it without a value removes the parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSetter {
    param: String,
    mode: ParamMode,
}

impl ParamSetter {
    /// Setter replacing `param` on every call.
    #[must_use]
    pub fn replace(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            mode: ParamMode::Replace,
        }
    }

    /// Setter appending to `param` on every call.
    #[must_use]
    pub fn append(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            mode: ParamMode::Append,
        }
    }
}

impl QueryMixin for ParamSetter {
    fn apply(&self, query: &mut QueryParams, value: Option<String>) -> Result<(), RouteError> {
        let Some(value) = value else {
            query.remove(&self.param);
            return Ok(());
        };
        let values = query.entry(self.param.clone()).or_default();
        if self.mode == ParamMode::Replace {
            values.clear();
        }
        values.push(value);
        Ok(())
    }
}

/// A registered mixin together with the method name it is exposed under.
#[derive(Debug, Clone)]
pub struct MixinEntry {
    method: String,
    mixin: Arc<dyn QueryMixin>,
}

impl MixinEntry {
    /// Pair `mixin` with `method`.
    pub fn new(method: impl Into<String>, mixin: impl QueryMixin + 'static) -> Self {
        Self {
            method: method.into(),
            mixin: Arc::new(mixin),
        }
    }

    /// Builder method name, e.g. `perPage`.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The mixin itself.
    #[must_use]
    pub fn mixin(&self) -> &dyn QueryMixin {
        self.mixin.as_ref()
    }
}

const REPLACED_PARAMS: &[&str] = &[
    "page", "per_page", "offset", "search", "slug", "status", "order", "orderby", "parent",
    "context", "before", "after", "author",
];
const APPENDED_PARAMS: &[&str] = &["include", "exclude", "categories", "tags"];

/// Mixins keyed by the query argument that enables them.
#[derive(Debug, Clone, Default)]
pub struct MixinRegistry {
    entries: HashMap<String, MixinEntry>,
}

impl MixinRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with parameter setters for the common WordPress collection
    /// arguments.
    ///
    /// # Examples
    /// ```
    /// use wp_request::MixinRegistry;
    /// let mixins = MixinRegistry::wordpress_defaults();
    /// assert_eq!(mixins.get("per_page").map(|entry| entry.method()), Some("perPage"));
    /// ```
    #[must_use]
    pub fn wordpress_defaults() -> Self {
        let mut registry = Self::new();
        for param in REPLACED_PARAMS {
            registry.register(*param, ParamSetter::replace(*param));
        }
        for param in APPENDED_PARAMS {
            registry.register(*param, ParamSetter::append(*param));
        }
        registry
    }

    /// Register `mixin` for `arg`, exposed under the camel-cased argument name.
    pub fn register(&mut self, arg: impl Into<String>, mixin: impl QueryMixin + 'static) {
        let arg = arg.into();
        let method = camel_case(&arg);
        self.entries.insert(arg, MixinEntry::new(method, mixin));
    }

    /// Register `mixin` for `arg` under an explicit method name.
    pub fn register_as(
        &mut self,
        arg: impl Into<String>,
        method: impl Into<String>,
        mixin: impl QueryMixin + 'static,
    ) {
        self.entries.insert(arg.into(), MixinEntry::new(method, mixin));
    }

    /// Mixin enabled by `arg`.
    #[must_use]
    pub fn get(&self, arg: &str) -> Option<&MixinEntry> {
        self.entries.get(arg)
    }

    /// Number of registered arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
