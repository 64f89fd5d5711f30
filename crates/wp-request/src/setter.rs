//! Path-part setters derived from route tree nodes.
//!
//! A setter is plain data describing which path slot it fills; builders look
//! setters up by name and apply them, so no per-resource types are generated.

use crate::error::RouteError;
use crate::request::RequestBuilder;
use crate::tree::LevelNode;
use wp_request_patterns::MethodSet;

/// Second slot filled when a collection setter receives a value.
///
/// Only attached when the collection node has exactly one dynamic child, so
/// the value has an unambiguous destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPromotion {
    /// Level of the dynamic child.
    pub level: usize,
    /// Methods allowed when the route ends at the child.
    pub methods: Option<MethodSet>,
}

/// Setter for one path slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPartSetter {
    /// Stores a caller-supplied value, e.g. a post ID.
    Dynamic {
        /// Level of the slot.
        level: usize,
        /// Methods allowed when the route ends here.
        methods: Option<MethodSet>,
    },
    /// Stores the node's literal text, e.g. `revisions`.
    Static {
        /// Level of the slot.
        level: usize,
        /// Canonical literal stored in the slot.
        component: String,
        /// Methods allowed when the route ends here.
        methods: Option<MethodSet>,
        /// Where a supplied value goes, if anywhere.
        promotion: Option<ChildPromotion>,
    },
}

impl PathPartSetter {
    /// Derive the setter for `node`.
    ///
    /// With `child_promotion` disabled, static setters ignore any value they
    /// are given.
    #[must_use]
    pub fn for_node(node: &LevelNode, child_promotion: bool) -> Self {
        let methods = node.methods().cloned();
        if node.is_dynamic() {
            return Self::Dynamic {
                level: node.level(),
                methods,
            };
        }
        let promotion = if child_promotion {
            single_dynamic_child(node).map(|child| ChildPromotion {
                level: child.level(),
                methods: child.methods().cloned(),
            })
        } else {
            None
        };
        Self::Static {
            level: node.level(),
            component: node
                .names()
                .first()
                .map_or_else(|| node.component().to_owned(), Clone::clone),
            methods,
            promotion,
        }
    }

    /// Level of the slot this setter fills.
    #[must_use]
    pub const fn level(&self) -> usize {
        match self {
            Self::Dynamic { level, .. } | Self::Static { level, .. } => *level,
        }
    }

    /// Whether a value passed to this setter lands in a child slot.
    #[must_use]
    pub const fn promotes_child(&self) -> bool {
        matches!(self, Self::Static { promotion: Some(_), .. })
    }

    /// Apply the setter to `request`.
    ///
    /// # Errors
    /// Returns [`RouteError::MissingValue`] when a dynamic setter gets no
    /// value and [`RouteError::PathPartOccupied`] when a slot is already set.
    pub(crate) fn apply(
        &self,
        name: &str,
        request: &mut RequestBuilder,
        value: Option<String>,
    ) -> Result<(), RouteError> {
        match self {
            Self::Dynamic { level, methods } => {
                let value = value.ok_or_else(|| RouteError::MissingValue(name.to_owned()))?;
                request.set_path_part(*level, value)?;
                narrow_methods(request, methods.as_ref());
            }
            Self::Static {
                level,
                component,
                methods,
                promotion,
            } => {
                // Both slots must be free before either is written.
                let occupied_child = promotion
                    .as_ref()
                    .filter(|_| value.is_some())
                    .and_then(|child| Some((child.level, request.path_part(child.level)?)));
                if let Some((level, existing)) = occupied_child {
                    return Err(RouteError::PathPartOccupied {
                        level,
                        existing: existing.to_owned(),
                    });
                }
                request.set_path_part(*level, component.clone())?;
                narrow_methods(request, methods.as_ref());
                if let (Some(value), Some(child)) = (value, promotion) {
                    request.set_path_part(child.level, value)?;
                    narrow_methods(request, child.methods.as_ref());
                }
            }
        }
        Ok(())
    }
}

fn single_dynamic_child(node: &LevelNode) -> Option<&LevelNode> {
    let mut dynamic = node.dynamic_children();
    let first = dynamic.next()?;
    dynamic.next().is_none().then_some(first)
}

fn narrow_methods(request: &mut RequestBuilder, methods: Option<&MethodSet>) {
    if let Some(methods) = methods {
        request.replace_supported_methods(methods.clone());
    }
}
