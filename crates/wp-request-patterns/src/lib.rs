//! Route-grammar primitives for `wp-request`.
//!
//! The crate understands the path templates WordPress uses when registering
//! REST routes: literal segments mixed with named, regex-constrained capture
//! groups such as `(?P<id>[\d]+)`. It exposes the named-group extractor, the
//! path splitter, segment classification, value validators, alias casing and
//! HTTP method handling reused by the tree builder in `wp-request`.

mod casing;
mod errors;
mod method;
mod named_group;
mod segment;
mod split;
mod validator;

pub use casing::camel_case;
pub use errors::{HttpMethodParseError, PatternError};
pub use method::{HttpMethod, MethodSet};
pub use named_group::{NamedGroup, extract_named_group};
pub use segment::{MergeKey, Segment};
pub use split::split_path;
pub use validator::Validator;
