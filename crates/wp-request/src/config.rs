//! Runtime configuration for route compilation.
//!
//! Each process-wide flag is resolved from an in-process override, then an
//! environment variable, then a default:
//!
//! - `child_promotion` (`WP_REQUEST_CHILD_PROMOTION`, default `true`) lets a
//!   collection setter also fill its single dynamic child, so
//!   `revisions(9)` selects both `revisions` and revision `9`.
//! - `fail_on_alias_conflict` (`WP_REQUEST_FAIL_ON_ALIAS_CONFLICT`, default
//!   `false`) turns setter alias conflicts into bootstrap errors instead of
//!   warnings.
//! - `strict_patterns` (`WP_REQUEST_STRICT_PATTERNS`, default `false`) turns
//!   named-group patterns the `regex` crate rejects into bootstrap errors
//!   instead of warnings and accept-anything validators.

use std::sync::atomic::{AtomicU8, Ordering};

const OVERRIDE_UNSET: u8 = 0;
const OVERRIDE_FALSE: u8 = 1;
const OVERRIDE_TRUE: u8 = 2;

const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];
const FALSY: [&str; 4] = ["0", "false", "no", "off"];

/// A boolean setting with an environment variable and an in-process override.
struct Flag {
    env: &'static str,
    default: bool,
    state: AtomicU8,
}

impl Flag {
    const fn new(env: &'static str, default: bool) -> Self {
        Self {
            env,
            default,
            state: AtomicU8::new(OVERRIDE_UNSET),
        }
    }

    fn get(&self) -> bool {
        let overridden = match self.state.load(Ordering::Relaxed) {
            OVERRIDE_FALSE => Some(false),
            OVERRIDE_TRUE => Some(true),
            _ => None,
        };
        overridden
            .or_else(|| std::env::var(self.env).ok().as_deref().and_then(parse_env_bool))
            .unwrap_or(self.default)
    }

    fn set(&self, enabled: bool) {
        let state = if enabled { OVERRIDE_TRUE } else { OVERRIDE_FALSE };
        self.state.store(state, Ordering::Relaxed);
    }

    fn clear(&self) {
        self.state.store(OVERRIDE_UNSET, Ordering::Relaxed);
    }
}

static CHILD_PROMOTION: Flag = Flag::new("WP_REQUEST_CHILD_PROMOTION", true);
static FAIL_ON_ALIAS_CONFLICT: Flag = Flag::new("WP_REQUEST_FAIL_ON_ALIAS_CONFLICT", false);
static STRICT_PATTERNS: Flag = Flag::new("WP_REQUEST_STRICT_PATTERNS", false);

/// Case-insensitive; unknown text yields `None` so the default applies.
fn parse_env_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    let listed = |words: &[&str]| words.iter().any(|word| value.eq_ignore_ascii_case(word));
    if listed(&TRUTHY) {
        Some(true)
    } else if listed(&FALSY) {
        Some(false)
    } else {
        None
    }
}

/// Determine whether collection setters promote their value to a single dynamic child.
#[must_use]
pub fn child_promotion() -> bool {
    CHILD_PROMOTION.get()
}

/// Override the `child_promotion` flag for the current process.
pub fn set_child_promotion(enabled: bool) {
    CHILD_PROMOTION.set(enabled);
}

/// Remove any in-process override for the `child_promotion` flag.
pub fn clear_child_promotion_override() {
    CHILD_PROMOTION.clear();
}

/// Determine whether setter alias conflicts should fail bootstrap.
#[must_use]
pub fn fail_on_alias_conflict() -> bool {
    FAIL_ON_ALIAS_CONFLICT.get()
}

/// Override the `fail_on_alias_conflict` flag for the current process.
///
/// Tests may call [`clear_fail_on_alias_conflict_override`] to restore
/// environment driven behaviour after toggling the override.
pub fn set_fail_on_alias_conflict(enabled: bool) {
    FAIL_ON_ALIAS_CONFLICT.set(enabled);
}

/// Remove any in-process override for the `fail_on_alias_conflict` flag.
pub fn clear_fail_on_alias_conflict_override() {
    FAIL_ON_ALIAS_CONFLICT.clear();
}

/// Determine whether uncompilable group patterns should fail bootstrap.
#[must_use]
pub fn strict_patterns() -> bool {
    STRICT_PATTERNS.get()
}

/// Override the `strict_patterns` flag for the current process.
pub fn set_strict_patterns(enabled: bool) {
    STRICT_PATTERNS.set(enabled);
}

/// Remove any in-process override for the `strict_patterns` flag.
pub fn clear_strict_patterns_override() {
    STRICT_PATTERNS.clear();
}

/// Options governing one build of routes into endpoint factories.
///
/// Builds never read global state themselves; callers either construct the
/// options explicitly or snapshot the process configuration with
/// [`BuildOptions::from_env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Let collection setters fill their single dynamic child.
    pub child_promotion: bool,
    /// Fail bootstrap when setter aliases collide.
    pub fail_on_alias_conflict: bool,
    /// Fail bootstrap when a named group's pattern does not compile.
    pub strict_patterns: bool,
}

impl BuildOptions {
    /// Snapshot the process-wide configuration.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            child_promotion: child_promotion(),
            fail_on_alias_conflict: fail_on_alias_conflict(),
            strict_patterns: strict_patterns(),
        }
    }

    /// Return a copy with child promotion switched on or off.
    #[must_use]
    pub const fn with_child_promotion(mut self, enabled: bool) -> Self {
        self.child_promotion = enabled;
        self
    }

    /// Return a copy with strict alias conflict handling switched on or off.
    #[must_use]
    pub const fn with_fail_on_alias_conflict(mut self, enabled: bool) -> Self {
        self.fail_on_alias_conflict = enabled;
        self
    }

    /// Return a copy with strict pattern compilation switched on or off.
    #[must_use]
    pub const fn with_strict_patterns(mut self, enabled: bool) -> Self {
        self.strict_patterns = enabled;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            child_promotion: true,
            fail_on_alias_conflict: false,
            strict_patterns: false,
        }
    }
}
