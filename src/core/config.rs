//! Resolver configuration.
//!
//! Hosts configure the resolver once and reuse it for every exchange:
//! - `HookErrorPolicy`: what happens when a hook or trigger fails
//! - `ResolverConfig`: defaults applied when a strike leaves them unset
//!
//! Both are deserializable so they can live in the host's config files.

use serde::{Deserialize, Serialize};

/// How the dispatcher reacts to a failing hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookErrorPolicy {
    /// Stop at the first failure and return it. Hooks and triggers after
    /// the failing one do not run.
    #[default]
    Propagate,
    /// Log the failure, count it, and keep dispatching.
    Isolate,
}

/// Configuration for a [`CombatResolver`](crate::combat::CombatResolver).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum damage for a strike that does not set its own.
    pub default_minimum_damage: f64,

    /// Failure handling for hooks and global triggers.
    pub hook_error_policy: HookErrorPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_minimum_damage: 1.0,
            hook_error_policy: HookErrorPolicy::Propagate,
        }
    }
}

impl ResolverConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default minimum damage.
    #[must_use]
    pub fn with_minimum_damage(mut self, minimum: f64) -> Self {
        self.default_minimum_damage = minimum;
        self
    }

    /// Set the hook failure policy.
    #[must_use]
    pub fn with_hook_error_policy(mut self, policy: HookErrorPolicy) -> Self {
        self.hook_error_policy = policy;
        self
    }
}
