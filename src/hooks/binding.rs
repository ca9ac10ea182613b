//! Participant hook bindings.

use std::sync::Arc;

use crate::error::HookError;

use super::event::CombatEvent;
use super::payload::CombatHookPayload;

type HookCallback = dyn Fn(&CombatHookPayload) -> Result<(), HookError> + Send + Sync;

/// A named participant hook.
#[derive(Clone)]
pub struct HookFn {
    name: String,
    callback: Arc<HookCallback>,
}

impl HookFn {
    /// Wrap a fallible callback.
    pub fn new(
        name: impl Into<String>,
        callback: impl Fn(&CombatHookPayload) -> Result<(), HookError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            callback: Arc::new(callback),
        }
    }

    /// Wrap a callback that cannot fail.
    pub fn infallible(
        name: impl Into<String>,
        callback: impl Fn(&CombatHookPayload) + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |payload| {
            callback(payload);
            Ok(())
        })
    }

    /// Hook name, used in logs and error reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the hook.
    pub fn call(&self, payload: &CombatHookPayload) -> Result<(), HookError> {
        (self.callback)(payload)
    }
}

impl std::fmt::Debug for HookFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookFn").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Hooks attached to a participant, grouped by checkpoint.
///
/// A single function and a list of functions are the same thing here:
/// each checkpoint holds a list, run in insertion order.
#[derive(Clone, Debug, Default)]
pub struct HookBinding {
    /// Run when the strike connects.
    pub on_hit: Vec<HookFn>,
    /// Run when the defender dies.
    pub on_kill: Vec<HookFn>,
}

impl HookBinding {
    /// Create an empty binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `onHit` hook (builder pattern).
    #[must_use]
    pub fn on_hit(mut self, hook: HookFn) -> Self {
        self.on_hit.push(hook);
        self
    }

    /// Add an `onKill` hook (builder pattern).
    #[must_use]
    pub fn on_kill(mut self, hook: HookFn) -> Self {
        self.on_kill.push(hook);
        self
    }

    /// Hooks registered for `event`.
    #[must_use]
    pub fn hooks_for(&self, event: CombatEvent) -> &[HookFn] {
        match event {
            CombatEvent::OnHit => &self.on_hit,
            CombatEvent::OnKill => &self.on_kill,
        }
    }

    /// No hooks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on_hit.is_empty() && self.on_kill.is_empty()
    }
}
