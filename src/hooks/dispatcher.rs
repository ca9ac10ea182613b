//! Hook dispatch.
//!
//! For each [`HookEvent`], the dispatcher runs the participant's hooks for
//! that checkpoint, then calls the global modifier trigger once. What
//! happens on failure is decided by [`HookErrorPolicy`].

use tracing::{trace, warn};

use crate::core::{HookErrorPolicy, ParticipantSide};
use crate::error::HookError;

use super::binding::HookBinding;
use super::event::{CombatEvent, HookEvent};
use super::payload::CombatHookPayload;

/// Global, cross-cutting modifier trigger.
///
/// Called once per checkpoint after the participant's own hooks. The
/// return value is only inspected for failure.
pub trait ModifierTrigger {
    /// Fire `event` with `payload`.
    fn trigger(&mut self, event: CombatEvent, payload: &CombatHookPayload) -> Result<(), HookError>;
}

impl<F> ModifierTrigger for F
where
    F: FnMut(CombatEvent, &CombatHookPayload) -> Result<(), HookError>,
{
    fn trigger(&mut self, event: CombatEvent, payload: &CombatHookPayload) -> Result<(), HookError> {
        self(event, payload)
    }
}

/// Trigger that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTrigger;

impl ModifierTrigger for NoopTrigger {
    fn trigger(&mut self, _event: CombatEvent, _payload: &CombatHookPayload) -> Result<(), HookError> {
        Ok(())
    }
}

/// Trigger that records every call, for inspection and replay logs.
#[derive(Clone, Debug, Default)]
pub struct RecordingTrigger {
    calls: Vec<(&'static str, CombatHookPayload)>,
}

impl RecordingTrigger {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(event name, payload)` pairs, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[(&'static str, CombatHookPayload)] {
        &self.calls
    }

    /// Recorded event names, oldest first.
    #[must_use]
    pub fn event_names(&self) -> Vec<&'static str> {
        self.calls.iter().map(|(name, _)| *name).collect()
    }

    /// Forget all recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ModifierTrigger for RecordingTrigger {
    fn trigger(&mut self, event: CombatEvent, payload: &CombatHookPayload) -> Result<(), HookError> {
        self.calls.push((event.trigger_name(), payload.clone()));
        Ok(())
    }
}

/// Summary of one dispatch pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DispatchReport {
    /// Participant hooks that ran (including failed ones).
    pub hooks_run: usize,
    /// Global trigger calls made (including failed ones).
    pub triggers_fired: usize,
    /// Failures swallowed under [`HookErrorPolicy::Isolate`].
    pub failures: Vec<HookError>,
}

/// Walks hook events in order.
#[derive(Clone, Copy, Debug, Default)]
pub struct HookDispatcher {
    policy: HookErrorPolicy,
}

impl HookDispatcher {
    /// Create a dispatcher with the given failure policy.
    pub fn new(policy: HookErrorPolicy) -> Self {
        Self { policy }
    }

    /// Failure policy in use.
    #[must_use]
    pub fn policy(&self) -> HookErrorPolicy {
        self.policy
    }

    /// Dispatch `events` in order.
    ///
    /// `attacker` and `defender` are the hook bindings of each side, run in
    /// slice order. Under [`HookErrorPolicy::Propagate`] the first failure
    /// is returned and nothing after it runs.
    pub fn dispatch(
        &self,
        events: &[HookEvent],
        attacker: &[&HookBinding],
        defender: &[&HookBinding],
        trigger: &mut dyn ModifierTrigger,
    ) -> Result<DispatchReport, HookError> {
        let mut report = DispatchReport::default();

        for event in events {
            let bindings = match event.side {
                ParticipantSide::Attacker => attacker,
                ParticipantSide::Defender => defender,
            };

            for hook in bindings.iter().flat_map(|b| b.hooks_for(event.event)) {
                trace!(side = %event.side, event = %event.event, hook = hook.name(), "participant hook");
                report.hooks_run += 1;
                let result = hook.call(&event.payload);
                self.handle(result, &mut report)?;
            }

            trace!(event = %event.event, "global trigger");
            report.triggers_fired += 1;
            let result = trigger.trigger(event.event, &event.payload);
            self.handle(result, &mut report)?;
        }

        Ok(report)
    }

    fn handle(&self, result: Result<(), HookError>, report: &mut DispatchReport) -> Result<(), HookError> {
        match (result, self.policy) {
            (Ok(()), _) => Ok(()),
            (Err(err), HookErrorPolicy::Propagate) => Err(err),
            (Err(err), HookErrorPolicy::Isolate) => {
                warn!(error = %err, "hook failed; continuing dispatch");
                report.failures.push(err);
                Ok(())
            }
        }
    }
}
