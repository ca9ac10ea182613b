//! Hook system for combat side effects.
//!
//! Hooks let units and global modifiers react to an exchange without
//! touching its numbers. The resolver emits an ordered list of
//! [`HookEvent`]s; the [`HookDispatcher`] runs them.
//!
//! ## Key Components
//!
//! - [`CombatEvent`]: `onHit` / `onKill` checkpoints
//! - [`CombatHookPayload`]: Snapshot of both sides and the damage split
//! - [`HookBinding`]: A participant's hooks, grouped by checkpoint
//! - [`ModifierTrigger`]: The global trigger called once per checkpoint
//! - [`HookDispatcher`]: Ordered dispatch with a failure policy
//!
//! ## Dispatch Order
//!
//! 1. hit: defender hooks, then `combat:onHit` (defender payload)
//! 2. hit with attacker: attacker hooks, then `combat:onHit` (attacker payload)
//! 3. lethal with attacker: attacker hooks, then `combat:onKill` (attacker payload)
//! 4. lethal: defender hooks, then `combat:onKill` (defender payload)

mod binding;
mod dispatcher;
mod event;
mod payload;

pub use binding::{HookBinding, HookFn};
pub use dispatcher::{DispatchReport, HookDispatcher, ModifierTrigger, NoopTrigger, RecordingTrigger};
pub use event::{plan_events, CombatEvent, HookEvent};
pub use payload::{CombatHookPayload, ParticipantSnapshot};
