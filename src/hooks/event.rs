//! Hook events.
//!
//! The resolver does not call hooks itself. It emits an ordered list of
//! [`HookEvent`]s that the dispatcher walks afterwards.

use serde::{Deserialize, Serialize};

use crate::core::ParticipantSide;

use super::payload::CombatHookPayload;

/// Checkpoint at which hooks fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatEvent {
    /// The strike connected.
    OnHit,
    /// The defender ended the exchange at zero health.
    OnKill,
}

impl CombatEvent {
    /// Name passed to the global modifier trigger.
    #[must_use]
    pub const fn trigger_name(self) -> &'static str {
        match self {
            Self::OnHit => "combat:onHit",
            Self::OnKill => "combat:onKill",
        }
    }
}

impl std::fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.trigger_name())
    }
}

/// One hook checkpoint: whose hooks run, for which event, with what payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HookEvent {
    /// Participant whose hooks fire.
    pub side: ParticipantSide,
    /// Which checkpoint.
    pub event: CombatEvent,
    /// Snapshot handed to the hooks and the global trigger.
    pub payload: CombatHookPayload,
}

impl HookEvent {
    /// Create a hook event.
    pub fn new(side: ParticipantSide, event: CombatEvent, payload: CombatHookPayload) -> Self {
        Self { side, event, payload }
    }
}

/// Build the checkpoints for one exchange in dispatch order:
///
/// 1. hit: defender `onHit`
/// 2. hit with attacker: attacker `onHit`
/// 3. lethal with attacker: attacker `onKill`
/// 4. lethal: defender `onKill`
pub fn plan_events(
    hit: bool,
    lethal: bool,
    defender_payload: &CombatHookPayload,
    attacker_payload: Option<&CombatHookPayload>,
) -> Vec<HookEvent> {
    let mut events = Vec::with_capacity(4);

    if hit {
        events.push(HookEvent::new(ParticipantSide::Defender, CombatEvent::OnHit, defender_payload.clone()));
        if let Some(payload) = attacker_payload {
            events.push(HookEvent::new(ParticipantSide::Attacker, CombatEvent::OnHit, payload.clone()));
        }
    }

    if lethal {
        if let Some(payload) = attacker_payload {
            events.push(HookEvent::new(ParticipantSide::Attacker, CombatEvent::OnKill, payload.clone()));
        }
        events.push(HookEvent::new(ParticipantSide::Defender, CombatEvent::OnKill, defender_payload.clone()));
    }

    events
}
