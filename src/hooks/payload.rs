//! Hook payloads: immutable snapshots of an exchange.

use serde::{Deserialize, Serialize};

use crate::core::{Faction, ParticipantSide, UnitId};

/// One participant as it stands after the exchange.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSnapshot {
    /// Unit identity.
    pub id: UnitId,
    /// Allegiance, if any.
    pub faction: Option<Faction>,
    /// Health after the exchange.
    pub health: f64,
    /// Health ceiling.
    pub max_health: f64,
    /// Shield after the exchange, base plus keyword.
    pub shield: f64,
}

/// Data handed to participant hooks and the global trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatHookPayload {
    /// Whose hooks are receiving this payload.
    pub perspective: ParticipantSide,
    /// Attacker snapshot, absent for environmental damage.
    pub attacker: Option<ParticipantSnapshot>,
    /// Defender snapshot.
    pub defender: ParticipantSnapshot,
    /// Total strike damage.
    pub damage: f64,
    /// Strike damage absorbed by shields.
    pub shield_damage: f64,
    /// Strike damage that reached health.
    pub hp_damage: f64,
    /// Whether the strike connected.
    pub hit: bool,
    /// Whether the defender ended at zero health.
    pub lethal: bool,
}

impl CombatHookPayload {
    /// Snapshot of the participant this payload is addressed to.
    #[must_use]
    pub fn subject(&self) -> Option<&ParticipantSnapshot> {
        match self.perspective {
            ParticipantSide::Attacker => self.attacker.as_ref(),
            ParticipantSide::Defender => Some(&self.defender),
        }
    }

    /// Snapshot of the other participant.
    #[must_use]
    pub fn other(&self) -> Option<&ParticipantSnapshot> {
        match self.perspective {
            ParticipantSide::Attacker => Some(&self.defender),
            ParticipantSide::Defender => self.attacker.as_ref(),
        }
    }

    /// Same payload addressed to `side`.
    #[must_use]
    pub fn for_side(&self, side: ParticipantSide) -> Self {
        Self {
            perspective: side,
            ..self.clone()
        }
    }
}
