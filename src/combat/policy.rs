//! Active policy modifiers.
//!
//! A policy summary is computed by the host from whichever policies the
//! player has unlocked. The resolver treats it as an immutable snapshot
//! and applies it to player-faction participants only.

use serde::{Deserialize, Serialize};

use crate::core::sanitize;
use crate::participant::CombatParticipant;

/// Summary of active policy effects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyModifiers {
    /// Added to a player attacker's hit chance.
    pub hit_chance_bonus: f64,
    /// Multiplies damage a player defender receives.
    pub damage_taken_multiplier: f64,
    /// Multiplies damage a player attacker deals.
    pub damage_dealt_multiplier: f64,
    /// Economy-side multiplier carried in the same summary. Not used in combat.
    pub upkeep_multiplier: f64,
}

impl Default for PolicyModifiers {
    fn default() -> Self {
        Self::neutral()
    }
}

impl PolicyModifiers {
    /// No policy effects.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            hit_chance_bonus: 0.0,
            damage_taken_multiplier: 1.0,
            damage_dealt_multiplier: 1.0,
            upkeep_multiplier: 1.0,
        }
    }

    /// Set hit-chance bonus (builder pattern).
    #[must_use]
    pub fn with_hit_chance_bonus(mut self, bonus: f64) -> Self {
        self.hit_chance_bonus = bonus;
        self
    }

    /// Set damage-taken multiplier (builder pattern).
    #[must_use]
    pub fn with_damage_taken_multiplier(mut self, multiplier: f64) -> Self {
        self.damage_taken_multiplier = multiplier;
        self
    }

    /// Set damage-dealt multiplier (builder pattern).
    #[must_use]
    pub fn with_damage_dealt_multiplier(mut self, multiplier: f64) -> Self {
        self.damage_dealt_multiplier = multiplier;
        self
    }

    /// Damage-dealt multiplier for `unit`: the policy value for players, `1.0` otherwise.
    #[must_use]
    pub fn damage_dealt_for(&self, unit: &CombatParticipant) -> f64 {
        if unit.is_player() {
            sanitize::multiplier(Some(self.damage_dealt_multiplier))
        } else {
            1.0
        }
    }

    /// Damage-taken multiplier for `unit`: the policy value for players, `1.0` otherwise.
    #[must_use]
    pub fn damage_taken_for(&self, unit: &CombatParticipant) -> f64 {
        if unit.is_player() {
            sanitize::multiplier(Some(self.damage_taken_multiplier))
        } else {
            1.0
        }
    }

    /// Hit-chance bonus for `unit`: the policy value for players, `0.0` otherwise.
    #[must_use]
    pub fn hit_chance_bonus_for(&self, unit: &CombatParticipant) -> f64 {
        if unit.is_player() {
            sanitize::bonus(Some(self.hit_chance_bonus))
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Faction, UnitId};

    fn policy() -> PolicyModifiers {
        PolicyModifiers::neutral()
            .with_hit_chance_bonus(0.1)
            .with_damage_taken_multiplier(0.5)
            .with_damage_dealt_multiplier(2.0)
    }

    #[test]
    fn test_player_gets_policy() {
        let player = CombatParticipant::new(UnitId::new(1), 10.0).with_faction(Faction::Player);
        let p = policy();

        assert_eq!(p.damage_dealt_for(&player), 2.0);
        assert_eq!(p.damage_taken_for(&player), 0.5);
        assert_eq!(p.hit_chance_bonus_for(&player), 0.1);
    }

    #[test]
    fn test_non_player_unaffected() {
        let p = policy();
        for faction in [Some(Faction::Enemy), Some(Faction::Neutral), None] {
            let mut unit = CombatParticipant::new(UnitId::new(2), 10.0);
            unit.faction = faction;

            assert_eq!(p.damage_dealt_for(&unit), 1.0);
            assert_eq!(p.damage_taken_for(&unit), 1.0);
            assert_eq!(p.hit_chance_bonus_for(&unit), 0.0);
        }
    }

    #[test]
    fn test_malformed_policy_is_neutral() {
        let player = CombatParticipant::new(UnitId::new(1), 10.0).with_faction(Faction::Player);
        let p = PolicyModifiers::neutral()
            .with_damage_dealt_multiplier(f64::NAN)
            .with_hit_chance_bonus(f64::INFINITY);

        assert_eq!(p.damage_dealt_for(&player), 1.0);
        assert_eq!(p.hit_chance_bonus_for(&player), 0.0);
    }

    #[test]
    fn test_partial_json() {
        let p: PolicyModifiers = serde_json::from_str(r#"{ "damage_dealt_multiplier": 1.5 }"#).unwrap();
        assert_eq!(p.damage_dealt_multiplier, 1.5);
        assert_eq!(p.damage_taken_multiplier, 1.0);
        assert_eq!(p.hit_chance_bonus, 0.0);
    }
}
