//! Scratch combat state and per-side telemetry.

use serde::{Deserialize, Serialize};

use crate::core::sanitize;

/// Health and shield of one side while an exchange is being resolved.
///
/// Built fresh for every exchange; `max_health >= health` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordCombatantState {
    /// Current health.
    pub health: f64,
    /// Health ceiling for healing.
    pub max_health: f64,
    /// Current shield, base plus any keyword grant.
    pub shield: f64,
}

impl KeywordCombatantState {
    /// Build a sanitized state. A missing max health defaults to `health`
    /// and is never allowed below it.
    pub fn new(health: f64, max_health: Option<f64>, shield: f64) -> Self {
        let health = sanitize::non_negative(health);
        let max_health = max_health.map_or(health, sanitize::non_negative).max(health);
        Self {
            health,
            max_health,
            shield: sanitize::non_negative(shield),
        }
    }

    /// A zeroed state, used as the opponent when there is no attacker.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Health above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Health that healing can still restore.
    #[must_use]
    pub fn missing_health(&self) -> f64 {
        (self.max_health - self.health).max(0.0)
    }

    /// Apply tick damage, shield first. Each part is clamped to what is
    /// left, and the amounts actually removed are returned.
    pub fn apply_tick(&mut self, outcome: TickOutcome) -> TickOutcome {
        let shield_damage = self.shield.min(sanitize::non_negative(outcome.shield_damage));
        self.shield -= shield_damage;
        let hp_damage = self.health.min(sanitize::non_negative(outcome.hp_damage));
        self.health -= hp_damage;
        TickOutcome {
            shield_damage,
            hp_damage,
        }
    }

    /// Heal up to the missing health, returning the amount applied.
    pub fn heal(&mut self, amount: f64) -> f64 {
        let applied = sanitize::non_negative(amount).min(self.missing_health());
        self.health += applied;
        applied
    }
}

/// Damage produced by a keyword tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Damage aimed at shield.
    pub shield_damage: f64,
    /// Damage aimed at health.
    pub hp_damage: f64,
}

impl TickOutcome {
    /// Health-only damage.
    pub fn health(hp_damage: f64) -> Self {
        Self {
            shield_damage: 0.0,
            hp_damage,
        }
    }

    /// Accumulate another outcome.
    pub fn add(&mut self, other: TickOutcome) {
        self.shield_damage += other.shield_damage;
        self.hp_damage += other.hp_damage;
    }
}

/// What the keyword engine did to one side during a single exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordEffectDetails {
    /// Health lost to pre-strike ticks.
    pub tick_hp_damage: f64,
    /// Shield lost to pre-strike ticks.
    pub tick_shield_damage: f64,
    /// Shield added by keyword grants.
    pub shield_granted: f64,
    /// Strike damage absorbed by keyword shield.
    pub shield_consumed: f64,
    /// Health restored by lifesteal.
    pub lifesteal: f64,
    /// Keyword shield left after the strike.
    pub keyword_shield_remaining: f64,
}
