//! Resolution output.

use serde::{Deserialize, Serialize};

use crate::keywords::KeywordEffectDetails;

/// Keyword telemetry for both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordEffects {
    /// Attacker-side keyword activity.
    pub attacker: KeywordEffectDetails,
    /// Defender-side keyword activity.
    pub defender: KeywordEffectDetails,
}

/// Fully specified outcome of one exchange.
///
/// Participants are never modified by the resolver (apart from keyword
/// stacks); hosts apply these numbers to their own unit records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatResolution {
    /// Strike damage before the shield/health split.
    pub damage: f64,
    /// Strike damage absorbed by shields.
    pub shield_damage: f64,
    /// Strike damage aimed at health.
    pub hp_damage: f64,
    /// Defender ended at zero health (ticks included).
    pub lethal: bool,
    /// Defender health after ticks and strike.
    pub remaining_health: f64,
    /// Defender shield after the strike: base plus keyword.
    pub remaining_shield: f64,
    /// Health the attacker regained.
    pub attacker_healing: f64,
    /// Attacker health after ticks and healing.
    pub attacker_remaining_health: Option<f64>,
    /// Attacker shield after ticks: base plus keyword, like `remaining_shield`.
    pub attacker_remaining_shield: Option<f64>,
    /// Whether the strike connected.
    pub hit: bool,
    /// Per-side keyword telemetry.
    pub keyword_effects: KeywordEffects,
}

impl CombatResolution {
    /// The strike missed.
    #[must_use]
    pub fn is_miss(&self) -> bool {
        !self.hit
    }

    /// Damage the defender's own keywords dealt before the strike.
    #[must_use]
    pub fn defender_tick_damage(&self) -> f64 {
        self.keyword_effects.defender.tick_hp_damage + self.keyword_effects.defender.tick_shield_damage
    }
}
