//! Keyword definitions.
//!
//! The keyword set is closed: every behavior is a `match` arm on
//! [`Keyword`]. A [`KeywordState`] is owned by the caller's unit record
//! and mutated in place, so stack decay is visible to the next exchange.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::sanitize;
use crate::error::KeywordParseError;

use super::state::{KeywordCombatantState, TickOutcome};

/// Lifesteal ratio contributed by each stack when no potency is set.
pub const LIFESTEAL_RATIO_PER_STACK: f64 = 0.2;

/// A recurring combat effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    /// Health damage to the bearer each tick while alive.
    #[serde(alias = "Bleed")]
    Bleed,
    /// Damage to the bearer each tick, shield first.
    #[serde(alias = "Burn")]
    Burn,
    /// Heals the bearer for a share of health damage dealt.
    #[serde(alias = "Lifesteal")]
    Lifesteal,
    /// Absorbs incoming strike damage after base shield.
    #[serde(alias = "Shield")]
    Shield,
}

impl Keyword {
    /// All keywords, in declaration order.
    pub const ALL: [Keyword; 4] = [Self::Bleed, Self::Burn, Self::Lifesteal, Self::Shield];

    /// Lowercase id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bleed => "bleed",
            Self::Burn => "burn",
            Self::Lifesteal => "lifesteal",
            Self::Shield => "shield",
        }
    }
}

impl FromStr for Keyword {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| KeywordParseError(s.to_string()))
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active keyword on a unit.
///
/// `stacks` may be fractional: shield consumption removes exactly the
/// consumed share of a stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordState {
    /// Which keyword this is.
    pub keyword: Keyword,

    /// Current intensity.
    pub stacks: f64,

    /// Per-stack magnitude. Each keyword has its own default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potency: Option<f64>,
}

impl KeywordState {
    /// Create a keyword with the given stacks and default potency.
    pub fn new(keyword: Keyword, stacks: f64) -> Self {
        Self {
            keyword,
            stacks,
            potency: None,
        }
    }

    /// Set potency (builder pattern).
    #[must_use]
    pub fn with_potency(mut self, potency: f64) -> Self {
        self.potency = Some(potency);
        self
    }

    /// Sanitized stack count.
    #[must_use]
    pub fn stacks(&self) -> f64 {
        sanitize::non_negative(self.stacks)
    }

    /// Sanitized potency, `1.0` when unset.
    #[must_use]
    pub fn potency(&self) -> f64 {
        self.potency.map_or(1.0, sanitize::non_negative)
    }

    /// No stacks left.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.stacks() <= 0.0
    }

    /// Remove one stack, never going below zero.
    fn decay(&mut self) {
        self.stacks = (self.stacks() - 1.0).max(0.0);
    }

    /// Pre-strike damage-over-time against the bearer.
    pub fn tick(&mut self, bearer: &KeywordCombatantState) -> TickOutcome {
        let stacks = self.stacks();
        if stacks <= 0.0 {
            return TickOutcome::default();
        }

        match self.keyword {
            Keyword::Bleed => {
                if !bearer.is_alive() {
                    return TickOutcome::default();
                }
                let hp_damage = sanitize::saturating(stacks * self.potency());
                self.decay();
                TickOutcome::health(hp_damage)
            }
            Keyword::Burn => {
                let total = sanitize::saturating(stacks * self.potency());
                let shield_damage = bearer.shield.min(total);
                self.decay();
                TickOutcome {
                    shield_damage,
                    hp_damage: total - shield_damage,
                }
            }
            Keyword::Lifesteal | Keyword::Shield => TickOutcome::default(),
        }
    }

    /// Shield value this keyword contributes.
    #[must_use]
    pub fn shield_value(&self) -> f64 {
        match self.keyword {
            Keyword::Shield => sanitize::saturating(self.stacks() * self.potency()),
            _ => 0.0,
        }
    }

    /// Absorb up to `amount` of damage, returning what was absorbed.
    ///
    /// Stacks drop by the absorbed share: 7 damage against 2 stacks of
    /// potency 4 leaves 0.25 stacks.
    pub fn consume_shield(&mut self, amount: f64) -> f64 {
        let amount = sanitize::non_negative(amount);
        let available = self.shield_value();
        if available <= 0.0 || amount <= 0.0 {
            return 0.0;
        }

        let consumed = available.min(amount);
        let potency = self.potency();
        self.stacks = if consumed >= available {
            0.0
        } else {
            (self.stacks() - consumed / potency).max(0.0)
        };
        consumed
    }

    /// Heal requested after dealing `hp_damage`, before the missing-health cap.
    #[must_use]
    pub fn hit_heal(&self, hp_damage: f64) -> f64 {
        match self.keyword {
            Keyword::Lifesteal => {
                if self.is_spent() {
                    return 0.0;
                }
                let ratio = match self.potency {
                    Some(p) => sanitize::non_negative(p),
                    None => self.stacks() * LIFESTEAL_RATIO_PER_STACK,
                };
                sanitize::saturating(sanitize::non_negative(hp_damage) * ratio)
            }
            _ => 0.0,
        }
    }
}
