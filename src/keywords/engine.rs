//! Per-side keyword engine.
//!
//! A [`KeywordEngine`] borrows the caller's keyword states for the length
//! of one exchange and runs each keyword phase against a scratch
//! [`KeywordCombatantState`]. Stack changes land directly in the caller's
//! records.

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{sanitize, ParticipantSide};

use super::keyword::KeywordState;
use super::state::{KeywordCombatantState, TickOutcome};

/// Keyword phases for one participant.
#[derive(Debug)]
pub struct KeywordEngine<'a> {
    side: ParticipantSide,
    /// Typical units carry five keywords or fewer.
    instances: SmallVec<[&'a mut KeywordState; 4]>,
}

impl<'a> KeywordEngine<'a> {
    /// Build an engine over the given states.
    ///
    /// Returns `None` when there is nothing to run.
    pub fn new(
        side: ParticipantSide,
        states: impl IntoIterator<Item = &'a mut KeywordState>,
    ) -> Option<Self> {
        let instances: SmallVec<[&'a mut KeywordState; 4]> = states.into_iter().collect();
        if instances.is_empty() {
            None
        } else {
            Some(Self { side, instances })
        }
    }

    /// Side this engine acts for.
    #[must_use]
    pub fn side(&self) -> ParticipantSide {
        self.side
    }

    /// Number of keyword instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Always false; an engine is only built with at least one keyword.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Run pre-strike ticks in order, applying each to `me` before the next
    /// keyword looks at it. Returns the damage actually removed.
    pub fn run_tick(
        &mut self,
        me: &mut KeywordCombatantState,
        opponent: &KeywordCombatantState,
    ) -> TickOutcome {
        let mut total = TickOutcome::default();
        for instance in self.instances.iter_mut() {
            let requested = instance.tick(me);
            if requested == TickOutcome::default() {
                continue;
            }
            let applied = me.apply_tick(requested);
            trace!(
                side = %self.side,
                keyword = %instance.keyword,
                stacks_left = instance.stacks,
                shield_damage = applied.shield_damage,
                hp_damage = applied.hp_damage,
                opponent_health = opponent.health,
                "keyword tick"
            );
            total.add(applied);
        }
        total
    }

    /// Add keyword shield to `me`, returning the amount granted.
    pub fn grant_shield(&self, me: &mut KeywordCombatantState) -> f64 {
        let granted = self.shield_value();
        me.shield = sanitize::saturating(me.shield + granted);
        granted
    }

    /// Absorb up to `amount` with keyword shield, in instance order.
    /// Returns the amount absorbed.
    pub fn consume_shield(&mut self, amount: f64) -> f64 {
        let mut remaining = amount.max(0.0);
        let mut consumed = 0.0;
        for instance in self.instances.iter_mut() {
            if remaining <= 0.0 {
                break;
            }
            let taken = instance.consume_shield(remaining);
            remaining -= taken;
            consumed += taken;
        }
        consumed
    }

    /// Heal `me` after dealing `hp_damage`, capped at missing health.
    /// Returns the heal actually applied.
    pub fn apply_hit(&self, hp_damage: f64, me: &mut KeywordCombatantState) -> f64 {
        let requested = sanitize::saturating(self.instances.iter().map(|k| k.hit_heal(hp_damage)).sum());
        let applied = me.heal(requested);
        if requested > 0.0 {
            trace!(side = %self.side, requested, applied, "keyword heal");
        }
        applied
    }

    /// Total value of live keyword shields.
    #[must_use]
    pub fn shield_value(&self) -> f64 {
        sanitize::saturating(self.instances.iter().map(|k| k.shield_value()).sum())
    }
}
