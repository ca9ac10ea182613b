//! Combat participants.

use serde::Deserialize;
use smallvec::SmallVec;

use crate::core::{sanitize, Faction, ParticipantSide, UnitId};
use crate::hooks::{HookBinding, ParticipantSnapshot};
use crate::keywords::{Keyword, KeywordCombatantState, KeywordEngine, KeywordState};

use super::adapter::{KeywordContainer, KeywordEntry};

/// One side of an exchange.
///
/// The resolver only reads a participant, apart from the keyword stacks
/// in `keywords`, which it updates in place. Keep the same participant
/// (or the same container) across exchanges so decay carries over.
///
/// ## Example
///
/// ```
/// use combat_resolver::core::{Faction, UnitId};
/// use combat_resolver::keywords::{Keyword, KeywordState};
/// use combat_resolver::participant::CombatParticipant;
///
/// let knight = CombatParticipant::new(UnitId::new(1), 30.0)
///     .with_faction(Faction::Player)
///     .with_attack(8.0)
///     .with_defense(2.0)
///     .with_keyword(KeywordState::new(Keyword::Lifesteal, 1.0));
///
/// assert!(knight.is_player());
/// assert_eq!(knight.combat_state().max_health, 30.0);
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CombatParticipant {
    /// Unit identity.
    pub id: UnitId,
    /// Allegiance; policy modifiers only apply to [`Faction::Player`].
    pub faction: Option<Faction>,
    /// Attack value used when the strike has no base damage.
    pub attack: Option<f64>,
    /// Flat reduction applied to incoming strikes.
    pub defense: Option<f64>,
    /// Current health.
    pub health: f64,
    /// Health ceiling; defaults to `health`.
    pub max_health: Option<f64>,
    /// Base (non-keyword) shield.
    pub shield: Option<f64>,
    /// The unit's own hooks.
    #[serde(skip)]
    pub hooks: Option<HookBinding>,
    /// Keyword states and extra hook bindings.
    pub keywords: Option<KeywordContainer>,
    /// Additive hit-chance bonus (negative for penalties).
    pub hit_chance_bonus: Option<f64>,
    /// Multiplier on damage this unit receives.
    pub damage_taken_multiplier: Option<f64>,
    /// Multiplier on damage this unit deals.
    pub damage_dealt_multiplier: Option<f64>,
}

impl CombatParticipant {
    /// Create a participant with the given health and nothing else.
    pub fn new(id: UnitId, health: f64) -> Self {
        Self {
            id,
            health,
            ..Self::default()
        }
    }

    /// Set the faction (builder pattern).
    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = Some(faction);
        self
    }

    /// Set attack (builder pattern).
    #[must_use]
    pub fn with_attack(mut self, attack: f64) -> Self {
        self.attack = Some(attack);
        self
    }

    /// Set defense (builder pattern).
    #[must_use]
    pub fn with_defense(mut self, defense: f64) -> Self {
        self.defense = Some(defense);
        self
    }

    /// Set max health (builder pattern).
    #[must_use]
    pub fn with_max_health(mut self, max_health: f64) -> Self {
        self.max_health = Some(max_health);
        self
    }

    /// Set base shield (builder pattern).
    #[must_use]
    pub fn with_shield(mut self, shield: f64) -> Self {
        self.shield = Some(shield);
        self
    }

    /// Set the unit's own hooks (builder pattern).
    #[must_use]
    pub fn with_hooks(mut self, hooks: HookBinding) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Replace the keyword container (builder pattern).
    #[must_use]
    pub fn with_keywords(mut self, keywords: KeywordContainer) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Add a keyword, creating a list container if needed (builder pattern).
    #[must_use]
    pub fn with_keyword(self, keyword: KeywordState) -> Self {
        self.with_entry(KeywordEntry::Keyword(keyword))
    }

    /// Add any container entry (builder pattern).
    #[must_use]
    pub fn with_entry(mut self, entry: KeywordEntry) -> Self {
        self.keywords.get_or_insert_with(KeywordContainer::default).push(entry);
        self
    }

    /// Set hit-chance bonus (builder pattern).
    #[must_use]
    pub fn with_hit_chance_bonus(mut self, bonus: f64) -> Self {
        self.hit_chance_bonus = Some(bonus);
        self
    }

    /// Set damage-taken multiplier (builder pattern).
    #[must_use]
    pub fn with_damage_taken_multiplier(mut self, multiplier: f64) -> Self {
        self.damage_taken_multiplier = Some(multiplier);
        self
    }

    /// Set damage-dealt multiplier (builder pattern).
    #[must_use]
    pub fn with_damage_dealt_multiplier(mut self, multiplier: f64) -> Self {
        self.damage_dealt_multiplier = Some(multiplier);
        self
    }

    /// Whether policy modifiers apply.
    #[must_use]
    pub fn is_player(&self) -> bool {
        self.faction.is_some_and(Faction::is_player)
    }

    /// Sanitized health/shield snapshot for an exchange.
    #[must_use]
    pub fn combat_state(&self) -> KeywordCombatantState {
        KeywordCombatantState::new(
            self.health,
            self.max_health,
            sanitize::non_negative_or_zero(self.shield),
        )
    }

    /// Snapshot with health and shield taken from `state`.
    #[must_use]
    pub fn snapshot(&self, state: &KeywordCombatantState) -> ParticipantSnapshot {
        ParticipantSnapshot {
            id: self.id,
            faction: self.faction,
            health: state.health,
            max_health: state.max_health,
            shield: state.shield,
        }
    }

    /// Keyword engine over this unit's keyword states, if it has any.
    pub fn keyword_engine(&mut self, side: ParticipantSide) -> Option<KeywordEngine<'_>> {
        let container = self.keywords.as_mut()?;
        if !container.has_keywords() {
            return None;
        }
        KeywordEngine::new(side, container.keyword_states_mut())
    }

    /// First keyword state of the given kind.
    #[must_use]
    pub fn keyword(&self, keyword: Keyword) -> Option<&KeywordState> {
        self.keywords
            .as_ref()?
            .keyword_states()
            .find(|state| state.keyword == keyword)
    }

    /// Hook bindings: the unit's own first, then container entries.
    #[must_use]
    pub fn hook_bindings(&self) -> SmallVec<[&HookBinding; 2]> {
        let mut bindings: SmallVec<[&HookBinding; 2]> = self.hooks.iter().collect();
        if let Some(container) = &self.keywords {
            bindings.extend(container.hook_bindings());
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookFn;

    #[test]
    fn test_combat_state_defaults() {
        let unit = CombatParticipant::new(UnitId::new(1), 12.0);
        let state = unit.combat_state();

        assert_eq!(state.health, 12.0);
        assert_eq!(state.max_health, 12.0);
        assert_eq!(state.shield, 0.0);
    }

    #[test]
    fn test_combat_state_sanitizes() {
        let unit = CombatParticipant::new(UnitId::new(1), -4.0)
            .with_max_health(f64::NAN)
            .with_shield(-1.0);
        assert_eq!(unit.combat_state(), KeywordCombatantState::empty());
    }

    #[test]
    fn test_keyword_engine_only_with_keywords() {
        let mut bare = CombatParticipant::new(UnitId::new(1), 10.0);
        assert!(bare.keyword_engine(ParticipantSide::Attacker).is_none());

        let mut hooks_only = CombatParticipant::new(UnitId::new(2), 10.0)
            .with_entry(HookBinding::new().into());
        assert!(hooks_only.keyword_engine(ParticipantSide::Attacker).is_none());

        let mut keyed = CombatParticipant::new(UnitId::new(3), 10.0)
            .with_keyword(KeywordState::new(Keyword::Shield, 1.0));
        assert_eq!(keyed.keyword_engine(ParticipantSide::Defender).map(|e| e.len()), Some(1));
    }

    #[test]
    fn test_hook_binding_order() {
        let unit = CombatParticipant::new(UnitId::new(1), 10.0)
            .with_entry(HookBinding::new().on_hit(HookFn::infallible("container", |_| {})).into())
            .with_hooks(HookBinding::new().on_hit(HookFn::infallible("own", |_| {})));

        let names: Vec<_> = unit
            .hook_bindings()
            .iter()
            .map(|b| b.on_hit[0].name().to_string())
            .collect();
        assert_eq!(names, vec!["own", "container"]);
    }

    #[test]
    fn test_deserialize_participant() {
        let unit: CombatParticipant = serde_json::from_str(
            r#"{
                "id": 4,
                "faction": "player",
                "health": 20,
                "attack": 6,
                "keywords": { "burn": { "stacks": 2 }, "junk": 1 }
            }"#,
        )
        .unwrap();

        assert_eq!(unit.id, UnitId::new(4));
        assert!(unit.is_player());
        assert_eq!(unit.attack, Some(6.0));
        assert_eq!(unit.keyword(Keyword::Burn).map(|k| k.stacks), Some(2.0));
        assert!(unit.hooks.is_none());
    }
}
