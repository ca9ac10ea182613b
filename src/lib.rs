//! # combat-resolver
//!
//! A deterministic, single-exchange combat resolution engine.
//!
//! ## Design Principles
//!
//! 1. **Reproducible**: Given the same participants, policy snapshot, and
//!    random draw, an exchange always produces the same resolution.
//!
//! 2. **Read-Only Participants**: The resolver reports damage, healing, and
//!    remaining values; hosts apply them. The one exception is keyword
//!    stacks, which decay in place so the next exchange sees them.
//!
//! 3. **Explicit Context**: Policy modifiers, randomness, and the global
//!    trigger are passed in, never read from process-wide state.
//!
//! ## Exchange Pipeline
//!
//! - Pre-strike keyword ticks (Bleed, Burn) can kill before the strike lands.
//! - Keyword shield (Shield) is granted, then drained after base shield.
//! - Hit chance below 1 draws one value from the supplied [`RandomSource`].
//! - Damage has a floor (`minimum_damage`) scaled by the defender's
//!   damage-taken multiplier.
//! - Lifesteal heals the attacker, capped at missing health.
//! - Hooks fire in a fixed `onHit`/`onKill` order.
//!
//! ## Example
//!
//! ```
//! use combat_resolver::{
//!     resolve_combat, CombatParticipant, Keyword, KeywordState, PolicyModifiers, Strike, UnitId,
//! };
//!
//! let mut attacker = CombatParticipant::new(UnitId::new(1), 9.0)
//!     .with_max_health(10.0)
//!     .with_attack(6.0)
//!     .with_keyword(KeywordState::new(Keyword::Lifesteal, 2.0).with_potency(1.0));
//! let mut defender = CombatParticipant::new(UnitId::new(2), 20.0);
//!
//! let result = resolve_combat(
//!     Some(&mut attacker),
//!     &mut defender,
//!     Strike::new(),
//!     PolicyModifiers::neutral(),
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(result.hp_damage, 6.0);
//! assert_eq!(result.attacker_healing, 1.0);
//! ```
//!
//! ## Modules
//!
//! - `core`: Unit identity, sanitization, RNG, configuration
//! - `keywords`: Keyword definitions and the per-side keyword engine
//! - `participant`: Participants and keyword/hook containers
//! - `hooks`: Hook payloads, bindings, and ordered dispatch
//! - `combat`: The resolver and its output

pub mod core;
pub mod error;
pub mod keywords;
pub mod participant;
pub mod hooks;
pub mod combat;

// Re-export commonly used types
pub use crate::core::{
    Faction, ParticipantSide, UnitId,
    CombatRng, CombatRngState, RandomSource, ThreadRandom,
    HookErrorPolicy, ResolverConfig,
};

pub use crate::error::{AdapterError, HookError, KeywordParseError};

pub use crate::keywords::{
    Keyword, KeywordState, KeywordEngine,
    KeywordCombatantState, KeywordEffectDetails, TickOutcome,
};

pub use crate::participant::{CombatParticipant, KeywordContainer, KeywordEntry};

pub use crate::hooks::{
    CombatEvent, CombatHookPayload, ParticipantSnapshot,
    HookBinding, HookFn, HookEvent,
    HookDispatcher, DispatchReport, ModifierTrigger, NoopTrigger, RecordingTrigger,
};

pub use crate::combat::{
    resolve_combat, CombatResolver, ExchangeOutcome, Strike,
    PolicyModifiers, CombatResolution, KeywordEffects,
};
