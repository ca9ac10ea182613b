//! Keyword effects: damage-over-time, shields, and lifesteal.
//!
//! ## Key Components
//!
//! - [`Keyword`]: The closed set of keyword kinds
//! - [`KeywordState`]: Caller-owned stacks/potency for one keyword on one unit
//! - [`KeywordCombatantState`]: Scratch health/shield for one side of an exchange
//! - [`KeywordEngine`]: Runs tick, shield, and heal phases for one side
//!
//! ## Keyword Behavior
//!
//! | Keyword | Tick | Shield grant | Shield consume | On hit |
//! |---|---|---|---|---|
//! | Bleed | `stacks × potency` to health while alive, -1 stack | | | |
//! | Burn | `stacks × potency`, shield first, -1 stack | | | |
//! | Shield | | `stacks × potency` | proportional stack loss | |
//! | Lifesteal | | | | heal `hp_damage × ratio` |
//!
//! ## Example Usage
//!
//! ```
//! use combat_resolver::core::ParticipantSide;
//! use combat_resolver::keywords::{Keyword, KeywordCombatantState, KeywordEngine, KeywordState};
//!
//! let mut states = vec![KeywordState::new(Keyword::Bleed, 2.0).with_potency(5.0)];
//! let mut me = KeywordCombatantState::new(7.0, None, 0.0);
//!
//! let mut engine = KeywordEngine::new(ParticipantSide::Defender, states.iter_mut()).unwrap();
//! let tick = engine.run_tick(&mut me, &KeywordCombatantState::empty());
//! drop(engine);
//!
//! assert_eq!(tick.hp_damage, 7.0);
//! assert_eq!(states[0].stacks, 1.0);
//! ```

mod engine;
mod keyword;
mod state;

pub use engine::KeywordEngine;
pub use keyword::{Keyword, KeywordState, LIFESTEAL_RATIO_PER_STACK};
pub use state::{KeywordCombatantState, KeywordEffectDetails, TickOutcome};
