//! Core building blocks: unit identity, numeric sanitization, RNG, configuration.
//!
//! Nothing here knows about keywords or damage; the combat and keyword
//! modules build on these types.

pub mod sanitize;
pub mod unit;
pub mod rng;
pub mod config;

pub use unit::{Faction, ParticipantSide, UnitId};
pub use rng::{CombatRng, CombatRngState, RandomSource, ThreadRandom};
pub use config::{HookErrorPolicy, ResolverConfig};
