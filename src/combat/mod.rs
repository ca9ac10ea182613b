//! Combat resolution.
//!
//! - [`CombatResolver`]: Resolves exchanges under a config, policy, and global trigger
//! - [`resolve_combat`]: One-shot resolution with defaults
//! - [`Strike`]: Per-exchange base damage and minimum damage
//! - [`PolicyModifiers`]: Player-faction policy snapshot
//! - [`CombatResolution`]: The numeric outcome

mod policy;
mod resolution;
mod resolver;

pub use policy::PolicyModifiers;
pub use resolution::{CombatResolution, KeywordEffects};
pub use resolver::{resolve_combat, CombatResolver, ExchangeOutcome, Strike};
