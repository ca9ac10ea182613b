//! Participants and their keyword containers.
//!
//! - [`CombatParticipant`]: The read-only description of one side of an exchange
//! - [`KeywordContainer`]: List-or-map bag of keyword states and hook bindings
//! - [`KeywordEntry`]: One classified container item
//!
//! Untyped containers are classified once, at the boundary
//! ([`KeywordContainer::from_json`] or deserialization); everything past
//! this module works with the tagged form.

mod adapter;
mod combatant;

pub use adapter::{KeywordContainer, KeywordEntry};
pub use combatant::CombatParticipant;
