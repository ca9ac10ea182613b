//! Unit identity, faction, and exchange sides.
//!
//! ## Usage
//!
//! ```
//! use combat_resolver::core::{Faction, ParticipantSide, UnitId};
//!
//! let id = UnitId::new(7);
//! assert_eq!(id.raw(), 7);
//! assert!(Faction::Player.is_player());
//! assert_eq!(ParticipantSide::Attacker.opponent(), ParticipantSide::Defender);
//! ```

use serde::{Deserialize, Serialize};

/// Identifier for a unit taking part in an exchange.
///
/// The resolver never interprets ids; they are carried into hook payloads
/// and log spans so callers can correlate results with their own records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a new unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// Allegiance of a participant.
///
/// Only [`Faction::Player`] units receive policy modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    /// Controlled by the player; subject to active policies.
    Player,
    /// Hostile units.
    Enemy,
    /// Wildlife, environment, and other unaligned units.
    Neutral,
}

impl Faction {
    /// Whether policy modifiers apply to this faction.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }
}

/// Which side of the exchange a value or hook belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantSide {
    /// The striking unit.
    Attacker,
    /// The unit being struck.
    Defender,
}

impl ParticipantSide {
    /// The other side of the exchange.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

impl std::fmt::Display for ParticipantSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attacker => write!(f, "attacker"),
            Self::Defender => write!(f, "defender"),
        }
    }
}
