//! Monster classification.

use serde::{Deserialize, Serialize};

/// Classification of a monster id.
///
/// The numeric codes match the attribute column of the monster catalog.
/// `Swarm` and `Event` never come out of the catalog parser; they are only
/// reachable through an explicit stats update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterKind {
    Npc,
    Trap,
    #[default]
    Creature,
    Swarm,
    Event,
}

impl MonsterKind {
    /// Decode a numeric kind code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Npc),
            1 => Some(Self::Trap),
            2 => Some(Self::Creature),
            3 => Some(Self::Swarm),
            4 => Some(Self::Event),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Npc => 0,
            Self::Trap => 1,
            Self::Creature => 2,
            Self::Swarm => 3,
            Self::Event => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Npc => "NPC",
            Self::Trap => "Trap",
            Self::Creature => "Monster",
            Self::Swarm => "Multiple",
            Self::Event => "Event",
        }
    }

    /// Marker color used when drawing placements of this kind.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Npc => "yellow",
            Self::Trap => "blue",
            Self::Creature => "red",
            Self::Swarm => "green",
            Self::Event => "cyan",
        }
    }

    pub fn is_npc(&self) -> bool {
        matches!(self, Self::Npc)
    }

    pub fn all() -> &'static [MonsterKind] {
        &[
            MonsterKind::Npc,
            MonsterKind::Trap,
            MonsterKind::Creature,
            MonsterKind::Swarm,
            MonsterKind::Event,
        ]
    }
}

impl std::fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for kind in MonsterKind::all() {
            assert_eq!(MonsterKind::from_code(kind.code() as i64), Some(*kind));
        }
        assert_eq!(MonsterKind::from_code(5), None);
        assert_eq!(MonsterKind::from_code(-1), None);
    }

    #[test]
    fn test_default_is_creature() {
        assert_eq!(MonsterKind::default(), MonsterKind::Creature);
    }
}
