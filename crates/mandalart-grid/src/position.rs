//! Canonical positions of a 3x3 arrangement
//!
//! Provides [`Position`] (all nine slots, including the fixed center) and
//! [`SubGridKey`] (the eight satellites that may own a sub-grid). The
//! [`CANONICAL_ORDER`] table is the coordinate system every other module
//! reasons in: slot `i` of a 3x3 block is `CANONICAL_ORDER[i]`.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Number of slots in a 3x3 block
pub const SLOT_COUNT: usize = 9;

/// Physical index of the center slot
pub const CENTER_INDEX: usize = 4;

/// One of the nine slots of a 3x3 block, in compass terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Position {
    /// Slot 0
    NorthWest,
    /// Slot 1
    North,
    /// Slot 2
    NorthEast,
    /// Slot 3
    West,
    /// Slot 4
    Center,
    /// Slot 5
    East,
    /// Slot 6
    SouthWest,
    /// Slot 7
    South,
    /// Slot 8
    SouthEast,
}

/// Reading-order layout of a 3x3 block. Never changes at runtime.
pub const CANONICAL_ORDER: [Position; SLOT_COUNT] = [
    Position::NorthWest,
    Position::North,
    Position::NorthEast,
    Position::West,
    Position::Center,
    Position::East,
    Position::SouthWest,
    Position::South,
    Position::SouthEast,
];

/// A satellite position: every [`Position`] except the center
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubGridKey {
    /// Top-left satellite
    NorthWest,
    /// Top satellite
    North,
    /// Top-right satellite
    NorthEast,
    /// Left satellite
    West,
    /// Right satellite
    East,
    /// Bottom-left satellite
    SouthWest,
    /// Bottom satellite
    South,
    /// Bottom-right satellite
    SouthEast,
}

impl SubGridKey {
    /// All satellites in canonical order
    pub const ALL: [SubGridKey; 8] = [
        SubGridKey::NorthWest,
        SubGridKey::North,
        SubGridKey::NorthEast,
        SubGridKey::West,
        SubGridKey::East,
        SubGridKey::SouthWest,
        SubGridKey::South,
        SubGridKey::SouthEast,
    ];

    /// Index of this satellite's seed cell within the center grid
    #[inline]
    #[must_use]
    pub fn center_index(self) -> usize {
        Position::from(self).index()
    }

    /// Satellite whose seed cell sits at `index` of the center grid
    ///
    /// Returns `None` for the center slot and for out-of-range indices.
    #[must_use]
    pub fn from_center_index(index: usize) -> Option<Self> {
        Position::from_index(index).and_then(Position::sub_grid_key)
    }

    /// Wire name (`"northWest"`, `"south"`, ...)
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        Position::from(self).as_str()
    }
}

impl Position {
    /// Physical slot (0..=8) of this position
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Position::NorthWest => 0,
            Position::North => 1,
            Position::NorthEast => 2,
            Position::West => 3,
            Position::Center => CENTER_INDEX,
            Position::East => 5,
            Position::SouthWest => 6,
            Position::South => 7,
            Position::SouthEast => 8,
        }
    }

    /// Position occupying physical slot `index`
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        CANONICAL_ORDER.get(index).copied()
    }

    /// Whether this is the fixed center slot
    #[inline]
    #[must_use]
    pub fn is_center(self) -> bool {
        self == Position::Center
    }

    /// Satellite key for this position (`None` for the center)
    #[must_use]
    pub fn sub_grid_key(self) -> Option<SubGridKey> {
        match self {
            Position::NorthWest => Some(SubGridKey::NorthWest),
            Position::North => Some(SubGridKey::North),
            Position::NorthEast => Some(SubGridKey::NorthEast),
            Position::West => Some(SubGridKey::West),
            Position::Center => None,
            Position::East => Some(SubGridKey::East),
            Position::SouthWest => Some(SubGridKey::SouthWest),
            Position::South => Some(SubGridKey::South),
            Position::SouthEast => Some(SubGridKey::SouthEast),
        }
    }

    /// Wire name (`"northWest"`, `"center"`, ...)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::NorthWest => "northWest",
            Position::North => "north",
            Position::NorthEast => "northEast",
            Position::West => "west",
            Position::Center => "center",
            Position::East => "east",
            Position::SouthWest => "southWest",
            Position::South => "south",
            Position::SouthEast => "southEast",
        }
    }
}

impl From<SubGridKey> for Position {
    fn from(key: SubGridKey) -> Self {
        match key {
            SubGridKey::NorthWest => Position::NorthWest,
            SubGridKey::North => Position::North,
            SubGridKey::NorthEast => Position::NorthEast,
            SubGridKey::West => Position::West,
            SubGridKey::East => Position::East,
            SubGridKey::SouthWest => Position::SouthWest,
            SubGridKey::South => Position::South,
            SubGridKey::SouthEast => Position::SouthEast,
        }
    }
}

impl TryFrom<Position> for SubGridKey {
    type Error = GridError;

    fn try_from(position: Position) -> Result<Self, Self::Error> {
        position.sub_grid_key().ok_or(GridError::CenterNotSatellite)
    }
}

/// Physical slot of `position` in [`CANONICAL_ORDER`]
#[inline]
#[must_use]
pub fn index_of(position: Position) -> usize {
    position.index()
}

/// Index within the center grid that holds the seed cell of `key`
#[inline]
#[must_use]
pub fn center_index_for_sub_grid_key(key: SubGridKey) -> usize {
    key.center_index()
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for SubGridKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CANONICAL_ORDER
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| GridError::UnknownKey(s.to_string()))
    }
}

impl FromStr for SubGridKey {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_str(s)?.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_index() {
        for (slot, position) in CANONICAL_ORDER.iter().enumerate() {
            assert_eq!(position.index(), slot);
            assert_eq!(index_of(*position), slot);
            assert_eq!(Position::from_index(slot), Some(*position));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn satellites_skip_center_index() {
        let indices: Vec<usize> = SubGridKey::ALL
            .iter()
            .map(|k| center_index_for_sub_grid_key(*k))
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn from_center_index_inverts() {
        for key in SubGridKey::ALL {
            assert_eq!(SubGridKey::from_center_index(key.center_index()), Some(key));
        }
        assert_eq!(SubGridKey::from_center_index(CENTER_INDEX), None);
        assert_eq!(SubGridKey::from_center_index(12), None);
    }

    #[test]
    fn parse_wire_names() {
        assert_eq!("southEast".parse::<Position>().unwrap(), Position::SouthEast);
        assert_eq!("center".parse::<Position>().unwrap(), Position::Center);
        assert_eq!("north".parse::<SubGridKey>().unwrap(), SubGridKey::North);
    }

    #[test]
    fn parse_rejects_unknown_key() {
        let err = "up".parse::<Position>().unwrap_err();
        assert!(matches!(err, GridError::UnknownKey(ref k) if k == "up"));
    }

    #[test]
    fn center_is_not_a_satellite() {
        let err = "center".parse::<SubGridKey>().unwrap_err();
        assert!(matches!(err, GridError::CenterNotSatellite));
        assert!(Position::Center.sub_grid_key().is_none());
    }

    #[test]
    fn display_round_trips_serde_name() {
        let json = serde_json::to_string(&Position::NorthWest).unwrap();
        assert_eq!(json, format!("\"{}\"", Position::NorthWest));
    }
}
