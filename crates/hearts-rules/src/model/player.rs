use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat at the table; play proceeds clockwise North, East, South, West.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::North),
            1 => Some(PlayerPosition::East),
            2 => Some(PlayerPosition::South),
            3 => Some(PlayerPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerPosition {
        self.advance(1)
    }

    pub const fn previous(self) -> PlayerPosition {
        self.advance(3)
    }

    pub const fn opposite(self) -> PlayerPosition {
        self.advance(2)
    }

    /// Seat reached after `steps` clockwise moves.
    pub const fn advance(self, steps: usize) -> PlayerPosition {
        match (self.index() + steps) % 4 {
            0 => PlayerPosition::North,
            1 => PlayerPosition::East,
            2 => PlayerPosition::South,
            _ => PlayerPosition::West,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PlayerPosition::North => "north",
            PlayerPosition::East => "east",
            PlayerPosition::South => "south",
            PlayerPosition::West => "west",
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerPosition;

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerPosition::West.next(), PlayerPosition::North);
    }

    #[test]
    fn previous_wraps_around() {
        assert_eq!(PlayerPosition::North.previous(), PlayerPosition::West);
    }

    #[test]
    fn advance_counts_clockwise() {
        assert_eq!(PlayerPosition::East.advance(0), PlayerPosition::East);
        assert_eq!(PlayerPosition::East.advance(3), PlayerPosition::North);
        assert_eq!(PlayerPosition::South.opposite(), PlayerPosition::North);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in PlayerPosition::LOOP.iter().enumerate() {
            assert_eq!(PlayerPosition::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
        assert_eq!(PlayerPosition::from_index(4), None);
    }
}
