use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Side {
    Player = 0,
    Opponent = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Side::Player),
            1 => Some(Side::Opponent),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Side::Player => "Player",
            Side::Opponent => "Opponent",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::Side;

    #[test]
    fn other_flips_sides() {
        assert_eq!(Side::Player.other(), Side::Opponent);
        assert_eq!(Side::Opponent.other(), Side::Player);
    }

    #[test]
    fn index_roundtrip() {
        for (i, side) in Side::BOTH.iter().enumerate() {
            assert_eq!(Side::from_index(i), Some(*side));
            assert_eq!(side.index(), i);
        }
        assert_eq!(Side::from_index(2), None);
    }
}
