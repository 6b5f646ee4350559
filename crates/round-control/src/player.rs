//! Player identity
//!
//! The contest is closed over exactly two players. Collaborators talk in raw
//! ids (1 or 2); everything inside the crate uses [`Player`].

use serde::{Deserialize, Serialize};
use crate::error::MatchError;

/// One of the two contestants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both players, in id order
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Resolve a raw id from a collaborator
    pub fn from_id(id: u8) -> Result<Self, MatchError> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(MatchError::InvalidPlayer(other)),
        }
    }

    /// Raw id (1 or 2)
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Slot in per-player counter arrays
    pub(crate) fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = MatchError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Player::from_id(id)
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player.id()
    }
}

impl core::fmt::Display for Player {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "player {}", self.id())
    }
}
