use crate::error::TrickError;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Builds a card from raw numeric parts (`rank` 1-13, `suit` 0-3).
    pub fn from_parts(rank: u8, suit: u8) -> Result<Self, TrickError> {
        match (Rank::from_value(rank), Suit::from_index(suit as usize)) {
            (Some(rank), Some(suit)) => Ok(Self::new(rank, suit)),
            _ => Err(TrickError::InvalidCardSpec { rank, suit }),
        }
    }

    /// "Queen of Hearts", "7 of Clubs".
    pub fn long_name(self) -> String {
        if self.rank.is_face() {
            format!("{} of {}", self.rank.name(), self.suit.name())
        } else {
            format!("{} of {}", self.rank.value(), self.suit.name())
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
