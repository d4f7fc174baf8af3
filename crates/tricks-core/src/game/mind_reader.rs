//! Six-card binary mind reader.
//!
//! Card `k` lists every number in 1..=63 whose bit `k` is set, so its
//! smallest member is `2^k`. Summing the smallest member of each card the
//! player claims reconstructs their number.

use crate::error::TrickError;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

pub const CARD_COUNT: usize = 6;
pub const NUMBERS_PER_CARD: usize = 32;
pub const MAX_NUMBER: u8 = 63;

static BIT_CARD_NUMBERS: [[u8; NUMBERS_PER_CARD]; CARD_COUNT] = [
    [
        1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23, 25, 27, 29, 31, //
        33, 35, 37, 39, 41, 43, 45, 47, 49, 51, 53, 55, 57, 59, 61, 63,
    ],
    [
        2, 3, 6, 7, 10, 11, 14, 15, 18, 19, 22, 23, 26, 27, 30, 31, //
        34, 35, 38, 39, 42, 43, 46, 47, 50, 51, 54, 55, 58, 59, 62, 63,
    ],
    [
        4, 5, 6, 7, 12, 13, 14, 15, 20, 21, 22, 23, 28, 29, 30, 31, //
        36, 37, 38, 39, 44, 45, 46, 47, 52, 53, 54, 55, 60, 61, 62, 63,
    ],
    [
        8, 9, 10, 11, 12, 13, 14, 15, 24, 25, 26, 27, 28, 29, 30, 31, //
        40, 41, 42, 43, 44, 45, 46, 47, 56, 57, 58, 59, 60, 61, 62, 63,
    ],
    [
        16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, //
        48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63,
    ],
    [
        32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, //
        48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63,
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitCard {
    index: usize,
}

impl BitCard {
    pub fn get(index: usize) -> Result<Self, TrickError> {
        if index < CARD_COUNT {
            Ok(Self { index })
        } else {
            Err(TrickError::InvalidCardIndex(index))
        }
    }

    pub fn all() -> impl Iterator<Item = BitCard> {
        (0..CARD_COUNT).map(|index| BitCard { index })
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn numbers(self) -> &'static [u8] {
        &BIT_CARD_NUMBERS[self.index]
    }

    /// The value added to the total when the player says yes.
    pub fn smallest(self) -> u8 {
        BIT_CARD_NUMBERS[self.index][0]
    }

    pub fn contains(self, number: u8) -> bool {
        self.numbers().binary_search(&number).is_ok()
    }
}

/// Adds the card's smallest member to `accumulator` when `answer` is yes.
pub fn apply_answer(accumulator: u8, card_index: usize, answer: bool) -> Result<u8, TrickError> {
    let card = BitCard::get(card_index)?;
    if answer {
        Ok(accumulator.saturating_add(card.smallest()))
    } else {
        Ok(accumulator)
    }
}

pub fn is_answered(card_index: usize) -> bool {
    card_index >= CARD_COUNT
}

/// Answers a player thinking of `number` would give, card by card.
pub fn truthful_answers(number: u8) -> [bool; CARD_COUNT] {
    std::array::from_fn(|index| BitCard { index }.contains(number))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MindReaderPhase {
    AwaitingAnswer { card_index: usize },
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MindReaderGame {
    accumulator: u8,
    card_index: usize,
}

impl MindReaderGame {
    pub fn new_game() -> Self {
        Self::default()
    }

    /// Rebuilds a game from persisted parts. The total may only hold bits
    /// of cards already shown.
    pub(crate) fn resume(accumulator: u8, card_index: usize) -> Result<Self, TrickError> {
        if card_index > CARD_COUNT {
            return Err(TrickError::InvalidCardIndex(card_index));
        }
        if u32::from(accumulator) >= 1u32 << card_index {
            return Err(TrickError::InvalidCardIndex(card_index));
        }
        Ok(Self {
            accumulator,
            card_index,
        })
    }

    pub fn accumulator(&self) -> u8 {
        self.accumulator
    }

    pub fn card_index(&self) -> usize {
        self.card_index
    }

    pub fn current_card(&self) -> Option<BitCard> {
        BitCard::get(self.card_index).ok()
    }

    pub fn phase(&self) -> MindReaderPhase {
        if self.is_complete() {
            MindReaderPhase::Revealed
        } else {
            MindReaderPhase::AwaitingAnswer {
                card_index: self.card_index,
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        is_answered(self.card_index)
    }

    pub fn answer(&self, yes: bool) -> Result<Self, TrickError> {
        if self.is_complete() {
            tracing::warn!(target: "tricks_core::mind_reader", "answer after reveal rejected");
            return Err(TrickError::GameComplete);
        }

        let accumulator = apply_answer(self.accumulator, self.card_index, yes)?;
        let next = Self {
            accumulator,
            card_index: self.card_index + 1,
        };

        event!(
            target: "tricks_core::mind_reader",
            Level::DEBUG,
            card = self.card_index + 1,
            yes,
            complete = next.is_complete()
        );
        Ok(next)
    }

    /// The reconstructed number once every card has been answered. Zero
    /// means the player denied every card.
    pub fn reveal(&self) -> Option<u8> {
        self.is_complete().then_some(self.accumulator)
    }
}
