use crate::error::TrickError;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::packet::{Packet, ROW_COUNT, Row, RowChoice};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Selections needed before the chosen card is pinned to the reveal index.
pub const ROUNDS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwentyOnePhase {
    AwaitingSelection { round: u8 },
    Revealed,
}

/// State of one 21-card play-through. Transitions return a new value and
/// never touch `self`, so a rejected input leaves the caller's state intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwentyOneGame {
    packet: Packet,
    round: u8,
}

impl TwentyOneGame {
    pub fn new_game<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_packet(Deck::shuffled(rng).deal_packet())
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new_game(&mut rng)
    }

    pub fn from_packet(packet: Packet) -> Self {
        Self { packet, round: 0 }
    }

    pub(crate) fn resume(packet: Packet, round: u8) -> Result<Self, TrickError> {
        if round > ROUNDS {
            return Err(TrickError::GameComplete);
        }
        Ok(Self { packet, round })
    }

    pub fn packet(&self) -> &Packet {
        &self.packet
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn rows(&self) -> [Row; ROW_COUNT] {
        self.packet.rows()
    }

    pub fn phase(&self) -> TwentyOnePhase {
        if self.is_complete() {
            TwentyOnePhase::Revealed
        } else {
            TwentyOnePhase::AwaitingSelection { round: self.round }
        }
    }

    pub fn is_complete(&self) -> bool {
        is_complete(self.round)
    }

    pub fn select_row(&self, chosen_row: u8) -> Result<Self, TrickError> {
        if self.is_complete() {
            tracing::warn!(
                target: "tricks_core::twenty_one",
                chosen_row,
                "selection after reveal rejected"
            );
            return Err(TrickError::GameComplete);
        }

        let choice = RowChoice::from_number(chosen_row).inspect_err(|err| {
            tracing::warn!(target: "tricks_core::twenty_one", round = self.round, %err);
        })?;
        let next = Self {
            packet: self.packet.select(choice),
            round: self.round + 1,
        };

        event!(
            target: "tricks_core::twenty_one",
            Level::DEBUG,
            round = next.round,
            row = choice.number(),
            complete = next.is_complete()
        );
        Ok(next)
    }

    /// The chosen card, once all rounds are played.
    pub fn reveal(&self) -> Option<Card> {
        self.is_complete().then(|| self.packet.revealed_card())
    }
}

pub fn is_complete(round: u8) -> bool {
    round >= ROUNDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::packet::REVEAL_INDEX;

    #[test]
    fn new_game_starts_awaiting_first_selection() {
        let game = TwentyOneGame::with_seed(11);
        assert_eq!(game.round(), 0);
        assert_eq!(game.phase(), TwentyOnePhase::AwaitingSelection { round: 0 });
        assert_eq!(game.reveal(), None);
    }

    #[test]
    fn seeded_games_repeat() {
        assert_eq!(TwentyOneGame::with_seed(5), TwentyOneGame::with_seed(5));
        assert_ne!(
            TwentyOneGame::with_seed(5).packet(),
            TwentyOneGame::with_seed(6).packet()
        );
    }

    #[test]
    fn three_truthful_selections_reveal_the_card() {
        let start = TwentyOneGame::with_seed(2024);
        for target in start.packet().cards().iter().copied() {
            let mut game = start.clone();
            while !game.is_complete() {
                let row = game.packet().row_of(target).expect("card stays in play");
                game = game.select_row(row.number()).expect("valid row");
            }
            assert_eq!(game.packet().position(target), Some(REVEAL_INDEX));
            assert_eq!(game.reveal(), Some(target));
            assert_eq!(game.phase(), TwentyOnePhase::Revealed);
        }
    }

    #[test]
    fn invalid_row_leaves_state_unchanged() {
        let game = TwentyOneGame::with_seed(3).select_row(2).expect("valid row");
        let before = game.clone();
        assert_eq!(game.select_row(0), Err(TrickError::InvalidRowSelection(0)));
        assert_eq!(game.select_row(4), Err(TrickError::InvalidRowSelection(4)));
        assert_eq!(game, before);
        assert_eq!(game.round(), 1);
    }

    #[test]
    fn revealed_game_rejects_more_selections() {
        let mut game = TwentyOneGame::with_seed(8);
        for _ in 0..ROUNDS {
            game = game.select_row(1).expect("valid row");
        }
        assert!(game.is_complete());
        assert_eq!(game.select_row(2), Err(TrickError::GameComplete));

        let fresh = TwentyOneGame::with_seed(9);
        assert_eq!(fresh.round(), 0);
        assert!(fresh.select_row(2).is_ok());
    }

    #[test]
    fn completion_threshold() {
        assert!(!is_complete(0));
        assert!(!is_complete(2));
        assert!(is_complete(3));
        assert!(is_complete(4));
    }
}
