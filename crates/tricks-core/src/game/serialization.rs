use super::mind_reader::MindReaderGame;
use super::twenty_one::TwentyOneGame;
use crate::error::TrickError;
use crate::model::packet::Packet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A game held by the host between input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    TwentyOne(TwentyOneGame),
    MindReader(MindReaderGame),
}

impl Session {
    pub fn is_complete(&self) -> bool {
        match self {
            Session::TwentyOne(game) => game.is_complete(),
            Session::MindReader(game) => game.is_complete(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "trick", rename_all = "snake_case")]
pub enum SessionSnapshot {
    TwentyOne { round: u8, packet: Packet },
    MindReader { accumulator: u8, card_index: usize },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot describes an impossible game: {0}")]
    Invalid(#[from] TrickError),
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        match session {
            Session::TwentyOne(game) => SessionSnapshot::TwentyOne {
                round: game.round(),
                packet: game.packet().clone(),
            },
            Session::MindReader(game) => SessionSnapshot::MindReader {
                accumulator: game.accumulator(),
                card_index: game.card_index(),
            },
        }
    }

    pub fn restore(self) -> Result<Session, SnapshotError> {
        let session = match self {
            SessionSnapshot::TwentyOne { round, packet } => {
                Session::TwentyOne(TwentyOneGame::resume(packet, round)?)
            }
            SessionSnapshot::MindReader {
                accumulator,
                card_index,
            } => Session::MindReader(MindReaderGame::resume(accumulator, card_index)?),
        };
        Ok(session)
    }

    pub fn to_json(session: &Session) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(session))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_one_snapshot_roundtrip_mid_game() {
        let game = TwentyOneGame::with_seed(77)
            .select_row(3)
            .expect("valid row");
        let session = Session::TwentyOne(game.clone());

        let json = SessionSnapshot::to_json(&session).expect("serialize");
        assert!(json.contains("\"trick\": \"twenty_one\""));
        assert!(json.contains("\"round\": 1"));

        let restored = SessionSnapshot::from_json(&json)
            .expect("parse")
            .restore()
            .expect("restore");
        assert_eq!(restored, Session::TwentyOne(game));
    }

    #[test]
    fn mind_reader_snapshot_roundtrip() {
        let game = MindReaderGame::new_game()
            .answer(true)
            .and_then(|g| g.answer(false))
            .expect("answers accepted");
        let session = Session::MindReader(game);
        let json = SessionSnapshot::to_json(&session).expect("serialize");
        let restored = SessionSnapshot::from_json(&json)
            .expect("parse")
            .restore()
            .expect("restore");
        assert_eq!(restored, session);
        assert!(!restored.is_complete());
    }

    #[test]
    fn rejects_short_packet() {
        let json = r#"{
            "trick": "twenty_one",
            "round": 0,
            "packet": [{ "rank": "Ace", "suit": "Spades" }]
        }"#;
        assert!(matches!(
            SessionSnapshot::from_json(json),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn rejects_round_past_reveal() {
        let session = Session::TwentyOne(TwentyOneGame::with_seed(1));
        let json = SessionSnapshot::to_json(&session)
            .expect("serialize")
            .replace("\"round\": 0", "\"round\": 4");
        let err = SessionSnapshot::from_json(&json)
            .expect("parse")
            .restore()
            .expect_err("round 4 is impossible");
        assert!(matches!(err, SnapshotError::Invalid(TrickError::GameComplete)));
    }

    #[test]
    fn rejects_total_with_unseen_bits() {
        let json = r#"{ "trick": "mind_reader", "accumulator": 40, "card_index": 3 }"#;
        let err = SessionSnapshot::from_json(json)
            .expect("parse")
            .restore()
            .expect_err("bit 5 not shown yet");
        assert!(matches!(
            err,
            SnapshotError::Invalid(TrickError::InvalidCardIndex(3))
        ));
    }
}
