//! The 21-card packet and its stride-3 rows.
//!
//! A packet is dealt into three rows by deinterleaving (`row[r][j] =
//! packet[3j + r]`) and reassembled with the chosen row in the middle third.
//! Three such rounds always leave the chosen card at [`REVEAL_INDEX`].

use crate::error::TrickError;
use crate::model::card::Card;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const PACKET_SIZE: usize = 21;
pub const ROW_COUNT: usize = 3;
pub const ROW_SIZE: usize = PACKET_SIZE / ROW_COUNT;
pub const REVEAL_INDEX: usize = PACKET_SIZE / 2;

/// One of the three rows the user picks from, numbered 1-3 on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowChoice {
    First,
    Second,
    Third,
}

impl RowChoice {
    pub const ALL: [RowChoice; ROW_COUNT] = [RowChoice::First, RowChoice::Second, RowChoice::Third];

    /// Parses the 1-based row number shown to the user.
    pub const fn from_number(number: u8) -> Result<Self, TrickError> {
        match number {
            1 => Ok(RowChoice::First),
            2 => Ok(RowChoice::Second),
            3 => Ok(RowChoice::Third),
            other => Err(TrickError::InvalidRowSelection(other)),
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(RowChoice::First),
            1 => Some(RowChoice::Second),
            2 => Some(RowChoice::Third),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Row indices in the order they are stacked back into a packet.
    const fn stacking_order(self) -> [usize; ROW_COUNT] {
        match self {
            RowChoice::First => [1, 0, 2],
            RowChoice::Second => [0, 1, 2],
            RowChoice::Third => [0, 2, 1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    cards: [Card; ROW_SIZE],
}

impl Row {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Packet {
    cards: [Card; PACKET_SIZE],
}

impl Packet {
    pub(crate) const fn from_array(cards: [Card; PACKET_SIZE]) -> Self {
        Self { cards }
    }

    /// Validates length and uniqueness of an arbitrary card sequence.
    pub fn new(cards: &[Card]) -> Result<Self, TrickError> {
        if cards.len() != PACKET_SIZE {
            return Err(TrickError::MalformedPacket {
                expected: PACKET_SIZE,
                found: cards.len(),
            });
        }

        let distinct: HashSet<Card> = cards.iter().copied().collect();
        if distinct.len() != PACKET_SIZE {
            return Err(TrickError::MalformedPacket {
                expected: PACKET_SIZE,
                found: distinct.len(),
            });
        }

        Ok(Self::from_array(std::array::from_fn(|index| cards[index])))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn position(&self, card: Card) -> Option<usize> {
        self.cards.iter().position(|&c| c == card)
    }

    /// Row the card is dealt into this round.
    pub fn row_of(&self, card: Card) -> Option<RowChoice> {
        self.position(card)
            .and_then(|index| RowChoice::from_index(index % ROW_COUNT))
    }

    pub fn rows(&self) -> [Row; ROW_COUNT] {
        deal_rows(&self.cards)
    }

    /// Restacks the rows with `choice` in the middle third.
    pub fn select(&self, choice: RowChoice) -> Packet {
        Self::recombine(&self.rows(), choice)
    }

    pub fn recombine(rows: &[Row; ROW_COUNT], choice: RowChoice) -> Packet {
        let order = choice.stacking_order();
        Self::from_array(std::array::from_fn(|index| {
            rows[order[index / ROW_SIZE]].cards[index % ROW_SIZE]
        }))
    }

    pub fn revealed_card(&self) -> Card {
        self.cards[REVEAL_INDEX]
    }
}

impl TryFrom<Vec<Card>> for Packet {
    type Error = TrickError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Packet::new(&cards)
    }
}

impl From<Packet> for Vec<Card> {
    fn from(packet: Packet) -> Self {
        packet.cards.to_vec()
    }
}

fn deal_rows(cards: &[Card; PACKET_SIZE]) -> [Row; ROW_COUNT] {
    std::array::from_fn(|row| Row {
        cards: std::array::from_fn(|slot| cards[ROW_COUNT * slot + row]),
    })
}

/// Deals a raw card sequence into its three rows.
pub fn partition_into_rows(cards: &[Card]) -> Result<[Row; ROW_COUNT], TrickError> {
    let exact: &[Card; PACKET_SIZE] =
        cards.try_into().map_err(|_| TrickError::MalformedPacket {
            expected: PACKET_SIZE,
            found: cards.len(),
        })?;
    Ok(deal_rows(exact))
}

/// Applies the user's 1-based row number to a packet, yielding the next packet.
pub fn apply_selection(packet: &Packet, chosen_row: u8) -> Result<Packet, TrickError> {
    let choice = RowChoice::from_number(chosen_row)?;
    Ok(packet.select(choice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::deck::Deck;

    fn ordered_packet() -> Packet {
        Deck::standard().deal_packet()
    }

    #[test]
    fn rows_deinterleave_with_stride_three() {
        let packet = ordered_packet();
        let rows = packet.rows();
        for (r, row) in rows.iter().enumerate() {
            for (j, card) in row.cards().iter().enumerate() {
                assert_eq!(*card, packet.cards()[3 * j + r]);
            }
        }
    }

    #[test]
    fn partition_is_deterministic_and_leaves_input_alone() {
        let packet = ordered_packet();
        let before = packet.clone();
        let first = partition_into_rows(packet.cards()).expect("21 cards");
        let second = partition_into_rows(packet.cards()).expect("21 cards");
        assert_eq!(first, second);
        assert_eq!(packet, before);
    }

    #[test]
    fn partition_rejects_wrong_length() {
        let deck = Deck::standard();
        let err = partition_into_rows(&deck.cards()[..20]).expect_err("short packet");
        assert_eq!(
            err,
            TrickError::MalformedPacket {
                expected: 21,
                found: 20
            }
        );
        assert!(partition_into_rows(&deck.cards()[..22]).is_err());
    }

    #[test]
    fn packet_new_rejects_duplicates() {
        let deck = Deck::standard();
        let mut cards = deck.cards()[..PACKET_SIZE].to_vec();
        cards[20] = cards[0];
        assert_eq!(
            Packet::new(&cards),
            Err(TrickError::MalformedPacket {
                expected: 21,
                found: 20
            })
        );
    }

    #[test]
    fn chosen_row_lands_in_middle_third() {
        let packet = ordered_packet();
        for choice in RowChoice::ALL {
            let chosen = packet.rows()[choice.index()];
            let next = packet.select(choice);
            assert_eq!(&next.cards()[ROW_SIZE..2 * ROW_SIZE], chosen.cards());
        }
    }

    #[test]
    fn outer_rows_keep_their_relative_order() {
        let packet = ordered_packet();
        let [row0, row1, row2] = packet.rows();

        let first = packet.select(RowChoice::First);
        assert_eq!(&first.cards()[..7], row1.cards());
        assert_eq!(&first.cards()[14..], row2.cards());

        let third = packet.select(RowChoice::Third);
        assert_eq!(&third.cards()[..7], row0.cards());
        assert_eq!(&third.cards()[14..], row1.cards());
    }

    #[test]
    fn selection_preserves_length_and_cards() {
        let packet = Deck::shuffled_with_seed(9).deal_packet();
        for number in 1..=3 {
            let next = apply_selection(&packet, number).expect("valid row");
            assert_eq!(next.cards().len(), PACKET_SIZE);
            let mut before = packet.cards().to_vec();
            let mut after = next.cards().to_vec();
            before.sort_by_key(|c| (c.suit, c.rank));
            after.sort_by_key(|c| (c.suit, c.rank));
            assert_eq!(before, after);
        }
    }

    #[test]
    fn invalid_row_numbers_are_rejected() {
        let packet = ordered_packet();
        assert_eq!(
            apply_selection(&packet, 0),
            Err(TrickError::InvalidRowSelection(0))
        );
        assert_eq!(
            apply_selection(&packet, 4),
            Err(TrickError::InvalidRowSelection(4))
        );
    }

    #[test]
    fn card_at_position_five_walks_to_reveal_index() {
        let mut packet = ordered_packet();
        let target = packet.cards()[5];

        let expected_positions = [8, 9, REVEAL_INDEX];
        let expected_rows = [3, 3, 1];
        for (expected_row, expected_position) in expected_rows.iter().zip(expected_positions) {
            let row = packet.row_of(target).expect("card in packet");
            assert_eq!(row.number(), *expected_row);
            packet = packet.select(row);
            assert_eq!(packet.position(target), Some(expected_position));
        }
        assert_eq!(packet.revealed_card(), target);
    }

    #[test]
    fn serde_validates_packet_contents() {
        let packet = ordered_packet();
        let json = serde_json::to_string(&packet).expect("serialize");
        let restored: Packet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, packet);

        let short = serde_json::to_string(&packet.cards()[..3]).expect("serialize slice");
        assert!(serde_json::from_str::<Packet>(&short).is_err());
    }
}
