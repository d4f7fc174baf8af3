use thiserror::Error;

/// Validation failures raised by the trick engines.
///
/// Every variant is a rejected operation on a pure function: the caller's
/// state value is left untouched and the host is expected to re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("invalid card: rank {rank} must be 1-13 and suit {suit} must be 0-3")]
    InvalidCardSpec { rank: u8, suit: u8 },
    #[error("invalid row selection {0}: choose row 1, 2 or 3")]
    InvalidRowSelection(u8),
    #[error("invalid card index {0}: expected 0-5")]
    InvalidCardIndex(usize),
    #[error("malformed packet: expected {expected} distinct cards, found {found}")]
    MalformedPacket { expected: usize, found: usize },
    #[error("the trick is already revealed; start a new game")]
    GameComplete,
}
