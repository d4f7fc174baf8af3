pub mod card;
pub mod deck;
pub mod packet;
pub mod rank;
pub mod suit;
