pub mod mind_reader;
pub mod serialization;
pub mod twenty_one;
