pub mod card;
pub mod deck;

pub use card::{Card, Difficulty};
pub use deck::Deck;
