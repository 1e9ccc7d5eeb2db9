//! Deck, muestra-relative ranking, and hand evaluation.

pub mod card;
pub mod evaluator;
pub mod hierarchy;

pub use card::{deal, full_deck, Card, Deal, Hand, ParseCardError, Rank, Suit};
pub use evaluator::{detect_flor, envido_total, Flor, FlorKind};
pub use hierarchy::{compare, envido_value, hierarchy_of, Hierarchy, Tier};
