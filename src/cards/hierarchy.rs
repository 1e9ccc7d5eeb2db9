//! Muestra-relative card ranking.
//!
//! Trick strength is a single scale with four tiers, strongest first:
//!
//! - **Piezas**: muestra-suit cards of rank 2, 4, 5, 11, 10, worth 30, 29,
//!   28, 27, 27 envido points and `100 + value` strength.
//! - **Alcahuete**: the rey (12) of the muestra suit when the muestra
//!   itself is a pieza rank. It impersonates the muestra, taking that
//!   rank's pieza value for both strength and envido.
//! - **Matas**: the four fixed top cards of the plain deck (1-espada,
//!   1-basto, 7-espada, 7-oro) at strengths 96 down to 93.
//! - **Commons**: everything else, ordered 3 2 1 12 11 10 7 6 5 4.
//!
//! Equal strength between commons of the same rank is a parda (tied
//! trick); no two piezas tie except the 27-point pair (11 and 10).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::card::{Card, Rank, Suit};

/// Which tier of the ranking a card falls into, given the muestra.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Pieza,
    Alcahuete,
    Mata,
    Common,
}

/// A card's standing for trick comparison and envido tallies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub tier: Tier,
    /// Trick strength; higher wins, equal is a parda.
    pub strength: u8,
    /// Points the card contributes to an envido tally.
    pub envido_value: u8,
}

/// Envido value of a pieza rank, `None` for non-pieza ranks.
#[must_use]
pub const fn pieza_value(rank: Rank) -> Option<u8> {
    match rank {
        Rank::Two => Some(30),
        Rank::Four => Some(29),
        Rank::Five => Some(28),
        Rank::Caballo | Rank::Sota => Some(27),
        _ => None,
    }
}

/// Whether `card` is a pieza under `muestra`.
#[must_use]
pub fn is_pieza(card: Card, muestra: Card) -> bool {
    card.suit == muestra.suit && pieza_value(card.rank).is_some()
}

/// Whether `card` is the alcahuete: the muestra-suit rey standing in for
/// a pieza muestra.
#[must_use]
pub fn is_alcahuete(card: Card, muestra: Card) -> bool {
    card.rank == Rank::Rey && card.suit == muestra.suit && pieza_value(muestra.rank).is_some()
}

fn mata_strength(card: Card) -> Option<u8> {
    match (card.rank, card.suit) {
        (Rank::Ace, Suit::Espada) => Some(96),
        (Rank::Ace, Suit::Basto) => Some(95),
        (Rank::Seven, Suit::Espada) => Some(94),
        (Rank::Seven, Suit::Oro) => Some(93),
        _ => None,
    }
}

// Strongest common first; strength is 50 minus the position here.
const COMMON_ORDER: [u8; 10] = [3, 2, 1, 12, 11, 10, 7, 6, 5, 4];

fn common_envido_value(rank: Rank) -> u8 {
    let value = rank.value();
    if value >= 10 {
        0
    } else {
        value
    }
}

/// Rank `card` against `muestra`.
#[must_use]
pub fn hierarchy_of(card: Card, muestra: Card) -> Hierarchy {
    if is_pieza(card, muestra) {
        let value = pieza_value(card.rank).unwrap_or(0);
        return Hierarchy {
            tier: Tier::Pieza,
            strength: 100 + value,
            envido_value: value,
        };
    }

    if is_alcahuete(card, muestra) {
        let value = pieza_value(muestra.rank).unwrap_or(0);
        return Hierarchy {
            tier: Tier::Alcahuete,
            strength: 100 + value,
            envido_value: value,
        };
    }

    if let Some(strength) = mata_strength(card) {
        return Hierarchy {
            tier: Tier::Mata,
            strength,
            envido_value: card.rank.value(),
        };
    }

    let position = COMMON_ORDER
        .iter()
        .position(|&v| v == card.rank.value())
        .unwrap_or(COMMON_ORDER.len());
    Hierarchy {
        tier: Tier::Common,
        strength: 50 - position as u8,
        envido_value: common_envido_value(card.rank),
    }
}

/// Envido points `card` is worth under `muestra`, across all tiers.
#[must_use]
pub fn envido_value(card: Card, muestra: Card) -> u8 {
    hierarchy_of(card, muestra).envido_value
}

/// Compare two cards for a trick. `Ordering::Equal` is a parda.
#[must_use]
pub fn compare(a: Card, b: Card, muestra: Card) -> Ordering {
    hierarchy_of(a, muestra)
        .strength
        .cmp(&hierarchy_of(b, muestra).strength)
}
