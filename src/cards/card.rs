//! Spanish 40-card deck and dealing.
//!
//! Truco uses the Spanish deck with eights and nines removed: ranks 1-7
//! and the three face cards (sota 10, caballo 11, rey 12) in four suits.
//! A hand deal gives each player three cards round-robin and turns the
//! next card face up as the muestra.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::core::{GameRng, PlayerId, PlayerMap};

/// The four Spanish suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Espada,
    Basto,
    Oro,
    Copa,
}

impl Suit {
    /// All suits, in deck-building order.
    pub const ALL: [Suit; 4] = [Suit::Espada, Suit::Basto, Suit::Oro, Suit::Copa];

    /// Lowercase name as used on the wire ("espada", "basto", ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Espada => "espada",
            Suit::Basto => "basto",
            Suit::Oro => "oro",
            Suit::Copa => "copa",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Card ranks present in the truco deck (no 8 or 9).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Sota,
    Caballo,
    Rey,
}

impl Rank {
    /// All ranks, in deck-building order.
    pub const ALL: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Sota,
        Rank::Caballo,
        Rank::Rey,
    ];

    /// Printed value of the rank (1-7, 10-12).
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Sota => 10,
            Rank::Caballo => 11,
            Rank::Rey => 12,
        }
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.value()
    }
}

impl TryFrom<u8> for Rank {
    type Error = ParseCardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::ALL
            .into_iter()
            .find(|r| r.value() == value)
            .ok_or(ParseCardError)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One card of the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    /// Wire form: `<value>-<suit>`, e.g. `1-espada`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.rank, self.suit)
    }
}

/// Error parsing a `<value>-<suit>` card string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseCardError;

impl fmt::Display for ParseCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected card in <value>-<suit> form")
    }
}

impl std::error::Error for ParseCardError {}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, suit) = s.split_once('-').ok_or(ParseCardError)?;
        let value: u8 = value.parse().map_err(|_| ParseCardError)?;
        let rank = Rank::try_from(value)?;
        let suit = Suit::ALL
            .into_iter()
            .find(|su| su.name() == suit)
            .ok_or(ParseCardError)?;
        Ok(Card::new(rank, suit))
    }
}

/// A player's current cards. Three at the start of a hand.
pub type Hand = SmallVec<[Card; 3]>;

/// Result of dealing one hand: three cards per player and the muestra.
#[derive(Clone, Debug)]
pub struct Deal {
    pub hands: PlayerMap<Hand>,
    pub muestra: Card,
}

/// Build the full 40-card deck in a fixed order.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(40);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// Shuffle a fresh deck and deal three cards to each of `player_count`
/// players, round-robin in seat order. The card after the last dealt one
/// becomes the muestra.
#[must_use]
pub fn deal(rng: &mut GameRng, player_count: usize) -> Deal {
    let mut deck = full_deck();
    rng.shuffle(&mut deck);

    let mut hands: PlayerMap<Hand> = PlayerMap::with_default(player_count);
    let mut next = deck.into_iter();
    for _ in 0..3 {
        for player in PlayerId::all(player_count) {
            // 40 cards always cover 3 per player plus the muestra.
            if let Some(card) = next.next() {
                hands[player].push(card);
            }
        }
    }
    let muestra = next.next().unwrap_or(Card::new(Rank::Ace, Suit::Espada));

    Deal { hands, muestra }
}
