//! Hand evaluation: envido totals and flor detection.
//!
//! Both depend on the muestra through the pieza/alcahuete rules in
//! [`hierarchy`](super::hierarchy). Neither mutates the hand; both are
//! pure over the cards currently held, so totals computed at bid time and
//! at showdown can differ if cards were played in between.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, Suit};
use super::hierarchy::{envido_value, is_alcahuete, is_pieza};

/// Envido total for `hand` under `muestra`.
///
/// Cascade, first match wins:
/// 1. Any pieza or alcahuete in hand: best pieza value plus the best
///    single non-pieza card (0 if the other cards are all piezas).
/// 2. Two or more cards of one suit: 20 plus the two best values in the
///    best such suit.
/// 3. Otherwise the single best card value.
///
/// An empty hand scores 0.
#[must_use]
pub fn envido_total(hand: &[Card], muestra: Card) -> u8 {
    if hand.is_empty() {
        return 0;
    }

    let is_piece = |c: Card| is_pieza(c, muestra) || is_alcahuete(c, muestra);

    let best_pieza = hand
        .iter()
        .filter(|c| is_piece(**c))
        .map(|c| envido_value(*c, muestra))
        .max();
    if let Some(best_pieza) = best_pieza {
        let best_liga = hand
            .iter()
            .filter(|c| !is_piece(**c))
            .map(|c| envido_value(*c, muestra))
            .max()
            .unwrap_or(0);
        return best_pieza + best_liga;
    }

    let mut best = 0;
    for suit in Suit::ALL {
        let mut values: SmallVec<[u8; 3]> = hand
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| envido_value(*c, muestra))
            .collect();
        if values.len() >= 2 {
            values.sort_unstable_by(|a, b| b.cmp(a));
            best = best.max(20 + values[0] + values[1]);
        }
    }
    if best > 0 {
        return best;
    }

    hand.iter()
        .map(|c| envido_value(*c, muestra))
        .max()
        .unwrap_or(0)
}

/// Which rule produced a flor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlorKind {
    /// Three cards of one suit.
    SameSuit,
    /// Two or more piezas (alcahuete does not count here).
    Piezas,
    /// Exactly one pieza plus a same-suit pair of plain cards.
    PiezaAndPair,
}

/// A detected flor: the rule matched and the suit it was built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flor {
    pub kind: FlorKind,
    pub suit: Suit,
}

/// Detect a flor in `hand` under `muestra`, if any.
///
/// Rules checked in order: three of a suit; two piezas (muestra suit);
/// one pieza with the other two cards suited and neither of them a pieza
/// or the alcahuete.
#[must_use]
pub fn detect_flor(hand: &[Card], muestra: Card) -> Option<Flor> {
    if hand.is_empty() {
        return None;
    }

    for suit in Suit::ALL {
        if hand.iter().filter(|c| c.suit == suit).count() == 3 {
            return Some(Flor {
                kind: FlorKind::SameSuit,
                suit,
            });
        }
    }

    let piezas = hand.iter().filter(|c| is_pieza(**c, muestra)).count();
    if piezas >= 2 {
        return Some(Flor {
            kind: FlorKind::Piezas,
            suit: muestra.suit,
        });
    }

    if piezas == 1 {
        let others: SmallVec<[Card; 3]> = hand
            .iter()
            .filter(|c| !is_pieza(**c, muestra) && !is_alcahuete(**c, muestra))
            .copied()
            .collect();
        if others.len() == 2 && others[0].suit == others[1].suit {
            return Some(Flor {
                kind: FlorKind::PiezaAndPair,
                suit: others[0].suit,
            });
        }
    }

    None
}
