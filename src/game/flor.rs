//! Flor declaration records for the current hand.
//!
//! A flor scores a fixed 3 points the moment it is declared; a later
//! contraflor by an opponent is recorded as a flagged counter-declaration
//! only, with no comparison or repayment. Records accumulate across the
//! hand (each player may declare once) and are cleared at the next deal.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::Flor;
use crate::core::PlayerId;

/// Points a declared flor is worth.
pub const FLOR_POINTS: u8 = 3;

/// One player's declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlorDeclaration {
    pub flor: Flor,
    pub points: u8,
    /// True when this was a counter-declaration against an earlier flor.
    pub contraflor: bool,
}

/// All flor declarations made this hand.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlorState {
    declarations: FxHashMap<PlayerId, FlorDeclaration>,
}

impl FlorState {
    /// Whether any flor has been declared this hand.
    #[must_use]
    pub fn any_declared(&self) -> bool {
        !self.declarations.is_empty()
    }

    /// Whether `player` already declared (flor or contraflor).
    #[must_use]
    pub fn has_declared(&self, player: PlayerId) -> bool {
        self.declarations.contains_key(&player)
    }

    /// Look up `player`'s declaration.
    #[must_use]
    pub fn declaration(&self, player: PlayerId) -> Option<&FlorDeclaration> {
        self.declarations.get(&player)
    }

    /// All declarations made this hand.
    pub fn declarations(&self) -> impl Iterator<Item = (PlayerId, &FlorDeclaration)> {
        self.declarations.iter().map(|(p, d)| (*p, d))
    }

    /// Record a base declaration worth [`FLOR_POINTS`].
    pub fn declare(&mut self, player: PlayerId, flor: Flor) {
        self.declarations.insert(
            player,
            FlorDeclaration {
                flor,
                points: FLOR_POINTS,
                contraflor: false,
            },
        );
    }

    /// Record a counter-declaration. Worth nothing by itself.
    pub fn counter_declare(&mut self, player: PlayerId, flor: Flor) {
        self.declarations.insert(
            player,
            FlorDeclaration {
                flor,
                points: 0,
                contraflor: true,
            },
        );
    }

    /// Forget all declarations (hand boundary).
    pub fn clear(&mut self) {
        self.declarations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{FlorKind, Suit};

    fn a_flor() -> Flor {
        Flor {
            kind: FlorKind::SameSuit,
            suit: Suit::Copa,
        }
    }

    #[test]
    fn test_declare_and_query() {
        let mut state = FlorState::default();
        assert!(!state.any_declared());

        state.declare(PlayerId::new(0), a_flor());
        assert!(state.any_declared());
        assert!(state.has_declared(PlayerId::new(0)));
        assert!(!state.has_declared(PlayerId::new(1)));

        let decl = state.declaration(PlayerId::new(0)).unwrap();
        assert_eq!(decl.points, FLOR_POINTS);
        assert!(!decl.contraflor);
    }

    #[test]
    fn test_counter_declaration_is_flagged_and_scoreless() {
        let mut state = FlorState::default();
        state.declare(PlayerId::new(0), a_flor());
        state.counter_declare(PlayerId::new(1), a_flor());

        let decl = state.declaration(PlayerId::new(1)).unwrap();
        assert!(decl.contraflor);
        assert_eq!(decl.points, 0);
    }

    #[test]
    fn test_clear() {
        let mut state = FlorState::default();
        state.declare(PlayerId::new(0), a_flor());
        state.clear();
        assert!(!state.any_declared());
    }
}
