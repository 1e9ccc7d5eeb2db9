//! Discrete events produced by the game engine.
//!
//! The core never does I/O: events accumulate inside `TrucoGame` and the
//! transport drains them with `take_events()` after each call, broadcasting
//! them in order. Settlement events (`HandFinished`, `GameOver`) are paced
//! separately through the [`Announcer`](super::announcer::Announcer).

use serde::{Deserialize, Serialize};

use super::envido::EnvidoCall;
use super::truco::TrucoLevel;
use crate::cards::{Card, Flor};
use crate::core::PlayerId;
use crate::rotation::{Direction, TeamId};

/// Everything the transport may need to broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    TurnChanged {
        previous: Option<PlayerId>,
        current: PlayerId,
        team: Option<TeamId>,
        direction: Direction,
    },
    DirectionChanged {
        direction: Direction,
    },
    PlayerSkipped {
        skipped: PlayerId,
        next: PlayerId,
    },
    CardPlayed {
        player: PlayerId,
        card: Card,
    },
    RoundFinished {
        round: u8,
        /// `None` on a parda: no winner is recorded for the slot.
        winner: Option<PlayerId>,
    },
    EnvidoDeclared {
        declarer: PlayerId,
        call: EnvidoCall,
        pot: u8,
    },
    EnvidoDeclined {
        by: PlayerId,
        winner_team: TeamId,
        points: u8,
    },
    EnvidoResolved {
        winner: PlayerId,
        winner_team: TeamId,
        values: Vec<(PlayerId, u8)>,
        points: u8,
    },
    EnvidoCanceled {
        by: PlayerId,
    },
    EnvidoSkipped {
        player: PlayerId,
    },
    FlorDeclared {
        player: PlayerId,
        team: TeamId,
        flor: Flor,
        points: u8,
    },
    ContraflorDeclared {
        player: PlayerId,
        flor: Flor,
    },
    TrucoDeclared {
        declarer: PlayerId,
        declarer_team: TeamId,
        level: TrucoLevel,
        team_with_word: TeamId,
    },
    TrucoAccepted {
        responder: PlayerId,
        responder_team: TeamId,
        level: TrucoLevel,
        points: u8,
    },
    TrucoDeclined {
        responder: PlayerId,
        winner_team: TeamId,
        points: u8,
    },
    HandFinished {
        hand: u32,
        winner_team: Option<TeamId>,
        points: u8,
    },
    NewHandStarted {
        hand: u32,
        dealer: PlayerId,
        opener: PlayerId,
    },
    GameOver {
        winner_team: TeamId,
        final_scores: [u8; 2],
    },
}
