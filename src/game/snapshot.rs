//! Outward-facing state views.
//!
//! `PublicSnapshot` is safe to broadcast to the whole room: it carries no
//! hand contents, only table state and the (already public) betting
//! sub-states. `PlayerView` is the private per-participant payload.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::engine::Phase;
use super::envido::EnvidoState;
use super::flor::FlorState;
use super::truco::TrucoState;
use crate::cards::{Card, Flor, Hand};
use crate::core::PlayerId;
use crate::rotation::{Direction, TeamId};

/// Room-wide view of the table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicSnapshot {
    pub started: bool,
    pub phase: Phase,
    pub scores: [u8; 2],
    pub hand: u32,
    pub round: u8,
    pub muestra: Option<Card>,
    pub dealer: PlayerId,
    pub current_player: Option<PlayerId>,
    pub direction: Direction,
    pub trick: SmallVec<[(PlayerId, Card); 4]>,
    pub round_winners: SmallVec<[Option<PlayerId>; 3]>,
    pub envido: EnvidoState,
    pub flor: FlorState,
    pub truco: TrucoState,
    pub winner: Option<TeamId>,
}

/// Private view for one participant: their cards and what those cards are
/// currently worth.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerView {
    pub player: PlayerId,
    pub team: TeamId,
    pub hand: Hand,
    pub envido_total: u8,
    pub flor: Option<Flor>,
}
