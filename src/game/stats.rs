//! Game summary for the persistence collaborator.
//!
//! Produced once when a game concludes; the transport hands it to whatever
//! implements [`StatsRecorder`] (database, leaderboard, nothing).

use serde::{Deserialize, Serialize};

use crate::core::PlayerMap;
use crate::rotation::TeamId;

/// Per-player counters accumulated over one game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub cards_played: u32,
    pub rounds_won: u32,
    pub envidos_won: u32,
    pub flores_declared: u32,
    pub truco_calls: u32,
}

/// Everything the stats sink needs about a finished game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSummary {
    pub winner_team: TeamId,
    pub final_scores: [u8; 2],
    pub hands_played: u32,
    pub achievements: PlayerMap<PlayerStats>,
}

/// Persistence seam invoked once per concluded game.
pub trait StatsRecorder {
    fn record(&mut self, summary: &GameSummary);
}
