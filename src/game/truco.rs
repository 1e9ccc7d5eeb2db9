//! Truco stakes escalation state.
//!
//! A three-level challenge chain over the hand's trick outcome. "The
//! word" is the right to raise: it starts with the team opposing each new
//! challenge and transfers to whichever team accepts. The hand is played
//! for 1 point at level 0 and 2/3/4 at accepted levels 1/2/3; a declined
//! level pays the prior level's value to the challenger.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::rotation::TeamId;

/// The three named stakes tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrucoLevel {
    Truco,
    Retruco,
    ValeCuatro,
}

impl TrucoLevel {
    /// Numeric level, 1-3.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            TrucoLevel::Truco => 1,
            TrucoLevel::Retruco => 2,
            TrucoLevel::ValeCuatro => 3,
        }
    }

    /// Spoken name of the call.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TrucoLevel::Truco => "truco",
            TrucoLevel::Retruco => "re-truco",
            TrucoLevel::ValeCuatro => "vale cuatro",
        }
    }
}

/// Points a hand is worth at a given numeric level (0 = no challenge).
#[must_use]
pub const fn points_at_level(level: u8) -> u8 {
    match level {
        0 => 1,
        1 => 2,
        2 => 3,
        3 => 4,
        _ => 1,
    }
}

/// Stakes state for the current hand.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrucoState {
    level: Option<TrucoLevel>,
    declarer: Option<PlayerId>,
    declarer_team: Option<TeamId>,
    accepted: bool,
    team_with_word: Option<TeamId>,
    pending_response: bool,
}

impl TrucoState {
    /// Current numeric level, 0 when no challenge was made.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level.map_or(0, TrucoLevel::as_u8)
    }

    /// The named tier of the current challenge, if any.
    #[must_use]
    pub fn named_level(&self) -> Option<TrucoLevel> {
        self.level
    }

    /// Player who made the most recent challenge.
    #[must_use]
    pub fn declarer(&self) -> Option<PlayerId> {
        self.declarer
    }

    /// Team of the most recent challenger.
    #[must_use]
    pub fn declarer_team(&self) -> Option<TeamId> {
        self.declarer_team
    }

    /// Whether the current level has been accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Team currently holding the right to raise.
    #[must_use]
    pub fn team_with_word(&self) -> Option<TeamId> {
        self.team_with_word
    }

    /// Whether a challenge is awaiting accept/decline.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending_response
    }

    /// Points the hand is currently worth.
    #[must_use]
    pub fn hand_points(&self) -> u8 {
        points_at_level(self.level())
    }

    /// Payout to the challenger when the current challenge is declined:
    /// the prior level's value.
    #[must_use]
    pub fn decline_payout(&self) -> u8 {
        points_at_level(self.level().saturating_sub(1))
    }

    /// Record a new challenge at `level` by `declarer`. The word moves to
    /// the opposing team until someone answers.
    pub fn declare(&mut self, level: TrucoLevel, declarer: PlayerId, declarer_team: TeamId) {
        self.level = Some(level);
        self.declarer = Some(declarer);
        self.declarer_team = Some(declarer_team);
        self.accepted = false;
        self.team_with_word = Some(declarer_team.opposing());
        self.pending_response = true;
    }

    /// Record acceptance by `responder_team`; the word transfers to it.
    pub fn accept(&mut self, responder_team: TeamId) {
        self.accepted = true;
        self.pending_response = false;
        self.team_with_word = Some(responder_team);
    }

    /// Reset for a new hand.
    pub fn clear(&mut self) {
        *self = TrucoState::default();
    }
}
