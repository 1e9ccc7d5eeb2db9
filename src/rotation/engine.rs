//! Generic turn rotation engine.
//!
//! Tracks whose turn it is in a room-scoped game: an ordered participant
//! list, a cursor, a direction of play, a one-shot deferred skip, and team
//! membership. It knows nothing about cards or rules; games own all
//! reactions to its transitions, either by consuming the returned
//! `TurnInfo` or through an optional [`RotationObserver`].
//!
//! The engine is generic over the participant key `P` so the same rotation
//! logic serves every game in a room server: the truco engine instantiates
//! it with `PlayerId`, while a transport layer could key it directly by
//! session identity.

use serde::{Deserialize, Serialize};
use std::hash::Hash;

use super::teams::{TeamConfig, TeamId, TeamTable};

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Seat order (clockwise).
    #[default]
    Forward,
    /// Reverse seat order (counterclockwise).
    Backward,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Result of a turn advance: who held the turn, who holds it now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInfo<P> {
    /// Participant whose turn just ended.
    pub previous: Option<P>,
    /// Participant whose turn begins.
    pub current: P,
    /// Team of the new current participant, if assigned.
    pub team: Option<TeamId>,
    /// Direction in effect after the advance.
    pub direction: Direction,
    /// Participant skipped over by this advance, if a skip was consumed.
    pub skipped: Option<P>,
}

/// Synchronous notification hooks for rotation transitions.
///
/// All methods default to no-ops; games that drive the engine directly can
/// ignore this and use the returned `TurnInfo` instead.
pub trait RotationObserver<P> {
    /// Called after every successful `advance_turn`.
    fn on_turn_change(&mut self, _info: &TurnInfo<P>) {}

    /// Called when the direction of play flips.
    fn on_direction_change(&mut self, _direction: Direction) {}

    /// Called when a pending skip is consumed, with the skipped participant
    /// and the participant who received the turn instead.
    fn on_skip(&mut self, _skipped: &P, _next: &P) {}
}

/// Turn and team rotation for one room.
///
/// Lifetime spans the room session: `initialize` resets everything for a
/// fresh game, `force_set_current` repositions the cursor at hand
/// boundaries, and add/remove keep the cursor valid as participants come
/// and go.
pub struct RotationEngine<P> {
    participants: Vec<P>,
    current: usize,
    direction: Direction,
    skip_pending: bool,
    max_skips: usize,
    consecutive_skips: usize,
    teams: TeamTable<P>,
    observer: Option<Box<dyn RotationObserver<P> + Send>>,
}

impl<P: std::fmt::Debug> std::fmt::Debug for RotationEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationEngine")
            .field("participants", &self.participants)
            .field("current", &self.current)
            .field("direction", &self.direction)
            .field("skip_pending", &self.skip_pending)
            .finish_non_exhaustive()
    }
}

impl<P: Clone + Eq + Hash + std::fmt::Debug> RotationEngine<P> {
    /// Create an empty engine. `max_skips` caps consecutive consumed skips
    /// (1 for truco/uno-style games).
    #[must_use]
    pub fn new(max_skips: usize) -> Self {
        Self {
            participants: Vec::new(),
            current: 0,
            direction: Direction::Forward,
            skip_pending: false,
            max_skips,
            consecutive_skips: 0,
            teams: TeamTable::default(),
            observer: None,
        }
    }

    /// Install notification hooks, replacing any previous observer.
    pub fn set_observer(&mut self, observer: Box<dyn RotationObserver<P> + Send>) {
        self.observer = Some(observer);
    }

    /// Reset all state and seat `participants` in order, assigning teams
    /// per `config`.
    ///
    /// # Panics
    ///
    /// Panics if `participants` is empty.
    pub fn initialize(&mut self, participants: Vec<P>, config: &TeamConfig<P>) {
        assert!(!participants.is_empty(), "Must have at least 1 participant");

        self.teams = TeamTable::assign(&participants, config);
        self.participants = participants;
        self.current = 0;
        self.direction = Direction::Forward;
        self.skip_pending = false;
        self.consecutive_skips = 0;

        tracing::debug!(
            participants = self.participants.len(),
            teams = self.teams.team_count(),
            "rotation initialized"
        );
    }

    /// Reset cursor, direction, and skip state, keeping participants and
    /// teams.
    pub fn reset(&mut self) {
        self.current = 0;
        self.direction = Direction::Forward;
        self.skip_pending = false;
        self.consecutive_skips = 0;
    }

    /// Number of seated participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// True when nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Seated participants in order.
    #[must_use]
    pub fn participants(&self) -> &[P] {
        &self.participants
    }

    /// Participant holding the turn, if any are seated.
    #[must_use]
    pub fn current(&self) -> Option<&P> {
        self.participants.get(self.current)
    }

    /// Participant who would receive the turn next, ignoring pending skips.
    #[must_use]
    pub fn peek_next(&self) -> Option<&P> {
        if self.participants.is_empty() {
            return None;
        }
        self.participants.get(self.step_from(self.current))
    }

    /// Whether it is `participant`'s turn.
    #[must_use]
    pub fn is_turn_of(&self, participant: &P) -> bool {
        self.current() == Some(participant)
    }

    /// Current direction of play.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Team of `participant`, if seated and assigned.
    #[must_use]
    pub fn team_of(&self, participant: &P) -> Option<TeamId> {
        self.teams.team_of(participant)
    }

    /// Teammates of `participant`, excluding the participant itself.
    #[must_use]
    pub fn teammates_of(&self, participant: &P) -> Vec<P> {
        match self.teams.team_of(participant) {
            Some(team) => self
                .teams
                .members_of(team)
                .iter()
                .filter(|p| *p != participant)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// All members of `team`, in seating order of assignment.
    #[must_use]
    pub fn members_of(&self, team: TeamId) -> &[P] {
        self.teams.members_of(team)
    }

    /// Move the turn to the next participant, honoring at most one pending
    /// skip. Skips are never compounded: one deferred skip is consumed per
    /// call, and only while under the consecutive-skip cap (an over-cap
    /// skip stays armed for a later advance).
    ///
    /// Returns `None` when nobody is seated.
    pub fn advance_turn(&mut self) -> Option<TurnInfo<P>> {
        if self.participants.is_empty() {
            return None;
        }

        let previous = self.current().cloned();
        let mut skipped = None;

        self.current = self.step_from(self.current);
        if self.skip_pending && self.consecutive_skips < self.max_skips {
            skipped = self.current().cloned();
            self.current = self.step_from(self.current);
            self.skip_pending = false;
            self.consecutive_skips += 1;
        } else {
            self.consecutive_skips = 0;
        }

        // step_from keeps the cursor within the (non-empty) list.
        let current = self.participants[self.current].clone();
        let info = TurnInfo {
            previous,
            team: self.teams.team_of(&current),
            direction: self.direction,
            skipped: skipped.clone(),
            current,
        };

        tracing::debug!(?info.previous, ?info.current, ?info.skipped, "turn advanced");

        if let Some(observer) = self.observer.as_mut() {
            if let Some(skipped) = &skipped {
                observer.on_skip(skipped, &info.current);
            }
            observer.on_turn_change(&info);
        }

        Some(info)
    }

    /// Flip the direction of play; returns the new direction.
    pub fn reverse_direction(&mut self) -> Direction {
        self.direction = self.direction.flipped();

        tracing::debug!(direction = ?self.direction, "direction reversed");

        if let Some(observer) = self.observer.as_mut() {
            observer.on_direction_change(self.direction);
        }
        self.direction
    }

    /// Arm the one-shot skip: the next `advance_turn` passes over one
    /// participant.
    pub fn request_skip_next(&mut self) {
        self.skip_pending = true;
    }

    /// Move the cursor directly to `participant`. Returns false (leaving
    /// state untouched) if the participant is not seated.
    pub fn force_set_current(&mut self, participant: &P) -> bool {
        match self.participants.iter().position(|p| p == participant) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    /// Seat a new participant at the end of the order. With `team: None`
    /// the participant gets a fresh team of their own. Returns false if
    /// already seated.
    pub fn add_participant(&mut self, participant: P, team: Option<TeamId>) -> bool {
        if self.participants.contains(&participant) {
            return false;
        }

        let team = team.unwrap_or_else(|| self.teams.fresh_team());
        self.teams.insert(participant.clone(), team);
        self.participants.push(participant);
        true
    }

    /// Remove a seated participant, adjusting the cursor so it still refers
    /// to an active participant. Returns false if not seated.
    pub fn remove_participant(&mut self, participant: &P) -> bool {
        let Some(index) = self.participants.iter().position(|p| p == participant) else {
            return false;
        };

        self.participants.remove(index);
        self.teams.remove(participant);

        if self.participants.is_empty() {
            self.current = 0;
        } else if self.current >= self.participants.len() {
            self.current = 0;
        } else if index <= self.current {
            self.current = self.current.saturating_sub(1);
        }

        true
    }

    /// Drop all participants and teams.
    pub fn clear(&mut self) {
        self.participants.clear();
        self.teams.clear();
        self.reset();
    }

    fn step_from(&self, index: usize) -> usize {
        let len = self.participants.len();
        match self.direction {
            Direction::Forward => (index + 1) % len,
            Direction::Backward => (index + len - 1) % len,
        }
    }
}
