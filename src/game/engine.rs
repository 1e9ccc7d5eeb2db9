//! The truco table: round/hand state machine plus the three betting
//! sub-protocols.
//!
//! ## Flow
//!
//! One `TrucoGame` per room. The transport serializes actions per room and
//! calls one public operation at a time; each operation either rejects with
//! an [`ActionError`] (state untouched) or mutates state and appends
//! [`GameEvent`]s for the transport to drain with [`TrucoGame::take_events`].
//! Settlements (`HandFinished`, `GameOver`) go through the [`Announcer`]
//! queue instead; while it is non-empty every mutating operation fails with
//! `announcements_pending`.
//!
//! ## Structure of a hand
//!
//! Each hand: fresh 3-card deal plus muestra, dealer advances one seat per
//! hand, opener is the seat after the dealer. The first turn is the betting
//! window (envido and flor); the first card played, an envido resolution,
//! or an explicit skip moves the hand into trick play. Best of three
//! tricks; a parda records no winner for its slot. The hand is worth the
//! accepted truco level's points. First team to 30 wins the game.

use smallvec::SmallVec;

use super::announcer::Announcer;
use super::envido::{falta_points, EnvidoCall, EnvidoState, GAME_TARGET};
use super::error::ActionError;
use super::events::GameEvent;
use super::flor::{FlorState, FLOR_POINTS};
use super::gate::{actions_for, ActionKind};
use super::snapshot::{PlayerView, PublicSnapshot};
use super::stats::{GameSummary, PlayerStats};
use super::truco::{TrucoLevel, TrucoState};
use crate::cards::{deal, detect_flor, envido_total, hierarchy_of, Card, Flor, Hand};
use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::rotation::{RotationEngine, TeamConfig, TeamId};

use serde::{Deserialize, Serialize};

/// Coarse table phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Betting window: envido and flor are open, cards may also be played.
    FirstTurn,
    /// Tricks only (plus truco escalation).
    Playing,
    /// A team reached the target; only announcement delivery remains.
    GameOver,
}

/// One room's authoritative game state.
#[derive(Debug)]
pub struct TrucoGame {
    player_count: usize,
    rotation: RotationEngine<PlayerId>,
    rng: GameRng,
    started: bool,
    phase: Phase,
    hands: PlayerMap<Hand>,
    muestra: Option<Card>,
    trick: SmallVec<[(PlayerId, Card); 4]>,
    round: u8,
    hand_number: u32,
    round_winners: SmallVec<[Option<PlayerId>; 3]>,
    scores: [u8; 2],
    dealer: PlayerId,
    envido: EnvidoState,
    flor: FlorState,
    truco: TrucoState,
    events: Vec<GameEvent>,
    announcer: Announcer,
    stats: PlayerMap<PlayerStats>,
    hands_played: u32,
    winner: Option<TeamId>,
}

impl TrucoGame {
    /// Create a table for 2 (solo teams) or 4 (fixed pairs, seats 0/2 vs
    /// 1/3) players. The seed fixes every deal of the game.
    ///
    /// # Panics
    ///
    /// Panics if `player_count` is not 2 or 4.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        assert!(
            player_count == 2 || player_count == 4,
            "Truco is played by 2 or 4 players"
        );

        let config = if player_count == 2 {
            TeamConfig::Solo
        } else {
            TeamConfig::Pairs
        };
        let mut rotation = RotationEngine::new(1);
        rotation.initialize(PlayerId::all(player_count).collect(), &config);

        Self {
            player_count,
            rotation,
            rng: GameRng::new(seed),
            started: false,
            phase: Phase::FirstTurn,
            hands: PlayerMap::with_default(player_count),
            muestra: None,
            trick: SmallVec::new(),
            round: 1,
            hand_number: 0,
            round_winners: SmallVec::new(),
            scores: [0, 0],
            dealer: PlayerId::new(0),
            envido: EnvidoState::default(),
            flor: FlorState::default(),
            truco: TrucoState::default(),
            events: Vec::new(),
            announcer: Announcer::default(),
            stats: PlayerMap::with_default(player_count),
            hands_played: 0,
            winner: None,
        }
    }

    /// Deal the first hand and open play. Dealer is seat 0, the opener the
    /// seat after it.
    pub fn start(&mut self) {
        self.started = true;
        self.hand_number = 1;
        self.dealer = PlayerId::new(0);
        let opener = self.deal_hand();

        tracing::info!(players = self.player_count, %opener, "game started");
        self.events.push(GameEvent::NewHandStarted {
            hand: self.hand_number,
            dealer: self.dealer,
            opener,
        });
    }

    // ---- card play ----

    /// Play `card` from `player`'s hand into the current trick.
    pub fn play_card(&mut self, player: PlayerId, card: Card) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.ensure_announcements_idle()?;
        self.check_player(player)?;

        if self.truco.is_pending() && Some(self.team_of(player)) != self.truco.declarer_team() {
            return Err(ActionError::TrucoResponsePending);
        }
        if !self.rotation.is_turn_of(&player) {
            return Err(ActionError::NotYourTurn);
        }

        let hand = &mut self.hands[player];
        let index = hand
            .iter()
            .position(|c| *c == card)
            .ok_or(ActionError::CardNotFound)?;
        let played = hand.remove(index);

        self.trick.push((player, played));
        self.stats[player].cards_played += 1;
        self.events.push(GameEvent::CardPlayed {
            player,
            card: played,
        });
        tracing::debug!(%player, card = %played, "card played");

        if self.phase == Phase::FirstTurn {
            self.phase = Phase::Playing;
        }

        if let Some(info) = self.rotation.advance_turn() {
            self.events.push(GameEvent::TurnChanged {
                previous: info.previous,
                current: info.current,
                team: info.team,
                direction: info.direction,
            });
        }

        if self.trick.len() == self.player_count {
            self.resolve_round();
        }
        Ok(())
    }

    fn resolve_round(&mut self) {
        let Some(muestra) = self.muestra else { return };

        let best = self
            .trick
            .iter()
            .map(|(_, c)| hierarchy_of(*c, muestra).strength)
            .max()
            .unwrap_or(0);
        let mut at_best = self
            .trick
            .iter()
            .filter(|(_, c)| hierarchy_of(*c, muestra).strength == best);
        // A unique strongest card wins; a parda leaves the slot empty.
        let winner = match (at_best.next(), at_best.next()) {
            (Some((player, _)), None) => Some(*player),
            _ => None,
        };

        self.round_winners.push(winner);
        self.events.push(GameEvent::RoundFinished {
            round: self.round,
            winner,
        });
        tracing::debug!(round = self.round, ?winner, "round resolved");
        self.trick.clear();

        if let Some(player) = winner {
            self.stats[player].rounds_won += 1;
            // Round winner leads the next trick. On a parda the lead stays
            // wherever the rotation landed.
            self.rotation.force_set_current(&player);
        }
        self.round += 1;

        if self.round > 3 || self.hand_decided() {
            self.resolve_hand();
        }
    }

    fn team_round_wins(&self) -> [u8; 2] {
        let mut wins = [0u8; 2];
        for player in self.round_winners.iter().flatten() {
            wins[self.team_of(*player).0 as usize] += 1;
        }
        wins
    }

    fn hand_decided(&self) -> bool {
        self.team_round_wins().iter().any(|&w| w >= 2)
    }

    fn resolve_hand(&mut self) {
        let [a, b] = self.team_round_wins();
        let winner_team = if a > b {
            Some(TeamId(0))
        } else if b > a {
            Some(TeamId(1))
        } else {
            // Full tie after three rounds: nobody scores.
            None
        };

        let points = if winner_team.is_some() {
            self.truco.hand_points()
        } else {
            0
        };
        tracing::info!(hand = self.hand_number, ?winner_team, points, "hand resolved");
        self.announcer.enqueue(GameEvent::HandFinished {
            hand: self.hand_number,
            winner_team,
            points,
        });
        self.hands_played += 1;

        if let Some(team) = winner_team {
            if self.award_points(team, points) {
                return;
            }
        }
        self.start_new_hand();
    }

    fn start_new_hand(&mut self) {
        self.hand_number += 1;
        self.dealer = self.seat_after(self.dealer);
        let opener = self.deal_hand();
        self.events.push(GameEvent::NewHandStarted {
            hand: self.hand_number,
            dealer: self.dealer,
            opener,
        });
    }

    fn deal_hand(&mut self) -> PlayerId {
        let dealt = deal(&mut self.rng, self.player_count);
        self.hands = dealt.hands;
        self.muestra = Some(dealt.muestra);
        self.trick.clear();
        self.round = 1;
        self.round_winners.clear();
        self.envido.clear();
        self.flor.clear();
        self.truco.clear();
        self.phase = Phase::FirstTurn;

        let opener = self.seat_after(self.dealer);
        self.rotation.force_set_current(&opener);
        tracing::debug!(hand = self.hand_number, dealer = %self.dealer, muestra = %dealt.muestra, "hand dealt");
        opener
    }

    // ---- envido ----

    /// Open the envido chain or raise it with another call.
    pub fn declare_envido(&mut self, player: PlayerId, call: EnvidoCall) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.ensure_announcements_idle()?;
        self.check_player(player)?;

        if self.phase != Phase::FirstTurn {
            return Err(ActionError::EnvidoOnlyFirstTurn);
        }
        if self.flor.any_declared() {
            return Err(ActionError::FlorInProgress);
        }

        match self.envido.declarer() {
            None => {
                if !self.rotation.is_turn_of(&player) {
                    return Err(ActionError::NotYourTurn);
                }
                if self.flor_of(player).is_some() && !self.flor.has_declared(player) {
                    return Err(ActionError::MustDeclareFlor);
                }
            }
            Some(declarer) => {
                if self.team_of(player) == self.team_of(declarer) {
                    return Err(ActionError::NotResponderForRaise);
                }
            }
        }

        let value = self.call_value(call);
        self.envido.push(player, call, value);
        tracing::debug!(%player, call = call.name(), pot = self.envido.pot(), "envido declared");
        self.events.push(GameEvent::EnvidoDeclared {
            declarer: player,
            call,
            pot: self.envido.pot(),
        });
        Ok(())
    }

    /// Accept or decline the pending envido call.
    pub fn respond_envido(&mut self, player: PlayerId, accept: bool) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.ensure_announcements_idle()?;
        self.check_player(player)?;

        let declarer = self.envido.declarer().ok_or(ActionError::NoActiveEnvido)?;
        if self.team_of(player) == self.team_of(declarer) {
            return Err(ActionError::NotResponderForResponse);
        }

        if accept {
            self.resolve_envido();
        } else {
            let payout = self.envido.decline_payout();
            let team = self.team_of(declarer);
            tracing::debug!(%player, %team, payout, "envido declined");
            self.events.push(GameEvent::EnvidoDeclined {
                by: player,
                winner_team: team,
                points: payout,
            });
            self.envido.clear();
            self.phase = Phase::Playing;
            self.award_points(team, payout);
        }
        Ok(())
    }

    fn resolve_envido(&mut self) {
        let Some(muestra) = self.muestra else { return };

        let values: Vec<(PlayerId, u8)> = PlayerId::all(self.player_count)
            .map(|p| (p, envido_total(&self.hands[p], muestra)))
            .collect();
        let best = values.iter().map(|(_, v)| *v).max().unwrap_or(0);

        // Ties go to the seat closest to the opener in play order (the
        // "mano" rule).
        let opener = self.seat_after(self.dealer);
        let winner = (0..self.player_count)
            .map(|i| PlayerId(((opener.index() + i) % self.player_count) as u8))
            .find(|p| values[p.index()].1 == best)
            .unwrap_or(opener);

        let team = self.team_of(winner);
        let pot = self.envido.pot();
        self.stats[winner].envidos_won += 1;
        tracing::debug!(%winner, %team, pot, "envido resolved");
        self.events.push(GameEvent::EnvidoResolved {
            winner,
            winner_team: team,
            values,
            points: pot,
        });
        self.envido.clear();
        self.phase = Phase::Playing;
        self.award_points(team, pot);
    }

    /// Pass on the betting window without bidding; moves straight to trick
    /// play.
    pub fn skip_envido(&mut self, player: PlayerId) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.ensure_announcements_idle()?;
        self.check_player(player)?;

        if !self.rotation.is_turn_of(&player) {
            return Err(ActionError::NotYourTurn);
        }
        if self.phase != Phase::FirstTurn {
            return Err(ActionError::EnvidoOnlyFirstTurn);
        }
        if self.envido.is_active() {
            return Err(ActionError::EnvidoInProgress);
        }

        self.phase = Phase::Playing;
        self.events.push(GameEvent::EnvidoSkipped { player });
        Ok(())
    }

    fn call_value(&self, call: EnvidoCall) -> u8 {
        match call {
            EnvidoCall::Envido => 2,
            EnvidoCall::RealEnvido => 3,
            EnvidoCall::FaltaEnvido => falta_points(self.scores),
        }
    }

    // ---- flor ----

    /// Declare a flor; scores 3 points immediately and cancels any active
    /// envido chain without payout.
    pub fn declare_flor(&mut self, player: PlayerId) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.ensure_announcements_idle()?;
        self.check_player(player)?;

        if self.phase != Phase::FirstTurn {
            return Err(ActionError::FlorOnlyFirstTurn);
        }
        if self.flor.has_declared(player) {
            return Err(ActionError::FlorAlreadyDeclared);
        }
        match self.envido.declarer() {
            Some(declarer) => {
                if self.team_of(player) == self.team_of(declarer) {
                    return Err(ActionError::NotResponderForFlor);
                }
            }
            None => {
                if !self.rotation.is_turn_of(&player) {
                    return Err(ActionError::NotYourTurn);
                }
            }
        }

        let flor = self.flor_of(player).ok_or(ActionError::NoFlor)?;

        if self.envido.is_active() {
            self.envido.clear();
            self.events.push(GameEvent::EnvidoCanceled { by: player });
        }

        let team = self.team_of(player);
        self.flor.declare(player, flor);
        self.stats[player].flores_declared += 1;
        tracing::debug!(%player, %team, ?flor, "flor declared");
        self.events.push(GameEvent::FlorDeclared {
            player,
            team,
            flor,
            points: FLOR_POINTS,
        });
        self.award_points(team, FLOR_POINTS);
        Ok(())
    }

    /// Counter-declare against an earlier flor. Recorded as a flagged
    /// declaration only; no comparison or repayment.
    pub fn declare_contraflor(&mut self, player: PlayerId) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.ensure_announcements_idle()?;
        self.check_player(player)?;

        if self.phase != Phase::FirstTurn {
            return Err(ActionError::ContraflorOnlyFirstTurn);
        }
        if !self.flor.declarations().any(|(p, _)| p != player) {
            return Err(ActionError::NoFlorToContraflor);
        }
        if self.flor.has_declared(player) {
            return Err(ActionError::FlorAlreadyDeclared);
        }
        if !self.rotation.is_turn_of(&player) {
            return Err(ActionError::NotYourTurn);
        }

        let flor = self.flor_of(player).ok_or(ActionError::NoFlor)?;
        self.flor.counter_declare(player, flor);
        self.stats[player].flores_declared += 1;
        self.events.push(GameEvent::ContraflorDeclared { player, flor });
        Ok(())
    }

    // ---- truco ----

    /// Open or raise the stakes. Opening requires the caller's turn in the
    /// playing phase; raising requires the caller's team to hold the word
    /// (a raise over a pending challenge is the responder's counter-raise).
    pub fn declare_truco(&mut self, player: PlayerId, level: TrucoLevel) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.ensure_announcements_idle()?;
        self.check_player(player)?;

        if self.phase != Phase::Playing {
            return Err(ActionError::NotPlayingPhase);
        }

        let team = self.team_of(player);
        let current = self.truco.level();
        if current == 0 {
            if !self.rotation.is_turn_of(&player) {
                return Err(ActionError::NotYourTurn);
            }
        } else if self.truco.team_with_word() != Some(team) {
            return Err(ActionError::NoWord);
        }
        if level.as_u8() <= current {
            return Err(ActionError::InvalidLevel { level });
        }

        self.truco.declare(level, player, team);
        self.stats[player].truco_calls += 1;
        tracing::debug!(%player, %team, level = level.name(), "truco declared");
        self.events.push(GameEvent::TrucoDeclared {
            declarer: player,
            declarer_team: team,
            level,
            team_with_word: team.opposing(),
        });
        Ok(())
    }

    /// Accept or decline the pending truco challenge. Declining ends the
    /// hand immediately, paying the challenger the prior level's value.
    pub fn respond_truco(&mut self, player: PlayerId, accept: bool) -> Result<(), ActionError> {
        self.ensure_active()?;
        self.ensure_announcements_idle()?;
        self.check_player(player)?;

        if !self.truco.is_pending() {
            return Err(ActionError::NoPendingTruco);
        }
        let Some(level) = self.truco.named_level() else {
            return Err(ActionError::NoPendingTruco);
        };
        let team = self.team_of(player);
        if Some(team) == self.truco.declarer_team() {
            return Err(ActionError::CantRespondOwnTruco);
        }

        if accept {
            self.truco.accept(team);
            tracing::debug!(%player, %team, level = level.name(), "truco accepted");
            self.events.push(GameEvent::TrucoAccepted {
                responder: player,
                responder_team: team,
                level,
                points: self.truco.hand_points(),
            });
        } else {
            let points = self.truco.decline_payout();
            let winner_team = self.truco.declarer_team().unwrap_or(team.opposing());
            tracing::debug!(%player, %winner_team, points, "truco declined, hand ends");
            self.events.push(GameEvent::TrucoDeclined {
                responder: player,
                winner_team,
                points,
            });
            self.announcer.enqueue(GameEvent::HandFinished {
                hand: self.hand_number,
                winner_team: Some(winner_team),
                points,
            });
            self.hands_played += 1;
            if !self.award_points(winner_team, points) {
                self.start_new_hand();
            }
        }
        Ok(())
    }

    // ---- scoring ----

    /// Returns true when the award ends the game.
    fn award_points(&mut self, team: TeamId, points: u8) -> bool {
        let slot = &mut self.scores[team.0 as usize];
        *slot = slot.saturating_add(points);
        tracing::info!(%team, points, scores = ?self.scores, "points awarded");

        if self.scores[team.0 as usize] >= GAME_TARGET {
            self.winner = Some(team);
            self.phase = Phase::GameOver;
            self.announcer.enqueue(GameEvent::GameOver {
                winner_team: team,
                final_scores: self.scores,
            });
            tracing::info!(%team, scores = ?self.scores, "game over");
            true
        } else {
            false
        }
    }

    // ---- queries ----

    /// Legal actions for `player` right now. Empty while announcements are
    /// draining or the game is over.
    #[must_use]
    pub fn available_actions(&self, player: PlayerId) -> Vec<ActionKind> {
        actions_for(self, player)
    }

    /// Room-wide snapshot, free of hand contents.
    #[must_use]
    pub fn snapshot(&self) -> PublicSnapshot {
        PublicSnapshot {
            started: self.started,
            phase: self.phase,
            scores: self.scores,
            hand: self.hand_number,
            round: self.round,
            muestra: self.muestra,
            dealer: self.dealer,
            current_player: self.rotation.current().copied(),
            direction: self.rotation.direction(),
            trick: self.trick.clone(),
            round_winners: self.round_winners.clone(),
            envido: self.envido.clone(),
            flor: self.flor.clone(),
            truco: self.truco.clone(),
            winner: self.winner,
        }
    }

    /// Private payload for one participant.
    pub fn player_view(&self, player: PlayerId) -> Result<PlayerView, ActionError> {
        self.check_player(player)?;
        let hand = self.hands[player].clone();
        let (envido, flor) = match self.muestra {
            Some(muestra) => (envido_total(&hand, muestra), detect_flor(&hand, muestra)),
            None => (0, None),
        };
        Ok(PlayerView {
            player,
            team: self.team_of(player),
            hand,
            envido_total: envido,
            flor,
        })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn scores(&self) -> [u8; 2] {
        self.scores
    }

    #[must_use]
    pub fn winner(&self) -> Option<TeamId> {
        self.winner
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    #[must_use]
    pub fn round(&self) -> u8 {
        self.round
    }

    #[must_use]
    pub fn dealer(&self) -> PlayerId {
        self.dealer
    }

    #[must_use]
    pub fn muestra(&self) -> Option<Card> {
        self.muestra
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.rotation.current().copied()
    }

    /// Team of a seated player; pairs 0/2 vs 1/3 at a 4-seat table.
    #[must_use]
    pub fn team_of(&self, player: PlayerId) -> TeamId {
        self.rotation
            .team_of(&player)
            .unwrap_or(TeamId(player.0 % 2))
    }

    #[must_use]
    pub fn envido_state(&self) -> &EnvidoState {
        &self.envido
    }

    #[must_use]
    pub fn flor_state(&self) -> &FlorState {
        &self.flor
    }

    #[must_use]
    pub fn truco_state(&self) -> &TrucoState {
        &self.truco
    }

    /// Drain accumulated events for broadcast, in order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Next queued settlement announcement, if any.
    #[must_use]
    pub fn pending_announcement(&self) -> Option<&GameEvent> {
        self.announcer.pending()
    }

    /// Pop the next settlement announcement for broadcast. The transport
    /// calls this once per item after honoring [`Announcer::DELAY`].
    pub fn deliver_announcement(&mut self) -> Option<GameEvent> {
        self.announcer.deliver()
    }

    /// Summary for the stats collaborator, once the game has a winner.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        self.winner.map(|winner_team| GameSummary {
            winner_team,
            final_scores: self.scores,
            hands_played: self.hands_played,
            achievements: self.stats.clone(),
        })
    }

    // ---- helpers ----

    pub(crate) fn flor_of(&self, player: PlayerId) -> Option<Flor> {
        let muestra = self.muestra?;
        detect_flor(&self.hands[player], muestra)
    }

    fn seat_after(&self, seat: PlayerId) -> PlayerId {
        PlayerId(((seat.index() + 1) % self.player_count) as u8)
    }

    fn check_player(&self, player: PlayerId) -> Result<(), ActionError> {
        if player.index() < self.player_count {
            Ok(())
        } else {
            Err(ActionError::PlayerNotFound)
        }
    }

    fn ensure_active(&self) -> Result<(), ActionError> {
        if self.started && self.winner.is_none() {
            Ok(())
        } else {
            Err(ActionError::GameNotActive)
        }
    }

    fn ensure_announcements_idle(&self) -> Result<(), ActionError> {
        if self.announcer.is_idle() {
            Ok(())
        } else {
            Err(ActionError::AnnouncementsPending)
        }
    }
}
