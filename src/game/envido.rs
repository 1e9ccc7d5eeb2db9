//! Envido bid chain state.
//!
//! The chain records every call made this hand together with the point
//! value the call carried *at the moment it was made* (falta envido is
//! score-dependent, so its value must be captured, not recomputed). The
//! accumulated pot is the sum of captured values; the decline payout is
//! the pot before the last call, with a reduced map for single-call
//! chains.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Points needed to win the game.
pub const GAME_TARGET: u8 = 30;

/// The three envido calls, in escalation flavor (any may follow any).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvidoCall {
    Envido,
    RealEnvido,
    FaltaEnvido,
}

impl EnvidoCall {
    /// Wire name of the call.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EnvidoCall::Envido => "envido",
            EnvidoCall::RealEnvido => "real_envido",
            EnvidoCall::FaltaEnvido => "falta_envido",
        }
    }

    /// Reduced payout when this call opens the chain and is declined.
    const fn declined_alone(self) -> u8 {
        match self {
            EnvidoCall::Envido => 1,
            EnvidoCall::RealEnvido => 2,
            EnvidoCall::FaltaEnvido => 3,
        }
    }
}

/// Falta envido value under the good/bad split: below half the target
/// both sides are "bad" and the pot is what the leader still needs; once
/// a side crosses into the "good" half, the pot is what that side needs.
#[must_use]
pub fn falta_points(scores: [u8; 2]) -> u8 {
    let [a, b] = scores;
    let good = GAME_TARGET / 2;
    match (a >= good, b >= good) {
        (false, false) | (true, true) => GAME_TARGET.saturating_sub(a.max(b)),
        (true, false) => GAME_TARGET.saturating_sub(a),
        (false, true) => GAME_TARGET.saturating_sub(b),
    }
}

/// One link of the chain: the call and its value when made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainedCall {
    pub call: EnvidoCall,
    pub value: u8,
}

/// The envido chain for the current hand. Inactive when empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EnvidoState {
    chain: SmallVec<[ChainedCall; 4]>,
    declarer: Option<PlayerId>,
}

impl EnvidoState {
    /// Whether a chain is open and awaiting accept/decline/raise.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.declarer.is_some()
    }

    /// Player who made the most recent call.
    #[must_use]
    pub fn declarer(&self) -> Option<PlayerId> {
        self.declarer
    }

    /// Calls made so far, oldest first.
    #[must_use]
    pub fn chain(&self) -> &[ChainedCall] {
        &self.chain
    }

    /// Accumulated pot: sum of every call's captured value.
    #[must_use]
    pub fn pot(&self) -> u8 {
        self.chain.iter().map(|c| c.value).sum()
    }

    /// Payout when the last call is declined: the pot before that call,
    /// except a single-call chain pays its reduced value.
    #[must_use]
    pub fn decline_payout(&self) -> u8 {
        match self.chain.as_slice() {
            [] => 0,
            [only] => only.call.declined_alone(),
            [prior @ .., _last] => prior.iter().map(|c| c.value).sum(),
        }
    }

    /// Append a call by `declarer`, capturing `value` for it.
    pub fn push(&mut self, declarer: PlayerId, call: EnvidoCall, value: u8) {
        self.chain.push(ChainedCall { call, value });
        self.declarer = Some(declarer);
    }

    /// Clear the chain (hand boundary, resolution, or flor cancellation).
    pub fn clear(&mut self) {
        self.chain.clear();
        self.declarer = None;
    }
}
