//! Structured failures for every public game operation.
//!
//! An invalid action never mutates state and never panics across the API
//! boundary; the transport surfaces the stable `reason()` code verbatim to
//! the acting participant, so codes are part of the wire contract.

use thiserror::Error;

use super::truco::TrucoLevel;

/// Why a game action was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("game has not started or is already over")]
    GameNotActive,
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("only the opposing side may raise the envido")]
    NotResponderForRaise,
    #[error("only the opposing side may answer the envido")]
    NotResponderForResponse,
    #[error("only the envido responder may declare flor now")]
    NotResponderForFlor,
    #[error("envido can only be opened on the first turn")]
    EnvidoOnlyFirstTurn,
    #[error("flor can only be declared on the first turn")]
    FlorOnlyFirstTurn,
    #[error("contraflor can only be declared on the first turn")]
    ContraflorOnlyFirstTurn,
    #[error("no truco challenge is awaiting a response")]
    NoPendingTruco,
    #[error("no envido chain is active")]
    NoActiveEnvido,
    #[error("truco can only be declared in the playing phase")]
    NotPlayingPhase,
    #[error("stakes level {level:?} does not raise the current level")]
    InvalidLevel { level: TrucoLevel },
    #[error("no such player at this table")]
    PlayerNotFound,
    #[error("card is not in this player's hand")]
    CardNotFound,
    #[error("this hand has no flor")]
    NoFlor,
    #[error("no flor was declared to counter")]
    NoFlorToContraflor,
    #[error("a declared flor blocks the envido this hand")]
    FlorInProgress,
    #[error("a team cannot answer its own truco")]
    CantRespondOwnTruco,
    #[error("your team does not hold the word")]
    NoWord,
    #[error("a held flor must be declared before bidding")]
    MustDeclareFlor,
    #[error("flor was already declared by this player")]
    FlorAlreadyDeclared,
    #[error("an envido chain is awaiting a response")]
    EnvidoInProgress,
    #[error("a truco challenge is awaiting a response")]
    TrucoResponsePending,
    #[error("announcements are still being delivered")]
    AnnouncementsPending,
}

impl ActionError {
    /// Stable snake_case reason code for the transport layer.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            ActionError::GameNotActive => "game_not_active",
            ActionError::NotYourTurn => "not_your_turn",
            ActionError::NotResponderForRaise => "not_responder_for_raise",
            ActionError::NotResponderForResponse => "not_responder_for_response",
            ActionError::NotResponderForFlor => "not_responder_for_flor",
            ActionError::EnvidoOnlyFirstTurn => "envido_only_first_turn",
            ActionError::FlorOnlyFirstTurn => "flor_only_first_turn",
            ActionError::ContraflorOnlyFirstTurn => "contraflor_only_first_turn",
            ActionError::NoPendingTruco => "no_pending_truco",
            ActionError::NoActiveEnvido => "no_active_envido",
            ActionError::NotPlayingPhase => "not_playing_phase",
            ActionError::InvalidLevel { .. } => "invalid_level",
            ActionError::PlayerNotFound => "player_not_found",
            ActionError::CardNotFound => "card_not_found",
            ActionError::NoFlor => "no_flor",
            ActionError::NoFlorToContraflor => "no_flor_to_contraflor",
            ActionError::FlorInProgress => "flor_in_progress",
            ActionError::CantRespondOwnTruco => "cant_respond_own_truco",
            ActionError::NoWord => "no_word",
            ActionError::MustDeclareFlor => "must_declare_flor",
            ActionError::FlorAlreadyDeclared => "flor_already_declared",
            ActionError::EnvidoInProgress => "envido_in_progress",
            ActionError::TrucoResponsePending => "truco_response_pending",
            ActionError::AnnouncementsPending => "announcements_pending",
        }
    }
}
