//! Legal-action computation.
//!
//! A pure derived view over the composite state: given a participant, the
//! intersection of rotation, phase, and the three betting sub-protocol
//! states yields exactly the actions that would succeed right now. This is
//! what the transport broadcasts as each player's button set, and it
//! doubles as the test surface for the gating rules.

use serde::{Deserialize, Serialize};

use super::engine::{Phase, TrucoGame};
use crate::core::PlayerId;

/// An action a participant could legally take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PlayCard,
    Envido,
    RealEnvido,
    FaltaEnvido,
    AcceptEnvido,
    DeclineEnvido,
    Flor,
    Contraflor,
    Truco,
    AcceptTruco,
    DeclineTruco,
}

/// Compute the legal action set for `player`.
pub(crate) fn actions_for(game: &TrucoGame, player: PlayerId) -> Vec<ActionKind> {
    let mut actions = Vec::new();

    if !game.is_started()
        || game.winner().is_some()
        || game.pending_announcement().is_some()
        || player.index() >= game.player_count()
    {
        return actions;
    }

    let my_turn = game.current_player() == Some(player);
    let my_team = game.team_of(player);
    let first_turn = game.phase() == Phase::FirstTurn;
    let flor_declared = game.flor_state().any_declared();
    let undeclared_flor =
        game.flor_of(player).is_some() && !game.flor_state().has_declared(player);

    // Envido window: first turn, no flor on the table.
    if first_turn && !flor_declared {
        match game.envido_state().declarer() {
            None => {
                if my_turn && !undeclared_flor {
                    actions.extend([
                        ActionKind::Envido,
                        ActionKind::RealEnvido,
                        ActionKind::FaltaEnvido,
                    ]);
                }
            }
            Some(declarer) => {
                if game.team_of(declarer) != my_team {
                    if undeclared_flor {
                        // A held flor preempts answering the bid.
                        actions.push(ActionKind::Flor);
                    } else {
                        actions.extend([
                            ActionKind::AcceptEnvido,
                            ActionKind::DeclineEnvido,
                            ActionKind::Envido,
                            ActionKind::RealEnvido,
                            ActionKind::FaltaEnvido,
                        ]);
                    }
                }
            }
        }
    }

    // Flor window.
    if first_turn && undeclared_flor {
        if !game.envido_state().is_active() && my_turn && !actions.contains(&ActionKind::Flor) {
            actions.push(ActionKind::Flor);
        }
        if flor_declared && my_turn {
            actions.push(ActionKind::Contraflor);
        }
    }

    // Truco window.
    if game.phase() == Phase::Playing {
        let truco = game.truco_state();
        if truco.level() == 0 {
            if my_turn {
                actions.push(ActionKind::Truco);
            }
        } else if truco.is_pending() {
            if Some(my_team) != truco.declarer_team() {
                actions.push(ActionKind::AcceptTruco);
                actions.push(ActionKind::DeclineTruco);
                if truco.level() < 3 {
                    // Counter-raise instead of answering.
                    actions.push(ActionKind::Truco);
                }
            }
        } else if truco.is_accepted()
            && truco.team_with_word() == Some(my_team)
            && truco.level() < 3
        {
            actions.push(ActionKind::Truco);
        }
    }

    // Card play: on turn, unless a pending truco blocks the responding
    // side.
    let blocked = game.truco_state().is_pending()
        && Some(my_team) != game.truco_state().declarer_team();
    if my_turn && !blocked {
        actions.push(ActionKind::PlayCard);
    }

    actions
}
