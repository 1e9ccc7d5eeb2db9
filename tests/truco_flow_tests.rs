//! End-to-end table scenarios: dealing, betting, trick play, settlement.

use truco_core::{
    detect_flor, envido_total, hierarchy_of, ActionError, EnvidoCall, GameEvent, Phase, PlayerId,
    Suit, Tier, TrucoGame, TrucoLevel,
};

/// Scan seeds for a first deal where neither player holds a flor, keeping
/// the envido paths open.
fn game_without_flors() -> TrucoGame {
    for seed in 0u64.. {
        let mut game = TrucoGame::new(2, seed);
        game.start();
        game.take_events();
        let no_flor = |p: u8| {
            game.player_view(PlayerId::new(p))
                .is_ok_and(|v| v.flor.is_none())
        };
        if no_flor(0) && no_flor(1) {
            return game;
        }
    }
    unreachable!("some deal has no flor")
}

fn opener(game: &TrucoGame) -> PlayerId {
    game.current_player().expect("game started")
}

fn other(player: PlayerId) -> PlayerId {
    PlayerId::new(1 - player.0)
}

fn drain_announcements(game: &mut TrucoGame) {
    while game.deliver_announcement().is_some() {}
}

#[test]
fn pieza_detection_reflects_the_deal_before_any_bid() {
    // Find a deal where the opener holds a promoted card of the muestra
    // suit, and check the view exposes it before a single bid is made.
    for seed in 0u64.. {
        let mut game = TrucoGame::new(2, seed);
        game.start();
        let muestra = game.muestra().expect("dealt");
        if muestra.suit != Suit::Espada {
            continue;
        }
        let view = game.player_view(opener(&game)).unwrap();
        let pieza = view
            .hand
            .iter()
            .find(|c| hierarchy_of(**c, muestra).tier == Tier::Pieza);
        let Some(pieza) = pieza else { continue };

        assert_eq!(pieza.suit, Suit::Espada);
        // The derived view matches the evaluator exactly.
        assert_eq!(view.envido_total, envido_total(&view.hand, muestra));
        assert_eq!(view.flor, detect_flor(&view.hand, muestra));
        assert!(view.envido_total >= 27);
        return;
    }
}

#[test]
fn envido_decline_pays_the_reduced_single_call_value() {
    let mut game = game_without_flors();
    let caller = opener(&game);

    game.declare_envido(caller, EnvidoCall::Envido).unwrap();
    game.respond_envido(other(caller), false).unwrap();

    // A declined lone envido pays 1, not its face value of 2.
    let caller_team = game.team_of(caller);
    assert_eq!(game.scores()[caller_team.0 as usize], 1);
    assert_eq!(game.scores()[1 - caller_team.0 as usize], 0);
    assert_eq!(game.phase(), Phase::Playing);

    let events = game.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::EnvidoDeclined { points: 1, .. }
    )));
}

#[test]
fn envido_raise_chain_decline_pays_prior_pot() {
    let mut game = game_without_flors();
    let caller = opener(&game);
    let responder = other(caller);

    game.declare_envido(caller, EnvidoCall::Envido).unwrap();
    game.declare_envido(responder, EnvidoCall::RealEnvido).unwrap();

    // The word bounced back: only the original caller's side may answer.
    assert_eq!(
        game.respond_envido(responder, false),
        Err(ActionError::NotResponderForResponse)
    );
    game.respond_envido(caller, false).unwrap();

    // envido(2) + real(3): declining the real pays the pot before it.
    let responder_team = game.team_of(responder);
    assert_eq!(game.scores()[responder_team.0 as usize], 2);
}

#[test]
fn envido_accept_awards_the_full_pot_to_the_best_hand() {
    let mut game = game_without_flors();
    let caller = opener(&game);
    let muestra = game.muestra().unwrap();

    let totals: Vec<u8> = (0..2)
        .map(|p| {
            let view = game.player_view(PlayerId::new(p)).unwrap();
            envido_total(&view.hand, muestra)
        })
        .collect();

    game.declare_envido(caller, EnvidoCall::Envido).unwrap();
    game.respond_envido(other(caller), true).unwrap();

    let best = *totals.iter().max().unwrap();
    // Ties go to the opener (the "mano"); otherwise highest total wins.
    let expected_winner = if totals[caller.index()] >= totals[other(caller).index()] {
        caller
    } else {
        other(caller)
    };
    let winner_team = game.team_of(expected_winner);
    assert_eq!(game.scores()[winner_team.0 as usize], 2);
    assert_eq!(game.phase(), Phase::Playing);

    let events = game.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::EnvidoResolved { winner, points: 2, .. }
            if *winner == expected_winner && totals[winner.index()] == best
    )));
}

#[test]
fn falta_envido_accept_at_love_all_ends_the_game() {
    let mut game = game_without_flors();
    let caller = opener(&game);

    game.declare_envido(caller, EnvidoCall::FaltaEnvido).unwrap();
    game.respond_envido(other(caller), true).unwrap();

    // 30 points at 0-0: the winner takes the game outright.
    let winner = game.winner().expect("falta for 30 decides the game");
    assert_eq!(game.scores()[winner.0 as usize], 30);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(
        game.play_card(caller, "1-espada".parse().unwrap()),
        Err(ActionError::GameNotActive)
    );
}

#[test]
fn envido_is_first_turn_only_and_single_per_side_rules_hold() {
    let mut game = game_without_flors();
    let first = opener(&game);

    // The declarer cannot raise their own call.
    game.declare_envido(first, EnvidoCall::Envido).unwrap();
    assert_eq!(
        game.declare_envido(first, EnvidoCall::RealEnvido),
        Err(ActionError::NotResponderForRaise)
    );

    // Skipping is impossible while the chain is open.
    assert_eq!(
        game.skip_envido(first),
        Err(ActionError::EnvidoInProgress)
    );
}

#[test]
fn truco_escalation_decline_pays_the_prior_level() {
    let mut game = game_without_flors();
    let first = opener(&game);
    let second = other(first);
    game.skip_envido(first).unwrap();

    game.declare_truco(first, TrucoLevel::Truco).unwrap();
    game.respond_truco(second, true).unwrap();

    // The word is with the accepting side now; the original declarer
    // cannot raise.
    assert_eq!(
        game.declare_truco(first, TrucoLevel::Retruco),
        Err(ActionError::NoWord)
    );
    game.declare_truco(second, TrucoLevel::Retruco).unwrap();
    game.respond_truco(first, false).unwrap();

    // Retruco declined pays the truco value (2) and ends the hand.
    let second_team = game.team_of(second);
    assert_eq!(game.scores()[second_team.0 as usize], 2);
    assert!(matches!(
        game.pending_announcement(),
        Some(GameEvent::HandFinished {
            winner_team: Some(team),
            points: 2,
            ..
        }) if *team == second_team
    ));

    // A fresh hand was dealt with the stakes reset, gated behind the
    // announcement queue.
    assert_eq!(
        game.skip_envido(opener(&game)),
        Err(ActionError::AnnouncementsPending)
    );
    drain_announcements(&mut game);
    assert_eq!(game.hand_number(), 2);
    assert_eq!(game.truco_state().level(), 0);
    assert_eq!(game.phase(), Phase::FirstTurn);
}

#[test]
fn stakes_are_monotonic_within_a_hand() {
    let mut game = game_without_flors();
    let first = opener(&game);
    let second = other(first);
    game.skip_envido(first).unwrap();

    game.declare_truco(first, TrucoLevel::Truco).unwrap();

    // Counter-raise by the responder is legal; re-calling the same or a
    // lower level never is.
    assert_eq!(
        game.declare_truco(second, TrucoLevel::Truco),
        Err(ActionError::InvalidLevel {
            level: TrucoLevel::Truco
        })
    );
    game.declare_truco(second, TrucoLevel::Retruco).unwrap();
    assert_eq!(game.truco_state().level(), 2);
    assert_eq!(
        game.declare_truco(first, TrucoLevel::Truco),
        Err(ActionError::InvalidLevel {
            level: TrucoLevel::Truco
        })
    );
}

#[test]
fn pending_truco_blocks_card_play_by_the_responding_side() {
    let mut game = game_without_flors();
    let first = opener(&game);
    let second = other(first);
    game.skip_envido(first).unwrap();
    game.declare_truco(first, TrucoLevel::Truco).unwrap();

    let card = game.player_view(second).unwrap().hand[0];
    assert_eq!(
        game.play_card(second, card),
        Err(ActionError::TrucoResponsePending)
    );

    game.respond_truco(second, true).unwrap();
    // First still holds the turn; second plays once it comes around.
    let card = game.player_view(first).unwrap().hand[0];
    game.play_card(first, card).unwrap();
}

#[test]
fn a_played_out_hand_awards_points_and_rotates_the_dealer() {
    let mut game = game_without_flors();
    let first = opener(&game);
    game.skip_envido(first).unwrap();

    let before = game.scores();
    while game.pending_announcement().is_none() {
        let p = game.current_player().unwrap();
        let card = game.player_view(p).unwrap().hand[0];
        game.play_card(p, card).unwrap();
    }

    let after = game.scores();
    let delta = (after[0] - before[0]) + (after[1] - before[1]);
    // 1 point without truco; 0 only on a full three-way tie of rounds.
    assert!(delta <= 1);
    assert!(matches!(
        game.pending_announcement(),
        Some(GameEvent::HandFinished { points, .. }) if *points == delta
    ));

    drain_announcements(&mut game);
    assert_eq!(game.hand_number(), 2);
    assert_eq!(game.dealer(), PlayerId::new(1));
    assert_eq!(opener(&game), PlayerId::new(0));
    assert_eq!(game.round(), 1);
}

#[test]
fn flor_must_be_declared_instead_of_bidding() {
    // Scan for a deal where the opener holds a flor.
    for seed in 0u64.. {
        let mut game = TrucoGame::new(2, seed);
        game.start();
        let first = opener(&game);
        if game.player_view(first).unwrap().flor.is_none() {
            continue;
        }

        assert_eq!(
            game.declare_envido(first, EnvidoCall::Envido),
            Err(ActionError::MustDeclareFlor)
        );

        let first_team = game.team_of(first);
        game.declare_flor(first).unwrap();
        assert_eq!(game.scores()[first_team.0 as usize], 3);
        assert_eq!(
            game.declare_flor(first),
            Err(ActionError::FlorAlreadyDeclared)
        );

        // A declared flor closes the envido for the hand, both sides.
        assert_eq!(
            game.declare_envido(first, EnvidoCall::Envido),
            Err(ActionError::FlorInProgress)
        );
        return;
    }
}

#[test]
fn flor_as_envido_response_cancels_the_chain_without_payout() {
    // Scan for a deal where the opener has no flor but the responder does.
    for seed in 0u64.. {
        let mut game = TrucoGame::new(2, seed);
        game.start();
        game.take_events();
        let first = opener(&game);
        let second = other(first);
        if game.player_view(first).unwrap().flor.is_some()
            || game.player_view(second).unwrap().flor.is_none()
        {
            continue;
        }

        game.declare_envido(first, EnvidoCall::Envido).unwrap();
        game.declare_flor(second).unwrap();

        assert!(!game.envido_state().is_active());
        let second_team = game.team_of(second);
        assert_eq!(game.scores()[second_team.0 as usize], 3);
        assert_eq!(game.scores()[1 - second_team.0 as usize], 0);

        let events = game.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EnvidoCanceled { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::FlorDeclared { points: 3, .. })));
        return;
    }
}

#[test]
fn contraflor_needs_a_prior_declaration() {
    let mut game = game_without_flors();
    assert_eq!(
        game.declare_contraflor(opener(&game)),
        Err(ActionError::NoFlorToContraflor)
    );
}

#[test]
fn a_full_game_reaches_thirty_and_freezes() {
    let mut game = TrucoGame::new(2, 3);
    game.start();

    let mut guard = 0;
    while game.winner().is_none() {
        guard += 1;
        assert!(guard < 10_000, "game must conclude");
        drain_announcements(&mut game);
        if game.winner().is_some() {
            break;
        }
        let p = game.current_player().unwrap();
        if game.phase() == Phase::FirstTurn {
            game.skip_envido(p).unwrap();
        }
        let card = game.player_view(p).unwrap().hand[0];
        game.play_card(p, card).unwrap();
    }

    let winner = game.winner().unwrap();
    assert!(game.scores()[winner.0 as usize] >= 30);
    assert_eq!(game.phase(), Phase::GameOver);

    let summary = game.summary().unwrap();
    assert_eq!(summary.winner_team, winner);
    assert!(summary.hands_played > 0);

    // No further mutation is possible, and the gate agrees.
    drain_announcements(&mut game);
    assert!(game.available_actions(PlayerId::new(0)).is_empty());
    assert_eq!(
        game.skip_envido(PlayerId::new(0)),
        Err(ActionError::GameNotActive)
    );
}

#[test]
fn four_player_table_deals_and_rotates_by_seat() {
    let mut game = TrucoGame::new(4, 5);
    game.start();

    assert_eq!(opener(&game), PlayerId::new(1));
    for p in 0..4 {
        assert_eq!(game.player_view(PlayerId::new(p)).unwrap().hand.len(), 3);
    }

    // Seats act in order 1, 2, 3, 0 for the first trick.
    for expected in [1u8, 2, 3] {
        let p = game.current_player().unwrap();
        assert_eq!(p, PlayerId::new(expected));
        let card = game.player_view(p).unwrap().hand[0];
        game.play_card(p, card).unwrap();
    }
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed: u64| {
        let mut game = TrucoGame::new(2, seed);
        game.start();
        (
            game.muestra(),
            game.player_view(PlayerId::new(0)).unwrap().hand,
            game.player_view(PlayerId::new(1)).unwrap().hand,
        )
    };
    assert_eq!(run(42), run(42));
}
