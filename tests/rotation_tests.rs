//! Rotation engine behavior through the public API, exercised the way a
//! room server drives it for turn-based games.

use truco_core::{Direction, PlayerId, RotationEngine, TeamConfig, TeamId};

fn seated(count: usize) -> RotationEngine<PlayerId> {
    let mut engine = RotationEngine::new(1);
    engine.initialize(PlayerId::all(count).collect(), &TeamConfig::Solo);
    engine
}

#[test]
fn two_players_alternate_strictly() {
    let mut engine = seated(2);

    let mut order = Vec::new();
    for _ in 0..6 {
        order.push(engine.advance_turn().unwrap().current);
    }
    assert_eq!(
        order,
        vec![
            PlayerId::new(1),
            PlayerId::new(0),
            PlayerId::new(1),
            PlayerId::new(0),
            PlayerId::new(1),
            PlayerId::new(0),
        ]
    );
}

#[test]
fn four_players_cycle_in_seat_order() {
    let mut engine = seated(4);

    for expected in [1, 2, 3, 0, 1] {
        assert_eq!(
            engine.advance_turn().unwrap().current,
            PlayerId::new(expected)
        );
    }
}

#[test]
fn reverse_walks_backward_with_wraparound() {
    let mut engine = seated(3);

    assert_eq!(engine.reverse_direction(), Direction::Backward);
    assert_eq!(engine.advance_turn().unwrap().current, PlayerId::new(2));
    assert_eq!(engine.advance_turn().unwrap().current, PlayerId::new(1));
    assert_eq!(engine.advance_turn().unwrap().current, PlayerId::new(0));
}

#[test]
fn skip_passes_over_exactly_one_player() {
    let mut engine = seated(3);

    engine.request_skip_next();
    let info = engine.advance_turn().unwrap();
    assert_eq!(info.skipped, Some(PlayerId::new(1)));
    assert_eq!(info.current, PlayerId::new(2));

    // The following advance is normal again.
    let info = engine.advance_turn().unwrap();
    assert_eq!(info.skipped, None);
    assert_eq!(info.current, PlayerId::new(0));
}

#[test]
fn force_set_current_rejects_unknown_participant() {
    let mut engine = seated(2);

    assert!(engine.force_set_current(&PlayerId::new(1)));
    assert!(engine.is_turn_of(&PlayerId::new(1)));

    assert!(!engine.force_set_current(&PlayerId::new(9)));
    assert!(engine.is_turn_of(&PlayerId::new(1)));
}

#[test]
fn removal_keeps_the_cursor_on_a_seated_participant() {
    let mut engine = seated(4);
    engine.advance_turn(); // cursor on seat 1

    assert!(engine.remove_participant(&PlayerId::new(0)));
    assert!(engine.is_turn_of(&PlayerId::new(1)));

    assert!(engine.remove_participant(&PlayerId::new(1)));
    let current = *engine.current().unwrap();
    assert!(engine.participants().contains(&current));
}

#[test]
fn pairs_config_alternates_teams() {
    let mut engine = RotationEngine::new(1);
    engine.initialize(PlayerId::all(4).collect(), &TeamConfig::Pairs);

    assert_eq!(engine.team_of(&PlayerId::new(0)), Some(TeamId(0)));
    assert_eq!(engine.team_of(&PlayerId::new(1)), Some(TeamId(1)));
    assert_eq!(engine.teammates_of(&PlayerId::new(0)), vec![PlayerId::new(2)]);
    assert_eq!(engine.teammates_of(&PlayerId::new(3)), vec![PlayerId::new(1)]);
}

#[test]
fn reset_returns_to_seat_zero_facing_forward() {
    let mut engine = seated(3);
    engine.advance_turn();
    engine.reverse_direction();
    engine.request_skip_next();

    engine.reset();
    assert!(engine.is_turn_of(&PlayerId::new(0)));
    assert_eq!(engine.direction(), Direction::Forward);

    // The armed skip was cleared by the reset.
    let info = engine.advance_turn().unwrap();
    assert_eq!(info.skipped, None);
}

#[test]
fn initialize_replaces_previous_seating() {
    let mut engine = seated(4);
    engine.advance_turn();

    engine.initialize(PlayerId::all(2).collect(), &TeamConfig::Solo);
    assert_eq!(engine.len(), 2);
    assert!(engine.is_turn_of(&PlayerId::new(0)));
    assert_eq!(engine.team_of(&PlayerId::new(3)), None);
}
