use tile_chase_core::{
    CellCoord, Command, ConfigurationError, ContactModel, Direction, Displacement,
    EncounterRule, EntityId, Event, GameState, MoveOutcome, OccupyEffect, RetryLimit,
};
use tile_chase_world::{self as world, query, Config, MapInstructions};

const PLAYER: EntityId = EntityId::new(0);

fn open_map(rows: usize, columns: usize) -> MapInstructions {
    MapInstructions::from_rows(vec![" ".repeat(columns); rows]).expect("rectangular map")
}

fn map(rows: &[&str]) -> MapInstructions {
    MapInstructions::from_rows(rows.iter().copied()).expect("rectangular map")
}

#[test]
fn capturing_the_last_adversary_wins() {
    let mut world = world::build_game_with_placements(
        &open_map(10, 10),
        CellCoord::new(0, 1),
        &[CellCoord::new(0, 0)],
        &Config::default(),
    )
    .expect("valid placement");
    assert_eq!(query::game_state(&world), GameState::Playing);

    let mut events = Vec::new();
    let outcome = world::submit_player_move(&mut world, Direction::Left, &mut events);

    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            from: CellCoord::new(0, 1),
            to: CellCoord::new(0, 0),
        }
    );
    assert_eq!(
        events,
        vec![
            Event::EntityCaptured {
                entity: EntityId::new(1),
                by: PLAYER,
            },
            Event::EntityMoved {
                entity: PLAYER,
                from: CellCoord::new(0, 1),
                to: CellCoord::new(0, 0),
            },
            Event::GameWon,
            Event::StateChanged {
                state: GameState::Won,
            },
        ]
    );
    assert_eq!(query::game_state(&world), GameState::Won);
    assert_eq!(query::adversary_count(&world), 0);
    assert!(!query::is_alive(&world, EntityId::new(1)));
    assert_eq!(query::occupant(&world, CellCoord::new(0, 0)), Some(PLAYER));
    assert_eq!(query::occupant(&world, CellCoord::new(0, 1)), None);
}

#[test]
fn unknown_symbol_fails_construction() {
    let instructions: MapInstructions = "   \n X \n   ".parse().expect("rectangular map");
    let error = world::build_game(&instructions, 1, &Config::default()).unwrap_err();
    assert_eq!(
        error,
        ConfigurationError::UnmappedSymbol {
            symbol: 'X',
            row: 1,
            column: 1,
        }
    );
}

#[test]
fn paused_session_ignores_player_moves() {
    let mut world = world::build_game_with_placements(
        &open_map(4, 4),
        CellCoord::new(2, 2),
        &[CellCoord::new(0, 0)],
        &Config::default(),
    )
    .expect("valid placement");
    let before = query::entity_view(&world);

    let mut events = Vec::new();
    world::apply(&mut world, Command::Pause, &mut events);
    assert_eq!(
        events,
        vec![Event::StateChanged {
            state: GameState::Paused,
        }]
    );
    events.clear();

    assert_eq!(
        world::submit_player_move(&mut world, Direction::Up, &mut events),
        MoveOutcome::Ignored
    );
    world::tick_adversaries(&mut world, &mut events);
    assert!(events.is_empty());
    assert_eq!(query::entity_view(&world), before);
    assert_eq!(query::game_state(&world), GameState::Paused);
}

#[test]
fn impassable_and_out_of_bounds_targets_block() {
    let mut world = world::build_game_with_placements(
        &map(&[" ^", "~ "]),
        CellCoord::new(0, 0),
        &[],
        &Config::default(),
    )
    .expect("valid placement");

    let mut events = Vec::new();
    for direction in [Direction::Up, Direction::Left, Direction::Right, Direction::Down] {
        assert_eq!(
            world::submit_player_move(&mut world, direction, &mut events),
            MoveOutcome::Blocked
        );
    }
    assert!(events.is_empty());
    assert_eq!(
        query::player(&world).map(|player| player.cell),
        Some(CellCoord::new(0, 0))
    );
}

#[test]
fn entering_effect_terrain_reports_the_effect_once() {
    let mut world = world::build_game_with_placements(
        &map(&[" -#"]),
        CellCoord::new(0, 0),
        &[],
        &Config::default(),
    )
    .expect("valid placement");

    let mut events = Vec::new();
    let _ = world::submit_player_move(&mut world, Direction::Right, &mut events);
    let _ = world::submit_player_move(&mut world, Direction::Right, &mut events);
    let effects: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::TerrainEffectTriggered { cell, effect, .. } => Some((*cell, *effect)),
            _ => None,
        })
        .collect();
    assert_eq!(
        effects,
        vec![
            (CellCoord::new(0, 1), OccupyEffect::Path),
            (CellCoord::new(0, 2), OccupyEffect::Lava),
        ]
    );
}

#[test]
fn adversaries_block_each_other() {
    let mut world = world::build_game_with_placements(
        &open_map(3, 3),
        CellCoord::new(2, 2),
        &[CellCoord::new(0, 0), CellCoord::new(0, 1)],
        &Config::default(),
    )
    .expect("valid placement");

    let mut events = Vec::new();
    let right = Displacement::new(0, 1).expect("unit vector");
    assert_eq!(
        world::move_entity(&mut world, EntityId::new(1), right, &mut events),
        MoveOutcome::Blocked
    );
    assert!(events.is_empty());
    assert_eq!(query::adversary_count(&world), 2);
}

#[test]
fn adversary_walking_into_player_is_captured_by_default() {
    let mut world = world::build_game_with_placements(
        &open_map(3, 3),
        CellCoord::new(1, 1),
        &[CellCoord::new(0, 0), CellCoord::new(2, 2)],
        &Config::default(),
    )
    .expect("valid placement");

    let mut events = Vec::new();
    let down_right = Displacement::new(1, 1).expect("unit vector");
    assert_eq!(
        world::move_entity(&mut world, EntityId::new(1), down_right, &mut events),
        MoveOutcome::Defeated
    );
    assert_eq!(
        events,
        vec![Event::EntityCaptured {
            entity: EntityId::new(1),
            by: PLAYER,
        }]
    );
    assert_eq!(query::occupant(&world, CellCoord::new(1, 1)), Some(PLAYER));
    assert_eq!(query::occupant(&world, CellCoord::new(0, 0)), None);
    assert_eq!(query::game_state(&world), GameState::Playing);
}

#[test]
fn aggressor_rule_lets_a_wandering_adversary_win() {
    let config = Config {
        encounter: EncounterRule::AggressorPrevails,
        retry_limit: RetryLimit::new(500).expect("non-zero"),
        ..Config::default()
    };
    let mut world = world::build_game_with_placements(
        &map(&["^^^", "  ^", "^^^"]),
        CellCoord::new(1, 1),
        &[CellCoord::new(1, 0)],
        &config,
    )
    .expect("valid placement");

    let mut events = Vec::new();
    world::tick_adversaries(&mut world, &mut events);

    assert_eq!(
        events,
        vec![
            Event::EntityCaptured {
                entity: PLAYER,
                by: EntityId::new(1),
            },
            Event::EntityMoved {
                entity: EntityId::new(1),
                from: CellCoord::new(1, 0),
                to: CellCoord::new(1, 1),
            },
            Event::GameLost,
            Event::StateChanged {
                state: GameState::Lost,
            },
        ]
    );
    assert_eq!(query::game_state(&world), GameState::Lost);
    assert!(query::player(&world).is_none());
}

#[test]
fn terminal_states_ignore_every_command() {
    let mut world = world::build_game_with_placements(
        &open_map(2, 2),
        CellCoord::new(0, 1),
        &[CellCoord::new(0, 0)],
        &Config::default(),
    )
    .expect("valid placement");
    let mut events = Vec::new();
    let _ = world::submit_player_move(&mut world, Direction::Left, &mut events);
    assert_eq!(query::game_state(&world), GameState::Won);
    events.clear();

    for command in [
        Command::MovePlayer {
            direction: Direction::Down,
        },
        Command::TickAdversaries,
        Command::Pause,
        Command::Resume,
        Command::TogglePause,
    ] {
        world::apply(&mut world, command, &mut events);
    }
    assert!(events.is_empty());
    assert_eq!(query::game_state(&world), GameState::Won);
    assert_eq!(
        query::player(&world).map(|player| player.cell),
        Some(CellCoord::new(0, 0))
    );
}

#[test]
fn touching_contact_captures_adjacent_opponents() {
    let config = Config {
        contact: ContactModel::Touching,
        ..Config::default()
    };
    let mut world = world::build_game_with_placements(
        &open_map(1, 4),
        CellCoord::new(0, 0),
        &[CellCoord::new(0, 2)],
        &config,
    )
    .expect("valid placement");

    let mut events = Vec::new();
    let outcome = world::submit_player_move(&mut world, Direction::Right, &mut events);
    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            from: CellCoord::new(0, 0),
            to: CellCoord::new(0, 1),
        }
    );
    assert_eq!(
        events,
        vec![
            Event::EntityMoved {
                entity: PLAYER,
                from: CellCoord::new(0, 0),
                to: CellCoord::new(0, 1),
            },
            Event::EntityCaptured {
                entity: EntityId::new(1),
                by: PLAYER,
            },
            Event::GameWon,
            Event::StateChanged {
                state: GameState::Won,
            },
        ]
    );
}

#[test]
fn exact_cell_contact_ignores_adjacency() {
    let mut world = world::build_game_with_placements(
        &open_map(1, 4),
        CellCoord::new(0, 0),
        &[CellCoord::new(0, 2)],
        &Config::default(),
    )
    .expect("valid placement");
    let mut events = Vec::new();
    let _ = world::submit_player_move(&mut world, Direction::Right, &mut events);
    assert_eq!(query::adversary_count(&world), 1);
    assert_eq!(query::game_state(&world), GameState::Playing);
}

#[test]
fn session_without_adversaries_keeps_playing() {
    let mut world =
        world::build_game(&open_map(3, 3), 0, &Config::default()).expect("room for the player");
    let mut events = Vec::new();
    world::tick_adversaries(&mut world, &mut events);
    for direction in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
        let _ = world::submit_player_move(&mut world, direction, &mut events);
    }
    assert_eq!(query::game_state(&world), GameState::Playing);
    assert!(events
        .iter()
        .all(|event| matches!(event, Event::EntityMoved { .. })));
}
