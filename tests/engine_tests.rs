//! Engine integration tests - full game scenarios through the public API

use blockfall::core::{
    collides, ConfigError, DropOutcome, Engine, EngineConfig, EngineEvent, SequenceSource,
    SimpleRng, SpeedCurve,
};
use blockfall::types::{Command, ShapeKind, EMPTY_CELL};
use proptest::prelude::*;

fn scripted(kinds: &[ShapeKind]) -> Engine<SequenceSource> {
    let source = SequenceSource::new(kinds.to_vec()).unwrap();
    Engine::with_source(EngineConfig::default(), source).unwrap()
}

fn drop_to_lock<S: blockfall::core::ShapeSource>(engine: &mut Engine<S>) -> (u32, bool) {
    for _ in 0..64 {
        if let DropOutcome::Locked {
            lines_cleared,
            game_over,
        } = engine.soft_drop()
        {
            return (lines_cleared, game_over);
        }
    }
    panic!("piece never locked");
}

#[test]
fn o_piece_lands_at_spawn_column() {
    let mut engine = scripted(&[ShapeKind::O, ShapeKind::T]);
    assert_eq!(engine.current().kind, ShapeKind::O);
    assert_eq!((engine.current().x, engine.current().y), (4, 0));

    let (lines, game_over) = drop_to_lock(&mut engine);
    assert_eq!((lines, game_over), (0, false));

    let board = engine.board();
    for (row, col) in [(19, 4), (19, 5), (18, 4), (18, 5)] {
        assert_eq!(board.cell_at(row, col), Ok(ShapeKind::O.id()));
    }
    for col in (0..10).filter(|c| *c != 4 && *c != 5) {
        assert_eq!(board.cell_at(19, col), Ok(EMPTY_CELL));
    }
    assert_eq!(board.filled_count(), 4);
    assert_eq!(engine.current().kind, ShapeKind::T);
    assert_eq!(engine.pieces_locked(), 1);
}

#[test]
fn full_spawn_row_triggers_game_over_reset() {
    let mut engine = Engine::new(7);
    for col in 0..10 {
        engine.board_mut().set(0, col, 3).unwrap();
    }
    engine.take_events();

    assert!(engine.spawn());

    let snap = engine.snapshot();
    assert!(snap.board_is_empty());
    assert_eq!(snap.score, 0);
    assert_eq!(snap.games_played, 1);
    assert_eq!(snap.drop_interval_ms, 1000);
    assert!(!collides(engine.board(), engine.current()));
    assert_eq!(
        engine.take_events(),
        vec![EngineEvent::GameOver {
            final_score: 0,
            games_played: 1
        }]
    );
}

#[test]
fn game_over_after_scoring_reports_final_score() {
    let mut engine = scripted(&[ShapeKind::I, ShapeKind::O]);
    for col in [0, 1, 2, 3, 8, 9] {
        engine.board_mut().set(19, col, 2).unwrap();
    }

    let (lines, game_over) = drop_to_lock(&mut engine);
    assert_eq!((lines, game_over), (1, false));
    assert_eq!(engine.score(), 1);
    assert_eq!(engine.score_label(), "Score: 1");
    assert_eq!(engine.board().filled_count(), 0);
    assert_eq!(
        engine.take_events(),
        vec![
            EngineEvent::Locked { kind: ShapeKind::I },
            EngineEvent::LinesCleared { count: 1 },
            EngineEvent::ScoreChanged { score: 1 },
        ]
    );

    for col in 0..10 {
        engine.board_mut().set(0, col, 5).unwrap();
    }
    assert!(engine.spawn());
    assert_eq!(engine.score(), 0);
    assert_eq!(
        engine.take_events(),
        vec![
            EngineEvent::GameOver {
                final_score: 1,
                games_played: 1
            },
            EngineEvent::ScoreChanged { score: 0 },
        ]
    );
}

#[test]
fn speed_progression() {
    let curve = SpeedCurve::default();
    assert_eq!(curve.interval_ms(0), 1000);
    assert_eq!(curve.interval_ms(4), 1000);
    assert_eq!(curve.interval_ms(5), 900);
    assert_eq!(curve.interval_ms(50), 200);
    assert_eq!(curve.interval_ms(1000), 200);
    assert_eq!(curve.interval_ms(u32::MAX), 200);
}

#[test]
fn gravity_fires_only_past_the_interval() {
    let mut engine = Engine::new(3);
    assert_eq!(engine.tick(1000), None);
    assert_eq!(engine.current().y, 0);
    assert_eq!(engine.tick(1), Some(DropOutcome::Fell));
    assert_eq!(engine.current().y, 1);
    assert_eq!(engine.drop_counter_ms(), 0);

    // One step per call however large the frame
    assert_eq!(engine.tick(10_000), Some(DropOutcome::Fell));
    assert_eq!(engine.current().y, 2);
}

#[test]
fn manual_drop_resets_gravity_clock() {
    let mut engine = Engine::new(3);
    engine.tick(900);
    assert!(engine.apply(Command::SoftDrop));
    assert_eq!(engine.drop_counter_ms(), 0);
    assert_eq!(engine.tick(900), None);
}

#[test]
fn no_shape_three_times_in_a_row() {
    let mut engine = Engine::with_source(EngineConfig::default(), SimpleRng::new(0xC0FFEE))
        .unwrap();
    let mut seen = vec![engine.current().kind, engine.next_kind()];
    for _ in 0..10_000 {
        assert!(!engine.spawn());
        seen.push(engine.next_kind());
    }
    for w in seen.windows(3) {
        assert!(!(w[0] == w[1] && w[1] == w[2]), "triple {:?}", w);
    }
    // Sanity: the generator did produce pairs, so the rule was exercised
    assert!(seen.windows(2).any(|w| w[0] == w[1]));
}

#[test]
fn constant_source_still_breaks_triples() {
    let mut engine = scripted(&[ShapeKind::S]);
    let mut seen = vec![engine.current().kind, engine.next_kind()];
    for _ in 0..20 {
        engine.spawn();
        seen.push(engine.next_kind());
    }
    assert_eq!(&seen[..3], &[ShapeKind::S, ShapeKind::S, ShapeKind::T]);
    for w in seen.windows(3) {
        assert!(!(w[0] == w[1] && w[1] == w[2]));
    }
}

#[test]
fn invalid_configs_are_rejected() {
    let source = || SimpleRng::new(1);
    let small = EngineConfig {
        width: 3,
        ..EngineConfig::default()
    };
    assert!(matches!(
        Engine::with_source(small, source()),
        Err(ConfigError::BoardTooSmall { .. })
    ));

    let right = EngineConfig {
        spawn_x: 7,
        ..EngineConfig::default()
    };
    assert!(matches!(
        Engine::with_source(right, source()),
        Err(ConfigError::SpawnOutOfBounds { .. })
    ));

    let low = EngineConfig {
        spawn_y: 19,
        ..EngineConfig::default()
    };
    assert!(matches!(
        Engine::with_source(low, source()),
        Err(ConfigError::SpawnRowOutOfBounds { .. })
    ));
}

#[test]
fn independent_sessions() {
    let mut a = Engine::new(11);
    let b = Engine::new(11);
    a.apply(Command::MoveLeft);
    a.apply(Command::SoftDrop);
    assert_ne!(a.current(), b.current());
    assert_eq!(b.current().y, 0);
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop::sample::select(vec![
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
    ])
}

proptest! {
    #[test]
    fn blocked_moves_leave_piece_untouched(
        seed in any::<u32>(),
        junk in prop::collection::vec((4i32..20, 0i32..10, 1u8..=7), 0..40),
        commands in prop::collection::vec(command_strategy(), 1..200),
    ) {
        let mut engine = Engine::new(seed);
        // Rows 0..4 stay free so the live piece never overlaps the junk
        for (row, col, id) in junk {
            engine.board_mut().set(row, col, id).unwrap();
        }

        for command in commands {
            let before = *engine.current();
            let changed = engine.apply(command);
            match command {
                Command::MoveLeft | Command::MoveRight | Command::Rotate if !changed => {
                    prop_assert_eq!(*engine.current(), before);
                }
                _ => {}
            }
            prop_assert!(!collides(engine.board(), engine.current()));
        }
    }

    #[test]
    fn out_of_bounds_always_collides(
        seed in any::<u32>(),
        dx in prop_oneof![-30i32..-4, 10i32..30],
        dy in -10i32..30,
    ) {
        let engine = Engine::new(seed);
        let piece = engine.current().shifted(dx, dy);
        prop_assert!(collides(engine.board(), &piece));
    }
}
