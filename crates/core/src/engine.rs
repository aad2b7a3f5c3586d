//! Engine module - owns one game session
//!
//! The engine ties together the board, the live piece, the next-piece queue,
//! the shape source and the score/speed state. It runs the lifecycle
//!
//! ```text
//! Spawning -> Falling -> Locking -> (LineClearing) -> Spawning
//!                                       GameOver ---^
//! ```
//!
//! Every transition happens inside a single call, so between calls the engine
//! is always in `Falling` with a collision-free live piece. Game over is an
//! immediate reset of board and score, announced with
//! [`EngineEvent::GameOver`].

use std::collections::VecDeque;

use log::{debug, info};

use crate::board::Board;
use crate::collision::collides;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::piece::Piece;
use crate::rng::{ShapeSource, SimpleRng};
use crate::shapes::{random_kind, topology_for};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, ShapeKind};

/// Redraws allowed before the anti-repeat rule substitutes a kind itself
pub const MAX_REDRAWS: u32 = 16;

/// Undrained events beyond this are discarded oldest-first
pub const MAX_PENDING_EVENTS: usize = 64;

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Result of one downward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down one row
    Fell,
    /// The piece could not fall and was merged into the board
    Locked { lines_cleared: u32, game_over: bool },
}

/// Notifications for collaborators, drained with [`Engine::take_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Locked { kind: ShapeKind },
    LinesCleared { count: u32 },
    ScoreChanged { score: u32 },
    GameOver { final_score: u32, games_played: u32 },
}

/// A single game session
#[derive(Debug, Clone)]
pub struct Engine<S: ShapeSource = SimpleRng> {
    config: EngineConfig,
    board: Board,
    current: Piece,
    next: ShapeKind,
    /// Kind of the piece that locked before `current` spawned
    previous: Option<ShapeKind>,
    source: S,
    score: u32,
    drop_interval_ms: u32,
    drop_counter_ms: u32,
    games_played: u32,
    pieces_locked: u32,
    events: VecDeque<EngineEvent>,
}

impl Engine<SimpleRng> {
    /// Canonical 10x20 game seeded with `seed`
    pub fn new(seed: u32) -> Self {
        Self::build(EngineConfig::default(), SimpleRng::new(seed))
    }
}

impl<S: ShapeSource> Engine<S> {
    /// Create a game with custom rules and shape source
    pub fn with_source(config: EngineConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, source))
    }

    fn build(config: EngineConfig, mut source: S) -> Self {
        let first = random_kind(&mut source);
        let next = random_kind(&mut source);
        Self {
            board: Board::new(config.width, config.height),
            current: Piece::spawn(first, config.spawn_x, config.spawn_y),
            next,
            previous: None,
            source,
            score: 0,
            drop_interval_ms: config.speed.interval_ms(0),
            drop_counter_ms: 0,
            games_played: 0,
            pieces_locked: 0,
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup.
    ///
    /// Callers must leave the live piece's cells empty.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next_kind(&self) -> ShapeKind {
        self.next
    }

    pub fn previous_kind(&self) -> Option<ShapeKind> {
        self.previous
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Default human-readable score label
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Drain pending events in the order they happened
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    fn push_event(&mut self, event: EngineEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Apply an input command. Returns true if the engine state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_horizontal(Direction::Left),
            Command::MoveRight => self.move_horizontal(Direction::Right),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => {
                self.soft_drop();
                true
            }
        }
    }

    /// Promote the queued piece to live and queue a new one.
    ///
    /// If the new piece collides, the game is over: board and score reset and
    /// the new piece stays live on the empty board. Returns true on game over.
    pub fn spawn(&mut self) -> bool {
        let finished = self.current.kind;
        self.previous = Some(finished);
        self.current = Piece::spawn(self.next, self.config.spawn_x, self.config.spawn_y);
        self.next = self.draw_next(finished, self.current.kind);

        if collides(&self.board, &self.current) {
            self.game_over();
            return true;
        }
        false
    }

    /// Draw the next kind, never queueing a third identical piece in a row
    fn draw_next(&mut self, finished: ShapeKind, current: ShapeKind) -> ShapeKind {
        let mut candidate = random_kind(&mut self.source);
        let mut redraws = 0;
        while candidate == finished && candidate == current {
            if redraws == MAX_REDRAWS {
                candidate = candidate.following();
                break;
            }
            candidate = random_kind(&mut self.source);
            redraws += 1;
        }
        candidate
    }

    fn game_over(&mut self) {
        let final_score = self.score;
        self.board.clear();
        self.score = 0;
        self.drop_interval_ms = self.config.speed.interval_ms(0);
        self.drop_counter_ms = 0;
        self.games_played = self.games_played.wrapping_add(1);

        info!(
            "game over: final score {}, {} games played",
            final_score, self.games_played
        );
        self.push_event(EngineEvent::GameOver {
            final_score,
            games_played: self.games_played,
        });
        if final_score != 0 {
            self.push_event(EngineEvent::ScoreChanged { score: 0 });
        }
    }

    /// Shift the live piece one column. Returns false (and changes nothing) if blocked.
    pub fn move_horizontal(&mut self, direction: Direction) -> bool {
        let moved = self.current.shifted(direction.dx(), 0);
        if collides(&self.board, &moved) {
            return false;
        }
        self.current = moved;
        true
    }

    /// Rotate the live piece 90° clockwise.
    ///
    /// A blocked rotation gets one nudge of one column toward the board
    /// centre. If that is blocked too, topology and offset stay as they were.
    pub fn rotate(&mut self) -> bool {
        let rotated = self.current.rotated();
        if !collides(&self.board, &rotated) {
            self.current = rotated;
            return true;
        }

        let kicked = rotated.shifted(self.nudge_toward_center(&rotated), 0);
        if !collides(&self.board, &kicked) {
            self.current = kicked;
            return true;
        }

        false
    }

    fn nudge_toward_center(&self, piece: &Piece) -> i32 {
        let board_center_x2 = self.board.width() as i32 - 1;
        if piece.center_col_x2() < board_center_x2 {
            1
        } else {
            -1
        }
    }

    /// Move the live piece down one row, locking it if it cannot fall.
    ///
    /// Resets the gravity accumulator either way.
    pub fn soft_drop(&mut self) -> DropOutcome {
        self.drop_counter_ms = 0;

        let moved = self.current.shifted(0, 1);
        if !collides(&self.board, &moved) {
            self.current = moved;
            return DropOutcome::Fell;
        }

        self.lock_current()
    }

    fn lock_current(&mut self) -> DropOutcome {
        let kind = self.current.kind;
        self.board.merge(&self.current);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        debug!(
            "locked {} at ({}, {})",
            kind.letter(),
            self.current.x,
            self.current.y
        );
        self.push_event(EngineEvent::Locked { kind });

        let lines_cleared = self.board.clear_completed_rows() as u32;
        if lines_cleared > 0 {
            self.score = self.score.saturating_add(lines_cleared);
            self.drop_interval_ms = self.config.speed.interval_ms(self.score);
            debug!(
                "cleared {} lines, score {}, interval {}ms",
                lines_cleared, self.score, self.drop_interval_ms
            );
            self.push_event(EngineEvent::LinesCleared {
                count: lines_cleared,
            });
            self.push_event(EngineEvent::ScoreChanged { score: self.score });
        }

        let game_over = self.spawn();
        DropOutcome::Locked {
            lines_cleared,
            game_over,
        }
    }

    /// Advance the gravity clock by `elapsed_ms`.
    ///
    /// Performs at most one gravity step per call, when the accumulated time
    /// exceeds the drop interval.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<DropOutcome> {
        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms {
            return Some(self.soft_drop());
        }
        None
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = ActiveSnapshot::from(self.current);
        out.next = self.next;
        out.next_topology = topology_for(self.next);
        out.score = self.score;
        out.drop_interval_ms = self.drop_interval_ms;
        out.games_played = self.games_played;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;

    fn scripted(kinds: &[ShapeKind]) -> Engine<SequenceSource> {
        let source = SequenceSource::new(kinds.to_vec()).unwrap();
        Engine::with_source(EngineConfig::default(), source).unwrap()
    }

    #[test]
    fn new_engine_has_live_and_queued_piece() {
        let engine = Engine::new(12345);
        assert_eq!((engine.current().x, engine.current().y), (4, 0));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.drop_interval_ms(), 1000);
        assert_eq!(engine.board().filled_count(), 0);
        assert!(engine.previous_kind().is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = EngineConfig {
            width: 2,
            ..EngineConfig::default()
        };
        let source = SequenceSource::new(vec![ShapeKind::O]).unwrap();
        assert!(Engine::with_source(cfg, source).is_err());
    }

    #[test]
    fn move_blocked_by_wall_is_noop() {
        let mut engine = scripted(&[ShapeKind::O, ShapeKind::T]);
        for _ in 0..4 {
            assert!(engine.move_horizontal(Direction::Left));
        }
        let before = *engine.current();
        assert!(!engine.move_horizontal(Direction::Left));
        assert_eq!(*engine.current(), before);
        assert_eq!(before.x, 0);
    }

    #[test]
    fn rotate_blocked_after_nudge_keeps_piece() {
        // Vertical I in the last column; rotating back to horizontal needs room.
        let mut engine = scripted(&[ShapeKind::I, ShapeKind::O]);
        assert!(engine.rotate());
        while engine.move_horizontal(Direction::Right) {}
        assert_eq!(engine.current().x, 9);

        // Horizontal at x=9 overflows by three columns; one nudge is not enough.
        let before = *engine.current();
        assert!(!engine.rotate());
        assert_eq!(*engine.current(), before);
    }

    #[test]
    fn rotate_uses_single_column_nudge() {
        // T on its side hugging the right wall; turning it flat needs one column.
        let mut engine = scripted(&[ShapeKind::T, ShapeKind::O]);
        assert!(engine.rotate()); // 3 rows x 2 cols: [[6,0],[6,6],[6,0]]
        while engine.move_horizontal(Direction::Right) {}
        assert_eq!(engine.current().x, 8);

        // Rotated shape is 2x3 at x=8 -> overflows by one; nudge left fixes it.
        assert!(engine.rotate());
        assert_eq!(engine.current().x, 7);
        assert_eq!(engine.current().topology.cols(), 3);
    }

    #[test]
    fn rotate_blocked_on_left_half_nudges_right() {
        let mut engine = scripted(&[ShapeKind::T, ShapeKind::O]);
        for _ in 0..5 {
            assert_eq!(engine.soft_drop(), DropOutcome::Fell);
        }
        for _ in 0..3 {
            assert!(engine.move_horizontal(Direction::Left));
        }
        assert_eq!((engine.current().x, engine.current().y), (1, 5));

        // Upright T at x=1 would cover (7, 1); the block forces the nudge.
        engine.board_mut().set(7, 1, 2).unwrap();
        assert!(engine.rotate());
        assert_eq!(engine.current().x, 2);
        assert_eq!(engine.current().topology.cols(), 2);
        assert!(!collides(engine.board(), engine.current()));
    }

    #[test]
    fn exactly_centred_piece_nudges_left() {
        let engine = scripted(&[ShapeKind::O]);
        // O at x=4 spans columns 4..=5: centre 9 equals width - 1
        let centred = Piece::spawn(ShapeKind::O, 4, 0);
        assert_eq!(engine.nudge_toward_center(&centred), -1);
        assert_eq!(engine.nudge_toward_center(&centred.shifted(-1, 0)), 1);
        assert_eq!(engine.nudge_toward_center(&centred.shifted(1, 0)), -1);
    }

    #[test]
    fn soft_drop_resets_gravity_accumulator() {
        let mut engine = Engine::new(1);
        assert_eq!(engine.tick(500), None);
        assert_eq!(engine.drop_counter_ms(), 500);
        assert_eq!(engine.soft_drop(), DropOutcome::Fell);
        assert_eq!(engine.drop_counter_ms(), 0);
    }

    #[test]
    fn tick_steps_only_after_interval_is_exceeded() {
        let mut engine = Engine::new(1);
        assert_eq!(engine.tick(1000), None);
        assert_eq!(engine.tick(1), Some(DropOutcome::Fell));
        assert_eq!(engine.current().y, 1);
        assert_eq!(engine.drop_counter_ms(), 0);
    }

    #[test]
    fn tick_never_steps_twice() {
        let mut engine = Engine::new(1);
        assert_eq!(engine.tick(60_000), Some(DropOutcome::Fell));
        assert_eq!(engine.current().y, 1);
    }

    #[test]
    fn anti_repeat_substitutes_after_degenerate_source() {
        let mut engine = scripted(&[ShapeKind::S]);
        // S, S queued; the next draw would be a third S.
        engine.spawn();
        assert_eq!(engine.current().kind, ShapeKind::S);
        assert_eq!(engine.previous_kind(), Some(ShapeKind::S));
        assert_eq!(engine.next_kind(), ShapeKind::S.following());
    }

    #[test]
    fn events_are_drained_in_order() {
        let mut engine = scripted(&[ShapeKind::O, ShapeKind::I]);
        while engine.soft_drop() == DropOutcome::Fell {}
        assert_eq!(
            engine.take_events(),
            vec![EngineEvent::Locked { kind: ShapeKind::O }]
        );
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn undrained_events_keep_the_newest() {
        let mut engine = scripted(&[ShapeKind::O, ShapeKind::I]);
        for _ in 0..MAX_PENDING_EVENTS + 10 {
            engine.push_event(EngineEvent::Locked { kind: ShapeKind::O });
        }
        engine.push_event(EngineEvent::ScoreChanged { score: 7 });

        let events = engine.take_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(
            events.last(),
            Some(&EngineEvent::ScoreChanged { score: 7 })
        );
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn score_label_tracks_score() {
        let engine = Engine::new(3);
        assert_eq!(engine.score_label(), "Score: 0");
    }
}
