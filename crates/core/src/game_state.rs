//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, RNG, and scoring.
//! It handles gravity timing, piece movement, rotation, freezing, line clears and
//! the game lifecycle (start, pause, game over).
//!
//! Every mutation follows the same attempt/revert pattern: build the candidate
//! piece, test it against walls, floor and frozen cells, and keep the old piece
//! when it collides.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::{ClearedRow, MAX_CLEARED_ROWS};
use crate::pieces::Tetromino;
use crate::rng::PieceGenerator;
use crate::scoring::{drop_interval_ms, hard_drop_bonus, level_for_score, line_clear_score};
use crate::snapshot::GameSnapshot;
use crate::types::*;
use crate::Board;

/// What happened when the last piece froze.
///
/// The presentation layer drains this to trigger line-clear effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Cleared rows, bottom-up, with the kinds they held
    pub rows: ArrayVec<ClearedRow, MAX_CLEARED_ROWS>,
    /// Points awarded for the cleared rows
    pub line_clear_score: u32,
    /// Hard drop bonus awarded for this piece (0 for gravity/soft drop locks)
    pub drop_bonus: u32,
    /// The follow-up spawn collided
    pub game_over: bool,
}

impl LockEvent {
    pub fn lines_cleared(&self) -> usize {
        self.rows.len()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    next: Option<Tetromino>,
    pieces: PieceGenerator,
    /// Monotonic game id (increments on every start).
    game_id: u32,
    /// Last freeze event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    /// Timestamp of the last gravity step; `None` until the next tick records one.
    last_drop_ms: Option<u64>,
    soft_drop: bool,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create an idle game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            pieces: PieceGenerator::new(seed),
            game_id: 0,
            last_event: None,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            last_drop_ms: None,
            soft_drop: false,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start a running game from an arbitrary position.
    ///
    /// The board is taken as-is and `active` becomes the current piece even if
    /// it collides (the game is then over immediately).
    pub fn from_position(seed: u32, board: Board, active: Tetromino) -> Self {
        let mut state = Self::new(seed);
        state.board = board;
        state.started = true;
        state.game_id = 1;
        state.next = Some(Tetromino::new(state.pieces.draw()));
        state.active = Some(active);
        state.game_over = state.collides(&active);
        state
    }

    /// Resume from a given score; the level follows the score.
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self.level = level_for_score(score);
        self
    }

    /// Begin a new game.
    ///
    /// Resets board, score and level, and forgets the last gravity timestamp so
    /// a step scheduled by the previous game never fires. Restarts a game in
    /// progress.
    pub fn start(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = None;
        self.last_event = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.last_drop_ms = None;
        self.soft_drop = false;
        self.paused = false;
        self.game_over = false;
        self.started = true;
        self.game_id = self.game_id.wrapping_add(1);

        info!(game_id = self.game_id, seed = self.pieces.seed(), "game started");
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next(&self) -> Option<Tetromino> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether player input currently reaches the piece
    pub fn is_playable(&self) -> bool {
        self.started && !self.paused && !self.game_over && self.active.is_some()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active;
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.game_id = self.game_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the next piece to current and pre-generate a new next piece.
    ///
    /// Returns false (and ends the game) when the new current piece collides
    /// at its spawn position. The colliding piece stays visible.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = match self.next.take() {
            Some(next) => next,
            None => Tetromino::new(self.pieces.draw()),
        };
        self.next = Some(Tetromino::new(self.pieces.draw()));
        self.active = Some(piece);

        if self.collides(&piece) {
            self.game_over = true;
            info!(
                game_id = self.game_id,
                score = self.score,
                level = self.level,
                lines = self.lines,
                "game over"
            );
            return false;
        }

        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "piece spawned");
        true
    }

    fn collides(&self, piece: &Tetromino) -> bool {
        piece.cells().any(|(x, y)| self.board.collides(x, y))
    }

    /// Check if the active piece could move by (dx, dy)
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        !self.collides(&Tetromino {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        })
    }

    /// Try to move the active piece; a colliding move leaves it where it was.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = Tetromino {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        };
        if self.collides(&candidate) {
            return false;
        }

        self.active = Some(candidate);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row, or freeze the piece and spawn the next one.
    ///
    /// Returns true only if the piece actually moved.
    pub fn move_down(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.freeze();
        false
    }

    /// Rotate the active piece clockwise; a colliding rotation is rolled back.
    pub fn rotate(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = Tetromino {
            shape: active.shape.rotated_cw(),
            ..active
        };
        if self.collides(&candidate) {
            return false;
        }

        self.active = Some(candidate);
        true
    }

    /// Drop the active piece to its landing row and freeze it.
    ///
    /// Awards the hard drop bonus for the rows travelled and returns that
    /// distance.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_playable() {
            return 0;
        }

        let mut distance: u32 = 0;
        while self.move_down() {
            distance += 1;
        }

        if distance > 0 {
            let bonus = hard_drop_bonus(distance);
            self.add_score(bonus);
            if let Some(event) = self.last_event.as_mut() {
                event.drop_bonus = bonus;
            }
        }

        distance
    }

    /// Hold or release fast gravity.
    ///
    /// Holding is rejected unless the game is playable; releasing always
    /// succeeds.
    pub fn set_soft_drop(&mut self, held: bool) -> bool {
        if held && !self.is_playable() {
            return false;
        }
        self.soft_drop = held;
        true
    }

    /// Toggle pause. Resuming waits for a fresh gravity timestamp.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.paused = !self.paused;
        if !self.paused {
            self.last_drop_ms = None;
        }
        debug!(paused = self.paused, "pause toggled");
        true
    }

    /// Write the active piece into the board, clear full rows and spawn the
    /// next piece.
    pub fn freeze(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.freeze_cells(active.cells(), active.kind);
        debug!(kind = active.kind.as_str(), x = active.x, y = active.y, "piece frozen");

        let rows = self.clear_lines();
        let line_clear_score = line_clear_score(rows.len(), self.level);
        if !rows.is_empty() {
            self.lines += rows.len() as u32;
            self.add_score(line_clear_score);
            debug!(
                lines = rows.len(),
                points = line_clear_score,
                score = self.score,
                level = self.level,
                "lines cleared"
            );
        }

        let spawned = self.spawn_piece();
        self.last_event = Some(LockEvent {
            kind: active.kind,
            rows,
            line_clear_score,
            drop_bonus: 0,
            game_over: !spawned,
        });
    }

    /// Remove full rows, bottom-up, shifting everything above down.
    pub fn clear_lines(&mut self) -> ArrayVec<ClearedRow, MAX_CLEARED_ROWS> {
        self.board.clear_full_rows()
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.level = level_for_score(self.score);
    }

    /// Take and clear the last freeze event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u64 {
        drop_interval_ms(self.level, self.soft_drop)
    }

    /// Calculate the ghost piece Y position (where the piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        if self.collides(&active) {
            return None;
        }

        let mut drop_distance: i8 = 0;
        while self.can_move(0, drop_distance + 1) {
            drop_distance += 1;
        }

        Some(active.y + drop_distance)
    }

    /// Frame callback: apply gravity when its interval has elapsed.
    ///
    /// `timestamp_ms` is a monotonic clock reading. The first tick after a
    /// start or resume only records the timestamp. Returns true when a
    /// gravity step ran.
    pub fn tick(&mut self, timestamp_ms: u64) -> bool {
        if !self.started || self.paused || self.game_over {
            return false;
        }

        let last = *self.last_drop_ms.get_or_insert(timestamp_ms);
        if timestamp_ms.saturating_sub(last) > self.drop_interval_ms() {
            self.move_down();
            self.last_drop_ms = Some(timestamp_ms);
            return true;
        }

        false
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.set_soft_drop(true),
            GameAction::HardDrop => {
                let playable = self.is_playable();
                self.hard_drop();
                playable
            }
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => {
                self.start();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
