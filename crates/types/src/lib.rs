//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the input mapping and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (4, 0), the top-left corner of the piece matrix
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Default frame interval (~60 FPS) |
//! | `NORMAL_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `FAST_DROP_MS` | 50 | Gravity interval at level 1 while soft drop is held |
//! | `SOFT_DROP_GRACE_MS` | 150 | Soft drop latch timeout without key repeats |
//!
//! The effective gravity interval is the base interval divided by the level.
//!
//! # Scoring
//!
//! - Each cleared row awards `LINE_CLEAR_POINTS * level`
//! - Hard drop awards `HARD_DROP_POINTS_PER_ROW` per row travelled
//! - `level = score / LEVEL_SCORE_DIVISOR + 1`
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X};
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(PieceKind::T.as_str(), "t");
//! assert_eq!(SPAWN_X, 4);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column where new pieces spawn (left edge of the piece matrix)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Row where new pieces spawn (top edge of the piece matrix)
pub const SPAWN_Y: i8 = 0;

/// Default frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const NORMAL_DROP_MS: u64 = 1000;

/// Gravity interval at level 1 while the down key is held
pub const FAST_DROP_MS: u64 = 50;

/// Soft drop latch timeout for terminals without key release events.
pub const SOFT_DROP_GRACE_MS: u64 = 150;

/// Points per cleared row, multiplied by the current level
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Bonus points per row travelled during a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Score needed per level step
pub const LEVEL_SCORE_DIVISOR: u32 = 1000;

/// Level at the start of every game
pub const START_LEVEL: u32 = 1;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in the order used for random selection.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Lowercase name, used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Player actions that modify game state
///
/// Every keyboard input that reaches the engine is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Engage fast gravity while the down key is held
    SoftDrop,
    /// Drop piece to its landing row and freeze it
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Toggle pause state (pause button)
    Pause,
    /// Begin a new game, abandoning any game in progress (start button)
    Start,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell frozen by a piece of the given kind
pub type Cell = Option<PieceKind>;
