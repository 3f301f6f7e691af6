//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules and state management. It has **no
//! dependencies** on UI or I/O (only `tracing` for diagnostics), making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision checks and line clearing
//! - [`game_state`]: Complete game state: current/next piece, score, gravity timing
//! - [`pieces`]: Tetromino shape matrices and clockwise rotation
//! - [`rng`]: Seeded uniform piece generation
//! - [`scoring`]: Line clear points, hard drop bonus, level and gravity speed
//! - [`snapshot`]: Plain-data view for renderers
//!
//! # Game Rules
//!
//! - **Random pieces**: each piece is an independent uniform pick
//! - **Rotation**: clockwise matrix turn, rejected on collision (no wall kicks)
//! - **Gravity**: `1000ms / level` per row, `50ms / level` while soft dropping
//! - **Scoring**: `100 * level` per cleared row, 2 points per hard-dropped row
//! - **Level**: `score / 1000 + 1`
//! - **Game over**: a freshly spawned piece collides
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The host calls [`GameState::tick`](game_state::GameState::tick) every frame
//! with a monotonic timestamp in milliseconds.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRow};
pub use game_state::{GameState, LockEvent};
pub use pieces::{spawn_shape, ShapeMatrix, Tetromino};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{drop_interval_ms, hard_drop_bonus, level_for_score, line_clear_score};
pub use snapshot::GameSnapshot;
