//! Snapshot module - plain-data copy of the game state for renderers

use crate::pieces::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, START_LEVEL};

/// Plain-data copy of everything the presentation layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<Tetromino>,
    pub ghost_y: Option<i8>,
    pub next: Option<Tetromino>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub game_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            started: false,
            paused: false,
            game_over: false,
            game_id: 0,
        }
    }
}
