//! Terminal presentation for blockfall.
//!
//! Renders into a plain framebuffer instead of using a widget toolkit, then
//! flushes only the changed cells to the terminal. Everything except
//! [`TerminalRenderer`] is pure and unit-testable.
//!
//! - [`GameView`] draws a [`core::GameSnapshot`] (board, ghost, next preview, overlays)
//! - [`Effects`] animates line clears from [`core::LockEvent`]s
//! - [`TerminalRenderer`] owns raw mode and the diff flush

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use effects::{Confetti, Effects, Message, Particle};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use palette::piece_color;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
