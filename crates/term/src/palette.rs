//! Colors shared by the board view and the effects.

use crate::fb::Rgb;
use crate::types::PieceKind;

/// Fill color of a piece kind.
pub const fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0x00, 0xf0, 0xf0),
        PieceKind::O => Rgb::new(0xf0, 0xf0, 0x00),
        PieceKind::T => Rgb::new(0xa0, 0x00, 0xf0),
        PieceKind::S => Rgb::new(0x00, 0xf0, 0x00),
        PieceKind::Z => Rgb::new(0xf0, 0x00, 0x00),
        PieceKind::J => Rgb::new(0x00, 0x00, 0xf0),
        PieceKind::L => Rgb::new(0xf0, 0xa0, 0x00),
    }
}

pub const CONFETTI_COLORS: [Rgb; 12] = [
    Rgb::new(0xff, 0x00, 0x00),
    Rgb::new(0x00, 0xff, 0x00),
    Rgb::new(0x00, 0x00, 0xff),
    Rgb::new(0xff, 0xff, 0x00),
    Rgb::new(0xff, 0x00, 0xff),
    Rgb::new(0x00, 0xff, 0xff),
    Rgb::new(0xff, 0x45, 0x00),
    Rgb::new(0x7f, 0xff, 0x00),
    Rgb::new(0xff, 0x14, 0x93),
    Rgb::new(0xff, 0xd7, 0x00),
    Rgb::new(0x00, 0xfa, 0x9a),
    Rgb::new(0x94, 0x00, 0xd3),
];

pub const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
pub const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
pub const GRID_FG: Rgb = Rgb::new(90, 90, 100);
pub const GHOST_FG: Rgb = Rgb::new(140, 140, 140);
pub const BORDER_FG: Rgb = Rgb::new(200, 200, 200);
pub const TEXT_FG: Rgb = Rgb::new(220, 220, 220);
pub const MUTED_FG: Rgb = Rgb::new(150, 150, 160);
pub const MESSAGE_FG: Rgb = Rgb::new(0xff, 0xd7, 0x00);
