//! GameView: maps a [`GameSnapshot`] (plus effects) into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Tetromino};
use crate::effects::Effects;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::palette::*;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Frame geometry of the board for one render.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

const PREVIEW_ROWS: u16 = 4;

const KEY_HELP: [(&str, &str); 6] = [
    ("←→", "move"),
    ("↑", "rotate"),
    ("↓", "soft drop"),
    ("SPC", "hard drop"),
    ("P", "pause"),
    ("N", "new game"),
];

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
            show_ghost: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_effects(snap, None, viewport, fb);
    }

    pub fn render_into_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: Option<&Effects>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame(viewport);

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            CellStyle::new(GRID_FG, BOARD_BG),
        );
        draw_border(fb, frame, CellStyle::new(BORDER_FG, SCREEN_BG));

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_block(fb, frame, x as i8, y as i8, *kind),
                    None => self.fill_cell(
                        fb,
                        frame,
                        x as i8,
                        y as i8,
                        '·',
                        CellStyle::new(GRID_FG, BOARD_BG).dim(),
                    ),
                }
            }
        }

        if self.show_ghost && !snap.game_over {
            if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
                let ghost = Tetromino { y: ghost_y, ..active };
                let style = CellStyle::new(GHOST_FG, BOARD_BG).dim();
                for (x, y) in ghost.cells() {
                    self.fill_cell(fb, frame, x, y, '░', style);
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                self.draw_block(fb, frame, x, y, active.kind);
            }
        }

        if let Some(fx) = effects {
            self.draw_effects(fb, frame, fx);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if !snap.started {
            draw_overlay_text(fb, frame, 0, "PRESS N TO START");
        } else if snap.game_over {
            draw_overlay_text(fb, frame, 0, "GAME OVER");
            draw_overlay_text(fb, frame, 2, "PRESS N TO RESTART");
        } else if snap.paused {
            draw_overlay_text(fb, frame, 0, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: Option<&Effects>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_effects(snap, effects, viewport, &mut fb);
        fb
    }

    /// Terminal position of the top-left corner of a board cell.
    pub fn cell_origin(&self, viewport: Viewport, x: u16, y: u16) -> (u16, u16) {
        let frame = self.frame(viewport);
        (frame.x + 1 + x * self.cell_w, frame.y + 1 + y * self.cell_h)
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), BOARD_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    /// Fill one board cell; cells outside the board (e.g. above the top) are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Map a fractional board position to a terminal cell inside the frame.
    fn effect_pos(&self, frame: Frame, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..BOARD_WIDTH as f32).contains(&x) || !(0.0..BOARD_HEIGHT as f32).contains(&y) {
            return None;
        }
        let px = frame.x + 1 + (x * self.cell_w as f32) as u16;
        let py = frame.y + 1 + (y * self.cell_h as f32) as u16;
        Some((px, py))
    }

    fn draw_effects(&self, fb: &mut FrameBuffer, frame: Frame, fx: &Effects) {
        for p in fx.particles() {
            if let Some((px, py)) = self.effect_pos(frame, p.x, p.y) {
                let fg = BOARD_BG.mix(p.color, p.life);
                fb.overlay_char(px, py, '•', fg, false);
            }
        }

        for c in fx.confetti() {
            if let Some((px, py)) = self.effect_pos(frame, c.x, c.y) {
                let fg = BOARD_BG.mix(c.color, c.opacity(fx.clock_ms()));
                let ch = if c.sparkle { '✦' } else { '▪' };
                fb.overlay_char(px, py, ch, fg, c.sparkle);
            }
        }

        if let Some(msg) = fx.message() {
            let fg = BOARD_BG.mix(MESSAGE_FG, msg.opacity());
            let text_w = msg.text.chars().count() as u16;
            let x = frame.x + frame.w.saturating_sub(text_w) / 2;
            let y = frame.y + frame.h / 4;
            for (i, ch) in msg.text.chars().enumerate() {
                fb.overlay_char(x + i as u16, y, ch, fg, true);
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(TEXT_FG, SCREEN_BG).bold();
        let value = CellStyle::new(TEXT_FG, SCREEN_BG);
        let muted = CellStyle::new(MUTED_FG, SCREEN_BG).dim();

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            let style = CellStyle::new(piece_color(next.kind), SCREEN_BG).bold();
            for (dx, dy) in next.shape.offsets() {
                let px = panel_x + (dx as u16) * 2;
                let py = y + dy as u16;
                fb.put_str(px, py, "██", style);
            }
        }
        y = y.saturating_add(PREVIEW_ROWS + 1);

        if panel_w < 16 {
            return;
        }
        for (key, what) in KEY_HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, value);
            fb.put_str(panel_x + 4, y, what, muted);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centred text `offset` rows below the middle of the board.
fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, offset: u16, text: &str) {
    let y = frame.y + frame.h / 2 + offset;
    let text_w = text.chars().count() as u16;
    let x = frame.x + frame.w.saturating_sub(text_w) / 2;
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    fb.put_str(x, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width()).map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' ')).collect()
    }

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height()).map(|y| row_text(fb, y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn idle_game_shows_start_prompt() {
        let state = GameState::new(1);
        let fb = GameView::default().render(&state.snapshot(), Viewport::new(60, 24));
        assert!(screen_text(&fb).contains("PRESS N TO START"));
    }

    #[test]
    fn active_and_ghost_pieces_are_drawn() {
        let mut state = GameState::new(1);
        state.start();
        let snap = state.snapshot();
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let vp = Viewport::new(60, 24);
        let fb = view.render(&snap, vp);

        let active = snap.active.unwrap();
        for (x, y) in active.cells() {
            let (px, py) = view.cell_origin(vp, x as u16, y as u16);
            let cell = fb.get(px, py).unwrap();
            assert_eq!(cell.ch, '█');
            assert_eq!(cell.style.fg, piece_color(active.kind));
        }

        let ghost_y = snap.ghost_y.unwrap();
        let ghost = Tetromino { y: ghost_y, ..active };
        for (x, y) in ghost.cells() {
            let (px, py) = view.cell_origin(vp, x as u16, y as u16);
            assert_eq!(fb.get(px, py).unwrap().ch, '░');
        }

        let no_ghost = view.with_ghost(false).render(&snap, vp);
        assert!(!screen_text(&no_ghost).contains('░'));
    }

    #[test]
    fn side_panel_shows_score_and_next() {
        let mut state = GameState::new(9);
        state.start();
        let state = state.with_score(1234);
        let fb = GameView::default().render(&state.snapshot(), Viewport::new(60, 24));
        let text = screen_text(&fb);
        assert!(text.contains("SCORE"));
        assert!(text.contains("1234"));
        assert!(text.contains("LEVEL"));
        assert!(text.contains("NEXT"));
        assert!(text.contains("██"));
    }

    #[test]
    fn pause_overlay() {
        let mut state = GameState::new(1);
        state.start();
        state.toggle_pause();
        let fb = GameView::default().render(&state.snapshot(), Viewport::new(60, 24));
        assert!(screen_text(&fb).contains("PAUSED"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let mut state = GameState::new(1);
        state.start();
        let snap = state.snapshot();
        for (w, h) in [(0, 0), (1, 1), (10, 5), (23, 22)] {
            let fb = GameView::default().render(&snap, Viewport::new(w, h));
            assert_eq!(fb.width(), w);
        }
    }
}
