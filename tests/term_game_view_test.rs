use blockfall::core::{Board, GameState, Tetromino};
use blockfall::term::{piece_color, AnchorY, Effects, FrameBuffer, GameView, Viewport};
use blockfall::types::PieceKind;

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let state = GameState::new(1);
    let snap = state.snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1 the board is 20x20, plus border => 22x22.
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][0] = Some(PieceKind::Z);

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::Z));
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut gs = GameState::new(1);
    gs.start();
    let mut snap = gs.snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let view = GameView::default();
    let all = screen_text(&view.render(&snap, Viewport::new(60, 22)));
    for needle in ["SCORE", "1234", "LEVEL", "LINES", "NEXT", "pause"] {
        assert!(all.contains(needle), "missing {needle}");
    }

    let narrow = screen_text(&view.render(&snap, Viewport::new(22, 22)));
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn term_view_next_preview_uses_piece_color() {
    let mut gs = GameState::new(4);
    gs.start();
    let snap = gs.snapshot();
    let next = snap.next.unwrap();

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let color = piece_color(next.kind);
    // Panel starts two columns right of the 22-wide frame at x=(60-22)/2.
    let panel_x = (60 - 22) / 2 + 22 + 2;
    let preview = (panel_x..60)
        .flat_map(|x| (0..22).map(move |y| (x, y)))
        .filter(|&(x, y)| {
            let cell = fb.get(x, y).unwrap();
            cell.ch == '█' && cell.style.fg == color
        })
        .count();
    // Four cells, two columns each.
    assert_eq!(preview, 8);
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let state = GameState::new(1);
    let snap = state.snapshot();
    let view = GameView::default();

    let fb = view.render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let state = GameState::new(1);
    let snap = state.snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut board = Board::new();
    for y in 0..2 {
        for x in 3..8 {
            board.set(x, y, Some(PieceKind::S));
        }
    }
    let gs = GameState::from_position(1, board, Tetromino::new(PieceKind::O));
    assert!(gs.game_over());

    let all = screen_text(&GameView::default().render(&gs.snapshot(), Viewport::new(40, 24)));
    assert!(all.contains("GAME OVER"));
    assert!(!all.contains("PAUSED"));
}

#[test]
fn term_view_draws_line_clear_effects() {
    let mut board = Board::new();
    for x in 1..10 {
        board.set(x, 19, Some(PieceKind::J));
    }
    let mut piece = Tetromino::new(PieceKind::I);
    piece.shape = piece.shape.rotated_cw();
    piece.x = 0;
    piece.y = 0;
    let mut gs = GameState::from_position(1, board, piece);
    gs.hard_drop();

    let mut effects = Effects::new(5, true);
    effects.on_lock(&gs.take_last_event().unwrap());

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render_with_effects(&gs.snapshot(), Some(&effects), Viewport::new(40, 24));
    let all = screen_text(&fb);
    assert!(all.contains("LINE CLEAR"));

    // Fresh particles sit on the cleared row, one per board cell column pair.
    let bottom = (0..40).filter(|&x| fb.get(x, 20).unwrap().ch == '•').count();
    assert!(bottom >= 9, "only {bottom} particles on the cleared row");

    let plain = screen_text(&view.render(&gs.snapshot(), Viewport::new(40, 24)));
    assert!(!plain.contains("LINE CLEAR"));
    assert!(!plain.contains('•'));
}
