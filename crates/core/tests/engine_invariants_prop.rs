//! Property tests for the movement and line-clear rules.
//!
//! - A move or rotation whose target overlaps a wall, the floor or a frozen
//!   cell is rejected and leaves the piece exactly where it was.
//! - Full rows vanish, everything above shifts down, empty rows appear at the
//!   top, and the score rises by `100 * level` per cleared row.

use proptest::prelude::*;

use blockfall_core::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
use blockfall_core::{Board, GameState, Tetromino};

const W: i8 = BOARD_WIDTH as i8;
const H: i8 = BOARD_HEIGHT as i8;

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

fn board_from_mask(mask: &[bool]) -> Board {
    let mut board = Board::new();
    for (i, filled) in mask.iter().enumerate() {
        if *filled {
            board.set((i % W as usize) as i8, (i / W as usize) as i8, Some(PieceKind::Z));
        }
    }
    board
}

fn piece(kind: PieceKind, turns: u8, x: i8, y: i8) -> Tetromino {
    let mut p = Tetromino::new(kind);
    for _ in 0..turns {
        p.shape = p.shape.rotated_cw();
    }
    p.x = x;
    p.y = y;
    p
}

/// Like [`piece`], but folds `x` into the columns where the shape fits.
fn piece_in_bounds(kind: PieceKind, turns: u8, x: u8, y: i8) -> Tetromino {
    let p = piece(kind, turns, 0, y);
    let span = (W - p.shape.cols() as i8 + 1) as u8;
    Tetromino { x: (x % span) as i8, ..p }
}

fn overlaps(board: &Board, p: &Tetromino) -> bool {
    p.cells()
        .any(|(x, y)| x < 0 || x >= W || y >= H || (y >= 0 && board.is_occupied(x, y)))
}

#[derive(Debug, Clone, Copy)]
enum Attempt {
    Left,
    Right,
    Rotate,
}

fn attempt_strategy() -> impl Strategy<Value = Attempt> {
    prop_oneof![Just(Attempt::Left), Just(Attempt::Right), Just(Attempt::Rotate)]
}

proptest! {
    #[test]
    fn colliding_moves_leave_piece_unchanged(
        mask in proptest::collection::vec(proptest::bool::weighted(0.15), (W as usize) * (H as usize)),
        kind in kind_strategy(),
        turns in 0u8..4,
        x in 0u8..10,
        y in 0i8..17,
        attempt in attempt_strategy(),
    ) {
        let board = board_from_mask(&mask);
        let start = piece_in_bounds(kind, turns, x, y);
        prop_assume!(!overlaps(&board, &start));

        let target = match attempt {
            Attempt::Left => Tetromino { x: start.x - 1, ..start },
            Attempt::Right => Tetromino { x: start.x + 1, ..start },
            Attempt::Rotate => Tetromino { shape: start.shape.rotated_cw(), ..start },
        };

        let mut state = GameState::from_position(1, board.clone(), start);
        let accepted = match attempt {
            Attempt::Left => state.move_left(),
            Attempt::Right => state.move_right(),
            Attempt::Rotate => state.rotate(),
        };

        if overlaps(&board, &target) {
            prop_assert!(!accepted);
            prop_assert_eq!(state.active(), Some(start));
        } else {
            prop_assert!(accepted);
            prop_assert_eq!(state.active(), Some(target));
        }
        prop_assert_eq!(state.board(), &board);
    }

    #[test]
    fn blocked_move_down_freezes_in_place(
        mask in proptest::collection::vec(proptest::bool::weighted(0.15), (W as usize) * (H as usize)),
        kind in kind_strategy(),
        turns in 0u8..4,
        x in 0u8..10,
    ) {
        let board = board_from_mask(&mask);

        // First free spot from the top, then fall to the landing row.
        let column = piece_in_bounds(kind, turns, x, 0);
        let free_y = (0..H).find(|&y| !overlaps(&board, &Tetromino { y, ..column }));
        prop_assume!(free_y.is_some());
        let mut start = Tetromino { y: free_y.unwrap_or(0), ..column };
        while !overlaps(&board, &Tetromino { y: start.y + 1, ..start }) {
            start.y += 1;
        }

        let mut state = GameState::from_position(1, board, start);
        prop_assert!(!state.move_down());

        let event = state.take_last_event().expect("freeze event");
        if event.rows.is_empty() {
            for (cx, cy) in start.cells() {
                prop_assert_eq!(state.board().get(cx, cy), Some(Some(kind)));
            }
        }
    }

    #[test]
    fn full_rows_clear_and_score_per_row(
        upper in proptest::collection::vec(proptest::bool::weighted(0.2), (W as usize) * 8),
        full in proptest::collection::vec(any::<bool>(), 4),
        holes in proptest::collection::vec(1i8..10, 4),
        score in 0u32..20_000,
    ) {
        // Rows 8..16 carry random debris (never full: column 0 stays empty).
        // Rows 16..20 are filled except column 0 and, for non-full rows, one hole.
        let mut board = Board::new();
        for (i, filled) in upper.iter().enumerate() {
            let x = (i % W as usize) as i8;
            if *filled && x != 0 {
                board.set(x, 8 + (i / W as usize) as i8, Some(PieceKind::S));
            }
        }
        for r in 0..4usize {
            let y = 16 + r as i8;
            for x in 1..W {
                if full[r] || x != holes[r] {
                    board.set(x, y, Some(PieceKind::L));
                }
            }
        }

        // A vertical I in column 0 completes every row marked full.
        let i_piece = piece(PieceKind::I, 1, 0, 16);
        let mut state = GameState::from_position(1, board, i_piece).with_score(score);
        let level = state.level();

        let mut before = Board::new();
        for y in 0..H {
            for x in 0..W {
                before.set(x, y, state.board().get(x, y).flatten());
            }
        }
        for y in 16..H {
            before.set(0, y, Some(PieceKind::I));
        }

        state.freeze();

        let cleared = full.iter().filter(|f| **f).count();
        prop_assert_eq!(state.score(), score + 100 * level * cleared as u32);
        prop_assert_eq!(state.lines() as usize, cleared);

        // Surviving rows keep their order and settle at the bottom.
        let survivors: Vec<i8> = (0..H).filter(|&y| y < 16 || !full[(y - 16) as usize]).collect();
        let offset = H as usize - survivors.len();
        for (i, &old_y) in survivors.iter().enumerate() {
            let new_y = (offset + i) as i8;
            for x in 0..W {
                prop_assert_eq!(state.board().get(x, new_y), before.get(x, old_y));
            }
        }
        for y in 0..offset as i8 {
            for x in 0..W {
                prop_assert_eq!(state.board().get(x, y), Some(None));
            }
        }
    }
}
