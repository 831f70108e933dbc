// SPDX-License-Identifier: MIT OR Apache-2.0

use yesno_core::{Board, Side};

#[test]
fn standard_start_layout() {
    let board = Board::standard_start();
    assert_eq!(board.get(3, 3), Some(Side::No));
    assert_eq!(board.get(4, 4), Some(Side::No));
    assert_eq!(board.get(3, 4), Some(Side::Yes));
    assert_eq!(board.get(4, 3), Some(Side::Yes));
    assert_eq!(board.scores(), (2, 2));
    assert!(!board.is_full());
}

#[test]
fn opening_legal_moves_are_row_major() {
    let board = Board::standard_start();
    assert_eq!(
        board.legal_moves(Side::Yes),
        vec![(2, 3), (3, 2), (4, 5), (5, 4)]
    );
    assert_eq!(
        board.legal_moves(Side::No),
        vec![(2, 4), (3, 5), (4, 2), (5, 3)]
    );
}

#[test]
fn occupied_cell_is_never_legal() {
    let board = Board::standard_start();
    assert!(!board.is_valid_move(3, 3, Side::Yes));
    assert!(!board.is_valid_move(3, 4, Side::Yes));
}

#[test]
fn zero_length_run_does_not_count() {
    // A lone own stone next to the candidate is not a sandwich.
    let mut board = Board::empty();
    board.set(0, 0, Some(Side::Yes));
    assert!(!board.is_valid_move(0, 1, Side::Yes));
}

#[test]
fn run_must_be_bounded_within_the_grid() {
    // Opponent run ending at the edge with no bounding stone: not legal.
    let mut board = Board::empty();
    board.set(0, 0, Some(Side::No));
    board.set(0, 1, Some(Side::No));
    board.set(0, 2, Some(Side::No));
    assert!(!board.is_valid_move(0, 3, Side::Yes));

    // A bounded run in another direction makes the same cell legal.
    board.set(0, 4, Some(Side::No));
    board.set(0, 5, Some(Side::Yes));
    assert!(board.is_valid_move(0, 3, Side::Yes));
}

#[test]
fn place_flips_exactly_the_bounded_runs() {
    let mut board = Board::empty();
    board.set(2, 0, Some(Side::Yes));
    board.set(2, 1, Some(Side::No));
    board.set(2, 2, Some(Side::No));
    board.set(2, 4, Some(Side::No));
    board.set(2, 5, Some(Side::Yes));
    // An unrelated opponent stone that must not be touched.
    board.set(5, 5, Some(Side::No));

    let flipped = board.place(2, 3, Side::Yes);
    assert_eq!(flipped, 3, "both bounded runs flip, nothing else");
    assert_eq!(board.get(2, 1), Some(Side::Yes));
    assert_eq!(board.get(2, 2), Some(Side::Yes));
    assert_eq!(board.get(2, 4), Some(Side::Yes));
    assert_eq!(board.get(5, 5), Some(Side::No), "distant stone untouched");
}

#[test]
fn place_skips_runs_without_a_bound() {
    let mut board = Board::empty();
    board.set(0, 0, Some(Side::No));
    board.set(0, 1, Some(Side::No));
    board.set(0, 2, Some(Side::No));

    let flipped = board.place(0, 3, Side::Yes);
    assert_eq!(flipped, 0, "run ends at the edge, nothing flips");
    assert_eq!(board.get(0, 3), Some(Side::Yes));
    assert_eq!(board.get(0, 0), Some(Side::No));
    assert_eq!(board.get(0, 1), Some(Side::No));
    assert_eq!(board.get(0, 2), Some(Side::No));
}

#[test]
fn mismatched_stone_may_occupy_without_flipping() {
    // Legality holds for YES at (2,3) in the opening, but the stone that
    // actually lands can be NO's, and then no direction is bounded for it.
    let mut board = Board::standard_start();
    assert!(board.is_valid_move(2, 3, Side::Yes));

    let flipped = board.place(2, 3, Side::No);
    assert_eq!(flipped, 0);
    assert_eq!(board.get(2, 3), Some(Side::No));
    assert_eq!(board.scores(), (2, 3));
}

#[test]
fn opening_capture_flips_the_sandwiched_stone() {
    let mut board = Board::standard_start();
    let flipped = board.place(2, 3, Side::Yes);
    assert_eq!(flipped, 1);
    assert_eq!(board.get(3, 3), Some(Side::Yes));
    assert_eq!(board.scores(), (4, 1));
}

#[test]
fn flip_adjacent_only_touches_opponent_neighbors() {
    let mut board = Board::empty();
    board.set(3, 3, Some(Side::Yes));
    board.set(2, 2, Some(Side::No));
    board.set(2, 3, Some(Side::Yes));
    board.set(4, 4, Some(Side::No));
    board.set(3, 5, Some(Side::No)); // distance 2, out of the radius

    let flipped = board.flip_adjacent(3, 3, Side::Yes);
    assert_eq!(flipped, 2);
    assert_eq!(board.get(2, 2), Some(Side::Yes));
    assert_eq!(board.get(4, 4), Some(Side::Yes));
    assert_eq!(board.get(2, 3), Some(Side::Yes), "own stone untouched");
    assert_eq!(board.get(3, 5), Some(Side::No), "radius is exactly one");
}

#[test]
fn flip_adjacent_is_safe_in_the_corner() {
    let mut board = Board::empty();
    board.set(0, 0, Some(Side::Yes));
    board.set(0, 1, Some(Side::No));
    board.set(1, 1, Some(Side::No));

    let flipped = board.flip_adjacent(0, 0, Side::Yes);
    assert_eq!(flipped, 2);
    assert_eq!(board.get(0, 1), Some(Side::Yes));
    assert_eq!(board.get(1, 1), Some(Side::Yes));
}

#[test]
fn full_board_detection() {
    let mut board = Board::empty();
    for row in 0..yesno_core::BOARD_SIZE {
        for col in 0..yesno_core::BOARD_SIZE {
            board.set(row, col, Some(if (row + col) % 2 == 0 { Side::Yes } else { Side::No }));
        }
    }
    assert!(board.is_full());
    assert_eq!(board.scores(), (32, 32));
}
