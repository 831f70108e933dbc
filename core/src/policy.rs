// SPDX-License-Identifier: MIT OR Apache-2.0

//! Computer opponent move selection.
//!
//! Pure functions over a read-only board view; simulations run on a scratch
//! copy and never touch the real board.

use crate::board::Board;
use crate::{OpponentMode, Side};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick a move from `moves` (legal moves for `side`, row-major order).
///
/// `active_stone` is the stone that would actually be placed this turn and
/// `maybe_armed` whether the radius-1 flip rule applies; both feed the
/// greedy simulation. Returns `None` for the human mode, which never picks.
pub fn choose_move(
    mode: OpponentMode,
    board: &Board,
    moves: &[(usize, usize)],
    side: Side,
    active_stone: Side,
    maybe_armed: bool,
    rng: &mut impl Rng,
) -> Option<(usize, usize)> {
    match mode {
        OpponentMode::Human => None,
        OpponentMode::Random => moves.choose(rng).copied(),
        OpponentMode::Greedy => greedy_move(board, moves, side, active_stone, maybe_armed),
    }
}

/// One-ply greedy: simulate every candidate and keep the one that leaves
/// `side` with the most stones. Ties go to the first candidate encountered,
/// which is deterministic because `moves` is row-major.
fn greedy_move(
    board: &Board,
    moves: &[(usize, usize)],
    side: Side,
    active_stone: Side,
    maybe_armed: bool,
) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), usize)> = None;
    for &mv in moves {
        let score = simulate_move(board, mv, side, active_stone, maybe_armed);
        let improves = match best {
            Some((_, best_score)) => score > best_score,
            None => true,
        };
        if improves {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}

/// Apply one candidate placement to a scratch board, with the same
/// semantics the engine uses (flips computed for the placed stone, then the
/// maybe radius rule), and count `side`'s resulting stones.
fn simulate_move(
    board: &Board,
    (row, col): (usize, usize),
    side: Side,
    active_stone: Side,
    maybe_armed: bool,
) -> usize {
    let mut scratch = board.clone();
    scratch.place(row, col, active_stone);
    if maybe_armed {
        scratch.flip_adjacent(row, col, active_stone);
    }
    scratch.count(side)
}
