/*
 * Wayfarer, a chess engine
 * Copyright (C) 2026 The Wayfarer Authors
 *
 * Wayfarer is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Wayfarer is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Wayfarer. If not, see <https://www.gnu.org/licenses/>.
 */

//! Static position evaluation: material, piece-square tables, and the
//! bishop-pair bonus. No search, no phase tapering — every component is a
//! flat, depth-independent number of centipawns.

use crate::{
    board::Position,
    defs::{Color, PieceKind, PieceType, Side, Square},
};

/// A centipawn evaluation. Positive favors the engine.
pub type Eval = i32;

/// The highest possible (positive) evaluation, a sentinel beyond every
/// reachable score.
pub const MAX_EVAL: Eval = 1_000_000;
/// The lowest possible evaluation.
pub const MIN_EVAL: Eval = -MAX_EVAL;
/// The lowest score that counts as a forced mate rather than a material
/// edge, leaving room below `MAX_EVAL` for [`MAX_DEPTH`](crate::search::MAX_DEPTH)
/// plies of mate-distance adjustment.
pub const MATE_BOUND: Eval = MAX_EVAL - 1000;
/// The evaluation of a draw, ignoring contempt.
pub const DRAW: Eval = 0;
/// The bonus (or penalty) applied to a side holding both bishops.
const BISHOP_PAIR_BONUS: Eval = 150;

/// Piece-square values for pawns, indexed a1..h8. Back ranks are zeroed
/// since pawns never occupy them. Taken from the middlegame half of PeSTO's
/// pawn table.
#[rustfmt::skip]
const PAWN_TABLE: [Eval; Square::TOTAL] = [
    0, 0, 0, 0, 0, 0, 0, 0,
    -35, -1, -20, -23, -15, 24, 38, -22,
    -26, -4, -4, -10, 3, 3, 33, -12,
    -27, -2, -5, 12, 17, 6, 10, -25,
    -14, 13, 6, 21, 23, 12, 17, -23,
    -6, 7, 26, 31, 65, 56, 25, -20,
    98, 134, 61, 95, 68, 126, 34, -11,
    0, 0, 0, 0, 0, 0, 0, 0,
];

/// Piece-square values for knights, indexed a1..h8.
#[rustfmt::skip]
const KNIGHT_TABLE: [Eval; Square::TOTAL] = [
    -105, -21, -58, -33, -17, -28, -19, -23,
    -29, -53, -12, -3, -1, 18, -14, -19,
    -23, -9, 12, 10, 19, 17, 25, -16,
    -13, 4, 16, 13, 28, 19, 21, -8,
    -9, 17, 19, 53, 37, 69, 18, 22,
    -47, 60, 37, 65, 84, 129, 73, 44,
    -73, -41, 72, 36, 23, 62, 7, -17,
    -167, -89, -34, -49, 61, -97, -15, -107,
];

/// Piece-square values for bishops, indexed a1..h8.
#[rustfmt::skip]
const BISHOP_TABLE: [Eval; Square::TOTAL] = [
    -33, -3, -14, -21, -13, -12, -39, -21,
    4, 15, 16, 0, 7, 21, 33, 1,
    0, 15, 15, 15, 14, 27, 18, 10,
    -6, 13, 13, 26, 34, 12, 10, 4,
    -4, 5, 19, 50, 37, 37, 7, -2,
    -16, 37, 43, 40, 35, 50, 37, -2,
    -26, 16, -18, -13, 30, 59, 18, -47,
    -29, 4, -82, -37, -25, -42, 7, -8,
];

/// Looks up the piece-square value for `piece_type` on `square`, from the
/// perspective of whichever physical color occupies it. White reads the
/// table as given; Black reads it vertically mirrored, so the same
/// file-relative topology (advanced pawns good, rim knights bad) applies
/// from across the board. Rooks, queens and kings have no table.
///
/// Pieces sit at physical squares regardless of which color the engine is
/// playing, so this must mirror on physical color, not on the `Us`/`Them`
/// role. Mirroring on role would read White's table upside down whenever
/// the engine plays Black.
fn piece_square_value(piece_type: PieceType, square: Square, color: Color) -> Eval {
    let table = match piece_type.0 {
        0 => &PAWN_TABLE,
        1 => &KNIGHT_TABLE,
        2 => &BISHOP_TABLE,
        _ => return 0,
    };
    let index = if color.0 == Color::WHITE.0 {
        square.to_index()
    } else {
        square.to_index() ^ 56
    };
    table[index]
}

/// Evaluates `position` from the engine's perspective: positive means the
/// engine is better.
///
/// Pure function of `position`; no side effects, no search.
#[must_use]
pub fn evaluate(position: &Position) -> Eval {
    let mut score: Eval = 0;

    for side in [Side::US, Side::THEM] {
        let sign: Eval = if side.0 == Side::US.0 { 1 } else { -1 };
        let color = position.color_of(side);

        for piece_type in [
            PieceType::PAWN,
            PieceType::KNIGHT,
            PieceType::BISHOP,
            PieceType::ROOK,
            PieceType::QUEEN,
            PieceType::KING,
        ] {
            let bb = position.pieces(PieceKind::new(piece_type, side));
            let count = Eval::try_from(bb.popcount()).unwrap_or(Eval::MAX);
            score += sign * count * piece_type.value();

            for square in bb {
                score += sign * piece_square_value(piece_type, square, color);
            }
        }

        let bishops = position.pieces(PieceKind::new(PieceType::BISHOP, side));
        if bishops.popcount() >= 2 {
            score += sign * BISHOP_PAIR_BONUS;
        }
    }

    score
}

/// The score of a forced mate delivered `ply` plies from the current node:
/// prefers shallower mates over deeper ones.
#[must_use]
pub const fn mate_in(ply: i32) -> Eval {
    MAX_EVAL - ply
}

/// The score of being mated `ply` plies from the current node.
#[must_use]
pub const fn mated_in(ply: i32) -> Eval {
    -MAX_EVAL + ply
}

/// Tests whether `score` represents a forced mate (for either side).
#[must_use]
pub const fn is_mate(score: Eval) -> bool {
    score >= MATE_BOUND || score <= -MATE_BOUND
}

#[cfg(test)]
mod tests {
    use super::{evaluate, is_mate, mate_in, mated_in};
    use crate::board::Position;

    #[test]
    fn startpos_is_exactly_balanced() {
        let position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .expect("valid FEN");
        assert_eq!(evaluate(&position), 0);
    }

    #[test]
    fn missing_engine_queen_is_a_large_penalty() {
        let with_queen =
            Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .expect("valid FEN");
        let without_queen =
            Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1")
                .expect("valid FEN");
        assert!(evaluate(&without_queen) < evaluate(&with_queen) - 900);
    }

    #[test]
    fn engine_pawn_near_promotion_scores_well_when_engine_plays_black() {
        // The engine plays whichever color is to move in the FEN, so with
        // black to move here `engine_color` is black and this pawn is `Us`.
        // Mirroring the PeSTO table on physical color (not on the Us/Them
        // role) must still read it as one step from promoting.
        let near_promotion =
            Position::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").expect("valid FEN");
        let just_started =
            Position::from_fen("4k3/p7/8/8/8/8/8/4K3 b - - 0 1").expect("valid FEN");
        assert!(evaluate(&near_promotion) > evaluate(&just_started));
    }

    #[test]
    fn bishop_pair_is_rewarded_over_bishop_and_knight() {
        let pair = Position::from_fen("4k3/8/8/8/8/8/8/2B1BK2 w - - 0 1").expect("valid FEN");
        let mixed = Position::from_fen("4k3/8/8/8/8/8/8/2B1NK2 w - - 0 1").expect("valid FEN");
        assert!(evaluate(&pair) > evaluate(&mixed));
    }

    #[test]
    fn mate_scores_prefer_the_shallower_mate() {
        assert!(mate_in(1) > mate_in(3));
        assert!(mated_in(1) < mated_in(3));
        assert!(is_mate(mate_in(5)));
        assert!(!is_mate(0));
    }
}
