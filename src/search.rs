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

use std::time::Instant;

use arrayvec::ArrayVec;
use log::{debug, warn};

use crate::{
    board::Position,
    defs::{PieceType, Side},
    evaluation::{evaluate, mated_in, Eval, MAX_EVAL, MIN_EVAL},
    movegen::{generate, king_attacked, Move, Moves, MAX_LEGAL_MOVES},
    transposition_table::{Bound, TranspositionTable, DEFAULT_SIZE},
    zobrist::Key,
};

/// The deepest iterative-deepening depth attempted. Also doubles as the
/// ceiling mate-distance scores are measured against.
pub const MAX_DEPTH: u8 = 100;

/// The evaluation threshold below which the engine would rather draw than
/// play on: four pawns.
const CONTEMPT: Eval = 4 * PieceType::PAWN.value();

/// A move together with its ordering score, scanned in place by
/// [`select_next`].
type Scores = ArrayVec<Eval, MAX_LEGAL_MOVES>;

/// Owns everything a search needs across recursive calls: the
/// transposition table and the stack of hashes reached so far in the
/// current game, used to detect threefold repetition.
pub struct Search {
    /// Remembered evaluations from previous visits to a position.
    tt: TranspositionTable,
    /// Hashes of every position reached so far along the current line,
    /// game moves and in-progress search moves alike.
    repetitions: Vec<Key>,
    /// Nodes visited during the iteration currently in progress, reset at
    /// the start of each depth and reported once it completes.
    nodes: u64,
}

impl Search {
    /// Builds a search with a default-sized transposition table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tt_capacity(DEFAULT_SIZE)
    }

    /// Builds a search with a transposition table of exactly `tt_size`
    /// slots.
    #[must_use]
    pub fn with_tt_capacity(tt_size: usize) -> Self {
        Self {
            tt: TranspositionTable::with_capacity(tt_size),
            repetitions: Vec::new(),
            nodes: 0,
        }
    }

    /// Nodes visited during the most recently completed (or abandoned)
    /// iterative-deepening depth. Reported by the CLI harness and the
    /// throughput benchmark; not used by the search itself.
    #[must_use]
    pub const fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Records a move actually played in the game (as opposed to one
    /// explored and unmade during search), so future repetition detection
    /// sees it. Clears the history first if the move is irreversible,
    /// since no earlier position can recur across it.
    pub fn note_move_played(&mut self, hash: Key, irreversible: bool) {
        if irreversible {
            self.repetitions.clear();
        }
        self.repetitions.push(hash);
    }

    /// Finds the best move for `position.side_to_move()` within
    /// `budget_ms` milliseconds of wall-clock time.
    ///
    /// Returns [`Move::NULL`] if `position` has no legal moves; the caller
    /// must consult [`Position::king_attacked`] to tell checkmate from
    /// stalemate.
    #[must_use]
    pub fn best_move(&mut self, position: &mut Position, budget_ms: u32) -> Move {
        let mut root_moves = Moves::new();
        generate(position, &mut root_moves);
        if root_moves.is_empty() {
            return Move::NULL;
        }

        let start = Instant::now();
        let mut best = root_moves[0];
        let mut completed_any = false;

        for depth in 1..=MAX_DEPTH {
            self.nodes = 0;
            let mv = self.iterate(position, depth, start, budget_ms);
            if mv.is_null() {
                if !completed_any {
                    warn!(
                        "budget of {budget_ms}ms exhausted before depth 1 completed; falling back to {best}"
                    );
                }
                break;
            }
            best = mv;
            completed_any = true;
            debug!(
                "depth {depth} complete: best move {best}, {} nodes, {}ms elapsed",
                self.nodes,
                start.elapsed().as_millis()
            );
        }

        if best.is_irreversible() {
            self.repetitions.clear();
        }
        best
    }

    /// Searches every root move to `depth`, returning the one with the
    /// highest score, or [`Move::NULL`] if `budget_ms` ran out before the
    /// pass could finish.
    fn iterate(&mut self, position: &mut Position, depth: u8, start: Instant, budget_ms: u32) -> Move {
        let mut moves = Moves::new();
        generate(position, &mut moves);
        if moves.is_empty() {
            return Move::NULL;
        }

        let tt_best = self.tt.load(position.hash()).map(|hit| hit.best_move);
        let mut scores = score_moves(&moves, tt_best);

        let mut best_move = Move::NULL;
        let mut best_score = MIN_EVAL;

        for index in 0..moves.len() {
            if elapsed_ms(start) > u128::from(budget_ms) {
                return Move::NULL;
            }

            select_next(&mut moves, &mut scores, index);
            let mv = moves[index];

            let rights = position.rights();
            position.make(mv);
            self.repetitions.push(position.hash());

            let score = -self.negamax(position, depth - 1, MIN_EVAL, MAX_EVAL);

            self.repetitions.pop();
            position.unmake(mv, rights);

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        best_move
    }

    /// The negamax workhorse: returns a score from `position.side_to_move()`'s
    /// perspective, searched to `depth` plies within the window `(alpha,
    /// beta)`.
    fn negamax(&mut self, position: &mut Position, depth: u8, alpha: Eval, beta: Eval) -> Eval {
        self.nodes += 1;

        let hash = position.hash();
        if self.is_repetition(hash) || position.half_move_clock() >= 50 {
            return -CONTEMPT;
        }

        let original_alpha = alpha;
        let original_beta = beta;
        let mut alpha = alpha;
        let mut beta = beta;

        let tt_hit = self.tt.load(hash);
        if let Some(hit) = tt_hit {
            if hit.depth >= depth {
                match hit.bound {
                    Bound::Exact => return hit.evaluation,
                    Bound::Lower if hit.evaluation > alpha => alpha = hit.evaluation,
                    Bound::Upper if hit.evaluation < beta => beta = hit.evaluation,
                    Bound::Lower | Bound::Upper => {}
                }
                if alpha >= beta {
                    return hit.evaluation;
                }
            }
        }

        if depth == 0 {
            let eval = evaluate(position);
            let score = if position.side_to_move().0 == Side::US.0 { eval } else { -eval };
            self.tt.store(hash, Move::NULL, depth, score, Bound::Exact);
            return score;
        }

        let mut moves = Moves::new();
        generate(position, &mut moves);
        if moves.is_empty() {
            return if king_attacked(position, position.side_to_move()) {
                mated_in(i32::from(MAX_DEPTH - depth))
            } else {
                -CONTEMPT
            };
        }

        let tt_best = tt_hit.map(|hit| hit.best_move);
        let mut scores = score_moves(&moves, tt_best);

        let mut best_score = MIN_EVAL;
        let mut best_move = moves[0];

        for index in 0..moves.len() {
            select_next(&mut moves, &mut scores, index);
            let mv = moves[index];

            let rights = position.rights();
            position.make(mv);
            self.repetitions.push(position.hash());

            let score = -self.negamax(position, depth - 1, -beta, -alpha);

            self.repetitions.pop();
            position.unmake(mv, rights);

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        let bound = if best_score <= original_alpha {
            Bound::Upper
        } else if best_score >= original_beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(hash, best_move, depth, best_score, bound);

        best_score
    }

    /// Tests whether `hash`, assumed to be at the top of the repetition
    /// stack, has occurred three or more times including this occurrence.
    fn is_repetition(&self, hash: Key) -> bool {
        self.repetitions.iter().filter(|&&seen| seen == hash).count() >= 3
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

/// How long `start` has been elapsed, in milliseconds.
fn elapsed_ms(start: Instant) -> u128 {
    start.elapsed().as_millis()
}

/// Scores every move in `moves` for ordering: the transposition table's
/// remembered best move first, then MVV-LVA among captures, then quiets.
fn score_moves(moves: &Moves, tt_best: Option<Move>) -> Scores {
    let queen_value = PieceType::QUEEN.value();
    moves
        .iter()
        .map(|&mv| {
            if tt_best == Some(mv) {
                3 * queen_value
            } else if mv.is_capture() {
                let victim = PieceType::from(mv.piece_captured()).value();
                let attacker = PieceType::from(mv.piece_moved()).value();
                queen_value + victim - attacker
            } else {
                -1
            }
        })
        .collect()
}

/// Scans `moves[index..]` for the highest-scoring move and swaps it into
/// `index`, keeping `scores` in step. One step of a selection sort, applied
/// lazily as the search consumes moves in order.
fn select_next(moves: &mut Moves, scores: &mut Scores, index: usize) {
    let mut best = index;
    for candidate in (index + 1)..moves.len() {
        if scores[candidate] > scores[best] {
            best = candidate;
        }
    }
    moves.swap(index, best);
    scores.swap(index, best);
}

#[cfg(test)]
mod tests {
    use super::Search;
    use crate::board::Position;

    #[test]
    fn finds_mate_in_one() {
        let mut position =
            Position::from_fen("6k1/1q1N1pbp/4Q1p1/8/8/8/PPP3R1/1K6 b - - 0 1").expect("valid FEN");
        let mut search = Search::with_tt_capacity(1024);
        let mv = search.best_move(&mut position, 500);
        assert_eq!(mv.to().to_string(), "b2");
    }

    #[test]
    fn finds_a_free_capture() {
        let mut position =
            Position::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("valid FEN");
        let mut search = Search::with_tt_capacity(1024);
        let mv = search.best_move(&mut position, 500);
        assert_eq!(mv.to().to_string(), "d5");
    }

    #[test]
    fn returns_null_move_from_stalemate() {
        let mut position =
            Position::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").expect("valid FEN");
        let mut search = Search::with_tt_capacity(1024);
        let mv = search.best_move(&mut position, 100);
        assert!(mv.is_null());
        assert!(!position.king_attacked(position.side_to_move()));
    }

    #[test]
    fn a_threefold_repetition_is_scored_as_a_draw() {
        let mut position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("valid FEN");
        let mut search = Search::with_tt_capacity(1024);
        let hash = position.hash();
        search.repetitions = vec![hash, hash, hash];
        let score = search.negamax(&mut position, 2, super::MIN_EVAL, super::MAX_EVAL);
        assert_eq!(score, -super::CONTEMPT);
    }
}
