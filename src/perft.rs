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

//! Move-generation verification by leaf-node counting. No search, no
//! evaluation: `perft` only exercises `generate`/`make`/`unmake`.

use std::time::Instant;

use crate::{
    board::Position,
    movegen::{generate, Moves},
};

/// Counts the leaf positions `depth` plies from `position`.
///
/// If `SHOULD_PRINT`, also prints a per-root-move breakdown (a "divide"),
/// useful for bisecting a move generator bug against a reference engine.
/// If `IS_TIMED`, prints the elapsed time and nodes per second.
pub fn perft<const SHOULD_PRINT: bool, const IS_TIMED: bool>(position: &mut Position, depth: u8) -> u64 {
    if IS_TIMED {
        let start = Instant::now();
        let result = perft::<SHOULD_PRINT, false>(position, depth);
        let elapsed_us = start.elapsed().as_micros() as u64;
        let elapsed_ms = elapsed_us / 1_000;
        let nps = if elapsed_us == 0 { 0 } else { 1_000_000 * result / elapsed_us };
        println!("Time taken: {elapsed_ms} ms; NPS: {nps}");
        return result;
    }

    if depth == 0 {
        return 1;
    }

    let mut moves = Moves::new();
    generate(position, &mut moves);

    let mut total = 0;
    for mv in moves {
        let rights = position.rights();
        position.make(mv);
        let leaves = count(position, depth - 1);
        position.unmake(mv, rights);

        total += leaves;
        if SHOULD_PRINT {
            println!("{mv}: {leaves}");
        }
    }

    if SHOULD_PRINT {
        println!("Total: {total}");
    }
    total
}

/// The unprinted, untimed recursive step shared by every root move.
fn count(position: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = Moves::new();
    generate(position, &mut moves);

    let mut total = 0;
    for mv in moves {
        let rights = position.rights();
        position.make(mv);
        total += count(position, depth - 1);
        position.unmake(mv, rights);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::perft;
    use crate::board::Position;

    /// FEN, and the expected leaf count at depths 1 through 4.
    const FAST_CASES: [(&str, [u64; 4]); 6] = [
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            [20, 400, 8_902, 197_281],
        ),
        (
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            [48, 2_039, 97_862, 4_085_603],
        ),
        (
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
            [14, 191, 2_812, 43_238],
        ),
        (
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            [6, 264, 9_467, 422_333],
        ),
        (
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            [44, 1_486, 62_379, 2_103_487],
        ),
        (
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
            [46, 2_079, 89_890, 3_894_594],
        ),
    ];

    #[test]
    fn fast_perft_table_matches_known_leaf_counts() {
        for (fen, expected) in FAST_CASES {
            let mut position = Position::from_fen(fen).expect("valid FEN");
            for (depth, &expected_leaves) in (1..=4).zip(expected.iter()) {
                let leaves = perft::<false, false>(&mut position, depth);
                assert_eq!(leaves, expected_leaves, "depth {depth} from {fen}");
            }
        }
    }

    #[test]
    #[ignore = "depth 5-6 perft from the starting position takes minutes; run manually"]
    fn deep_perft_from_startpos_matches_known_leaf_counts() {
        let mut position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .expect("valid FEN");
        assert_eq!(perft::<false, false>(&mut position, 5), 4_865_609);
        assert_eq!(perft::<false, false>(&mut position, 6), 119_060_324);
    }

    #[test]
    fn perft_with_make_unmake_recovers_the_starting_hash() {
        let mut position =
            Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
                .expect("valid FEN");
        let starting_hash = position.hash();
        perft::<false, false>(&mut position, 3);
        assert_eq!(position.hash(), starting_hash);
    }
}
