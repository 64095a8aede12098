#![cfg(test)]

//! Throughput benchmarks for move generation and search, kept separate from
//! the correctness-oriented perft table in [`crate::perft`]. These are
//! `#[ignore]`d: run them explicitly with `cargo test -- --ignored` to watch
//! for a regression in nodes/sec after touching move generation or the
//! search loop.

use lazy_static::lazy_static;

use crate::{board::Position, perft::perft, search::Search};

/// A position and the perft depth to drive its throughput benchmark to.
#[derive(Clone, Copy)]
struct BenchPosition {
    /// The position to benchmark from.
    fen: &'static str,
    /// How deep to run perft.
    perft_depth: u8,
}

lazy_static! {
    /// A handful of positions with different branching factors, so the
    /// benchmark isn't skewed by one particular kind of position.
    static ref BENCH_POSITIONS: Vec<BenchPosition> = vec![
        BenchPosition {
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            perft_depth: 5,
        },
        BenchPosition {
            fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            perft_depth: 4,
        },
        BenchPosition {
            fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
            perft_depth: 4,
        },
    ];
}

#[test]
#[ignore = "prints nodes/sec rather than asserting; run manually to watch for regressions"]
fn perft_throughput() {
    for position in BENCH_POSITIONS.iter() {
        let mut board = Position::from_fen(position.fen).expect("valid FEN");
        println!("Position: {}", position.fen);
        perft::<false, true>(&mut board, position.perft_depth);
    }
}

#[test]
#[ignore = "prints nodes/sec rather than asserting; run manually to watch for regressions"]
fn search_nodes_per_second() {
    for position in BENCH_POSITIONS.iter() {
        let mut board = Position::from_fen(position.fen).expect("valid FEN");
        let mut search = Search::new();
        let start = std::time::Instant::now();
        let best = search.best_move(&mut board, 2_000);
        let elapsed = start.elapsed().as_secs_f64();
        let nps = search.nodes_searched() as f64 / elapsed;
        println!(
            "Position: {}; best move {best}; {} nodes in {elapsed:.2}s ({nps:.0} nps)",
            position.fen,
            search.nodes_searched()
        );
    }
}
