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

//! A minimal command-line entry point: given a FEN and a think-time budget,
//! print the engine's chosen move. Carries no chess logic of its own; it is
//! glue over [`wayfarer::board::Position`] and [`wayfarer::search::Search`].
//!
//! ```text
//! cmdline <fen> [budget_ms]
//! cmdline perft <fen> <depth>
//! ```

use std::time::Instant;

use log::info;
use wayfarer::{board::Position, config::EngineConfig, perft::perft, search::Search};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let exit_code = if args.first().map(String::as_str) == Some("perft") {
        run_perft(&args[1..])
    } else {
        run_search(&args)
    };

    std::process::exit(exit_code);
}

/// Runs `cmdline perft <fen> <depth>`, printing the per-move divide and the
/// total leaf count.
fn run_perft(args: &[String]) -> i32 {
    let [fen, depth] = args else {
        eprintln!("usage: cmdline perft <fen> <depth>");
        return 2;
    };

    let Ok(depth) = depth.parse::<u8>() else {
        eprintln!("'{depth}' is not a valid perft depth");
        return 2;
    };

    match Position::from_fen(fen) {
        Ok(mut position) => {
            perft::<true, true>(&mut position, depth);
            0
        }
        Err(err) => {
            log::error!("{err}");
            1
        }
    }
}

/// Runs `cmdline <fen> [budget_ms]`, printing the engine's chosen move.
fn run_search(args: &[String]) -> i32 {
    let Some(fen) = args.first() else {
        eprintln!("usage: cmdline <fen> [budget_ms]");
        return 2;
    };

    let mut config = EngineConfig::from_env();
    if let Some(budget_ms) = args.get(1).and_then(|arg| arg.parse().ok()) {
        config = config.with_budget_ms(budget_ms);
    }

    let mut position = match Position::from_fen(fen) {
        Ok(position) => position,
        Err(err) => {
            log::error!("{err}");
            return 1;
        }
    };

    info!(
        "starting search: budget {}ms, tt size {} entries",
        config.budget_ms, config.tt_size
    );

    let start = Instant::now();
    let mut search = Search::with_tt_capacity(config.tt_size);
    let best = search.best_move(&mut position, config.budget_ms);

    if best.is_null() {
        log::error!("position has no legal moves");
        return 1;
    }

    info!(
        "best move {best}: {} nodes in {}ms",
        search.nodes_searched(),
        start.elapsed().as_millis()
    );
    println!("{best}");
    0
}
