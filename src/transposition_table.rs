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

//! A direct-mapped transposition table, owned outright by one [`Search`] and
//! never shared, so it needs none of the atomics or lock-free machinery a
//! concurrent search would require: it is a plain `Vec` indexed by
//! `hash % size`.
//!
//! [`Search`]: crate::search::Search

use crate::{evaluation::Eval, movegen::Move, zobrist::Key};

/// The number of slots in a table built with [`TranspositionTable::new`]: a
/// prime near 2^24, chosen so that `hash % size` distributes evenly even
/// though Zobrist keys are not themselves prime-biased.
pub const DEFAULT_SIZE: usize = 16_777_213;

/// How a stored evaluation relates to the alpha-beta window it was obtained
/// under.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum Bound {
    /// `best_score >= beta`: a fail-high. The true score may be higher.
    Lower,
    /// `alpha < best_score < beta`: the true score.
    Exact,
    /// `best_score <= alpha`: a fail-low. The true score may be lower.
    Upper,
}

/// A single slot in the table.
#[derive(Clone, Copy)]
struct Entry {
    /// The full Zobrist hash, used to detect a different position sharing
    /// this slot.
    hash: Key,
    /// The best move found the last time this position was searched.
    best_move: Move,
    /// The depth that was searched to produce `evaluation`.
    depth: u8,
    /// The stored evaluation, from the side-to-move's perspective at the
    /// time of the store.
    evaluation: Eval,
    /// How `evaluation` bounds the true score.
    bound: Bound,
}

impl Entry {
    /// An empty slot. Its `hash` of 0 will only ever collide with a probe
    /// for a position whose hash happens to be exactly 0, which `load`
    /// handles the same as any other miss would: by failing to find useful
    /// information in an entry that was never actually stored.
    const EMPTY: Self = Self {
        hash: 0,
        best_move: Move::NULL,
        depth: 0,
        evaluation: 0,
        bound: Bound::Upper,
    };
}

/// A denormalized view of a table hit, returned by [`TranspositionTable::load`].
#[derive(Clone, Copy)]
pub struct TranspositionHit {
    /// The best move found the last time this position was searched.
    pub best_move: Move,
    /// The depth that was searched to produce `evaluation`.
    pub depth: u8,
    /// The stored evaluation.
    pub evaluation: Eval,
    /// How `evaluation` bounds the true score.
    pub bound: Bound,
}

/// A fixed-size, direct-mapped, always-replace transposition table.
pub struct TranspositionTable {
    entries: Vec<Entry>,
}

impl TranspositionTable {
    /// Builds a table with [`DEFAULT_SIZE`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SIZE)
    }

    /// Builds a table with exactly `size` slots (at least 1). Tests use a
    /// small size so a unit test does not allocate a 16M-entry vector just
    /// to exercise a handful of probes.
    #[must_use]
    pub fn with_capacity(size: usize) -> Self {
        Self {
            entries: vec![Entry::EMPTY; size.max(1)],
        }
    }

    /// Clears every slot.
    pub fn clear(&mut self) {
        self.entries.fill(Entry::EMPTY);
    }

    /// The slot `hash` maps to.
    fn index(&self, hash: Key) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Looks up `hash`. Returns `None` if the slot is empty or holds a
    /// different position.
    #[must_use]
    pub fn load(&self, hash: Key) -> Option<TranspositionHit> {
        let entry = &self.entries[self.index(hash)];
        if entry.hash == hash {
            Some(TranspositionHit {
                best_move: entry.best_move,
                depth: entry.depth,
                evaluation: entry.evaluation,
                bound: entry.bound,
            })
        } else {
            None
        }
    }

    /// Stores a result for `hash`, unconditionally overwriting whatever
    /// (possibly unrelated) entry currently occupies the slot.
    pub fn store(&mut self, hash: Key, best_move: Move, depth: u8, evaluation: Eval, bound: Bound) {
        let index = self.index(hash);
        self.entries[index] = Entry {
            hash,
            best_move,
            depth,
            evaluation,
            bound,
        };
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Bound, TranspositionTable};
    use crate::movegen::Move;

    #[test]
    fn miss_on_an_empty_table_returns_none() {
        let tt = TranspositionTable::with_capacity(16);
        assert!(tt.load(12345).is_none());
    }

    #[test]
    fn store_then_load_round_trips() {
        let mut tt = TranspositionTable::with_capacity(16);
        tt.store(42, Move::NULL, 5, 123, Bound::Exact);
        let hit = tt.load(42).expect("just stored");
        assert_eq!(hit.depth, 5);
        assert_eq!(hit.evaluation, 123);
        assert!(hit.bound == Bound::Exact);
    }

    #[test]
    fn a_colliding_hash_always_replaces_the_previous_entry() {
        let mut tt = TranspositionTable::with_capacity(1);
        tt.store(1, Move::NULL, 3, 10, Bound::Exact);
        tt.store(2, Move::NULL, 1, 20, Bound::Lower);
        assert!(tt.load(1).is_none());
        let hit = tt.load(2).expect("most recent store");
        assert_eq!(hit.evaluation, 20);
    }

    #[test]
    fn clear_removes_every_stored_entry() {
        let mut tt = TranspositionTable::with_capacity(16);
        tt.store(7, Move::NULL, 2, 50, Bound::Upper);
        tt.clear();
        assert!(tt.load(7).is_none());
    }
}
