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

//! Legal move generation.
//!
//! Unlike a pseudo-legal-then-filter generator, every move this module
//! emits is already legal: king safety, check evasion and absolute pins are
//! folded into the destination masks up front (§4.5 of the design), so the
//! caller never has to make a move just to find out it was illegal.
//!
//! Generation always targets `position.side_to_move()`, which alternates
//! between the engine's `Us` and the opponent's `Them` tag as `make`/`unmake`
//! are called along the search tree — so every routine here takes `side` as
//! a runtime parameter rather than assuming `Us`.

use std::fmt::{self, Display, Formatter};

use arrayvec::ArrayVec;

use crate::{
    bitboard::Bitboard,
    board::Position,
    defs::{CastlingRights, Color, Direction, MoveKind, PieceKind, PieceType, Rank, Side, Square},
    lookups::ATTACKS,
};

/// The maximum number of legal moves reachable in any standard chess
/// position.
pub const MAX_LEGAL_MOVES: usize = 218;

/// A move list, cleared and refilled on every call to [`generate`] or
/// [`generate_captures`].
pub type Moves = ArrayVec<Move, MAX_LEGAL_MOVES>;

/// Which moves a generation pass should produce.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum GenMode {
    /// Every legal move.
    AllMoves,
    /// Legal captures and capture-promotions only.
    CapturesOnly,
}

/// A single legal (or, during `unmake`, previously-legal) move.
///
/// Bundles enough information to reverse itself without consulting the
/// board: the piece that moved and whatever it captured, if anything.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Move {
    /// The square the piece moved from.
    from: Square,
    /// The square the piece moved to.
    to: Square,
    /// What kind of move this is.
    kind: MoveKind,
    /// The piece that moved.
    piece_moved: PieceKind,
    /// The piece captured, or [`PieceKind::NONE`] if this move was quiet.
    piece_captured: PieceKind,
}

impl Move {
    /// A sentinel move used where "no move" must be representable (an empty
    /// transposition-table slot, a budget-exhausted search iteration).
    pub const NULL: Self = Self {
        from: Square::NONE,
        to: Square::NONE,
        kind: MoveKind::NORMAL,
        piece_moved: PieceKind::NONE,
        piece_captured: PieceKind::NONE,
    };

    /// Builds a move. Used internally by the generator.
    const fn new(
        from: Square,
        to: Square,
        kind: MoveKind,
        piece_moved: PieceKind,
        piece_captured: PieceKind,
    ) -> Self {
        Self {
            from,
            to,
            kind,
            piece_moved,
            piece_captured,
        }
    }

    /// The square this move starts from.
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    /// The square this move ends on.
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    /// This move's kind.
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// The piece that moved.
    #[must_use]
    pub const fn piece_moved(self) -> PieceKind {
        self.piece_moved
    }

    /// The piece captured by this move, or [`PieceKind::NONE`].
    #[must_use]
    pub const fn piece_captured(self) -> PieceKind {
        self.piece_captured
    }

    /// Tests whether this move is a capture of any kind, including
    /// en-passant.
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.piece_captured.0 != PieceKind::NONE.0
    }

    /// Tests whether `self` is [`Move::NULL`].
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.from.0 == Square::NONE.0 && self.to.0 == Square::NONE.0
    }

    /// Tests whether this move can never be repeated: a capture or a pawn
    /// push. Used to decide when the repetition history must be cleared.
    #[must_use]
    pub const fn is_irreversible(self) -> bool {
        self.is_capture() || PieceType::from(self.piece_moved).0 == PieceType::PAWN.0
    }
}

impl Display for Move {
    /// Displays a move in long algebraic notation: `e2e4`, `e7e8q`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.kind.is_promotion() {
            let promo = char::from(PieceKind::new(self.kind.promotion_piece_type(), Side::US));
            write!(f, "{}", promo.to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// One of the two sliding geometries, used to loop over both pin scans
/// generically.
const GEOMETRIES: [bool; 2] = [true, false];

/// Generates every legal move for `position.side_to_move()`, appending them
/// to `moves` (which the caller must have cleared, or which starts empty).
pub fn generate(position: &Position, moves: &mut Moves) {
    generate_with_mode(position, moves, GenMode::AllMoves);
}

/// Generates every legal capture (including capture-promotions) for
/// `position.side_to_move()`, appending them to `moves`.
pub fn generate_captures(position: &Position, moves: &mut Moves) {
    generate_with_mode(position, moves, GenMode::CapturesOnly);
}

/// Reports whether `side`'s king is currently attacked, independent of move
/// generation. Used to tell checkmate from stalemate when a side to move has
/// no legal moves.
#[must_use]
pub fn king_attacked(position: &Position, side: Side) -> bool {
    let king_square = Square::from(position.pieces(PieceKind::new(PieceType::KING, side)));
    let occupied = position.occupied();
    let (_, num_attackers) = compute_resolver_squares(position, side, king_square, occupied);
    num_attackers > 0
}

/// Shared implementation behind [`generate`] and [`generate_captures`].
fn generate_with_mode(position: &Position, moves: &mut Moves, mode: GenMode) {
    let side = position.side_to_move();
    let king_square = Square::from(position.pieces(PieceKind::new(PieceType::KING, side)));
    let occupied = position.occupied();
    let occupied_without_king = occupied ^ Bitboard::from(king_square);

    let safe_squares = compute_safe_squares(position, side, occupied_without_king);
    let (resolver_squares, num_attackers) =
        compute_resolver_squares(position, side, king_square, occupied);
    let (cardinal_pins, ordinal_pins) = compute_pin_masks(position, side, king_square, occupied);

    generate_king_moves(position, moves, side, king_square, safe_squares, mode);

    if num_attackers >= 2 {
        return;
    }

    generate_pawn_moves(
        position,
        moves,
        side,
        resolver_squares,
        cardinal_pins,
        ordinal_pins,
        mode,
    );
    generate_knight_moves(
        position,
        moves,
        side,
        resolver_squares,
        cardinal_pins,
        ordinal_pins,
        mode,
    );
    generate_sliding_moves(
        position,
        moves,
        side,
        resolver_squares,
        cardinal_pins,
        ordinal_pins,
        occupied,
        mode,
    );

    if num_attackers == 0 {
        generate_castling(position, moves, side, safe_squares, occupied);
    }
}

/// The movable destination mask for `side` under `mode`: empty squares and
/// enemy pieces for [`GenMode::AllMoves`], enemy pieces alone for
/// [`GenMode::CapturesOnly`].
fn movable_squares(position: &Position, side: Side, mode: GenMode) -> Bitboard {
    match mode {
        GenMode::AllMoves => position.movable_for(side),
        GenMode::CapturesOnly => position.side_pieces(side.flip()),
    }
}

/// The direction a pawn of physical `color` pushes.
const fn pawn_forward(color: Color) -> Direction {
    if color.0 == Color::WHITE.0 {
        Direction::N
    } else {
        Direction::S
    }
}

/// Shifts `bb` one pawn-push step for a pawn of physical `color`.
fn pawn_push(bb: Bitboard, color: Color) -> Bitboard {
    if color.0 == Color::WHITE.0 {
        bb.north()
    } else {
        bb.south()
    }
}

/// Computes the squares not attacked by any piece belonging to `side`'s
/// opponent, with the friendly king removed from `occupied_without_king` so
/// that sliders see through its square. Used only to restrict king
/// destinations.
fn compute_safe_squares(
    position: &Position,
    side: Side,
    occupied_without_king: Bitboard,
) -> Bitboard {
    let enemy = side.flip();
    let enemy_color = position.color_of(enemy);
    let mut attacked = Bitboard::empty();

    for square in position.pieces(PieceKind::new(PieceType::PAWN, enemy)) {
        attacked |= ATTACKS.pawn_attacks(enemy_color, square);
    }
    for square in position.pieces(PieceKind::new(PieceType::KNIGHT, enemy)) {
        attacked |= ATTACKS.knight_attacks(square);
    }
    let cardinal_sliders = position.pieces(PieceKind::new(PieceType::ROOK, enemy))
        | position.pieces(PieceKind::new(PieceType::QUEEN, enemy));
    for square in cardinal_sliders {
        attacked |= ATTACKS.sliding_attacks(square, occupied_without_king, true);
    }
    let ordinal_sliders = position.pieces(PieceKind::new(PieceType::BISHOP, enemy))
        | position.pieces(PieceKind::new(PieceType::QUEEN, enemy));
    for square in ordinal_sliders {
        attacked |= ATTACKS.sliding_attacks(square, occupied_without_king, false);
    }
    for square in position.pieces(PieceKind::new(PieceType::KING, enemy)) {
        attacked |= ATTACKS.king_attacks(square);
    }

    !attacked
}

/// Computes the squares that resolve the current check(s) against `side`'s
/// king, and how many enemy pieces are currently attacking it.
///
/// A resolver square is one that, if a friendly piece lands there, the king
/// is no longer attacked: the attacker's square itself (capture), or (for a
/// single sliding attacker) any square on the ray between the attacker and
/// the king (block).
fn compute_resolver_squares(
    position: &Position,
    side: Side,
    king_square: Square,
    occupied: Bitboard,
) -> (Bitboard, u32) {
    let enemy = side.flip();
    let friendly_color = position.color_of(side);
    let mut attackers = Bitboard::empty();

    let pawn_attackers = ATTACKS.pawn_attacks(friendly_color, king_square)
        & position.pieces(PieceKind::new(PieceType::PAWN, enemy));
    attackers |= pawn_attackers;

    let knight_attackers = ATTACKS.knight_attacks(king_square)
        & position.pieces(PieceKind::new(PieceType::KNIGHT, enemy));
    attackers |= knight_attackers;

    let cardinal_sliders = position.pieces(PieceKind::new(PieceType::ROOK, enemy))
        | position.pieces(PieceKind::new(PieceType::QUEEN, enemy));
    let cardinal_attackers = ATTACKS.sliding_attacks(king_square, occupied, true) & cardinal_sliders;
    attackers |= cardinal_attackers;

    let ordinal_sliders = position.pieces(PieceKind::new(PieceType::BISHOP, enemy))
        | position.pieces(PieceKind::new(PieceType::QUEEN, enemy));
    let ordinal_attackers = ATTACKS.sliding_attacks(king_square, occupied, false) & ordinal_sliders;
    attackers |= ordinal_attackers;

    let num_attackers = attackers.popcount();

    if num_attackers == 0 {
        (Bitboard::full(), 0)
    } else if num_attackers >= 2 {
        (Bitboard::empty(), num_attackers)
    } else {
        let attacker_square = Square::from(attackers);
        let is_slider = (cardinal_attackers | ordinal_attackers).popcount() == 1;
        let resolver = if is_slider {
            ATTACKS.ray_between(king_square, attacker_square) | attackers
        } else {
            attackers
        };
        (resolver, 1)
    }
}

/// Computes the cardinal and ordinal pin masks for `side`.
///
/// For each geometry: find friendly pieces that sit between the king and an
/// enemy slider of the matching geometry, with no other piece between them.
/// Each such piece's pin mask is the ray from the king through it up to and
/// including the pinning slider; a piece not pinned has an all-ones (no
/// constraint) entry.
fn compute_pin_masks(
    position: &Position,
    side: Side,
    king_square: Square,
    occupied: Bitboard,
) -> ([Bitboard; Square::TOTAL], [Bitboard; Square::TOTAL]) {
    let enemy = side.flip();
    let mut cardinal_pins = [Bitboard::full(); Square::TOTAL];
    let mut ordinal_pins = [Bitboard::full(); Square::TOTAL];

    for &cardinal in &GEOMETRIES {
        let sliders = if cardinal {
            position.pieces(PieceKind::new(PieceType::ROOK, enemy))
                | position.pieces(PieceKind::new(PieceType::QUEEN, enemy))
        } else {
            position.pieces(PieceKind::new(PieceType::BISHOP, enemy))
                | position.pieces(PieceKind::new(PieceType::QUEEN, enemy))
        };

        let king_ray = ATTACKS.sliding_attacks(king_square, occupied, cardinal);
        let candidates = king_ray & position.side_pieces(side);
        let occupied_without_candidates = occupied ^ candidates;

        for pinner in
            ATTACKS.sliding_attacks(king_square, occupied_without_candidates, cardinal) & sliders
        {
            let between = ATTACKS.ray_between(king_square, pinner);
            let pinned_candidates = between & candidates;
            if pinned_candidates.popcount() == 1 {
                let pinned_square = Square::from(pinned_candidates);
                let mask = between | Bitboard::from(pinner);
                if cardinal {
                    cardinal_pins[pinned_square.to_index()] = mask;
                } else {
                    ordinal_pins[pinned_square.to_index()] = mask;
                }
            }
        }
    }

    (cardinal_pins, ordinal_pins)
}

/// Generates legal pawn moves for `side`: single/double pushes, promotions,
/// diagonal captures, and en-passant with its special horizontal-pin check.
#[allow(clippy::too_many_arguments)]
fn generate_pawn_moves(
    position: &Position,
    moves: &mut Moves,
    side: Side,
    resolver_squares: Bitboard,
    cardinal_pins: [Bitboard; Square::TOTAL],
    ordinal_pins: [Bitboard; Square::TOTAL],
    mode: GenMode,
) {
    let color = position.color_of(side);
    let pawns = position.pieces(PieceKind::new(PieceType::PAWN, side));
    let empty = position.empties();
    let enemy = position.side_pieces(side.flip());
    let forward = pawn_forward(color);
    let promotion_rank_bb = if color.0 == Color::WHITE.0 {
        Bitboard::rank_bb(Rank::RANK_8)
    } else {
        Bitboard::rank_bb(Rank::RANK_1)
    };
    let double_push_rank_bb = if color.0 == Color::WHITE.0 {
        Bitboard::rank_bb(Rank::RANK_4)
    } else {
        Bitboard::rank_bb(Rank::RANK_5)
    };

    for from in pawns {
        let cardinal_pin = cardinal_pins[from.to_index()];
        let ordinal_pin = ordinal_pins[from.to_index()];
        let is_cardinal_pinned = cardinal_pin != Bitboard::full();
        let is_ordinal_pinned = ordinal_pin != Bitboard::full();

        if mode == GenMode::AllMoves && !is_ordinal_pinned {
            let push_bb = pawn_push(Bitboard::from(from), color) & empty;

            let non_promo_push = push_bb & !promotion_rank_bb & resolver_squares & cardinal_pin;
            if !non_promo_push.is_empty() {
                push(moves, from, Square::from(non_promo_push), MoveKind::NORMAL, position, side);
            }

            let promo_push = push_bb & promotion_rank_bb & resolver_squares & cardinal_pin;
            if !promo_push.is_empty() {
                push_promotions(moves, from, Square::from(promo_push), position, side);
            }

            if (push_bb & promotion_rank_bb).is_empty() {
                let double_push =
                    pawn_push(push_bb, color) & empty & double_push_rank_bb & resolver_squares & cardinal_pin;
                if !double_push.is_empty() {
                    push(moves, from, Square::from(double_push), MoveKind::NORMAL, position, side);
                }
            }
        }

        let capture_mask = ATTACKS.pawn_attacks(color, from);
        if !is_cardinal_pinned {
            let captures = capture_mask & enemy & resolver_squares & ordinal_pin;
            for to in captures {
                if (Bitboard::from(to) & promotion_rank_bb).is_empty() {
                    push(moves, from, to, MoveKind::NORMAL, position, side);
                } else {
                    push_promotions(moves, from, to, position, side);
                }
            }

            let ep_bb = position.en_passant_capture();
            let ep_targets = capture_mask & ep_bb & ordinal_pin;
            for to in ep_targets {
                let captured_square = to - forward;
                // The ep destination itself is never the checking pawn's
                // square, so an ordinary resolver-mask intersection misses
                // the case where capturing en passant removes the sole
                // (pawn) checker. Admit it whenever the single resolver
                // square is exactly the pawn this capture removes.
                let resolves_check = !(resolver_squares & Bitboard::from(to)).is_empty()
                    || (resolver_squares.popcount() == 1
                        && Square::from(resolver_squares) == captured_square);
                if resolves_check && is_en_passant_legal(position, side, from, to, forward) {
                    moves.push(Move::new(
                        from,
                        to,
                        MoveKind::EN_PASSANT,
                        PieceKind::new(PieceType::PAWN, side),
                        PieceKind::new(PieceType::PAWN, side.flip()),
                    ));
                }
            }
        }
    }
}

/// Pushes a single non-promotion move, looking up the captured piece (if
/// any) from the board.
fn push(moves: &mut Moves, from: Square, to: Square, kind: MoveKind, position: &Position, side: Side) {
    let piece_moved = position.piece_at(from);
    let piece_captured = position.piece_at_side(to, side.flip());
    moves.push(Move::new(from, to, kind, piece_moved, piece_captured));
}

/// Pushes the four promotion moves (knight/bishop/rook/queen) for a pawn of
/// `side` reaching `to`.
fn push_promotions(moves: &mut Moves, from: Square, to: Square, position: &Position, side: Side) {
    let piece_captured = position.piece_at_side(to, side.flip());
    for kind in [
        MoveKind::PROMO_KNIGHT,
        MoveKind::PROMO_BISHOP,
        MoveKind::PROMO_ROOK,
        MoveKind::PROMO_QUEEN,
    ] {
        moves.push(Move::new(
            from,
            to,
            kind,
            PieceKind::new(PieceType::PAWN, side),
            piece_captured,
        ));
    }
}

/// Checks the special en-passant legality case: capturing en-passant can
/// uncover a horizontal pin through *both* the moving pawn and the captured
/// pawn simultaneously, which the ordinary pin scanner (which only removes
/// one piece at a time) does not catch.
fn is_en_passant_legal(
    position: &Position,
    side: Side,
    from: Square,
    to: Square,
    forward: Direction,
) -> bool {
    let king_square = Square::from(position.pieces(PieceKind::new(PieceType::KING, side)));
    let captured_square = to - forward;

    let rank_mask = Bitboard::rank_bb(Rank::from(from));
    if (rank_mask & Bitboard::from(king_square)).is_empty() {
        return true;
    }

    let occupied_without_ep =
        position.occupied() ^ Bitboard::from(from) ^ Bitboard::from(captured_square);

    let enemy = side.flip();
    let enemy_cardinal = position.pieces(PieceKind::new(PieceType::ROOK, enemy))
        | position.pieces(PieceKind::new(PieceType::QUEEN, enemy));
    let attack = ATTACKS.sliding_attacks(king_square, occupied_without_ep, true) & rank_mask;
    (attack & enemy_cardinal).is_empty()
}

/// Generates legal knight moves for `side`. A pinned knight has no legal
/// moves at all.
fn generate_knight_moves(
    position: &Position,
    moves: &mut Moves,
    side: Side,
    resolver_squares: Bitboard,
    cardinal_pins: [Bitboard; Square::TOTAL],
    ordinal_pins: [Bitboard; Square::TOTAL],
    mode: GenMode,
) {
    let target_squares = movable_squares(position, side, mode) & resolver_squares;

    for from in position.pieces(PieceKind::new(PieceType::KNIGHT, side)) {
        let is_pinned = cardinal_pins[from.to_index()] != Bitboard::full()
            || ordinal_pins[from.to_index()] != Bitboard::full();
        if is_pinned {
            continue;
        }
        for to in ATTACKS.knight_attacks(from) & target_squares {
            push(moves, from, to, MoveKind::NORMAL, position, side);
        }
    }
}

/// Generates legal bishop, rook and queen moves for `side`, respecting pins
/// (a rook pinned ordinally, or a bishop pinned cardinally, has no legal
/// moves; a queen must stay on whichever geometry it is pinned along).
#[allow(clippy::too_many_arguments)]
fn generate_sliding_moves(
    position: &Position,
    moves: &mut Moves,
    side: Side,
    resolver_squares: Bitboard,
    cardinal_pins: [Bitboard; Square::TOTAL],
    ordinal_pins: [Bitboard; Square::TOTAL],
    occupied: Bitboard,
    mode: GenMode,
) {
    let base_targets = movable_squares(position, side, mode) & resolver_squares;

    for from in position.pieces(PieceKind::new(PieceType::BISHOP, side)) {
        if cardinal_pins[from.to_index()] != Bitboard::full() {
            continue;
        }
        let pin = ordinal_pins[from.to_index()];
        for to in ATTACKS.sliding_attacks(from, occupied, false) & base_targets & pin {
            push(moves, from, to, MoveKind::NORMAL, position, side);
        }
    }

    for from in position.pieces(PieceKind::new(PieceType::ROOK, side)) {
        if ordinal_pins[from.to_index()] != Bitboard::full() {
            continue;
        }
        let pin = cardinal_pins[from.to_index()];
        for to in ATTACKS.sliding_attacks(from, occupied, true) & base_targets & pin {
            push(moves, from, to, MoveKind::NORMAL, position, side);
        }
    }

    for from in position.pieces(PieceKind::new(PieceType::QUEEN, side)) {
        let pin = cardinal_pins[from.to_index()] & ordinal_pins[from.to_index()];
        for to in ATTACKS.queen_attacks(from, occupied) & base_targets & pin {
            push(moves, from, to, MoveKind::NORMAL, position, side);
        }
    }
}

/// Generates legal king moves for `side`: [`ATTACKS::king_attacks`]
/// intersected with the safe squares and the movable-square mask.
fn generate_king_moves(
    position: &Position,
    moves: &mut Moves,
    side: Side,
    king_square: Square,
    safe_squares: Bitboard,
    mode: GenMode,
) {
    let targets = ATTACKS.king_attacks(king_square) & safe_squares & movable_squares(position, side, mode);
    for to in targets {
        push(moves, king_square, to, MoveKind::NORMAL, position, side);
    }
}

/// Generates castling moves for `side`. Only called when that side's king
/// is not currently in check, per §4.5.4.
fn generate_castling(
    position: &Position,
    moves: &mut Moves,
    side: Side,
    safe_squares: Bitboard,
    occupied: Bitboard,
) {
    let king_square = Square::from(position.pieces(PieceKind::new(PieceType::KING, side)));
    if (Bitboard::from(king_square) & safe_squares).is_empty() {
        return;
    }

    let color = position.color_of(side);
    let rights = position.castling_rights();

    if rights.contains(CastlingRights::kingside(side)) {
        let space = Bitboard::castling_space(color, true);
        if (space & occupied).is_empty() && (space & safe_squares) == space {
            let to = Square(king_square.0 + 2);
            moves.push(Move::new(
                king_square,
                to,
                MoveKind::CASTLE,
                PieceKind::new(PieceType::KING, side),
                PieceKind::NONE,
            ));
        }
    }

    if rights.contains(CastlingRights::queenside(side)) {
        let space = Bitboard::castling_space(color, false);
        let king_path = Bitboard::from(Square(king_square.0 - 1)) | Bitboard::from(Square(king_square.0 - 2));
        if (space & occupied).is_empty() && (king_path & safe_squares) == king_path {
            let to = Square(king_square.0 - 2);
            moves.push(Move::new(
                king_square,
                to,
                MoveKind::CASTLE,
                PieceKind::new(PieceType::KING, side),
                PieceKind::NONE,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{generate, generate_captures, Moves};
    use crate::{board::Position, defs::PieceKind};

    fn moves_for(fen: &str) -> Moves {
        let position = Position::from_fen(fen).expect("valid test FEN");
        let mut moves = Moves::new();
        generate(&position, &mut moves);
        moves
    }

    #[test]
    fn startpos_has_twenty_legal_moves() {
        let moves = moves_for("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn captures_only_is_a_subset_of_all_moves() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let position = Position::from_fen(fen).expect("valid test FEN");
        let mut all = Moves::new();
        generate(&position, &mut all);
        let mut captures = Moves::new();
        generate_captures(&position, &mut captures);
        for c in &captures {
            assert!(c.is_capture());
            assert!(all.iter().any(|m| *m == *c));
        }
    }

    #[test]
    fn pinned_rook_cannot_leave_the_pin_file() {
        let fen = "4k3/8/8/8/8/4q3/4R3/4K3 w - - 0 1";
        let moves = moves_for(fen);
        for mv in &moves {
            if mv.piece_moved() == PieceKind::US_ROOK {
                assert_eq!(mv.to().to_index() % 8, 4);
            }
        }
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let fen = "4k3/8/4r3/8/8/8/4n3/4K3 w - - 0 1";
        let moves = moves_for(fen);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.piece_moved() == PieceKind::US_KING));
    }

    #[test]
    fn en_passant_can_capture_the_pawn_giving_check() {
        // Black just played e7-e5, giving check to the white king on f4.
        // f5xe6 e.p. removes the checking pawn even though the destination
        // square (e6) is not itself the attacker's square.
        let fen = "4k3/8/8/4pP2/5K2/8/8/8 w - e6 0 1";
        let moves = moves_for(fen);
        assert!(moves
            .iter()
            .any(|m| m.kind() == crate::defs::MoveKind::EN_PASSANT && m.to() == crate::defs::Square::E6));
    }

    #[test]
    fn en_passant_is_generated_when_available() {
        let fen = "rnbqkbnr/pp1ppppp/8/2pP4/8/8/PPP1PPPP/RNBQKBNR w KQkq c6 0 3";
        let moves = moves_for(fen);
        assert!(moves
            .iter()
            .any(|m| m.kind() == crate::defs::MoveKind::EN_PASSANT));
    }
}
