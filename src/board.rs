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

//! The position: board state, incremental Zobrist hash, and true
//! make/unmake.
//!
//! Unlike a copy-make board, `Position` mutates a single instance in place
//! and relies on the caller to snapshot [`PositionRights`] before `make` and
//! hand it back to `unmake`; everything else the move itself carries enough
//! information to reverse.

use std::fmt::{self, Display, Formatter};

use crate::{
    bitboard::Bitboard,
    defs::{CastlingRights, Color, Direction, File, MoveKind, PieceKind, PieceType, Rank, Side, Square},
    error::EngineError,
    movegen::{self, Move},
    zobrist::{Key, ZOBRIST},
};

/// Every non-`NONE` [`PieceKind`], in index order, used to scan the piece
/// bitboards.
const ALL_KINDS: [PieceKind; PieceKind::TOTAL] = [
    PieceKind::US_PAWN,
    PieceKind::THEM_PAWN,
    PieceKind::US_KNIGHT,
    PieceKind::THEM_KNIGHT,
    PieceKind::US_BISHOP,
    PieceKind::THEM_BISHOP,
    PieceKind::US_ROOK,
    PieceKind::THEM_ROOK,
    PieceKind::US_QUEEN,
    PieceKind::THEM_QUEEN,
    PieceKind::US_KING,
    PieceKind::THEM_KING,
];

/// The castling/en-passant/half-move-clock fields of a [`Position`] that
/// `make` cannot derive from the move alone and `unmake` must restore
/// verbatim. The caller snapshots this before `make` and passes it back to
/// `unmake`.
#[derive(Clone, Copy)]
pub struct PositionRights {
    /// The four castling rights.
    castling: CastlingRights,
    /// The en-passant capture target, as a singleton bitboard (or empty).
    en_passant_capture: Bitboard,
    /// Half-moves since the last capture or pawn move.
    half_move_clock: u8,
}

/// A chess position, oriented from the engine's point of view: every piece
/// is tagged `Us` (the engine) or `Them` (the opponent) regardless of which
/// physical color it occupies.
pub struct Position {
    /// One bitboard per non-`NONE` [`PieceKind`].
    pieces: [Bitboard; PieceKind::TOTAL],
    /// Whose turn it is, in engine-relative terms.
    side_to_move: Side,
    /// Castling/en-passant/half-move-clock state.
    rights: PositionRights,
    /// Incrementally maintained Zobrist hash.
    hash: Key,
    /// Purely informational move counter.
    full_moves: u32,
    /// Which physical color the engine is playing. Set once at
    /// construction; independent of the FEN's side-to-move field.
    engine_color: Color,
}

impl PositionRights {
    /// No castling rights, no en-passant target, a fresh half-move clock.
    const EMPTY: Self = Self {
        castling: CastlingRights::NONE,
        en_passant_capture: Bitboard::empty(),
        half_move_clock: 0,
    };
}

impl Position {
    /// Parses a FEN string into a position, with the engine playing
    /// whichever physical color the FEN marks as to move.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let fields: Vec<&str> = fen.split_ascii_whitespace().collect();
        if fields.len() < 4 {
            return Err(EngineError::ConfigError {
                reason: format!("'{fen}' does not have at least 4 space-separated fields"),
            });
        }

        let active_color = Color::try_from(
            fields[1]
                .chars()
                .next()
                .ok_or_else(|| EngineError::ConfigError {
                    reason: "empty side-to-move field".to_owned(),
                })?,
        )?;

        Self::from_fen_fields(&fields, active_color)
    }

    /// Parses a FEN string into a position with an explicitly chosen engine
    /// color, independent of the FEN's side-to-move field.
    pub fn from_fen_as(fen: &str, engine_color: Color) -> Result<Self, EngineError> {
        let fields: Vec<&str> = fen.split_ascii_whitespace().collect();
        if fields.len() < 4 {
            return Err(EngineError::ConfigError {
                reason: format!("'{fen}' does not have at least 4 space-separated fields"),
            });
        }
        Self::from_fen_fields(&fields, engine_color)
    }

    /// Shared FEN parser: `engine_color` is the physical color the engine
    /// will play for the lifetime of the returned position.
    fn from_fen_fields(fields: &[&str], engine_color: Color) -> Result<Self, EngineError> {
        let mut pieces = [Bitboard::empty(); PieceKind::TOTAL];

        let mut rank = 7_i8;
        let mut file = 0_i8;
        for c in fields[0].chars() {
            match c {
                '/' => {
                    if file != 8 {
                        return Err(EngineError::ConfigError {
                            reason: format!("rank {} does not have 8 files", rank + 1),
                        });
                    }
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => {
                    file += c.to_digit(10).unwrap_or(0) as i8;
                }
                _ => {
                    if !(0..8).contains(&rank) || !(0..8).contains(&file) {
                        return Err(EngineError::ConfigError {
                            reason: format!("'{c}' is out of bounds in piece placement"),
                        });
                    }
                    let square = Square::from_pos(Rank(rank as u8), File(file as u8));
                    let piece_type = piece_type_from_char(c)?;
                    let color = if c.is_ascii_uppercase() {
                        Color::WHITE
                    } else {
                        Color::BLACK
                    };
                    let side = if color.0 == engine_color.0 {
                        Side::US
                    } else {
                        Side::THEM
                    };
                    let kind = PieceKind::new(piece_type, side);
                    pieces[kind.to_index()] |= Bitboard::from(square);
                    file += 1;
                }
            }
        }

        let active_color = Color::try_from(
            fields[1]
                .chars()
                .next()
                .ok_or_else(|| EngineError::ConfigError {
                    reason: "empty side-to-move field".to_owned(),
                })?,
        )?;
        let side_to_move = if active_color.0 == engine_color.0 {
            Side::US
        } else {
            Side::THEM
        };

        let castling = parse_castling_rights(fields[2], engine_color)?;

        let en_passant_capture = if fields[3] == "-" {
            Bitboard::empty()
        } else {
            let square: Square = fields[3].parse()?;
            Bitboard::from(square)
        };

        let half_move_clock = fields
            .get(4)
            .and_then(|field| field.parse::<u8>().ok())
            .unwrap_or(0);
        let full_moves = fields
            .get(5)
            .and_then(|field| field.parse::<u32>().ok())
            .unwrap_or(1);

        let mut position = Self {
            pieces,
            side_to_move,
            rights: PositionRights {
                castling,
                en_passant_capture,
                half_move_clock,
            },
            hash: 0,
            full_moves,
            engine_color,
        };
        position.hash = position.recompute_hash();
        Ok(position)
    }

    /// Recomputes the Zobrist hash from scratch. Used at construction and
    /// by tests that check incremental maintenance against a from-scratch
    /// baseline.
    #[must_use]
    pub fn recompute_hash(&self) -> Key {
        let mut hash = 0;

        for &kind in &ALL_KINDS {
            for square in self.pieces[kind.to_index()] {
                hash ^= ZOBRIST.piece_square_key(square, kind);
            }
        }

        if self.side_to_move.0 == Side::US.0 {
            hash ^= ZOBRIST.side_to_move_key();
        }

        for bit in 0..4 {
            if self.rights.castling.0 & (1 << bit) != 0 {
                hash ^= ZOBRIST.castling_key(bit);
            }
        }

        if !self.rights.en_passant_capture.is_empty() {
            let square = Square::from(self.rights.en_passant_capture);
            hash ^= ZOBRIST.en_passant_file_key(File::from(square));
        }

        hash
    }

    /// The bitboard of all pieces of kind `kind`.
    #[must_use]
    pub const fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.to_index()]
    }

    /// The bitboard of every piece belonging to `side`.
    #[must_use]
    pub fn side_pieces(&self, side: Side) -> Bitboard {
        self.pieces(PieceKind::new(PieceType::PAWN, side))
            | self.pieces(PieceKind::new(PieceType::KNIGHT, side))
            | self.pieces(PieceKind::new(PieceType::BISHOP, side))
            | self.pieces(PieceKind::new(PieceType::ROOK, side))
            | self.pieces(PieceKind::new(PieceType::QUEEN, side))
            | self.pieces(PieceKind::new(PieceType::KING, side))
    }

    /// The bitboard of every engine piece.
    #[must_use]
    pub fn engine_pieces(&self) -> Bitboard {
        self.side_pieces(Side::US)
    }

    /// The bitboard of every player piece.
    #[must_use]
    pub fn player_pieces(&self) -> Bitboard {
        self.side_pieces(Side::THEM)
    }

    /// The bitboard of every occupied square.
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.engine_pieces() | self.player_pieces()
    }

    /// The bitboard of every empty square.
    #[must_use]
    pub fn empties(&self) -> Bitboard {
        !self.occupied()
    }

    /// The squares the engine may move a piece onto: empty squares and
    /// player pieces.
    #[must_use]
    pub fn engine_movable(&self) -> Bitboard {
        self.player_pieces() | self.empties()
    }

    /// The squares the player may move a piece onto: empty squares and
    /// engine pieces.
    #[must_use]
    pub fn player_movable(&self) -> Bitboard {
        self.engine_pieces() | self.empties()
    }

    /// The squares `side` may move a piece onto.
    #[must_use]
    pub fn movable_for(&self, side: Side) -> Bitboard {
        if side.0 == Side::US.0 {
            self.engine_movable()
        } else {
            self.player_movable()
        }
    }

    /// Whether `side`'s king is currently attacked. Lets a caller with no
    /// legal moves tell checkmate from stalemate.
    #[must_use]
    pub fn king_attacked(&self, side: Side) -> bool {
        movegen::king_attacked(self, side)
    }

    /// Whose turn it is, in engine-relative terms.
    #[must_use]
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Which physical color the engine is playing.
    #[must_use]
    pub const fn engine_color(&self) -> Color {
        self.engine_color
    }

    /// The physical color of whichever side `side` refers to.
    #[must_use]
    pub const fn color_of(&self, side: Side) -> Color {
        if side.0 == Side::US.0 {
            self.engine_color
        } else {
            self.engine_color.flip()
        }
    }

    /// The current castling rights.
    #[must_use]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.rights.castling
    }

    /// The en-passant capture target, as a singleton bitboard (empty if
    /// none is set).
    #[must_use]
    pub const fn en_passant_capture(&self) -> Bitboard {
        self.rights.en_passant_capture
    }

    /// Half-moves since the last capture or pawn move.
    #[must_use]
    pub const fn half_move_clock(&self) -> u8 {
        self.rights.half_move_clock
    }

    /// The current Zobrist hash.
    #[must_use]
    pub const fn hash(&self) -> Key {
        self.hash
    }

    /// A snapshot of the fields `unmake` will need back.
    #[must_use]
    pub const fn rights(&self) -> PositionRights {
        self.rights
    }

    /// Finds whichever piece occupies `square`, or [`PieceKind::NONE`] if it
    /// is empty.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> PieceKind {
        let bb = Bitboard::from(square);
        for &kind in &ALL_KINDS {
            if !(self.pieces[kind.to_index()] & bb).is_empty() {
                return kind;
            }
        }
        PieceKind::NONE
    }

    /// Finds whichever piece belonging to `side` occupies `square`, or
    /// [`PieceKind::NONE`]. Used by the move generator to identify captured
    /// pieces without scanning the other side's bitboards.
    #[must_use]
    pub fn piece_at_side(&self, square: Square, side: Side) -> PieceKind {
        let bb = Bitboard::from(square);
        for piece_type in [
            PieceType::PAWN,
            PieceType::KNIGHT,
            PieceType::BISHOP,
            PieceType::ROOK,
            PieceType::QUEEN,
            PieceType::KING,
        ] {
            let kind = PieceKind::new(piece_type, side);
            if !(self.pieces[kind.to_index()] & bb).is_empty() {
                return kind;
            }
        }
        PieceKind::NONE
    }

    /// Applies `mv`, updating the hash incrementally. The caller must have
    /// already snapshotted [`Position::rights`] if it intends to `unmake`
    /// this move later.
    pub fn make(&mut self, mv: Move) {
        let mover_side = Side::from(mv.piece_moved());
        let mover_color = self.color_of(mover_side);
        let from = mv.from();
        let to = mv.to();

        self.rights.half_move_clock += 1;

        self.pieces[mv.piece_moved().to_index()] ^= Bitboard::from(from);
        self.hash ^= ZOBRIST.piece_square_key(from, mv.piece_moved());

        self.hash ^= ZOBRIST.side_to_move_key();

        if mv.is_capture() {
            self.rights.half_move_clock = 0;
            if mv.kind() == MoveKind::EN_PASSANT {
                let forward = pawn_forward(mover_color);
                let captured_square = to - forward;
                self.pieces[mv.piece_captured().to_index()] ^= Bitboard::from(captured_square);
                self.hash ^= ZOBRIST.piece_square_key(captured_square, mv.piece_captured());
            } else {
                self.pieces[mv.piece_captured().to_index()] ^= Bitboard::from(to);
                self.hash ^= ZOBRIST.piece_square_key(to, mv.piece_captured());
                self.clear_rook_right_if_corner(to, Side::from(mv.piece_captured()));
            }
        }

        if !self.rights.en_passant_capture.is_empty() {
            let square = Square::from(self.rights.en_passant_capture);
            self.hash ^= ZOBRIST.en_passant_file_key(File::from(square));
            self.rights.en_passant_capture = Bitboard::empty();
        }

        if PieceType::from(mv.piece_moved()).0 == PieceType::PAWN.0 && !mv.is_capture() {
            self.rights.half_move_clock = 0;
            if to.0.abs_diff(from.0) > 8 {
                let behind = to - pawn_forward(mover_color);
                self.rights.en_passant_capture = Bitboard::from(behind);
                self.hash ^= ZOBRIST.en_passant_file_key(File::from(behind));
            }
        }

        if mv.kind().is_promotion() {
            self.rights.half_move_clock = 0;
            let promoted = PieceKind::new(mv.kind().promotion_piece_type(), mover_side);
            self.pieces[promoted.to_index()] ^= Bitboard::from(to);
            self.hash ^= ZOBRIST.piece_square_key(to, promoted);
        } else {
            self.pieces[mv.piece_moved().to_index()] ^= Bitboard::from(to);
            self.hash ^= ZOBRIST.piece_square_key(to, mv.piece_moved());
        }

        if PieceType::from(mv.piece_moved()).0 == PieceType::ROOK.0 {
            self.clear_rook_right_if_corner(from, mover_side);
        }

        if PieceType::from(mv.piece_moved()).0 == PieceType::KING.0 {
            for right in [
                CastlingRights::kingside(mover_side),
                CastlingRights::queenside(mover_side),
            ] {
                if self.rights.castling.remove(right) {
                    self.hash ^= ZOBRIST.castling_key(castling_bit(right));
                }
            }

            if mv.kind() == MoveKind::CASTLE {
                let kingside = to.0 > from.0;
                let rook_kind = PieceKind::new(PieceType::ROOK, mover_side);
                let (rook_from, rook_to) = if kingside {
                    (Square(from.0 + 3), Square(to.0 - 1))
                } else {
                    (Square(from.0 - 4), Square(to.0 + 1))
                };
                self.pieces[rook_kind.to_index()] ^= Bitboard::from(rook_from);
                self.pieces[rook_kind.to_index()] ^= Bitboard::from(rook_to);
                self.hash ^= ZOBRIST.piece_square_key(rook_from, rook_kind);
                self.hash ^= ZOBRIST.piece_square_key(rook_to, rook_kind);
            }
        }

        self.side_to_move = self.side_to_move.flip();
        if mover_color.0 == Color::BLACK.0 {
            self.full_moves += 1;
        }
    }

    /// Clears the castling right belonging to `side` on whichever corner
    /// `square` is, if `square` is in fact one of the two starting rook
    /// corners for that side. XORs the corresponding key out of the hash if
    /// a right was actually cleared.
    fn clear_rook_right_if_corner(&mut self, square: Square, side: Side) {
        let color = self.color_of(side);
        let home_rank = if color.0 == Color::WHITE.0 {
            Rank::RANK_1
        } else {
            Rank::RANK_8
        };
        if Rank::from(square).0 != home_rank.0 {
            return;
        }

        let right = match File::from(square).0 {
            0 => Some(CastlingRights::queenside(side)),
            7 => Some(CastlingRights::kingside(side)),
            _ => None,
        };

        if let Some(right) = right {
            if self.rights.castling.remove(right) {
                self.hash ^= ZOBRIST.castling_key(castling_bit(right));
            }
        }
    }

    /// Reverses `mv`, given the [`PositionRights`] snapshotted before `make`
    /// was called for this move.
    pub fn unmake(&mut self, mv: Move, previous_rights: PositionRights) {
        self.side_to_move = self.side_to_move.flip();
        let mover_side = Side::from(mv.piece_moved());
        let mover_color = self.color_of(mover_side);
        if mover_color.0 == Color::BLACK.0 {
            self.full_moves -= 1;
        }

        let from = mv.from();
        let to = mv.to();

        if mv.kind() == MoveKind::CASTLE {
            let kingside = to.0 > from.0;
            let rook_kind = PieceKind::new(PieceType::ROOK, mover_side);
            let (rook_from, rook_to) = if kingside {
                (Square(from.0 + 3), Square(to.0 - 1))
            } else {
                (Square(from.0 - 4), Square(to.0 + 1))
            };
            self.pieces[rook_kind.to_index()] ^= Bitboard::from(rook_from);
            self.pieces[rook_kind.to_index()] ^= Bitboard::from(rook_to);
        }

        if mv.kind().is_promotion() {
            let promoted = PieceKind::new(mv.kind().promotion_piece_type(), mover_side);
            self.pieces[promoted.to_index()] ^= Bitboard::from(to);
        } else {
            self.pieces[mv.piece_moved().to_index()] ^= Bitboard::from(to);
        }

        if mv.is_capture() {
            if mv.kind() == MoveKind::EN_PASSANT {
                let forward = pawn_forward(mover_color);
                let captured_square = to - forward;
                self.pieces[mv.piece_captured().to_index()] ^= Bitboard::from(captured_square);
            } else {
                self.pieces[mv.piece_captured().to_index()] ^= Bitboard::from(to);
            }
        }

        self.pieces[mv.piece_moved().to_index()] ^= Bitboard::from(from);

        self.rights = previous_rights;
        self.hash = self.recompute_hash();
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

/// Maps a single-flag [`CastlingRights`] value to its bit index, for
/// indexing the Zobrist castling-key table.
fn castling_bit(right: CastlingRights) -> usize {
    right.0.trailing_zeros() as usize
}

/// Converts a FEN piece letter into a [`PieceType`], case-insensitively.
fn piece_type_from_char(c: char) -> Result<PieceType, EngineError> {
    match c.to_ascii_lowercase() {
        'p' => Ok(PieceType::PAWN),
        'n' => Ok(PieceType::KNIGHT),
        'b' => Ok(PieceType::BISHOP),
        'r' => Ok(PieceType::ROOK),
        'q' => Ok(PieceType::QUEEN),
        'k' => Ok(PieceType::KING),
        _ => Err(EngineError::ConfigError {
            reason: format!("'{c}' is not a valid piece letter"),
        }),
    }
}

/// Parses the FEN castling-availability field (a subset of `KQkq`, or `-`)
/// into engine-relative [`CastlingRights`].
fn parse_castling_rights(field: &str, engine_color: Color) -> Result<CastlingRights, EngineError> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }

    for c in field.chars() {
        let side = if c.is_ascii_uppercase() == (engine_color.0 == Color::WHITE.0) {
            Side::US
        } else {
            Side::THEM
        };
        match c.to_ascii_lowercase() {
            'k' => rights.insert(CastlingRights::kingside(side)),
            'q' => rights.insert(CastlingRights::queenside(side)),
            _ => {
                return Err(EngineError::ConfigError {
                    reason: format!("'{c}' is not a valid castling-rights character"),
                })
            }
        }
    }

    Ok(rights)
}

impl Display for Position {
    /// Renders the position as a FEN string.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(64);
        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                let square = Square::from_pos(Rank(rank), File(file));
                let kind = self.piece_at(square);
                if kind.0 == PieceKind::NONE.0 {
                    empty_run += 1;
                    continue;
                }
                if empty_run != 0 {
                    board.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                let side = Side::from(kind);
                let color = self.color_of(side);
                let letter = piece_letter(PieceType::from(kind), color);
                board.push(letter);
            }
            if empty_run != 0 {
                board.push_str(&empty_run.to_string());
            }
            if rank != 0 {
                board.push('/');
            }
        }

        let active_color = self.color_of(self.side_to_move);
        let side_char = if active_color.0 == Color::WHITE.0 { 'w' } else { 'b' };

        let mut castling = String::with_capacity(4);
        for (right, letter) in [
            (CastlingRights::kingside(Side::US), 'K'),
            (CastlingRights::queenside(Side::US), 'Q'),
            (CastlingRights::kingside(Side::THEM), 'K'),
            (CastlingRights::queenside(Side::THEM), 'Q'),
        ] {
            if self.rights.castling.contains(right) {
                let is_engine_white = self.engine_color.0 == Color::WHITE.0;
                let side_is_us = right.0 == CastlingRights::kingside(Side::US).0
                    || right.0 == CastlingRights::queenside(Side::US).0;
                let white_side = side_is_us == is_engine_white;
                castling.push(if white_side {
                    letter
                } else {
                    letter.to_ascii_lowercase()
                });
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = if self.rights.en_passant_capture.is_empty() {
            "-".to_owned()
        } else {
            Square::from(self.rights.en_passant_capture).to_string()
        };

        write!(
            f,
            "{board} {side_char} {castling} {ep} {} {}",
            self.rights.half_move_clock, self.full_moves
        )
    }
}

/// Converts a piece type and physical color into its FEN letter.
const fn piece_letter(piece_type: PieceType, color: Color) -> char {
    let letter = match piece_type.0 {
        0 => 'p',
        1 => 'n',
        2 => 'b',
        3 => 'r',
        4 => 'q',
        _ => 'k',
    };
    if color.0 == Color::WHITE.0 {
        letter.to_ascii_uppercase()
    } else {
        letter
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::{
        defs::{PieceKind, Square},
        movegen::{generate, Moves},
    };

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn startpos_parses_with_sixteen_pieces_per_side() {
        let position = Position::from_fen(STARTPOS).expect("valid FEN");
        assert_eq!(position.engine_pieces().popcount(), 16);
        assert_eq!(position.player_pieces().popcount(), 16);
        assert_eq!(position.occupied().popcount(), 32);
    }

    #[test]
    fn incremental_hash_matches_recomputed_hash_after_make_unmake() {
        let mut position = Position::from_fen(STARTPOS).expect("valid FEN");
        let mut moves = Moves::new();
        generate(&position, &mut moves);
        let mv = moves[0];

        let rights = position.rights();
        let hash_before = position.hash();
        position.make(mv);
        assert_eq!(position.hash(), position.recompute_hash());
        position.unmake(mv, rights);

        assert_eq!(position.hash(), hash_before);
        assert_eq!(position.hash(), position.recompute_hash());
    }

    #[test]
    fn fen_round_trip_is_stable() {
        let position = Position::from_fen(STARTPOS).expect("valid FEN");
        assert_eq!(position.to_string(), STARTPOS);
    }

    #[test]
    fn piece_at_finds_the_king_on_e1() {
        let position = Position::from_fen(STARTPOS).expect("valid FEN");
        assert_eq!(position.piece_at(Square::E1), PieceKind::US_KING);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(Position::from_fen("not a fen").is_err());
    }
}
