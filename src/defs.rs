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

use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Sub},
    str::FromStr,
};

use crate::{bitboard::Bitboard, error::EngineError};

/// A cardinal or ordinal direction, expressed as the square-index delta of a
/// one-step move in that direction.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Direction(pub i8);

/// A file: file A = 0 to file H = 7.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct File(pub u8);

/// A rank: rank 1 = 0 to rank 8 = 7.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Rank(pub u8);

/// A square, little-endian rank-file mapping: a1 = 0, b1 = 1, ..., h8 = 63.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd)]
pub struct Square(pub u8);

/// The physical color of a piece or square, independent of who is playing
/// the engine. Used only to decide pawn push direction and promotion rank,
/// and to interpret FEN piece-letter case.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Color(pub u8);

/// A role relative to the engine: `US` for whichever color the engine is
/// playing, `THEM` for the opponent. Every piece bitboard, castling right,
/// and move-generation routine is indexed by role rather than by physical
/// color, so the same code serves the engine whichever color it was
/// constructed to play.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Side(pub u8);

/// The type of a piece, without a side attached.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct PieceType(pub u8);

/// A piece together with its role (`Us`/`Them`). The internal order matches
/// [`PieceType`] but the exact constants do not.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct PieceKind(pub u8);

/// The kind of a move, beyond its (from, to) squares. Values at or beyond
/// [`MoveKind::PROMO_KNIGHT`] indicate a promotion.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct MoveKind(pub u8);

/// The four castling rights, one bit each.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct CastlingRights(pub u8);

#[allow(dead_code, clippy::missing_docs_in_private_items)]
impl Direction {
    pub const N: Self = Self(8);
    pub const NE: Self = Self(9);
    pub const E: Self = Self(1);
    pub const SE: Self = Self(-7);
    pub const S: Self = Self(-8);
    pub const SW: Self = Self(-9);
    pub const W: Self = Self(-1);
    pub const NW: Self = Self(7);
}

#[allow(dead_code, clippy::missing_docs_in_private_items)]
impl File {
    pub const FILE_A: Self = Self(0);
    pub const FILE_H: Self = Self(7);
    pub const TOTAL: usize = 8;
}

#[allow(dead_code, clippy::missing_docs_in_private_items)]
impl Rank {
    pub const RANK_1: Self = Self(0);
    pub const RANK_2: Self = Self(1);
    pub const RANK_4: Self = Self(3);
    pub const RANK_5: Self = Self(4);
    pub const RANK_7: Self = Self(6);
    pub const RANK_8: Self = Self(7);
    pub const TOTAL: usize = 8;
}

#[allow(dead_code, clippy::missing_docs_in_private_items)]
impl Square {
    pub const A1: Self = Self(0);
    pub const B1: Self = Self(1);
    pub const C1: Self = Self(2);
    pub const D1: Self = Self(3);
    pub const E1: Self = Self(4);
    pub const F1: Self = Self(5);
    pub const G1: Self = Self(6);
    pub const H1: Self = Self(7);
    pub const A2: Self = Self(8);
    pub const B2: Self = Self(9);
    pub const C2: Self = Self(10);
    pub const D2: Self = Self(11);
    pub const E2: Self = Self(12);
    pub const F2: Self = Self(13);
    pub const G2: Self = Self(14);
    pub const H2: Self = Self(15);
    pub const A3: Self = Self(16);
    pub const B3: Self = Self(17);
    pub const C3: Self = Self(18);
    pub const D3: Self = Self(19);
    pub const E3: Self = Self(20);
    pub const F3: Self = Self(21);
    pub const G3: Self = Self(22);
    pub const H3: Self = Self(23);
    pub const A4: Self = Self(24);
    pub const B4: Self = Self(25);
    pub const C4: Self = Self(26);
    pub const D4: Self = Self(27);
    pub const E4: Self = Self(28);
    pub const F4: Self = Self(29);
    pub const G4: Self = Self(30);
    pub const H4: Self = Self(31);
    pub const A5: Self = Self(32);
    pub const B5: Self = Self(33);
    pub const C5: Self = Self(34);
    pub const D5: Self = Self(35);
    pub const E5: Self = Self(36);
    pub const F5: Self = Self(37);
    pub const G5: Self = Self(38);
    pub const H5: Self = Self(39);
    pub const A6: Self = Self(40);
    pub const B6: Self = Self(41);
    pub const C6: Self = Self(42);
    pub const D6: Self = Self(43);
    pub const E6: Self = Self(44);
    pub const F6: Self = Self(45);
    pub const G6: Self = Self(46);
    pub const H6: Self = Self(47);
    pub const A7: Self = Self(48);
    pub const B7: Self = Self(49);
    pub const C7: Self = Self(50);
    pub const D7: Self = Self(51);
    pub const E7: Self = Self(52);
    pub const F7: Self = Self(53);
    pub const G7: Self = Self(54);
    pub const H7: Self = Self(55);
    pub const A8: Self = Self(56);
    pub const B8: Self = Self(57);
    pub const C8: Self = Self(58);
    pub const D8: Self = Self(59);
    pub const E8: Self = Self(60);
    pub const F8: Self = Self(61);
    pub const G8: Self = Self(62);
    pub const H8: Self = Self(63);
    pub const TOTAL: usize = 64;
    pub const NONE: Self = Self(64);
}

#[allow(dead_code, clippy::missing_docs_in_private_items)]
impl Color {
    pub const WHITE: Self = Self(0);
    pub const BLACK: Self = Self(1);
    pub const TOTAL: usize = 2;
}

#[allow(dead_code, clippy::missing_docs_in_private_items)]
impl Side {
    pub const US: Self = Self(0);
    pub const THEM: Self = Self(1);
    pub const TOTAL: usize = 2;
    pub const NONE: Self = Self(2);
}

#[allow(dead_code, clippy::missing_docs_in_private_items)]
impl PieceType {
    pub const PAWN: Self = Self(0);
    pub const KNIGHT: Self = Self(1);
    pub const BISHOP: Self = Self(2);
    pub const ROOK: Self = Self(3);
    pub const QUEEN: Self = Self(4);
    pub const KING: Self = Self(5);
    pub const TOTAL: usize = 6;
    pub const NONE: Self = Self(6);
}

#[allow(dead_code, clippy::missing_docs_in_private_items)]
impl PieceKind {
    pub const US_PAWN: Self = Self::new(PieceType::PAWN, Side::US);
    pub const US_KNIGHT: Self = Self::new(PieceType::KNIGHT, Side::US);
    pub const US_BISHOP: Self = Self::new(PieceType::BISHOP, Side::US);
    pub const US_ROOK: Self = Self::new(PieceType::ROOK, Side::US);
    pub const US_QUEEN: Self = Self::new(PieceType::QUEEN, Side::US);
    pub const US_KING: Self = Self::new(PieceType::KING, Side::US);
    pub const THEM_PAWN: Self = Self::new(PieceType::PAWN, Side::THEM);
    pub const THEM_KNIGHT: Self = Self::new(PieceType::KNIGHT, Side::THEM);
    pub const THEM_BISHOP: Self = Self::new(PieceType::BISHOP, Side::THEM);
    pub const THEM_ROOK: Self = Self::new(PieceType::ROOK, Side::THEM);
    pub const THEM_QUEEN: Self = Self::new(PieceType::QUEEN, Side::THEM);
    pub const THEM_KING: Self = Self::new(PieceType::KING, Side::THEM);
    pub const TOTAL: usize = 12;
    pub const NONE: Self = Self(12);
}

#[allow(dead_code, clippy::missing_docs_in_private_items)]
impl MoveKind {
    pub const NORMAL: Self = Self(0);
    pub const CASTLE: Self = Self(1);
    pub const EN_PASSANT: Self = Self(2);
    pub const PROMO_KNIGHT: Self = Self(3);
    pub const PROMO_BISHOP: Self = Self(4);
    pub const PROMO_ROOK: Self = Self(5);
    pub const PROMO_QUEEN: Self = Self(6);
}

impl CastlingRights {
    /// Engine kingside castling right.
    pub const US_KINGSIDE: Self = Self(1 << 0);
    /// Engine queenside castling right.
    pub const US_QUEENSIDE: Self = Self(1 << 1);
    /// Opponent kingside castling right.
    pub const THEM_KINGSIDE: Self = Self(1 << 2);
    /// Opponent queenside castling right.
    pub const THEM_QUEENSIDE: Self = Self(1 << 3);
    /// No castling rights.
    pub const NONE: Self = Self(0);

    /// Returns the right for `side`'s kingside castle.
    #[must_use]
    pub const fn kingside(side: Side) -> Self {
        if side.0 == Side::US.0 {
            Self::US_KINGSIDE
        } else {
            Self::THEM_KINGSIDE
        }
    }

    /// Returns the right for `side`'s queenside castle.
    #[must_use]
    pub const fn queenside(side: Side) -> Self {
        if side.0 == Side::US.0 {
            Self::US_QUEENSIDE
        } else {
            Self::THEM_QUEENSIDE
        }
    }

    /// Tests whether `self` contains every flag set in `other`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the given flag.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears the given flag. Returns whether the flag was actually set.
    pub fn remove(&mut self, other: Self) -> bool {
        let changed = self.0 & other.0;
        self.0 &= !other.0;
        changed != 0
    }
}

impl MoveKind {
    /// Tests whether this move kind is one of the four promotion kinds.
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.0 >= Self::PROMO_KNIGHT.0
    }

    /// Converts a promotion [`MoveKind`] into the [`PieceType`] it promotes
    /// to. Undefined for non-promotion kinds.
    #[must_use]
    pub const fn promotion_piece_type(self) -> PieceType {
        match self.0 {
            3 => PieceType::KNIGHT,
            4 => PieceType::BISHOP,
            5 => PieceType::ROOK,
            _ => PieceType::QUEEN,
        }
    }
}

impl From<File> for char {
    fn from(file: File) -> Self {
        (b'a' + file.0) as Self
    }
}

impl From<Rank> for char {
    fn from(rank: Rank) -> Self {
        (b'1' + rank.0) as Self
    }
}

impl From<Square> for File {
    fn from(square: Square) -> Self {
        Self(square.0 & 7)
    }
}

impl From<Square> for Rank {
    fn from(square: Square) -> Self {
        Self(square.0 >> 3)
    }
}

impl From<Bitboard> for Square {
    /// Converts the position of the LSB of `bb` to a [`Square`].
    fn from(bb: Bitboard) -> Self {
        Self(bb.0.trailing_zeros() as u8)
    }
}

impl Display for Square {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            fmt.write_str("-")
        } else {
            let mut ret = String::with_capacity(2);
            ret.push(char::from(File::from(*self)));
            ret.push(char::from(Rank::from(*self)));
            fmt.write_str(&ret)
        }
    }
}

impl FromStr for Square {
    type Err = EngineError;

    /// Converts a string such as "e4" into a [`Square`]. "-" maps to
    /// [`Square::NONE`].
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        if string == "-" {
            return Ok(Self::NONE);
        }

        let bytes = string.as_bytes();
        if bytes.len() != 2 {
            return Err(EngineError::ConfigError {
                reason: format!("'{string}' is not a valid square"),
            });
        }

        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(EngineError::ConfigError {
                reason: format!("'{string}' is not a valid square"),
            });
        }

        Ok(Self((rank - b'1') * 8 + (file - b'a')))
    }
}

impl Add<Direction> for Square {
    type Output = Self;

    fn add(self, rhs: Direction) -> Self::Output {
        Self(self.0.wrapping_add_signed(rhs.0))
    }
}

impl Sub<Direction> for Square {
    type Output = Self;

    fn sub(self, rhs: Direction) -> Self::Output {
        Self(self.0.wrapping_add_signed(-rhs.0))
    }
}

impl Square {
    /// Converts `rank` and `file` into a [`Square`].
    #[must_use]
    pub const fn from_pos(rank: Rank, file: File) -> Self {
        Self(rank.0 * 8 + file.0)
    }

    /// Converts the square to a `usize` for table indexing.
    #[must_use]
    pub const fn to_index(self) -> usize {
        self.0 as usize
    }
}

impl Color {
    /// Flips white to black and vice versa.
    #[must_use]
    pub const fn flip(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Converts the color to a `usize` for table indexing.
    #[must_use]
    pub const fn to_index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<char> for Color {
    type Error = EngineError;

    /// Interprets a FEN side-to-move character: `w` or `b`.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'w' => Ok(Self::WHITE),
            'b' => Ok(Self::BLACK),
            _ => Err(EngineError::ConfigError {
                reason: format!("'{c}' is not a valid side-to-move character"),
            }),
        }
    }
}

impl Side {
    /// Flips `Us` to `Them` and vice versa. Undefined for [`Side::NONE`].
    #[must_use]
    pub const fn flip(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Converts the side to a `usize` for table indexing.
    #[must_use]
    pub const fn to_index(self) -> usize {
        self.0 as usize
    }
}

impl PieceType {
    /// Converts the piece type to a `usize` for table indexing.
    #[must_use]
    pub const fn to_index(self) -> usize {
        self.0 as usize
    }

    /// The material value of the piece type, in centipawns. Kings are
    /// scored 0 since they are never captured.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self.0 {
            0 => 100,
            1 => 350,
            2 => 400,
            3 => 550,
            4 => 1000,
            _ => 0,
        }
    }
}

impl From<PieceKind> for char {
    /// Converts a piece kind into a character, using uppercase for `Us` and
    /// lowercase for `Them` regardless of physical color (this is a
    /// debug/logging aid, not FEN output, since FEN case is tied to
    /// physical color instead).
    fn from(piece: PieceKind) -> Self {
        const CHARS: [char; PieceKind::TOTAL + 1] = [
            'P', 'p', 'N', 'n', 'B', 'b', 'R', 'r', 'Q', 'q', 'K', 'k', '-',
        ];
        CHARS[piece.to_index()]
    }
}

impl From<PieceKind> for PieceType {
    fn from(piece: PieceKind) -> Self {
        Self(piece.0 >> 1)
    }
}

impl From<PieceKind> for Side {
    fn from(piece: PieceKind) -> Self {
        Self(piece.0 & 1)
    }
}

impl PieceKind {
    /// Creates a [`PieceKind`] from a [`PieceType`] and a [`Side`].
    #[must_use]
    pub const fn new(piece_type: PieceType, side: Side) -> Self {
        Self((piece_type.0 << 1) | side.0)
    }

    /// Converts the piece kind to a `usize` for table indexing.
    #[must_use]
    pub const fn to_index(self) -> usize {
        self.0 as usize
    }
}
