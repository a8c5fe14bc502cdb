use crate::chess::{reach, Color, File, Perspective, Piece, Rank, Role, Square};
use crate::util::Integer;
use std::fmt;
use std::ops::Index;

/// The piece placement on the board.
///
/// Besides which [`Piece`] stands on each [`Square`], the board remembers whether that
/// piece has ever moved. This type does not validate whether the placement it holds
/// is valid according to the rules of chess.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    pieces: [Option<Piece>; 64],
    moved: [bool; 64],
}

impl Default for Board {
    /// The standard starting array.
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for side in Color::iter() {
            for (f, role) in File::iter().zip(back) {
                let first = Square::new(f, Rank::First).perspective(side);
                let second = Square::new(f, Rank::Second).perspective(side);
                board.insert(Piece::new(role, side), first);
                board.insert(Piece::new(Pawn, side), second);
            }
        }

        board
    }
}

impl Board {
    /// A board without any pieces.
    pub fn empty() -> Self {
        Board {
            pieces: [None; 64],
            moved: [false; 64],
        }
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.pieces[sq as usize]
    }

    /// Whether no piece occupies the given [`Square`].
    #[inline(always)]
    pub fn is_free(&self, sq: Square) -> bool {
        self.piece_on(sq).is_none()
    }

    /// Whether the piece on the given [`Square`] has ever moved.
    ///
    /// Always `false` for empty squares.
    #[inline(always)]
    pub fn has_moved(&self, sq: Square) -> bool {
        self.moved[sq as usize]
    }

    /// The number of pieces on the board.
    pub fn len(&self) -> usize {
        self.pieces.iter().flatten().count()
    }

    /// Whether there are no pieces on the board.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An iterator over all pieces on the board.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::iter().filter_map(|sq| Some((self.piece_on(sq)?, sq)))
    }

    /// An iterator over the pieces of a [`Color`].
    pub fn by_color(&self, c: Color) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.iter().filter(move |(p, _)| p.color() == c)
    }

    /// [`Square`] occupied by the king of a [`Color`].
    pub fn king(&self, side: Color) -> Option<Square> {
        let king = Piece::new(Role::King, side);
        self.iter().find_map(|(p, sq)| (p == king).then_some(sq))
    }

    /// Places a piece that has not moved yet, returning the piece it displaced, if any.
    pub fn insert(&mut self, p: Piece, sq: Square) -> Option<Piece> {
        let displaced = self.pieces[sq as usize].replace(p);
        self.moved[sq as usize] = false;
        displaced
    }

    /// Swaps the piece on a square for another, preserving whether it has moved.
    pub fn replace(&mut self, p: Piece, sq: Square) -> Option<Piece> {
        self.pieces[sq as usize].replace(p)
    }

    /// Removes the piece from a square, if any.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.moved[sq as usize] = false;
        self.pieces[sq as usize].take()
    }

    /// Moves the piece on `whence` to `whither`, returning the piece it captured, if any.
    ///
    /// The moved piece is permanently marked as having moved.
    /// Nothing happens if `whence` is empty.
    pub fn relocate(&mut self, whence: Square, whither: Square) -> Option<Piece> {
        let piece = self.pieces[whence as usize].take()?;
        self.moved[whence as usize] = false;
        self.moved[whither as usize] = true;
        self.pieces[whither as usize].replace(piece)
    }

    /// An iterator over the pieces of a [`Color`] that attack a [`Square`].
    pub fn attackers(&self, sq: Square, by: Color) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.by_color(by)
            .filter(move |&(p, s)| reach(p, s, self).attacks().contains(&sq))
    }

    /// Whether any piece of a [`Color`] attacks a [`Square`].
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.attackers(sq, by).next().is_some()
    }

    /// Whether the king of a [`Color`] is attacked.
    ///
    /// A side without a king is never in check.
    pub fn is_check(&self, side: Color) -> bool {
        self.king(side)
            .is_some_and(|sq| self.is_attacked(sq, !side))
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.pieces[sq as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(p, sq)| (sq, p)))
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("   ")?;
        for file in File::iter() {
            write!(f, "  {} ", file)?;
        }

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        for rank in Rank::iter().rev() {
            write!(f, " {} |", rank)?;

            for file in File::iter() {
                match self[Square::new(file, rank)] {
                    Some(p) => write!(f, " {} |", p)?,
                    None => f.write_str("   |")?,
                }
            }

            writeln!(f, " {}", rank)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        f.write_str("   ")?;
        for file in File::iter() {
            write!(f, "  {} ", file)?;
        }

        Ok(())
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    // Arbitrary placements, not necessarily reachable from the starting array.
    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        proptest::collection::vec(any::<(Option<Piece>, bool)>(), 64)
            .prop_map(|cells| {
                let mut board = Board::empty();
                for (sq, (piece, moved)) in Square::iter().zip(cells) {
                    board.pieces[sq as usize] = piece;
                    board.moved[sq as usize] = piece.is_some() && moved;
                }

                board
            })
            .boxed()
    }
}
