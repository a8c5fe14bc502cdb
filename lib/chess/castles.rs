use crate::chess::{Color, Perspective, Square};
use derive_more::Display;

/// One of the two ways a king may castle.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Castle {
    /// Kingside, toward the h-file rook.
    #[display("O-O")]
    Short,
    /// Queenside, toward the a-file rook.
    #[display("O-O-O")]
    Long,
}

impl Castle {
    /// The home [`Square`] of the king of a [`Color`].
    #[inline(always)]
    pub fn king(side: Color) -> Square {
        Square::E1.perspective(side)
    }

    /// The home [`Square`] of the rook that castles this way.
    #[inline(always)]
    pub fn rook(&self, side: Color) -> Square {
        match self {
            Castle::Short => Square::H1.perspective(side),
            Castle::Long => Square::A1.perspective(side),
        }
    }

    /// Where the king lands after castling.
    #[inline(always)]
    pub fn king_destination(&self, side: Color) -> Square {
        match self {
            Castle::Short => Square::G1.perspective(side),
            Castle::Long => Square::C1.perspective(side),
        }
    }

    /// Where the rook lands after castling.
    #[inline(always)]
    pub fn rook_destination(&self, side: Color) -> Square {
        match self {
            Castle::Short => Square::F1.perspective(side),
            Castle::Long => Square::D1.perspective(side),
        }
    }

    /// Recognizes a king move from its home square to one of its castling destinations.
    pub fn recognize(whence: Square, whither: Square, side: Color) -> Option<Self> {
        if whence != Castle::king(side) {
            return None;
        }

        [Castle::Short, Castle::Long]
            .into_iter()
            .find(|c| c.king_destination(side) == whither)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn king_and_rook_swap_sides(c: Castle, side: Color) {
        let king = c.king_destination(side);
        let rook = c.rook_destination(side);
        assert_eq!((king.file() - rook.file()).abs(), 1);
        assert_eq!(rook.file() - Castle::king(side).file(), (king.file() - Castle::king(side).file()) / 2);
    }

    #[proptest]
    fn castling_keeps_pieces_on_the_home_rank(c: Castle, side: Color) {
        let rank = Castle::king(side).rank();
        assert_eq!(c.rook(side).rank(), rank);
        assert_eq!(c.king_destination(side).rank(), rank);
        assert_eq!(c.rook_destination(side).rank(), rank);
    }

    #[proptest]
    fn recognize_finds_castling_from_king_destination(c: Castle, side: Color) {
        assert_eq!(Castle::recognize(Castle::king(side), c.king_destination(side), side), Some(c));
    }

    #[proptest]
    fn recognize_requires_the_king_home_square(
        c: Castle,
        side: Color,
        #[filter(#whence != Castle::king(#side))] whence: Square,
    ) {
        assert_eq!(Castle::recognize(whence, c.king_destination(side), side), None);
    }

    #[test]
    fn black_castles_on_the_eighth_rank() {
        assert_eq!(Castle::Short.rook(Color::Black), Square::H8);
        assert_eq!(Castle::Long.king_destination(Color::Black), Square::C8);
        assert_eq!(Castle::Long.rook_destination(Color::Black), Square::D8);
    }
}
