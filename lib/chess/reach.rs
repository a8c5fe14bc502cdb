use crate::chess::{Board, Piece, Rank, Role, Square};
use arrayvec::ArrayVec;

/// A bounded list of [`Square`]s, large enough for the reach of a queen.
pub type Squares = ArrayVec<Square, 27>;

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ADJACENT: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The squares a piece could move to based on its movement pattern alone.
///
/// Pawns are the only pieces whose captures differ from their movement, so they
/// are kept apart: [`Reach::pushes`] may only be entered if free, whereas
/// [`Reach::attacks`] may only be entered to capture.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Reach {
    attacks: Squares,
    pushes: Squares,
}

impl Reach {
    /// The squares attacked, i.e. that could be entered by capturing.
    ///
    /// For every piece other than the pawn these are also the squares it may move to.
    #[inline(always)]
    pub fn attacks(&self) -> &[Square] {
        &self.attacks
    }

    /// The squares a pawn may advance to without capturing.
    #[inline(always)]
    pub fn pushes(&self) -> &[Square] {
        &self.pushes
    }

    /// Whether the square is reached either way.
    pub fn contains(&self, sq: Square) -> bool {
        self.attacks.contains(&sq) || self.pushes.contains(&sq)
    }
}

/// Computes the [`Reach`] of a [`Piece`] standing on a [`Square`].
///
/// Sliding pieces are stopped by the first occupied square in each direction, which is
/// itself included regardless of its occupant's color. The board is otherwise only
/// consulted to tell whether a pawn still has its double step.
pub fn reach(piece: Piece, whence: Square, board: &Board) -> Reach {
    let mut reach = Reach::default();

    match piece.role() {
        Role::Pawn => {
            let side = piece.color();
            let ahead = side.forward();

            if let Some(sq) = whence.offset(0, ahead) {
                reach.pushes.push(sq);
            }

            if whence.rank() == Rank::pawns(side) && !board.has_moved(whence) {
                reach.pushes.extend(whence.offset(0, 2 * ahead));
            }

            for files in [-1, 1] {
                reach.attacks.extend(whence.offset(files, ahead));
            }
        }

        Role::Knight => leap(&mut reach.attacks, whence, &KNIGHT),
        Role::Bishop => slide(&mut reach.attacks, whence, &DIAGONAL, board),
        Role::Rook => slide(&mut reach.attacks, whence, &ORTHOGONAL, board),
        Role::Queen => {
            slide(&mut reach.attacks, whence, &ORTHOGONAL, board);
            slide(&mut reach.attacks, whence, &DIAGONAL, board);
        }
        Role::King => leap(&mut reach.attacks, whence, &ADJACENT),
    }

    reach
}

/// The squares strictly between two squares on the same rank, file or diagonal.
///
/// Empty if the squares are not aligned or are adjacent.
pub fn between(a: Square, b: Square) -> Squares {
    let (files, ranks) = (b.file() - a.file(), b.rank() - a.rank());
    let mut squares = Squares::new();

    if (files, ranks) == (0, 0) || (files != 0 && ranks != 0 && files.abs() != ranks.abs()) {
        return squares;
    }

    let step = (files.signum(), ranks.signum());
    let mut sq = a;
    while let Some(next) = sq.offset(step.0, step.1).filter(|&s| s != b) {
        squares.push(next);
        sq = next;
    }

    squares
}

fn leap(squares: &mut Squares, whence: Square, offsets: &[(i8, i8)]) {
    squares.extend(offsets.iter().filter_map(|&(f, r)| whence.offset(f, r)));
}

fn slide(squares: &mut Squares, whence: Square, directions: &[(i8, i8)], board: &Board) {
    for &(f, r) in directions {
        let mut sq = whence;
        while let Some(next) = sq.offset(f, r) {
            squares.push(next);
            if !board.is_free(next) {
                break;
            }

            sq = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Color;
    use crate::util::Integer;
    use std::collections::HashSet;
    use test_strategy::proptest;

    fn alone(p: Piece, sq: Square) -> (Board, Reach) {
        let mut board = Board::empty();
        board.insert(p, sq);
        let reach = reach(p, sq, &board);
        (board, reach)
    }

    #[proptest]
    fn reach_never_contains_the_piece_square(b: Board, #[filter(#b[#sq].is_some())] sq: Square) {
        let p = b[sq].unwrap();
        assert!(!reach(p, sq, &b).contains(sq));
    }

    #[proptest]
    fn reach_has_no_duplicates(b: Board, #[filter(#b[#sq].is_some())] sq: Square) {
        let r = reach(b[sq].unwrap(), sq, &b);
        let unique: HashSet<_> = r.attacks().iter().chain(r.pushes()).collect();
        assert_eq!(unique.len(), r.attacks().len() + r.pushes().len());
    }

    #[proptest]
    fn only_pawns_push(b: Board, #[filter(#b[#sq].is_some_and(|p| p.role() != Role::Pawn))] sq: Square) {
        assert!(reach(b[sq].unwrap(), sq, &b).pushes().is_empty());
    }

    #[proptest]
    fn knight_reaches_squares_an_l_shape_away(sq: Square, c: Color) {
        let (_, r) = alone(Piece::new(Role::Knight, c), sq);
        for &t in r.attacks() {
            let d = ((t.file() - sq.file()).abs(), (t.rank() - sq.rank()).abs());
            assert!(d == (1, 2) || d == (2, 1));
        }
    }

    #[proptest]
    fn king_reaches_adjacent_squares(sq: Square, c: Color) {
        let (_, r) = alone(Piece::new(Role::King, c), sq);
        let expected: HashSet<_> = Square::iter()
            .filter(|&t| t != sq)
            .filter(|&t| (t.file() - sq.file()).abs() <= 1 && (t.rank() - sq.rank()).abs() <= 1)
            .collect();

        assert_eq!(r.attacks().iter().copied().collect::<HashSet<_>>(), expected);
    }

    #[proptest]
    fn lone_queen_reaches_union_of_rook_and_bishop(sq: Square, c: Color) {
        let (_, q) = alone(Piece::new(Role::Queen, c), sq);
        let (_, r) = alone(Piece::new(Role::Rook, c), sq);
        let (_, b) = alone(Piece::new(Role::Bishop, c), sq);

        let queen: HashSet<_> = q.attacks().iter().collect();
        let union: HashSet<_> = r.attacks().iter().chain(b.attacks()).collect();
        assert_eq!(queen, union);
    }

    #[proptest]
    fn lone_rook_always_reaches_fourteen_squares(sq: Square, c: Color) {
        let (_, r) = alone(Piece::new(Role::Rook, c), sq);
        assert_eq!(r.attacks().len(), 14);
    }

    #[test]
    fn rays_stop_at_first_blocker_inclusive() {
        let mut board = Board::empty();
        board.insert(Piece::WhiteRook, Square::A1);
        board.insert(Piece::WhitePawn, Square::A3);
        board.insert(Piece::BlackKnight, Square::D1);

        let r = reach(Piece::WhiteRook, Square::A1, &board);
        let squares: HashSet<_> = r.attacks().iter().copied().collect();

        use Square::*;
        assert_eq!(squares, HashSet::from([A2, A3, B1, C1, D1]));
    }

    #[test]
    fn unmoved_pawn_on_its_starting_rank_may_double_step() {
        let (_, r) = alone(Piece::WhitePawn, Square::E2);
        assert_eq!(r.pushes(), &[Square::E3, Square::E4]);
        assert_eq!(r.attacks(), &[Square::D3, Square::F3]);

        let (_, r) = alone(Piece::BlackPawn, Square::E7);
        assert_eq!(r.pushes(), &[Square::E6, Square::E5]);
        assert_eq!(r.attacks(), &[Square::D6, Square::F6]);
    }

    #[test]
    fn pawn_loses_double_step_once_moved() {
        let mut board = Board::empty();
        board.insert(Piece::WhitePawn, Square::E2);
        board.relocate(Square::E2, Square::E3);
        board.relocate(Square::E3, Square::E2);
        assert_eq!(reach(Piece::WhitePawn, Square::E2, &board).pushes(), &[Square::E3]);
    }

    #[test]
    fn pawn_off_its_starting_rank_single_steps() {
        let (_, r) = alone(Piece::BlackPawn, Square::C5);
        assert_eq!(r.pushes(), &[Square::C4]);
    }

    #[test]
    fn pawn_on_edge_file_attacks_one_square() {
        let (_, r) = alone(Piece::WhitePawn, Square::H4);
        assert_eq!(r.attacks(), &[Square::G5]);
    }

    #[test]
    fn between_walks_along_lines() {
        use Square::*;
        assert_eq!(between(A1, A4).as_slice(), &[A2, A3]);
        assert_eq!(between(H1, E1).as_slice(), &[G1, F1]);
        assert_eq!(between(A1, D4).as_slice(), &[B2, C3]);
        assert_eq!(between(H8, E5).as_slice(), &[G7, F6]);
        assert_eq!(between(A8, C6).as_slice(), &[B7]);
    }

    #[test]
    fn between_is_empty_for_unaligned_or_adjacent_squares() {
        use Square::*;
        assert!(between(A1, B3).is_empty());
        assert!(between(A1, B2).is_empty());
        assert!(between(E4, E4).is_empty());
    }

    #[proptest]
    fn between_is_symmetric(a: Square, b: Square) {
        let mut forth = between(a, b);
        let back = between(b, a);
        forth.reverse();
        assert_eq!(forth, back);
    }
}
