use crate::chess::{between, reach, Board, Castle, Color, Move, MoveResult};
use crate::chess::{Piece, Reach, Role, Square, Squares, Status};
use arrayvec::ArrayVec;
use derive_more::{Display, Error};
use std::ops::Index;

/// Represents an illegal [`Move`] in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display("move `{_0}` is illegal in this position")]
pub struct IllegalMove(#[error(not(source))] pub Move);

/// The current position on the chess board.
///
/// Besides the [`Board`], a position knows the side to move and whether a pawn has
/// just advanced two squares, in which case it may be captured en passant on this
/// ply only.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    board: Board,
    turn: Color,
    en_passant: Option<Square>,
}

impl Default for Position {
    /// The standard starting position.
    fn default() -> Self {
        Position::new(Board::default(), Color::White)
    }
}

impl Position {
    /// Constructs a position from a [`Board`] and the side to move.
    pub fn new(board: Board, turn: Color) -> Self {
        Position {
            board,
            turn,
            en_passant: None,
        }
    }

    /// The piece placement.
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline(always)]
    pub(crate) fn set_turn(&mut self, side: Color) {
        self.turn = side;
    }

    /// The square a pawn passed over on the previous ply by advancing two squares.
    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Whether no piece occupies the given [`Square`].
    #[inline(always)]
    pub fn is_free(&self, sq: Square) -> bool {
        self.board.is_free(sq)
    }

    /// Whether the piece on `whence` may enter `whither` by its movement pattern.
    ///
    /// Considers blocking pieces, the color of the occupant of `whither` and the
    /// pawn's distinction between advancing and capturing, but not the safety of
    /// the king.
    pub fn can_reach(&self, whence: Square, whither: Square) -> bool {
        match self.board[whence] {
            None => false,
            Some(p) => self.admits(p, whence, whither, &reach(p, whence, &self.board)),
        }
    }

    /// A piece of a [`Color`] that attacks a [`Square`], if any.
    pub fn attacker(&self, sq: Square, by: Color) -> Option<(Piece, Square)> {
        self.board.attackers(sq, by).next()
    }

    /// Whether any piece of a [`Color`] attacks a [`Square`].
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.board.is_attacked(sq, by)
    }

    /// Whether the king of a [`Color`] is in check.
    pub fn is_check(&self, side: Color) -> bool {
        self.board.is_check(side)
    }

    /// The pieces giving check to the king of a [`Color`].
    pub fn checkers(&self, side: Color) -> ArrayVec<(Piece, Square), 16> {
        match self.board.king(side) {
            None => ArrayVec::new(),
            Some(king) => self.board.attackers(king, !side).collect(),
        }
    }

    /// Whether moving the piece on `whence` to `whither` leaves its own king in check.
    ///
    /// The move is simulated on a scratch copy of the board, so this position is
    /// never observed in an intermediate state.
    pub fn would_expose_king(&self, whence: Square, whither: Square) -> bool {
        let Some(piece) = self.board[whence] else {
            return false;
        };

        let mut board = self.board;
        if self.is_en_passant(whence, whither) {
            board.remove(Square::new(whither.file(), whence.rank()));
        }

        board.relocate(whence, whither);
        board.is_check(piece.color())
    }

    /// The square the king of a [`Color`] would land on by castling, if that is legal.
    ///
    /// Requires the king and the rook to have never moved, the squares between
    /// them to be free, and the king not to be in check nor to cross or land on an
    /// attacked square.
    pub fn castling(&self, side: Color, castle: Castle) -> Option<Square> {
        let (king, rook) = (Castle::king(side), castle.rook(side));

        if self.board[king] != Some(Piece::new(Role::King, side)) || self.board.has_moved(king) {
            return None;
        }

        if self.board[rook] != Some(Piece::new(Role::Rook, side)) || self.board.has_moved(rook) {
            return None;
        }

        if !between(king, rook).iter().all(|&sq| self.is_free(sq)) || self.is_check(side) {
            return None;
        }

        let destination = castle.king_destination(side);
        let mut path = between(king, destination);
        path.push(destination);

        if path.iter().any(|&sq| self.is_attacked(sq, !side)) {
            return None;
        }

        Some(destination)
    }

    /// Whether the pawn on `whence` may capture en passant by moving to `whither`.
    pub fn is_en_passant(&self, whence: Square, whither: Square) -> bool {
        let Some(pawn) = self.board[whence] else {
            return false;
        };

        if pawn.role() != Role::Pawn || pawn.color() != self.turn || self.en_passant != Some(whither) {
            return false;
        }

        let victim = Square::new(whither.file(), whence.rank());
        self.board[victim] == Some(Piece::new(Role::Pawn, !pawn.color()))
            && reach(pawn, whence, &self.board).attacks().contains(&whither)
    }

    /// The squares the piece on `whence` may legally move to.
    ///
    /// Empty if the square is empty, or if the piece is pinned or otherwise unable
    /// to move without leaving its own king in check. Kings are never captured,
    /// even in positions where the side that just moved was left in check.
    pub fn legal_destinations(&self, whence: Square) -> Squares {
        let Some(piece) = self.board[whence] else {
            return Squares::new();
        };

        let side = piece.color();
        let reach = reach(piece, whence, &self.board);
        let mut destinations: Squares = reach
            .pushes()
            .iter()
            .chain(reach.attacks())
            .copied()
            .filter(|&sq| self.admits(piece, whence, sq, &reach))
            .collect();

        if piece.role() == Role::King && whence == Castle::king(side) {
            for castle in [Castle::Short, Castle::Long] {
                destinations.extend(self.castling(side, castle));
            }
        }

        destinations.retain(|&mut sq| {
            self.board[sq].map_or(true, |p| p.role() != Role::King)
                && (piece.role() == Role::King || self.defends(side, whence, sq))
                && !self.would_expose_king(whence, sq)
        });

        destinations
    }

    /// An iterator over the legal moves of the side to move.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.board.by_color(self.turn).flat_map(move |(_, whence)| {
            self.legal_destinations(whence)
                .into_iter()
                .map(move |whither| Move(whence, whither))
        })
    }

    /// The [`Status`] of the game for the side to move.
    pub fn status(&self) -> Status {
        if self.board.len() == 2 && self.board.iter().all(|(p, _)| p.role() == Role::King) {
            return Status::Stalemate;
        }

        match (self.is_check(self.turn), self.moves().next().is_none()) {
            (true, true) => Status::Checkmate,
            (false, true) => Status::Stalemate,
            (true, false) => Status::Check,
            (false, false) => Status::Normal,
        }
    }

    /// Plays a [`Move`] if legal, otherwise leaves the position untouched.
    pub fn play(&mut self, m: Move) -> Result<MoveResult, IllegalMove> {
        let legal = self.board[m.whence()].is_some_and(|p| p.color() == self.turn)
            && self.legal_destinations(m.whence()).contains(&m.whither());

        if legal {
            Ok(self.play_unchecked(m))
        } else {
            Err(IllegalMove(m))
        }
    }

    /// Plays a [`Move`] without checking whether it is legal.
    ///
    /// # Panics
    ///
    /// Panics if there is no piece on the source square.
    pub fn play_unchecked(&mut self, m: Move) -> MoveResult {
        let (whence, whither) = (m.whence(), m.whither());
        let Some(piece) = self.board[whence] else {
            panic!("no piece on square `{whence}`");
        };

        let side = piece.color();
        let en_passant = self.is_en_passant(whence, whither);
        let castle = match piece.role() {
            Role::King => Castle::recognize(whence, whither, side),
            _ => None,
        };

        let mut capture = self.board.relocate(whence, whither).map(|p| (p, whither));

        if en_passant {
            let victim = Square::new(whither.file(), whence.rank());
            capture = self.board.remove(victim).map(|p| (p, victim));
        }

        let castling = castle.map(|c| {
            let rook = Move(c.rook(side), c.rook_destination(side));
            self.board.relocate(rook.whence(), rook.whither());
            rook
        });

        self.en_passant = match piece.role() {
            Role::Pawn if (whither.rank() - whence.rank()).abs() == 2 => {
                whence.offset(0, side.forward())
            }

            _ => None,
        };

        self.turn = !side;

        MoveResult {
            piece,
            played: m,
            capture,
            castling,
            status: self.status(),
            turn: self.turn,
        }
    }

    /// Whether `piece` may enter `whither` from `whence` given its [`Reach`].
    fn admits(&self, piece: Piece, whence: Square, whither: Square, reach: &Reach) -> bool {
        match self.board[whither] {
            Some(p) if p.color() == piece.color() => false,
            None if reach.pushes().contains(&whither) => {
                between(whence, whither).iter().all(|&sq| self.is_free(sq))
            }

            None if piece.role() == Role::Pawn => {
                reach.attacks().contains(&whither) && self.is_en_passant(whence, whither)
            }

            _ => reach.attacks().contains(&whither),
        }
    }

    /// Whether moving the piece on `whence` to `whither` answers every check against
    /// the king of `side`, by capturing the checker or interposing on its line.
    fn defends(&self, side: Color, whence: Square, whither: Square) -> bool {
        let Some(king) = self.board.king(side) else {
            return true;
        };

        let captured = match self.is_en_passant(whence, whither) {
            true => Square::new(whither.file(), whence.rank()),
            false => whither,
        };

        self.board.attackers(king, !side).all(|(checker, sq)| {
            sq == captured || (checker.role().is_slider() && between(sq, king).contains(&whither))
        })
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Position {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.board[sq]
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Position {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Position>;

    // Positions reachable from the starting position by random playouts.
    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{prelude::*, sample::Selector};

        (0..80usize, any::<Selector>())
            .prop_map(|(plies, selector)| {
                let mut pos = Position::default();

                for _ in 0..plies {
                    match selector.try_select(pos.moves()) {
                        None => break,
                        Some(m) => pos.play_unchecked(m),
                    };
                }

                pos
            })
            .boxed()
    }
}
