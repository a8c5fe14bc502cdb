use crate::chess::{Board, Color, IllegalMove, Move, MoveResult, Piece};
use crate::chess::{Position, Rank, Role, Square, Squares, Status};
use derive_more::{Display, Error, From};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// The reason why a piece could not be placed on the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
pub enum SetupError {
    #[display("square `{_0}` is already occupied")]
    Occupied(#[error(not(source))] Square),

    #[display("there is already a {_0} king on the board")]
    DuplicateKing(#[error(not(source))] Color),

    #[display("the board can no longer be set up once the game has started")]
    GameStarted,

    #[display("the {_0} king is in check while {_0} is not to move")]
    KingLeftInCheck(#[error(not(source))] Color),
}

/// The reason why a [`Move`] was not played.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum PlayError {
    #[display("the game is over by {_0}")]
    #[from(skip)]
    GameOver(#[error(not(source))] Status),

    #[display("failed to play move")]
    Illegal(IllegalMove),

    #[display("the game cannot start from this position")]
    Setup(SetupError),
}

/// The reason why a pawn could not be promoted.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
pub enum PromotionError {
    #[display("there is no pawn on square `{_0}`")]
    NotPawn(#[error(not(source))] Square),

    #[display("the pawn on square `{_0}` has not reached the last rank")]
    NotLastRank(#[error(not(source))] Square),

    #[display("a pawn cannot be promoted to {_0}")]
    InvalidRole(#[error(not(source))] Role),

    #[display("the pawn on square `{_0}` did not reach the last rank on the previous move")]
    Late(#[error(not(source))] Square),
}

/// A game of chess.
///
/// Owns the [`Position`] and the record of every [`MoveResult`] so far. Pieces may
/// only be placed before the first move, after which moves are the only way to
/// change the position, apart from promoting pawns that reached the last rank.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Game {
    position: Position,
    history: Vec<MoveResult>,
}

impl From<Position> for Game {
    fn from(position: Position) -> Self {
        Game {
            position,
            history: Vec::new(),
        }
    }
}

impl Game {
    /// A game on an empty board with white to move.
    pub fn new() -> Self {
        Position::new(Board::empty(), Color::White).into()
    }

    /// The current [`Position`].
    #[inline(always)]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// The current [`Status`].
    ///
    /// Classifies the position for the side to move; see [`Game::validate`] for
    /// whether the position may be played from at all.
    pub fn status(&self) -> Status {
        self.position.status()
    }

    /// The result of every move played so far, in order.
    #[inline(always)]
    pub fn history(&self) -> &[MoveResult] {
        &self.history
    }

    /// Places a piece on an empty square before the game starts.
    #[instrument(level = "trace", skip(self), err)]
    pub fn setup_piece(&mut self, sq: Square, role: Role, color: Color) -> Result<(), SetupError> {
        if !self.history.is_empty() {
            return Err(SetupError::GameStarted);
        }

        if !self.position.is_free(sq) {
            return Err(SetupError::Occupied(sq));
        }

        if role == Role::King && self.position.board().king(color).is_some() {
            return Err(SetupError::DuplicateKing(color));
        }

        self.position.board_mut().insert(Piece::new(role, color), sq);
        Ok(())
    }

    /// Chooses the side to move before the game starts.
    #[instrument(level = "trace", skip(self), err)]
    pub fn set_turn(&mut self, side: Color) -> Result<(), SetupError> {
        if !self.history.is_empty() {
            return Err(SetupError::GameStarted);
        }

        self.position.set_turn(side);
        Ok(())
    }

    /// Whether play may proceed from the current position.
    ///
    /// Pieces and the turn may be set up in any order, so a position where the
    /// side that just moved is still in check is only rejected here.
    pub fn validate(&self) -> Result<(), SetupError> {
        let idle = !self.turn();
        match self.position.is_check(idle) {
            true => Err(SetupError::KingLeftInCheck(idle)),
            false => Ok(()),
        }
    }

    /// The squares the piece on `whence` may legally move to.
    ///
    /// Empty unless the square holds a piece of the side to move, the position is
    /// valid and the game is not over.
    pub fn legal_moves(&self, whence: Square) -> Squares {
        match self.position[whence] {
            Some(p) if p.color() == self.turn() && self.validate().is_ok() => {
                match self.status().is_terminal() {
                    true => Squares::new(),
                    false => self.position.legal_destinations(whence),
                }
            }

            _ => Squares::new(),
        }
    }

    /// Plays a [`Move`] for the side to move.
    ///
    /// Nothing changes if the move is rejected.
    #[instrument(level = "debug", skip(self), ret(Display), err)]
    pub fn play(&mut self, m: Move) -> Result<MoveResult, PlayError> {
        self.validate()?;

        let status = self.status();
        if status.is_terminal() {
            return Err(PlayError::GameOver(status));
        }

        let result = self.position.play(m)?;
        self.history.push(result);
        Ok(result)
    }

    /// Replaces a pawn that reached the last rank by a knight, bishop, rook or queen.
    ///
    /// Only the pawn that moved on the previous ply may be promoted. Returns the
    /// [`Status`] of the resulting position, which is also recorded on the last
    /// [`MoveResult`].
    #[instrument(level = "debug", skip(self), ret, err)]
    pub fn promote(&mut self, sq: Square, role: Role) -> Result<Status, PromotionError> {
        let pawn = match self.position[sq] {
            Some(p) if p.role() == Role::Pawn => p,
            _ => return Err(PromotionError::NotPawn(sq)),
        };

        if sq.rank() != Rank::promotion(pawn.color()) {
            return Err(PromotionError::NotLastRank(sq));
        }

        if matches!(role, Role::Pawn | Role::King) {
            return Err(PromotionError::InvalidRole(role));
        }

        let Some(last) = self.history.last_mut() else {
            return Err(PromotionError::Late(sq));
        };

        if last.played.whither() != sq || last.piece != pawn {
            return Err(PromotionError::Late(sq));
        }

        let piece = Piece::new(role, pawn.color());
        self.position.board_mut().replace(piece, sq);
        let status = self.position.status();

        debug!(%piece, %status, "promoted");
        last.status = status;
        Ok(status)
    }

    /// A snapshot of the piece placement.
    pub fn export(&self) -> BTreeMap<Square, Piece> {
        self.position
            .board()
            .iter()
            .map(|(p, sq)| (sq, p))
            .collect()
    }
}
