use crate::chess::{Color, ParseSquareError, Piece, Square, Status};
use derive_more::{Debug, Display, Error, From};
use std::{fmt, str::FromStr};

/// A chess move in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Move({self})")]
#[display("{_0}{_1}")]
pub struct Move(pub Square, pub Square);

impl Move {
    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.1
    }
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display("failed to parse move, expected a pair of squares such as `e2e4`")]
    #[from(skip)]
    InvalidSyntax,
    #[display("failed to parse move")]
    InvalidSquare(ParseSquareError),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parses a pair of squares, optionally separated by whitespace or a dash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        if !s.is_ascii() || s.len() != 4 {
            return Err(ParseMoveError::InvalidSyntax);
        }

        Ok(Move(s[..2].parse()?, s[2..].parse()?))
    }
}

/// What happened when a [`Move`] was played.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MoveResult {
    /// The piece moved.
    pub piece: Piece,
    /// The move played.
    pub played: Move,
    /// The piece captured and the square it stood on.
    ///
    /// The square differs from the destination only for en passant captures.
    pub capture: Option<(Piece, Square)>,
    /// The companion rook move, if castling.
    pub castling: Option<Move>,
    /// The [`Status`] of the game for the side to move next.
    pub status: Status,
    /// The side to move next.
    pub turn: Color,
}

impl MoveResult {
    /// Whether a piece was captured.
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Whether this was an en passant capture.
    pub fn is_en_passant(&self) -> bool {
        self.capture
            .is_some_and(|(_, sq)| sq != self.played.whither())
    }

    /// Whether this was a castling move.
    pub fn is_castling(&self) -> bool {
        self.castling.is_some()
    }

    /// The winning side, if the move delivered checkmate.
    pub fn winner(&self) -> Option<Color> {
        match self.status {
            Status::Checkmate => Some(!self.turn),
            _ => None,
        }
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.piece, self.played)?;

        if let Some((p, sq)) = self.capture {
            write!(f, " captures {} on {}", p, sq)?;
        }

        if let Some(rook) = self.castling {
            write!(f, " castling rook {}", rook)?;
        }

        match self.winner() {
            Some(c) => write!(f, ", {}, {} wins", self.status, c),
            None => write!(f, ", {}, {} to move", self.status, self.turn),
        }
    }
}
