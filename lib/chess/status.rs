use derive_more::Display;

/// The state of the game for the side to move.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Status {
    #[display("normal")]
    Normal,

    #[display("check")]
    Check,

    #[display("checkmate")]
    Checkmate,

    /// Either no legal moves while not in check, or only the two kings remain.
    #[display("stalemate")]
    Stalemate,
}

impl Status {
    /// Whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        matches!(self, Status::Check | Status::Checkmate)
    }
}
