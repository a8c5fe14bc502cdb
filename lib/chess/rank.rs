use crate::chess::{Color, Perspective};
use crate::util::Integer;
use derive_more::{Display, Error};
use std::{fmt, ops::Sub, str::FromStr};

/// A row on the chess board, `1` through `8` counting from white's side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

unsafe impl Integer for Rank {
    type Repr = i8;
    const MIN: Self::Repr = Rank::First as _;
    const MAX: Self::Repr = Rank::Eighth as _;
}

impl Rank {
    /// The rank pawns of a [`Color`] start on, and double step from.
    #[inline(always)]
    pub fn pawns(side: Color) -> Self {
        Rank::Second.perspective(side)
    }

    /// The rank pawns of a [`Color`] are promoted on.
    #[inline(always)]
    pub fn promotion(side: Color) -> Self {
        Rank::Eighth.perspective(side)
    }

    /// The rank `n` rows towards `8`, or towards `1` if `n` is negative.
    #[inline(always)]
    pub fn offset(self, n: i8) -> Option<Self> {
        Self::try_new(self.get().checked_add(n)?)
    }
}

impl Perspective for Rank {
    #[inline(always)]
    fn flip(&self) -> Self {
        Self::new(Self::MAX - self.get())
    }
}

/// The signed number of rows from `rhs` to `self`.
impl Sub for Rank {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.get() - rhs.get()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&(self.get() + 1), f)
    }
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse rank, expected a digit between `1` and `8`")]
pub struct ParseRankError;

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[c @ b'1'..=b'8'] => Ok(Rank::new((c - b'1') as i8)),
            _ => Err(ParseRankError),
        }
    }
}
