/// Chess rules: piece placement, move legality and game status.
pub mod chess;
/// Assorted utilities.
pub mod util;
