mod board;
mod castles;
mod color;
mod file;
mod game;
mod r#move;
mod perspective;
mod piece;
mod position;
mod rank;
mod reach;
mod role;
mod square;
mod status;

pub use board::*;
pub use castles::*;
pub use color::*;
pub use file::*;
pub use game::*;
pub use perspective::*;
pub use piece::*;
pub use position::*;
pub use r#move::*;
pub use rank::*;
pub use reach::*;
pub use role::*;
pub use square::*;
pub use status::*;
