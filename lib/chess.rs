mod action;
mod bitboard;
mod board;
mod faction;
mod game;
mod r#move;
mod piece;
mod role;
mod rules;
mod setup;
mod square;

pub use action::*;
pub use bitboard::*;
pub use board::*;
pub use faction::*;
pub use game::*;
pub use piece::*;
pub use r#move::*;
pub use role::*;
pub use rules::*;
pub use setup::*;
pub use square::*;
