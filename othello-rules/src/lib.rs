//! `othello-rules` is a complete, safe implementation of the rules of Othello
//! for engines and UIs, on boards of any even size.
//!
//! This package implements two levels of abstraction:
//!
//!  - [`BoardState`] is a single immutable snapshot of the board and the side to move.
//!    It owns placement, capture and move legality.
//!  - [`GameHistory`] is the append-only record of a game. It owns turn order,
//!    forced passes and detecting the end of the game.
//!
//! Rendering and input handling are left to callers: they read the current
//! [`BoardState`] and submit moves through [`GameHistory`].

pub mod test_utils;

mod board;
mod game;
mod location;
mod utils;

pub use board::*;
pub use game::*;
pub use location::*;

/// The number of spaces on one edge of a standard Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on a standard Othello board.
pub const NUM_SPACES: usize = EDGE_LENGTH * EDGE_LENGTH;
