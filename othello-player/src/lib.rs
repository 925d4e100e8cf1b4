//! `othello-player` seats players at an Othello game run by `othello-rules`.
//!
//!  - [`connectors`] are the ways a move can reach the game: a terminal, a pipe,
//!    or a uniformly random mover.
//!  - [`Referee`] drives a game between two connectors, applying forced passes
//!    and reporting the outcome.
//!  - [`config`] holds the settings for the `play` binary.

pub mod config;
pub mod connectors;

mod referee;

pub use referee::*;
