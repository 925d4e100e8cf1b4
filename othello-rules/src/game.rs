//! Implements game-level Othello logic.
//!
//! [`GameHistory`] is the safe, complete interface to a game in progress:
//! it records every position, enforces turn order and detects forced passes
//! and the end of the game. Use [`BoardState`] directly for analysis.

use crate::board::{BoardError, BoardState};
use crate::location::{Location, ParseLocationError};
use derive_more::{Display, Error};
use rand::Rng;
use std::fmt;
use tracing::{debug, info, trace};

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, Display, Hash, PartialEq, Eq)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ParsePlayerError;

impl fmt::Display for ParsePlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid player string")
    }
}

impl std::error::Error for ParsePlayerError {}

impl std::str::FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "x" => Ok(Player::Black),
            "white" | "o" => Ok(Player::White),
            _ => Err(ParsePlayerError),
        }
    }
}

/// An action in an Othello game: place a piece or pass.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Move {
    Piece(Location),
    Pass,
}

impl From<Location> for Move {
    fn from(loc: Location) -> Self {
        Self::Piece(loc)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Piece(loc) => fmt::Display::fmt(loc, f),
            Move::Pass => f.write_str("pass"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ParseMoveError;

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move string")
    }
}

impl std::error::Error for ParseMoveError {}

impl From<ParseLocationError> for ParseMoveError {
    fn from(_: ParseLocationError) -> Self {
        ParseMoveError
    }
}

/// Parse a move from location notation ("D3") or "pass".
impl std::str::FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }
        Ok(Move::Piece(s.parse()?))
    }
}

/// Where a game stands, from the point of view of the player to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// The player to move has a legal placement.
    InProgress,
    /// The player to move has no legal placement but the opponent does: they must pass.
    PlayerStuck,
    /// Neither player can place a piece.
    GameOver,
}

/// The result of a finished game.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Outcome {
    #[display(fmt = "{} wins", _0)]
    Winner(Player),
    #[display(fmt = "Draw")]
    Draw,
}

/// Errors from playing moves through a [`GameHistory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display(fmt = "{}", _0)]
    Board(BoardError),
    #[display(fmt = "location {} is off the board", location)]
    OffBoard { location: Location },
    #[display(fmt = "cannot pass while a legal move is available")]
    CannotPass,
    #[display(fmt = "the game is over")]
    GameOver,
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

/// The record of a game: every position reached, oldest first.
/// The last position is the current one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameHistory {
    states: Vec<BoardState>,
}

impl Default for GameHistory {
    /// Gets a new game on the standard 8x8 board.
    fn default() -> Self {
        Self::from_state(BoardState::default())
    }
}

impl GameHistory {
    /// Start a new game on a board of `size`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Ok(Self::from_state(BoardState::new(size)?))
    }

    /// Start a game from an arbitrary position.
    pub fn from_state(state: BoardState) -> Self {
        Self {
            states: vec![state],
        }
    }

    /// The position the game is currently in.
    #[inline]
    pub fn current(&self) -> &BoardState {
        // Never empty: construction pushes the first state.
        &self.states[self.states.len() - 1]
    }

    /// Every position reached so far, oldest first.
    #[inline]
    pub fn states(&self) -> &[BoardState] {
        &self.states
    }

    /// The number of positions recorded, including the starting one.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    fn push(&mut self, state: BoardState) {
        self.states.push(state);
        debug!(ply = self.states.len() - 1, turn = %self.current().turn(), "advanced game");

        if self.is_game_over() {
            info!(score = %self.current().score(), "game over");
        }
    }

    /// Place a piece at `index` for the player to move.
    /// Returns false, recording nothing, if the move is illegal.
    pub fn try_place(&mut self, index: usize) -> bool {
        match self.current().place(index) {
            Ok(next) => {
                self.push(next);
                true
            }
            Err(err) => {
                trace!(%err, "rejected placement");
                false
            }
        }
    }

    /// Place a piece at a uniformly random legal location for the player to move.
    /// Returns false, recording nothing, if the player has no legal move.
    pub fn try_place_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.current().has_legal_move() {
            return false;
        }

        match self.current().place_random(rng) {
            Ok(next) => {
                self.push(next);
                true
            }
            Err(err) => {
                trace!(%err, "rejected random placement");
                false
            }
        }
    }

    /// Make a forced pass: hand the turn over without placing a piece.
    /// Only allowed when the player to move is stuck and the game is not over.
    pub fn pass(&mut self) -> Result<(), GameError> {
        match self.status() {
            GameStatus::PlayerStuck => {
                let next = self.current().pass();
                self.push(next);
                Ok(())
            }
            GameStatus::InProgress => Err(GameError::CannotPass),
            GameStatus::GameOver => Err(GameError::GameOver),
        }
    }

    /// Play `mv` for the player to move and return the new position.
    pub fn apply(&mut self, mv: Move) -> Result<&BoardState, GameError> {
        match mv {
            Move::Pass => self.pass()?,
            Move::Piece(location) => {
                let size = self.current().size();
                if !location.is_on_board(size) {
                    return Err(GameError::OffBoard { location });
                }

                let next = self
                    .current()
                    .place(location.to_index(size))
                    .map_err(|err| {
                        if self.is_game_over() {
                            GameError::GameOver
                        } else {
                            GameError::from(err)
                        }
                    })?;
                self.push(next);
            }
        }

        Ok(self.current())
    }

    /// Whether neither player can place a piece: the player to move is stuck,
    /// and would still be stuck after passing.
    pub fn is_game_over(&self) -> bool {
        self.status() == GameStatus::GameOver
    }

    /// Classify the current position.
    pub fn status(&self) -> GameStatus {
        let current = self.current();
        if current.has_legal_move() {
            GameStatus::InProgress
        } else if current.pass().has_legal_move() {
            GameStatus::PlayerStuck
        } else {
            GameStatus::GameOver
        }
    }

    /// The result of the game, once it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_game_over() {
            return None;
        }

        Some(match self.current().score().leader() {
            Some(player) => Outcome::Winner(player),
            None => Outcome::Draw,
        })
    }
}

impl fmt::Display for GameHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.current(), f)?;
        write!(f, "\n{}", self.current().score())?;
        if let Some(outcome) = self.outcome() {
            write!(f, "\nGame over: {}", outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn history(diagram: &str, turn: Player) -> GameHistory {
        let state: BoardState = diagram.parse().unwrap();
        GameHistory::from_state(state.with_turn(turn))
    }

    #[test]
    fn player_from_str() {
        assert_eq!("black".parse(), Ok(Player::Black));
        assert_eq!("White".parse(), Ok(Player::White));
        assert_eq!("O".parse(), Ok(Player::White));
        assert_eq!("red".parse::<Player>(), Err(ParsePlayerError));
        assert_eq!(!Player::Black, Player::White);
    }

    #[test]
    fn move_from_str() {
        assert_eq!("pass".parse(), Ok(Move::Pass));
        assert_eq!("PASS\n".parse(), Ok(Move::Pass));
        assert_eq!("d3".parse(), Ok(Move::Piece(Location::new(2, 3))));
        assert_eq!("d".parse::<Move>(), Err(ParseMoveError));
        assert_eq!(Move::Piece(Location::new(2, 3)).to_string(), "D3");
        assert_eq!(Move::Pass.to_string(), "pass");
    }

    #[test]
    fn new_game() {
        let game = GameHistory::new(8).unwrap();
        assert_eq!(game.len(), 1);
        assert_eq!(game.current(), &BoardState::default());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.outcome(), None);
        assert_eq!(
            GameHistory::new(5),
            Err(BoardError::InvalidSize { size: 5 })
        );
    }

    #[test]
    fn try_place_appends_on_success_only() {
        let mut game = GameHistory::default();
        let d3 = game.current().index(2, 3).unwrap();
        let a1 = game.current().index(0, 0).unwrap();

        assert!(!game.try_place(a1));
        assert_eq!(game.len(), 1);

        assert!(game.try_place(d3));
        assert_eq!(game.len(), 2);
        assert_eq!(game.current().turn(), Player::White);
        assert_eq!(game.states()[0], BoardState::default());

        // The cell is now taken.
        assert!(!game.try_place(d3));
        assert_eq!(game.len(), 2);
    }

    #[test]
    fn try_place_random_plays_legal_moves() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = GameHistory::default();

        for ply in 1..=10 {
            if game.status() != GameStatus::InProgress {
                break;
            }
            let before = game.current().clone();
            assert!(game.try_place_random(&mut rng));
            assert_eq!(game.len(), ply + 1);
            assert_eq!(game.current().turn(), !before.turn());
            assert_eq!(game.current().count_empty(), before.count_empty() - 1);
        }
    }

    #[test]
    fn apply_moves() {
        let mut game = GameHistory::default();
        let d3 = Move::Piece(Location::new(2, 3));

        let state = game.apply(d3).unwrap();
        assert_eq!(state.turn(), Player::White);

        assert_eq!(
            game.apply(d3),
            Err(GameError::Board(BoardError::IllegalMove { index: 19 }))
        );
        assert_eq!(
            game.apply(Move::Piece(Location::new(8, 0))),
            Err(GameError::OffBoard {
                location: Location::new(8, 0)
            })
        );
        assert_eq!(game.apply(Move::Pass), Err(GameError::CannotPass));
        assert_eq!(game.len(), 2);
    }

    #[test]
    fn stuck_player_must_pass() {
        let mut game = history(
            "OX..
             ....
             ....
             ....",
            Player::Black,
        );

        assert!(!game.is_game_over());
        assert_eq!(game.status(), GameStatus::PlayerStuck);
        assert!(!game.try_place(2));
        assert!(!game.try_place_random(&mut StdRng::seed_from_u64(0)));

        game.pass().unwrap();
        assert_eq!(game.len(), 2);
        assert_eq!(game.current().turn(), Player::White);
        assert!(game.current().equals_by_cells(&game.states()[0]));
        assert_eq!(game.status(), GameStatus::InProgress);

        assert!(game.try_place(2));
        assert_eq!(game.current().score().white, 3);
    }

    #[test]
    fn both_players_stuck_ends_the_game() {
        let mut game = history(
            "X...
             ....
             ....
             ...O",
            Player::Black,
        );

        assert!(game.is_game_over());
        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.outcome(), Some(Outcome::Draw));
        assert_eq!(game.pass(), Err(GameError::GameOver));
        assert_eq!(
            game.apply(Move::Piece(Location::new(0, 1))),
            Err(GameError::GameOver)
        );
        assert_eq!(game.len(), 1);
    }

    #[test]
    fn full_board_is_game_over() {
        let game = GameHistory::new(2).unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.outcome(), Some(Outcome::Draw));

        let game = history("XX XO", Player::White);
        assert_eq!(game.outcome(), Some(Outcome::Winner(Player::Black)));
        assert_eq!(Outcome::Winner(Player::Black).to_string(), "Black wins");
    }

    #[test]
    fn game_reaches_the_end() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = GameHistory::new(6).unwrap();

        while !game.is_game_over() {
            match game.status() {
                GameStatus::InProgress => assert!(game.try_place_random(&mut rng)),
                GameStatus::PlayerStuck => game.pass().unwrap(),
                GameStatus::GameOver => unreachable!(),
            }
        }

        let score = game.current().score();
        assert_eq!(score.black + score.white + game.current().count_empty(), 36);
        assert!(game.outcome().is_some());
    }
}
