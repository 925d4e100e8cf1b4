//! Runs a game between two [`Connector`]s.
//!
//! The [`Referee`] owns the [`GameHistory`] and everything a front end would
//! otherwise keep globally: whose turn it is, forced passes and the end of the game.

use crate::connectors::{Connector, ConnectorError};
use derive_more::{Display, Error};
use othello_rules::{GameError, GameHistory, GameStatus, Move, Outcome, Player};
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Display, Error)]
pub enum RefereeError {
    #[display(fmt = "the {} connector plays {}, expected {}", name, found, expected)]
    WrongSeat {
        name: String,
        expected: Player,
        found: Player,
    },
    #[display(fmt = "{} played {}: {}", player, mv, source)]
    IllegalMove {
        player: Player,
        mv: Move,
        source: GameError,
    },
    #[display(fmt = "{}", _0)]
    Connector(ConnectorError),
}

impl From<ConnectorError> for RefereeError {
    fn from(err: ConnectorError) -> Self {
        RefereeError::Connector(err)
    }
}

pub struct Referee {
    history: GameHistory,
    black: Box<dyn Connector>,
    white: Box<dyn Connector>,
}

impl Referee {
    /// Seat two connectors at a game. Each must play the color of its seat.
    pub fn new(
        history: GameHistory,
        black: Box<dyn Connector>,
        white: Box<dyn Connector>,
    ) -> Result<Self, RefereeError> {
        for (connector, expected) in [(&black, Player::Black), (&white, Player::White)] {
            if connector.player() != expected {
                return Err(RefereeError::WrongSeat {
                    name: connector.name().to_string(),
                    expected,
                    found: connector.player(),
                });
            }
        }

        Ok(Self {
            history,
            black,
            white,
        })
    }

    /// The game so far.
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    pub fn into_history(self) -> GameHistory {
        self.history
    }

    /// Play until neither side can move or one side resigns.
    /// Stuck players pass automatically; a resignation is a win for the opponent.
    pub async fn play(&mut self) -> Result<Outcome, RefereeError> {
        loop {
            if let Some(outcome) = self.history.outcome() {
                info!(%outcome, score = %self.history.current().score(), "game finished");
                return Ok(outcome);
            }

            let player = self.history.current().turn();
            let mv = if self.history.status() == GameStatus::PlayerStuck {
                Move::Pass
            } else {
                let connector = match player {
                    Player::Black => &mut self.black,
                    Player::White => &mut self.white,
                };
                match connector.next_move(self.history.current()).await {
                    Ok(mv) => mv,
                    Err(ConnectorError::Resigned { player }) => {
                        let outcome = Outcome::Winner(!player);
                        info!(%player, %outcome, "resigned");
                        return Ok(outcome);
                    }
                    Err(err) => return Err(err.into()),
                }
            };

            self.history
                .apply(mv)
                .map_err(|source| RefereeError::IllegalMove { player, mv, source })?;
            debug!(%player, %mv, "move applied");

            for connector in [&mut self.black, &mut self.white] {
                connector.observe(player, mv).await?;
            }
        }
    }
}

/// Running totals over a series of games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Player::Black) => self.black_wins += 1,
            Outcome::Winner(Player::White) => self.white_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.black_wins + self.white_wins + self.draws
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: Black won {}, White won {}, {} drawn",
            self.games(),
            self.black_wins,
            self.white_wins,
            self.draws
        )
    }
}
