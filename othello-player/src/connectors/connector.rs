use async_trait::async_trait;
use derive_more::{Display, Error};
use othello_rules::{BoardState, Move, Player};

/// Reasons a [`Connector`] could not produce a move.
#[derive(Debug, Display, Error)]
pub enum ConnectorError {
    #[display(fmt = "the connection was closed")]
    Disconnected,
    #[display(fmt = "{} resigned", player)]
    Resigned { player: Player },
    #[display(fmt = "I/O error: {}", _0)]
    Io(std::io::Error),
}

impl From<std::io::Error> for ConnectorError {
    fn from(err: std::io::Error) -> Self {
        ConnectorError::Io(err)
    }
}

/// A player-facing abstract interface to a way of playing Othello with "the outside world."
#[async_trait]
pub trait Connector: Send {
    /// A short name for logs and summaries.
    fn name(&self) -> &str;

    /// Find out what color we're playing.
    fn player(&self) -> Player;

    /// Handle a move made by either player, including forced passes.
    async fn observe(&mut self, _player: Player, _mv: Move) -> Result<(), ConnectorError> {
        Ok(())
    }

    /// Get our next move in `state`. Only called when we have a legal placement.
    async fn next_move(&mut self, state: &BoardState) -> Result<Move, ConnectorError>;
}
