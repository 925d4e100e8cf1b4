//! [`Connector`] that picks uniformly among the legal moves.

use super::{Connector, ConnectorError};
use async_trait::async_trait;
use othello_rules::{BoardState, Move, Player};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct RandomConnector {
    player: Player,
    rng: StdRng,
}

impl RandomConnector {
    /// A random mover seeded from the operating system.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible random mover.
    pub fn seeded(player: Player, seed: u64) -> Self {
        Self {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl Connector for RandomConnector {
    fn name(&self) -> &str {
        "random"
    }

    fn player(&self) -> Player {
        self.player
    }

    async fn next_move(&mut self, state: &BoardState) -> Result<Move, ConnectorError> {
        Ok(state
            .random_move(&mut self.rng)
            .and_then(|index| state.coords(index))
            .map_or(Move::Pass, Move::from))
    }
}
