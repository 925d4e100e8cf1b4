//! [`Connector`] for a line-based text protocol, such as a person at a terminal.
//!
//! Each turn the board and the legal moves are written out, then one move is
//! read per line in location notation ("D3"). "quit" or "resign" gives up.

use super::{Connector, ConnectorError};
use async_std::io::prelude::*;
use async_std::io::{self, BufReader, Stdin, Stdout};
use async_trait::async_trait;
use itertools::Itertools;
use othello_rules::{BoardState, Move, Player};
use tracing::warn;

pub struct TextConnector<R, W> {
    player: Player,
    input: R,
    output: W,
}

impl TextConnector<BufReader<Stdin>, Stdout> {
    /// Play through the terminal.
    pub fn stdio(player: Player) -> Self {
        Self::new(player, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> TextConnector<R, W>
where
    R: BufRead + Unpin + Send,
    W: Write + Unpin + Send,
{
    pub fn new(player: Player, input: R, output: W) -> Self {
        Self {
            player,
            input,
            output,
        }
    }

    /// Give back the output stream, for inspecting what was written.
    pub fn into_output(self) -> W {
        self.output
    }

    async fn write(&mut self, text: &str) -> Result<(), ConnectorError> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String, ConnectorError> {
        let mut buffer = String::new();
        if self.input.read_line(&mut buffer).await? == 0 {
            return Err(ConnectorError::Disconnected);
        }
        Ok(buffer)
    }
}

#[async_trait]
impl<R, W> Connector for TextConnector<R, W>
where
    R: BufRead + Unpin + Send,
    W: Write + Unpin + Send,
{
    fn name(&self) -> &str {
        "text"
    }

    fn player(&self) -> Player {
        self.player
    }

    async fn observe(&mut self, player: Player, mv: Move) -> Result<(), ConnectorError> {
        match mv {
            Move::Pass => self.write(&format!("{} has no legal move and passes.\n", player)).await,
            Move::Piece(_) if player == self.player => Ok(()),
            Move::Piece(loc) => self.write(&format!("{} played {}.\n", player, loc)).await,
        }
    }

    async fn next_move(&mut self, state: &BoardState) -> Result<Move, ConnectorError> {
        let size = state.size();
        let legal = state.legal_moves(self.player);
        let listing = legal.iter().filter_map(|&index| state.coords(index)).join(", ");
        self.write(&format!("\n{}\n{}\nLegal moves: {}\n", state, state.score(), listing))
            .await?;

        loop {
            self.write(&format!("{} to move: ", self.player)).await?;
            let line = self.read_line().await?;
            let text = line.trim();

            if text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("resign") {
                return Err(ConnectorError::Resigned {
                    player: self.player,
                });
            }

            match text.parse::<Move>() {
                Ok(Move::Piece(loc))
                    if loc.is_on_board(size) && legal.contains(&loc.to_index(size)) =>
                {
                    return Ok(Move::Piece(loc));
                }
                Ok(Move::Pass) if legal.is_empty() => return Ok(Move::Pass),
                Ok(mv) => {
                    warn!(player = %self.player, %mv, "rejected illegal move");
                    self.write(&format!("{} is not a legal move.\n", mv)).await?;
                }
                Err(err) => {
                    warn!(player = %self.player, input = text, "rejected unparseable move");
                    self.write(&format!("Cannot parse \"{}\": {}.\n", text, err))
                        .await?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_std::task;
    use othello_rules::Location;

    fn connector(input: &'static str) -> TextConnector<BufReader<&'static [u8]>, Vec<u8>> {
        TextConnector::new(Player::Black, BufReader::new(input.as_bytes()), Vec::new())
    }

    #[test]
    fn reads_a_legal_move() {
        let mut text = connector("d3\n");
        let mv = task::block_on(text.next_move(&BoardState::default())).unwrap();
        assert_eq!(mv, Move::Piece(Location::new(2, 3)));

        let output = String::from_utf8(text.into_output()).unwrap();
        assert!(output.contains("Legal moves: D3, C4, F5, E6"));
        assert!(output.contains("Black to move: "));
    }

    #[test]
    fn reprompts_until_legal() {
        let mut text = connector("hello\nA1\nZ9\npass\nC4\n");
        let mv = task::block_on(text.next_move(&BoardState::default())).unwrap();
        assert_eq!(mv, Move::Piece(Location::new(3, 2)));

        let output = String::from_utf8(text.into_output()).unwrap();
        assert!(output.contains("Cannot parse \"hello\""));
        assert!(output.contains("A1 is not a legal move."));
        assert!(output.contains("Z9 is not a legal move."));
        assert!(output.contains("pass is not a legal move."));
        assert_eq!(output.matches("Black to move: ").count(), 5);
    }

    #[test]
    fn end_of_input_disconnects() {
        let mut text = connector("A1\n");
        let result = task::block_on(text.next_move(&BoardState::default()));
        assert!(matches!(result, Err(ConnectorError::Disconnected)));
    }

    #[test]
    fn quitting_resigns() {
        let mut text = connector("quit\n");
        let result = task::block_on(text.next_move(&BoardState::default()));
        assert!(matches!(
            result,
            Err(ConnectorError::Resigned {
                player: Player::Black
            })
        ));
    }

    #[test]
    fn reports_opponent_moves() {
        let mut text = connector("");
        task::block_on(async {
            text.observe(Player::Black, Move::Piece(Location::new(2, 3)))
                .await
                .unwrap();
            text.observe(Player::White, Move::Piece(Location::new(2, 2)))
                .await
                .unwrap();
            text.observe(Player::White, Move::Pass).await.unwrap();
        });

        let output = String::from_utf8(text.into_output()).unwrap();
        assert_eq!(
            output,
            "White played C3.\nWhite has no legal move and passes.\n"
        );
    }
}
