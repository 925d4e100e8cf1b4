//! Board-level Othello logic: placement, capture and move legality.
//!
//! A [`BoardState`] is an immutable snapshot. Every transition (a placement or a
//! pass) builds a new state with its own copy of the cells, so states already
//! recorded in a [`GameHistory`](crate::GameHistory) are never disturbed.
//! Cells are stored row-major: `index = row * size + col`.

use crate::game::Player;
use crate::location::Location;
use crate::{utils, EDGE_LENGTH};
use derive_more::{Display, Error};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt::{self, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;
use tracing::{debug, trace};

/// The eight directions a capture can run in, as `(d_row, d_col)`.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Errors from building boards or making moves on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    #[display(fmt = "board size {} must be even and at least 2", size)]
    InvalidSize { size: usize },
    #[display(fmt = "a board of size {} cannot hold {} cells", size, cells)]
    InvalidCellCount { size: usize, cells: usize },
    #[display(fmt = "illegal move at index {}", index)]
    IllegalMove { index: usize },
    #[display(fmt = "no legal move available")]
    NoLegalMove,
}

/// Piece counts for both players.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[display(fmt = "Black {} - White {}", black, white)]
pub struct Score {
    pub black: usize,
    pub white: usize,
}

impl Score {
    /// The number of pieces `player` has on the board.
    pub fn of(self, player: Player) -> usize {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// The player with more pieces, or None if tied.
    pub fn leader(self) -> Option<Player> {
        use std::cmp::Ordering;

        match self.black.cmp(&self.white) {
            Ordering::Greater => Some(Player::Black),
            Ordering::Less => Some(Player::White),
            Ordering::Equal => None,
        }
    }
}

/// A snapshot of an Othello board and the player to move.
#[derive(Clone, Debug)]
pub struct BoardState {
    size: usize,
    cells: Vec<Option<Player>>,
    turn: Player,
    // Whether `turn` has a legal move. Filled on first query.
    has_legal_move: OnceLock<bool>,
}

fn check_size(size: usize) -> Result<(), BoardError> {
    if size < 2 || size % 2 != 0 {
        return Err(BoardError::InvalidSize { size });
    }
    Ok(())
}

impl Default for BoardState {
    /// Gets the standard 8x8 starting board.
    fn default() -> Self {
        Self::starting_board(EDGE_LENGTH)
    }
}

impl BoardState {
    /// Construct the starting board for `size`.
    /// Fails if `size` is odd or smaller than 2.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        check_size(size)?;
        Ok(Self::starting_board(size))
    }

    /// Construct an arbitrary position. `cells` is copied in row-major order.
    pub fn from_cells(
        size: usize,
        cells: &[Option<Player>],
        turn: Player,
    ) -> Result<Self, BoardError> {
        check_size(size)?;
        if cells.len() != size * size {
            return Err(BoardError::InvalidCellCount {
                size,
                cells: cells.len(),
            });
        }
        Ok(Self::build(size, cells.to_vec(), turn))
    }

    fn build(size: usize, cells: Vec<Option<Player>>, turn: Player) -> Self {
        Self {
            size,
            cells,
            turn,
            has_legal_move: OnceLock::new(),
        }
    }

    /// The four centre squares are split along the diagonals, with the
    /// second player on the main diagonal.
    fn starting_board(size: usize) -> Self {
        let mut cells = vec![None; size * size];
        let mid = size / 2 - 1;

        cells[mid * size + mid] = Some(Player::White);
        cells[(mid + 1) * size + mid + 1] = Some(Player::White);
        cells[mid * size + mid + 1] = Some(Player::Black);
        cells[(mid + 1) * size + mid] = Some(Player::Black);

        Self::build(size, cells, Player::default())
    }

    /// Get a copy of this board with `player` to move.
    pub fn with_turn(&self, player: Player) -> Self {
        Self::build(self.size, self.cells.clone(), player)
    }

    /// The number of rows (and columns) on the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The player to move.
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Option<Player>] {
        &self.cells
    }

    /// The owner of the cell at `index`, or None if it is empty or off the board.
    #[inline]
    pub fn cell(&self, index: usize) -> Option<Player> {
        self.cells.get(index).copied().flatten()
    }

    /// Map a row and column to a cell index, or None if they are off the board.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        let loc = Location::new(row, col);
        loc.is_on_board(self.size).then(|| loc.to_index(self.size))
    }

    /// Map a cell index to its row and column, or None if it is off the board.
    #[inline]
    pub fn coords(&self, index: usize) -> Option<Location> {
        (index < self.cells.len()).then(|| Location::from_index(index, self.size))
    }

    /// Walk from `origin` along `(d_row, d_col)` and collect the run of
    /// opponent pieces bracketed by one of `player`'s pieces.
    /// Empty if the run hits an empty cell or the edge first, or if it has no opponent pieces.
    fn bracketed_run(
        &self,
        origin: Location,
        (d_row, d_col): (isize, isize),
        player: Player,
    ) -> Vec<usize> {
        let mut run = Vec::new();
        let mut probe = origin.step(d_row, d_col, self.size);

        while let Some(loc) = probe {
            let index = loc.to_index(self.size);
            match self.cells[index] {
                None => break,
                Some(owner) if owner == player => return run,
                Some(_) => run.push(index),
            }
            probe = loc.step(d_row, d_col, self.size);
        }

        Vec::new()
    }

    /// Every cell that `player` would flip by placing at `index`.
    /// Does not check that `index` is empty.
    fn flips(&self, index: usize, player: Player) -> Vec<usize> {
        let origin = Location::from_index(index, self.size);
        DIRECTIONS
            .iter()
            .flat_map(|&direction| self.bracketed_run(origin, direction, player))
            .collect()
    }

    /// Whether `player` may place a piece at `index`: the cell must be empty
    /// and the placement must flip at least one opponent piece.
    pub fn is_legal_move(&self, index: usize, player: Player) -> bool {
        if index >= self.cells.len() || self.cells[index].is_some() {
            return false;
        }

        let origin = Location::from_index(index, self.size);
        DIRECTIONS
            .iter()
            .any(|&direction| !self.bracketed_run(origin, direction, player).is_empty())
    }

    /// Get every index where `player` may legally place, in ascending order.
    pub fn legal_moves(&self, player: Player) -> Vec<usize> {
        let moves: Vec<usize> = (0..self.cells.len())
            .filter(|&index| self.is_legal_move(index, player))
            .collect();

        if player == self.turn {
            // Already set if someone raced us here; both values agree.
            let _ = self.has_legal_move.set(!moves.is_empty());
        }

        moves
    }

    /// Whether the player to move has any legal placement.
    pub fn has_legal_move(&self) -> bool {
        *self.has_legal_move.get_or_init(|| {
            (0..self.cells.len()).any(|index| self.is_legal_move(index, self.turn))
        })
    }

    /// Place a piece for the player to move at `index`, flipping every bracketed run.
    /// Returns the resulting board; `self` is unchanged.
    pub fn place(&self, index: usize) -> Result<Self, BoardError> {
        if index >= self.cells.len() || self.cells[index].is_some() {
            trace!(index, "rejected placement on an occupied or missing cell");
            return Err(BoardError::IllegalMove { index });
        }

        let flips = self.flips(index, self.turn);
        if flips.is_empty() {
            trace!(index, "rejected placement that captures nothing");
            return Err(BoardError::IllegalMove { index });
        }

        let mut cells = self.cells.clone();
        cells[index] = Some(self.turn);
        for &flipped in &flips {
            cells[flipped] = Some(self.turn);
        }

        debug!(
            player = %self.turn,
            location = %Location::from_index(index, self.size),
            flipped = flips.len(),
            "placed piece"
        );
        Ok(Self::build(self.size, cells, !self.turn))
    }

    /// Pick a legal move for the player to move uniformly at random.
    pub fn random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.legal_moves(self.turn).choose(rng).copied()
    }

    /// Place a piece at a uniformly random legal location.
    pub fn place_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self, BoardError> {
        let index = self.random_move(rng).ok_or(BoardError::NoLegalMove)?;
        self.place(index)
    }

    /// Hand the turn to the other player without placing a piece.
    pub fn pass(&self) -> Self {
        Self::build(self.size, self.cells.clone(), !self.turn)
    }

    /// Count the pieces each player has on the board.
    pub fn score(&self) -> Score {
        self.cells
            .iter()
            .fold(Score::default(), |mut score, cell| {
                match cell {
                    Some(Player::Black) => score.black += 1,
                    Some(Player::White) => score.white += 1,
                    None => {}
                }
                score
            })
    }

    /// Count the empty cells on the board.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Whether both boards hold the same pieces, ignoring whose turn it is.
    pub fn equals_by_cells(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.turn == other.turn && self.cells == other.cells
    }
}

impl Eq for BoardState {}

impl Hash for BoardState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.cells.hash(state);
        self.turn.hash(state);
    }
}

fn cell_char(cell: Option<Player>) -> char {
    match cell {
        None => '.',
        Some(Player::Black) => 'X',
        Some(Player::White) => 'O',
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::format_grid(self.size, self.cells.iter().map(|&c| cell_char(c)), f)?;
        write!(f, "\n{} to move", self.turn)
    }
}

#[derive(Debug, PartialEq)]
pub struct ParseBoardError;

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid board string")
    }
}

impl std::error::Error for ParseBoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Parse a board diagram: `X` for Black, `O` for White, `.` or `-` for empty.
/// Whitespace is ignored and the size is inferred from the number of cells.
/// Black is to move; use [`BoardState::with_turn`] to change that.
impl std::str::FromStr for BoardState {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'X' | 'x' => Ok(Some(Player::Black)),
                'O' | 'o' => Ok(Some(Player::White)),
                '.' | '-' => Ok(None),
                _ => Err(ParseBoardError),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let size = (1..=cells.len())
            .find(|side| side * side >= cells.len())
            .ok_or(ParseBoardError)?;

        Self::from_cells(size, &cells, Player::default()).or(Err(ParseBoardError))
    }
}
