//! Code for working with [`Location`]s on the Othello board.

use std::fmt::{self, Display, Formatter};

/// A location on an Othello board, as row and column coordinates.
/// Row 0 is the top edge and column 0 is the left edge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Convert from a row-major square index on a board with `size` columns.
    /// Does not check bounds; see [`BoardState::coords`](crate::BoardState::coords).
    #[inline]
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Convert into a row-major square index on a board with `size` columns.
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Whether this location lies on a board with `size` rows and columns.
    #[inline]
    pub fn is_on_board(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Step `(d_row, d_col)` away from this location.
    /// Returns None if the step would leave a board with `size` rows and columns.
    #[inline]
    pub fn step(self, d_row: isize, d_col: isize, size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let next = Self { row, col };
        next.is_on_board(size).then(|| next)
    }
}

/// Name a column the way spreadsheets do: A, B, ..., Z, AA, AB, ...
pub fn column_name(col: usize) -> String {
    let mut name = Vec::new();
    let mut remaining = col + 1;
    while remaining > 0 {
        remaining -= 1;
        name.push(b'A' + (remaining % 26) as u8);
        remaining /= 26;
    }
    name.iter().rev().map(|&b| b as char).collect()
}

/// Inverse of [`column_name`]. Case-insensitive.
fn parse_column(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    letters.chars().try_fold(0usize, |acc, c| {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return None;
        }
        let digit = (c as usize) - ('A' as usize) + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
    .map(|col| col - 1)
}

/// Convert this [`Location`] into string notation ("D3").
impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_name(self.col), self.row + 1)
    }
}

#[derive(Debug, PartialEq)]
pub struct ParseLocationError;

impl Display for ParseLocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid location string")
    }
}

impl std::error::Error for ParseLocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Build a [`Location`] from 1-indexed string notation ("D3", "aa12").
/// The board size is not known here, so callers check [`Location::is_on_board`].
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or(ParseLocationError)?;
        let (letters, digits) = s.split_at(split);

        let col = parse_column(letters).ok_or(ParseLocationError)?;
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseLocationError);
        }
        let row: usize = digits.parse().or(Err(ParseLocationError))?;
        if row == 0 {
            return Err(ParseLocationError);
        }

        Ok(Self::new(row - 1, col))
    }
}
