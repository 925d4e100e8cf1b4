//! Miscellaneous project utilities.

use crate::location::column_name;
use std::fmt::{self, Formatter};
use std::iter::Iterator;

/// Format `size * size` characters into a pretty grid format with
/// lettered columns and numbered rows.
/// `piece_iter` must yield exactly `size * size` items.
pub fn format_grid<T: Iterator<Item = char>>(
    size: usize,
    mut piece_iter: T,
    f: &mut Formatter,
) -> fmt::Result {
    let label_width = size.to_string().len();

    write!(f, "{:width$} ", "", width = label_width)?;
    for col in 0..size {
        write!(f, " {}", column_name(col))?;
    }

    for row in 0..size {
        write!(f, "\n{:>width$} ", row + 1, width = label_width)?;
        for _ in 0..size {
            write!(f, " {}", piece_iter.next().ok_or(fmt::Error)?)?;
        }
    }

    match piece_iter.next() {
        None => Ok(()),
        _ => Err(fmt::Error),
    }
}
