//! Coordinate predicates that gate every grid mutation

use num_traits::PrimInt;

use crate::io::configuration::GRID_SIZE;
use crate::io::error::{CircuitError, Result};

/// Grid index pair `[row, col]`
pub type Position = [usize; 2];

/// Check a coordinate against the default grid size
pub fn is_valid_coordinate<T: PrimInt>(row: T, col: T) -> bool {
    is_within(row, col, GRID_SIZE)
}

/// Check that both indices lie in `[0, size)`
pub fn is_within<T: PrimInt>(row: T, col: T, size: usize) -> bool {
    to_index(row, size).is_some() && to_index(col, size).is_some()
}

/// Convert a coordinate into a grid position or report it out of range
///
/// # Errors
///
/// Returns `CoordinateOutOfRange` when either index is negative or not
/// below `size`
pub fn checked_position<T: PrimInt>(row: T, col: T, size: usize) -> Result<Position> {
    match (to_index(row, size), to_index(col, size)) {
        (Some(r), Some(c)) => Ok([r, c]),
        _ => Err(CircuitError::CoordinateOutOfRange {
            row: row.to_i64().unwrap_or(i64::MAX),
            col: col.to_i64().unwrap_or(i64::MAX),
            size,
        }),
    }
}

fn to_index<T: PrimInt>(value: T, size: usize) -> Option<usize> {
    value.to_usize().filter(|&index| index < size)
}

/// Positions orthogonally adjacent to `position` that lie inside the grid
pub fn neighbours(position: Position, size: usize) -> impl Iterator<Item = Position> {
    let [row, col] = position;
    [
        row.checked_sub(1).map(|r| [r, col]),
        (row + 1 < size).then_some([row + 1, col]),
        col.checked_sub(1).map(|c| [row, c]),
        (col + 1 < size).then_some([row, col + 1]),
    ]
    .into_iter()
    .flatten()
}

/// Index ranges of the square region of `radius` around `center`, clamped
/// to the grid
pub fn region_spans(
    center: Position,
    radius: usize,
    size: usize,
) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
    let [row, col] = center;
    let row_span = row.saturating_sub(radius)..(row + radius + 1).min(size);
    let col_span = col.saturating_sub(radius)..(col + radius + 1).min(size);
    (row_span, col_span)
}
