//! Grid store owning every placed component
//!
//! The grid is a fixed square `Array2` created once per editor. Every
//! mutating entry point resolves its coordinate through the validator first,
//! so a rejected call never writes.

use ndarray::Array2;
use num_traits::PrimInt;
use tracing::debug;

use crate::io::configuration::{GRID_SIZE, MAX_GRID_SIZE};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::catalog::ComponentType;
use crate::spatial::validator::{Position, checked_position};

/// Square matrix of component cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridStore {
    cells: Array2<ComponentType>,
}

impl Default for GridStore {
    fn default() -> Self {
        Self {
            cells: Array2::default((GRID_SIZE, GRID_SIZE)),
        }
    }
}

impl GridStore {
    /// Create an all-empty grid with the given side length
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `size` is zero or above `MAX_GRID_SIZE`
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(invalid_parameter(
                "grid_size",
                &size,
                &format!("must be between 1 and {MAX_GRID_SIZE}"),
            ));
        }

        Ok(Self {
            cells: Array2::default((size, size)),
        })
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    /// Reset every cell to empty
    pub fn initialize(&mut self) {
        self.cells.fill(ComponentType::Empty);
        debug!(size = self.size(), "grid initialized");
    }

    /// Write a component into a cell, returning the previous occupant
    ///
    /// A second placement on the same cell overwrites the first.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateOutOfRange` without touching the grid when the
    /// coordinate is outside it
    pub fn place<T: PrimInt>(
        &mut self,
        row: T,
        col: T,
        kind: ComponentType,
    ) -> Result<ComponentType> {
        let position = checked_position(row, col, self.size())?;
        let previous = self.set(position, kind);
        debug!(row = position[0], col = position[1], %kind, %previous, "component placed");
        Ok(previous)
    }

    /// Place a component identified by its numeric catalog code
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponent` for a code outside the catalog and
    /// `CoordinateOutOfRange` for a bad coordinate; neither writes
    pub fn place_code<T: PrimInt>(&mut self, row: T, col: T, code: u8) -> Result<ComponentType> {
        let kind = ComponentType::try_from(code)?;
        self.place(row, col, kind)
    }

    /// Clear a cell, returning what it held
    ///
    /// Clearing an empty cell is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateOutOfRange` without touching the grid when the
    /// coordinate is outside it
    pub fn remove<T: PrimInt>(&mut self, row: T, col: T) -> Result<ComponentType> {
        let position = checked_position(row, col, self.size())?;
        let previous = self.set(position, ComponentType::Empty);
        debug!(row = position[0], col = position[1], %previous, "component removed");
        Ok(previous)
    }

    /// Read a cell
    ///
    /// # Errors
    ///
    /// Returns `CoordinateOutOfRange` when the coordinate is outside the grid
    pub fn get<T: PrimInt>(&self, row: T, col: T) -> Result<ComponentType> {
        let position = checked_position(row, col, self.size())?;
        Ok(self.at(position))
    }

    /// Read a cell by validated position, treating anything outside as empty
    pub fn at(&self, position: Position) -> ComponentType {
        self.cells.get(position).copied().unwrap_or_default()
    }

    /// Overwrite a cell by position and return the previous value
    ///
    /// Positions outside the grid are ignored and report `Empty`.
    pub(crate) fn set(&mut self, position: Position, kind: ComponentType) -> ComponentType {
        self.cells
            .get_mut(position)
            .map_or(ComponentType::Empty, |cell| std::mem::replace(cell, kind))
    }

    /// Borrow the underlying cell matrix
    pub const fn cells(&self) -> &Array2<ComponentType> {
        &self.cells
    }

    /// Copy of the current layout
    pub fn snapshot(&self) -> Array2<ComponentType> {
        self.cells.clone()
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: ComponentType) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    /// Whether every cell is empty
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_component())
    }

    /// Positions holding `kind`, in row-major order
    pub fn positions_of(&self, kind: ComponentType) -> Vec<Position> {
        self.cells
            .indexed_iter()
            .filter(|&(_, &cell)| cell == kind)
            .map(|(index, _)| Position::from(index))
            .collect()
    }

    /// Number of cells that differ from `other`
    ///
    /// Layouts of different shape compare every cell as different.
    pub fn diff_count(&self, other: &Array2<ComponentType>) -> usize {
        if self.cells.dim() != other.dim() {
            return self.cells.len().max(other.len());
        }
        self.cells
            .iter()
            .zip(other.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}
