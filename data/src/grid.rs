//! Grid of chemical concentrations

use crate::{Error, Precision, Result};
use ndarray::Array2;

/// Concentrations of both chemical species at one grid position
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// Concentration of species A
    pub a: Precision,

    /// Concentration of species B
    pub b: Precision,
}
//
impl Cell {
    /// Cell that only contains species A
    pub const PURE_A: Self = Self { a: 1.0, b: 0.0 };

    /// Cell that only contains species B
    pub const PURE_B: Self = Self { a: 0.0, b: 1.0 };
}

/// Fixed-size rectangular array of cells
///
/// Cells are stored row-major, so that cell (x, y) lives at linear index
/// `x + y * width`. Internally, this is an ndarray of shape [height, width].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid(Array2<Cell>);
//
impl Grid {
    /// Allocate a grid of `width` columns and `height` rows
    ///
    /// All cells start out with zero concentrations.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, Cell::default())
    }

    /// Allocate a grid where every cell has the same value
    ///
    /// Allocation failure is reported as an error instead of aborting the
    /// process.
    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self> {
        let allocation_error = || Error::Allocation { width, height };
        let len = width.checked_mul(height).ok_or_else(allocation_error)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| allocation_error())?;
        cells.resize(len, cell);
        Ok(Self(Array2::from_shape_vec((height, width), cells)?))
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.0.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.0.nrows()
    }

    /// Grid dimensions as [width, height]
    pub fn shape(&self) -> [usize; 2] {
        [self.width(), self.height()]
    }

    /// Access cell (x, y), if it is inside of the grid
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.0.get((y, x))
    }

    /// Iterate over ((x, y), cell) for all cells of the grid
    pub fn indexed_iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        self.0.indexed_iter().map(|((y, x), cell)| ((x, y), cell))
    }

    /// Mutably iterate over ((x, y), cell) for all cells of the grid
    pub fn indexed_iter_mut(&mut self) -> impl Iterator<Item = ((usize, usize), &mut Cell)> {
        self.0.indexed_iter_mut().map(|((y, x), cell)| ((x, y), cell))
    }

    /// Seed the grid with a disc of pure B in a sea of pure A
    ///
    /// A cell is inside of the disc if its Euclidean distance to the grid
    /// center (`[width / 2, height / 2]`, rounded down) is strictly less than
    /// `radius`.
    pub fn seed(&mut self, radius: Precision) {
        let center = [self.width() / 2, self.height() / 2];
        let radius_square = radius * radius;
        for ((x, y), cell) in self.indexed_iter_mut() {
            let dx = x as Precision - center[0] as Precision;
            let dy = y as Precision - center[1] as Precision;
            *cell = if dx * dx + dy * dy < radius_square {
                Cell::PURE_B
            } else {
                Cell::PURE_A
            };
        }
    }
}
//
impl std::ops::Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (x, y): (usize, usize)) -> &Cell {
        &self.0[(y, x)]
    }
}
//
impl std::ops::IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Cell {
        &mut self.0[(y, x)]
    }
}

/// Pair of grids where one holds the current state and the other receives the
/// next state
///
/// Both grids are allocated once, have the same dimensions, and trade roles
/// every time [`Buffers::flip()`] is called.
#[derive(Clone, Debug, PartialEq)]
pub struct Buffers {
    /// Storage for both grids
    grids: [Grid; 2],

    /// Index of the grid holding the current state
    current: usize,
}
//
impl Buffers {
    /// Allocate both grids
    fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            grids: [Grid::new(width, height)?, Grid::new(width, height)?],
            current: 0,
        })
    }

    /// Allocate both grids and seed the current one, see [`Grid::seed()`]
    pub fn seeded(width: usize, height: usize, radius: Precision) -> Result<Self> {
        let mut result = Self::new(width, height)?;
        result.current_mut().seed(radius);
        Ok(result)
    }

    /// Access the grid holding the current state
    pub fn current(&self) -> &Grid {
        &self.grids[self.current]
    }

    /// Mutably access the grid holding the current state
    fn current_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.current]
    }

    /// Access the current grid for reading and the next grid for writing
    pub fn current_next(&mut self) -> (&Grid, &mut Grid) {
        let [first, second] = &mut self.grids;
        if self.current == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Make the next grid become the current one
    pub fn flip(&mut self) {
        self.current = 1 - self.current;
    }
}
