//! Reaction-diffusion time stepping
//!
//! Each step reads the current grid and writes the next one. Reading and
//! writing never target the same grid, so that every cell update only sees
//! the state of its neighbors from before the step.

use data::{
    grid::{Buffers, Cell, Grid},
    parameters::{Parameters, Stencil},
    Result,
};
use log::{debug, trace};

/// Reaction-diffusion simulation
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    /// Simulation parameters
    params: Parameters,
}
//
impl Simulation {
    /// Set up the simulation
    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    /// Allocate simulation storage and seed its current grid
    ///
    /// `shape` specifies the grid dimensions as [width, height]
    pub fn make_buffers(&self, [width, height]: [usize; 2]) -> Result<Buffers> {
        debug!(
            "Allocating {width}x{height} grids, seed radius {}",
            self.params.seed_radius
        );
        Buffers::seeded(width, height, self.params.seed_radius)
    }

    /// Compute the next state of cell (x, y) from the `current` grid
    #[inline]
    pub fn step(&self, current: &Grid, x: usize, y: usize) -> Cell {
        let params = &self.params;
        let Cell { a, b } = current[(x, y)];
        let diff = neighbor_difference(current, &params.stencil, x, y);
        let reaction = a * b * b;
        let shape = current.shape();
        let feed_rate = params.feed_rate.at(x, y, shape);
        let kill_rate = params.kill_rate.at(x, y, shape);
        let da = params.diffusion_rate_a * diff.a - reaction + feed_rate * (1.0 - a);
        let db = params.diffusion_rate_b * diff.b + reaction - (kill_rate + feed_rate) * b;
        Cell {
            a: a + da * params.time_step,
            b: b + db * params.time_step,
        }
    }

    /// Compute the next state of every cell of `current` into `next`
    ///
    /// `next` is fully overwritten and never read, `current` is left intact.
    pub fn advance(&self, current: &Grid, next: &mut Grid) {
        assert_eq!(
            current.shape(),
            next.shape(),
            "Grid buffers must have the same dimensions"
        );
        for ((x, y), out) in next.indexed_iter_mut() {
            *out = self.step(current, x, y);
        }
    }

    /// Perform one time step, then make its output the current grid
    pub fn perform_step(&self, buffers: &mut Buffers) {
        let (current, next) = buffers.current_next();
        self.advance(current, next);
        buffers.flip();
        trace!("Performed one simulation step");
    }
}

/// Discrete Laplacian of concentrations around cell (x, y)
///
/// Out-of-grid neighbors contribute nothing, so edge and corner cells are
/// computed over fewer neighbors.
#[inline]
pub fn neighbor_difference(grid: &Grid, stencil: &Stencil, x: usize, y: usize) -> Cell {
    let weights = stencil.weights();
    let mut difference = Cell::default();
    for (dx, column) in (-1isize..=1).zip(&weights) {
        for (dy, &weight) in (-1isize..=1).zip(column) {
            let neighbor = x
                .checked_add_signed(dx)
                .zip(y.checked_add_signed(dy))
                .and_then(|(nx, ny)| grid.get(nx, ny));
            if let Some(neighbor) = neighbor {
                difference.a += weight * neighbor.a;
                difference.b += weight * neighbor.b;
            }
        }
    }
    difference
}
