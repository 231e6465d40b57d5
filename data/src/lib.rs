//! Data format used by the reaction-diffusion simulation

pub mod grid;
pub mod parameters;

use thiserror::Error;

/// Computation precision
pub type Precision = f32;

/// Errors that can occur while setting up simulation storage
#[derive(Debug, Error)]
pub enum Error {
    /// Not enough memory for a grid buffer
    #[error("failed to allocate a grid of {width}x{height} cells")]
    Allocation { width: usize, height: usize },

    /// Storage does not match the requested grid dimensions
    #[error("cell storage does not match grid dimensions")]
    Shape(#[from] ndarray::ShapeError),
}

/// Result type of fallible operations in this crate
pub type Result<T> = std::result::Result<T, Error>;
