//! Computation parameters

use crate::Precision;

/// Feed rate used when none is specified
pub const DEFAULT_FEED_RATE: Precision = 0.0545;

/// Kill rate used when none is specified
pub const DEFAULT_KILL_RATE: Precision = 0.062;

/// Computation parameters
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Parameters {
    /// Weights of the discrete Laplacian
    pub stencil: Stencil,

    /// Diffusion rate of species A
    pub diffusion_rate_a: Precision,

    /// Diffusion rate of species B
    pub diffusion_rate_b: Precision,

    /// Rate at which species A is replenished
    pub feed_rate: RateField,

    /// Rate at which species B decays
    pub kill_rate: RateField,

    /// Time step (make it shorter to increase precision)
    pub time_step: Precision,

    /// Radius of the disc of species B that the grid is seeded with
    pub seed_radius: Precision,
}
//
impl Default for Parameters {
    fn default() -> Self {
        Self {
            stencil: Stencil::default(),
            diffusion_rate_a: 1.0,
            diffusion_rate_b: 0.5,
            feed_rate: RateField::Constant(DEFAULT_FEED_RATE),
            kill_rate: RateField::Constant(DEFAULT_KILL_RATE),
            time_step: 1.0,
            seed_radius: 20.0,
        }
    }
}

/// Discrete Laplacian stencil over a 3x3 neighborhood
///
/// The central cell always has a weight of -1, orthogonal neighbors share the
/// `adjacent` weight and diagonal neighbors share the `diagonal` weight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stencil {
    /// Weight of the 4 orthogonally adjacent neighbors
    pub adjacent: Precision,

    /// Weight of the 4 diagonal neighbors
    pub diagonal: Precision,
}
//
impl Stencil {
    /// Weight matrix, indexed as `weights[dx + 1][dy + 1]`
    pub fn weights(&self) -> [[Precision; 3]; 3] {
        let Self { adjacent, diagonal } = *self;
        [
            [diagonal, adjacent, diagonal],
            [adjacent, -1.0, adjacent],
            [diagonal, adjacent, diagonal],
        ]
    }
}
//
impl Default for Stencil {
    fn default() -> Self {
        Self {
            adjacent: 0.2,
            diagonal: 0.05,
        }
    }
}

/// Axis of the simulation grid
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    /// Horizontal axis, along which x grows
    X,

    /// Vertical axis, along which y grows
    Y,
}

/// Reaction rate, possibly varying across the simulation grid
///
/// Rates may depend on position but not on time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RateField {
    /// Same rate everywhere
    Constant(Precision),

    /// Rate going linearly from `start` at coordinate 0 to `end` at the grid
    /// extent along `axis`
    Gradient {
        axis: Axis,
        start: Precision,
        end: Precision,
    },
}
//
impl RateField {
    /// Constant rate if `end` is unspecified, otherwise a gradient from
    /// `start` to `end` along `axis`
    pub fn linear(axis: Axis, start: Precision, end: Option<Precision>) -> Self {
        match end {
            Some(end) => Self::Gradient { axis, start, end },
            None => Self::Constant(start),
        }
    }

    /// Rate at position (x, y) of a grid of dimensions [width, height]
    #[inline]
    pub fn at(&self, x: usize, y: usize, [width, height]: [usize; 2]) -> Precision {
        match *self {
            Self::Constant(rate) => rate,
            Self::Gradient { axis, start, end } => {
                let (coord, extent) = match axis {
                    Axis::X => (x, width),
                    Axis::Y => (y, height),
                };
                start + (end - start) * (coord as Precision / extent as Precision)
            }
        }
    }
}
