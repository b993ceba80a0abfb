use crate::complex::Complex;
use crate::error::CoreError;

/// Squared escape bound: an orbit has escaped once `|z|² ≥ 4`.
pub const BAILOUT_NORM_SQ: f64 = 4.0;

/// Parameters controlling fractal iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FractalParams {
    /// Iteration budget per point. Points that stay bounded for this many
    /// steps are classified as inside the set.
    pub max_iterations: u32,
}

impl FractalParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self { max_iterations })
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Trait implemented by all escape-time fractal families.
///
/// Designed for **static dispatch** — the renderer is generic over
/// `F: Fractal` rather than using `dyn Fractal`, so the compiler can
/// inline and optimize the hot iteration loop.
pub trait Fractal {
    /// Iterate a single point and return its color-map index.
    ///
    /// The return value is the *remaining* iteration budget at the moment
    /// the orbit escaped, with one special case:
    ///
    /// - bounded orbit (budget exhausted, still `|z|² < 4`) → `max_iterations`
    /// - escape after `k ≥ 1` steps → `max_iterations - k`
    /// - escape detected exactly when the budget runs out → `0`
    ///
    /// Every value indexes directly into a color map of length
    /// `max_iterations + 1`, whose last entry (bounded) is black.
    fn iterate(&self, point: Complex) -> u32;

    /// Access the iteration parameters.
    fn params(&self) -> &FractalParams;
}
