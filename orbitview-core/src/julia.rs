use crate::complex::Complex;
use crate::fractal::{Fractal, FractalParams, BAILOUT_NORM_SQ};

/// A Julia set: `z_{n+1} = z_n² + c`, where `c` is a fixed constant
/// and `z₀` is the point on the complex plane.
#[derive(Debug, Clone)]
pub struct Julia {
    params: FractalParams,

    /// The fixed constant `c` that defines this Julia set.
    c: Complex,
}

impl Julia {
    pub fn new(c: Complex, params: FractalParams) -> Self {
        Self { params, c }
    }

    /// A visually interesting default: `c = -0.7 + 0.27015i`.
    pub fn default_c() -> Complex {
        Complex::new(-0.7, 0.27015)
    }

    /// The constant `c` defining this Julia set.
    pub fn c(&self) -> Complex {
        self.c
    }
}

impl Default for Julia {
    fn default() -> Self {
        Self::new(Self::default_c(), FractalParams::default())
    }
}

impl Fractal for Julia {
    fn iterate(&self, point: Complex) -> u32 {
        let max_iter = self.params.max_iterations;

        let mut z = point;
        let mut remaining = max_iter;

        // Brent's cycle detection state.
        let mut old_z = z;
        let mut period: u32 = 0;
        let mut check: u32 = 3;

        while z.norm_sq() < BAILOUT_NORM_SQ && remaining > 0 {
            // z = z² + c
            z = Complex::new(
                z.re * z.re - z.im * z.im + self.c.re,
                2.0 * z.re * z.im + self.c.im,
            );
            remaining -= 1;

            // Periodicity detection (Brent's algorithm).
            if (z.re - old_z.re).abs() < 1e-13 && (z.im - old_z.im).abs() < 1e-13 {
                return max_iter;
            }

            period += 1;
            if period > check {
                old_z = z;
                period = 0;
                check = check.saturating_mul(2);
            }
        }

        if remaining == 0 && z.norm_sq() < BAILOUT_NORM_SQ {
            max_iter
        } else {
            remaining
        }
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }
}
