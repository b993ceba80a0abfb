use crate::complex::Complex;
use crate::fractal::{Fractal, FractalParams, BAILOUT_NORM_SQ};

/// The Mandelbrot set: `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
///
/// The point `c` is the coordinate on the complex plane.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    params: FractalParams,
}

impl Mandelbrot {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(FractalParams::default())
    }
}

/// Returns `true` if `c` lies inside the main cardioid.
///
/// This is a closed-form check that avoids iterating ~30–40% of visible
/// points at the default zoom level.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

impl Fractal for Mandelbrot {
    fn iterate(&self, c: Complex) -> u32 {
        let max_iter = self.params.max_iterations;

        // Fast rejection: points known to be interior keep the bounded value.
        if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
            return max_iter;
        }

        let mut z = Complex::ZERO;
        let mut remaining = max_iter;

        // Brent's cycle detection state.
        let mut old_z = z;
        let mut period: u32 = 0;
        let mut check: u32 = 3;

        while z.norm_sq() < BAILOUT_NORM_SQ && remaining > 0 {
            // z = z² + c
            z = Complex::new(z.re * z.re - z.im * z.im + c.re, 2.0 * z.re * z.im + c.im);
            remaining -= 1;

            // Periodicity detection (Brent's algorithm).
            // Skip the first 32 iterations (orbits rarely converge early)
            // and only check every 4th iteration to reduce branch overhead.
            let n = max_iter - remaining;
            if n >= 32 && n & 3 == 0 {
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
