pub mod camera;
pub mod complex;
pub mod error;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;

// Re-export primary types for convenience.
pub use camera::{Camera, CameraSnapshot, DragDirection};
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{Fractal, FractalParams, BAILOUT_NORM_SQ};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
