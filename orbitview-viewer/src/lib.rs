pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod surface;
pub mod viewer;

// Re-export primary types for convenience.
pub use config::ViewerConfig;
pub use display::DisplaySurface;
pub use error::ViewerError;
pub use input::{InputEffect, InteractionController, PointerButton, PointerEvent};
pub use surface::DoubleBufferedSurface;
pub use viewer::{FractalViewer, TickOutcome, TICK_PERIOD};

/// Convenience result type for the viewer crate.
pub type Result<T> = std::result::Result<T, ViewerError>;
