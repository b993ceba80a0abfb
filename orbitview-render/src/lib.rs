pub mod buffer;
pub mod color_map;
pub mod error;
pub mod region;
pub mod renderer;

pub use buffer::FrameBuffer;
pub use color_map::ColorMap;
pub use error::RenderError;
pub use region::RenderRegion;
pub use renderer::{render, RenderConfig, RenderStats, DEFAULT_TILE_THRESHOLD};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
