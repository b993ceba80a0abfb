use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("empty render region: x {x0}..{x1}, y {y0}..{y1}")]
    EmptyRegion { x0: u32, x1: u32, y0: u32, y1: u32 },

    #[error("frame buffer is {frame_width}×{frame_height} but the camera snapshot is {snapshot_width}×{snapshot_height}")]
    FrameMismatch {
        frame_width: u32,
        frame_height: u32,
        snapshot_width: u32,
        snapshot_height: u32,
    },

    #[error("color map has {len} entries, need {needed} for max_iterations {max_iterations}")]
    ColorMapTooShort {
        len: usize,
        needed: usize,
        max_iterations: u32,
    },
}
