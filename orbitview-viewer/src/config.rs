use serde::{Deserialize, Serialize};

use orbitview_core::camera::{DEFAULT_DAMPING, DEFAULT_SETTLE_EPSILON, DEFAULT_ZOOM};
use orbitview_core::{DragDirection, FractalParams};
use orbitview_render::DEFAULT_TILE_THRESHOLD;

use crate::error::ViewerError;

/// Default canvas edge in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 800;

/// Default zoom ratio applied per click (left multiplies, right divides).
pub const DEFAULT_ZOOM_STEP: f64 = 1.5;

/// Viewer construction parameters.
///
/// Every field has a default, so a partial JSON document deserializes into
/// a fully usable config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Canvas size in pixels.
    pub width: u32,
    pub height: u32,
    /// Iteration budget per pixel.
    pub max_iterations: u32,
    /// Initial pixels per complex-plane unit.
    pub initial_zoom: f64,
    /// Per-click zoom ratio. Must not be 1.0: a unity step would make
    /// clicks dead no-ops.
    pub zoom_step: f64,
    /// Per-tick easing fraction, in (0, 1].
    pub damping: f64,
    /// Axis gap below which the camera counts as settled.
    pub settle_epsilon: f64,
    /// Serial-tile cutoff for the parallel renderer, in pixels.
    pub tile_threshold: usize,
    /// Drag-to-pan sign convention.
    pub drag_direction: DragDirection,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            max_iterations: FractalParams::DEFAULT_MAX_ITERATIONS,
            initial_zoom: DEFAULT_ZOOM,
            zoom_step: DEFAULT_ZOOM_STEP,
            damping: DEFAULT_DAMPING,
            settle_epsilon: DEFAULT_SETTLE_EPSILON,
            tile_threshold: DEFAULT_TILE_THRESHOLD,
            drag_direction: DragDirection::default(),
        }
    }
}

impl ViewerConfig {
    /// Check every field. Camera tuning is re-validated by the camera
    /// constructor; the checks here cover the viewer-only knobs.
    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ViewerError::InvalidConfig {
                reason: format!("canvas must be non-empty, got {}×{}", self.width, self.height),
            });
        }
        if self.max_iterations == 0 {
            return Err(ViewerError::InvalidConfig {
                reason: "max_iterations must be at least 1".into(),
            });
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 {
            return Err(ViewerError::InvalidConfig {
                reason: format!("zoom_step must be a positive finite ratio, got {}", self.zoom_step),
            });
        }
        if self.zoom_step == 1.0 {
            return Err(ViewerError::InvalidConfig {
                reason: "zoom_step of exactly 1.0 makes clicks no-ops".into(),
            });
        }
        if self.tile_threshold == 0 {
            return Err(ViewerError::InvalidConfig {
                reason: "tile_threshold must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// The iteration budget as core fractal parameters.
    pub fn fractal_params(&self) -> crate::Result<FractalParams> {
        Ok(FractalParams::new(self.max_iterations)?)
    }
}
