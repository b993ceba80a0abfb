use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;

/// Default scale factor in pixels per complex-plane unit.
pub const DEFAULT_ZOOM: f64 = 200.0;

/// Default per-tick exponential damping factor.
pub const DEFAULT_DAMPING: f64 = 0.1;

/// Default settle threshold: an axis is settled once
/// `|current - target|` drops to this or below.
pub const DEFAULT_SETTLE_EPSILON: f64 = 0.01;

/// Sign convention for drag-to-pan.
///
/// The escape-time viewers historically moved the view opposite to some of
/// the simple curve viewers; rather than silently unifying the two, the
/// drag sign is a per-viewer configuration flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragDirection {
    /// Dragging right moves the view left (content follows the cursor).
    #[default]
    Natural,
    /// Dragging right moves the view right.
    Inverted,
}

/// An immutable view of the camera taken at render-request time.
///
/// The parallel render pass must never read live camera fields — every tile
/// of one frame is mapped through the same snapshot, so a tick arriving
/// mid-render cannot tear the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    /// Pixels per complex-plane unit.
    pub zoom: f64,
    /// Pan offset in complex-plane units.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Canvas size in pixels.
    pub width: u32,
    pub height: u32,
}

impl CameraSnapshot {
    /// Map a pixel coordinate to a point on the complex plane.
    ///
    /// `(0, 0)` is the top-left pixel; pixel-y increases downward and so
    /// does the imaginary part (screen convention, no axis flip).
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32) -> Complex {
        let half_w = self.width as f64 / 2.0;
        let half_h = self.height as f64 / 2.0;
        Complex::new(
            (px as f64 - half_w) / self.zoom + self.offset_x,
            (py as f64 - half_h) / self.zoom + self.offset_y,
        )
    }
}

/// The view state: current and target zoom/offset with eased convergence.
///
/// Interactions mutate the *targets*; [`tick`](Self::tick) advances the
/// current values toward them by a fixed fraction per call (first-order
/// exponential ease). All mutation happens on the UI/timer thread; the
/// render path only ever sees a [`CameraSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    width: u32,
    height: u32,

    zoom: f64,
    target_zoom: f64,
    offset_x: f64,
    target_offset_x: f64,
    offset_y: f64,
    target_offset_y: f64,

    damping: f64,
    settle_epsilon: f64,
}

impl Camera {
    /// Create a camera centred on the origin at `initial_zoom`.
    pub fn new(width: u32, height: u32, initial_zoom: f64) -> crate::Result<Self> {
        Self::with_tuning(
            width,
            height,
            initial_zoom,
            DEFAULT_DAMPING,
            DEFAULT_SETTLE_EPSILON,
        )
    }

    /// Create a camera with explicit easing parameters.
    pub fn with_tuning(
        width: u32,
        height: u32,
        initial_zoom: f64,
        damping: f64,
        settle_epsilon: f64,
    ) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidCamera {
                reason: format!("dimensions must be > 0, got {width}×{height}"),
            });
        }
        if initial_zoom <= 0.0 || !initial_zoom.is_finite() {
            return Err(CoreError::InvalidZoom(initial_zoom));
        }
        if damping <= 0.0 || damping > 1.0 {
            return Err(CoreError::InvalidCamera {
                reason: format!("damping must be in (0, 1], got {damping}"),
            });
        }
        if settle_epsilon <= 0.0 || !settle_epsilon.is_finite() {
            return Err(CoreError::InvalidCamera {
                reason: format!("settle epsilon must be > 0, got {settle_epsilon}"),
            });
        }
        Ok(Self {
            width,
            height,
            zoom: initial_zoom,
            target_zoom: initial_zoom,
            offset_x: 0.0,
            target_offset_x: 0.0,
            offset_y: 0.0,
            target_offset_y: 0.0,
            damping,
            settle_epsilon,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn target_zoom(&self) -> f64 {
        self.target_zoom
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn target_offset(&self) -> (f64, f64) {
        (self.target_offset_x, self.target_offset_y)
    }

    /// Resize the canvas. The next render pass allocates a matching buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    /// Advance every axis one easing step toward its target.
    ///
    /// Returns `true` if any axis moved. Once all three axes are within the
    /// settle threshold, further ticks change nothing and return `false`.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for (current, target) in [
            (&mut self.zoom, self.target_zoom),
            (&mut self.offset_x, self.target_offset_x),
            (&mut self.offset_y, self.target_offset_y),
        ] {
            if (*current - target).abs() > self.settle_epsilon {
                *current += (target - *current) * self.damping;
                changed = true;
            }
        }
        changed
    }

    /// Whether all three axes are within the settle threshold.
    pub fn settled(&self) -> bool {
        (self.zoom - self.target_zoom).abs() <= self.settle_epsilon
            && (self.offset_x - self.target_offset_x).abs() <= self.settle_epsilon
            && (self.offset_y - self.target_offset_y).abs() <= self.settle_epsilon
    }

    /// Retarget the zoom by `factor`, keeping the complex-plane point under
    /// the screen position `(px, py)` fixed across the change.
    ///
    /// The correction solves
    /// `(px - w/2)/old + off == (px - w/2)/new + off'` exactly:
    /// `off' = off + d·(new - old)/(old·new)`. The `old·new` denominator is
    /// always positive, so a degenerate factor of 1.0 yields a zero
    /// correction instead of dividing by zero.
    pub fn zoom_toward(&mut self, px: f64, py: f64, factor: f64) {
        let old = self.target_zoom;
        let new = old * factor;
        if new <= 0.0 || !new.is_finite() {
            return;
        }

        let dx = px - self.width as f64 / 2.0;
        let dy = py - self.height as f64 / 2.0;
        self.target_offset_x += dx * (new - old) / (old * new);
        self.target_offset_y += dy * (new - old) / (old * new);
        self.target_zoom = new;

        debug!(
            target_zoom = self.target_zoom,
            target_offset_x = self.target_offset_x,
            target_offset_y = self.target_offset_y,
            "zoom target updated"
        );
    }

    /// Pan by a screen-space delta, effective immediately.
    ///
    /// The delta is scaled by the *current* (eased) zoom and applied to both
    /// the current and the target offsets, so panning tracks the pointer
    /// without lag while any zoom ease keeps running.
    pub fn pan(&mut self, dx_px: f64, dy_px: f64, direction: DragDirection) {
        let sign = match direction {
            DragDirection::Natural => -1.0,
            DragDirection::Inverted => 1.0,
        };
        let dx = sign * dx_px / self.zoom;
        let dy = sign * dy_px / self.zoom;
        self.offset_x += dx;
        self.target_offset_x += dx;
        self.offset_y += dy;
        self.target_offset_y += dy;
    }

    /// Capture the current (eased) view for a render pass.
    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            zoom: self.zoom,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn camera() -> Camera {
        Camera::new(800, 800, DEFAULT_ZOOM).unwrap()
    }

    #[test]
    fn new_camera_is_settled() {
        let cam = camera();
        assert!(cam.settled());
        assert_eq!(cam.zoom(), DEFAULT_ZOOM);
        assert_eq!(cam.offset(), (0.0, 0.0));
    }

    #[test]
    fn invalid_construction() {
        assert!(Camera::new(0, 800, 200.0).is_err());
        assert!(Camera::new(800, 0, 200.0).is_err());
        assert!(Camera::new(800, 800, 0.0).is_err());
        assert!(Camera::new(800, 800, -1.0).is_err());
        assert!(Camera::new(800, 800, f64::NAN).is_err());
        assert!(Camera::with_tuning(800, 800, 200.0, 0.0, 0.01).is_err());
        assert!(Camera::with_tuning(800, 800, 200.0, 1.5, 0.01).is_err());
        assert!(Camera::with_tuning(800, 800, 200.0, 0.1, 0.0).is_err());
    }

    #[test]
    fn tick_converges_within_predicted_bound() {
        let mut cam = camera();
        cam.zoom_toward(400.0, 400.0, 1.5);
        cam.zoom_toward(400.0, 400.0, 1.5); // zoom gap Δ = 200·(1.5² - 1)

        let delta = (cam.target_zoom() - cam.zoom()).abs();
        let ticks = ((DEFAULT_SETTLE_EPSILON / delta).ln() / (1.0 - DEFAULT_DAMPING).ln()).ceil()
            as usize;

        for _ in 0..ticks {
            cam.tick();
        }
        assert!(
            cam.settled(),
            "camera must settle within {ticks} ticks (gap {delta})"
        );
    }

    #[test]
    fn settled_tick_is_idempotent() {
        let mut cam = camera();
        cam.zoom_toward(100.0, 300.0, 1.5);
        while cam.tick() {}

        let before = cam.clone();
        assert!(!cam.tick(), "tick after settling must report no change");
        assert_eq!(cam, before, "tick after settling must not move any axis");
    }

    #[test]
    fn each_tick_shrinks_the_gap_geometrically() {
        let mut cam = camera();
        cam.zoom_toward(400.0, 400.0, 1.5);

        let gap0 = (cam.target_zoom() - cam.zoom()).abs();
        cam.tick();
        let gap1 = (cam.target_zoom() - cam.zoom()).abs();
        assert!((gap1 - gap0 * (1.0 - DEFAULT_DAMPING)).abs() < EPSILON);
    }

    #[test]
    fn zoom_toward_keeps_cursor_point_fixed() {
        let mut cam = camera();
        // Pre-existing pan so the offsets are non-trivial.
        cam.pan(120.0, -45.0, DragDirection::Natural);

        let (px, py) = (613.0, 222.0);
        let dx = px - 400.0;
        let dy = py - 400.0;
        let before_x = dx / cam.target_zoom() + cam.target_offset().0;
        let before_y = dy / cam.target_zoom() + cam.target_offset().1;

        cam.zoom_toward(px, py, 1.5);

        let after_x = dx / cam.target_zoom() + cam.target_offset().0;
        let after_y = dy / cam.target_zoom() + cam.target_offset().1;
        assert!((before_x - after_x).abs() < EPSILON);
        assert!((before_y - after_y).abs() < EPSILON);
    }

    #[test]
    fn zoom_out_keeps_cursor_point_fixed() {
        let mut cam = camera();
        let (px, py) = (50.0, 790.0);
        let dx = px - 400.0;
        let dy = py - 400.0;
        let before_x = dx / cam.target_zoom() + cam.target_offset().0;
        let before_y = dy / cam.target_zoom() + cam.target_offset().1;

        cam.zoom_toward(px, py, 1.0 / 1.5);

        let after_x = dx / cam.target_zoom() + cam.target_offset().0;
        let after_y = dy / cam.target_zoom() + cam.target_offset().1;
        assert!((before_x - after_x).abs() < EPSILON);
        assert!((before_y - after_y).abs() < EPSILON);
    }

    #[test]
    fn pan_is_immediate_on_both_current_and_target() {
        let mut cam = camera();
        cam.pan(100.0, 40.0, DragDirection::Natural);

        let expected_x = -100.0 / DEFAULT_ZOOM;
        let expected_y = -40.0 / DEFAULT_ZOOM;
        assert!((cam.offset().0 - expected_x).abs() < EPSILON);
        assert!((cam.offset().1 - expected_y).abs() < EPSILON);
        assert_eq!(cam.offset(), cam.target_offset());
        assert!(cam.settled(), "an immediate pan leaves nothing to ease");
    }

    #[test]
    fn pan_direction_flag_flips_sign() {
        let mut natural = camera();
        let mut inverted = camera();
        natural.pan(100.0, 0.0, DragDirection::Natural);
        inverted.pan(100.0, 0.0, DragDirection::Inverted);
        assert!((natural.offset().0 + inverted.offset().0).abs() < EPSILON);
    }

    #[test]
    fn pan_uses_current_zoom_not_target() {
        let mut cam = camera();
        cam.zoom_toward(400.0, 400.0, 1.5); // target 300, current still 200

        cam.pan(100.0, 0.0, DragDirection::Natural);
        assert!((cam.offset().0 - (-100.0 / DEFAULT_ZOOM)).abs() < EPSILON);
    }

    #[test]
    fn snapshot_maps_center_pixel_to_offset() {
        let cam = camera();
        let snap = cam.snapshot();
        let c = snap.pixel_to_complex(400, 400);
        assert!((c.re).abs() < EPSILON);
        assert!((c.im).abs() < EPSILON);
    }

    #[test]
    fn snapshot_pixel_mapping() {
        let snap = CameraSnapshot {
            zoom: 200.0,
            offset_x: 0.5,
            offset_y: -0.25,
            width: 800,
            height: 800,
        };
        let c = snap.pixel_to_complex(0, 800);
        assert!((c.re - (-400.0 / 200.0 + 0.5)).abs() < EPSILON);
        assert!((c.im - (400.0 / 200.0 - 0.25)).abs() < EPSILON);
    }

    #[test]
    fn snapshot_is_detached_from_camera() {
        let mut cam = camera();
        let snap = cam.snapshot();
        cam.pan(500.0, 500.0, DragDirection::Natural);
        assert_eq!(snap.offset_x, 0.0, "snapshot must not track the camera");
    }

    #[test]
    fn resize_ignores_zero_dimensions() {
        let mut cam = camera();
        cam.resize(0, 100);
        assert_eq!((cam.width(), cam.height()), (800, 800));
        cam.resize(1024, 768);
        assert_eq!((cam.width(), cam.height()), (1024, 768));
    }

    #[test]
    fn drag_direction_serde_round_trip() {
        let json = serde_json::to_string(&DragDirection::Inverted).unwrap();
        let back: DragDirection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DragDirection::Inverted);
    }
}
