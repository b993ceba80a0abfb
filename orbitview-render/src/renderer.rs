use std::time::{Duration, Instant};

use tracing::{debug, info};

use orbitview_core::{CameraSnapshot, Fractal};

use crate::buffer::FrameBuffer;
use crate::color_map::ColorMap;
use crate::error::RenderError;
use crate::region::RenderRegion;

/// Regions at or below this pixel count are evaluated serially.
pub const DEFAULT_TILE_THRESHOLD: usize = 8000;

/// Tuning knobs for a render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Work-splitting granularity in pixels. Regions larger than this are
    /// quadrisected and evaluated in parallel.
    pub tile_threshold: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_threshold: DEFAULT_TILE_THRESHOLD,
        }
    }
}

/// Statistics from a completed render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    pub elapsed: Duration,
    /// Number of leaf regions evaluated.
    pub leaf_tiles: usize,
}

/// A leaf region together with its computed RGBA rows.
type LeafPixels = (RenderRegion, Vec<u8>);

/// Render a full frame into `frame` using the fork/join tiled pipeline.
///
/// The frame's whole area is recursively quadrisected; sub-threshold leaves
/// run a serial pixel loop and the recursion fans out through nested
/// [`rayon::join`] calls. The join tree guarantees every leaf has finished
/// before this function assembles and returns, so returning *is* the
/// completion signal — callers run this on a worker thread and swap/notify
/// afterwards, exactly once per pass.
///
/// The camera state is an immutable snapshot taken at request time: every
/// tile of one frame maps pixels through identical zoom/offset values.
pub fn render<F: Fractal + Sync>(
    fractal: &F,
    snapshot: &CameraSnapshot,
    colors: &ColorMap,
    config: &RenderConfig,
    frame: &mut FrameBuffer,
) -> crate::Result<RenderStats> {
    if frame.width != snapshot.width || frame.height != snapshot.height {
        return Err(RenderError::FrameMismatch {
            frame_width: frame.width,
            frame_height: frame.height,
            snapshot_width: snapshot.width,
            snapshot_height: snapshot.height,
        });
    }

    let start = Instant::now();
    let full = RenderRegion::full(snapshot.width, snapshot.height)?;
    let threshold = config.tile_threshold.max(1);
    debug!(
        width = snapshot.width,
        height = snapshot.height,
        threshold,
        zoom = snapshot.zoom,
        "starting render pass"
    );

    let leaves = render_region(fractal, snapshot, colors, threshold, full);
    let leaf_tiles = leaves.len();
    for (region, pixels) in &leaves {
        frame.blit_region(region, pixels);
    }

    let elapsed = start.elapsed();
    info!(elapsed_ms = elapsed.as_millis(), leaf_tiles, "render pass complete");

    Ok(RenderStats {
        elapsed,
        leaf_tiles,
    })
}

/// Recursively split `region` and evaluate it, collecting leaf pixel runs.
///
/// Leaves partition the region disjointly, so every pixel of the original
/// region appears in exactly one returned run.
fn render_region<F: Fractal + Sync>(
    fractal: &F,
    snapshot: &CameraSnapshot,
    colors: &ColorMap,
    threshold: usize,
    region: RenderRegion,
) -> Vec<LeafPixels> {
    if region.area() <= threshold {
        return vec![(region, render_leaf(fractal, snapshot, colors, region))];
    }

    let parts = region.quadrisect();
    match parts.as_slice() {
        &[a, b, c, d] => {
            let ((mut out, q1), (q2, q3)) = rayon::join(
                || {
                    rayon::join(
                        || render_region(fractal, snapshot, colors, threshold, a),
                        || render_region(fractal, snapshot, colors, threshold, b),
                    )
                },
                || {
                    rayon::join(
                        || render_region(fractal, snapshot, colors, threshold, c),
                        || render_region(fractal, snapshot, colors, threshold, d),
                    )
                },
            );
            out.extend(q1);
            out.extend(q2);
            out.extend(q3);
            out
        }
        &[a, b] => {
            let (mut out, q1) = rayon::join(
                || render_region(fractal, snapshot, colors, threshold, a),
                || render_region(fractal, snapshot, colors, threshold, b),
            );
            out.extend(q1);
            out
        }
        // A single unsplittable region (1×1 exceeds no sane threshold, but
        // threshold is caller-supplied) degenerates to a leaf.
        _ => vec![(region, render_leaf(fractal, snapshot, colors, region))],
    }
}

/// Serial pixel loop for one leaf region.
fn render_leaf<F: Fractal>(
    fractal: &F,
    snapshot: &CameraSnapshot,
    colors: &ColorMap,
    region: RenderRegion,
) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(region.area() * 4);
    for py in region.y0..region.y1 {
        for px in region.x0..region.x1 {
            let point = snapshot.pixel_to_complex(px, py);
            let rgba = colors.color(fractal.iterate(point));
            pixels.extend_from_slice(&rgba);
        }
    }
    pixels
}
