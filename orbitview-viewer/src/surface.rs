use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use tracing::{debug, warn};

use orbitview_core::{CameraSnapshot, Fractal};
use orbitview_render::{render, ColorMap, FrameBuffer, RenderConfig};

use crate::display::DisplaySurface;

/// Lock a mutex, recovering the data if a render thread panicked while
/// holding it. Frame buffers stay structurally valid across a panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Shared {
    /// The last fully rendered frame; read by the repaint path.
    onscreen: Mutex<Option<FrameBuffer>>,
    /// Recycled buffer for the next pass. Taken by an in-flight render,
    /// which owns it exclusively until the swap.
    spare: Mutex<Option<FrameBuffer>>,
    /// At most one pass in flight; requests while set are dropped.
    rendering: AtomicBool,
}

/// Two-slot frame store with a single-flight render worker.
///
/// A render pass computes into an offscreen buffer and swaps it onscreen
/// atomically when complete, so the repaint path always sees either the
/// previous complete frame or the new complete frame — never a torn one.
/// Requests that arrive while a pass is running are dropped, not queued:
/// during an animation a fresher camera snapshot follows on the next tick
/// anyway, so queueing would only burn cores on stale frames.
pub struct DoubleBufferedSurface {
    shared: Arc<Shared>,
}

impl Default for DoubleBufferedSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleBufferedSurface {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                onscreen: Mutex::new(None),
                spare: Mutex::new(None),
                rendering: AtomicBool::new(false),
            }),
        }
    }

    /// Whether a render pass is currently in flight.
    pub fn is_rendering(&self) -> bool {
        self.shared.rendering.load(Ordering::Acquire)
    }

    /// Start an asynchronous render pass for `snapshot`.
    ///
    /// Returns `true` if a pass was started. Returns `false` without side
    /// effects when the snapshot is degenerate (zero-area canvas) or when a
    /// pass is already running — the request is dropped.
    ///
    /// On completion the worker swaps the new frame onscreen and calls
    /// `display.invalidate()`; the host repaints at its leisure via
    /// [`present_to`](Self::present_to).
    pub fn request_render<F, D>(
        &self,
        fractal: &F,
        snapshot: CameraSnapshot,
        colors: Arc<ColorMap>,
        config: RenderConfig,
        display: Arc<D>,
    ) -> bool
    where
        F: Fractal + Clone + Send + Sync + 'static,
        D: DisplaySurface,
    {
        if snapshot.width == 0 || snapshot.height == 0 {
            return false;
        }
        if self
            .shared
            .rendering
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("render pass already in flight, request dropped");
            return false;
        }

        let shared = Arc::clone(&self.shared);
        let fractal = fractal.clone();
        thread::spawn(move || {
            // Reuse the spare buffer when its size still matches; a resize
            // since the last pass means a fresh allocation.
            let mut frame = match lock(&shared.spare).take() {
                Some(buf) if buf.width == snapshot.width && buf.height == snapshot.height => buf,
                _ => FrameBuffer::new(snapshot.width, snapshot.height),
            };

            match render(&fractal, &snapshot, &colors, &config, &mut frame) {
                Ok(stats) => {
                    debug!(
                        elapsed_ms = stats.elapsed.as_millis(),
                        leaf_tiles = stats.leaf_tiles,
                        "swapping finished frame onscreen"
                    );
                    let previous = lock(&shared.onscreen).replace(frame);
                    *lock(&shared.spare) = previous;
                    // Clear the flag before notifying, so a render requested
                    // from the repaint path is not spuriously dropped.
                    shared.rendering.store(false, Ordering::Release);
                    display.invalidate();
                }
                Err(err) => {
                    // Keep whatever frame is onscreen; recycle the buffer.
                    warn!(error = %err, "render pass failed, keeping previous frame");
                    *lock(&shared.spare) = Some(frame);
                    shared.rendering.store(false, Ordering::Release);
                }
            }
        });
        true
    }

    /// Run `f` against the onscreen frame, if one exists yet.
    pub fn with_frame<R>(&self, f: impl FnOnce(&FrameBuffer) -> R) -> Option<R> {
        lock(&self.shared.onscreen).as_ref().map(f)
    }

    /// Present the onscreen frame to `display`. Returns `false` when no
    /// pass has completed yet.
    pub fn present_to<D: DisplaySurface>(&self, display: &D) -> bool {
        match lock(&self.shared.onscreen).as_ref() {
            Some(frame) => {
                display.present(frame);
                true
            }
            None => false,
        }
    }
}
