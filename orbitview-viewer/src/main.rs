//! Headless demo: drives a Mandelbrot viewer through a short scripted
//! session (two zoom clicks, one drag) and logs every presented frame.
//!
//! `RUST_LOG=debug cargo run --release -p orbitview-viewer` shows the
//! per-pass render timings and the dropped-request decisions.

use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::info;
use tracing_subscriber::EnvFilter;

use orbitview_core::Mandelbrot;
use orbitview_render::FrameBuffer;
use orbitview_viewer::{
    DisplaySurface, FractalViewer, PointerButton, PointerEvent, ViewerConfig, TICK_PERIOD,
};

/// A display that only logs. `invalidate` arrives on the render worker
/// thread; the main loop polls the flag and repaints.
struct LogDisplay {
    needs_paint: AtomicBool,
}

impl DisplaySurface for LogDisplay {
    fn present(&self, frame: &FrameBuffer) {
        info!(width = frame.width, height = frame.height, "frame presented");
    }

    fn invalidate(&self) {
        self.needs_paint.store(true, Ordering::Release);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ViewerConfig {
        width: 400,
        height: 400,
        max_iterations: 500,
        ..Default::default()
    };
    let display = Arc::new(LogDisplay {
        needs_paint: AtomicBool::new(false),
    });
    let fractal = Mandelbrot::new(config.fractal_params()?);
    let mut viewer = FractalViewer::new(fractal, config, Arc::clone(&display))?;

    // First frame of the home view.
    viewer.request_render();
    drain(&viewer, &display);

    // Two zoom clicks toward the seahorse valley, then a short drag.
    let target = PointerEvent::Click {
        x: 130.0,
        y: 230.0,
        button: PointerButton::Left,
    };
    viewer.handle_pointer(target);
    viewer.handle_pointer(target);
    viewer.handle_pointer(PointerEvent::Press { x: 200.0, y: 200.0 });
    viewer.handle_pointer(PointerEvent::Drag { x: 240.0, y: 185.0 });

    while viewer.is_animating() {
        thread::sleep(TICK_PERIOD);
        viewer.tick();
        if display.needs_paint.swap(false, Ordering::AcqRel) {
            viewer.repaint();
        }
    }
    drain(&viewer, &display);

    let (offset_x, offset_y) = viewer.camera().offset();
    info!(
        zoom = viewer.camera().zoom(),
        offset_x, offset_y, "session settled"
    );
    Ok(())
}

/// Wait out the in-flight render pass, then show its frame.
fn drain(viewer: &FractalViewer<Mandelbrot, LogDisplay>, display: &LogDisplay) {
    while viewer.surface().is_rendering() {
        thread::sleep(TICK_PERIOD);
    }
    if display.needs_paint.swap(false, Ordering::AcqRel) {
        viewer.repaint();
    }
}
