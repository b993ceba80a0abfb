use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use orbitview_core::{Camera, Fractal};
use orbitview_render::{ColorMap, RenderConfig};

use crate::config::ViewerConfig;
use crate::display::DisplaySurface;
use crate::input::{InteractionController, PointerEvent};
use crate::surface::DoubleBufferedSurface;

/// Cadence at which a host should call [`FractalViewer::tick`] while the
/// viewer reports it is animating.
pub const TICK_PERIOD: Duration = Duration::from_millis(10);

/// Result of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No animation was running; nothing happened.
    Idle,
    /// The camera moved and a render was requested (or dropped, if one was
    /// already in flight).
    Animated,
    /// The camera reached its targets this tick; the animation stopped.
    Settled,
}

/// An interactive escape-time fractal view.
///
/// Owns the camera, the interaction controller and the frame surface, and
/// wires them to a host-supplied [`DisplaySurface`]. The host forwards
/// pointer events to [`handle_pointer`](Self::handle_pointer) and, whenever
/// that returns `true`, drives [`tick`](Self::tick) every [`TICK_PERIOD`]
/// until it reports [`TickOutcome::Settled`].
pub struct FractalViewer<F, D> {
    camera: Camera,
    fractal: F,
    colors: Arc<ColorMap>,
    render_config: RenderConfig,
    surface: DoubleBufferedSurface,
    controller: InteractionController,
    display: Arc<D>,
    animating: bool,
}

impl<F, D> FractalViewer<F, D>
where
    F: Fractal + Clone + Send + Sync + 'static,
    D: DisplaySurface,
{
    /// Build a viewer for `fractal`, presenting through `display`.
    ///
    /// The color table is derived from the fractal's own iteration budget,
    /// so every count [`iterate`](Fractal::iterate) can produce has an
    /// entry, with the bounded-orbit count mapped to black.
    pub fn new(fractal: F, config: ViewerConfig, display: Arc<D>) -> crate::Result<Self> {
        config.validate()?;
        let camera = Camera::with_tuning(
            config.width,
            config.height,
            config.initial_zoom,
            config.damping,
            config.settle_epsilon,
        )?;
        let colors = Arc::new(ColorMap::hsb_default(fractal.params().max_iterations));
        info!(
            width = config.width,
            height = config.height,
            max_iterations = fractal.params().max_iterations,
            zoom = config.initial_zoom,
            "viewer ready"
        );

        Ok(Self {
            camera,
            fractal,
            colors,
            render_config: RenderConfig {
                tile_threshold: config.tile_threshold,
            },
            surface: DoubleBufferedSurface::new(),
            controller: InteractionController::new(config.zoom_step, config.drag_direction),
            display,
            animating: false,
        })
    }

    /// Feed one pointer event through the interaction controller.
    ///
    /// Returns `true` when this event started an animation cycle that was
    /// not already running — the host's cue to start its tick timer.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let effect = self.controller.handle(event, &mut self.camera);
        if effect.render_now {
            // Pans move the camera with no target gap left over, so waiting
            // for a tick could mean never rendering the new view.
            self.request_render();
        }
        if effect.start_animation && !self.animating {
            self.animating = true;
            debug!("animation cycle started");
            return true;
        }
        false
    }

    /// Advance the camera one easing step and render the eased view.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.animating {
            return TickOutcome::Idle;
        }
        if self.camera.tick() {
            self.request_render();
            TickOutcome::Animated
        } else {
            self.animating = false;
            debug!(
                zoom = self.camera.zoom(),
                "camera settled, animation stopped"
            );
            TickOutcome::Settled
        }
    }

    /// Ask for an asynchronous render of the current view.
    ///
    /// Returns `false` when the request was dropped because a pass is
    /// already in flight; a later tick (or the host) retries naturally.
    pub fn request_render(&self) -> bool {
        self.surface.request_render(
            &self.fractal,
            self.camera.snapshot(),
            Arc::clone(&self.colors),
            self.render_config,
            Arc::clone(&self.display),
        )
    }

    /// Push the latest complete frame to the display. Returns `false` when
    /// nothing has been rendered yet.
    pub fn repaint(&self) -> bool {
        self.surface.present_to(self.display.as_ref())
    }

    /// Track a canvas resize; the next render pass uses the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn fractal(&self) -> &F {
        &self.fractal
    }

    pub fn surface(&self) -> &DoubleBufferedSurface {
        &self.surface
    }
}
