use tracing::debug;

use orbitview_core::{Camera, DragDirection};

/// Pointer buttons the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// A host-delivered pointer event, in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A button went down; anchors a potential drag.
    Press { x: f64, y: f64 },
    /// A press-release pair at (roughly) one spot.
    Click { x: f64, y: f64, button: PointerButton },
    /// Pointer motion with a button held.
    Drag { x: f64, y: f64 },
}

/// What the viewer should do after an event was applied to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputEffect {
    /// Camera targets moved; the easing loop should run until settled.
    pub start_animation: bool,
    /// The camera moved immediately; render now instead of waiting a tick.
    pub render_now: bool,
}

/// Translates pointer events into camera mutations.
///
/// Clicks retarget the zoom (left in, right out) around the cursor; drags
/// pan immediately relative to the last anchor point. The controller keeps
/// only that anchor as state, so each gesture stands alone.
#[derive(Debug)]
pub struct InteractionController {
    zoom_step: f64,
    drag_direction: DragDirection,
    last_point: Option<(f64, f64)>,
}

impl InteractionController {
    pub fn new(zoom_step: f64, drag_direction: DragDirection) -> Self {
        Self {
            zoom_step,
            drag_direction,
            last_point: None,
        }
    }

    /// Apply one event to `camera` and report the required follow-up.
    pub fn handle(&mut self, event: PointerEvent, camera: &mut Camera) -> InputEffect {
        match event {
            PointerEvent::Press { x, y } => {
                self.last_point = Some((x, y));
                InputEffect::default()
            }
            PointerEvent::Click { x, y, button } => {
                // A click consumes the press anchor, so the gesture cannot
                // also register as a zero-length drag.
                self.last_point = None;
                let factor = match button {
                    PointerButton::Left => self.zoom_step,
                    PointerButton::Right => 1.0 / self.zoom_step,
                };
                camera.zoom_toward(x, y, factor);
                debug!(x, y, factor, "click retargeted zoom");
                InputEffect {
                    start_animation: true,
                    render_now: false,
                }
            }
            PointerEvent::Drag { x, y } => {
                let Some((last_x, last_y)) = self.last_point else {
                    // Motion with no anchor (e.g. the press landed outside
                    // the canvas) is ignored.
                    return InputEffect::default();
                };
                camera.pan(x - last_x, y - last_y, self.drag_direction);
                self.last_point = Some((x, y));
                InputEffect {
                    start_animation: true,
                    render_now: true,
                }
            }
        }
    }
}
