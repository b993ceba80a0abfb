use orbitview_render::FrameBuffer;

/// The external presentation collaborator.
///
/// The viewer never talks to a window system directly. A host supplies an
/// implementation of this trait; the double-buffered surface calls
/// [`invalidate`](Self::invalidate) after each buffer swap (from the render
/// worker thread), and the host's repaint path pulls the finished frame via
/// [`present`](Self::present).
pub trait DisplaySurface: Send + Sync + 'static {
    /// Show a fully rendered frame.
    fn present(&self, frame: &FrameBuffer);

    /// A new frame is available; schedule a repaint.
    fn invalidate(&self);
}
