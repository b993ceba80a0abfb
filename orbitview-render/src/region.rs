use crate::error::RenderError;

/// A rectangular pixel region with half-open bounds.
///
/// Invariant: `x0 < x1` and `y0 < y1` — regions are never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRegion {
    pub x0: u32,
    pub x1: u32,
    pub y0: u32,
    pub y1: u32,
}

impl RenderRegion {
    pub fn new(x0: u32, x1: u32, y0: u32, y1: u32) -> crate::Result<Self> {
        if x0 >= x1 || y0 >= y1 {
            return Err(RenderError::EmptyRegion { x0, x1, y0, y1 });
        }
        Ok(Self { x0, x1, y0, y1 })
    }

    /// The full region of a `width`×`height` canvas.
    pub fn full(width: u32, height: u32) -> crate::Result<Self> {
        Self::new(0, width, 0, height)
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Number of pixels in this region.
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Bisect the region on both axes at the integer midpoints.
    ///
    /// Returns the nonempty quadrants (four in the common case; fewer when
    /// an axis has length 1 and cannot be split). The quadrants exactly
    /// tile the parent: disjoint, and their union covers every pixel.
    pub fn quadrisect(&self) -> Vec<RenderRegion> {
        let mid_x = self.x0 + self.width() / 2;
        let mid_y = self.y0 + self.height() / 2;

        let x_splits: &[(u32, u32)] = if mid_x > self.x0 && mid_x < self.x1 {
            &[(self.x0, mid_x), (mid_x, self.x1)]
        } else {
            &[(self.x0, self.x1)]
        };
        let y_splits: &[(u32, u32)] = if mid_y > self.y0 && mid_y < self.y1 {
            &[(self.y0, mid_y), (mid_y, self.y1)]
        } else {
            &[(self.y0, self.y1)]
        };

        let mut parts = Vec::with_capacity(4);
        for &(y0, y1) in y_splits {
            for &(x0, x1) in x_splits {
                parts.push(RenderRegion { x0, x1, y0, y1 });
            }
        }
        parts
    }
}
