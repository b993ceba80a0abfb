use crate::region::RenderRegion;

/// An RGBA pixel buffer representing a rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a new buffer filled with black (opaque).
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        // Set alpha to 255 for all pixels.
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Read one pixel as RGBA.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Copy a leaf region's RGBA data into the correct position.
    ///
    /// `region_pixels` is row-major within the region.
    pub fn blit_region(&mut self, region: &RenderRegion, region_pixels: &[u8]) {
        debug_assert_eq!(region_pixels.len(), region.area() * 4);
        let stride = self.width as usize * 4;
        let row_bytes = region.width() as usize * 4;
        for row in 0..region.height() as usize {
            let src_start = row * row_bytes;
            let dst_start = (region.y0 as usize + row) * stride + region.x0 as usize * 4;
            self.pixels[dst_start..dst_start + row_bytes]
                .copy_from_slice(&region_pixels[src_start..src_start + row_bytes]);
        }
    }
}
