use crate::error::RenderError;

/// Precomputed iteration-count → RGBA lookup table.
///
/// One entry per possible evaluator result (`max_iterations + 1` total).
/// The last entry is reserved for bounded orbits and is always black.
/// Immutable after construction so it can be shared freely with render
/// workers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ColorMap {
    colors: Vec<[u8; 4]>,
}

impl ColorMap {
    /// The classic HSB ramp: hue cycles every 256 iterations, brightness
    /// fades in as `i / (i + 8)` so low counts stay near black.
    pub fn hsb_default(max_iterations: u32) -> Self {
        let mut colors = Vec::with_capacity(max_iterations as usize + 1);
        for i in 0..max_iterations {
            let hue = i as f64 / 256.0;
            let brightness = i as f64 / (i as f64 + 8.0);
            colors.push(hsb_to_rgb(hue, 1.0, brightness));
        }
        colors.push([0, 0, 0, 255]);
        Self { colors }
    }

    /// Build from explicit entries. Fails if the table is too short to
    /// cover every result of an evaluator with the given budget.
    pub fn from_colors(colors: Vec<[u8; 4]>, max_iterations: u32) -> crate::Result<Self> {
        let needed = max_iterations as usize + 1;
        if colors.len() < needed {
            return Err(RenderError::ColorMapTooShort {
                len: colors.len(),
                needed,
                max_iterations,
            });
        }
        Ok(Self { colors })
    }

    /// Look up the color for an iteration count. Out-of-range counts clamp
    /// to the bounded (black) entry.
    #[inline]
    pub fn color(&self, iterations: u32) -> [u8; 4] {
        let idx = (iterations as usize).min(self.colors.len() - 1);
        self.colors[idx]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// HSB → RGBA conversion, hue wrapping on the fractional part.
fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> [u8; 4] {
    let v = brightness.clamp(0.0, 1.0);
    let s = saturation.clamp(0.0, 1.0);
    if s == 0.0 {
        let g = (v * 255.0 + 0.5) as u8;
        return [g, g, g, 255];
    }

    let h = (hue - hue.floor()) * 6.0;
    let sector = h as u32 % 6;
    let f = h - h.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [
        (r * 255.0 + 0.5) as u8,
        (g * 255.0 + 0.5) as u8,
        (b * 255.0 + 0.5) as u8,
        255,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_one_entry_per_result() {
        let map = ColorMap::hsb_default(1000);
        assert_eq!(map.len(), 1001);
    }

    #[test]
    fn bounded_entry_is_black() {
        let map = ColorMap::hsb_default(50);
        assert_eq!(map.color(50), [0, 0, 0, 255]);
    }

    #[test]
    fn zero_iterations_is_black() {
        // Brightness 0 / (0 + 8) = 0 — the lowest count renders black too.
        let map = ColorMap::hsb_default(50);
        assert_eq!(map.color(0), [0, 0, 0, 255]);
    }

    #[test]
    fn out_of_range_clamps_to_bounded() {
        let map = ColorMap::hsb_default(50);
        assert_eq!(map.color(9999), map.color(50));
    }

    #[test]
    fn mid_range_is_colorful() {
        let map = ColorMap::hsb_default(1000);
        let c = map.color(100);
        assert_eq!(c[3], 255);
        assert!(
            c[0] > 0 || c[1] > 0 || c[2] > 0,
            "mid-range entries must not be black"
        );
    }

    #[test]
    fn all_entries_opaque() {
        let map = ColorMap::hsb_default(300);
        for i in 0..=300 {
            assert_eq!(map.color(i)[3], 255);
        }
    }

    #[test]
    fn hsb_primary_colors() {
        // Full saturation and brightness at the sector centers.
        assert_eq!(hsb_to_rgb(0.0, 1.0, 1.0), [255, 0, 0, 255]);
        assert_eq!(hsb_to_rgb(1.0 / 3.0, 1.0, 1.0), [0, 255, 0, 255]);
        assert_eq!(hsb_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255, 255]);
        // Hue wraps on the fractional part.
        assert_eq!(hsb_to_rgb(1.0, 1.0, 1.0), hsb_to_rgb(0.0, 1.0, 1.0));
    }

    #[test]
    fn from_colors_validates_length() {
        let colors = vec![[1, 2, 3, 255]; 10];
        assert!(ColorMap::from_colors(colors.clone(), 9).is_ok());
        assert!(ColorMap::from_colors(colors, 10).is_err());
    }
}
