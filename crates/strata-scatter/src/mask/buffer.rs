use crate::error::ScatterError;

/// Row-major grayscale image with values in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskBuffer {
    width: usize,
    height: usize,
    pixels: Vec<f32>,
}

impl MaskBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            pixels: vec![value.clamp(0.0, 1.0); width * height],
        }
    }

    /// Wrap externally produced pixels, clamping each into `[0, 1]`.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<f32>,
    ) -> Result<Self, ScatterError> {
        if pixels.len() != width * height {
            return Err(ScatterError::MaskSizeMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        let pixels = pixels
            .into_iter()
            .map(|p| if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 })
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from 8-bit luminance bytes.
    pub fn from_gray8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ScatterError> {
        Self::from_pixels(
            width,
            height,
            bytes.iter().map(|&b| f32::from(b) / 255.0).collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.pixels[y * self.width + x]
    }

    /// Value at `(x, y)` with coordinates clamped to the buffer edges.
    /// An empty buffer reads as black.
    pub fn sample_clamped(&self, x: i64, y: i64) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.get(x, y)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let index = y * self.width + x;
        self.pixels[index] = value.clamp(0.0, 1.0);
    }

    /// Set `(x, y)` if it lies inside the buffer.
    pub fn set_checked(&mut self, x: i64, y: i64, value: f32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.set(x as usize, y as usize, value);
        }
    }

    pub fn invert(&mut self) {
        for p in &mut self.pixels {
            *p = 1.0 - *p;
        }
    }

    /// Bilinear resample to `width × height`.
    pub fn resized_bilinear(&self, width: usize, height: usize) -> MaskBuffer {
        let mut out = MaskBuffer::new(width, height);
        if self.is_empty() {
            return out;
        }
        let sx = self.width as f32 / width.max(1) as f32;
        let sy = self.height as f32 / height.max(1) as f32;
        for y in 0..height {
            let fy = ((y as f32 + 0.5) * sy - 0.5).max(0.0);
            let y0 = (fy as usize).min(self.height - 1);
            let y1 = (y0 + 1).min(self.height - 1);
            let ty = fy - y0 as f32;
            for x in 0..width {
                let fx = ((x as f32 + 0.5) * sx - 0.5).max(0.0);
                let x0 = (fx as usize).min(self.width - 1);
                let x1 = (x0 + 1).min(self.width - 1);
                let tx = fx - x0 as f32;
                let top = lerp(self.get(x0, y0), self.get(x1, y0), tx);
                let bottom = lerp(self.get(x0, y1), self.get(x1, y1), tx);
                out.set(x, y, lerp(top, bottom, ty));
            }
        }
        out
    }

    /// Nearest-neighbour rotation about the centre by `degrees`.
    /// Pixels that map outside the source take `background`.
    pub fn rotated(&self, degrees: f32, background: f32) -> MaskBuffer {
        let mut out = MaskBuffer::filled(self.width, self.height, background);
        let (sin, cos) = libm::sincosf(-degrees.to_radians());
        let cx = (self.width as f32 - 1.0) / 2.0;
        let cy = (self.height as f32 - 1.0) / 2.0;
        for y in 0..self.height {
            for x in 0..self.width {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let src_x = libm::roundf(dx * cos - dy * sin + cx);
                let src_y = libm::roundf(dx * sin + dy * cos + cy);
                if src_x >= 0.0
                    && src_y >= 0.0
                    && (src_x as usize) < self.width
                    && (src_y as usize) < self.height
                {
                    out.set(x, y, self.get(src_x as usize, src_y as usize));
                }
            }
        }
        out
    }

    pub fn to_gray8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .map(|&p| (p.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
