//! Raster surface abstraction
//!
//! The renderer writes pixels through the [`Surface`] trait so the
//! interpolation and colormap pipeline can be exercised without a real
//! graphics backend. [`PixelSurface`] is the owned RGBA buffer
//! implementation used in-process and in tests.

/// Minimal write capability the renderer needs from a raster target.
///
/// Coordinates are device pixels. Writes outside the surface bounds are
/// clipped, never a panic.
pub trait Surface {
    /// Surface width in device pixels
    fn width(&self) -> usize;

    /// Surface height in device pixels
    fn height(&self) -> usize;

    /// Write a single RGBA pixel.
    fn write_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]);

    /// Fill a `w x h` block with a solid RGBA color, clipped to bounds.
    fn write_block(&mut self, x: usize, y: usize, w: usize, h: usize, rgba: [u8; 4]) {
        let x_end = (x + w).min(self.width());
        let y_end = (y + h).min(self.height());
        for py in y..y_end {
            for px in x..x_end {
                self.write_pixel(px, py, rgba);
            }
        }
    }

    /// Reset every pixel to fully transparent black.
    fn clear(&mut self);
}

/// An owned RGBA pixel buffer in row-major order, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelSurface {
    /// Create a fully transparent surface of the given device-pixel size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * 4],
        }
    }

    /// Raw RGBA bytes, `width * height * 4` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the surface, returning the RGBA bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Read back the pixel at (x, y). Out of bounds returns `None`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn write_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    fn write_block(&mut self, x: usize, y: usize, w: usize, h: usize, rgba: [u8; 4]) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y..y_end {
            let row = py * self.width;
            for px in x..x_end {
                let i = (row + px) * 4;
                self.data[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_transparent() {
        let s = PixelSurface::new(4, 4);
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(s.data().len(), 64);
    }

    #[test]
    fn write_and_read_pixel() {
        let mut s = PixelSurface::new(4, 4);
        s.write_pixel(2, 1, [10, 20, 30, 255]);
        assert_eq!(s.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(s.pixel(1, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn block_fill_is_clipped() {
        let mut s = PixelSurface::new(4, 4);
        s.write_block(2, 2, 10, 10, [1, 2, 3, 4]);
        assert_eq!(s.pixel(3, 3), Some([1, 2, 3, 4]));
        assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn out_of_bounds_write_is_noop() {
        let mut s = PixelSurface::new(2, 2);
        s.write_pixel(5, 5, [255; 4]);
        assert!(s.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn clear_resets_to_transparent() {
        let mut s = PixelSurface::new(2, 2);
        s.write_block(0, 0, 2, 2, [255; 4]);
        s.clear();
        assert!(s.data().iter().all(|&b| b == 0));
    }
}
