// The persistent paint layer. Strokes accumulate here across frames and the
// renderer composites it over the live camera image.

use image::{Rgba, RgbaImage};

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Fixed-resolution RGBA raster. Pixels start fully transparent.
///
/// `Clone` is a full deep copy, which is what undo snapshots rely on: a stored
/// copy never shares pixels with the live surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingSurface {
    image: RgbaImage,
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, TRANSPARENT) }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Write one pixel; coordinates outside the canvas are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if self.contains(x, y) {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        self.contains(x, y).then(|| *self.image.get_pixel(x as u32, y as u32))
    }

    /// Reset every pixel to fully transparent.
    pub fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = TRANSPARENT;
        }
    }

    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p[3] == 0)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_transparent() {
        let s = DrawingSurface::new(8, 4);
        assert!(s.is_blank());
        assert_eq!(s.pixel(7, 3), Some(TRANSPARENT));
        assert_eq!(s.pixel(8, 0), None);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut s = DrawingSurface::new(8, 4);
        s.put_pixel(-1, 0, Rgba([255, 0, 0, 255]));
        s.put_pixel(0, 4, Rgba([255, 0, 0, 255]));
        s.put_pixel(8, 1, Rgba([255, 0, 0, 255]));
        assert!(s.is_blank());
    }

    #[test]
    fn clone_does_not_alias() {
        let mut live = DrawingSurface::new(4, 4);
        let snapshot = live.clone();
        live.put_pixel(1, 1, Rgba([0, 0, 255, 255]));
        assert!(snapshot.is_blank());
        assert_ne!(snapshot, live);

        live.clear();
        assert_eq!(snapshot, live);
    }
}
