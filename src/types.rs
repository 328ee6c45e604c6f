// Core types shared by the camera, the gesture classifier and the painter.

/// Canvas resolution. The drawing surface and the scaled camera frame share it.
pub const WEBCAM_WIDTH: u32 = 640;
pub const WEBCAM_HEIGHT: u32 = 480;

/// The window is larger than the camera view; the extra border holds the toolbar.
pub const WINDOW_WIDTH: usize = 800;
pub const WINDOW_HEIGHT: usize = 600;

/// Top-left corner of the camera view inside the window (centered).
pub const VIEW_X: usize = (WINDOW_WIDTH - WEBCAM_WIDTH as usize) / 2;
pub const VIEW_Y: usize = (WINDOW_HEIGHT - WEBCAM_HEIGHT as usize) / 2;

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];
pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const YELLOW: [u8; 3] = [255, 255, 0];

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }
}

/// Pack an RGB triple as 0x00RRGGBB.
#[inline]
pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// A position on the canvas, in pixels. May lie outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A landmark position in normalized camera space, nominally [0,1]x[0,1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

impl NormPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: NormPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: NormPoint) -> NormPoint {
        NormPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fingertip {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

/// The five fingertip landmarks of one detected hand, for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LandmarkSample {
    tips: [NormPoint; 5],
}

impl LandmarkSample {
    pub fn new(
        thumb: NormPoint,
        index: NormPoint,
        middle: NormPoint,
        ring: NormPoint,
        pinky: NormPoint,
    ) -> Self {
        Self { tips: [thumb, index, middle, ring, pinky] }
    }

    pub fn tip(&self, finger: Fingertip) -> NormPoint {
        self.tips[finger as usize]
    }

    /// Normalized distance between the thumb tip and `finger`'s tip.
    pub fn thumb_distance(&self, finger: Fingertip) -> f32 {
        self.tip(Fingertip::Thumb).distance(self.tip(finger))
    }
}
