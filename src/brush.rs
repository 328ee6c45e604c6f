// Brush parameters and the pixel primitives that render one gesture step.
// Every primitive writes through `DrawingSurface::put_pixel`, so stamps that
// hang over the canvas edge are clipped per pixel.

use image::Rgba;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::surface::DrawingSurface;
use crate::types::{Point, RED, WHITE};

pub const MIN_SIZE: u32 = 1;
pub const MAX_SIZE: u32 = 50;
pub const DEFAULT_SIZE: u32 = 10;
pub const RAINBOW_STEP: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushMode {
    Pen,
    Spray,
    Circle,
    Square,
}

impl BrushMode {
    pub fn label(self) -> &'static str {
        match self {
            BrushMode::Pen => "PEN",
            BrushMode::Spray => "SPRAY",
            BrushMode::Circle => "CIRCLE",
            BrushMode::Square => "SQUARE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushColor {
    Solid([u8; 3]),
    Rainbow,
}

/// Standard 6-sector HSV to RGB. `h` in degrees (any value, wrapped into
/// [0,360)), `s` and `v` in [0,1].
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_u8(r), to_u8(g), to_u8(b)]
}

/// Everything the user can set about the brush. Persists across frames and
/// strokes; changed only by explicit commands.
#[derive(Debug, Clone)]
pub struct BrushState {
    color: BrushColor,
    mode: BrushMode,
    size: u32,
    eraser: bool,
    hue: u16,
    hue_step: u16,
    eraser_color: [u8; 3],
}

impl Default for BrushState {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, RAINBOW_STEP, WHITE)
    }
}

impl BrushState {
    pub fn new(size: u32, hue_step: u16, eraser_color: [u8; 3]) -> Self {
        Self {
            color: BrushColor::Solid(RED),
            mode: BrushMode::Pen,
            size: size.clamp(MIN_SIZE, MAX_SIZE),
            eraser: false,
            hue: 0,
            hue_step,
            eraser_color,
        }
    }

    pub fn color(&self) -> BrushColor {
        self.color
    }

    pub fn mode(&self) -> BrushMode {
        self.mode
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn eraser(&self) -> bool {
        self.eraser
    }

    /// Current rainbow phase, degrees in [0,360).
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Picking a color (or rainbow) puts the eraser down.
    pub fn set_color(&mut self, color: BrushColor) {
        self.color = color;
        self.eraser = false;
    }

    pub fn set_mode(&mut self, mode: BrushMode) {
        self.mode = mode;
    }

    pub fn set_eraser(&mut self, on: bool) {
        self.eraser = on;
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.clamp(MIN_SIZE, MAX_SIZE);
    }

    pub fn grow(&mut self, step: u32) {
        self.set_size(self.size.saturating_add(step));
    }

    pub fn shrink(&mut self, step: u32) {
        self.set_size(self.size.saturating_sub(step));
    }

    /// Color for the next paint call. In rainbow mode this reads the phase
    /// and then advances it; the eraser overrides both and leaves the phase alone.
    pub fn next_color(&mut self) -> Rgba<u8> {
        let [r, g, b] = if self.eraser {
            self.eraser_color
        } else {
            match self.color {
                BrushColor::Solid(rgb) => rgb,
                BrushColor::Rainbow => {
                    let rgb = hsv_to_rgb(self.hue as f32, 1.0, 1.0);
                    self.hue = ((self.hue as u32 + self.hue_step as u32) % 360) as u16;
                    rgb
                }
            }
        };
        Rgba([r, g, b, 255])
    }
}

/// Stateless apart from the RNG that scatters spray dots.
pub struct BrushEngine {
    rng: StdRng,
}

impl BrushEngine {
    /// `seed` makes spray patterns reproducible; `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Apply one gesture step. Only `Pen` uses `from`; the stamp modes draw at `to`.
    pub fn paint(
        &mut self,
        surface: &mut DrawingSurface,
        mode: BrushMode,
        from: Point,
        to: Point,
        color: Rgba<u8>,
        size: u32,
    ) {
        let size = size.max(MIN_SIZE) as i32;
        match mode {
            BrushMode::Pen => draw_thick_line(surface, from, to, size, color),
            BrushMode::Spray => self.spray(surface, to, size, color),
            BrushMode::Circle => fill_disc(surface, to, size as f32, color),
            BrushMode::Square => fill_square(surface, to, size, color),
        }
    }

    /// `2 * radius` candidates uniformly in the bounding square; candidates
    /// outside the circle or the canvas are dropped, not retried.
    fn spray(&mut self, surface: &mut DrawingSurface, at: Point, radius: i32, color: Rgba<u8>) {
        let r2 = radius * radius;
        for _ in 0..2 * radius {
            let dx = self.rng.gen_range(-radius..=radius);
            let dy = self.rng.gen_range(-radius..=radius);
            if dx * dx + dy * dy > r2 {
                continue;
            }
            surface.put_pixel(at.x + dx, at.y + dy, color);
        }
    }
}

/// Filled disc: every pixel whose center is within `radius` of `c`.
fn fill_disc(surface: &mut DrawingSurface, c: Point, radius: f32, color: Rgba<u8>) {
    let r = radius.floor() as i32;
    let r2 = radius * radius;
    for y in (c.y - r)..=(c.y + r) {
        for x in (c.x - r)..=(c.x + r) {
            let dx = (x - c.x) as f32;
            let dy = (y - c.y) as f32;
            if dx * dx + dy * dy <= r2 {
                surface.put_pixel(x, y, color);
            }
        }
    }
}

fn fill_square(surface: &mut DrawingSurface, c: Point, half: i32, color: Rgba<u8>) {
    for y in (c.y - half)..=(c.y + half) {
        for x in (c.x - half)..=(c.x + half) {
            surface.put_pixel(x, y, color);
        }
    }
}

/// Round pen tip exactly `thickness` pixels across. Even sizes have no
/// center pixel, so the tip spans offsets `-(t-1)/2 ..= t/2` and is centered
/// half a pixel down-right of `c`.
fn stamp_tip(surface: &mut DrawingSurface, c: Point, thickness: i32, color: Rgba<u8>) {
    let lo = -(thickness - 1) / 2;
    let hi = thickness / 2;
    let center = (lo + hi) as f32 / 2.0;
    let r = thickness as f32 / 2.0;
    for oy in lo..=hi {
        for ox in lo..=hi {
            let dx = ox as f32 - center;
            let dy = oy as f32 - center;
            if dx * dx + dy * dy <= r * r {
                surface.put_pixel(c.x + ox, c.y + oy, color);
            }
        }
    }
}

/// Bresenham walk from `a` to `b`, stamping a round tip at each step.
fn draw_thick_line(
    surface: &mut DrawingSurface,
    a: Point,
    b: Point,
    thickness: i32,
    color: Rgba<u8>,
) {
    let (mut x0, mut y0) = (a.x, a.y);
    let dx = (b.x - x0).abs();
    let sx = if x0 < b.x { 1 } else { -1 };
    let dy = -(b.y - y0).abs();
    let sy = if y0 < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp_tip(surface, Point::new(x0, y0), thickness, color);
        if x0 == b.x && y0 == b.y { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TRANSPARENT;
    use crate::types::{BLUE, WEBCAM_HEIGHT, WEBCAM_WIDTH};

    const OPAQUE_RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn canvas() -> DrawingSurface {
        DrawingSurface::new(WEBCAM_WIDTH, WEBCAM_HEIGHT)
    }

    fn painted(s: &DrawingSurface) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..s.height() as i32 {
            for x in 0..s.width() as i32 {
                if s.pixel(x, y) != Some(TRANSPARENT) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0, 0, 255]);
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), [255, 255, 0]);
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(200.0, 0.0, 1.0), [255, 255, 255]);
    }

    #[test]
    fn rainbow_advances_and_wraps() {
        let mut brush = BrushState::default();
        brush.set_color(BrushColor::Rainbow);
        assert_eq!(brush.next_color(), Rgba([255, 0, 0, 255]));
        assert_eq!(brush.hue(), 5);

        for _ in 0..70 {
            brush.next_color();
        }
        assert_eq!(brush.hue(), 355);
        brush.next_color();
        assert_eq!(brush.hue(), 0);
    }

    #[test]
    fn eraser_overrides_color_and_freezes_hue() {
        let mut brush = BrushState::new(10, 5, [1, 2, 3]);
        brush.set_color(BrushColor::Rainbow);
        brush.set_eraser(true);
        assert_eq!(brush.next_color(), Rgba([1, 2, 3, 255]));
        assert_eq!(brush.hue(), 0);

        brush.set_color(BrushColor::Solid(BLUE));
        assert!(!brush.eraser());
        assert_eq!(brush.next_color(), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn size_is_clamped() {
        let mut brush = BrushState::default();
        brush.grow(100);
        assert_eq!(brush.size(), MAX_SIZE);
        brush.shrink(100);
        assert_eq!(brush.size(), MIN_SIZE);
        assert_eq!(BrushState::new(0, 5, WHITE).size(), MIN_SIZE);
    }

    #[test]
    fn pen_draws_thick_opaque_segment() {
        let mut s = canvas();
        let mut engine = BrushEngine::new(Some(1));
        engine.paint(&mut s, BrushMode::Pen, Point::new(100, 100), Point::new(110, 100), OPAQUE_RED, 10);

        for x in 100..=110 {
            assert_eq!(s.pixel(x, 100), Some(OPAQUE_RED));
        }
        let rows: Vec<i32> = (0..s.height() as i32)
            .filter(|&y| s.pixel(105, y) == Some(OPAQUE_RED))
            .collect();
        assert_eq!(rows, (96..=105).collect::<Vec<_>>());
        assert_eq!(s.pixel(116, 100), Some(TRANSPARENT));
    }

    #[test]
    fn pen_width_matches_size() {
        for size in [1, 2, 3, 4, 10, 11, 50] {
            let mut s = canvas();
            let mut engine = BrushEngine::new(Some(1));
            engine.paint(&mut s, BrushMode::Pen, Point::new(200, 200), Point::new(260, 200), OPAQUE_RED, size);
            let rows = (0..s.height() as i32)
                .filter(|&y| s.pixel(230, y) == Some(OPAQUE_RED))
                .count();
            assert_eq!(rows, size as usize, "size {size}");
        }
    }

    #[test]
    fn pen_single_point_stroke() {
        let mut s = canvas();
        let mut engine = BrushEngine::new(Some(1));
        let p = Point::new(20, 20);
        engine.paint(&mut s, BrushMode::Pen, p, p, OPAQUE_RED, 1);
        assert_eq!(painted(&s), vec![(20, 20)]);
    }

    #[test]
    fn circle_ignores_from() {
        let mut s = canvas();
        let mut engine = BrushEngine::new(Some(1));
        engine.paint(&mut s, BrushMode::Circle, Point::new(0, 0), Point::new(50, 50), OPAQUE_RED, 3);

        let px = painted(&s);
        assert!(px.iter().all(|&(x, y)| (x - 50).pow(2) + (y - 50).pow(2) <= 9));
        assert_eq!(s.pixel(53, 50), Some(OPAQUE_RED));
        assert_eq!(s.pixel(53, 51), Some(TRANSPARENT));
        assert_eq!(s.pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn square_has_half_width_size() {
        let mut s = canvas();
        let mut engine = BrushEngine::new(Some(1));
        engine.paint(&mut s, BrushMode::Square, Point::new(0, 0), Point::new(50, 50), OPAQUE_RED, 2);
        assert_eq!(painted(&s).len(), 25);
        assert_eq!(s.pixel(48, 48), Some(OPAQUE_RED));
        assert_eq!(s.pixel(52, 52), Some(OPAQUE_RED));
        assert_eq!(s.pixel(53, 50), Some(TRANSPARENT));
    }

    #[test]
    fn square_clips_at_edges() {
        let mut s = canvas();
        let mut engine = BrushEngine::new(Some(1));
        engine.paint(&mut s, BrushMode::Square, Point::new(0, 0), Point::new(0, 0), OPAQUE_RED, 2);
        assert_eq!(painted(&s).len(), 9);
    }

    #[test]
    fn spray_stays_inside_radius() {
        for seed in 0..20 {
            let mut engine = BrushEngine::new(Some(seed));
            let mut s = canvas();
            let at = Point::new(320, 240);
            engine.paint(&mut s, BrushMode::Spray, at, at, OPAQUE_RED, 12);
            let px = painted(&s);
            assert!(!px.is_empty());
            assert!(px.len() <= 24);
            assert!(px.iter().all(|&(x, y)| (x - at.x).pow(2) + (y - at.y).pow(2) <= 144));
        }
    }

    #[test]
    fn spray_drops_off_canvas_candidates_without_retry() {
        let center = Point::new(320, 240);
        let corner = Point::new(639, 479);
        for seed in 0..20 {
            let mut mid = canvas();
            BrushEngine::new(Some(seed)).paint(&mut mid, BrushMode::Spray, center, center, OPAQUE_RED, 12);
            let mut edge = canvas();
            BrushEngine::new(Some(seed)).paint(&mut edge, BrushMode::Spray, corner, corner, OPAQUE_RED, 12);

            // same candidates; at the corner only the up-left quadrant survives
            let mut expected: Vec<(i32, i32)> = painted(&mid)
                .into_iter()
                .map(|(x, y)| (x - center.x, y - center.y))
                .filter(|&(dx, dy)| dx <= 0 && dy <= 0)
                .map(|(dx, dy)| (corner.x + dx, corner.y + dy))
                .collect();
            expected.sort_by_key(|&(x, y)| (y, x));
            assert_eq!(painted(&edge), expected);
            assert!(painted(&edge).len() < painted(&mid).len());
        }
    }

    #[test]
    fn spray_is_reproducible_with_seed() {
        let at = Point::new(100, 100);
        let mut a = canvas();
        let mut b = canvas();
        BrushEngine::new(Some(7)).paint(&mut a, BrushMode::Spray, at, at, OPAQUE_RED, 20);
        BrushEngine::new(Some(7)).paint(&mut b, BrushMode::Spray, at, at, OPAQUE_RED, 20);
        assert_eq!(a, b);
    }
}
