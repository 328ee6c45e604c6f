// Window + software drawing utilities.
// Visual pieces provided here:
// 1) A window that shows the live camera with the paint layer on top.
// 2) The toolbar buttons and a crosshair that follows the pointer.
// 3) A tiny 5x7 bitmap font for button labels and the HUD line.

use crate::brush::{hsv_to_rgb, BrushState};
use crate::error::Error;
use crate::session::UiCommand;
use crate::surface::DrawingSurface;
use crate::toolbar::{Button, Toolbar};
use crate::types::{pack_rgb, Fingertip, FrameBuffer};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
    left_was_down: bool,
}

impl Drawer {
    /// Create a window and cap its update rate at `fps`.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window, left_was_down: false })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Process window events without a new image (used on skipped ticks).
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Position of a fresh left click (down this frame, up the frame before).
    pub fn take_click(&mut self) -> Option<(usize, usize)> {
        let down = self.left_mouse_down();
        let clicked = down && !self.left_was_down;
        self.left_was_down = down;
        if clicked { self.mouse_pos() } else { None }
    }

    /// Command finger the keyboard is closing the thumb onto:
    /// Z = middle (undo), Y = ring (redo), X = pinky (clear).
    pub fn held_finger(&self) -> Option<Fingertip> {
        if self.window.is_key_down(Key::Z) {
            Some(Fingertip::Middle)
        } else if self.window.is_key_down(Key::Y) {
            Some(Fingertip::Ring)
        } else if self.window.is_key_down(Key::X) {
            Some(Fingertip::Pinky)
        } else {
            None
        }
    }
}

/* ---------- Software drawing: pixels, rects, crosshair ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

pub fn fill_rect(fb: &mut FrameBuffer, x: usize, y: usize, w: usize, h: usize, color: u32) {
    for yy in y..(y + h).min(fb.height) {
        for xx in x..(x + w).min(fb.width) {
            fb.pixels[yy * fb.width + xx] = color;
        }
    }
}

fn outline_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    draw_line(fb, x, y, x + w - 1, y, color);
    draw_line(fb, x, y + h - 1, x + w - 1, y + h - 1, color);
    draw_line(fb, x, y, x, y + h - 1, color);
    draw_line(fb, x + w - 1, y, x + w - 1, y + h - 1, color);
}

/// Draw a small crosshair centered at (cx,cy), with a tiny gap at the center.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/* ---------- Layers: camera frame and paint surface ---------- */

/// Copy `src` into `dst` with its top-left corner at (ox, oy), clipped.
pub fn blit(dst: &mut FrameBuffer, src: &FrameBuffer, ox: usize, oy: usize) {
    let w = src.width.min(dst.width.saturating_sub(ox));
    for y in 0..src.height.min(dst.height.saturating_sub(oy)) {
        let s = y * src.width;
        let d = (y + oy) * dst.width + ox;
        dst.pixels[d..d + w].copy_from_slice(&src.pixels[s..s + w]);
    }
}

/// Straight (non-premultiplied) "over" for one channel.
#[inline]
fn over(src: u8, dst: u32, a: u32) -> u32 {
    (src as u32 * a + dst * (255 - a) + 127) / 255
}

/// Alpha-composite the paint layer over `dst` at (ox, oy). Transparent
/// pixels leave the camera image untouched.
pub fn composite_surface(dst: &mut FrameBuffer, surface: &DrawingSurface, ox: usize, oy: usize) {
    for (x, y, p) in surface.image().enumerate_pixels() {
        let a = p[3] as u32;
        if a == 0 {
            continue;
        }
        let (dx, dy) = (x as usize + ox, y as usize + oy);
        if dx >= dst.width || dy >= dst.height {
            continue;
        }
        let idx = dy * dst.width + dx;
        if a == 255 {
            dst.pixels[idx] = pack_rgb([p[0], p[1], p[2]]);
            continue;
        }
        let old = dst.pixels[idx];
        let r = over(p[0], (old >> 16) & 0xFF, a);
        let g = over(p[1], (old >> 8) & 0xFF, a);
        let b = over(p[2], old & 0xFF, a);
        dst.pixels[idx] = (r << 16) | (g << 8) | b;
    }
}

/* ---------- Toolbar ---------- */

const LABEL_COLOR: u32 = 0x00_FF_FF_FF;
const ACTIVE_OUTLINE: u32 = 0x00_FF_CC_33;

fn draw_button(fb: &mut FrameBuffer, b: &Button, active: bool) {
    if b.command == UiCommand::SelectRainbow {
        // hue sweep across the swatch
        for i in 0..b.width {
            let rgb = hsv_to_rgb(i as f32 * 360.0 / b.width as f32, 1.0, 1.0);
            fill_rect(fb, b.x + i, b.y, 1, b.height, pack_rgb(rgb));
        }
    } else {
        fill_rect(fb, b.x, b.y, b.width, b.height, b.fill);
    }

    if !b.label.is_empty() {
        let tx = b.x + (b.width - text_width(b.label)) / 2;
        let ty = b.y + (b.height - 7) / 2;
        draw_text_5x7(fb, tx as i32, ty as i32, b.label, LABEL_COLOR);
    }

    if active {
        let (x, y, w, h) = (b.x as i32, b.y as i32, b.width as i32, b.height as i32);
        outline_rect(fb, x - 2, y - 2, w + 4, h + 4, ACTIVE_OUTLINE);
        outline_rect(fb, x - 1, y - 1, w + 2, h + 2, ACTIVE_OUTLINE);
    }
}

pub fn draw_toolbar(fb: &mut FrameBuffer, toolbar: &Toolbar, brush: &BrushState) {
    for b in toolbar.buttons() {
        draw_button(fb, b, b.is_active(brush));
    }
}

/* ---------- 5x7 bitmap font (uppercase, digits, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase maps to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Pixel width of `text`: 5 px glyph + 1 px spacing each, minus the trailing gap.
pub fn text_width(text: &str) -> usize {
    (text.chars().count() * 6).saturating_sub(1)
}

/// Draw a text string using 5x7 glyphs.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
