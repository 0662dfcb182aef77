// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the board and the sidebar.
// 2) Filled / outlined rectangles for the board, its border and the buttons.
// 3) Alpha-blended sprite blits for the savers and their hit flashes.
// 4) A tiny 5x7 bitmap font (scalable) for button labels.

use crate::error::Error;
use crate::types::{FrameBuffer, Sprite};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,    // the on-screen window you see
    mouse_was_down: bool, // left button state last tick, for press edges
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window, mouse_was_down: false })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current client-area size; changes when the user drags the window edge.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Current mouse position in window pixel coordinates, if inside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    /// True only on the tick the left button goes down (a "click").
    pub fn left_mouse_pressed_once(&mut self) -> bool {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let pressed = down && !self.mouse_was_down;
        self.mouse_was_down = down;
        pressed
    }

    /// Visual: when pressed, every selected (red) saver disappears.
    pub fn delete_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Delete, KeyRepeat::No)
    }

    /// Auto-repeats while held, so one long press clears the speed box.
    pub fn backspace_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Backspace, KeyRepeat::Yes)
    }

    /// Digits typed this tick (top row or numpad), in press order.
    pub fn digits_pressed(&self) -> Vec<char> {
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(key_digit)
            .collect()
    }
}

fn key_digit(key: Key) -> Option<char> {
    let d = match key {
        Key::Key0 | Key::NumPad0 => 0,
        Key::Key1 | Key::NumPad1 => 1,
        Key::Key2 | Key::NumPad2 => 2,
        Key::Key3 | Key::NumPad3 => 3,
        Key::Key4 | Key::NumPad4 => 4,
        Key::Key5 | Key::NumPad5 => 5,
        Key::Key6 | Key::NumPad6 => 6,
        Key::Key7 | Key::NumPad7 => 7,
        Key::Key8 | Key::NumPad8 => 8,
        Key::Key9 | Key::NumPad9 => 9,
        _ => return None,
    };
    char::from_digit(d, 10)
}

/* ---------- Software drawing: pixels, lines, rectangles, sprites ---------- */

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

/// Solid rectangle, clipped to the framebuffer.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(fb.width as i32);
    let y1 = (y + h).min(fb.height as i32);
    for py in y0..y1 {
        let row = py as usize * fb.width;
        for px in x0..x1 {
            fb.pixels[row + px as usize] = color;
        }
    }
}

/// Rectangle outline `thickness` pixels wide, drawn inward from the edge.
/// Visual: the black frame around the play area.
pub fn draw_rect_outline(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, thickness: i32, color: u32) {
    if w <= 0 || h <= 0 { return; }
    for t in 0..thickness.min(w / 2 + 1).min(h / 2 + 1) {
        let (l, r) = (x + t, x + w - 1 - t);
        let (top, bottom) = (y + t, y + h - 1 - t);
        draw_line(fb, l, top, r, top, color);
        draw_line(fb, l, bottom, r, bottom, color);
        draw_line(fb, l, top, l, bottom, color);
        draw_line(fb, r, top, r, bottom, color);
    }
}

/// Blend one straight-alpha ARGB pixel over an opaque RGB pixel.
/// `alpha` is the layer opacity (0..=255) applied on top of the pixel's own.
#[inline]
fn blend_over(dst: u32, src: u32, alpha: u8) -> u32 {
    let a = ((src >> 24) & 0xFF) * alpha as u32 / 255; // 0..=255
    if a == 0 { return dst; }
    if a == 255 { return src & 0x00FF_FFFF; }
    let inv = 255 - a;
    let mix = |shift: u32| {
        let s = (src >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        ((s * a + d * inv + 127) / 255) << shift
    };
    mix(16) | mix(8) | mix(0)
}

/// Draw a sprite with its top-left at (x,y), scaled by a layer opacity.
/// Visual: the saver art appears; with alpha < 255 it looks faded.
pub fn blit_sprite(fb: &mut FrameBuffer, sprite: &Sprite, x: i32, y: i32, alpha: u8) {
    if alpha == 0 { return; }
    for sy in 0..sprite.height {
        let ty = y + sy as i32;
        if ty < 0 || ty >= fb.height as i32 { continue; }
        for sx in 0..sprite.width {
            let tx = x + sx as i32;
            if tx < 0 || tx >= fb.width as i32 { continue; }
            let idx = ty as usize * fb.width + tx as usize;
            fb.pixels[idx] = blend_over(fb.pixels[idx], sprite.pixels[sy * sprite.width + sx], alpha);
        }
    }
}

/* ---------- 5x7 bitmap font (uppercase ASCII, digits, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters reuse the uppercase shapes.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
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

        // Letters A..Z
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
        'Y' => g!(0b10001,0b10001,0b10001,0b01010,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),

        _ => None,
    }
}

/// Width in pixels of `text` drawn at `scale` (6 px advance per glyph).
pub fn text_width_5x7(text: &str, scale: i32) -> i32 {
    (text.chars().count() as i32 * 6 - 1).max(0) * scale
}

/// Draw a single 5x7 character at (x,y), each font pixel a `scale`x`scale` block.
/// Unknown characters draw as a hollow box so labels never silently shrink.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    let rows = glyph5x7(ch).unwrap_or([0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111]);
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) != 0 {
                fill_rect(fb, x + rx * scale, y + ry as i32 * scale, scale, scale, color);
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact label appears; each glyph is 5x7 with 1-pixel spacing (times scale).
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, scale: i32, color: u32) {
    let scale = scale.max(1);
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, scale, color);
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut fb = FrameBuffer::new(4, 4);
        fill_rect(&mut fb, -2, 2, 10, 10, 0xAB);
        assert_eq!(fb.get(0, 1), Some(0));
        assert_eq!(fb.get(0, 2), Some(0xAB));
        assert_eq!(fb.get(3, 3), Some(0xAB));
    }

    #[test]
    fn outline_leaves_inside_untouched() {
        let mut fb = FrameBuffer::new(10, 10);
        draw_rect_outline(&mut fb, 0, 0, 10, 10, 2, 0x1);
        assert_eq!(fb.get(0, 0), Some(0x1));
        assert_eq!(fb.get(1, 5), Some(0x1));
        assert_eq!(fb.get(9, 9), Some(0x1));
        assert_eq!(fb.get(2, 2), Some(0));
        assert_eq!(fb.get(5, 5), Some(0));
    }

    #[test]
    fn opaque_blit_replaces_and_transparent_blit_keeps() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.clear(0x00FF_FFFF);
        blit_sprite(&mut fb, &Sprite::solid(2, 2, 0x0012_3456), 1, 1, 255);
        assert_eq!(fb.get(1, 1), Some(0x0012_3456));
        assert_eq!(fb.get(0, 0), Some(0x00FF_FFFF));

        let clear = Sprite { width: 1, height: 1, pixels: vec![0x00FF_0000] };
        blit_sprite(&mut fb, &clear, 0, 0, 255);
        assert_eq!(fb.get(0, 0), Some(0x00FF_FFFF));
    }

    #[test]
    fn half_alpha_blit_mixes_colors() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.clear(0x0000_0000);
        blit_sprite(&mut fb, &Sprite::solid(1, 1, 0x00FF_FFFF), 0, 0, 128);
        assert_eq!(fb.get(0, 0), Some(0x0080_8080));
    }

    #[test]
    fn text_width_counts_spacing() {
        assert_eq!(text_width_5x7("", 1), 0);
        assert_eq!(text_width_5x7("AB", 1), 11);
        assert_eq!(text_width_5x7("AB", 2), 22);
    }

    #[test]
    fn lowercase_renders_like_uppercase() {
        assert_eq!(glyph5x7('w'), glyph5x7('W'));
    }
}
