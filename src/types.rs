// Core types shared by the board, the savers and the window.

/// The window-sized image we draw into every tick.
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

    /// Fill the whole buffer with one color.
    pub fn clear(&mut self, color: u32) {
        for p in &mut self.pixels { *p = color; }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height { return None; }
        Some(self.pixels[y * self.width + x])
    }
}

/// One rendered frame of saver art, already scaled to the saver's size.
/// Pixels are straight (non-premultiplied) RGBA, packed as 0xAARRGGBB.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Sprite {
    pub fn from_rgba(img: &image::RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
            })
            .collect();
        Self { width: w as usize, height: h as usize, pixels }
    }

    /// A fully opaque sprite of a single color.
    pub fn solid(width: usize, height: usize, rgb: u32) -> Self {
        Self { width, height, pixels: vec![0xFF00_0000 | (rgb & 0x00FF_FFFF); width * height] }
    }
}

/// Axis-aligned rectangle in window pixels (float so ratios don't drift on resize).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build from edges instead of origin + size.
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { x: left, y: top, width: right - left, height: bottom - top }
    }

    pub fn left(&self) -> f32 { self.x }
    pub fn top(&self) -> f32 { self.y }
    pub fn right(&self) -> f32 { self.x + self.width }
    pub fn bottom(&self) -> f32 { self.y + self.height }

    /// Shrink by `dx` on the left and right and by `dy` on the top and bottom.
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, (self.width - 2.0 * dx).max(0.0), (self.height - 2.0 * dy).max(0.0))
    }

    /// Half-open hit test, same convention as the pixels we actually cover.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_shrinks_every_side() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0).inset(5.0, 2.0);
        assert_eq!(r, Rect::new(15.0, 22.0, 90.0, 46.0));
        assert_eq!(r.right(), 105.0);
        assert_eq!(r.bottom(), 68.0);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(9.9, 9.9));
        assert!(!r.contains(10.0, 5.0));
        assert!(!r.contains(-0.1, 5.0));
    }

    #[test]
    fn sprite_from_rgba_packs_argb() {
        let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([0x11, 0x22, 0x33, 0x44]));
        let s = Sprite::from_rgba(&img);
        assert_eq!((s.width, s.height), (2, 1));
        assert_eq!(s.pixels, vec![0x4411_2233, 0x4411_2233]);
    }
}
