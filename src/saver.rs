// One bouncing saver: where it is, which way it's going, and what it looks like.
// Visual: the picture slides diagonally, bounces off the board's border,
// flashes on every bounce, and freezes for a moment when it lands exactly in a corner.

use log::debug;

use crate::draw::{blit_sprite, fill_rect};
use crate::image_source::Layer;
use crate::resources::{ArtSet, SaverResources};
use crate::types::{FrameBuffer, Rect};

/// How long a corner hit keeps the saver frozen.
pub const CORNER_FREEZE_MS: u64 = 2500;

/// Drawn instead of the art while a saver is selected.
pub const HIGHLIGHT_COLOR: u32 = 0x00FF_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaverState {
    /// Moving, nothing to show on top of the idle art.
    Idle,
    /// Moving; the wall-hit flash is playing (or has faded out).
    WallHit,
    /// Frozen in a corner since `since_ms`.
    CornerHit { since_ms: u64 },
}

/// What happened during one `update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    None,
    Wall,
    Corner,
}

/// Per-axis travel sign, each component is +1 or -1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub x: i8,
    pub y: i8,
}

impl Direction {
    pub fn new(x: i8, y: i8) -> Self {
        let unit = |v: i8| if v < 0 { -1 } else { 1 };
        Self { x: unit(x), y: unit(y) }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self { x: 1, y: 1 }
    }
}

pub struct Saver {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    direction: Direction,
    speed: u32,
    state: SaverState,
    focused: bool,
    resources: SaverResources,
}

impl Saver {
    pub fn new(art: ArtSet, x: f32, y: f32, width: f32, height: f32, speed: u32, direction: Direction) -> Self {
        let speed = speed.max(1);
        let resources = SaverResources::new(art, pixels(width), pixels(height), speed);
        Self {
            x,
            y,
            width,
            height,
            direction,
            speed,
            state: SaverState::Idle,
            focused: false,
            resources,
        }
    }

    pub fn name(&self) -> &str {
        self.resources.name()
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn state(&self) -> SaverState {
        self.state
    }

    pub fn is_wall_hit(&self) -> bool {
        self.state == SaverState::WallHit
    }

    pub fn is_corner_hit(&self) -> bool {
        matches!(self.state, SaverState::CornerHit { .. })
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn resources(&self) -> &SaverResources {
        &self.resources
    }

    /// Pointer hit test against the saver's current rect.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        self.rect().contains(px, py)
    }

    fn hit_wall(&mut self) {
        self.state = SaverState::WallHit;
        self.resources.hit_wall();
    }

    fn hit_corner(&mut self, now_ms: u64) {
        debug!("saver \"{}\" hit a corner at ({:.0}, {:.0})", self.name(), self.x, self.y);
        self.state = SaverState::CornerHit { since_ms: now_ms };
    }

    /// Advance one tick inside `inner` (the board's play area).
    pub fn update(&mut self, now_ms: u64, inner: Rect) -> Collision {
        if let SaverState::CornerHit { since_ms } = self.state {
            if now_ms.saturating_sub(since_ms) > CORNER_FREEZE_MS {
                self.state = SaverState::Idle;
            }
            return Collision::None;
        }

        let step = self.speed as f32;
        self.x += step * self.direction.x as f32;
        self.y += step * self.direction.y as f32;

        let x_hit = bounce(&mut self.x, &mut self.direction.x, inner.left(), inner.right() - self.width);
        let y_hit = bounce(&mut self.y, &mut self.direction.y, inner.top(), inner.bottom() - self.height);

        match (x_hit, y_hit) {
            (true, true) => {
                self.hit_corner(now_ms);
                Collision::Corner
            }
            (true, false) | (false, true) => {
                self.hit_wall();
                Collision::Wall
            }
            (false, false) => Collision::None,
        }
    }

    /// Board changed size: new saver size, art rebuilt, top-left kept where it was.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.resources.rebuild(pixels(width), pixels(height));
    }

    /// Draw this tick's composed frame at the saver's position.
    /// Visual: red box while selected; otherwise idle art, then the fading
    /// wall flash, then the corner art, each over the previous.
    pub fn render(&mut self, fb: &mut FrameBuffer) {
        let (x, y) = (self.x as i32, self.y as i32);

        if self.focused {
            fill_rect(fb, x, y, pixels(self.width) as i32, pixels(self.height) as i32, HIGHLIGHT_COLOR);
            return;
        }

        draw_layer(fb, self.resources.idle_mut().get_frame(), x, y);

        if self.state == SaverState::WallHit {
            if let Some(src) = self.resources.wall_hit_mut() {
                draw_layer(fb, src.get_frame(), x, y);
            }
        }

        if self.is_corner_hit() {
            if let Some(src) = self.resources.corner_hit_mut() {
                draw_layer(fb, src.get_frame(), x, y);
            }
        }
    }
}

fn draw_layer(fb: &mut FrameBuffer, layer: Option<Layer<'_>>, x: i32, y: i32) {
    if let Some(layer) = layer {
        blit_sprite(fb, layer.sprite, x, y, layer.alpha);
    }
}

fn pixels(len: f32) -> u32 {
    len.round().max(1.0) as u32
}

/// One axis of the wall test. Reverses `dir` and pulls `pos` one unit back
/// inside `[near, far]` when it reached either edge.
fn bounce(pos: &mut f32, dir: &mut i8, near: f32, far: f32) -> bool {
    if *pos >= far {
        *dir = -*dir;
        *pos = (far - 1.0).max(near);
        true
    } else if *pos <= near {
        *dir = -*dir;
        *pos = (near + 1.0).min(far);
        true
    } else {
        false
    }
}
