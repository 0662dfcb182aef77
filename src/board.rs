// The play area: owns every saver, decides where new ones appear, handles
// click-to-select and delete, and draws itself plus all savers each tick.
// Visual: a white panel with a thin black frame; savers bounce inside the frame.

use log::{debug, info};
use rand::Rng;

use crate::clock::Clock;
use crate::draw::{draw_rect_outline, fill_rect};
use crate::resources::ArtSet;
use crate::saver::{Direction, Saver};
use crate::types::{FrameBuffer, Rect};

pub const BOARD_RATIO: f32 = 0.9;     // board size = window size * this
pub const OFFSET_RATIO: f32 = 0.0125; // board offset and border inset = window size * this
pub const IMAGE_RATIO: f32 = 0.2;     // saver size = board size * this

pub const BACKDROP_COLOR: u32 = 0x00FF_FFFF;
pub const BORDER_COLOR: u32 = 0x0000_0000;
pub const BORDER_THICKNESS: i32 = 2;

/// Where a board lives in the window and how big its savers are.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub rect: Rect,             // whole board, window coordinates
    pub inner: Rect,            // area savers may occupy
    pub saver_size: (f32, f32),
}

impl Layout {
    pub fn for_window(width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        let (off_x, off_y) = (w * OFFSET_RATIO, h * OFFSET_RATIO);
        let rect = Rect::new(off_x, off_y, w * BOARD_RATIO, h * BOARD_RATIO);
        Self {
            rect,
            inner: rect.inset(off_x, off_y),
            saver_size: (rect.width * IMAGE_RATIO, rect.height * IMAGE_RATIO),
        }
    }
}

/// Spawn position for `Board::add_saver`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    Center,
    At { x: f32, y: f32 },
}

impl Placement {
    /// Accepts the `(-1, -1)` "center it" convention used by callers that only have numbers.
    pub fn from_coords(x: f32, y: f32) -> Self {
        if x == -1.0 && y == -1.0 { Placement::Center } else { Placement::At { x, y } }
    }
}

pub struct Board {
    layout: Layout,
    savers: Vec<Saver>, // insertion order = draw order = hit-test order
    focused: bool,      // some saver is selected; updates pause while true
}

impl Board {
    pub fn new(layout: Layout) -> Self {
        Self { layout, savers: Vec::new(), focused: false }
    }

    pub fn for_window(width: usize, height: usize) -> Self {
        Self::new(Layout::for_window(width, height))
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn inner(&self) -> Rect {
        self.layout.inner
    }

    pub fn savers(&self) -> &[Saver] {
        &self.savers
    }

    pub fn len(&self) -> usize {
        self.savers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.savers.is_empty()
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn add_saver(&mut self, art: &ArtSet, placement: Placement, speed: u32, direction: Direction) {
        let (w, h) = self.layout.saver_size;
        let inner = self.layout.inner;
        let (x, y) = match placement {
            Placement::Center => (inner.x + (inner.width - w) / 2.0, inner.y + (inner.height - h) / 2.0),
            Placement::At { x, y } => (x, y),
        };
        info!("spawning \"{}\" at ({x:.0}, {y:.0}), speed {speed}", art.name);
        self.savers.push(Saver::new(art.clone(), x, y, w, h, speed, direction));
    }

    /// Random position inside the play area, random direction on each axis.
    pub fn generate_saver<R: Rng>(&mut self, art: &ArtSet, speed: u32, rng: &mut R) {
        let (w, h) = self.layout.saver_size;
        let inner = self.layout.inner;
        let x = random_coord(rng, inner.left(), inner.right() - w);
        let y = random_coord(rng, inner.top(), inner.bottom() - h);
        let direction = Direction::new(random_sign(rng), random_sign(rng));
        self.add_saver(art, Placement::At { x, y }, speed, direction);
    }

    pub fn clear_savers(&mut self) {
        info!("clearing {} saver(s)", self.savers.len());
        self.savers.clear();
        self.focused = false;
    }

    /// One physics tick for every saver, in insertion order. Paused while anything is selected.
    pub fn update_savers(&mut self, clock: &dyn Clock) {
        if self.focused {
            return;
        }
        let now = clock.now_ms();
        let inner = self.layout.inner;
        for saver in &mut self.savers {
            saver.update(now, inner);
        }
    }

    /// Select every saver under the pointer, deselect the rest.
    /// Returns whether anything ended up selected.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        let mut any = false;
        for saver in &mut self.savers {
            let hit = saver.contains(x, y);
            saver.set_focused(hit);
            any |= hit;
        }
        self.focused = any;
        debug!("pointer down at ({x:.0}, {y:.0}), selection: {any}");
        any
    }

    /// Remove every selected saver. Returns how many went away.
    pub fn delete_focused(&mut self) -> usize {
        if !self.focused {
            return 0;
        }
        let before = self.savers.len();
        self.savers.retain(|s| !s.is_focused());
        self.focused = false;
        let removed = before - self.savers.len();
        info!("deleted {removed} saver(s)");
        removed
    }

    /// New window size: recompute the layout and rescale every saver in place.
    pub fn resize(&mut self, window_width: usize, window_height: usize) {
        self.layout = Layout::for_window(window_width, window_height);
        let (w, h) = self.layout.saver_size;
        for saver in &mut self.savers {
            saver.resize(w, h);
        }
        debug!("board resized to {:.0}x{:.0}", self.layout.rect.width, self.layout.rect.height);
    }

    /// Backdrop, border, then savers back to front.
    pub fn render(&mut self, fb: &mut FrameBuffer) {
        let r = self.layout.rect;
        fill_rect(fb, r.x as i32, r.y as i32, r.width as i32, r.height as i32, BACKDROP_COLOR);

        let i = self.layout.inner;
        draw_rect_outline(fb, i.x as i32, i.y as i32, i.width as i32, i.height as i32, BORDER_THICKNESS, BORDER_COLOR);

        for saver in &mut self.savers {
            saver.render(fb);
        }
    }
}

/// Integer coordinate strictly inside `(near, far)`, collapsing to `near + 1` if there's no room.
fn random_coord<R: Rng>(rng: &mut R, near: f32, far: f32) -> f32 {
    let lo = near as i32 + 1;
    let hi = (far as i32 - 1).max(lo);
    rng.gen_range(lo..=hi) as f32
}

fn random_sign<R: Rng>(rng: &mut R) -> i8 {
    if rng.gen_bool(0.5) { 1 } else { -1 }
}
