// Per-saver art: the idle image plus the optional wall-hit and corner-hit
// reactions, scaled to the saver's current size.
//
// Visual: idle is what a saver normally looks like, wall-hit flashes over it
// after a bounce and fades out, corner-hit sits over it while the saver is
// frozen in a corner.

use std::rc::Rc;

use image::RgbaImage;

use crate::image_source::{ImageSource, scale_frames};

/// How much faster than the saver itself its wall-hit flash fades.
pub const ALPHA_SPEED_FACTOR: f32 = 1.2;

/// Decoded source frames for one bundle, shared by every saver spawned from it.
/// Kept at native resolution so a resize only has to rescale.
#[derive(Clone, Debug)]
pub struct ArtSet {
    pub name: String,
    pub idle: Rc<Vec<RgbaImage>>,
    pub wall_hit: Option<Rc<Vec<RgbaImage>>>,
    pub corner_hit: Option<Rc<Vec<RgbaImage>>>,
    pub reset_animation_on_hit: bool,
}

impl ArtSet {
    pub fn from_frames(
        name: impl Into<String>,
        idle: Vec<RgbaImage>,
        wall_hit: Option<Vec<RgbaImage>>,
        corner_hit: Option<Vec<RgbaImage>>,
        reset_animation_on_hit: bool,
    ) -> Self {
        Self {
            name: name.into(),
            idle: Rc::new(idle),
            wall_hit: wall_hit.map(Rc::new),
            corner_hit: corner_hit.map(Rc::new),
            reset_animation_on_hit,
        }
    }
}

/// round(speed * 1.2), never below 1 so a flash always ends.
pub fn alpha_speed_for(speed: u32) -> i32 {
    ((speed as f32 * ALPHA_SPEED_FACTOR).round() as i32).max(1)
}

pub struct SaverResources {
    art: ArtSet,
    alpha_speed: i32,
    idle: ImageSource,
    wall_hit: Option<ImageSource>,
    corner_hit: Option<ImageSource>,
}

impl SaverResources {
    pub fn new(art: ArtSet, width: u32, height: u32, speed: u32) -> Self {
        let alpha_speed = alpha_speed_for(speed);
        let (idle, wall_hit, corner_hit) = Self::build_sources(&art, width, height, alpha_speed);
        Self { art, alpha_speed, idle, wall_hit, corner_hit }
    }

    fn build_sources(
        art: &ArtSet,
        width: u32,
        height: u32,
        alpha_speed: i32,
    ) -> (ImageSource, Option<ImageSource>, Option<ImageSource>) {
        let idle = ImageSource::new(scale_frames(&art.idle, width, height));
        let wall_hit = art
            .wall_hit
            .as_ref()
            .map(|f| ImageSource::vanishing(scale_frames(f, width, height), alpha_speed));
        let corner_hit = art
            .corner_hit
            .as_ref()
            .map(|f| ImageSource::new(scale_frames(f, width, height)));
        (idle, wall_hit, corner_hit)
    }

    /// Recreate every source at a new size. Fades and frame positions start over.
    pub fn rebuild(&mut self, width: u32, height: u32) {
        let (idle, wall_hit, corner_hit) = Self::build_sources(&self.art, width, height, self.alpha_speed);
        self.idle = idle;
        self.wall_hit = wall_hit;
        self.corner_hit = corner_hit;
    }

    pub fn name(&self) -> &str {
        &self.art.name
    }

    pub fn alpha_speed(&self) -> i32 {
        self.alpha_speed
    }

    pub fn wall_hit_enabled(&self) -> bool {
        self.wall_hit.is_some()
    }

    pub fn corner_hit_enabled(&self) -> bool {
        self.corner_hit.is_some()
    }

    /// Start (or restart) the wall-hit flash. No-op when the bundle has no wall-hit art.
    pub fn hit_wall(&mut self) {
        let restart = self.art.reset_animation_on_hit;
        if let Some(src) = &mut self.wall_hit {
            src.trigger(restart);
        }
    }

    pub fn idle_mut(&mut self) -> &mut ImageSource {
        &mut self.idle
    }

    pub fn wall_hit_mut(&mut self) -> Option<&mut ImageSource> {
        self.wall_hit.as_mut()
    }

    pub fn corner_hit_mut(&mut self) -> Option<&mut ImageSource> {
        self.corner_hit.as_mut()
    }
}
