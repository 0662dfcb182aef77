// Frame producers for saver art.
// One type covers all four flavours: "animated" is just more than one frame,
// and "vanishing" is an optional fade counter sitting on top.
//
// Visual: a static image always looks the same; an animated one cycles its
// frames one per tick; a vanishing one flashes in at full strength when
// triggered and fades out over the next few ticks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, RgbaImage};

use crate::error::Error;
use crate::types::Sprite;

/// Alpha a vanishing source jumps back to on every trigger. Above 255 on purpose:
/// the flash holds at full strength for a couple of ticks before it starts to fade.
pub const ALPHA_CEILING: i32 = 300;

/// The four flavours, as reported by `ImageSource::kind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Static,
    Animated,
    VanishingStatic,
    VanishingAnimated,
}

#[derive(Clone, Debug)]
struct Fade {
    alpha: i32, // counts down from ALPHA_CEILING, invisible at <= 0
    speed: i32, // subtracted after each produced frame
}

/// What a source hands out for one tick: which frame, and how opaque.
#[derive(Clone, Copy, Debug)]
pub struct Layer<'a> {
    pub sprite: &'a Sprite,
    pub alpha: u8,
}

#[derive(Clone, Debug)]
pub struct ImageSource {
    frames: Vec<Sprite>,
    index: usize,
    fade: Option<Fade>,
}

impl ImageSource {
    /// Plain source: static with one frame, animated with several.
    pub fn new(frames: Vec<Sprite>) -> Self {
        Self { frames, index: 0, fade: None }
    }

    /// Vanishing source. Starts faded out; nothing shows until `trigger`.
    pub fn vanishing(frames: Vec<Sprite>, alpha_speed: i32) -> Self {
        Self { frames, index: 0, fade: Some(Fade { alpha: 0, speed: alpha_speed.max(1) }) }
    }

    pub fn kind(&self) -> ImageKind {
        match (self.is_animated(), self.fade.is_some()) {
            (false, false) => ImageKind::Static,
            (true, false) => ImageKind::Animated,
            (false, true) => ImageKind::VanishingStatic,
            (true, true) => ImageKind::VanishingAnimated,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_index(&self) -> usize {
        self.index
    }

    /// Current fade counter, `None` for non-vanishing sources.
    pub fn alpha(&self) -> Option<i32> {
        self.fade.as_ref().map(|f| f.alpha)
    }

    /// Hit reaction: bring the fade back to the ceiling and optionally
    /// restart the animation from its first frame.
    pub fn trigger(&mut self, restart_animation: bool) {
        if let Some(fade) = &mut self.fade {
            fade.alpha = ALPHA_CEILING;
        }
        if restart_animation && self.is_animated() {
            self.index = 0;
        }
    }

    /// Produce this tick's frame and step the source forward.
    /// Returns `None` once a vanishing source has faded out (or if there are no frames).
    pub fn get_frame(&mut self) -> Option<Layer<'_>> {
        if self.frames.is_empty() {
            return None;
        }

        let alpha = match &mut self.fade {
            Some(fade) if fade.alpha <= 0 => return None,
            Some(fade) => {
                let shown = fade.alpha.min(255) as u8;
                fade.alpha -= fade.speed;
                shown
            }
            None => 255,
        };

        // index can only be stale if frames were swapped out from under us
        let current = self.index.min(self.frames.len() - 1);
        self.index = (current + 1) % self.frames.len();

        Some(Layer { sprite: &self.frames[current], alpha })
    }
}

/* ---------- Decoding + scaling ---------- */

/// GIFs are the only animated format we read; everything else is a still.
pub fn is_animated_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}

/// Decode every frame of an art file at its native size.
pub fn decode_frames(path: &Path) -> Result<Vec<RgbaImage>, Error> {
    let decode_err = |reason: String| Error::ImageDecode { path: path.to_path_buf(), reason };

    if !is_animated_path(path) {
        let img = image::open(path).map_err(|e| decode_err(e.to_string()))?;
        return Ok(vec![img.to_rgba8()]);
    }

    let file = File::open(path).map_err(|e| decode_err(e.to_string()))?;
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(|e| decode_err(e.to_string()))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| decode_err(e.to_string()))?;

    if frames.is_empty() {
        return Err(Error::EmptyAnimation(path.to_path_buf()));
    }
    Ok(frames.into_iter().map(|f| f.into_buffer()).collect())
}

/// Resize source frames to the saver's on-screen size.
pub fn scale_frames(frames: &[RgbaImage], width: u32, height: u32) -> Vec<Sprite> {
    let (w, h) = (width.max(1), height.max(1));
    frames
        .iter()
        .map(|f| Sprite::from_rgba(&image::imageops::resize(f, w, h, FilterType::Triangle)))
        .collect()
}
