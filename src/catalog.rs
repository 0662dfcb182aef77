// Resource bundles on disk.
//
// Layout: one directory per saver under the resources root, each holding a
// `context.json` plus the image files it names:
//
// ```json
// { "resourceName": "$asDirectory", "idle": "idle.png",
//   "wallhit": "flash.gif", "cornerhit": "corner.png", "resetAnimation": true }
// ```
//
// Nothing in here is fatal. A bad bundle turns into a `LoadError` diagnostic
// (logged and kept for inspection) and the scan carries on.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::error::LoadError;
use crate::image_source::decode_frames;
use crate::resources::ArtSet;

pub const DESCRIPTOR_FILE: &str = "context.json";

/// `resourceName` value meaning "use the bundle's directory name".
pub const AS_DIRECTORY: &str = "$asDirectory";

/// Validated declaration of a saver's art. Optional paths are `Some` iff the
/// matching reaction is enabled.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceDescriptor {
    pub name: String,
    pub idle_path: PathBuf,
    pub wall_hit_path: Option<PathBuf>,
    pub corner_hit_path: Option<PathBuf>,
    pub reset_animation_on_hit: bool,
}

impl ResourceDescriptor {
    pub fn wall_hit_enabled(&self) -> bool {
        self.wall_hit_path.is_some()
    }

    pub fn corner_hit_enabled(&self) -> bool {
        self.corner_hit_path.is_some()
    }
}

/// A descriptor together with its decoded art, ready to spawn savers from.
#[derive(Clone, Debug)]
pub struct ResourceBundle {
    pub descriptor: ResourceDescriptor,
    pub art: ArtSet,
}

/// `context.json` as written by hand.
#[derive(Debug, Deserialize)]
struct RawContext {
    #[serde(rename = "resourceName")]
    resource_name: String,
    idle: String,
    #[serde(default)]
    wallhit: Option<String>,
    #[serde(default)]
    cornerhit: Option<String>,
    #[serde(rename = "resetAnimation", default)]
    reset_animation: Option<bool>,
}

#[derive(Default)]
pub struct ResourceCatalog {
    bundles: Vec<ResourceBundle>,
    diagnostics: Vec<LoadError>,
}

impl ResourceCatalog {
    /// Scan every subdirectory of `root`, in name order.
    pub fn scan(root: &Path) -> Self {
        let mut catalog = Self::default();

        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                catalog.report(LoadError::UnreadableRoot { path: root.to_path_buf(), reason: e.to_string() });
                return catalog;
            }
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        for dir in dirs {
            if let Some(bundle) = catalog.load_bundle(&dir) {
                info!("resource \"{}\" was added", bundle.descriptor.name);
                catalog.bundles.push(bundle);
            }
        }

        info!(
            "loaded {} resource bundle(s) from {} ({} diagnostic(s))",
            catalog.bundles.len(),
            root.display(),
            catalog.diagnostics.len()
        );
        catalog
    }

    fn report(&mut self, err: LoadError) {
        warn!("{err}");
        self.diagnostics.push(err);
    }

    fn load_bundle(&mut self, dir: &Path) -> Option<ResourceBundle> {
        let folder = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("loading resource \"{folder}\"");

        let context_path = dir.join(DESCRIPTOR_FILE);
        if !context_path.is_file() {
            self.report(LoadError::MissingDescriptor { bundle: folder });
            return None;
        }

        let raw: RawContext = match fs::read_to_string(&context_path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
        {
            Ok(raw) => raw,
            Err(reason) => {
                self.report(LoadError::MalformedDescriptor { bundle: folder, reason });
                return None;
            }
        };

        let name = if raw.resource_name == AS_DIRECTORY { folder.clone() } else { raw.resource_name };

        let idle_path = dir.join(&raw.idle);
        let idle = match decode_frames(&idle_path) {
            Ok(frames) => frames,
            Err(e) => {
                debug!("{e}");
                self.report(LoadError::MissingRequiredAsset { bundle: folder, path: idle_path });
                return None;
            }
        };

        let (wall_hit_path, wall_hit) = self.load_optional(dir, &folder, "wallhit", raw.wallhit.as_deref());
        let (corner_hit_path, corner_hit) = self.load_optional(dir, &folder, "cornerhit", raw.cornerhit.as_deref());

        let reset_animation_on_hit = raw.reset_animation.unwrap_or_else(|| {
            info!("resource \"{folder}\" has no resetAnimation, defaulting to false");
            false
        });

        let descriptor = ResourceDescriptor {
            name: name.clone(),
            idle_path,
            wall_hit_path,
            corner_hit_path,
            reset_animation_on_hit,
        };
        let art = ArtSet::from_frames(name, idle, wall_hit, corner_hit, reset_animation_on_hit);
        Some(ResourceBundle { descriptor, art })
    }

    /// Resolve + decode an optional reaction; any failure just disables it.
    fn load_optional(
        &mut self,
        dir: &Path,
        folder: &str,
        key: &'static str,
        file: Option<&str>,
    ) -> (Option<PathBuf>, Option<Vec<image::RgbaImage>>) {
        let Some(file) = file else {
            self.report(LoadError::MissingOptionalAsset { bundle: folder.to_string(), key });
            return (None, None);
        };
        let path = dir.join(file);
        match decode_frames(&path) {
            Ok(frames) => (Some(path), Some(frames)),
            Err(e) => {
                debug!("{e}");
                self.report(LoadError::MissingOptionalAsset { bundle: folder.to_string(), key });
                (None, None)
            }
        }
    }

    pub fn bundles(&self) -> &[ResourceBundle] {
        &self.bundles
    }

    pub fn get(&self, index: usize) -> Option<&ResourceBundle> {
        self.bundles.get(index)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&ResourceBundle> {
        self.bundles.iter().find(|b| b.descriptor.name == name)
    }

    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<&ResourceBundle> {
        self.bundles.choose(rng)
    }

    pub fn diagnostics(&self) -> &[LoadError] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
