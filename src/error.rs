// Error types. `Error` is what the window / art decoding can fail with;
// `LoadError` is a resource-bundle diagnostic: the catalog logs it, keeps it,
// and moves on to the next bundle.
use std::fmt::{self, Display};
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    WindowInit(String),                            // Creating the window failed
    WindowUpdate(String),                          // Updating the window buffer failed
    ImageDecode { path: PathBuf, reason: String }, // Reading/decoding an art file failed
    EmptyAnimation(PathBuf),                       // Animated file decoded to zero frames
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::ImageDecode { path, reason } => {
                write!(f, "Image decode error ({}): {reason}", path.display())
            }
            Error::EmptyAnimation(path) => {
                write!(f, "Animation has no frames: {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {}

/// Why a bundle (or one of its optional reactions) was dropped during the scan.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// No `context.json` in the bundle directory. Bundle skipped.
    MissingDescriptor { bundle: String },
    /// The idle image is absent or undecodable. Bundle skipped.
    MissingRequiredAsset { bundle: String, path: PathBuf },
    /// wallhit/cornerhit absent or undecodable. Only that reaction is disabled.
    MissingOptionalAsset { bundle: String, key: &'static str },
    /// Descriptor unreadable, not JSON, or a required key is absent / wrong shape.
    MalformedDescriptor { bundle: String, reason: String },
    /// The resources root itself could not be listed.
    UnreadableRoot { path: PathBuf, reason: String },
}

impl LoadError {
    /// True when the whole bundle was dropped (as opposed to one reaction).
    pub fn skips_bundle(&self) -> bool {
        !matches!(self, LoadError::MissingOptionalAsset { .. })
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingDescriptor { bundle } => {
                write!(f, "resource \"{bundle}\" has no context, skipping")
            }
            LoadError::MissingRequiredAsset { bundle, path } => write!(
                f,
                "resource \"{bundle}\" has no usable idle image ({}), which is required, skipping",
                path.display()
            ),
            LoadError::MissingOptionalAsset { bundle, key } => {
                write!(f, "resource \"{bundle}\" has no {key} image, reaction disabled")
            }
            LoadError::MalformedDescriptor { bundle, reason } => {
                write!(f, "resource \"{bundle}\" context is malformed: {reason}")
            }
            LoadError::UnreadableRoot { path, reason } => {
                write!(f, "cannot read resources directory {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_optional_assets_keep_the_bundle() {
        let optional = LoadError::MissingOptionalAsset { bundle: "cat".into(), key: "wallhit" };
        let missing = LoadError::MissingDescriptor { bundle: "cat".into() };
        assert!(!optional.skips_bundle());
        assert!(missing.skips_bundle());
        assert!(optional.to_string().contains("wallhit"));
    }
}
