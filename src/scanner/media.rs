//! Media kind classification by file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Picture extensions (lowercase, without the leading dot).
pub const PICTURE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "heic", "cr2", "png", "gif"];

/// Video extensions (lowercase, without the leading dot).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov"];

/// The two media families the index understands.
///
/// The kind selects the hashing strategy: pictures are hashed in full,
/// videos by size plus a short content prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still images, including camera raw files
    Picture,
    /// Video clips
    Video,
}

impl MediaKind {
    /// Classify a path by its lowercased extension.
    ///
    /// Returns `None` for anything outside the supported sets, including
    /// files without an extension.
    ///
    /// ```
    /// use mediadex::scanner::MediaKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(MediaKind::from_path(Path::new("IMG_0001.JPG")), Some(MediaKind::Picture));
    /// assert_eq!(MediaKind::from_path(Path::new("clip.mov")), Some(MediaKind::Video));
    /// assert_eq!(MediaKind::from_path(Path::new("notes.txt")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        Self::from_extension(&extension)
    }

    /// Classify a bare extension (no leading dot). Case-insensitive.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_lowercase();
        if PICTURE_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Picture)
        } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }

    /// Extensions belonging to this kind.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Picture => PICTURE_EXTENSIONS,
            Self::Video => VIDEO_EXTENSIONS,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Picture => write!(f, "picture"),
            Self::Video => write!(f, "video"),
        }
    }
}
