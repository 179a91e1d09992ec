//! Index key normalization and case-insensitive path resolution.
//!
//! Index keys are paths relative to the index root, joined with `/`,
//! normalized to Unicode NFC and lowercased. This makes `Foo/Bar.JPG` and
//! `foo/bar.jpg` the same key on every platform.
//!
//! # Background
//!
//! macOS uses NFD (Decomposed) normalization for file paths, while Windows
//! and Linux typically use NFC (Composed) normalization:
//!
//! - NFC: `café.jpg` - 'é' is U+00E9 (single code point)
//! - NFD: `café.jpg` - 'e' U+0065 + combining acute accent U+0301
//!
//! # Example
//!
//! ```
//! use mediadex::scanner::path_utils::{index_key, relative_to};
//! use std::path::Path;
//!
//! let rel = relative_to(Path::new("/photos"), Path::new("/photos/2023/IMG_1.JPG")).unwrap();
//! assert_eq!(index_key(&rel), "2023/img_1.jpg");
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// Normalize a path string to NFC (Composed) form.
#[must_use]
pub fn normalize_path_str(s: &str) -> String {
    s.nfc().collect()
}

/// Fold a single name or path string into index-key form (NFC + lowercase).
#[must_use]
pub fn fold_case(s: &str) -> String {
    normalize_path_str(s).to_lowercase()
}

/// Render a relative path with `/` separators, keeping the on-disk
/// spelling of every component (case and Unicode form alike).
///
/// Non-UTF-8 components are converted lossily.
#[must_use]
pub fn display_key(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// The index key for a path already made relative to the index root.
#[must_use]
pub fn index_key(relative: &Path) -> String {
    fold_case(&display_key(relative))
}

/// The folder part of a `/`-separated key. Files at the root have folder `""`.
#[must_use]
pub fn parent_key(key: &str) -> &str {
    key.rsplit_once('/').map_or("", |(parent, _)| parent)
}

/// Express `path` relative to `base`, inserting `..` where `path` lies
/// outside `base`.
///
/// Both paths should be absolute. Returns `None` when they share no common
/// root (e.g. different drive prefixes on Windows).
#[must_use]
pub fn relative_to(base: &Path, path: &Path) -> Option<PathBuf> {
    if let Ok(stripped) = path.strip_prefix(base) {
        return Some(stripped.to_path_buf());
    }

    let base_parts: Vec<Component<'_>> = base.components().collect();
    let path_parts: Vec<Component<'_>> = path.components().collect();

    let common = base_parts
        .iter()
        .zip(path_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    // Paths must at least share their root/prefix to be comparable
    let has_root = base_parts
        .first()
        .is_some_and(|c| matches!(c, Component::RootDir | Component::Prefix(_)));
    if common == 0 && has_root {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in &base_parts[common..] {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    Some(relative)
}

/// Case-insensitive path resolution with directory listings cached.
///
/// Each directory is listed once per resolver. Listings go stale if the
/// tree changes, so a resolver should live no longer than one walk.
#[derive(Debug, Default)]
pub struct PathResolver {
    // directory -> folded name -> on-disk names (sorted)
    listings: HashMap<PathBuf, HashMap<String, Vec<String>>>,
}

impl PathResolver {
    /// Create a resolver with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate `relative` under `root`.
    ///
    /// Each component is matched against its directory listing, preferring
    /// an exact name over a folded one. The returned path carries the
    /// on-disk spelling, also on case-insensitive filesystems.
    pub fn resolve(&mut self, root: &Path, relative: &str) -> Option<PathBuf> {
        let mut current = root.to_path_buf();
        for part in relative.split('/').filter(|p| !p.is_empty()) {
            if part == ".." {
                current.pop();
                continue;
            }

            let candidates = self.listing(&current)?.get(&fold_case(part))?;
            let name = candidates
                .iter()
                .find(|name| name.as_str() == part)
                .or_else(|| candidates.first())?;
            current.push(name);
        }
        Some(current)
    }

    /// Number of directories listed so far.
    #[must_use]
    pub fn cached_dirs(&self) -> usize {
        self.listings.len()
    }

    /// Forget every cached listing.
    pub fn clear(&mut self) {
        self.listings.clear();
    }

    fn listing(&mut self, dir: &Path) -> Option<&HashMap<String, Vec<String>>> {
        if !self.listings.contains_key(dir) {
            let mut by_folded: HashMap<String, Vec<String>> = HashMap::new();
            for entry in fs::read_dir(dir).ok()?.flatten() {
                let name = entry.file_name().to_string_lossy().into_owned();
                by_folded.entry(fold_case(&name)).or_default().push(name);
            }
            for names in by_folded.values_mut() {
                names.sort();
            }
            self.listings.insert(dir.to_path_buf(), by_folded);
        }
        self.listings.get(dir)
    }
}
