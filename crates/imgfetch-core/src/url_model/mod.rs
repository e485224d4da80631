//! URL modeling and filename derivation.
//!
//! Maps a URL string to the name its body is saved under. Pure: no I/O and
//! no inspection of the response, so the extension is a guess from the URL
//! alone.

mod path;
mod sanitize;

pub use path::{parse_url, path_segments};
pub use sanitize::{sanitize_filename, truncate_to_boundary, NAME_MAX};

/// Name used when the URL path has no usable segment at all.
pub const DEFAULT_FILENAME: &str = "default_image.jpg";

/// Extension appended to names without one.
pub const DEFAULT_EXTENSION: &str = ".jpg";

const FALLBACK_PREFIX: &str = "image_";

/// A derived filename and whether it came from the fallback rule rather than
/// the URL's last path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    pub name: String,
    pub generated: bool,
}

/// Derives the filename for saving the body fetched from `url`.
///
/// Uses the last path segment. When it is empty (path ends in `/` or is
/// bare), falls back to `image_<last non-empty segment>.jpg`, or
/// [`DEFAULT_FILENAME`] if the path has none. A name without `.` gets
/// [`DEFAULT_EXTENSION`] appended.
///
/// # Examples
///
/// - `derive_filename("https://example.com/cat.jpg")` → `"cat.jpg"`
/// - `derive_filename("https://example.com/photos/raw")` → `"raw.jpg"`
/// - `derive_filename("https://example.com/gallery/")` → `"image_gallery.jpg"`
/// - `derive_filename("https://example.com/")` → `"default_image.jpg"`
pub fn derive_filename(url: &str) -> String {
    derive_name(url).name
}

/// Like [`derive_filename`], also reporting whether the name was generated.
pub fn derive_name(url: &str) -> DerivedName {
    let segments = path_segments(url);
    match segments
        .last()
        .map(|s| sanitize_filename(s))
        .filter(|s| !s.is_empty())
    {
        Some(name) => DerivedName {
            name: with_default_extension(name),
            generated: false,
        },
        None => DerivedName {
            name: with_default_extension(fallback_filename(&segments)),
            generated: true,
        },
    }
}

/// Generated name for URLs whose final segment is empty.
fn fallback_filename(segments: &[String]) -> String {
    let room = NAME_MAX - FALLBACK_PREFIX.len() - DEFAULT_EXTENSION.len();
    segments
        .iter()
        .rev()
        .map(|s| sanitize_filename(s))
        .find(|s| !s.is_empty())
        .map(|s| {
            format!(
                "{}{}{}",
                FALLBACK_PREFIX,
                truncate_to_boundary(&s, room),
                DEFAULT_EXTENSION
            )
        })
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

fn with_default_extension(name: String) -> String {
    if name.contains('.') {
        return name;
    }
    let stem = truncate_to_boundary(&name, NAME_MAX - DEFAULT_EXTENSION.len());
    format!("{}{}", stem, DEFAULT_EXTENSION)
}
