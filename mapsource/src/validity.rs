//! Downloaded file validity checks.
//!
//! Tile servers often answer a bad request with `200 OK` and an HTML error
//! page, and an interrupted transfer can leave a truncated image behind. The
//! checks here look at the file's content to decide whether it is a genuine
//! tile image before it is admitted into the cache.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use image::ImageFormat;
use tracing::debug;

/// Number of leading bytes inspected when sniffing a file.
const SNIFF_LEN: u64 = 64;

/// JPEG end-of-image marker.
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// PNG `IEND` chunk type plus its fixed CRC.
const PNG_IEND: [u8; 8] = [0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82];

/// The kind of file a caller expects to find on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Jpeg,
    Png,
    Gif,
    /// Any raster format a tile server is known to emit.
    Image,
}

impl FileKind {
    fn matches(self, format: ImageFormat) -> bool {
        match self {
            FileKind::Jpeg => format == ImageFormat::Jpeg,
            FileKind::Png => format == ImageFormat::Png,
            FileKind::Gif => format == ImageFormat::Gif,
            FileKind::Image => matches!(
                format,
                ImageFormat::Jpeg
                    | ImageFormat::Png
                    | ImageFormat::Gif
                    | ImageFormat::Bmp
                    | ImageFormat::Tiff
                    | ImageFormat::WebP
            ),
        }
    }
}

/// Check applied to a downloaded file before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidityPolicy {
    /// Accept whatever the server returned.
    None,
    /// Require a complete raster tile (see [`check_map_file`]).
    #[default]
    MapTile,
    /// Require a specific file kind (see [`is_valid_file`]).
    Kind(FileKind),
}

impl ValidityPolicy {
    /// Returns true when the file at `path` passes this policy.
    pub fn check(&self, path: &Path) -> bool {
        match self {
            ValidityPolicy::None => true,
            ValidityPolicy::MapTile => check_map_file(path),
            ValidityPolicy::Kind(kind) => is_valid_file(path, *kind),
        }
    }
}

/// Checks whether a file is of the expected kind.
///
/// Every kind is recognizable from its leading bytes, so the sniffed format
/// decides alone. Unreadable files and content matching no known format are
/// rejected whatever their extension says.
pub fn is_valid_file(path: &Path, expected: FileKind) -> bool {
    match sniff_format(path) {
        Ok(Some(format)) => expected.matches(format),
        Ok(None) => {
            debug!(path = %path.display(), ?expected, "File content matches no known format");
            false
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "File unreadable");
            false
        }
    }
}

/// Checks whether a file looks like a valid, complete map tile.
///
/// Rejects empty files, HTML/XML error pages, anything that does not sniff
/// as a raster image, and JPEG/PNG files missing their end marker.
pub fn check_map_file(path: &Path) -> bool {
    match inspect_map_file(path) {
        Ok(valid) => valid,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Map file unreadable");
            false
        }
    }
}

fn inspect_map_file(path: &Path) -> io::Result<bool> {
    let head = read_head(path)?;
    if head.is_empty() {
        debug!(path = %path.display(), "Map file is empty");
        return Ok(false);
    }

    if looks_like_markup(&head) {
        debug!(path = %path.display(), "Map file is a markup error page");
        return Ok(false);
    }

    let Ok(format) = image::guess_format(&head) else {
        debug!(path = %path.display(), "Map file is not a recognized image");
        return Ok(false);
    };

    if !FileKind::Image.matches(format) {
        return Ok(false);
    }

    let complete = match format {
        ImageFormat::Jpeg => ends_with(path, &JPEG_EOI)?,
        ImageFormat::Png => ends_with(path, &PNG_IEND)?,
        _ => true,
    };
    if !complete {
        debug!(path = %path.display(), ?format, "Map file is truncated");
    }
    Ok(complete)
}

fn read_head(path: &Path) -> io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
    Ok(head)
}

fn sniff_format(path: &Path) -> io::Result<Option<ImageFormat>> {
    let head = read_head(path)?;
    Ok(image::guess_format(&head).ok())
}

fn looks_like_markup(head: &[u8]) -> bool {
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    let text = String::from_utf8_lossy(&head[start..]).to_ascii_lowercase();
    text.starts_with("<!doctype") || text.starts_with("<html") || text.starts_with("<?xml")
}

fn ends_with(path: &Path, marker: &[u8]) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    if len < marker.len() as u64 {
        return Ok(false);
    }

    // Some encoders pad after the end marker; allow a little slack.
    let window = (marker.len() as u64 + 16).min(len);
    file.seek(SeekFrom::Start(len - window))?;
    let mut tail = Vec::with_capacity(window as usize);
    file.read_to_end(&mut tail)?;
    Ok(tail.windows(marker.len()).any(|w| w == marker))
}
