//! Style-driven rendering adapter.

use std::path::{Path, PathBuf};

use image::RgbImage;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::coord::LatLon;

use super::renderer::{MercatorBounds, RawRender, StyleRenderer};

/// Errors from loading a style.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("failed to load style {path}: {reason}")]
    LoadError { path: PathBuf, reason: String },
}

/// Result of one render call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// The engine drew into the image.
    Painted(RgbImage),
    /// Nothing in the style intersects the box.
    NotPainted,
    /// No style is loaded.
    LoadError(String),
    /// The engine failed or returned a malformed buffer.
    RenderError(String),
}

impl RenderOutcome {
    pub fn is_painted(&self) -> bool {
        matches!(self, RenderOutcome::Painted(_))
    }
}

/// Default render buffer when the style does not set one.
pub fn default_buffer_size(width: u32, height: u32) -> u32 {
    width + height / 4
}

/// Wraps a [`StyleRenderer`] with lat/lon input and straight RGB output.
pub struct StyleSource<R: StyleRenderer> {
    renderer: R,
    loaded: bool,
}

impl<R: StyleRenderer> StyleSource<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            loaded: false,
        }
    }

    /// Whether a style has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Loads a style for a `width` × `height` output.
    pub fn load(&mut self, path: &Path, width: u32, height: u32) -> Result<(), RenderError> {
        self.loaded = false;
        let style = self
            .renderer
            .load_style(path, width, height)
            .map_err(|reason| {
                warn!(path = %path.display(), reason = %reason, "Style load failed");
                RenderError::LoadError {
                    path: path.to_path_buf(),
                    reason,
                }
            })?;

        if style.buffer_size == 0 {
            self.renderer
                .set_buffer_size(default_buffer_size(width, height));
        }

        info!(
            path = %path.display(),
            layers = style.layer_count,
            width,
            height,
            "Style loaded"
        );
        self.loaded = true;
        Ok(())
    }

    /// Renders the geographic box between two corners.
    pub fn render_lat_lon(&mut self, top_left: LatLon, bottom_right: LatLon) -> RenderOutcome {
        if !self.loaded {
            return RenderOutcome::LoadError("no style loaded".to_string());
        }

        let bounds = MercatorBounds::from_corners(top_left, bottom_right);
        debug!(
            min_x = bounds.min_x,
            min_y = bounds.min_y,
            max_x = bounds.max_x,
            max_y = bounds.max_y,
            "Rendering box"
        );

        let raw = match self.renderer.render(&bounds) {
            Ok(raw) => raw,
            Err(reason) => return RenderOutcome::RenderError(reason),
        };

        if !raw.painted {
            return RenderOutcome::NotPainted;
        }

        match unpremultiply(&raw) {
            Some(image) => RenderOutcome::Painted(image),
            None => RenderOutcome::RenderError(format!(
                "buffer holds {} bytes, expected {} for {}x{}",
                raw.rgba.len(),
                raw.width as usize * raw.height as usize * 4,
                raw.width,
                raw.height
            )),
        }
    }
}

/// Converts premultiplied RGBA to straight RGB, dropping alpha.
///
/// Fully transparent pixels become black.
pub fn unpremultiply(raw: &RawRender) -> Option<RgbImage> {
    let pixels = raw.width as usize * raw.height as usize;
    if raw.rgba.len() != pixels * 4 {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixels * 3);
    for px in raw.rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            let value = if alpha == 0 {
                0
            } else {
                ((channel as u32 * 255) / alpha).min(255)
            };
            rgb.push(value as u8);
        }
    }

    RgbImage::from_raw(raw.width, raw.height, rgb)
}
