//! Renderer engine contract.

use std::path::Path;

use crate::coord::{to_web_mercator, LatLon};

/// A bounding box in Web Mercator meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl MercatorBounds {
    /// Projects a geographic box given by its top-left and bottom-right
    /// corners. Corners are normalized so `min <= max` on both axes.
    pub fn from_corners(top_left: LatLon, bottom_right: LatLon) -> Self {
        let (x0, y0) = to_web_mercator(top_left);
        let (x1, y1) = to_web_mercator(bottom_right);
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// What the engine reports about a loaded style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleInfo {
    /// Number of layers in the style.
    pub layer_count: usize,
    /// Buffer size in pixels set by the style, 0 when unset.
    pub buffer_size: u32,
}

/// Raw engine output.
///
/// `rgba` holds `width * height` pixels of premultiplied RGBA, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRender {
    pub width: u32,
    pub height: u32,
    /// Whether anything was drawn into the image.
    pub painted: bool,
    pub rgba: Vec<u8>,
}

/// A style-driven rendering engine.
///
/// Implementations own a single map: one style loaded at a fixed output
/// size, rendered for one box at a time.
pub trait StyleRenderer: Send {
    /// Loads a style file and sizes the output image.
    fn load_style(&mut self, path: &Path, width: u32, height: u32) -> Result<StyleInfo, String>;

    /// Sets the render buffer around the visible area, in pixels.
    fn set_buffer_size(&mut self, pixels: u32);

    /// Renders the given Web Mercator box.
    fn render(&mut self, bounds: &MercatorBounds) -> Result<RawRender, String>;
}
