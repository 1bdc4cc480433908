//! Rendering boundary for style-driven map sources.
//!
//! The engine itself is a black box behind [`StyleRenderer`]: it loads a
//! style file and draws a Web Mercator box into premultiplied RGBA.
//! [`StyleSource`] adapts it for callers that think in lat/lon and want a
//! plain RGB image back.
//!
//! ```text
//! LatLon corners ──► MercatorBounds ──► StyleRenderer::render
//!                                              │
//!                           RawRender (premultiplied RGBA)
//!                                              │
//!                                              ▼
//!                        RenderOutcome::Painted(RgbImage) / NotPainted / …
//! ```
//!
//! Output is always EPSG:3857.

mod renderer;
mod style;

pub use renderer::{MercatorBounds, RawRender, StyleInfo, StyleRenderer};
pub use style::{default_buffer_size, unpremultiply, RenderError, RenderOutcome, StyleSource};
