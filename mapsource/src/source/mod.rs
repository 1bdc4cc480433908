//! Map sources.
//!
//! A [`MapSource`] knows its tile grid, maps coordinates onto tile addresses
//! and back, and composes the request for a tile. Transfers themselves go
//! through a [`TileFetcher`](crate::fetch::TileFetcher).

mod registry;
mod terraserver;
mod types;

pub use registry::{MapSourceConfig, MapSourceRegistry};
pub use terraserver::{TerraserverMapSource, TERRASERVER_HOST, TERRASERVER_TILE_SIZE};
pub use types::{DrawMode, MapSource, MapSourceInfo};
