//! Tile addressing.
//!
//! Converts UTM coordinates into discrete [`TileAddress`] values on a
//! provider's tile grid and back into tile centers.

mod address;
mod transform;

pub use address::TileAddress;
pub use transform::{coord_to_tile_address, tile_address_to_center, IndexRounding, TileGrid};
