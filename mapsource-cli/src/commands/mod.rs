//! CLI command implementations.
//!
//! - [`sources`] - List registered map sources
//! - [`tile`] - Coordinate → tile address, and tile → center
//! - [`fetch`] - Download a single tile

pub mod fetch;
pub mod sources;
pub mod tile;
