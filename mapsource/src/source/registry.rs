//! Built-in map source catalog.
//!
//! Each Terraserver provider type is exposed as its own source with a fixed
//! registry id. The registry is built once at startup and read-only after.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{MapSourceError, MapSourceResult};
use crate::scale::ProviderType;
use crate::tile::IndexRounding;

use super::terraserver::TerraserverMapSource;
use super::types::MapSource;

/// The built-in map sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapSourceConfig {
    /// Terraserver aerial photography (DOQ).
    TerraserverAerial,
    /// Terraserver topographic maps (DRG).
    TerraserverTopo,
    /// Terraserver urban area imagery.
    TerraserverUrban,
}

impl MapSourceConfig {
    /// All built-in sources in registry order.
    pub fn all() -> [MapSourceConfig; 3] {
        [
            MapSourceConfig::TerraserverAerial,
            MapSourceConfig::TerraserverTopo,
            MapSourceConfig::TerraserverUrban,
        ]
    }

    /// Registry id.
    pub fn unique_id(&self) -> u8 {
        match self {
            MapSourceConfig::TerraserverAerial => 1,
            MapSourceConfig::TerraserverTopo => 2,
            MapSourceConfig::TerraserverUrban => 4,
        }
    }

    pub fn provider_type(&self) -> ProviderType {
        match self {
            MapSourceConfig::TerraserverAerial => ProviderType::AERIAL,
            MapSourceConfig::TerraserverTopo => ProviderType::TOPO,
            MapSourceConfig::TerraserverUrban => ProviderType::URBAN,
        }
    }

    /// Short name used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            MapSourceConfig::TerraserverAerial => "terraserver-aerial",
            MapSourceConfig::TerraserverTopo => "terraserver-topo",
            MapSourceConfig::TerraserverUrban => "terraserver-urban",
        }
    }

    /// Parse a short name, case-insensitively.
    pub fn from_name(name: &str) -> Option<MapSourceConfig> {
        Self::all()
            .into_iter()
            .find(|config| config.name().eq_ignore_ascii_case(name))
    }

    /// Parse a registry id or a short name.
    pub fn from_key(key: &str) -> Option<MapSourceConfig> {
        let key = key.trim();
        match key.parse::<u8>() {
            Ok(id) => Self::all()
                .into_iter()
                .find(|config| config.unique_id() == id),
            Err(_) => Self::from_name(key),
        }
    }

    /// Instantiate the source, optionally against a different host.
    pub fn build(&self, host: Option<&str>) -> Arc<dyn MapSource> {
        self.build_with(host, IndexRounding::default())
    }

    /// Instantiate the source with an explicit tile index rounding policy.
    pub fn build_with(&self, host: Option<&str>, rounding: IndexRounding) -> Arc<dyn MapSource> {
        let source = TerraserverMapSource::new(self.unique_id(), self.provider_type())
            .with_rounding(rounding);
        match host {
            Some(host) => Arc::new(source.with_host(host)),
            None => Arc::new(source),
        }
    }
}

/// Sources keyed by registry id.
#[derive(Default)]
pub struct MapSourceRegistry {
    sources: BTreeMap<u8, Arc<dyn MapSource>>,
}

impl MapSourceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in source.
    pub fn builtin() -> Self {
        Self::builtin_with_host(None)
    }

    /// A registry holding every built-in source, pointed at `host` if given.
    pub fn builtin_with_host(host: Option<&str>) -> Self {
        Self::builtin_with(host, IndexRounding::default())
    }

    /// A registry holding every built-in source with the given host override
    /// and rounding policy.
    pub fn builtin_with(host: Option<&str>, rounding: IndexRounding) -> Self {
        let mut registry = Self::new();
        for config in MapSourceConfig::all() {
            registry
                .sources
                .insert(config.unique_id(), config.build_with(host, rounding));
        }
        debug!(count = registry.len(), ?rounding, "Registered built-in map sources");
        registry
    }

    /// Adds a source under its own id.
    pub fn register(&mut self, source: Arc<dyn MapSource>) -> MapSourceResult<()> {
        let id = source.info().unique_id;
        if self.sources.contains_key(&id) {
            return Err(MapSourceError::DuplicateSourceId(id));
        }
        self.sources.insert(id, source);
        Ok(())
    }

    /// Looks up a source by registry id.
    pub fn get(&self, id: u8) -> Option<Arc<dyn MapSource>> {
        self.sources.get(&id).cloned()
    }

    /// Looks up a source by numeric id or by name (case-insensitive).
    pub fn find(&self, key: &str) -> MapSourceResult<Arc<dyn MapSource>> {
        let key = key.trim();
        let found = match key.parse::<u8>() {
            Ok(id) => self.get(id),
            Err(_) => self
                .sources
                .values()
                .find(|source| source.info().name.eq_ignore_ascii_case(key))
                .cloned(),
        };
        found.ok_or_else(|| MapSourceError::UnknownSource(key.to_string()))
    }

    /// Sources in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn MapSource>> {
        self.sources.values()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_ids_match_provider_types() {
        for config in MapSourceConfig::all() {
            assert_eq!(config.unique_id(), config.provider_type().value());
        }
    }

    #[test]
    fn test_config_from_name() {
        assert_eq!(
            MapSourceConfig::from_name("terraserver-topo"),
            Some(MapSourceConfig::TerraserverTopo)
        );
        assert_eq!(
            MapSourceConfig::from_name("TERRASERVER-URBAN"),
            Some(MapSourceConfig::TerraserverUrban)
        );
        assert_eq!(MapSourceConfig::from_name("bing"), None);
    }

    #[test]
    fn test_config_from_key() {
        assert_eq!(
            MapSourceConfig::from_key("4"),
            Some(MapSourceConfig::TerraserverUrban)
        );
        assert_eq!(
            MapSourceConfig::from_key(" terraserver-aerial "),
            Some(MapSourceConfig::TerraserverAerial)
        );
        assert_eq!(MapSourceConfig::from_key("3"), None);
        assert_eq!(MapSourceConfig::from_key("osm"), None);
    }

    #[test]
    fn test_build_uses_host() {
        let source = MapSourceConfig::TerraserverAerial.build(Some("localhost:8080"));
        let request = source.request_for_tile(&crate::tile::TileAddress::new(
            crate::scale::ScaleLevel::new(12).unwrap(),
            1,
            2,
            18,
        ));
        assert_eq!(request.host, "localhost:8080");
        assert_eq!(source.info().name, MapSourceConfig::TerraserverAerial.name());
    }

    #[test]
    fn test_builtin_with_rounding() {
        let registry = MapSourceRegistry::builtin_with(None, IndexRounding::Floor);
        let coord = crate::coord::GeoCoordinate::utm(10, -100.0, 100.0);
        for source in registry.iter() {
            assert_eq!(source.info().grid.rounding, IndexRounding::Floor);
        }
        let urban = registry.get(4).unwrap();
        assert_eq!(urban.coord_to_tile_address(&coord, 1.0, 1.0).unwrap().x(), -1);
    }

    #[test]
    fn test_builtin_registry() {
        let registry = MapSourceRegistry::builtin();
        assert_eq!(registry.len(), 3);
        let ids: Vec<u8> = registry.iter().map(|s| s.info().unique_id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(
            registry.get(4).unwrap().info().provider_type,
            ProviderType::URBAN
        );
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn test_find_by_id_and_name() {
        let registry = MapSourceRegistry::builtin();
        assert_eq!(registry.find("2").unwrap().info().name, "terraserver-topo");
        assert_eq!(
            registry.find(" Terraserver-Aerial ").unwrap().info().unique_id,
            1
        );
    }

    #[test]
    fn test_find_unknown() {
        let registry = MapSourceRegistry::builtin();
        assert_eq!(
            registry.find("google").err(),
            Some(MapSourceError::UnknownSource("google".to_string()))
        );
        assert!(registry.find("3").is_err());
    }

    #[test]
    fn test_register_rejects_duplicate_id() {
        let mut registry = MapSourceRegistry::builtin();
        let dup = Arc::new(TerraserverMapSource::new(2, ProviderType::URBAN));
        assert_eq!(
            registry.register(dup).err(),
            Some(MapSourceError::DuplicateSourceId(2))
        );
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_register_custom_source() {
        let mut registry = MapSourceRegistry::new();
        assert!(registry.is_empty());
        registry
            .register(Arc::new(TerraserverMapSource::new(40, ProviderType::URBAN)))
            .unwrap();
        assert_eq!(registry.get(40).unwrap().info().label, "Terraserver Urban Areas");
    }
}
