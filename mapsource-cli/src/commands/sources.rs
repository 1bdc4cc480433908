//! Sources command - list the registered map sources.

use mapsource::scale::{mpp_to_scale, supported_resolutions};
use mapsource::source::MapSourceRegistry;

/// One row of the sources table.
fn describe(registry: &MapSourceRegistry) -> Vec<String> {
    registry
        .iter()
        .map(|source| {
            let info = source.info();
            let resolutions = supported_resolutions(info.provider_type);
            let range = match (resolutions.first(), resolutions.last()) {
                (Some(min), Some(max)) => {
                    let lo = mpp_to_scale(*min, info.provider_type).map(|s| s.value());
                    let hi = mpp_to_scale(*max, info.provider_type).map(|s| s.value());
                    format!(
                        "{}-{} m/px (scale {}-{})",
                        min,
                        max,
                        lo.unwrap_or_default(),
                        hi.unwrap_or_default()
                    )
                }
                _ => "none".to_string(),
            };
            format!(
                "{:>3}  {:<20} {:<26} {}x{} px  {:<5} {}",
                info.unique_id,
                info.name,
                info.label,
                info.tile_size_x(),
                info.tile_size_y(),
                info.draw_mode.to_string(),
                range
            )
        })
        .collect()
}

/// Run the sources command.
pub fn run(registry: &MapSourceRegistry) {
    println!(" ID  NAME                 LABEL                      TILE        DRAW  RESOLUTIONS");
    for line in describe(registry) {
        println!("{}", line);
    }
}
