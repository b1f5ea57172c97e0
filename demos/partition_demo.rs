//! Partition a boundary document with every strategy and print the zones
//!
//! Run with `RUST_LOG=debug` to see strategy fallback decisions.

use zone_partition::*;

const BOUNDARY: &str = r#"{
    "type": "Feature",
    "geometry": {
        "type": "Polygon",
        "coordinates": [[
            [-74.05, 40.60], [-73.90, 40.60], [-73.85, 40.75],
            [-73.95, 40.85], [-74.05, 40.75], [-74.05, 40.60]
        ]]
    },
    "properties": { "name": "Demo district" }
}"#;

fn main() -> Result<()> {
    env_logger::init();

    let boundary = parse_boundary(BOUNDARY)?;
    let labels = ["Harbor", "Midtown", "Uptown", "Parkside", "Riverside"];

    if let Some(bbox) = bounding_box(&boundary) {
        println!(
            "Boundary spans {:.3} x {:.3} degrees",
            bbox.width(),
            bbox.height()
        );
    }

    for strategy in [Strategy::Auto, Strategy::Voronoi, Strategy::Organic, Strategy::Grid] {
        let config = PartitionConfigBuilder::new()
            .seed(176)
            .strategy(strategy)
            .build()?;
        let map = ZoneMap::generate(&boundary, &labels, config);

        println!(
            "\n{}: {} zones (produced by {:?})",
            strategy.name(),
            map.zone_count(),
            map.strategy_used().map(Strategy::name)
        );
        for zone in map.zones() {
            let centroid = zone.centroid().unwrap_or_default();
            println!(
                "  {:<10} {:>3} vertices, centroid ({:.4}, {:.4})",
                zone.label,
                zone.vertex_count(),
                centroid.x,
                centroid.y
            );
        }

        #[cfg(feature = "spatial-index")]
        if let Some(zone) = map.find_zone_at(DVec2::new(-73.95, 40.70)) {
            println!("  (-73.95, 40.70) falls in {}", zone.label);
        }
    }

    let zones = partition(&boundary, &labels, 176);
    println!("\n{}", zones_to_geojson(&zones)?);

    Ok(())
}
