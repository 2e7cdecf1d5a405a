use std::{fs::File, io::BufWriter, path::Path};

use activity_tracker_lib::Coordinate;
use anyhow::Context;
use geojson::{Feature, Geometry, JsonObject, Value};

/// The recorded path as a GeoJSON feature for a map renderer: a `LineString`,
/// a `Point` when only one position was recorded, nothing for an empty path.
pub fn path_to_feature(path: &[Coordinate], properties: Option<JsonObject>) -> Option<Feature> {
    let value = match path {
        [] => return None,
        [single] => Value::Point(position(single)),
        _ => Value::LineString(path.iter().map(position).collect()),
    };

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties,
        foreign_members: None,
    })
}

pub fn write_feature(path: impl AsRef<Path>, feature: &Feature) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), feature)
        .with_context(|| format!("Failed to write GeoJSON to {:?}", path))?;
    tracing::info!("Wrote path to {:?}", path);
    Ok(())
}

// GeoJSON positions are [longitude, latitude].
fn position(coordinate: &Coordinate) -> Vec<f64> {
    vec![coordinate.longitude, coordinate.latitude]
}
