use std::{fs::File, io::{BufReader, Read}, path::Path, str::FromStr};

use activity_tracker_lib::{Coordinate, TrackPoint};
use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};

/// Reads every track point of a GPX file, segments flattened in file order.
pub fn read_gpx(path: impl AsRef<Path>) -> anyhow::Result<Vec<TrackPoint>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open GPX file {:?}", path))?;
    let track_points = parse_gpx(BufReader::new(file))?;
    tracing::info!("Read {} track points from {:?}", track_points.len(), path);
    Ok(track_points)
}

/// Points without a timestamp are an error, a replay cannot place them in time.
pub fn parse_gpx<R: Read>(reader: R) -> anyhow::Result<Vec<TrackPoint>> {
    let gpx = gpx::read(reader).map_err(|err| anyhow!("Failed to parse GPX: {err:?}"))?;

    let mut track_points: Vec<TrackPoint> = Vec::new();
    for track in gpx.tracks {
        for segment in track.segments {
            for point in segment.points {
                let position = Coordinate::from(point.point());
                let Some(time) = point.time else {
                    return Err(anyhow!("Track point {:?} has no timestamp", position));
                };
                let time = time.format().map_err(|err| anyhow!("Failed to format GPX time: {err:?}"))?;
                let timestamp: DateTime<Utc> = DateTime::from_str(&time).with_context(|| format!("Invalid GPX time {time}"))?;

                track_points.push(TrackPoint::new(position, timestamp));
            }
        }
    }

    Ok(track_points)
}
