pub mod format;
pub mod geojson_util;
pub mod gpx_util;
pub mod live;
pub mod replay;

/// Default playback speed for `live`.
pub const DEFAULT_SPEED: f64 = 10.;
/// Default display refresh for `live`.
pub const DEFAULT_TICK_MS: u64 = 1000;

#[cfg(test)]
pub(crate) const HARBOUR_LOOP_GPX: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/harbour_loop.gpx");
