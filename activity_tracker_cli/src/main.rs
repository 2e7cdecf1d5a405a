use std::{path::PathBuf, time::Duration};

use activity_tracker_cli::{
    format::{format_distance, format_elapsed},
    geojson_util, gpx_util,
    live::{self, LiveOptions},
    replay::{self, GpxSource, ReplayOptions},
    DEFAULT_SPEED, DEFAULT_TICK_MS,
};
use activity_tracker_lib::distance::path_distance;
use anyhow::ensure;
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "activity-tracker")]
#[command(about = "Run recorded GPX tracks through an activity session", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a GPX file on its own timestamps and print the session summary
    Replay {
        gpx_file: PathBuf,
        /// Pause whenever consecutive fixes are more than this many seconds apart
        #[arg(long)]
        auto_pause_secs: Option<i64>,
        /// Write the recorded path as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
    /// Print the length of the track in a GPX file
    Distance { gpx_file: PathBuf },
    /// Play a GPX file back in (scaled) real time, polling the session like a display would
    Live {
        gpx_file: PathBuf,
        #[arg(long, default_value_t = DEFAULT_SPEED)]
        speed: f64,
        #[arg(long, default_value_t = DEFAULT_TICK_MS)]
        tick_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info,activity_tracker_lib=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { gpx_file, auto_pause_secs, geojson } => {
            if let Some(secs) = auto_pause_secs {
                ensure!(secs > 0, "--auto-pause-secs must be positive");
            }
            let options = ReplayOptions {
                auto_pause_after: auto_pause_secs.map(TimeDelta::seconds),
            };

            let mut source = GpxSource::open(&gpx_file)?;
            let summary = replay::replay(&mut source, &options)?;

            println!("Points\t{}", summary.path.len());
            println!("Distance\t{}", format_distance(summary.distance_km));
            println!("Elapsed\t{}", format_elapsed(summary.elapsed));
            println!("Paused\t{} ({} pauses)", format_elapsed(summary.paused), summary.pauses);
            if summary.rejected > 0 || summary.dropouts > 0 {
                println!("Skipped\t{} rejected, {} dropouts", summary.rejected, summary.dropouts);
            }

            if let Some(out) = geojson {
                let properties = json!({
                    "distance_km": summary.distance_km,
                    "elapsed_s": summary.elapsed.num_seconds(),
                    "paused_s": summary.paused.num_seconds(),
                });
                let properties = properties.as_object().cloned();
                match geojson_util::path_to_feature(&summary.path, properties) {
                    Some(feature) => geojson_util::write_feature(&out, &feature)?,
                    None => tracing::warn!("No points recorded, not writing {:?}", out),
                }
            }
        },
        Commands::Distance { gpx_file } => {
            let points = gpx_util::read_gpx(&gpx_file)?;
            let path: Vec<_> = points.iter().map(|point| point.position).collect();
            println!("{}", format_distance(path_distance(&path)));
        },
        Commands::Live { gpx_file, speed, tick_ms } => {
            let points = gpx_util::read_gpx(&gpx_file)?;
            let options = LiveOptions {
                speed,
                tick: Duration::from_millis(tick_ms),
            };
            let last = live::run_live(points, options, |snapshot| {
                println!(
                    "{:?}\t{}\t{}",
                    snapshot.state,
                    format_elapsed(snapshot.elapsed),
                    format_distance(snapshot.total_distance_km)
                );
            })
            .await?;
            tracing::info!("Live playback finished after {}", format_elapsed(last.elapsed));
        },
    }

    Ok(())
}
