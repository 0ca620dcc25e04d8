//! `gmaps2gpx` command line tool.
//!
//! Converts a Google Maps directions link, or shared text containing one,
//! into a `.gpx` file in the output directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use serde::Serialize;

use gmaps2gpx::config::{
    FetcherConfig, DEFAULT_DIRECTIONS_ENDPOINT, DEFAULT_ELEVATION_ENDPOINT,
    DEFAULT_ELEVATION_SAMPLE_LIMIT,
};
use gmaps2gpx::{gpx, RouteFetcher};

#[derive(Parser, Debug)]
#[command(name = "gmaps2gpx", version, about = "Convert a Google Maps directions link into a GPX track")]
struct Cli {
    /// Directions link, or text containing one
    input: String,

    /// Google Maps Platform API key
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Directory the .gpx file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Maximum locations per elevation request
    #[arg(long, default_value_t = DEFAULT_ELEVATION_SAMPLE_LIMIT)]
    samples: usize,

    #[arg(long, env = "GMAPS2GPX_DIRECTIONS_ENDPOINT", default_value = DEFAULT_DIRECTIONS_ENDPOINT)]
    directions_endpoint: String,

    #[arg(long, env = "GMAPS2GPX_ELEVATION_ENDPOINT", default_value = DEFAULT_ELEVATION_ENDPOINT)]
    elevation_endpoint: String,

    /// Print a JSON report instead of the output path
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    path: PathBuf,
    name: &'a str,
    points: usize,
    distance_km: f64,
    elevation_degraded: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = FetcherConfig::new(cli.api_key);
    config.elevation_sample_limit = cli.samples;
    config.directions_endpoint = cli.directions_endpoint;
    config.elevation_endpoint = cli.elevation_endpoint;

    let fetcher = RouteFetcher::new(config)?;
    let converted = fetcher.convert_text(&cli.input).await?;
    let path = gpx::write_file(&cli.output_dir, &converted.track)?;
    info!(
        "wrote '{}' ({} points, {:.1} km) to {}",
        converted.track.name,
        converted.track.points.len(),
        converted.distance_km,
        path.display()
    );

    if cli.json {
        let report = Report {
            path,
            name: &converted.track.name,
            points: converted.track.points.len(),
            distance_km: converted.distance_km,
            elevation_degraded: converted.elevation_degraded,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if converted.elevation_degraded {
            eprintln!("warning: elevation data unavailable, altitudes are set to 0");
        }
        println!("{}", path.display());
    }
    Ok(())
}
