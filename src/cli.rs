use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use tracing::{debug, error, info, warn};

use crate::{
    apis::{Geocoder, JosmRemote, RemoteCommand},
    error::Result,
    filter::{DEFAULT_MIN_AREA_SQM, IndustrialFilter},
    geojson::{DEFAULT_OUTPUT, ExportMetadata, export_geojson},
    overpass::{OverpassClient, build_query},
    settings::Settings,
    types::BoundingBox,
};

/// Filter OSM industrial areas by size
#[derive(Debug, Parser)]
#[command(name = "industrial-filter", version)]
pub struct Args {
    /// Minimum area in square meters
    #[arg(long, default_value_t = DEFAULT_MIN_AREA_SQM)]
    pub min_area: f64,
    /// Bounding box as "south,west,north,east"
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<String>,
    /// Country name (e.g. "Netherlands", "Germany", "United States")
    #[arg(long)]
    pub country: Option<String>,
    /// Output GeoJSON filename
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// Attempt to open in JOSM after export
    #[arg(long)]
    pub josm: bool,
    /// Run a global query without asking
    #[arg(short, long)]
    pub yes: bool,
    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub verbose: bool,
}

/// How a run ended. Maps onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failure,
}

impl From<RunOutcome> for ExitCode {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Success => ExitCode::SUCCESS,
            RunOutcome::Failure => ExitCode::FAILURE,
        }
    }
}

/// Runs one query end to end. `input` answers the global query prompt.
pub fn run(args: Args, mut input: impl BufRead) -> Result<RunOutcome> {
    if args.country.is_some() && args.bbox.is_some() {
        error!("Please specify either --country OR --bbox, not both");
        return Ok(RunOutcome::Failure);
    }

    if args.country.is_none() && args.bbox.is_none() && !args.yes {
        warn!("No geographic filter specified. This will query globally and may be very slow.");
        if !confirm("Continue anyway? (y/N): ", &mut input)? {
            return Ok(RunOutcome::Success);
        }
    }

    let mut bbox = match args.bbox.as_deref().map(str::parse::<BoundingBox>) {
        Some(Ok(bbox)) => Some(bbox),
        Some(Err(e)) => {
            error!("Invalid bounding box format: {}", e);
            return Ok(RunOutcome::Failure);
        }
        None => None,
    };

    let settings = Settings::load(args.config.as_deref())?;

    if let Some(country) = &args.country {
        match Geocoder::new(&settings).resolve(country) {
            Some(found) => bbox = Some(found),
            None => {
                error!("Could not find bounding box for country: {}", country);
                return Ok(RunOutcome::Failure);
            }
        }
    }

    match (&args.country, &bbox) {
        (Some(country), _) => info!("Querying industrial areas in {}", country),
        (None, Some(bbox)) => info!("Querying industrial areas in bounding box: {}", bbox.to_overpass_filter()),
        (None, None) => info!("Querying industrial areas worldwide"),
    }
    let query = build_query(bbox.as_ref(), settings.overpass_server_timeout);
    debug!("Query: {}", query);

    let response = OverpassClient::from_settings(&settings).fetch(&query);
    let filtered = IndustrialFilter::new(args.min_area).filter_response(&response);
    if filtered.features.is_empty() {
        error!("No industrial areas found or all were too small");
        return Ok(RunOutcome::Failure);
    }

    let metadata = ExportMetadata {
        min_area_sqm: args.min_area,
        country: args.country.clone(),
        bbox,
        osm_base: response.osm_base().map(str::to_string),
    };
    let Some(path) = export_geojson(&filtered.features, &metadata, &args.output)? else {
        return Ok(RunOutcome::Failure);
    };

    if args.josm {
        JosmRemote::new(&settings).open(&RemoteCommand::for_export(bbox.as_ref(), &path));
    }

    Ok(RunOutcome::Success)
}

fn confirm(prompt: &str, input: &mut impl BufRead) -> Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
