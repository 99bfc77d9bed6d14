use request_map::output::Output;
use request_map::{load, search_of, BoundingRegion, GeoPoint, HomeRegion, MapDataAssembler};
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::{info, warn, Level};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "request_map",
    about = "Assembles map view data for geotagged delivery requests"
)]
struct Opt {
    /// Geo data bundle with `requests` and `drivingClusterRequests`, `-` reads stdin
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Query string, e.g. `request=ABC123`
    #[structopt(short, long)]
    query: Option<String>,

    /// Page location, its query portion is used when --query is absent
    #[structopt(short, long)]
    url: Option<String>,

    /// Home region as `sw_lon,sw_lat,ne_lon,ne_lat`
    #[structopt(long)]
    home_bounds: Option<BoundingRegion>,

    /// Home center as `lon,lat`
    #[structopt(long)]
    home_center: Option<GeoPoint>,

    /// Print a GeoJSON FeatureCollection instead of the view model
    #[structopt(short, long)]
    geojson: bool,

    /// Pretty-print the view model
    #[structopt(short, long)]
    pretty: bool,

    /// Log debug events to stderr
    #[structopt(short, long)]
    verbose: bool,
}

impl Opt {
    fn home(&self) -> HomeRegion {
        let default = HomeRegion::default();
        HomeRegion {
            bounds: self.home_bounds.unwrap_or(default.bounds),
            center: self.home_center.unwrap_or(default.center),
        }
    }

    fn query(&self) -> &str {
        match (&self.query, &self.url) {
            (Some(query), _) => query.as_str(),
            (None, Some(url)) => search_of(url),
            (None, None) => "",
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let level = if opt.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let data = if opt.input.as_os_str() == "-" {
        load(io::stdin())?
    } else {
        load(File::open(&opt.input)?)?
    };

    let home = opt.home();
    if !home.bounds.contains(&home.center) {
        warn!("home center lies outside the home bounds");
    }
    let assembler = MapDataAssembler::new(home, Default::default());
    let model = assembler.assemble(&data, opt.query());
    if let Some(code) = &model.request_code_not_found {
        info!("request with code {} is not found", code);
    }

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if opt.geojson {
        model.write_geojson(&mut writer)?;
    } else {
        model.write_json(&mut writer, opt.pretty)?;
    }
    Ok(())
}
