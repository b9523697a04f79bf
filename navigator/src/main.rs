// main.rs - Headless driver for the navigation controller.
// Replays a scripted session and writes one JSON frame record per line.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use poi_navigator::{
    Catalog, Category, NavigationController, NavigatorBuilder, NavigatorConfig, Replay, Scenario,
};

/// CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Catalog JSON; the bundled demo catalog is used when omitted
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Controller config JSON
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scenario JSON with timed actions
    #[arg(short, long, conflicts_with = "category")]
    pub scenario: Option<PathBuf>,

    /// Select this category at time zero
    #[arg(long, value_enum)]
    pub category: Option<Category>,

    /// Point of interest to select within --category
    #[arg(long, requires = "category")]
    pub poi: Option<String>,

    /// Seconds of session time to simulate
    #[arg(long, default_value = "6.0")]
    pub seconds: f32,

    /// Frames per second
    #[arg(long, default_value = "60")]
    pub fps: f32,

    /// Output path for JSON-lines frames; use "-" for stdout
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Pace frames in wall-clock time instead of as fast as possible
    #[arg(long)]
    pub realtime: bool,

    /// Print the catalog and exit
    #[arg(long)]
    pub list: bool,
}

fn load_catalog(args: &Args) -> Result<Catalog> {
    match &args.catalog {
        Some(path) => Catalog::from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Catalog::demo().context("Failed to parse bundled demo catalog"),
    }
}

fn load_config(args: &Args) -> Result<NavigatorConfig> {
    match &args.config {
        Some(path) => NavigatorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(NavigatorConfig::default()),
    }
}

fn load_scenario(args: &Args) -> Result<Scenario> {
    if let Some(path) = &args.scenario {
        return Scenario::from_file(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()));
    }
    Ok(match args.category {
        Some(category) => Scenario::select(category, args.poi.clone()),
        None => Scenario::default(),
    })
}

fn print_catalog(catalog: &Catalog) {
    println!("home: {:?}", catalog.home());
    for category in catalog.categories() {
        let pois = catalog.points_in(category);
        println!("{category} ({} points)", pois.len());
        for poi in pois {
            println!("  {} [{} route points]", poi.name, poi.points.len());
        }
    }
}

fn open_output(args: &Args) -> Result<Box<dyn Write>> {
    if args.output.as_os_str() == "-" {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    }
    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

async fn replay(
    nav: &mut NavigationController,
    mut replay: Replay,
    realtime: bool,
    out: &mut dyn Write,
) -> Result<u64> {
    let mut ticker = realtime.then(|| {
        let mut interval = tokio::time::interval(replay.frame_dt());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        interval
    });

    let mut written = 0u64;
    loop {
        if let Some(interval) = ticker.as_mut() {
            interval.tick().await;
        }
        let Some(record) = replay.step(nav)? else {
            break;
        };
        serde_json::to_writer(&mut *out, &record)?;
        out.write_all(b"\n")?;
        written += 1;

        if written % 60 == 0 {
            info!(
                "frame {} t={:.2}s transitioning={} reveal={:.2}",
                record.output.frame,
                record.output.time,
                record.output.is_transitioning,
                record.output.reveal.progress
            );
        }
    }
    out.flush()?;
    Ok(written)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");

    let catalog = load_catalog(&args)?;
    info!(
        "Catalog: {} points of interest across {} categories",
        catalog.poi_count(),
        catalog.categories().count()
    );

    if args.list {
        print_catalog(&catalog);
        return Ok(());
    }

    if let (Some(category), Some(name)) = (args.category, args.poi.as_deref()) {
        if catalog.find(category, name).is_none() {
            warn!("{name:?} is not in {category}; the camera will use the category view");
        }
    }

    let config = load_config(&args)?;
    let scenario = load_scenario(&args)?;
    if scenario.is_empty() {
        info!("No scenario or --category given; showing the idle orbit only");
    }
    let replay_plan = Replay::new(scenario, args.fps, args.seconds)?;
    if replay_plan.total_frames() == 0 {
        bail!("nothing to simulate: --seconds {} at --fps {}", args.seconds, args.fps);
    }

    let mut nav = NavigatorBuilder::from_config(config).build(catalog)?;
    let mut out = open_output(&args)?;

    let start = std::time::Instant::now();
    let frames = replay(&mut nav, replay_plan, args.realtime, &mut *out).await?;
    nav.shutdown();

    info!("Wrote {frames} frames in {:?}", start.elapsed());
    Ok(())
}
