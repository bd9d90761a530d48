//! `layout-day`: lay out a day of calendar events from the command line.
//!
//! Reads a JSON array of `{"start": .., "end": ..}` records (minutes from the
//! start of the day) and prints either the column assignments or the pixel
//! placements as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use day_layout::{lay_out, EventRecord, Interval, LayoutEngine, PlacementSink, TrackConfig};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "layout-day",
    version,
    about = "Lay out a day of calendar events into side-by-side columns"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the column assignment of every event
    Layout {
        /// JSON file of event records (reads stdin if omitted or "-")
        input: Option<PathBuf>,
    },
    /// Print pixel placements for every event
    Render {
        /// JSON file of event records (reads stdin if omitted or "-")
        input: Option<PathBuf>,

        #[command(flatten)]
        track: TrackArgs,
    },
    /// Render the built-in sample day
    Demo {
        #[command(flatten)]
        track: TrackArgs,
    },
}

#[derive(Args)]
struct TrackArgs {
    /// Track width in pixels [default: 600]
    #[arg(long)]
    width: Option<f64>,

    /// Left margin in pixels [default: 10]
    #[arg(long)]
    margin: Option<f64>,

    /// Space between a box and its content in pixels [default: 5]
    #[arg(long)]
    gutter: Option<f64>,
}

impl TrackArgs {
    fn config(&self) -> TrackConfig {
        let defaults = TrackConfig::default();
        TrackConfig {
            width: self.width.unwrap_or(defaults.width),
            margin: self.margin.unwrap_or(defaults.margin),
            gutter: self.gutter.unwrap_or(defaults.gutter),
        }
    }
}

const SAMPLE_DAY: [(i64, i64); 4] = [(30, 150), (540, 600), (560, 620), (610, 670)];

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Layout { input } => {
            let intervals = parse_intervals(&read_records(input.as_deref())?)?;
            print_json(&lay_out(&intervals), cli.pretty)
        }
        Commands::Render { input, track } => {
            let intervals = parse_intervals(&read_records(input.as_deref())?)?;
            render(intervals, track.config(), cli.pretty)
        }
        Commands::Demo { track } => {
            let records: Vec<_> = SAMPLE_DAY
                .iter()
                .map(|&(start, end)| EventRecord::new(start, end))
                .collect();
            render(parse_intervals(&records)?, track.config(), cli.pretty)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_records(input: Option<&Path>) -> Result<Vec<EventRecord>> {
    let (source, text) = match input {
        Some(path) if path != Path::new("-") => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), text)
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            ("stdin".to_string(), text)
        }
    };

    let records: Vec<EventRecord> = serde_json::from_str(&text)
        .with_context(|| format!("{source} is not a JSON array of event records"))?;
    info!(%source, records = records.len(), "read event records");
    Ok(records)
}

/// All-or-nothing: the first bad record aborts the run.
fn parse_intervals(records: &[EventRecord]) -> Result<Vec<Interval>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .to_interval()
                .with_context(|| format!("record {index} is invalid"))
        })
        .collect()
}

fn render(intervals: Vec<Interval>, config: TrackConfig, pretty: bool) -> Result<()> {
    let sink = PlacementSink::new(config).context("invalid track dimensions")?;
    let mut engine = LayoutEngine::new(sink);
    let rendered = engine.set_intervals(intervals);
    debug!(rendered, "placements computed");
    print_json(engine.sink().placements(), pretty)
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
