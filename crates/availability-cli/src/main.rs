//! `avail` CLI — compute meeting availability from the command line.
//!
//! Every subcommand reads one JSON document (from `--input` or stdin) and
//! writes one JSON document (to `--output` or stdout).
//!
//! ## Usage
//!
//! ```sh
//! # Expand one participant's rules into concrete ranges
//! avail build -i alice.json
//!
//! # Same, bucketed by local calendar date
//! avail build --by-day -i alice.json
//!
//! # Intersect range lists: [[{start,end},...], [{start,end},...]]
//! avail intersect -i lists.json
//!
//! # Remove busy time: {"source": [...], "excluded": [...]}
//! avail subtract --merge -i subtract.json
//!
//! # Full pipeline over several participants and their busy time
//! avail -v bookable -i team.json --pretty
//! ```

mod logging;
mod request;

use std::collections::BTreeMap;
use std::io::{self, Read};

use anyhow::{Context, Result};
use availability_engine::availability::parse_timezone;
use availability_engine::{
    build_date_ranges, find_bookable_ranges, group_by_date, intersect, merge_overlapping,
    subtract, DateRange,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::logging::LogFormat;
use crate::request::{BookableRequest, BuildRequest, IntersectRequest, SubtractRequest};

#[derive(Parser)]
#[command(
    name = "avail",
    version,
    about = "Compute meeting availability from working-hours rules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    log_format: LogFormat,
}

/// Input/output options shared by every subcommand.
#[derive(Args)]
struct Io {
    /// Input JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a rule set into concrete ranges: {timezone, date_from, date_to, rules}
    Build {
        #[command(flatten)]
        io: Io,
        /// Group the ranges by local calendar date
        #[arg(long)]
        by_day: bool,
    },
    /// Intersect range lists: [[range, ...], ...]
    Intersect {
        #[command(flatten)]
        io: Io,
        /// Coalesce overlapping or adjacent output ranges
        #[arg(long)]
        merge: bool,
    },
    /// Remove excluded ranges from source ranges: {source, excluded}
    Subtract {
        #[command(flatten)]
        io: Io,
        /// Coalesce overlapping or adjacent output ranges
        #[arg(long)]
        merge: bool,
    },
    /// Bookable ranges for all participants: {date_from, date_to, participants, busy}
    Bookable {
        #[command(flatten)]
        io: Io,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format)?;

    match cli.command {
        Commands::Build { io, by_day } => {
            let request: BuildRequest = read_request(io.input.as_deref())?;
            let tz = parse_timezone(&request.timezone)?;
            let ranges = build_date_ranges(&request.rules, &tz, request.date_from, request.date_to)
                .context("Failed to build date ranges")?;
            info!(ranges = ranges.len(), timezone = %tz, "Built date ranges");

            if by_day {
                let grouped: BTreeMap<String, Vec<DateRange>> = group_by_date(ranges, &tz)
                    .into_iter()
                    .map(|(date, ranges)| (date.to_string(), ranges))
                    .collect();
                write_json(&io, &grouped)?;
            } else {
                write_json(&io, &ranges)?;
            }
        }
        Commands::Intersect { io, merge } => {
            let lists: IntersectRequest = read_request(io.input.as_deref())?;
            let ranges = intersect(&lists);
            info!(lists = lists.len(), ranges = ranges.len(), "Intersected range lists");
            write_json(&io, &maybe_merge(ranges, merge))?;
        }
        Commands::Subtract { io, merge } => {
            let request: SubtractRequest = read_request(io.input.as_deref())?;
            let ranges = subtract(&request.source, &request.excluded);
            info!(
                source = request.source.len(),
                excluded = request.excluded.len(),
                ranges = ranges.len(),
                "Subtracted excluded ranges"
            );
            write_json(&io, &maybe_merge(ranges, merge))?;
        }
        Commands::Bookable { io } => {
            let request: BookableRequest = read_request(io.input.as_deref())?;
            let result = find_bookable_ranges(
                &request.participants,
                &request.busy,
                request.date_from,
                request.date_to,
            )
            .context("Failed to compute bookable ranges")?;
            info!(ranges = result.ranges.len(), "Computed bookable ranges");
            write_json(&io, &result)?;
        }
    }

    Ok(())
}

fn maybe_merge(ranges: Vec<DateRange>, merge: bool) -> Vec<DateRange> {
    if merge {
        merge_overlapping(&ranges)
    } else {
        ranges
    }
}

fn read_request<T: serde::de::DeserializeOwned>(path: Option<&str>) -> Result<T> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse request JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(io: &Io, value: &T) -> Result<()> {
    let mut content = if io.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    content.push('\n');
    write_output(io.output.as_deref(), &content)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
