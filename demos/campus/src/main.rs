//! campus — command-line front end for the wayfinder routing crates.
//!
//! Loads a node/way table pair (or the built-in Berkeley street grid), builds
//! the road graph and name index once, then answers one query:
//!
//! ```text
//! campus route "Sather Tower" "Cafe Strada"
//! campus route -- "-122.268,37.874" "Caffe Mediterraneum"
//! campus suggest caf --limit 5
//! campus lookup "cafe strada" --json
//! ```

mod logging;
mod network;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use wf_core::{CoreError, GeoPoint, NavConfig, NodeId};
use wf_names::{Location, NameIndex, build_name_index};
use wf_spatial::loader::{load_nodes_csv, load_ways_csv};
use wf_spatial::{AStarRouter, Maneuver, RoadGraph, Router, SearchLimits, build_graph_with, directions};

use logging::{LogFormat, init_logging};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Route between places and search place names")]
struct Cli {
    /// Node table CSV (`id,lon,lat,tags`).  Requires `--ways`.
    #[arg(long, requires = "ways")]
    nodes: Option<PathBuf>,

    /// Way table CSV (`id,nodes,tags`).  Requires `--nodes`.
    #[arg(long, requires = "nodes")]
    ways: Option<PathBuf>,

    /// JSON configuration file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only route over drivable `highway` classes.
    #[arg(long)]
    highway_filter: bool,

    /// Per-query search budget in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Route between two places, each a name or a `lon,lat` pair.
    Route { from: String, to: String },
    /// List place names starting with a prefix.
    Suggest {
        prefix: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show every location with exactly this name.
    Lookup { name: String },
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RouteReport {
    from:        GeoPoint,
    to:          GeoPoint,
    nodes:       Vec<NodeId>,
    total_miles: f64,
    maneuvers:   Vec<Maneuver>,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let config = load_config(&cli)?;
    let (nodes, ways) = match (&cli.nodes, &cli.ways) {
        (Some(n), Some(w)) => (
            load_nodes_csv(n).with_context(|| format!("failed to load nodes from {}", n.display()))?,
            load_ways_csv(w).with_context(|| format!("failed to load ways from {}", w.display()))?,
        ),
        _ => {
            info!("using built-in campus network");
            network::tables()
        }
    };

    let graph = build_graph_with(&nodes, &ways, &config.graph);
    let index = build_name_index(&nodes);

    match &cli.command {
        Command::Route { from, to } => handle_route(&graph, &index, &config, from, to, cli.json),
        Command::Suggest { prefix, limit } => {
            let names = index.prefix_search_limit(prefix, *limit);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                names.iter().for_each(|n| println!("{n}"));
            }
            Ok(())
        }
        Command::Lookup { name } => {
            let hits = index.exact_lookup(name);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("no location named {name:?}");
            } else {
                for loc in &hits {
                    println!("{} ({}) at {:.5}, {:.5}", loc.name, loc.id, loc.lon, loc.lat);
                }
            }
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<NavConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => NavConfig::default(),
    };
    if cli.highway_filter {
        config.graph.highway_filter = true;
    }
    if cli.timeout_ms.is_some() {
        config.search.timeout_ms = cli.timeout_ms;
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<NavConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn handle_route(
    graph: &RoadGraph,
    index: &NameIndex,
    config: &NavConfig,
    from: &str,
    to: &str,
    json: bool,
) -> Result<()> {
    let start = resolve_place(index, from)?;
    let dest = resolve_place(index, to)?;

    let limits = SearchLimits::from_config(&config.search);
    let route = AStarRouter
        .route_between(graph, start, dest, &limits)
        .with_context(|| format!("no route from {from:?} to {to:?}"))?;
    let maneuvers = directions(graph, &route.nodes)?;

    if json {
        let report = RouteReport {
            from: start,
            to: dest,
            nodes: route.nodes,
            total_miles: route.total_miles,
            maneuvers,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Route from {from} to {to} ({:.3} miles):", route.total_miles);
    if maneuvers.is_empty() {
        println!("  You are already there.");
    }
    for (i, m) in maneuvers.iter().enumerate() {
        println!("  {:>2}. {m}", i + 1);
    }
    Ok(())
}

/// A `lon,lat` pair, or the first location with this exact name.
fn resolve_place(index: &NameIndex, place: &str) -> Result<GeoPoint> {
    match place.parse::<GeoPoint>() {
        Ok(point) => return Ok(point),
        Err(err @ CoreError::InvalidCoordinate { .. }) => return Err(err.into()),
        // Not a coordinate pair; treat it as a name.
        Err(CoreError::Parse(_)) => {}
    }
    let hits = index.exact_lookup(place);
    let Some(Location { lon, lat, .. }) = hits.first() else {
        let suggestions = index.prefix_search_limit(place, 5);
        if suggestions.is_empty() {
            bail!("unknown place {place:?}");
        }
        bail!("unknown place {place:?}; did you mean: {}", suggestions.join(", "));
    };
    if hits.len() > 1 {
        info!(place, matches = hits.len(), "several locations share this name; using the first");
    }
    Ok(GeoPoint::new(*lon, *lat))
}
