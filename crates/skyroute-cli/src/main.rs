use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use skyroute_lib::{
    load_network, plan_delivery, DeliveryRequest, Graph, RouteRegistry,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Drone delivery routing utilities")]
struct Cli {
    /// Path to the delivery network description (JSON).
    #[arg(long)]
    network: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a single delivery between two nodes.
    Route {
        /// Origin node identifier.
        #[arg(long = "from")]
        from: String,
        /// Destination node identifier.
        #[arg(long = "to")]
        to: String,
        /// Drone autonomy in energy units.
        #[arg(long, default_value_t = 50.0)]
        capacity: f64,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Replay a batch of deliveries and report route usage analytics.
    Simulate {
        /// JSON file with delivery pairs: [["S1", "T1"], ...].
        #[arg(long)]
        deliveries: PathBuf,
        /// Drone autonomy in energy units.
        #[arg(long, default_value_t = 50.0)]
        capacity: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let graph = load_network(&cli.network)
        .with_context(|| format!("failed to load network from {}", cli.network.display()))?;

    match cli.command {
        Command::Route {
            from,
            to,
            capacity,
            format,
        } => handle_route(&graph, &from, &to, capacity, format),
        Command::Simulate {
            deliveries,
            capacity,
        } => handle_simulate(&graph, &deliveries, capacity),
    }
}

fn handle_route(
    graph: &Graph,
    from: &str,
    to: &str,
    capacity: f64,
    format: OutputFormat,
) -> Result<()> {
    let mut registry = RouteRegistry::new();
    let request = DeliveryRequest::new(from, to, capacity);
    let plan = plan_delivery(graph, &mut registry, &request)
        .with_context(|| format!("failed to plan delivery from {from} to {to}"))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => {
            println!(
                "Route: {} (cost {:.2}, {} hops)",
                plan.steps.join(" -> "),
                plan.total_cost,
                plan.hop_count()
            );
            if !plan.charging_stops.is_empty() {
                println!("Charging stops: {}", plan.charging_stops.join(", "));
            }
            for leg in plan.legs(graph)? {
                let note = if leg.recharged { ", recharged" } else { "" };
                println!(
                    "- {} -> {} (cost {:.2}, energy {:.2}{note})",
                    leg.from, leg.to, leg.cost, leg.energy_after
                );
            }
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct DeliveryBatch(Vec<(String, String)>);

fn handle_simulate(graph: &Graph, deliveries: &Path, capacity: f64) -> Result<()> {
    let text = std::fs::read_to_string(deliveries)
        .with_context(|| format!("failed to read deliveries from {}", deliveries.display()))?;
    let batch: DeliveryBatch = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse deliveries from {}", deliveries.display()))?;

    let mut registry = RouteRegistry::new();
    let mut failures = 0usize;
    for (from, to) in &batch.0 {
        let request = DeliveryRequest::new(from, to, capacity);
        match plan_delivery(graph, &mut registry, &request) {
            Ok(_) => {}
            Err(error) => {
                failures += 1;
                eprintln!("delivery {from} -> {to} failed: {error}");
            }
        }
    }

    println!("Routes by usage (most frequent first):");
    let ranked: Vec<_> = registry.ranked().collect();
    for route in ranked.iter().rev() {
        println!("- {route}");
    }

    let stats = registry.stats();
    println!(
        "{} unique routes, {} trips, {:.2} mean uses per route, {} failed deliveries",
        stats.unique_routes, stats.total_trips, stats.mean_frequency, failures
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
