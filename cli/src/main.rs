//! Command-line front end for a vehicle inventory service.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vehicle_core::config::parse_timeout_secs;
use vehicle_core::{FilterCriteria, Vehicle, VehicleConfig, VehicleError, VehicleManager};

#[derive(Parser)]
#[command(name = "vehicle-manager")]
#[command(version, about = "Query and edit a remote vehicle inventory", long_about = None)]
struct Cli {
    /// Inventory service base URL [default: $VEHICLES_API_URL or the public
    /// test endpoint]
    #[arg(long)]
    url: Option<String>,

    /// Per-request timeout in seconds [default: $VEHICLES_API_TIMEOUT_SECS or 5]
    #[arg(long, value_parser = parse_timeout_secs)]
    timeout: Option<u64>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every vehicle
    List,

    /// List vehicles whose fields equal every KEY=VALUE criterion
    ///
    /// Values are read as JSON when they parse, otherwise as strings:
    /// `year=2021` is an integer, `name=Toyota` a string, `name='"2021"'`
    /// the string "2021".
    Filter {
        #[arg(value_parser = parse_criterion)]
        criteria: Vec<(String, Value)>,
    },

    /// Show one vehicle
    Get { id: i64 },

    /// Create a vehicle
    Add(VehicleArgs),

    /// Replace an existing vehicle
    Update {
        id: i64,
        #[command(flatten)]
        vehicle: VehicleArgs,
    },

    /// Delete a vehicle
    Delete { id: i64 },

    /// Distance in metres between two vehicles
    Distance { id1: i64, id2: i64 },

    /// The vehicle closest to the given one
    Nearest { id: i64 },
}

#[derive(Args)]
struct VehicleArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    model: String,
    #[arg(long)]
    year: i64,
    #[arg(long)]
    color: String,
    #[arg(long)]
    price: i64,
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,
    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,
}

impl VehicleArgs {
    fn into_vehicle(self, id: Option<i64>) -> Vehicle {
        Vehicle {
            name: self.name,
            model: self.model,
            year: self.year,
            color: self.color,
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
            id,
        }
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn parse_criterion(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Environment settings with any command-line flags applied on top.
fn resolve_config(
    base: VehicleConfig,
    url: Option<String>,
    timeout: Option<u64>,
) -> VehicleConfig {
    let mut config = base;
    if let Some(url) = url {
        config.base_url = url;
    }
    if let Some(secs) = timeout {
        config.timeout_secs = secs;
    }
    config
}

/// Exit status 2 for requests rejected before reaching the service, 1 for
/// everything else.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<VehicleError>() {
        Some(e) if e.is_client_side() => 2,
        _ => 1,
    }
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let base = VehicleConfig::from_env().context("failed to read configuration")?;
    let config = resolve_config(base, cli.url, cli.timeout);
    debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "connecting");
    let manager = VehicleManager::new(&config);

    match cli.command {
        Commands::List => print_json(&manager.list_vehicles()?),
        Commands::Filter { criteria } => {
            let criteria: FilterCriteria = criteria.into_iter().collect();
            print_json(&manager.filter_vehicles(&criteria)?)
        }
        Commands::Get { id } => print_json(&manager.get_vehicle(id)?),
        Commands::Add(args) => print_json(&manager.add_vehicle(&args.into_vehicle(None))?),
        Commands::Update { id, vehicle } => {
            print_json(&manager.update_vehicle(&vehicle.into_vehicle(Some(id)))?)
        }
        Commands::Delete { id } => {
            manager
                .delete_vehicle(id)
                .with_context(|| format!("failed to delete vehicle {id}"))?;
            print_json(&Value::Null)
        }
        Commands::Distance { id1, id2 } => print_json(&manager.get_distance(id1, id2)?),
        Commands::Nearest { id } => print_json(&manager.get_nearest_vehicle(id)?),
    }
}
