use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config;
use crate::error::{Error, Result};
use crate::models::{CapacityPolicy, NetworkConfig, StationConfig, Window};

#[derive(Parser, Debug)]
#[command(name = "qnet-sim", about = "Discrete-event simulator for queueing networks")]
pub struct Args {
    /// Network config file (.toml or .json); replaces the single-queue flags
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub servers: Option<usize>,
    #[arg(long)]
    pub capacity: Option<usize>,
    #[arg(long, value_enum, default_value_t = CapacityPolicyArg::WaitingRoom)]
    pub capacity_policy: CapacityPolicyArg,
    /// Inter-arrival bounds as "low,high"
    #[arg(long)]
    pub arrival: Option<String>,
    /// Service bounds as "low,high"
    #[arg(long)]
    pub service: Option<String>,
    /// Simulated-time horizon
    #[arg(long)]
    pub time: Option<f64>,
    /// Stop once this many customers are finished (completed or lost)
    #[arg(long)]
    pub max_clients: Option<u64>,
    #[arg(long, help = "Seed the random source; omit for entropy-based draws")]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CapacityPolicyArg {
    TotalOccupancy,
    WaitingRoom,
}

impl From<CapacityPolicyArg> for CapacityPolicy {
    fn from(value: CapacityPolicyArg) -> Self {
        match value {
            CapacityPolicyArg::TotalOccupancy => CapacityPolicy::TotalOccupancy,
            CapacityPolicyArg::WaitingRoom => CapacityPolicy::WaitingRoom,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|e| Error::Cli(e.to_string()))
}

pub fn build_config(args: &Args) -> Result<NetworkConfig> {
    if let Some(path) = &args.config {
        let mut config = config::load_config(path)?;
        if args.seed.is_some() {
            config.seed = args.seed;
        }
        return Ok(config);
    }

    let servers = args
        .servers
        .ok_or_else(|| Error::Cli("--servers is required without --config".to_string()))?;
    let arrival = args
        .arrival
        .as_deref()
        .ok_or_else(|| Error::Cli("--arrival is required without --config".to_string()))?;
    let service = args
        .service
        .as_deref()
        .ok_or_else(|| Error::Cli("--service is required without --config".to_string()))?;

    let station = StationConfig {
        name: "queue".to_string(),
        servers,
        capacity: args.capacity,
        capacity_policy: args.capacity_policy.into(),
        arrival: Some(parse_window(arrival)?),
        service: parse_window(service)?,
        routes: Vec::new(),
    };

    Ok(NetworkConfig {
        stations: vec![station],
        max_clients: args.max_clients,
        simulation_time: args.time,
        seed: args.seed,
    })
}

pub fn parse_window(input: &str) -> Result<Window> {
    let invalid = || Error::Cli(format!("invalid window '{}': expected low,high", input));
    let mut parts = input.split(',');
    let low = parts.next().unwrap_or("").trim();
    let high = parts.next().unwrap_or("").trim();
    if parts.next().is_some() || low.is_empty() || high.is_empty() {
        return Err(invalid());
    }
    let low: f64 = low.parse().map_err(|_| invalid())?;
    let high: f64 = high.parse().map_err(|_| invalid())?;
    Ok(Window::new(low, high))
}
