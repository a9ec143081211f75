use serde::{Deserialize, Serialize};

pub type StationId = usize;
pub type CustomerId = u64;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NetworkConfig {
    pub stations: Vec<StationConfig>,
    #[serde(default)]
    pub max_clients: Option<u64>,
    #[serde(default)]
    pub simulation_time: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StationConfig {
    pub name: String,
    pub servers: usize,
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub capacity_policy: CapacityPolicy,
    #[serde(default)]
    pub arrival: Option<Window>,
    pub service: Window,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Window {
    pub low: f64,
    pub high: f64,
}

impl Window {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn is_valid(&self) -> bool {
        self.low >= 0.0 && self.low <= self.high
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RouteConfig {
    pub to: String,
    pub probability: f64,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CapacityPolicy {
    /// `capacity` bounds everyone admitted, waiting and in service alike.
    #[default]
    TotalOccupancy,
    /// `capacity` bounds only the waiting line; a free server always admits.
    WaitingRoom,
}
