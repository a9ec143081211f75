use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("stations must not be empty")]
    EmptyStations,
    #[error("duplicate station name '{0}'")]
    DuplicateStationName(String),
    #[error("station name must not be blank")]
    BlankStationName,
    #[error("station '{0}' must have at least one server")]
    InvalidServerCount(String),
    #[error("station '{0}' arrival window must satisfy 0 <= low <= high")]
    InvalidArrivalWindow(String),
    #[error("station '{0}' service window must satisfy 0 <= low <= high")]
    InvalidServiceWindow(String),
    #[error("station '{station}' routes to unknown station '{target}'")]
    UnknownRouteTarget { station: String, target: String },
    #[error("station '{station}' has a route probability below zero ({probability})")]
    InvalidRouteProbability { station: String, probability: f64 },
    #[error("station '{station}' routing probabilities sum to {sum}, above 1")]
    RoutingMassExceedsOne { station: String, sum: f64 },
    #[error("no station generates external arrivals")]
    NoArrivalSource,
    #[error("no stopping condition: set max_clients and/or simulation_time")]
    NoStopCondition,
    #[error("event time {attempted} is earlier than the clock {clock}")]
    TimeReversal { clock: f64, attempted: f64 },
    #[error("negative state duration {duration} at station {station}")]
    NegativeStateDuration { station: usize, duration: f64 },
    #[error("occupancy underflow at station {station}")]
    OccupancyUnderflow { station: usize },
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
    #[error("failed to render output: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
