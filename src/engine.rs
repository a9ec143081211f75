use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{Error, Result};
use crate::events::Event;
use crate::models::NetworkConfig;
use crate::random::{RandomSource, StdRandomSource};
use crate::routing::{Route, RouteTable};
use crate::state::SimulationContext;
use crate::station::Station;
use crate::stats::SimulationSnapshot;

const ROUTING_MASS_TOLERANCE: f64 = 1e-9;

/// Owns the stations and the shared run context, and drives the event loop
/// until the stopping policy triggers or no events remain.
pub struct SimulationDriver {
    stations: Vec<Station>,
    ctx: SimulationContext,
    horizon: Option<f64>,
    max_finished: Option<u64>,
}

impl SimulationDriver {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let rng = Box::new(StdRandomSource::from_seed_option(config.seed));
        Self::with_random_source(config, rng)
    }

    pub fn with_random_source(
        config: &NetworkConfig,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        validate_config(config)?;

        let ids: HashMap<&str, usize> = config
            .stations
            .iter()
            .enumerate()
            .map(|(idx, station)| (station.name.as_str(), idx))
            .collect();
        let stations = config
            .stations
            .iter()
            .enumerate()
            .map(|(idx, station)| {
                let routes = station
                    .routes
                    .iter()
                    .map(|route| Route {
                        target: ids[route.to.as_str()],
                        probability: route.probability,
                    })
                    .collect();
                Station::new(idx, station, RouteTable::new(routes))
            })
            .collect::<Vec<_>>();
        let ctx = SimulationContext::new(stations.len(), rng);

        Ok(Self {
            stations,
            ctx,
            horizon: config.simulation_time,
            max_finished: config.max_clients,
        })
    }

    pub fn run(mut self) -> Result<SimulationSnapshot> {
        debug!("starting run with {} stations", self.stations.len());
        for station in &self.stations {
            station.seed_initial_arrival(&mut self.ctx)?;
        }

        let mut processed = 0u64;
        loop {
            let Some(scheduled) = self.ctx.scheduler.pop_next() else {
                break;
            };
            if let Some(horizon) = self.horizon {
                // An event past the horizon never fires; the clock lands on
                // exactly the configured window.
                if scheduled.time > horizon {
                    self.ctx.scheduler.advance_to(horizon)?;
                    break;
                }
            }
            self.ctx.scheduler.advance_to(scheduled.time)?;

            let station = &mut self.stations[scheduled.event.station()];
            match scheduled.event {
                Event::Arrival { customer, .. } => {
                    station.handle_arrival(customer, &mut self.ctx)?;
                }
                Event::Departure { customer, .. } => {
                    station.handle_departure(customer, &mut self.ctx)?;
                }
            }
            processed += 1;

            if let Some(max) = self.max_finished {
                if self.ctx.stats.finished() >= max {
                    break;
                }
            }
        }

        let elapsed = self.ctx.scheduler.clock();
        for station in &mut self.stations {
            station.flush_state_time(elapsed, &mut self.ctx.stats)?;
        }
        debug!("run ended at t={:.3} after {} events", elapsed, processed);

        let names: Vec<String> = self
            .stations
            .iter()
            .map(|station| station.name.clone())
            .collect();
        Ok(self.ctx.stats.snapshot(elapsed, &names))
    }
}

pub fn run_simulation(config: &NetworkConfig) -> Result<SimulationSnapshot> {
    SimulationDriver::new(config)?.run()
}

pub fn run_simulation_with_source(
    config: &NetworkConfig,
    rng: Box<dyn RandomSource>,
) -> Result<SimulationSnapshot> {
    SimulationDriver::with_random_source(config, rng)?.run()
}

fn validate_config(config: &NetworkConfig) -> Result<()> {
    if config.stations.is_empty() {
        return Err(Error::EmptyStations);
    }
    let mut names = HashSet::new();
    for station in &config.stations {
        if station.name.trim().is_empty() {
            return Err(Error::BlankStationName);
        }
        if !names.insert(station.name.as_str()) {
            return Err(Error::DuplicateStationName(station.name.clone()));
        }
        if station.servers == 0 {
            return Err(Error::InvalidServerCount(station.name.clone()));
        }
        if let Some(window) = station.arrival {
            if !window.is_valid() {
                return Err(Error::InvalidArrivalWindow(station.name.clone()));
            }
        }
        if !station.service.is_valid() {
            return Err(Error::InvalidServiceWindow(station.name.clone()));
        }
    }
    for station in &config.stations {
        let mut mass = 0.0;
        for route in &station.routes {
            if !names.contains(route.to.as_str()) {
                return Err(Error::UnknownRouteTarget {
                    station: station.name.clone(),
                    target: route.to.clone(),
                });
            }
            if route.probability < 0.0 {
                return Err(Error::InvalidRouteProbability {
                    station: station.name.clone(),
                    probability: route.probability,
                });
            }
            mass += route.probability;
        }
        if mass > 1.0 + ROUTING_MASS_TOLERANCE {
            return Err(Error::RoutingMassExceedsOne {
                station: station.name.clone(),
                sum: mass,
            });
        }
    }
    if !config.stations.iter().any(|s| s.arrival.is_some()) {
        return Err(Error::NoArrivalSource);
    }
    if config.max_clients.is_none() && config.simulation_time.is_none() {
        return Err(Error::NoStopCondition);
    }
    Ok(())
}
