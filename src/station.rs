use std::collections::VecDeque;

use tracing::trace;

use crate::error::{Error, Result};
use crate::events::Event;
use crate::models::{CapacityPolicy, CustomerId, StationConfig, StationId, Window};
use crate::routing::{Destination, RouteTable};
use crate::state::SimulationContext;
use crate::stats::StatsAccumulator;

/// A service point with `servers` parallel servers, an optional admission
/// bound, and a FIFO waiting line. Waiting customers hold no pending event;
/// a departure elsewhere in the station starts their service.
pub struct Station {
    pub id: StationId,
    pub name: String,
    servers: usize,
    capacity: Option<usize>,
    policy: CapacityPolicy,
    arrival: Option<Window>,
    service: Window,
    routes: RouteTable,
    busy: usize,
    waiting: VecDeque<CustomerId>,
    last_event_time: f64,
}

impl Station {
    pub fn new(id: StationId, config: &StationConfig, routes: RouteTable) -> Self {
        Self {
            id,
            name: config.name.clone(),
            servers: config.servers,
            capacity: config.capacity,
            policy: config.capacity_policy,
            arrival: config.arrival,
            service: config.service,
            routes,
            busy: 0,
            waiting: VecDeque::new(),
            last_event_time: 0.0,
        }
    }

    fn occupancy(&self) -> usize {
        self.busy + self.waiting.len()
    }

    fn has_room(&self) -> bool {
        match self.policy {
            CapacityPolicy::TotalOccupancy => {
                self.capacity.map_or(true, |cap| self.occupancy() < cap)
            }
            CapacityPolicy::WaitingRoom => {
                self.busy < self.servers
                    || self.capacity.map_or(true, |cap| self.waiting.len() < cap)
            }
        }
    }

    /// Books the time since the previous event against the current occupancy
    /// level. Called before and after every occupancy change so the interval
    /// is attributed to the pre-change level.
    fn book_state_time(&mut self, now: f64, stats: &mut StatsAccumulator) -> Result<()> {
        let duration = now - self.last_event_time;
        stats.record_state_time(self.id, self.occupancy(), duration)?;
        self.last_event_time = now;
        Ok(())
    }

    /// Closes the final open interval when the run stops.
    pub fn flush_state_time(&mut self, now: f64, stats: &mut StatsAccumulator) -> Result<()> {
        self.book_state_time(now, stats)
    }

    /// Primes the renewal process: one Arrival sampled from the current
    /// clock. Driver-called once per arrival-generating station.
    pub fn seed_initial_arrival(&self, ctx: &mut SimulationContext) -> Result<()> {
        if let Some(window) = self.arrival {
            let gap = ctx.rng.uniform(window.low, window.high);
            let at = ctx.scheduler.clock() + gap;
            ctx.scheduler.schedule(
                at,
                Event::Arrival {
                    station: self.id,
                    customer: None,
                },
            )?;
        }
        Ok(())
    }

    /// `customer` is `None` for an external renewal arrival, which also
    /// re-arms the arrival process regardless of the admission outcome.
    pub fn handle_arrival(
        &mut self,
        customer: Option<CustomerId>,
        ctx: &mut SimulationContext,
    ) -> Result<()> {
        let now = ctx.scheduler.clock();
        self.book_state_time(now, &mut ctx.stats)?;
        ctx.stats.record_arrival(self.id);

        let external = customer.is_none();
        if self.has_room() {
            let id = customer.unwrap_or_else(|| ctx.new_customer(now));
            if self.busy < self.servers {
                self.busy += 1;
                self.book_state_time(now, &mut ctx.stats)?;
                let service = ctx.rng.uniform(self.service.low, self.service.high);
                ctx.scheduler.schedule(
                    now + service,
                    Event::Departure {
                        station: self.id,
                        customer: id,
                    },
                )?;
            } else {
                self.waiting.push_back(id);
                self.book_state_time(now, &mut ctx.stats)?;
            }
        } else {
            let entry_time = match customer {
                Some(id) => ctx.retire_customer(id, now),
                None => now,
            };
            ctx.stats.record_loss(self.id);
            ctx.stats.record_finished(now - entry_time);
            trace!("station {} blocked an arrival at t={:.3}", self.name, now);
        }

        if external {
            if let Some(window) = self.arrival {
                let gap = ctx.rng.uniform(window.low, window.high);
                ctx.scheduler.schedule(
                    now + gap,
                    Event::Arrival {
                        station: self.id,
                        customer: None,
                    },
                )?;
            }
        }
        Ok(())
    }

    pub fn handle_departure(
        &mut self,
        customer: CustomerId,
        ctx: &mut SimulationContext,
    ) -> Result<()> {
        let now = ctx.scheduler.clock();
        self.book_state_time(now, &mut ctx.stats)?;
        self.busy = self
            .busy
            .checked_sub(1)
            .ok_or(Error::OccupancyUnderflow { station: self.id })?;
        self.book_state_time(now, &mut ctx.stats)?;
        ctx.stats.record_completion(self.id);

        // A freed server immediately picks up the longest-waiting customer;
        // that shift leaves occupancy unchanged.
        if let Some(next) = self.waiting.pop_front() {
            self.busy += 1;
            let service = ctx.rng.uniform(self.service.low, self.service.high);
            ctx.scheduler.schedule(
                now + service,
                Event::Departure {
                    station: self.id,
                    customer: next,
                },
            )?;
        }

        match self.routes.resolve(ctx.rng.uniform01()) {
            Destination::Station(target) => {
                ctx.scheduler.schedule(
                    now,
                    Event::Arrival {
                        station: target,
                        customer: Some(customer),
                    },
                )?;
            }
            Destination::Exit => {
                let entry_time = ctx.retire_customer(customer, now);
                ctx.stats.record_finished(now - entry_time);
            }
        }
        Ok(())
    }
}
