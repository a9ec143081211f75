use std::collections::HashMap;

use crate::events::EventScheduler;
use crate::models::CustomerId;
use crate::random::RandomSource;
use crate::stats::StatsAccumulator;

#[derive(Clone, Copy, Debug)]
pub struct Customer {
    /// Clock at first admission into the network; response time is measured
    /// from here to exit or loss.
    pub entry_time: f64,
}

/// Shared mutable run state, owned by the driver and passed to station
/// handlers. Holds the id counter so independent simulations in one process
/// never share it.
pub struct SimulationContext {
    pub scheduler: EventScheduler,
    pub stats: StatsAccumulator,
    pub rng: Box<dyn RandomSource>,
    pub customers: HashMap<CustomerId, Customer>,
    next_customer_id: CustomerId,
}

impl SimulationContext {
    pub fn new(station_count: usize, rng: Box<dyn RandomSource>) -> Self {
        Self {
            scheduler: EventScheduler::new(),
            stats: StatsAccumulator::new(station_count),
            rng,
            customers: HashMap::new(),
            next_customer_id: 0,
        }
    }

    pub fn new_customer(&mut self, entry_time: f64) -> CustomerId {
        let id = self.next_customer_id;
        self.next_customer_id += 1;
        self.customers.insert(id, Customer { entry_time });
        id
    }

    /// Removes the customer and returns its entry time; a customer unknown
    /// to the registry entered at the current instant.
    pub fn retire_customer(&mut self, id: CustomerId, now: f64) -> f64 {
        self.customers
            .remove(&id)
            .map(|customer| customer.entry_time)
            .unwrap_or(now)
    }
}
