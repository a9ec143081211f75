use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::models::{CustomerId, StationId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// External renewal arrival when `customer` is `None`, internal hand-off
    /// otherwise.
    Arrival {
        station: StationId,
        customer: Option<CustomerId>,
    },
    Departure {
        station: StationId,
        customer: CustomerId,
    },
}

impl Event {
    pub fn station(&self) -> StationId {
        match self {
            Event::Arrival { station, .. } => *station,
            Event::Departure { station, .. } => *station,
        }
    }

    // Arrivals are handled before departures that share a timestamp. The
    // rank is the tie-break rule itself; it must not be replaced by enum
    // declaration order or any label ordering.
    fn rank(&self) -> u8 {
        match self {
            Event::Arrival { .. } => 0,
            Event::Departure { .. } => 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScheduledEvent {
    pub time: f64,
    pub event: Event,
    seq: u64,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.event.rank().cmp(&other.event.rank()))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Time-ordered pending events plus the simulation clock. Popping does not
/// advance the clock; the driver calls `advance_to` with the popped time.
#[derive(Debug, Default)]
pub struct EventScheduler {
    pending: BinaryHeap<Reverse<ScheduledEvent>>,
    clock: f64,
    next_seq: u64,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn schedule(&mut self, time: f64, event: Event) -> Result<()> {
        if time < self.clock {
            return Err(Error::TimeReversal {
                clock: self.clock,
                attempted: time,
            });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(ScheduledEvent { time, event, seq }));
        Ok(())
    }

    pub fn pop_next(&mut self) -> Option<ScheduledEvent> {
        self.pending.pop().map(|Reverse(scheduled)| scheduled)
    }

    pub fn advance_to(&mut self, time: f64) -> Result<()> {
        if time < self.clock {
            return Err(Error::TimeReversal {
                clock: self.clock,
                attempted: time,
            });
        }
        self.clock = time;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
