use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::StationId;

#[derive(Clone, Debug, Default)]
struct StationStats {
    state_time: Vec<f64>,
    arrivals: u64,
    completions: u64,
    losses: u64,
}

/// Time-weighted occupancy histograms and counters for one run. Durations go
/// to the occupancy level that was current before each change, so every unit
/// of simulated time lands on exactly one level.
#[derive(Clone, Debug)]
pub struct StatsAccumulator {
    stations: Vec<StationStats>,
    finished: u64,
    response_time_sum: f64,
}

impl StatsAccumulator {
    pub fn new(station_count: usize) -> Self {
        Self {
            stations: vec![StationStats::default(); station_count],
            finished: 0,
            response_time_sum: 0.0,
        }
    }

    pub fn record_state_time(
        &mut self,
        station: StationId,
        level: usize,
        duration: f64,
    ) -> Result<()> {
        if duration < 0.0 {
            return Err(Error::NegativeStateDuration { station, duration });
        }
        let stats = &mut self.stations[station];
        if stats.state_time.len() <= level {
            stats.state_time.resize(level + 1, 0.0);
        }
        stats.state_time[level] += duration;
        Ok(())
    }

    pub fn record_arrival(&mut self, station: StationId) {
        self.stations[station].arrivals += 1;
    }

    pub fn record_completion(&mut self, station: StationId) {
        self.stations[station].completions += 1;
    }

    pub fn record_loss(&mut self, station: StationId) {
        self.stations[station].losses += 1;
    }

    /// A customer is finished when it exits the network or is lost.
    pub fn record_finished(&mut self, response_time: f64) {
        self.finished += 1;
        self.response_time_sum += response_time;
    }

    pub fn finished(&self) -> u64 {
        self.finished
    }

    pub fn snapshot(&self, elapsed: f64, names: &[String]) -> SimulationSnapshot {
        let stations = self
            .stations
            .iter()
            .zip(names)
            .map(|(stats, name)| {
                let probabilities = stats
                    .state_time
                    .iter()
                    .map(|&duration| {
                        if elapsed == 0.0 {
                            0.0
                        } else {
                            duration / elapsed
                        }
                    })
                    .collect();
                StationSnapshot {
                    name: name.clone(),
                    state_time: stats.state_time.clone(),
                    probabilities,
                    arrivals: stats.arrivals,
                    completions: stats.completions,
                    losses: stats.losses,
                }
            })
            .collect::<Vec<_>>();

        let total_arrivals: u64 = stations.iter().map(|s| s.arrivals).sum();
        let total_completions: u64 = stations.iter().map(|s| s.completions).sum();
        let total_losses: u64 = stations.iter().map(|s| s.losses).sum();
        let blocking_rate = if total_arrivals == 0 {
            0.0
        } else {
            total_losses as f64 / total_arrivals as f64
        };
        let mean_response_time = if self.finished == 0 {
            0.0
        } else {
            self.response_time_sum / self.finished as f64
        };

        SimulationSnapshot {
            elapsed,
            stations,
            total_arrivals,
            total_completions,
            total_losses,
            finished: self.finished,
            blocking_rate,
            mean_response_time,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct StationSnapshot {
    pub name: String,
    pub state_time: Vec<f64>,
    pub probabilities: Vec<f64>,
    pub arrivals: u64,
    pub completions: u64,
    pub losses: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SimulationSnapshot {
    pub elapsed: f64,
    pub stations: Vec<StationSnapshot>,
    pub total_arrivals: u64,
    pub total_completions: u64,
    pub total_losses: u64,
    pub finished: u64,
    pub blocking_rate: f64,
    pub mean_response_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_time_accumulates_per_level() {
        let mut stats = StatsAccumulator::new(1);
        stats.record_state_time(0, 0, 2.0).unwrap();
        stats.record_state_time(0, 1, 3.0).unwrap();
        stats.record_state_time(0, 0, 1.0).unwrap();

        let snapshot = stats.snapshot(6.0, &["queue".to_string()]);
        assert_eq!(snapshot.stations[0].state_time, vec![3.0, 3.0]);
        assert_eq!(snapshot.stations[0].probabilities, vec![0.5, 0.5]);
    }

    #[test]
    fn negative_duration_is_an_invariant_violation() {
        let mut stats = StatsAccumulator::new(1);
        let err = stats.record_state_time(0, 0, -0.5).unwrap_err();
        assert!(matches!(err, Error::NegativeStateDuration { .. }));
    }

    #[test]
    fn histogram_grows_to_the_observed_level() {
        let mut stats = StatsAccumulator::new(1);
        stats.record_state_time(0, 3, 4.0).unwrap();
        let snapshot = stats.snapshot(4.0, &["queue".to_string()]);
        assert_eq!(snapshot.stations[0].state_time, vec![0.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn blocking_rate_and_mean_response() {
        let mut stats = StatsAccumulator::new(2);
        stats.record_arrival(0);
        stats.record_arrival(0);
        stats.record_arrival(1);
        stats.record_loss(0);
        stats.record_finished(0.0);
        stats.record_completion(0);
        stats.record_finished(6.0);

        let names = vec!["a".to_string(), "b".to_string()];
        let snapshot = stats.snapshot(10.0, &names);
        assert_eq!(snapshot.total_arrivals, 3);
        assert_eq!(snapshot.total_losses, 1);
        assert_eq!(snapshot.finished, 2);
        assert!((snapshot.blocking_rate - 1.0 / 3.0).abs() < 1e-12);
        assert!((snapshot.mean_response_time - 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_run_divides_to_zero() {
        let stats = StatsAccumulator::new(1);
        let snapshot = stats.snapshot(0.0, &["queue".to_string()]);
        assert_eq!(snapshot.blocking_rate, 0.0);
        assert_eq!(snapshot.mean_response_time, 0.0);
    }
}
