use crate::error::{Error, Result};
use crate::stats::{SimulationSnapshot, StationSnapshot};

pub trait Formatter {
    fn write(&self, snapshot: &SimulationSnapshot) -> Result<String>;
}

/// Per-station counters and the full occupancy distribution.
pub struct HumanFormatter;

/// Counters and network totals only.
pub struct SummaryFormatter;

pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, snapshot: &SimulationSnapshot) -> Result<String> {
        let mut out = header(snapshot);
        for station in &snapshot.stations {
            out.push_str(&station_line(station));
            for (level, (&duration, &probability)) in station
                .state_time
                .iter()
                .zip(&station.probabilities)
                .enumerate()
            {
                out.push_str(&format!(
                    "  occupancy {}: p={:.4} time={:.2}\n",
                    level, probability, duration
                ));
            }
        }
        out.push_str(&totals(snapshot));
        Ok(out)
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, snapshot: &SimulationSnapshot) -> Result<String> {
        let mut out = header(snapshot);
        for station in &snapshot.stations {
            out.push_str(&station_line(station));
        }
        out.push_str(&totals(snapshot));
        Ok(out)
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, snapshot: &SimulationSnapshot) -> Result<String> {
        serde_json::to_string_pretty(snapshot).map_err(|err| Error::Render(err.to_string()))
    }
}

fn header(snapshot: &SimulationSnapshot) -> String {
    format!("Elapsed time: {:.2}\n", snapshot.elapsed)
}

fn station_line(station: &StationSnapshot) -> String {
    format!(
        "{}: arrivals={} completions={} losses={}\n",
        station.name, station.arrivals, station.completions, station.losses
    )
}

fn totals(snapshot: &SimulationSnapshot) -> String {
    format!(
        "Finished customers: {}\nBlocking rate: {:.4}\nMean response time: {:.4}\n",
        snapshot.finished, snapshot.blocking_rate, snapshot.mean_response_time
    )
}
