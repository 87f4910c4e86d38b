// Sampler data models

use serde::Deserialize;
use std::collections::HashSet;
use std::iter::Sum;
use std::ops::Add;

/// Last observed cumulative byte counters, summed over the monitored interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkCounterState {
    pub received_bytes_cumulative: u64,
    pub transmitted_bytes_cumulative: u64,
}

impl NetworkCounterState {
    /// Signed per-tick delta from `self` (previous) to `now`.
    /// Negative when a counter went backwards (interface reset, wraparound).
    /// Deltas outside i64 clamp to its bounds, which render as errors.
    pub fn rates_to(&self, now: &NetworkCounterState) -> (i64, i64) {
        (
            signed_delta(self.received_bytes_cumulative, now.received_bytes_cumulative),
            signed_delta(self.transmitted_bytes_cumulative, now.transmitted_bytes_cumulative),
        )
    }
}

fn signed_delta(prev: u64, now: u64) -> i64 {
    let delta = i128::from(now) - i128::from(prev);
    i64::try_from(delta).unwrap_or(if delta > 0 { i64::MAX } else { i64::MIN })
}

/// Interface names whose counters contribute to the aggregate rate.
/// Names are stored without the trailing colon used in /proc/net/dev.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct InterfaceFilter(HashSet<String>);

impl InterfaceFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            names
                .into_iter()
                .map(|n| n.into().trim_end_matches(':').to_string())
                .collect(),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name.trim_end_matches(':'))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<String>> for InterfaceFilter {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl Default for InterfaceFilter {
    fn default() -> Self {
        Self::new(["enp2s6", "wlan0"])
    }
}

/// Capacity and current level of one battery, in energy or charge units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatteryReading {
    pub full: u64,
    pub now: u64,
}

impl BatteryReading {
    /// Integer charge percentage, or None when there is no capacity to divide by.
    pub fn percentage(&self) -> Option<i64> {
        if self.full == 0 {
            return None;
        }
        Some((self.now as u128 * 100 / self.full as u128) as i64)
    }
}

impl Add for BatteryReading {
    type Output = BatteryReading;

    fn add(self, rhs: Self) -> Self {
        BatteryReading {
            full: self.full.saturating_add(rhs.full),
            now: self.now.saturating_add(rhs.now),
        }
    }
}

impl Sum for BatteryReading {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(BatteryReading::default(), Add::add)
    }
}
