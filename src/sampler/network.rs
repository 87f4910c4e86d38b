// Aggregate RX/TX rate over the monitored interfaces, from /proc/net/dev.

use crate::error::SampleError;
use crate::format::format_rate;
use crate::models::{InterfaceFilter, NetworkCounterState};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

pub const RX_LABEL: &str = "RX ";
pub const TX_LABEL: &str = "TX ";

/// Index of the transmitted-bytes column among the numeric fields.
const TX_BYTES_COLUMN: usize = 8;

pub struct NetworkSampler {
    path: PathBuf,
    interfaces: InterfaceFilter,
    float_separator: String,
    state: NetworkCounterState,
}

impl NetworkSampler {
    pub fn new(
        path: impl Into<PathBuf>,
        interfaces: InterfaceFilter,
        float_separator: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            interfaces,
            float_separator: float_separator.into(),
            state: NetworkCounterState::default(),
        }
    }

    /// Counters observed by the last successful read.
    pub fn state(&self) -> NetworkCounterState {
        self.state
    }

    /// Sum the current cumulative counters of the monitored interfaces.
    /// Malformed lines are skipped.
    pub fn read_counters(&self) -> Result<NetworkCounterState, SampleError> {
        let file = File::open(&self.path).map_err(|e| SampleError::unreadable(&self.path, e))?;
        let mut total = NetworkCounterState::default();
        for bytes in BufReader::new(file).split(b'\n') {
            let bytes = bytes.map_err(|e| SampleError::unreadable(&self.path, e))?;
            // interface names may hold any byte; skip lines that are not UTF-8
            let Some((name, rx, tx)) = std::str::from_utf8(&bytes).ok().and_then(parse_line)
            else {
                continue;
            };
            if self.interfaces.contains(name) {
                total.received_bytes_cumulative = total.received_bytes_cumulative.saturating_add(rx);
                total.transmitted_bytes_cumulative =
                    total.transmitted_bytes_cumulative.saturating_add(tx);
            }
        }
        Ok(total)
    }

    /// Record the current counters without rendering, so the next sample is a
    /// real one-tick rate rather than the total since boot.
    pub fn prime(&mut self) -> Result<(), SampleError> {
        self.state = self.read_counters()?;
        Ok(())
    }

    pub fn sample(&mut self) -> String {
        let now = match self.read_counters() {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(error = %e, operation = "sample_network", "network sample failed");
                return format!("{RX_LABEL} ERR {TX_LABEL} ERR");
            }
        };
        let (rx_rate, tx_rate) = self.state.rates_to(&now);
        self.state = now;
        format!(
            "{} {}",
            format_rate(RX_LABEL, rx_rate, &self.float_separator),
            format_rate(TX_LABEL, tx_rate, &self.float_separator)
        )
    }
}

/// Split a /proc/net/dev record into (interface, rx bytes, tx bytes).
/// The name may be glued to the first counter (`eth0:123`), so split on the colon.
fn parse_line(line: &str) -> Option<(&str, u64, u64)> {
    let (name, counters) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    let mut fields = counters.split_whitespace();
    let rx = fields.next()?.parse().ok()?;
    let tx = fields.nth(TX_BYTES_COLUMN - 1)?.parse().ok()?;
    Some((name, rx, tx))
}
