// AC plug state and aggregate battery charge from the power-supply class directory.

use super::read_source;
use crate::error::SampleError;
use crate::format::{Highlight, battery_level, format_percentage};
use crate::models::BatteryReading;
use std::path::{Path, PathBuf};

pub const PLUGGED_ICON: &str = "⚡";
pub const UNPLUGGED_ICON: &str = "☢";
pub const POWER_ERR: &str = "ERR";

/// Preferred unit first; a battery exposes one or the other.
const UNIT_PREFIXES: [&str; 2] = ["energy_", "charge_"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerStatus {
    pub plugged: bool,
    /// Sum over all batteries.
    pub battery: BatteryReading,
}

impl PowerStatus {
    /// Aggregate charge percentage; zero total capacity is an error.
    pub fn percentage(&self) -> Result<i64, SampleError> {
        self.battery.percentage().ok_or(SampleError::Zero {
            what: "battery capacity",
        })
    }
}

pub struct PowerSampler {
    root: PathBuf,
    ac_adapter: String,
    battery_prefix: String,
    highlight: Highlight,
}

impl PowerSampler {
    pub fn new(
        root: impl Into<PathBuf>,
        ac_adapter: impl Into<String>,
        battery_prefix: impl Into<String>,
        highlight: Highlight,
    ) -> Self {
        Self {
            root: root.into(),
            ac_adapter: ac_adapter.into(),
            battery_prefix: battery_prefix.into(),
            highlight,
        }
    }

    pub fn read(&self) -> Result<PowerStatus, SampleError> {
        let online = read_source(&self.root.join(&self.ac_adapter).join("online"))?;
        let plugged = online.trim() == "1";

        let entries =
            std::fs::read_dir(&self.root).map_err(|e| SampleError::unreadable(&self.root, e))?;
        let battery = entries
            .filter_map(Result::ok)
            .filter(|e| {
                e.file_name()
                    .to_string_lossy()
                    .starts_with(self.battery_prefix.as_str())
            })
            .map(|e| read_battery(&e.path()))
            .sum();

        Ok(PowerStatus { plugged, battery })
    }

    pub fn sample(&self) -> String {
        let (plugged, percentage) = match self
            .read()
            .and_then(|s| s.percentage().map(|p| (s.plugged, p)))
        {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, operation = "sample_power", "power sample failed");
                return POWER_ERR.to_string();
            }
        };
        let icon = if plugged {
            PLUGGED_ICON
        } else {
            UNPLUGGED_ICON
        };
        let field = self.highlight.paint(
            battery_level(percentage),
            format_percentage(icon, percentage),
        );
        field + "%"
    }
}

fn read_battery(dir: &Path) -> BatteryReading {
    BatteryReading {
        full: read_value(dir, "full"),
        now: read_value(dir, "now"),
    }
}

/// First readable of `energy_<field>` / `charge_<field>`; unreadable or unparseable is 0.
fn read_value(dir: &Path, field: &str) -> u64 {
    UNIT_PREFIXES
        .iter()
        .find_map(|unit| std::fs::read_to_string(dir.join(format!("{unit}{field}"))).ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}
