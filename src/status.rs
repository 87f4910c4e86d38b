// Status composer: one call per tick, fields in fixed order.

use crate::config::AppConfig;
use crate::sampler::presence::{self, PresenceMode};
use crate::sampler::{CpuSampler, MemorySampler, NetworkSampler, PowerSampler};
use chrono::{DateTime, TimeZone};
use std::fmt::Write;
use std::path::PathBuf;

pub struct StatusComposer {
    pub network: NetworkSampler,
    pub cpu: CpuSampler,
    pub memory: MemorySampler,
    pub power: PowerSampler,
    power_supply: PathBuf,
    presence: PresenceMode,
    field_separator: String,
    time_format: String,
}

impl StatusComposer {
    pub fn from_config(config: &AppConfig, core_count: usize) -> Self {
        let highlight = config.display.highlight;
        Self {
            network: NetworkSampler::new(
                config.sources.net_dev(),
                config.network.interfaces.clone(),
                config.display.float_separator.clone(),
            ),
            cpu: CpuSampler::new(config.sources.loadavg(), core_count, highlight),
            memory: MemorySampler::new(config.sources.meminfo(), highlight),
            power: PowerSampler::new(
                config.sources.power_supply.clone(),
                config.power.ac_adapter.clone(),
                config.power.battery_prefix.clone(),
                highlight,
            ),
            power_supply: config.sources.power_supply.clone(),
            presence: config.power.presence,
            field_separator: config.display.field_separator.clone(),
            time_format: config.display.time_format.clone(),
        }
    }

    /// Network, CPU%, MEM%, power (only when a power supply is present), timestamp.
    pub fn fields<Tz>(&mut self, now: &DateTime<Tz>) -> Vec<String>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut fields = vec![
            self.network.sample(),
            self.cpu.sample() + "%",
            self.memory.sample() + "%",
        ];
        if !presence::is_empty(&self.power_supply, self.presence) {
            fields.push(self.power.sample());
        }
        fields.push(self.timestamp(now));
        fields
    }

    pub fn compose<Tz>(&mut self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.fields(now).join(&self.field_separator)
    }

    fn timestamp<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.time_format)).is_err() {
            tracing::debug!(format = %self.time_format, "timestamp format failed");
            out.clear();
        }
        out
    }
}
