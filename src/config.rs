use crate::format::Highlight;
use crate::models::InterfaceFilter;
use crate::sampler::presence::PresenceMode;
use crate::sink::SinkKind;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::PathBuf;

/// Config file used when CONFIG_FILE is unset.
pub const DEFAULT_CONFIG_FILE: &str = "dwmstatus.toml";

/// Every section is optional; an empty file yields the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub sources: SourcesConfig,
    pub power: PowerConfig,
    pub display: DisplayConfig,
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub interfaces: InterfaceFilter,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Root of procfs; net/dev, loadavg and meminfo are read below it.
    pub proc_root: PathBuf,
    pub power_supply: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            power_supply: PathBuf::from("/sys/class/power_supply"),
        }
    }
}

impl SourcesConfig {
    pub fn net_dev(&self) -> PathBuf {
        self.proc_root.join("net/dev")
    }

    pub fn loadavg(&self) -> PathBuf {
        self.proc_root.join("loadavg")
    }

    pub fn meminfo(&self) -> PathBuf {
        self.proc_root.join("meminfo")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Power-supply entry exposing `online` (AC plug state).
    pub ac_adapter: String,
    pub battery_prefix: String,
    /// How an unopenable power-supply root is treated by the presence check.
    pub presence: PresenceMode,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            ac_adapter: "ADP1".into(),
            battery_prefix: "BAT".into(),
            presence: PresenceMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub field_separator: String,
    /// Replaces the decimal point in rates; empty removes it.
    pub float_separator: String,
    /// chrono strftime format for the trailing timestamp field.
    pub time_format: String,
    pub highlight: Highlight,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            field_separator: " | ".into(),
            float_separator: String::new(),
            time_format: "%A %B %d  %-I:%M:%S %p".into(),
            highlight: Highlight::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,
    /// Program and leading arguments for the command sink; the status is appended last.
    pub command: String,
    pub args: Vec<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::default(),
            command: "xsetroot".into(),
            args: vec!["-name".into()],
        }
    }
}

impl AppConfig {
    /// Load from CONFIG_FILE (or `dwmstatus.toml`). A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path, "config file not found, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("reading config {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.network.interfaces.is_empty(),
            "network.interfaces must name at least one interface"
        );
        anyhow::ensure!(
            !self.power.ac_adapter.is_empty(),
            "power.ac_adapter must be non-empty"
        );
        anyhow::ensure!(
            !self.power.battery_prefix.is_empty(),
            "power.battery_prefix must be non-empty"
        );
        anyhow::ensure!(
            !self.display.field_separator.is_empty(),
            "display.field_separator must be non-empty"
        );
        anyhow::ensure!(
            !self.display.time_format.is_empty()
                && !StrftimeItems::new(&self.display.time_format).any(|i| matches!(i, Item::Error)),
            "display.time_format is not a valid strftime format: {:?}",
            self.display.time_format
        );
        if self.sink.kind == SinkKind::Command {
            anyhow::ensure!(
                !self.sink.command.is_empty(),
                "sink.command must be non-empty for the command sink"
            );
        }
        Ok(())
    }
}
