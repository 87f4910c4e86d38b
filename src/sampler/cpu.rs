// CPU load: one-minute load average scaled by the logical core count.

use super::read_source;
use crate::error::SampleError;
use crate::format::{Highlight, format_percentage, usage_level};
use std::path::PathBuf;
use sysinfo::System;

pub const CPU_LABEL: &str = "CPU";

/// Logical core count, resolved once at startup.
pub fn logical_core_count() -> usize {
    let mut sys = System::new();
    sys.refresh_cpu_all();
    match sys.cpus().len() {
        0 => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
        n => n,
    }
}

/// `floor(load * 100 / cores)`; may exceed 100 on an overloaded machine.
pub fn load_percentage(load: f64, core_count: usize) -> i64 {
    (load * 100.0 / core_count.max(1) as f64).floor() as i64
}

pub struct CpuSampler {
    path: PathBuf,
    core_count: usize,
    highlight: Highlight,
}

impl CpuSampler {
    pub fn new(path: impl Into<PathBuf>, core_count: usize, highlight: Highlight) -> Self {
        Self {
            path: path.into(),
            core_count: core_count.max(1),
            highlight,
        }
    }

    pub fn core_count(&self) -> usize {
        self.core_count
    }

    /// One-minute load average (first token of /proc/loadavg).
    pub fn read_load(&self) -> Result<f64, SampleError> {
        let content = read_source(&self.path)?;
        content
            .split_whitespace()
            .next()
            .and_then(|t| t.parse::<f64>().ok())
            .filter(|l| l.is_finite())
            .ok_or_else(|| SampleError::unparseable(&self.path, content.trim_end()))
    }

    pub fn sample(&self) -> String {
        match self.read_load() {
            Ok(load) => {
                let percentage = load_percentage(load, self.core_count);
                self.highlight.paint(
                    usage_level(percentage),
                    format_percentage(CPU_LABEL, percentage),
                )
            }
            Err(e) => {
                tracing::debug!(error = %e, operation = "sample_cpu", "CPU sample failed");
                format!("{CPU_LABEL}ERR")
            }
        }
    }
}
