// Memory usage from /proc/meminfo: (total - free - buffers - cached) / total.

use crate::error::SampleError;
use crate::format::{Highlight, format_percentage, usage_level};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const MEM_LABEL: &str = "MEM";

const FIELDS: [&str; 4] = ["MemTotal:", "MemFree:", "Buffers:", "Cached:"];

/// The four meminfo counters used for the percentage, in kB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    pub total: u64,
    pub free: u64,
    pub buffers: u64,
    pub cached: u64,
}

impl MemoryUsage {
    pub fn used(&self) -> i64 {
        self.total as i64 - self.free as i64 - self.buffers as i64 - self.cached as i64
    }

    pub fn percentage(&self) -> Result<i64, SampleError> {
        if self.total == 0 {
            return Err(SampleError::Zero { what: "MemTotal" });
        }
        Ok(self.used() * 100 / self.total as i64)
    }
}

/// Scan meminfo records until all four fields are seen.
/// Any malformed record before that point fails the whole read.
pub fn parse_meminfo<R: BufRead>(reader: R, path: &Path) -> Result<MemoryUsage, SampleError> {
    let mut values: [Option<u64>; 4] = [None; 4];
    for line in reader.lines() {
        if values.iter().all(Option::is_some) {
            break;
        }
        let line = line.map_err(|e| SampleError::unreadable(path, e))?;
        let (key, value) =
            parse_record(&line).ok_or_else(|| SampleError::unparseable(path, &line))?;
        if let Some(i) = FIELDS.iter().position(|f| *f == key) {
            values[i] = Some(value);
        }
    }

    let field = |i: usize| {
        values[i].ok_or_else(|| SampleError::MissingField {
            path: path.to_path_buf(),
            field: FIELDS[i],
        })
    };
    Ok(MemoryUsage {
        total: field(0)?,
        free: field(1)?,
        buffers: field(2)?,
        cached: field(3)?,
    })
}

/// `KEY: VALUE [unit]`
fn parse_record(line: &str) -> Option<(&str, u64)> {
    let mut tokens = line.split_whitespace();
    let key = tokens.next()?;
    let value = tokens.next()?.parse().ok()?;
    Some((key, value))
}

pub struct MemorySampler {
    path: PathBuf,
    highlight: Highlight,
}

impl MemorySampler {
    pub fn new(path: impl Into<PathBuf>, highlight: Highlight) -> Self {
        Self {
            path: path.into(),
            highlight,
        }
    }

    pub fn read(&self) -> Result<MemoryUsage, SampleError> {
        let file = File::open(&self.path).map_err(|e| SampleError::unreadable(&self.path, e))?;
        parse_meminfo(BufReader::new(file), &self.path)
    }

    pub fn sample(&self) -> String {
        match self.read().and_then(|usage| usage.percentage()) {
            Ok(percentage) => self.highlight.paint(
                usage_level(percentage),
                format_percentage(MEM_LABEL, percentage),
            ),
            Err(e) => {
                tracing::debug!(error = %e, operation = "sample_memory", "memory sample failed");
                format!("{MEM_LABEL}ERR")
            }
        }
    }
}
