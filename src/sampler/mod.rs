// Samplers: each reads one kernel-exposed source and renders one status field.
// `read*` returns the typed value; `sample` renders it or the sampler's error token.

pub mod cpu;
pub mod memory;
pub mod network;
pub mod power;
pub mod presence;

pub use cpu::CpuSampler;
pub use memory::MemorySampler;
pub use network::NetworkSampler;
pub use power::PowerSampler;

use crate::error::SampleError;
use std::path::Path;

/// Read a whole (small, virtual) source file.
pub(crate) fn read_source(path: &Path) -> Result<String, SampleError> {
    std::fs::read_to_string(path).map_err(|e| SampleError::unreadable(path, e))
}
