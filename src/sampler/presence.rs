// Whether a directory (the power-supply root) has any entries.

use serde::Deserialize;
use std::path::Path;

/// Treatment of a path that cannot be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceMode {
    /// Unopenable counts as not empty, so the power field is still rendered (as ERR).
    #[default]
    Legacy,
    /// Unopenable counts as empty, so the power field is omitted.
    Strict,
}

/// True when `path` is a directory with no entries. An enumeration error
/// yields false; an open failure is decided by `mode`.
pub fn is_empty(path: &Path, mode: PresenceMode) -> bool {
    match std::fs::read_dir(path) {
        Ok(entries) => no_entries(entries),
        Err(e) => {
            tracing::trace!(error = %e, path = %path.display(), "presence check: open failed");
            mode == PresenceMode::Strict
        }
    }
}

/// Only end-of-sequence on the first read means empty; an entry or an error does not.
fn no_entries<T>(mut entries: impl Iterator<Item = std::io::Result<T>>) -> bool {
    entries.next().is_none()
}
