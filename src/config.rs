//! Engine configuration surface - §4.7 (ambient).
//!
//! Mirrors the teacher's use of `serde`-derived structs for typed
//! configuration-shaped data: there it described market-data rows
//! (`TardisL3Row`), here it describes engine provisioning.

use serde::{Deserialize, Serialize};

use crate::book_table::MAX_BOOKS;
use crate::{MAX_LEVELS_PER_BOOK, MAX_ORDERS_PER_BOOK, PRICE_INDEX_CAPACITY};

/// Provisioning parameters for an [`crate::engine::Engine`]. `Default`
/// matches the compile-time maximums in §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of books to provision. Must not exceed the compile-time
    /// maximum of 32768.
    pub book_capacity: u16,
    /// Per-book level arena capacity. Must be a power of two.
    pub levels_per_book: u32,
    /// Per-book order arena capacity. Must be a power of two.
    pub orders_per_book: u32,
    /// Advisory: the per-side price index is always backed by a
    /// compile-time-fixed 512-entry `ArrayVec` (see
    /// [`crate::price_index::CAPACITY`]); this field only documents the
    /// intended working set for capacity planning; it is not independently
    /// enforced.
    pub price_index_capacity: u16,
    /// Emit a `tracing::trace!` event per applied event (only has effect
    /// when this crate is built with the `trace` feature).
    pub trace_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            book_capacity: MAX_BOOKS as u16,
            levels_per_book: MAX_LEVELS_PER_BOOK,
            orders_per_book: MAX_ORDERS_PER_BOOK,
            price_index_capacity: PRICE_INDEX_CAPACITY as u16,
            trace_enabled: false,
        }
    }
}

#[cfg(feature = "config")]
impl EngineConfig {
    /// Load configuration from a TOML file. Only used by the demo tooling
    /// around this crate, never on the hot path - reading and parsing a
    /// file has nothing to do with per-event latency.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::error::EngineError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| crate::error::EngineError::Config(e.to_string()))?;
        toml::from_str(&text).map_err(|e| crate::error::EngineError::Config(e.to_string()))
    }
}
