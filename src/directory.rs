//! Order directory - §4.4, the sole cross-book index.
//!
//! Maps externally visible order ids to the composite handle that resolves
//! them. Holds non-owning handles only; the arenas plus price indices
//! within each book remain the source of truth for existence (§3).

use rustc_hash::FxHashMap;

use crate::error::EngineError;
use crate::ids::OrderHandle;

/// Hashes externally supplied order ids. Uses the same fast
/// non-cryptographic hasher the teacher codebase reaches for on its order
/// lookup map: external ids are already well-distributed 64-bit integers,
/// not attacker-controlled strings, so FxHash's speed is worth more here
/// than SipHash's DoS resistance.
pub struct Directory {
    handles: FxHashMap<u64, OrderHandle>,
}

impl Directory {
    pub fn new() -> Self {
        Self { handles: FxHashMap::default() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a freshly-added order. A precondition violation if
    /// `external_id` is already present (§4.4, §7).
    pub fn insert(&mut self, external_id: u64, handle: OrderHandle) -> Result<(), EngineError> {
        if self.handles.contains_key(&external_id) {
            return Err(EngineError::DuplicateOrderId(external_id));
        }
        self.handles.insert(external_id, handle);
        Ok(())
    }

    /// Look up `external_id` without removing it (reduce/execute-partial).
    pub fn get(&self, external_id: u64) -> Result<OrderHandle, EngineError> {
        self.handles
            .get(&external_id)
            .copied()
            .ok_or(EngineError::UnknownOrderId(external_id))
    }

    /// Remove `external_id` (delete, execute-in-full, and the first half of
    /// replace). A precondition violation if it is not present.
    pub fn remove(&mut self, external_id: u64) -> Result<OrderHandle, EngineError> {
        self.handles
            .remove(&external_id)
            .ok_or(EngineError::UnknownOrderId(external_id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}
