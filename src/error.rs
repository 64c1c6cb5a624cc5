//! Typed errors for the subset of precondition violations that are reachable
//! from externally supplied events rather than from direct misuse of the
//! internal `Arena`/`Book` API.
//!
//! Internal-only preconditions (double free, out-of-bounds slot access, a
//! free queue overrun) remain `debug_assert!`s at the call site, matching
//! the teacher's `Arena::free`/`get`/`get_mut` checks - those can only be
//! triggered by a bug in this crate, not by a malformed event stream.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EngineError {
    #[error("arena capacity {0} is not a positive power of two")]
    InvalidCapacity(u32),

    #[error("arena is full; capacity exhausted")]
    ArenaExhausted,

    #[error("price index is full; per-side capacity exhausted")]
    PriceIndexExhausted,

    #[error("book id {0} is outside the provisioned range")]
    BookIdOutOfRange(u16),

    #[error("order id {0} already present in the directory")]
    DuplicateOrderId(u64),

    #[error("order id {0} not found in the directory")]
    UnknownOrderId(u64),

    #[error("quantity {requested} exceeds available quantity {available}")]
    InsufficientQuantity { requested: u32, available: u32 },

    #[error("quantity must be positive")]
    ZeroQuantity,

    #[error("failed to load engine configuration: {0}")]
    Config(String),
}
