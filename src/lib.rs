//! # arena-lob
//!
//! A deterministic, allocation-free limit order book *maintenance* engine.
//!
//! This crate is the book-keeping core only: it applies already-decoded
//! add/reduce/execute/delete/replace events to per-instrument books and
//! answers top-of-book/level/order queries. It does not parse feeds, match
//! aggressor orders against resting ones, persist state, or disseminate
//! market data - those are external collaborators.
//!
//! ## Design principles
//!
//! - **Arena allocation**: levels and orders live in fixed-capacity arenas
//!   addressed by narrow integer handles, never raw pointers.
//! - **No heap allocation on the hot path**: the per-side price index is a
//!   stack-allocated `ArrayVec`, and arena slots are recycled through a
//!   circular free queue rather than reallocated.
//! - **One engine, one thread**: an `Engine` owns its book table and
//!   directory explicitly (construct -> apply events -> drop); there is no
//!   global mutable state and no internal locking.
//!
//! ## Architecture
//!
//! ```text
//! Event -> Engine::apply -> directory lookup (or fresh alloc) -> Book -> arenas + price index
//! ```

pub mod arena;
pub mod book;
pub mod book_table;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod event;
pub mod ids;
pub mod level;
pub mod price_index;
pub mod side;

pub use book::{Book, ExecuteOutcome};
pub use book_table::{BookTable, MAX_BOOKS};
pub use config::EngineConfig;
pub use directory::Directory;
pub use engine::Engine;
pub use error::EngineError;
pub use event::Event;
pub use ids::{BookId, LevelId, OrderHandle, OrderSlot};
pub use level::{Level, Order};
pub use side::Side;

/// Compile-time maximum levels per book (§3).
pub const MAX_LEVELS_PER_BOOK: u32 = 1_024;

/// Compile-time maximum orders per book (§3).
pub const MAX_ORDERS_PER_BOOK: u32 = 32_768;

/// Compile-time per-side price-index capacity (§3). Mirrors
/// [`price_index::CAPACITY`]; re-exported at the crate root since
/// [`EngineConfig`] names it.
pub const PRICE_INDEX_CAPACITY: usize = price_index::CAPACITY;
