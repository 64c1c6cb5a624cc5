//! Gap-preserving sorted price index - §4.2.
//!
//! A strictly price-descending sequence of `(price, level)` pairs for one
//! side of one book. Index 0 is always the most aggressive price on that
//! side: because offers are stored with negated prices (§6), their natural
//! descending numerical order equals ascending real-price order, so a
//! single `top()` works uniformly for both sides.
//!
//! Backed by a stack-allocated [`arrayvec::ArrayVec`] rather than a `Vec`:
//! the per-side capacity is fixed and known at construction, so inserting
//! or erasing an entry never touches the heap.

use arrayvec::ArrayVec;

use crate::error::EngineError;
use crate::ids::LevelId;

/// Per-side capacity. Matches the compile-time constant in §3; see
/// [`crate::PRICE_INDEX_CAPACITY`] for the crate-level re-export.
pub const CAPACITY: usize = 512;

/// One row of the price index: a level's price, duplicated here so the
/// insertion/erase scan never has to dereference the level arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceIndexEntry {
    pub price: i32,
    pub level: LevelId,
}

/// Outcome of scanning the index for a price: either the level already
/// carrying that price, or the position a fresh entry should be inserted at
/// to keep the sequence strictly descending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locate {
    Found(LevelId),
    Insert(usize),
}

#[derive(Clone)]
pub struct PriceIndex {
    entries: ArrayVec<PriceIndexEntry, CAPACITY>,
}

impl PriceIndex {
    pub fn new() -> Self {
        Self { entries: ArrayVec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most aggressive price on this side, or `None` if the side is
    /// empty.
    #[inline]
    pub fn top(&self) -> Option<PriceIndexEntry> {
        self.entries.first().copied()
    }

    #[inline]
    pub fn get(&self, pos: usize) -> PriceIndexEntry {
        self.entries[pos]
    }

    /// Scan from the most aggressive price (index 0) toward the least
    /// aggressive, the direction real traffic touches most: new orders
    /// cluster near the top of the book, so the common case returns after
    /// one or two comparisons. Returns either the existing level at `price`
    /// or the position a new entry must occupy to keep the side
    /// strictly descending.
    pub fn locate(&self, price: i32) -> Locate {
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.price == price {
                return Locate::Found(entry.level);
            }
            if price > entry.price {
                return Locate::Insert(i);
            }
        }
        Locate::Insert(self.entries.len())
    }

    /// Find the entry for `price` by linear scan, used when erasing a level
    /// that has emptied (§4.3.3 looks the level up by price, not position).
    pub fn position_of(&self, price: i32) -> Option<usize> {
        self.entries.iter().position(|e| e.price == price)
    }

    /// Insert a fresh entry at `pos`, shifting the tail right.
    pub fn insert(&mut self, pos: usize, entry: PriceIndexEntry) -> Result<(), EngineError> {
        self.entries
            .try_insert(pos, entry)
            .map_err(|_| EngineError::PriceIndexExhausted)
    }

    /// Erase the entry at `pos`, shifting the tail left.
    pub fn erase(&mut self, pos: usize) -> PriceIndexEntry {
        self.entries.remove(pos)
    }
}

impl Default for PriceIndex {
    fn default() -> Self {
        Self::new()
    }
}
