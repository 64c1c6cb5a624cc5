//! Arena allocator - O(1) slot allocation with a circular FIFO free queue.
//!
//! Slots are never reallocated or moved: a handle stays valid for as long as
//! the slot it names has not been freed. Both levels and orders live in an
//! `Arena`; the only thing that differs between the two is the handle's
//! integer width (see [`SlotIndex`]).

use crate::error::EngineError;

/// An integer handle type addressing a slot in an [`Arena`].
///
/// `BookId`, `LevelId`, and `OrderSlot` (see [`crate::ids`]) all implement
/// this so the same arena code serves every narrow handle width the engine
/// uses.
pub trait SlotIndex: Copy + Eq + std::fmt::Debug {
    /// Sentinel representing "no slot" - never a valid allocated index.
    const NULL: Self;

    fn from_usize(v: usize) -> Self;
    fn to_usize(self) -> usize;
}

impl SlotIndex for u16 {
    const NULL: Self = u16::MAX;

    #[inline]
    fn from_usize(v: usize) -> Self {
        v as u16
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl SlotIndex for u32 {
    const NULL: Self = u32::MAX;

    #[inline]
    fn from_usize(v: usize) -> Self {
        v as u32
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

/// Fixed-capacity pool of homogeneous records addressed by a narrow handle.
///
/// Backing storage grows lazily up to `capacity` (the "high-water mark"
/// described by the design): a fresh arena allocates no slot storage at all,
/// and a provisioned-but-empty book costs nothing beyond its own `Arena`
/// struct. Freed slots are recycled FIFO through a circular buffer so that
/// reuse is spread across the arena rather than clustering at one end.
pub struct Arena<T, Idx: SlotIndex> {
    slots: Vec<T>,
    capacity: u32,
    /// Circular buffer of freed handles, capacity-sized.
    free: Vec<Idx>,
    mask: u32,
    head: u32,
    tail: u32,
}

impl<T: Copy, Idx: SlotIndex> Arena<T, Idx> {
    /// Create an arena able to hold up to `capacity` slots. `capacity` must
    /// be a power of two (so the free queue can use a bitmask instead of a
    /// modulo) and must fit within `Idx`'s addressable range.
    pub fn new(capacity: u32) -> Result<Self, EngineError> {
        if capacity == 0 || !capacity.is_power_of_two() {
            return Err(EngineError::InvalidCapacity(capacity));
        }
        Ok(Self {
            slots: Vec::with_capacity(capacity as usize),
            capacity,
            free: vec![Idx::NULL; capacity as usize],
            mask: capacity - 1,
            head: 0,
            tail: 0,
        })
    }

    #[inline]
    fn free_len(&self) -> u32 {
        self.tail - self.head
    }

    /// Allocate a slot initialized to `value`.
    ///
    /// # Complexity
    /// O(1): either pops the free queue's head or appends to the backing
    /// vector.
    pub fn alloc(&mut self, value: T) -> Result<Idx, EngineError> {
        if self.free_len() > 0 {
            let idx = self.free[(self.head & self.mask) as usize];
            self.head += 1;
            self.slots[idx.to_usize()] = value;
            return Ok(idx);
        }
        if self.slots.len() as u32 >= self.capacity {
            return Err(EngineError::ArenaExhausted);
        }
        let idx = Idx::from_usize(self.slots.len());
        self.slots.push(value);
        Ok(idx)
    }

    /// Return a slot to the free queue.
    ///
    /// Double-free is a caller bug and is only checked in debug builds -
    /// the hot path carries no occupancy bitmap.
    #[inline]
    pub fn free(&mut self, idx: Idx) {
        debug_assert!(idx.to_usize() < self.slots.len(), "index out of bounds");
        debug_assert!(self.free_len() < self.capacity, "double free detected");
        self.free[(self.tail & self.mask) as usize] = idx;
        self.tail += 1;
    }

    #[inline]
    pub fn get(&self, idx: Idx) -> &T {
        &self.slots[idx.to_usize()]
    }

    #[inline]
    pub fn get_mut(&mut self, idx: Idx) -> &mut T {
        &mut self.slots[idx.to_usize()]
    }

    /// Number of slots ever allocated (the high-water mark), not the number
    /// currently live - freed slots remain counted here.
    #[inline]
    pub fn high_water_mark(&self) -> u32 {
        self.slots.len() as u32
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of slots currently allocated (not sitting in the free queue).
    #[inline]
    pub fn live_count(&self) -> u32 {
        self.high_water_mark() - self.free_len()
    }
}
