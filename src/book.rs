//! Book - one instrument's state, §4.3.
//!
//! Owns a level arena, an order arena, and the two sorted price indices
//! (bids, offers). Every mutating operation here is local to this book: no
//! book ever references another, matching §3's ownership note.

use crate::arena::Arena;
use crate::error::EngineError;
use crate::ids::{LevelId, OrderSlot};
use crate::level::{Level, Order};
use crate::price_index::{Locate, PriceIndex, PriceIndexEntry};
use crate::side::Side;

/// What happened to an order under `execute` (§4.3.4): whether it was
/// consumed in full (delegated to `delete`) or only partially filled
/// (delegated to `reduce`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// The order's entire remaining quantity was executed; the order and,
    /// if it emptied, its level were freed.
    Full,
    /// Less than the order's remaining quantity was executed; it still
    /// rests in the book.
    Partial,
}

pub struct Book {
    levels: Arena<Level, LevelId>,
    orders: Arena<Order, OrderSlot>,
    bids: PriceIndex,
    offers: PriceIndex,
}

impl Book {
    pub fn new(levels_capacity: u32, orders_capacity: u32) -> Result<Self, EngineError> {
        Ok(Self {
            levels: Arena::new(levels_capacity)?,
            orders: Arena::new(orders_capacity)?,
            bids: PriceIndex::new(),
            offers: PriceIndex::new(),
        })
    }

    #[inline]
    fn index(&self, side: Side) -> &PriceIndex {
        match side {
            Side::Bid => &self.bids,
            Side::Offer => &self.offers,
        }
    }

    /// Which side a live level belongs to, read from its stored sign.
    /// `replace` (§4.3.5) needs this *before* it deletes the old order.
    #[inline]
    pub fn side_of(&self, level: LevelId) -> Side {
        Side::of_signed_price(self.levels.get(level).price)
    }

    /// §4.3.1: find-or-create the level at `signed_price`, bump its
    /// aggregate, and allocate a fresh order slot under it.
    pub fn add(&mut self, signed_price: i32, qty: u32) -> Result<(LevelId, OrderSlot), EngineError> {
        if qty == 0 {
            return Err(EngineError::ZeroQuantity);
        }
        let side = Side::of_signed_price(signed_price);
        let locate = match side {
            Side::Bid => self.bids.locate(signed_price),
            Side::Offer => self.offers.locate(signed_price),
        };
        let level_id = match locate {
            Locate::Found(level_id) => level_id,
            Locate::Insert(pos) => {
                let level_id = self.levels.alloc(Level { price: signed_price, qty: 0 })?;
                let entry = PriceIndexEntry { price: signed_price, level: level_id };
                let inserted = match side {
                    Side::Bid => self.bids.insert(pos, entry),
                    Side::Offer => self.offers.insert(pos, entry),
                };
                if let Err(e) = inserted {
                    // Undo the level allocation so a full price index never
                    // leaves an orphaned, unreferenced level behind.
                    self.levels.free(level_id);
                    return Err(e);
                }
                level_id
            }
        };
        self.levels.get_mut(level_id).qty += qty;
        let order_id = self.orders.alloc(Order { qty })?;
        Ok((level_id, order_id))
    }

    /// §4.3.2: decrement both the order and its level by `qty`. Never frees
    /// the level even if this drives its aggregate to zero - only `delete`
    /// and execute-in-full do that (see the module doc and §9's note on
    /// this being a deliberate, testable asymmetry).
    pub fn reduce(&mut self, level: LevelId, order: OrderSlot, qty: u32) -> Result<(), EngineError> {
        let available = self.orders.get(order).qty;
        if qty > available {
            return Err(EngineError::InsufficientQuantity { requested: qty, available });
        }
        let level_qty = self.levels.get(level).qty;
        if qty > level_qty {
            return Err(EngineError::InsufficientQuantity { requested: qty, available: level_qty });
        }
        self.orders.get_mut(order).qty -= qty;
        self.levels.get_mut(level).qty -= qty;
        Ok(())
    }

    /// §4.3.3: remove an order outright, taking its whole remaining
    /// quantity off the level. If that empties the level, erase its
    /// price-index entry (found by linear scan on price) and free its slot.
    /// Always frees the order slot. Does not touch the directory - the
    /// caller (who holds the external id) removes that entry.
    pub fn delete(&mut self, level: LevelId, order: OrderSlot) {
        let order_qty = self.orders.get(order).qty;
        let level_rec = *self.levels.get(level);
        debug_assert!(level_rec.qty >= order_qty, "level aggregate underflow on delete");
        let remaining = level_rec.qty - order_qty;

        self.orders.free(order);
        self.levels.get_mut(level).qty = remaining;

        if remaining == 0 {
            let side = Side::of_signed_price(level_rec.price);
            let pos = match side {
                Side::Bid => self.bids.position_of(level_rec.price),
                Side::Offer => self.offers.position_of(level_rec.price),
            }
            .expect("a live level always has exactly one price-index entry");
            match side {
                Side::Bid => self.bids.erase(pos),
                Side::Offer => self.offers.erase(pos),
            };
            self.levels.free(level);
        }
    }

    /// §4.3.4: execute `qty` against the order at `(level, order)`. A full
    /// execution delegates to `delete`; a partial one to `reduce`.
    /// Executing more than the order's remaining quantity is a precondition
    /// violation surfaced as [`EngineError::InsufficientQuantity`].
    pub fn execute(
        &mut self,
        level: LevelId,
        order: OrderSlot,
        qty: u32,
    ) -> Result<ExecuteOutcome, EngineError> {
        let available = self.orders.get(order).qty;
        if qty > available {
            return Err(EngineError::InsufficientQuantity { requested: qty, available });
        }
        if qty == available {
            self.delete(level, order);
            Ok(ExecuteOutcome::Full)
        } else {
            self.reduce(level, order, qty)?;
            Ok(ExecuteOutcome::Partial)
        }
    }

    /// §4.3.6: the most aggressive `(signed price, aggregate qty)` on
    /// `side`, or `None` if that side is empty.
    pub fn top(&self, side: Side) -> Option<(i32, u32)> {
        self.index(side).top().map(|e| (e.price, self.levels.get(e.level).qty))
    }

    /// §4.3.6: aggregate quantity resting at `signed_price` on `side`, or
    /// `None` if no level currently exists there.
    pub fn level_qty(&self, side: Side, signed_price: i32) -> Option<u32> {
        match self.index(side).locate(signed_price) {
            Locate::Found(level) => Some(self.levels.get(level).qty),
            Locate::Insert(_) => None,
        }
    }

    /// §4.3.6: the remaining quantity of the order at `order`. The caller
    /// is expected to have already resolved `order`'s existence through the
    /// directory - an arena slot carries no occupancy bit to check here.
    pub fn order_qty(&self, order: OrderSlot) -> u32 {
        self.orders.get(order).qty
    }

    /// Number of distinct price levels currently live on `side`. Exposed
    /// for tests asserting invariant 2 and 3 (strict ordering, uniqueness).
    pub fn level_count(&self, side: Side) -> usize {
        self.index(side).len()
    }
}
