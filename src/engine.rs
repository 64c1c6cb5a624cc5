//! Engine - §4.5 (ambient construction, provisioning, and trace output).
//!
//! Owns the book table and directory as one explicit value with a
//! constructor and no static/global state (§9's design note), mirroring the
//! teacher's `Engine`/`MatchingEngine` split between a thin driving shell
//! and the state it owns.

use crate::book_table::BookTable;
use crate::config::EngineConfig;
use crate::directory::Directory;
use crate::error::EngineError;
use crate::event::Event;
use crate::ids::{BookId, OrderHandle};
use crate::side::Side;

pub struct Engine {
    table: BookTable,
    directory: Directory,
    trace_enabled: bool,
}

impl Engine {
    /// Provision a book table for `book_capacity` books, each carrying the
    /// compile-time-maximum level/order arena sizes. Mirrors the teacher's
    /// `Engine::new(capacity)` pattern of taking a provisioning size at
    /// construction rather than baking in the compile-time maximum.
    pub fn new(book_capacity: u16) -> Result<Self, EngineError> {
        Self::with_config(EngineConfig {
            book_capacity,
            ..EngineConfig::default()
        })
    }

    /// Provision an engine from a full [`EngineConfig`], including
    /// per-book arena sizes and whether trace events are emitted.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            table: BookTable::new(config.book_capacity, config.levels_per_book, config.orders_per_book)?,
            directory: Directory::with_capacity(config.book_capacity as usize * 16),
            trace_enabled: config.trace_enabled,
        })
    }

    /// Apply one decoded event to the engine. Dispatches to the book
    /// addressed by `book_id` for `add`; for the other four, the book is
    /// recovered from the directory handle stored under the event's
    /// external id(s).
    pub fn apply(&mut self, event: Event) -> Result<(), EngineError> {
        match event {
            Event::Add { external_id, book_id, signed_price, qty } => {
                self.apply_add(external_id, book_id, signed_price, qty)
            }
            Event::Reduce { external_id, qty } => self.apply_reduce(external_id, qty),
            Event::Execute { external_id, qty } => self.apply_execute(external_id, qty),
            Event::Delete { external_id } => self.apply_delete(external_id),
            Event::Replace { old_id, new_id, new_price_magnitude, new_qty } => {
                self.apply_replace(old_id, new_id, new_price_magnitude, new_qty)
            }
        }
    }

    fn apply_add(&mut self, external_id: u64, book_id: BookId, signed_price: i32, qty: u32) -> Result<(), EngineError> {
        if self.directory.get(external_id).is_ok() {
            return Err(EngineError::DuplicateOrderId(external_id));
        }
        let (handle, level_qty) = {
            let book = self.table.get_mut(book_id)?;
            let (level, order) = book.add(signed_price, qty)?;
            // Only looked up when the `trace` feature actually compiles the
            // event in - the hot path never pays for this when it's off.
            #[cfg(feature = "trace")]
            let level_qty = book.level_qty(Side::of_signed_price(signed_price), signed_price);
            #[cfg(not(feature = "trace"))]
            let level_qty: Option<u32> = None;
            (OrderHandle::new(book_id, level, order), level_qty)
        };
        self.directory.insert(external_id, handle)?;
        trace_add(self.trace_enabled, external_id, book_id, signed_price, qty, handle, level_qty);
        Ok(())
    }

    fn apply_reduce(&mut self, external_id: u64, qty: u32) -> Result<(), EngineError> {
        let handle = self.directory.get(external_id)?;
        let book = self.table.get_mut(handle.book)?;
        book.reduce(handle.level, handle.order, qty)?;
        trace_event(self.trace_enabled, "reduce", external_id, qty);
        Ok(())
    }

    fn apply_execute(&mut self, external_id: u64, qty: u32) -> Result<(), EngineError> {
        let handle = self.directory.get(external_id)?;
        let book = self.table.get_mut(handle.book)?;
        let outcome = book.execute(handle.level, handle.order, qty)?;
        if outcome == crate::book::ExecuteOutcome::Full {
            self.directory.remove(external_id)?;
        }
        trace_event(self.trace_enabled, "execute", external_id, qty);
        Ok(())
    }

    fn apply_delete(&mut self, external_id: u64) -> Result<(), EngineError> {
        let handle = self.directory.remove(external_id)?;
        let book = self.table.get_mut(handle.book)?;
        book.delete(handle.level, handle.order);
        trace_event(self.trace_enabled, "delete", external_id, 0);
        Ok(())
    }

    fn apply_replace(&mut self, old_id: u64, new_id: u64, new_price_magnitude: u32, new_qty: u32) -> Result<(), EngineError> {
        if self.directory.get(new_id).is_ok() {
            return Err(EngineError::DuplicateOrderId(new_id));
        }
        let old_handle = self.directory.remove(old_id)?;
        let book = self.table.get_mut(old_handle.book)?;
        let side = book.side_of(old_handle.level);
        book.delete(old_handle.level, old_handle.order);

        let signed_price = side.to_signed(new_price_magnitude);
        let (level, order) = book.add(signed_price, new_qty)?;
        let new_handle = OrderHandle::new(old_handle.book, level, order);
        self.directory.insert(new_id, new_handle)?;
        trace_event(self.trace_enabled, "replace", new_id, new_qty);
        Ok(())
    }

    /// Most aggressive `(price magnitude, aggregate qty)` on `side` of
    /// `book_id`, or `None` if that side is empty.
    pub fn top(&self, book_id: BookId, side: Side) -> Result<Option<(u32, u32)>, EngineError> {
        let book = self.table.get(book_id)?;
        Ok(book.top(side).map(|(price, qty)| (side.magnitude_of(price), qty)))
    }

    /// Aggregate quantity resting at `price_magnitude` on `side` of
    /// `book_id`, or `None` if no level currently exists there.
    pub fn level_qty(&self, book_id: BookId, side: Side, price_magnitude: u32) -> Result<Option<u32>, EngineError> {
        let book = self.table.get(book_id)?;
        Ok(book.level_qty(side, side.to_signed(price_magnitude)))
    }

    /// Remaining quantity of the order known to the directory as
    /// `external_id`, or `None` if it is not currently resting.
    pub fn order_qty(&self, external_id: u64) -> Option<u32> {
        let handle = self.directory.get(external_id).ok()?;
        let book = self.table.get(handle.book).ok()?;
        Some(book.order_qty(handle.order))
    }

    #[inline]
    pub fn directory_len(&self) -> usize {
        self.directory.len()
    }

    #[inline]
    pub fn book_capacity(&self) -> u16 {
        self.table.capacity()
    }

}

/// Emit `add`'s trace event (§4.5): field-for-field with §6, plus the
/// resulting handle and the level's post-update aggregate. A free function
/// (not a method) so the hot path never has to justify holding `&self`
/// alongside a live mutable borrow of one of its books.
#[cfg(feature = "trace")]
#[allow(clippy::too_many_arguments)]
fn trace_add(
    trace_enabled: bool,
    external_id: u64,
    book_id: BookId,
    signed_price: i32,
    qty: u32,
    handle: OrderHandle,
    level_qty: Option<u32>,
) {
    if trace_enabled {
        tracing::trace!(
            event = "add",
            external_id,
            book_id,
            signed_price,
            qty,
            level = handle.level,
            order = handle.order,
            level_qty,
        );
    }
}

#[cfg(not(feature = "trace"))]
#[inline]
fn trace_add(_trace_enabled: bool, _external_id: u64, _book_id: BookId, _signed_price: i32, _qty: u32, _handle: OrderHandle, _level_qty: Option<u32>) {}

#[cfg(feature = "trace")]
fn trace_event(trace_enabled: bool, name: &'static str, external_id: u64, qty: u32) {
    if trace_enabled {
        tracing::trace!(event = name, external_id, qty);
    }
}

#[cfg(not(feature = "trace"))]
#[inline]
fn trace_event(_trace_enabled: bool, _name: &'static str, _external_id: u64, _qty: u32) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    fn add(external_id: u64, book_id: BookId, signed_price: i32, qty: u32) -> Event {
        Event::Add { external_id, book_id, signed_price, qty }
    }

    #[test]
    fn single_add_delete_scenario() {
        let mut engine = Engine::new(1).unwrap();
        engine.apply(add(1, 0, 100, 10)).unwrap();
        assert_eq!(engine.top(0, Side::Bid).unwrap(), Some((100, 10)));

        engine.apply(Event::Delete { external_id: 1 }).unwrap();
        assert_eq!(engine.top(0, Side::Bid).unwrap(), None);
        assert_eq!(engine.directory_len(), 0);
    }

    #[test]
    fn aggregation_and_partial_execute_scenario() {
        let mut engine = Engine::new(1).unwrap();
        engine.apply(add(1, 0, 100, 10)).unwrap();
        engine.apply(add(2, 0, 100, 5)).unwrap();
        assert_eq!(engine.level_qty(0, Side::Bid, 100).unwrap(), Some(15));

        engine.apply(Event::Execute { external_id: 1, qty: 10 }).unwrap();
        assert_eq!(engine.level_qty(0, Side::Bid, 100).unwrap(), Some(5));
        assert!(engine.order_qty(1).is_none(), "fully executed order leaves the directory");
    }

    #[test]
    fn offer_side_sign_convention() {
        let mut engine = Engine::new(1).unwrap();
        engine.apply(add(1, 0, -200, 5)).unwrap();
        assert_eq!(engine.top(0, Side::Offer).unwrap(), Some((200, 5)));
    }

    #[test]
    fn replace_across_prices_same_side() {
        let mut engine = Engine::new(1).unwrap();
        engine.apply(add(1, 0, 100, 10)).unwrap();
        engine
            .apply(Event::Replace { old_id: 1, new_id: 2, new_price_magnitude: 101, new_qty: 7 })
            .unwrap();

        assert!(engine.order_qty(1).is_none());
        assert_eq!(engine.order_qty(2), Some(7));
        assert_eq!(engine.level_qty(0, Side::Bid, 100).unwrap(), None);
        assert_eq!(engine.level_qty(0, Side::Bid, 101).unwrap(), Some(7));
    }

    #[test]
    fn replace_preserves_offer_side() {
        let mut engine = Engine::new(1).unwrap();
        engine.apply(add(1, 0, -200, 5)).unwrap();
        engine
            .apply(Event::Replace { old_id: 1, new_id: 2, new_price_magnitude: 205, new_qty: 5 })
            .unwrap();
        assert_eq!(engine.top(0, Side::Offer).unwrap(), Some((205, 5)));
    }

    #[test]
    fn partial_then_full_execute_scenario() {
        let mut engine = Engine::new(1).unwrap();
        engine.apply(add(1, 0, 100, 10)).unwrap();
        engine.apply(Event::Execute { external_id: 1, qty: 3 }).unwrap();
        assert_eq!(engine.order_qty(1), Some(7));
        assert_eq!(engine.level_qty(0, Side::Bid, 100).unwrap(), Some(7));

        engine.apply(Event::Execute { external_id: 1, qty: 7 }).unwrap();
        assert_eq!(engine.directory_len(), 0);
        assert_eq!(engine.level_qty(0, Side::Bid, 100).unwrap(), None);
    }

    #[test]
    fn duplicate_add_is_a_typed_error() {
        let mut engine = Engine::new(1).unwrap();
        engine.apply(add(1, 0, 100, 10)).unwrap();
        assert!(matches!(
            engine.apply(add(1, 0, 101, 1)),
            Err(EngineError::DuplicateOrderId(1))
        ));
    }

    #[test]
    fn unknown_order_id_is_a_typed_error() {
        let mut engine = Engine::new(1).unwrap();
        assert!(matches!(
            engine.apply(Event::Delete { external_id: 99 }),
            Err(EngineError::UnknownOrderId(99))
        ));
    }

    #[test]
    fn book_id_out_of_range_is_a_typed_error() {
        let mut engine = Engine::new(1).unwrap();
        assert!(matches!(
            engine.apply(add(1, 5, 100, 10)),
            Err(EngineError::BookIdOutOfRange(5))
        ));
    }

    #[test]
    fn reduce_by_zero_is_a_no_op() {
        let mut engine = Engine::new(1).unwrap();
        engine.apply(add(1, 0, 100, 10)).unwrap();
        engine.apply(Event::Reduce { external_id: 1, qty: 0 }).unwrap();
        assert_eq!(engine.order_qty(1), Some(10));
    }
}
