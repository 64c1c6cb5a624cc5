//! Level record - §3's "Level record" entity.
//!
//! One per distinct `(book, price)` pair currently carrying orders. Stores
//! only the aggregate resting quantity; per-order queue position within a
//! level is explicitly out of scope (§1 Non-goals).

/// An order record. Identity is external (the directory's key); its
/// position is the `(book, level, order)` handle, never a back-pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Order {
    pub qty: u32,
}

/// A price level: the signed wire price it was created at, plus the sum of
/// the remaining quantities of every order currently resting on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Level {
    pub price: i32,
    pub qty: u32,
}
