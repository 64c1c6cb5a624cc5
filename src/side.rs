//! Side tag derived once at the wire boundary.
//!
//! §6 encodes side in the sign bit of the wire price (non-negative = bid,
//! negative = offer) to save a byte per entry. §9's design note keeps that
//! convention at the event boundary but derives an explicit `Side` there
//! rather than re-inspecting the sign bit throughout the book logic.

/// Resting interest on one side of a book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Bid,
    Offer,
}

impl Side {
    /// Derive the side from a signed wire price: non-negative is a bid,
    /// negative is an offer at the price's magnitude.
    #[inline]
    pub const fn of_signed_price(signed_price: i32) -> Self {
        if signed_price >= 0 {
            Side::Bid
        } else {
            Side::Offer
        }
    }

    /// Apply this side's sign convention to an unsigned magnitude, producing
    /// the internal signed wire price.
    #[inline]
    pub fn to_signed(self, magnitude: u32) -> i32 {
        match self {
            Side::Bid => magnitude as i32,
            Side::Offer => -(magnitude as i32),
        }
    }

    /// Recover the unsigned magnitude a consumer should see from an
    /// internal signed price already known to belong to this side.
    #[inline]
    pub fn magnitude_of(self, signed_price: i32) -> u32 {
        match self {
            Side::Bid => signed_price as u32,
            Side::Offer => signed_price.unsigned_abs(),
        }
    }
}
