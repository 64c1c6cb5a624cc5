//! Event inputs - §6. Already-decoded, typed fields; feed parsing is an
//! external collaborator's job (§1).

use crate::ids::BookId;

/// One order-lifecycle event. Field widths match §6's wire table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Add {
        external_id: u64,
        book_id: BookId,
        signed_price: i32,
        qty: u32,
    },
    Reduce {
        external_id: u64,
        qty: u32,
    },
    Execute {
        external_id: u64,
        qty: u32,
    },
    Delete {
        external_id: u64,
    },
    Replace {
        old_id: u64,
        new_id: u64,
        new_price_magnitude: u32,
        new_qty: u32,
    },
}

impl Event {
    /// Name used in trace output and error messages; stable across
    /// releases even though the exact trace line format is not (§6).
    pub fn name(&self) -> &'static str {
        match self {
            Event::Add { .. } => "add",
            Event::Reduce { .. } => "reduce",
            Event::Execute { .. } => "execute",
            Event::Delete { .. } => "delete",
            Event::Replace { .. } => "replace",
        }
    }
}
