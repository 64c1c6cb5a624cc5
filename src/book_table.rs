//! Book table - §2 layer 4: a fixed-size indexed collection of books.
//!
//! Unlike the level/order arenas, a book table has no free-list: books are
//! provisioned once at construction and live for the engine's whole
//! lifetime, so a plain `Vec` indexed by [`BookId`] is enough.

use crate::book::Book;
use crate::error::EngineError;
use crate::ids::BookId;

/// Compile-time ceiling on provisioned books (§3).
pub const MAX_BOOKS: u32 = 32_768;

pub struct BookTable {
    books: Vec<Book>,
}

impl BookTable {
    /// Provision `book_capacity` books, each with its own level/order arenas
    /// sized `levels_per_book`/`orders_per_book`. `book_capacity` must not
    /// exceed [`MAX_BOOKS`]; this is the "smaller provisioned book count"
    /// the design notes call for so embedders don't pay for the full
    /// 32768-book address space up front.
    pub fn new(book_capacity: u16, levels_per_book: u32, orders_per_book: u32) -> Result<Self, EngineError> {
        if book_capacity as u32 > MAX_BOOKS {
            return Err(EngineError::BookIdOutOfRange(book_capacity));
        }
        let mut books = Vec::with_capacity(book_capacity as usize);
        for _ in 0..book_capacity {
            books.push(Book::new(levels_per_book, orders_per_book)?);
        }
        Ok(Self { books })
    }

    #[inline]
    pub fn get(&self, book_id: BookId) -> Result<&Book, EngineError> {
        self.books
            .get(book_id as usize)
            .ok_or(EngineError::BookIdOutOfRange(book_id))
    }

    #[inline]
    pub fn get_mut(&mut self, book_id: BookId) -> Result<&mut Book, EngineError> {
        self.books
            .get_mut(book_id as usize)
            .ok_or(EngineError::BookIdOutOfRange(book_id))
    }

    #[inline]
    pub fn capacity(&self) -> u16 {
        self.books.len() as u16
    }
}
