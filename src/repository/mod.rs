//! In-memory store layer
//!
//! The three stores are plain owned values behind small trait contracts.
//! Insertion order is preserved so that save snapshots are stable.

pub mod books;
pub mod loans;
pub mod members;

pub use books::{BookRepository, BookStore};
pub use loans::{LoanRepository, LoanStore};
pub use members::{MemberRepository, MemberStore};

/// Container owning the three stores. Fields are public so callers can
/// split-borrow them (the lending coordinator mutates books and loans while
/// reading members).
#[derive(Debug, Default)]
pub struct Repository {
    pub books: BookRepository,
    pub members: MemberRepository,
    pub loans: LoanRepository,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }
}
