//! Data models for Biblioterm

pub mod book;
pub mod identity;
pub mod loan;
pub mod member;

// Re-export commonly used types
pub use book::{Book, BookStatus};
pub use identity::Rut;
pub use loan::{Loan, LoanDetails, LOAN_DAYS};
pub use member::Member;
