//! Lending coordinator
//!
//! Orchestrates loan creation and return against the three stores. Loan ids
//! are allocated as max(existing ids) + 1; once every loan has been returned
//! the next id is 1 again. Documented behavior, kept as-is.

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookStatus},
        identity::Rut,
        loan::Loan,
    },
    repository::{BookStore, LoanStore, MemberStore},
};

/// Create a loan for `book_id` on behalf of the member identified by
/// `identity`. The book must exist, the member must be registered, and the
/// book must not already be loaned; nothing is mutated until all three
/// checks pass.
pub fn create_loan(
    books: &mut impl BookStore,
    members: &impl MemberStore,
    loans: &mut impl LoanStore,
    book_id: &Uuid,
    identity: &Rut,
) -> AppResult<Loan> {
    let book = books
        .find_by_id(book_id)
        .ok_or_else(|| AppError::BookNotFound(book_id.to_string()))?;

    let member = members
        .find_by_identity(identity)
        .ok_or_else(|| AppError::MemberNotFound(identity.formatted()))?;

    if book.is_loaned() {
        return Err(AppError::BookAlreadyLoaned(book.title));
    }

    let id = loans.highest_id().map(|loan| loan.id).unwrap_or(0) + 1;

    let loan = Loan::new(id, member.identity, book.id);
    loans.add(loan.clone())?;
    books.set_status(book_id, BookStatus::Loaned);

    tracing::info!(loan_id = id, book = %book.id, member = %member.identity, "loan created");

    Ok(loan)
}

/// Return the loan with `loan_id`: the referenced book becomes available
/// again and the loan is removed. Returns the book.
pub fn return_loan(
    books: &mut impl BookStore,
    loans: &mut impl LoanStore,
    loan_id: i32,
) -> AppResult<Book> {
    let loan = loans
        .find_by_id(loan_id)
        .ok_or(AppError::LoanNotFound(loan_id))?;

    books.set_status(&loan.book, BookStatus::Available);
    loans.remove(loan_id);

    tracing::info!(loan_id, book = %loan.book, "loan returned");

    books
        .find_by_id(&loan.book)
        .ok_or_else(|| AppError::BookNotFound(loan.book.to_string()))
}
