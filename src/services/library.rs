//! Application facade
//!
//! Owns the stores and the persistence gateway and exposes the operations
//! the terminal layer consumes. Every successful mutation is immediately
//! followed by a re-save of the affected store(s) (write-through); those
//! saves log failures instead of raising, so the in-memory state stays
//! authoritative for the running process.

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Loan, LoanDetails, Member, Rut},
    persistence::Storage,
    repository::{BookStore, LoanStore, MemberStore, Repository},
    services::{catalog, lending, members},
};

pub struct Library {
    repository: Repository,
    storage: Storage,
}

impl Library {
    pub fn new(storage: Storage) -> Self {
        Self {
            repository: Repository::new(),
            storage,
        }
    }

    /// Load all stores from disk. Books and members first, then loans.
    pub fn load(&mut self) {
        self.storage.load_all(&mut self.repository);
    }

    /// Register a member; identity is parsed and validated from raw input
    pub fn register_member(&mut self, name: &str, identity_raw: &str) -> AppResult<Member> {
        let identity = Rut::parse(identity_raw)?;
        let member = members::register_member(&mut self.repository.members, name, identity)?;
        self.storage.save_members(&self.repository.members.list_all());
        Ok(member)
    }

    /// Register a book in the catalog
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        genre: &str,
        publisher: &str,
    ) -> AppResult<Book> {
        let book = catalog::register_book(
            &mut self.repository.books,
            title,
            author,
            genre,
            publisher,
        )?;
        self.storage.save_books(&self.repository.books.list_all());
        Ok(book)
    }

    /// Search the catalog by substring of title, author, or publisher
    pub fn search_books(&self, criterion: &str) -> AppResult<Vec<Book>> {
        catalog::search_books(&self.repository.books, criterion)
    }

    /// Loan a book to a registered member
    pub fn create_loan(&mut self, book_id: &Uuid, identity_raw: &str) -> AppResult<Loan> {
        let identity = Rut::parse(identity_raw)?;
        let loan = lending::create_loan(
            &mut self.repository.books,
            &self.repository.members,
            &mut self.repository.loans,
            book_id,
            &identity,
        )?;
        self.storage.save_books(&self.repository.books.list_all());
        self.storage.save_loans(&self.repository.loans.list_all());
        Ok(loan)
    }

    /// Return a loan; the book becomes available again
    pub fn return_loan(&mut self, loan_id: i32) -> AppResult<Book> {
        let book = lending::return_loan(
            &mut self.repository.books,
            &mut self.repository.loans,
            loan_id,
        )?;
        self.storage.save_books(&self.repository.books.list_all());
        self.storage.save_loans(&self.repository.loans.list_all());
        Ok(book)
    }

    /// Snapshot of the whole catalog
    pub fn list_books(&self) -> Vec<Book> {
        self.repository.books.list_all()
    }

    /// Snapshot of all members
    pub fn list_members(&self) -> Vec<Member> {
        self.repository.members.list_all()
    }

    /// Active loans joined with member and book details
    pub fn list_active_loans(&self) -> AppResult<Vec<LoanDetails>> {
        let loans = self.repository.loans.list_all();
        if loans.is_empty() {
            return Err(AppError::NoActiveLoans);
        }

        Ok(loans
            .into_iter()
            .map(|loan| {
                let member_name = self
                    .repository
                    .members
                    .find_by_identity(&loan.member)
                    .map(|m| m.name)
                    .unwrap_or_default();
                let book_title = self
                    .repository
                    .books
                    .find_by_id(&loan.book)
                    .map(|b| b.title)
                    .unwrap_or_default();
                LoanDetails {
                    id: loan.id,
                    member_identity: loan.member,
                    member_name,
                    book_id: loan.book,
                    book_title,
                    due: loan.due,
                }
            })
            .collect())
    }

    /// Explicit user-requested save of everything; unlike the write-through
    /// saves this propagates I/O failure.
    pub fn save_all(&self) -> AppResult<()> {
        self.storage.save_all(&self.repository)
    }
}
