//! In-memory catalog store

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookStatus},
};

/// Catalog store contract
#[cfg_attr(test, mockall::automock)]
pub trait BookStore {
    /// Insert or replace a book, keyed by its id
    fn add(&mut self, book: Book) -> AppResult<()>;

    /// Remove a book; true iff a record existed
    fn remove(&mut self, id: &Uuid) -> bool;

    fn find_by_id(&self, id: &Uuid) -> Option<Book>;

    /// Case-insensitive substring match on title, author, or publisher.
    /// A blank criterion yields an empty result, never the full catalog.
    fn find_by_criteria(&self, criterion: &str) -> Vec<Book>;

    /// Change a book's availability; true iff the book exists
    fn set_status(&mut self, id: &Uuid, status: BookStatus) -> bool;

    /// Snapshot of all books in insertion order
    fn list_all(&self) -> Vec<Book>;
}

/// Catalog store backed by an insertion-ordered map
#[derive(Debug, Default)]
pub struct BookRepository {
    books: IndexMap<Uuid, Book>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl BookStore for BookRepository {
    fn add(&mut self, book: Book) -> AppResult<()> {
        if book.title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "book title cannot be empty".to_string(),
            ));
        }
        self.books.insert(book.id, book);
        Ok(())
    }

    fn remove(&mut self, id: &Uuid) -> bool {
        self.books.shift_remove(id).is_some()
    }

    fn find_by_id(&self, id: &Uuid) -> Option<Book> {
        self.books.get(id).cloned()
    }

    fn find_by_criteria(&self, criterion: &str) -> Vec<Book> {
        let term = criterion.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        self.books
            .values()
            .filter(|book| {
                book.title.to_lowercase().contains(&term)
                    || book.author.to_lowercase().contains(&term)
                    || book.publisher.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    fn set_status(&mut self, id: &Uuid, status: BookStatus) -> bool {
        match self.books.get_mut(id) {
            Some(book) => {
                book.status = status;
                true
            }
            None => false,
        }
    }

    fn list_all(&self) -> Vec<Book> {
        self.books.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quijote() -> Book {
        Book::new(
            "El Quijote".into(),
            "Cervantes".into(),
            "Novela".into(),
            "Alfaguara".into(),
        )
    }

    #[test]
    fn test_add_is_upsert() {
        let mut repo = BookRepository::new();
        let mut book = quijote();
        repo.add(book.clone()).unwrap();

        book.publisher = "Catedra".into();
        repo.add(book.clone()).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_by_id(&book.id).unwrap().publisher, "Catedra");
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let mut repo = BookRepository::new();
        let book = Book::new("  ".into(), "a".into(), "b".into(), "c".into());
        assert!(matches!(repo.add(book), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_find_by_criteria_case_insensitive_no_duplicates() {
        let mut repo = BookRepository::new();
        // "quijote" appears in both title and author, must match once
        let book = Book::new(
            "El Quijote".into(),
            "Quijote Anonimo".into(),
            "Novela".into(),
            "Alfaguara".into(),
        );
        repo.add(book).unwrap();
        repo.add(quijote()).unwrap();

        let found = repo.find_by_criteria("quijote");
        assert_eq!(found.len(), 2);

        let by_publisher = repo.find_by_criteria("ALFAGUARA");
        assert_eq!(by_publisher.len(), 2);
    }

    #[test]
    fn test_blank_criterion_yields_empty() {
        let mut repo = BookRepository::new();
        repo.add(quijote()).unwrap();
        assert!(repo.find_by_criteria("").is_empty());
        assert!(repo.find_by_criteria("   ").is_empty());
    }

    #[test]
    fn test_remove_and_set_status() {
        let mut repo = BookRepository::new();
        let book = quijote();
        let id = book.id;
        repo.add(book).unwrap();

        assert!(repo.set_status(&id, BookStatus::Loaned));
        assert_eq!(repo.find_by_id(&id).unwrap().status, BookStatus::Loaned);

        assert!(repo.remove(&id));
        assert!(!repo.remove(&id));
        assert!(!repo.set_status(&id, BookStatus::Available));
    }
}
