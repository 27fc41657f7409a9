//! Catalog registration and search

use crate::{
    error::AppResult,
    models::book::Book,
    repository::BookStore,
    text,
};

/// Register a book: all four text fields are normalized and validated, the
/// id is autogenerated and the book starts available.
pub fn register_book(
    books: &mut impl BookStore,
    title: &str,
    author: &str,
    genre: &str,
    publisher: &str,
) -> AppResult<Book> {
    let title = text::normalize(title);
    let author = text::normalize(author);
    let genre = text::normalize(genre);
    let publisher = text::normalize(publisher);

    text::validate_free_text(&title)?;
    text::validate_free_text(&author)?;
    text::validate_free_text(&genre)?;
    text::validate_free_text(&publisher)?;

    let book = Book::new(title, author, genre, publisher);
    books.add(book.clone())?;

    tracing::info!(book = %book.id, title = %book.title, "book registered");

    Ok(book)
}

/// Search the catalog by substring of title, author, or publisher
pub fn search_books(books: &impl BookStore, criterion: &str) -> AppResult<Vec<Book>> {
    text::validate_free_text(criterion)?;
    Ok(books.find_by_criteria(&text::normalize(criterion)))
}
