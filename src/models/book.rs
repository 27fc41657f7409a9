//! Book model and availability status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Availability of a book: `Loaned` iff exactly one active loan references it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    Loaned,
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookStatus::Available => "AVAILABLE",
            BookStatus::Loaned => "LOANED",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AVAILABLE" => Ok(BookStatus::Available),
            "LOANED" => Ok(BookStatus::Loaned),
            other => Err(format!("Invalid book status: {}", other)),
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub status: BookStatus,
}

impl Book {
    /// Create a book with a fresh id, available for lending
    pub fn new(title: String, author: String, genre: String, publisher: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            author,
            genre,
            publisher,
            status: BookStatus::Available,
        }
    }

    /// Rebuild a book from persisted fields, keeping its original id
    pub fn restore(
        id: Uuid,
        title: String,
        author: String,
        genre: String,
        publisher: String,
        status: BookStatus,
    ) -> Self {
        Self {
            id,
            title,
            author,
            genre,
            publisher,
            status,
        }
    }

    pub fn is_loaned(&self) -> bool {
        self.status == BookStatus::Loaned
    }
}
