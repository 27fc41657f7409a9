//! Loan model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::Rut;

/// Loan duration applied at creation and when the persisted file carries
/// no due date.
pub const LOAN_DAYS: i64 = 4;

/// An active lending record linking one member to one book.
///
/// Immutable by construction: lending state changes by creating and removing
/// whole loans, never by mutating one in place. Equality is on the id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i32,
    pub member: Rut,
    pub book: Uuid,
    pub due: DateTime<Utc>,
}

impl Loan {
    /// Create a loan due [`LOAN_DAYS`] from now
    pub fn new(id: i32, member: Rut, book: Uuid) -> Self {
        Self {
            id,
            member,
            book,
            due: Utc::now() + Duration::days(LOAN_DAYS),
        }
    }
}

impl PartialEq for Loan {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Loan {}

impl std::hash::Hash for Loan {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Loan with member and book details resolved, for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanDetails {
    pub id: i32,
    pub member_identity: Rut,
    pub member_name: String,
    pub book_id: Uuid,
    pub book_title: String,
    pub due: DateTime<Utc>,
}
