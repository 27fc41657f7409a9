//! In-memory loan store

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::loan::Loan,
};

/// Loan store contract
#[cfg_attr(test, mockall::automock)]
pub trait LoanStore {
    /// Insert a loan; fails if the id is not positive
    fn add(&mut self, loan: Loan) -> AppResult<()>;

    fn find_by_id(&self, id: i32) -> Option<Loan>;

    /// Remove a loan; true iff a record existed
    fn remove(&mut self, id: i32) -> bool;

    /// The stored loan with the maximum id, or `None` when empty
    fn highest_id(&self) -> Option<Loan>;

    /// Snapshot of all loans in insertion order
    fn list_all(&self) -> Vec<Loan>;
}

/// Loan store keyed by the sequential loan id
#[derive(Debug, Default)]
pub struct LoanRepository {
    loans: IndexMap<i32, Loan>,
}

impl LoanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}

impl LoanStore for LoanRepository {
    fn add(&mut self, loan: Loan) -> AppResult<()> {
        if loan.id <= 0 {
            return Err(AppError::InvalidInput(format!(
                "loan id must be positive, got {}",
                loan.id
            )));
        }
        self.loans.insert(loan.id, loan);
        Ok(())
    }

    fn find_by_id(&self, id: i32) -> Option<Loan> {
        if id <= 0 {
            return None;
        }
        self.loans.get(&id).cloned()
    }

    fn remove(&mut self, id: i32) -> bool {
        if id <= 0 {
            return false;
        }
        self.loans.shift_remove(&id).is_some()
    }

    fn highest_id(&self) -> Option<Loan> {
        self.loans.values().max_by_key(|loan| loan.id).cloned()
    }

    fn list_all(&self) -> Vec<Loan> {
        self.loans.values().cloned().collect()
    }
}
