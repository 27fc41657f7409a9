//! Error types for Biblioterm

use thiserror::Error;

/// Application error codes shown by the terminal layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    BadIdentity = 2,
    BadValue = 3,
    NoSuchBook = 4,
    NoSuchMember = 5,
    Duplicate = 6,
    BookNotAvailable = 7,
    NoSuchLoan = 8,
    NoActiveLoans = 9,
    StorageFailure = 10,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid identity format: {0}")]
    InvalidIdentity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Member already registered: {0}")]
    MemberAlreadyRegistered(String),

    #[error("Book already loaned: {0}")]
    BookAlreadyLoaned(String),

    #[error("Loan {0} not found")]
    LoanNotFound(i32),

    #[error("No active loans")]
    NoActiveLoans,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Numeric code for terminal display
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidIdentity(_) => ErrorCode::BadIdentity,
            AppError::InvalidInput(_) => ErrorCode::BadValue,
            AppError::BookNotFound(_) => ErrorCode::NoSuchBook,
            AppError::MemberNotFound(_) => ErrorCode::NoSuchMember,
            AppError::MemberAlreadyRegistered(_) => ErrorCode::Duplicate,
            AppError::BookAlreadyLoaned(_) => ErrorCode::BookNotAvailable,
            AppError::LoanNotFound(_) => ErrorCode::NoSuchLoan,
            AppError::NoActiveLoans => ErrorCode::NoActiveLoans,
            AppError::Storage(_) => ErrorCode::StorageFailure,
            AppError::Config(_) => ErrorCode::Failure,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
