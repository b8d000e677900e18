use thiserror::Error;

/// Error types for the quota module
#[derive(Error, Debug)]
pub enum QuotaError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Requested year/month is not a valid calendar month
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Submitted loan date could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Type alias for Result with QuotaError
pub type Result<T> = std::result::Result<T, QuotaError>;
