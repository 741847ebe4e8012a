//! Result and error types for the core library

use rust_decimal::Decimal;
use thiserror::Error;

/// Core library error type
///
/// Everything except the storage-side variants is recoverable: the operator is
/// told what went wrong and prompted again. See [`Error::is_fatal`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid number: {0}")]
    Parse(String),

    #[error("Account # {0} does not exist in our system")]
    NotFound(u32),

    #[error("The pin number entered does not match our records ({remaining} attempt(s) left)")]
    AuthMismatch { remaining: u8 },

    #[error("Too many failed login attempts")]
    LockedOut,

    #[error("Not enough funds: {available} available, {requested} requested")]
    InsufficientFunds { available: Decimal, requested: Decimal },

    #[error("Deposit of {requested} would exceed the largest balance an account can hold")]
    BalanceOverflow { requested: Decimal },

    #[error("No account is logged in")]
    NotAuthenticated,

    #[error("Invalid session state: {0}")]
    InvalidState(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// True for errors that leave the ledger in an unknown state and must end the run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Storage(_) | Error::Config(_) | Error::Io(_) | Error::Json(_)
        )
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors_are_not_fatal() {
        assert!(!Error::parse("abc").is_fatal());
        assert!(!Error::NotFound(42).is_fatal());
        assert!(!Error::AuthMismatch { remaining: 2 }.is_fatal());
        assert!(!Error::LockedOut.is_fatal());
        assert!(!Error::NotAuthenticated.is_fatal());
        assert!(!Error::BalanceOverflow { requested: Decimal::MAX }.is_fatal());
        assert!(!Error::InsufficientFunds {
            available: Decimal::new(500, 2),
            requested: Decimal::new(1000, 2),
        }
        .is_fatal());
    }

    #[test]
    fn test_storage_errors_are_fatal() {
        assert!(Error::storage("line 3: missing pin").is_fatal());
        assert!(Error::config("bad settings").is_fatal());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(Error::from(io).is_fatal());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::NotFound(1000000).to_string(),
            "Account # 1000000 does not exist in our system"
        );
        let err = Error::InsufficientFunds {
            available: Decimal::new(500, 2),
            requested: Decimal::new(1000, 2),
        };
        assert_eq!(err.to_string(), "Not enough funds: 5.00 available, 10.00 requested");
    }
}
