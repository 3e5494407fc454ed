//! Unified error type for Tellerbank.
//!
//! Wraps teller failures, oracle findings and configuration parsing errors
//! behind one enum for callers that do not care which layer failed.

use thiserror::Error;

/// All Tellerbank errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A teller operation or bank construction failed
    #[error(transparent)]
    Teller(#[from] tellerbank_core::TellerError),

    /// The oracle found the bank structurally inconsistent
    #[error("consistency violation: {0}")]
    Consistency(#[from] tellerbank_core::ConsistencyError),

    /// Configuration could not be parsed
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for Tellerbank operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is an unknown-account error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Teller(tellerbank_core::TellerError::AccountNotFound { .. })
        )
    }

    /// Check if this is an insufficient-funds refusal.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(
            self,
            Error::Teller(tellerbank_core::TellerError::InsufficientFunds { .. })
        )
    }

    /// Check if retrying could succeed.
    ///
    /// Only an insufficient-funds refusal can: another operation may credit
    /// the account in the meantime. Whether to retry is the caller's policy.
    pub fn is_retryable(&self) -> bool {
        self.is_insufficient_funds()
    }

    /// Check if this is a serious/unrecoverable error.
    ///
    /// A consistency violation means the locking protocol is broken.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Consistency(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
