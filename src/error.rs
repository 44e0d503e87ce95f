//! Unified error types for the StdTx signer
//!
//! Every failure in the signing pipeline surfaces as a `CosmosError`.
//! Callers distinguish failure kinds by inspecting `code`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wallet::WalletError;

/// Main error type for all signer operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl CosmosError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, msg)
    }

    /// The transaction was constructed without any message
    pub fn empty_message_set() -> Self {
        Self::validation("you need at least one msg in your transaction")
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Transport, msg)
    }

    pub fn http_status(status: u16, url: &str, body: impl Into<String>) -> Self {
        Self::new(ErrorCode::HttpStatus, format!("HTTP {} from {}", status, url))
            .with_details(body)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, msg)
    }

    /// Network failure, timeout, or non-2xx status
    pub fn is_transport(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::Transport | ErrorCode::Timeout | ErrorCode::HttpStatus
        )
    }
}

impl fmt::Display for CosmosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for CosmosError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    Validation,
    InvalidMnemonic,
    EntropyLength,
    Encoding,
    InvalidPrivateKey,
    Config,

    // Crypto errors
    Derivation,

    // Transport errors
    Transport,
    Timeout,
    HttpStatus,

    // Parse errors
    ParseError,
    JsonError,
}

/// Result type alias for signer operations
pub type CosmosResult<T> = Result<T, CosmosError>;

// Conversions from common error types

impl From<WalletError> for CosmosError {
    fn from(e: WalletError) -> Self {
        let code = match e {
            WalletError::InvalidMnemonic(_) => ErrorCode::InvalidMnemonic,
            WalletError::EntropyLength { .. } => ErrorCode::EntropyLength,
            WalletError::Encoding(_) => ErrorCode::Encoding,
            WalletError::InvalidPrivateKey(_) => ErrorCode::InvalidPrivateKey,
            WalletError::Derivation(_) => ErrorCode::Derivation,
        };
        CosmosError::new(code, e.to_string())
    }
}

impl From<serde_json::Error> for CosmosError {
    fn from(e: serde_json::Error) -> Self {
        CosmosError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<reqwest::Error> for CosmosError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CosmosError::new(ErrorCode::Timeout, "Request timed out").with_details(e.to_string())
        } else if e.is_connect() {
            CosmosError::new(ErrorCode::Transport, "Connection failed").with_details(e.to_string())
        } else if e.is_decode() {
            CosmosError::new(ErrorCode::ParseError, e.to_string())
        } else {
            CosmosError::new(ErrorCode::Transport, e.to_string())
        }
    }
}

impl From<url::ParseError> for CosmosError {
    fn from(e: url::ParseError) -> Self {
        CosmosError::new(ErrorCode::Config, format!("Invalid URL: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = CosmosError::http_status(500, "http://localhost:1317/txs", r#"{"error":"boom"}"#);

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("http_status"));
        assert!(json.contains("HTTP 500"));
        assert!(err.is_transport());
    }

    #[test]
    fn test_wallet_error_mapping() {
        let err: CosmosError = WalletError::EntropyLength { expected: 32, actual: 31 }.into();
        assert_eq!(err.code, ErrorCode::EntropyLength);
        assert!(!err.is_transport());

        let err: CosmosError = WalletError::InvalidMnemonic("bad checksum".into()).into();
        assert_eq!(err.code, ErrorCode::InvalidMnemonic);
    }

    #[test]
    fn test_display_includes_details() {
        let err = CosmosError::transport("Connection failed").with_details("refused");
        assert_eq!(err.to_string(), "[Transport] Connection failed (refused)");
    }
}
