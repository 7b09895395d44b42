//! Core error types.

use thiserror::Error;

use crate::models::MessageDeliveryStatus;

/// Errors from the core service and models.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Cryptographic or encoding failure from the primitives
    #[error(transparent)]
    Crypto(#[from] hushwire_crypto::CryptoError),

    /// An input exceeds the configured size limit
    #[error("{field} too large: {actual} bytes exceeds limit of {limit}")]
    LimitExceeded {
        /// Which input was rejected
        field: &'static str,
        /// Configured limit in bytes
        limit: usize,
        /// Actual size in bytes
        actual: usize,
    },

    /// Authenticated plaintext is not valid UTF-8
    #[error("plaintext is not valid UTF-8")]
    InvalidPlaintext,

    /// Message record could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// System clock is unusable for timestamps
    #[error("clock error: {0}")]
    Clock(String),

    /// Delivery status may only move forward
    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        /// Current status
        from: MessageDeliveryStatus,
        /// Requested status
        to: MessageDeliveryStatus,
    },
}

impl CoreError {
    /// Returns true if the caller should treat this as possible tampering.
    ///
    /// Only tag verification failures qualify. Callers must not retry them.
    pub fn is_security_event(&self) -> bool {
        matches!(self, Self::Crypto(err) if err.is_security_event())
    }

    /// Returns true if this error is fatal (unrecoverable)
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Crypto(err) if err.is_fatal())
    }
}
