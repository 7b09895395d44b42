//! Error types for cryptographic operations

use thiserror::Error;

/// Errors from codec, key agreement and message cipher operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Text is not valid padded standard base64
    #[error("malformed encoding: {reason}")]
    MalformedEncoding {
        /// Decoder diagnostic
        reason: String,
    },

    /// Decoded key material has the wrong length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length
        expected: usize,
        /// Actual key length
        actual: usize,
    },

    /// Sealed message is too short to hold a nonce and a tag
    #[error("invalid ciphertext: {actual} bytes, need at least {minimum}")]
    InvalidCiphertext {
        /// Actual sealed message length
        actual: usize,
        /// Minimum sealed message length (nonce + tag)
        minimum: usize,
    },

    /// Tag verification failed: wrong key, wrong context or tampering
    #[error("authentication failed")]
    AuthenticationFailure,

    /// The CSPRNG could not produce bytes
    #[error("random source failure: {reason}")]
    RandomSourceFailure {
        /// Reason reported by the random source
        reason: String,
    },
}

impl CryptoError {
    /// Returns true if this error must be surfaced as a possible tampering
    /// event rather than an internal error.
    ///
    /// Callers must not retry these automatically.
    pub fn is_security_event(&self) -> bool {
        matches!(self, Self::AuthenticationFailure)
    }

    /// Returns true if this error is fatal (unrecoverable)
    ///
    /// Fatal errors mean the process cannot perform cryptography safely.
    /// Everything else is a property of the inputs of a single call.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::RandomSourceFailure { .. } => true,

            Self::MalformedEncoding { .. } => false,
            Self::InvalidKeyLength { .. } => false,
            Self::InvalidCiphertext { .. } => false,
            Self::AuthenticationFailure => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failure_is_security_event() {
        assert!(CryptoError::AuthenticationFailure.is_security_event());
        assert!(!CryptoError::AuthenticationFailure.is_fatal());
    }

    #[test]
    fn random_source_failure_is_fatal() {
        let err = CryptoError::RandomSourceFailure { reason: "no entropy".to_string() };
        assert!(err.is_fatal());
        assert!(!err.is_security_event());
    }

    #[test]
    fn input_errors_are_neither_fatal_nor_security_events() {
        let errors = [
            CryptoError::MalformedEncoding { reason: "bad".to_string() },
            CryptoError::InvalidKeyLength { expected: 32, actual: 31 },
            CryptoError::InvalidCiphertext { actual: 3, minimum: 28 },
        ];

        for err in errors {
            assert!(!err.is_fatal(), "{err} should not be fatal");
            assert!(!err.is_security_event(), "{err} should not be a security event");
        }
    }

    #[test]
    fn error_display() {
        let err = CryptoError::InvalidKeyLength { expected: 32, actual: 16 };
        assert_eq!(err.to_string(), "invalid key length: expected 32, got 16");

        let err = CryptoError::InvalidCiphertext { actual: 10, minimum: 28 };
        assert_eq!(err.to_string(), "invalid ciphertext: 10 bytes, need at least 28");
    }
}
