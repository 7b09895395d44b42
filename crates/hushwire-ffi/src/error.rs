//! Error types for FFI operations.

use hushwire_core::{CoreError, CryptoError};
use thiserror::Error;

use crate::status::HwStatus;

/// Errors that can occur during FFI operations.
#[derive(Error, Debug)]
pub enum FfiError {
    /// Core error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Null pointer provided.
    #[error("null pointer provided for {0}")]
    NullPointer(&'static str),

    /// UTF-8 conversion error.
    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    /// Output contained an interior NUL and cannot become a C string.
    #[error("output contains an interior NUL byte")]
    InteriorNul,
}

impl From<CryptoError> for FfiError {
    fn from(err: CryptoError) -> Self {
        Self::Core(CoreError::Crypto(err))
    }
}

impl From<&FfiError> for HwStatus {
    fn from(err: &FfiError) -> Self {
        match err {
            FfiError::NullPointer(_) => Self::NullPointer,
            FfiError::InvalidUtf8(_) => Self::InvalidUtf8,
            FfiError::InteriorNul => Self::InvalidPlaintext,
            FfiError::Core(core) => match core {
                CoreError::Crypto(crypto) => match crypto {
                    CryptoError::MalformedEncoding { .. } => Self::MalformedEncoding,
                    CryptoError::InvalidKeyLength { .. } => Self::InvalidKeyLength,
                    CryptoError::InvalidCiphertext { .. } => Self::InvalidCiphertext,
                    CryptoError::AuthenticationFailure => Self::AuthenticationFailure,
                    CryptoError::RandomSourceFailure { .. } => Self::RandomSourceFailure,
                },
                CoreError::LimitExceeded { .. } => Self::LimitExceeded,
                CoreError::InvalidPlaintext => Self::InvalidPlaintext,
                CoreError::Serialization(_)
                | CoreError::Clock(_)
                | CoreError::InvalidStatusTransition { .. } => Self::Internal,
            },
        }
    }
}
