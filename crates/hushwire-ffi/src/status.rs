//! Status codes returned across the C boundary.

use std::ffi::CStr;

/// Result of every `hw_*` call.
///
/// Zero is success; each failure category has its own negative code so the
/// host can tell tampering (`AuthenticationFailure`) apart from input and
/// internal errors.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwStatus {
    /// Success
    Success = 0,
    /// A required pointer was NULL
    NullPointer = -1,
    /// An input string was not valid UTF-8
    InvalidUtf8 = -2,
    /// An input was not valid base64
    MalformedEncoding = -3,
    /// A decoded key or secret was not 32 bytes
    InvalidKeyLength = -4,
    /// A sealed message was too short to hold a nonce and a tag
    InvalidCiphertext = -5,
    /// Tag verification failed: the message may be corrupted or tampered with
    AuthenticationFailure = -6,
    /// The system CSPRNG was unavailable
    RandomSourceFailure = -7,
    /// An input exceeded the configured size limit
    LimitExceeded = -8,
    /// The opened plaintext could not be returned as a C string
    InvalidPlaintext = -9,
    /// Unexpected internal failure
    Internal = -99,
}

impl HwStatus {
    /// Static description of this status.
    pub fn description(self) -> &'static CStr {
        match self {
            Self::Success => c"success",
            Self::NullPointer => c"null pointer",
            Self::InvalidUtf8 => c"input is not valid UTF-8",
            Self::MalformedEncoding => c"input is not valid base64",
            Self::InvalidKeyLength => c"key must be 32 bytes",
            Self::InvalidCiphertext => c"sealed message is too short",
            Self::AuthenticationFailure => c"message may be corrupted or tampered with",
            Self::RandomSourceFailure => c"secure random source unavailable",
            Self::LimitExceeded => c"input exceeds size limit",
            Self::InvalidPlaintext => c"plaintext cannot be represented as a C string",
            Self::Internal => c"internal error",
        }
    }

    /// Map a raw code back to a status. Unknown codes map to `Internal`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Success,
            -1 => Self::NullPointer,
            -2 => Self::InvalidUtf8,
            -3 => Self::MalformedEncoding,
            -4 => Self::InvalidKeyLength,
            -5 => Self::InvalidCiphertext,
            -6 => Self::AuthenticationFailure,
            -7 => Self::RandomSourceFailure,
            -8 => Self::LimitExceeded,
            -9 => Self::InvalidPlaintext,
            _ => Self::Internal,
        }
    }
}
