//! Randomness seam for key generation and nonces.
//!
//! Decouples the primitives from the system CSPRNG so production uses OS
//! entropy while tests inject fixed or failing sources.

use crate::error::CryptoError;

/// Source of cryptographically secure random bytes.
///
/// # Invariants
///
/// - Production implementations MUST be backed by a CSPRNG
/// - A failure MUST be reported as `RandomSourceFailure`; implementations
///   never fall back to a weaker source
/// - Implementations are safe to share between threads
pub trait RandomSource: Send + Sync {
    /// Fills the provided buffer with random bytes.
    fn fill(&self, buffer: &mut [u8]) -> Result<(), CryptoError>;
}

/// OS cryptographic RNG (getrandom).
///
/// Uses the platform entropy source (`getrandom(2)` on Linux,
/// `SecRandomCopyBytes` on Apple platforms, `BCryptGenRandom` on Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buffer: &mut [u8]) -> Result<(), CryptoError> {
        getrandom::fill(buffer)
            .map_err(|err| CryptoError::RandomSourceFailure { reason: err.to_string() })
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill(&self, buffer: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill(buffer)
    }
}
