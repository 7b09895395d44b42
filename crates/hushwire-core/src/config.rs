//! Service configuration.

/// Size limits applied to every service call.
///
/// Identifiers are bound into each message as associated data, so they are
/// bounded like the plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreConfig {
    /// Maximum plaintext size in bytes, checked on seal and on open
    pub max_plaintext_bytes: usize,
    /// Maximum size of a chat or sender identifier in bytes
    pub max_identifier_bytes: usize,
}

impl CoreConfig {
    /// Largest sealed text (base64) that can hold a plaintext within limits.
    pub fn max_sealed_text_bytes(&self) -> usize {
        let sealed = self.max_plaintext_bytes.saturating_add(hushwire_crypto::MIN_SEALED_SIZE);
        sealed.div_ceil(3).saturating_mul(4)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self { max_plaintext_bytes: 64 * 1024, max_identifier_bytes: 256 }
    }
}
