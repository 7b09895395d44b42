//! Message encryption using `ChaCha20-Poly1305`
//!
//! [`seal_with_nonce`] and [`open_message`] are pure. [`seal_message`] draws
//! the nonce from a caller-provided [`RandomSource`].

use chacha20poly1305::{
    ChaCha20Poly1305, Nonce,
    aead::{Aead, KeyInit, Payload},
};

use crate::{derivation::ChatKey, error::CryptoError, random::RandomSource};

/// Size of the `ChaCha20` nonce (12 bytes)
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// Smallest valid sealed message: nonce and tag around an empty plaintext
pub const MIN_SEALED_SIZE: usize = NONCE_SIZE + TAG_SIZE;

/// Label prefixed to the associated data
const CONTEXT_LABEL: &[u8] = b"hushwireMessageV1";

/// Conversation identifiers bound to a message as associated data.
///
/// Authenticated but not encrypted. Opening with a different context fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationContext<'a> {
    chat_id: &'a str,
    sender_id: &'a str,
}

impl<'a> ConversationContext<'a> {
    /// Context for a message from `sender_id` in chat `chat_id`.
    pub fn new(chat_id: &'a str, sender_id: &'a str) -> Self {
        Self { chat_id, sender_id }
    }

    /// Encode as AEAD associated data.
    ///
    /// Structure:
    /// - label
    /// - `chat_id` length (8 bytes, big-endian) and bytes
    /// - `sender_id` length (8 bytes, big-endian) and bytes
    fn associated_data(&self) -> Vec<u8> {
        let capacity = CONTEXT_LABEL.len() + 16 + self.chat_id.len() + self.sender_id.len();
        let mut aad = Vec::with_capacity(capacity);

        aad.extend_from_slice(CONTEXT_LABEL);
        aad.extend_from_slice(&(self.chat_id.len() as u64).to_be_bytes());
        aad.extend_from_slice(self.chat_id.as_bytes());
        aad.extend_from_slice(&(self.sender_id.len() as u64).to_be_bytes());
        aad.extend_from_slice(self.sender_id.as_bytes());

        aad
    }
}

/// A sealed message: nonce plus ciphertext with its authentication tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    /// The 12-byte `ChaCha20` nonce
    pub nonce: [u8; NONCE_SIZE],
    /// The ciphertext including 16-byte Poly1305 tag
    pub ciphertext: Vec<u8>,
}

impl SealedMessage {
    /// Plaintext length (ciphertext length minus authentication tag).
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len().saturating_sub(TAG_SIZE)
    }

    /// Wire form: `nonce || ciphertext || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(NONCE_SIZE + self.ciphertext.len());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Parse the wire form.
    ///
    /// # Errors
    ///
    /// - `InvalidCiphertext`: fewer than [`MIN_SEALED_SIZE`] bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < MIN_SEALED_SIZE {
            return Err(CryptoError::InvalidCiphertext {
                actual: bytes.len(),
                minimum: MIN_SEALED_SIZE,
            });
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_SIZE);
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(nonce_bytes);

        Ok(Self { nonce, ciphertext: ciphertext.to_vec() })
    }
}

/// Seal a message under a fresh random nonce.
///
/// # Errors
///
/// - `RandomSourceFailure`: no nonce could be drawn; nothing is encrypted
pub fn seal_message(
    key: &ChatKey,
    context: &ConversationContext<'_>,
    plaintext: &[u8],
    random: &impl RandomSource,
) -> Result<SealedMessage, CryptoError> {
    let mut nonce = [0u8; NONCE_SIZE];
    random.fill(&mut nonce)?;

    Ok(seal_with_nonce(key, context, plaintext, nonce))
}

/// Seal a message under an explicit nonce.
///
/// # Security
///
/// - Caller MUST never reuse a nonce under the same key; production code goes
///   through [`seal_message`]
pub fn seal_with_nonce(
    key: &ChatKey,
    context: &ConversationContext<'_>,
    plaintext: &[u8],
    nonce: [u8; NONCE_SIZE],
) -> SealedMessage {
    let cipher = ChaCha20Poly1305::new(key.key().into());
    let aad = context.associated_data();
    let payload = Payload { msg: plaintext, aad: &aad };

    let Ok(ciphertext) = cipher.encrypt(Nonce::from_slice(&nonce), payload) else {
        unreachable!("ChaCha20-Poly1305 encryption cannot fail below 256 GiB of plaintext");
    };

    SealedMessage { nonce, ciphertext }
}

/// Open a sealed message.
///
/// Returns the decrypted plaintext. No plaintext is produced unless the tag
/// verifies.
///
/// # Errors
///
/// - `InvalidCiphertext`: ciphertext is shorter than a tag
/// - `AuthenticationFailure`: wrong key, wrong context or tampering
pub fn open_message(
    key: &ChatKey,
    context: &ConversationContext<'_>,
    sealed: &SealedMessage,
) -> Result<Vec<u8>, CryptoError> {
    if sealed.ciphertext.len() < TAG_SIZE {
        return Err(CryptoError::InvalidCiphertext {
            actual: NONCE_SIZE + sealed.ciphertext.len(),
            minimum: MIN_SEALED_SIZE,
        });
    }

    let cipher = ChaCha20Poly1305::new(key.key().into());
    let aad = context.associated_data();
    let payload = Payload { msg: sealed.ciphertext.as_slice(), aad: &aad };

    cipher
        .decrypt(Nonce::from_slice(&sealed.nonce), payload)
        .map_err(|_| CryptoError::AuthenticationFailure)
}
