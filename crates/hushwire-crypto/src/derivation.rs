//! Per-chat key derivation using HKDF

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::agreement::{KEY_SIZE, SharedSecret};

/// Label used for chat key derivation
const CHAT_KEY_LABEL: &[u8] = b"hushwireChatKeyV1";

/// Symmetric AEAD key for a single chat.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChatKey {
    key: [u8; KEY_SIZE],
}

impl ChatKey {
    /// Use raw bytes directly as an AEAD key.
    pub fn from_bytes(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// 32-byte symmetric key for ChaCha20-Poly1305.
    pub fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for ChatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChatKey(..)")
    }
}

/// Derive the chat key from a shared secret.
///
/// The chat id is the HKDF salt, so one shared secret yields independent keys
/// for every chat between the same two identities.
///
/// # Security
///
/// - Different chats produce different keys (domain separation)
/// - Deterministic: both peers derive the same key from the same inputs
pub fn derive_chat_key(shared_secret: &SharedSecret, chat_id: &str) -> ChatKey {
    let hkdf = Hkdf::<Sha256>::new(Some(chat_id.as_bytes()), shared_secret.as_bytes());

    let mut key = [0u8; KEY_SIZE];
    let Ok(()) = hkdf.expand(CHAT_KEY_LABEL, &mut key) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };

    ChatKey { key }
}
