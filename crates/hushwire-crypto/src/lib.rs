//! Hushwire Cryptographic Primitives
//!
//! Cryptographic building blocks for the Hushwire messaging core. Everything
//! here is a pure function over bytes except for the [`RandomSource`] seam,
//! which callers provide so tests can run deterministically.
//!
//! # Key Lifecycle
//!
//! Each identity owns one long-lived X25519 keypair. Two identities agree on a
//! static shared secret, from which a per-chat AEAD key is derived. Every
//! message is sealed under that chat key with a fresh random nonce.
//!
//! ```text
//! Identity Private Key ──┐
//!                        ▼
//! Peer Public Key ───► X25519 → Shared Secret
//!                                  │
//!                                  ▼ HKDF(salt = chat_id)
//!                               Chat Key
//!                                  │
//!                                  ▼ ChaCha20-Poly1305(aad = chat_id, sender_id)
//!                        nonce || ciphertext || tag
//!                                  │
//!                                  ▼ base64
//!                             Sealed Text
//! ```
//!
//! # Security
//!
//! Confidentiality:
//! - A 96-bit nonce is drawn from the random source on every seal and
//!   prepended to the output, so no (key, nonce) pair is reused in practice
//! - Key material is zeroized on drop
//!
//! Authenticity:
//! - Poly1305 tag covers ciphertext and the conversation context
//! - Replaying a sealed message into another chat or under another sender id
//!   fails authentication
//! - Failed tag verification never yields partial plaintext
//!
//! Scope:
//! - No ratcheting and no forward secrecy beyond the static shared secret
//! - Public keys are length-checked only; X25519 accepts every 32-byte input

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod agreement;
pub mod codec;
pub mod derivation;
pub mod encryption;
pub mod error;
pub mod random;

pub use agreement::{KEY_SIZE, KeyPair, PrivateKey, PublicKey, SharedSecret, derive_shared_secret};
pub use codec::{decode, decode_array, encode};
pub use derivation::{ChatKey, derive_chat_key};
pub use encryption::{
    ConversationContext, MIN_SEALED_SIZE, NONCE_SIZE, SealedMessage, TAG_SIZE, open_message,
    seal_message, seal_with_nonce,
};
pub use error::CryptoError;
pub use random::{OsRandom, RandomSource};
