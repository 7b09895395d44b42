//! Core
//!
//! Stateless messaging crypto service over text-encoded inputs. Every
//! operation decodes its base64 inputs, runs the primitives from
//! [`hushwire_crypto`], and re-encodes the result. Nothing is retained between
//! calls.
//!
//! # Data Flow
//!
//! ```text
//! base64 text ─► decode ─► X25519 / HKDF / ChaCha20-Poly1305 ─► encode ─► base64 text
//! ```
//!
//! # Components
//!
//! - [`MessageCrypto`]: the operation surface exposed to host applications
//! - [`CryptoService`]: the implementation, generic over its [`RandomSource`]
//! - [`CoreConfig`]: input size limits
//! - [`models`]: user, chat and message records the host persists
//!
//! # Sealed Text Format
//!
//! `base64(nonce[12] || ciphertext || tag[16])`, sealed under
//! `HKDF(shared_secret, salt = chat_id)` with `(chat_id, sender_id)` as
//! associated data.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod error;
pub mod models;
mod service;

pub use config::CoreConfig;
pub use error::CoreError;
pub use hushwire_crypto::{CryptoError, OsRandom, RandomSource};
pub use service::{CryptoService, EncodedKeyPair, MessageCrypto};
