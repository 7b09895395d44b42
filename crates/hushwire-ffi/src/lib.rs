//! C ABI for the Hushwire messaging crypto core.
//!
//! Exposes the [`hushwire_core::MessageCrypto`] operations as `extern "C"`
//! functions over NUL-terminated UTF-8 strings. All binary values (keys,
//! secrets, sealed messages) cross as base64 text.
//!
//! # Ownership
//!
//! Every string written to an out-pointer is allocated by this library and
//! owned by the caller, who must release it exactly once with
//! [`hw_free_string`]. Input strings are borrowed for the duration of the call
//! and never retained or freed.
//!
//! # Status Codes
//!
//! Every operation returns an [`HwStatus`]. Out-pointers are set to NULL on
//! entry and written only on success, so on failure there is nothing to free.
//!
//! ```c
//! char *priv = NULL, *pub = NULL;
//! if (hw_generate_identity_keypair(&priv, &pub) == HW_SUCCESS) {
//!     publish(pub);
//!     store(priv);
//!     hw_free_string(priv);
//!     hw_free_string(pub);
//! }
//! ```

#![deny(missing_docs)]

mod api;
mod error;
mod status;
mod strings;

pub use api::{
    hw_decrypt_message, hw_derive_shared_secret, hw_encrypt_message, hw_free_string,
    hw_generate_identity_keypair, hw_public_key_from_private, hw_status_description,
};
pub use error::FfiError;
pub use status::HwStatus;
