//! Exported `hw_*` functions.
//!
//! Each function clears its out-pointers, validates inputs, runs the core
//! operation inside a panic guard, and writes the result only on success.

#![allow(unsafe_code)]

use std::panic::{self, AssertUnwindSafe};

use hushwire_core::{CoreConfig, CryptoService, MessageCrypto};
use libc::c_char;

use crate::{
    error::FfiError,
    status::HwStatus,
    strings::{borrow_str, clear_out, release, to_c_string, write_out},
};

fn service() -> CryptoService {
    CryptoService::new(CoreConfig::default())
}

/// Run one boundary operation, converting errors and panics into a status.
fn guard(operation: &'static str, body: impl FnOnce() -> Result<(), FfiError>) -> HwStatus {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(())) => HwStatus::Success,
        Ok(Err(err)) => {
            let status = HwStatus::from(&err);
            tracing::debug!(operation, status = status as i32, "FFI call failed");
            status
        },
        Err(_) => {
            tracing::error!(operation, "panic caught at FFI boundary");
            HwStatus::Internal
        },
    }
}

/// Generate a new identity keypair.
///
/// # Arguments
///
/// * `out_private_b64` - Receives base64 of the 32-byte private key
/// * `out_public_b64` - Receives base64 of the 32-byte public key
///
/// # Returns
///
/// `HwStatus::Success`, `NullPointer` or `RandomSourceFailure`.
///
/// # Safety
///
/// - Both out-pointers must be valid for a pointer-sized write.
/// - On success both strings must be released with [`hw_free_string`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hw_generate_identity_keypair(
    out_private_b64: *mut *mut c_char,
    out_public_b64: *mut *mut c_char,
) -> HwStatus {
    // SAFETY: out-pointers are NULL or writable per the caller contract
    unsafe {
        clear_out(out_private_b64);
        clear_out(out_public_b64);
    }
    if out_private_b64.is_null() || out_public_b64.is_null() {
        return HwStatus::NullPointer;
    }

    guard("generate_identity_keypair", || {
        let pair = service().generate_identity_keypair()?;
        let private = to_c_string(&pair.private_key)?;
        let public = to_c_string(&pair.public_key)?;

        // SAFETY: both out-pointers checked non-null above
        unsafe {
            write_out(out_private_b64, private);
            write_out(out_public_b64, public);
        }
        Ok(())
    })
}

/// Recompute the public key for a private key.
///
/// # Returns
///
/// `HwStatus::Success`, `NullPointer`, `InvalidUtf8`, `MalformedEncoding` or
/// `InvalidKeyLength`.
///
/// # Safety
///
/// - `private_b64` must be a valid NUL-terminated string.
/// - `out_public_b64` must be valid for a pointer-sized write.
/// - On success the output must be released with [`hw_free_string`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hw_public_key_from_private(
    private_b64: *const c_char,
    out_public_b64: *mut *mut c_char,
) -> HwStatus {
    // SAFETY: out-pointer is NULL or writable per the caller contract
    unsafe { clear_out(out_public_b64) };
    if out_public_b64.is_null() {
        return HwStatus::NullPointer;
    }

    guard("public_key_from_private", || {
        // SAFETY: input validity is the caller contract
        let private = unsafe { borrow_str(private_b64, "private_b64") }?;

        let public = to_c_string(&service().public_key_of(private)?)?;

        // SAFETY: out-pointer checked non-null above
        unsafe { write_out(out_public_b64, public) };
        Ok(())
    })
}

/// Derive the shared secret with a peer.
///
/// # Arguments
///
/// * `my_private_b64` - Our base64 private key
/// * `peer_public_b64` - Peer's base64 public key
/// * `out_shared_b64` - Receives base64 of the 32-byte shared secret
///
/// # Returns
///
/// `HwStatus::Success`, `NullPointer`, `InvalidUtf8`, `MalformedEncoding` or
/// `InvalidKeyLength`.
///
/// # Safety
///
/// - Input pointers must be valid NUL-terminated strings.
/// - `out_shared_b64` must be valid for a pointer-sized write.
/// - On success the output must be released with [`hw_free_string`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hw_derive_shared_secret(
    my_private_b64: *const c_char,
    peer_public_b64: *const c_char,
    out_shared_b64: *mut *mut c_char,
) -> HwStatus {
    // SAFETY: out-pointer is NULL or writable per the caller contract
    unsafe { clear_out(out_shared_b64) };
    if out_shared_b64.is_null() {
        return HwStatus::NullPointer;
    }

    guard("derive_shared_secret", || {
        // SAFETY: input validity is the caller contract
        let (own, peer) = unsafe {
            (
                borrow_str(my_private_b64, "my_private_b64")?,
                borrow_str(peer_public_b64, "peer_public_b64")?,
            )
        };

        let shared = service().derive_shared_secret(own, peer)?;
        let shared = to_c_string(&shared)?;

        // SAFETY: out-pointer checked non-null above
        unsafe { write_out(out_shared_b64, shared) };
        Ok(())
    })
}

/// Seal a message for a chat.
///
/// # Arguments
///
/// * `shared_b64` - base64 shared secret from [`hw_derive_shared_secret`]
/// * `chat_id` - Chat identifier, bound as associated data
/// * `sender_id` - Sender identifier, bound as associated data
/// * `plaintext` - UTF-8 message text
/// * `out_encrypted_b64` - Receives `base64(nonce || ciphertext || tag)`
///
/// # Returns
///
/// `HwStatus::Success`, `NullPointer`, `InvalidUtf8`, `MalformedEncoding`,
/// `InvalidKeyLength`, `LimitExceeded` or `RandomSourceFailure`.
///
/// # Safety
///
/// - Input pointers must be valid NUL-terminated strings.
/// - `out_encrypted_b64` must be valid for a pointer-sized write.
/// - On success the output must be released with [`hw_free_string`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hw_encrypt_message(
    shared_b64: *const c_char,
    chat_id: *const c_char,
    sender_id: *const c_char,
    plaintext: *const c_char,
    out_encrypted_b64: *mut *mut c_char,
) -> HwStatus {
    // SAFETY: out-pointer is NULL or writable per the caller contract
    unsafe { clear_out(out_encrypted_b64) };
    if out_encrypted_b64.is_null() {
        return HwStatus::NullPointer;
    }

    guard("encrypt_message", || {
        // SAFETY: input validity is the caller contract
        let (shared, chat, sender, text) = unsafe {
            (
                borrow_str(shared_b64, "shared_b64")?,
                borrow_str(chat_id, "chat_id")?,
                borrow_str(sender_id, "sender_id")?,
                borrow_str(plaintext, "plaintext")?,
            )
        };

        let sealed = to_c_string(&service().seal_message(shared, chat, sender, text)?)?;

        // SAFETY: out-pointer checked non-null above
        unsafe { write_out(out_encrypted_b64, sealed) };
        Ok(())
    })
}

/// Open a message sealed by [`hw_encrypt_message`].
///
/// `chat_id` and `sender_id` must match the values used when sealing.
///
/// # Returns
///
/// `HwStatus::Success`, `NullPointer`, `InvalidUtf8`, `MalformedEncoding`,
/// `InvalidKeyLength`, `InvalidCiphertext`, `AuthenticationFailure`,
/// `LimitExceeded` or `InvalidPlaintext`. On `AuthenticationFailure` no
/// plaintext is written.
///
/// # Safety
///
/// - Input pointers must be valid NUL-terminated strings.
/// - `out_plaintext` must be valid for a pointer-sized write.
/// - On success the output must be released with [`hw_free_string`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hw_decrypt_message(
    shared_b64: *const c_char,
    chat_id: *const c_char,
    sender_id: *const c_char,
    encrypted_b64: *const c_char,
    out_plaintext: *mut *mut c_char,
) -> HwStatus {
    // SAFETY: out-pointer is NULL or writable per the caller contract
    unsafe { clear_out(out_plaintext) };
    if out_plaintext.is_null() {
        return HwStatus::NullPointer;
    }

    guard("decrypt_message", || {
        // SAFETY: input validity is the caller contract
        let (shared, chat, sender, sealed) = unsafe {
            (
                borrow_str(shared_b64, "shared_b64")?,
                borrow_str(chat_id, "chat_id")?,
                borrow_str(sender_id, "sender_id")?,
                borrow_str(encrypted_b64, "encrypted_b64")?,
            )
        };

        let plaintext = to_c_string(&service().open_message(shared, chat, sender, sealed)?)?;

        // SAFETY: out-pointer checked non-null above
        unsafe { write_out(out_plaintext, plaintext) };
        Ok(())
    })
}

/// Release a string returned by any `hw_*` function.
///
/// The buffer is zeroized before it is freed. NULL is ignored.
///
/// # Safety
///
/// `s` must be NULL or a string returned by this library that has not been
/// released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hw_free_string(s: *mut c_char) {
    // SAFETY: ownership contract forwarded to the caller
    unsafe { release(s) };
}

/// Static description for a status code. Must not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn hw_status_description(status: i32) -> *const c_char {
    HwStatus::from_code(status).description().as_ptr()
}
