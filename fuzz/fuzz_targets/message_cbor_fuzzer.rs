//! Fuzz target for stored message records
//!
//! Feeds arbitrary bytes to the CBOR record decoder and opens whatever
//! decodes.
//!
//! # Invariants
//!
//! - Decoding never panics, only returns `Serialization` errors
//! - A decoded record re-encodes and decodes to an equal record
//! - Opening a decoded record never panics and never succeeds under a key
//!   that did not seal it

#![no_main]

use hushwire_core::{models::CoreMessage, CoreConfig, CoreError, CryptoService};
use hushwire_crypto::codec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let message = match CoreMessage::from_cbor(data) {
        Ok(message) => message,
        Err(err) => {
            assert!(matches!(err, CoreError::Serialization(_)));
            return;
        },
    };

    let Ok(bytes) = message.to_cbor() else {
        panic!("decoded record failed to re-encode");
    };
    assert_eq!(CoreMessage::from_cbor(&bytes).ok().as_ref(), Some(&message));

    let service = CryptoService::new(CoreConfig::default());
    let secret = codec::encode(&[0x42; 32]);
    assert!(message.open(&service, &secret).is_err(), "forged record opened");
});
