//! Fuzz target for the base64 codec
//!
//! # Invariants
//!
//! - `decode` never panics on arbitrary text
//! - Any text that decodes re-encodes to exactly the same text (strict,
//!   canonical decoding)
//! - `encode` output always decodes back to the input bytes
//! - `decode_array` accepts only exactly 32 bytes

#![no_main]

use hushwire_crypto::{codec, CryptoError, KEY_SIZE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let encoded = codec::encode(data);
    assert_eq!(codec::decode(&encoded).as_deref(), Ok(data));

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    match codec::decode(text) {
        Ok(bytes) => {
            assert_eq!(codec::encode(&bytes), text, "non-canonical text accepted");

            match codec::decode_array::<KEY_SIZE>(text) {
                Ok(array) => assert_eq!(array.as_slice(), bytes.as_slice()),
                Err(CryptoError::InvalidKeyLength { actual, .. }) => {
                    assert_ne!(actual, KEY_SIZE);
                    assert_eq!(actual, bytes.len());
                },
                Err(err) => panic!("unexpected error for decodable text: {err}"),
            }
        },
        Err(err) => assert!(matches!(err, CryptoError::MalformedEncoding { .. })),
    }
});
