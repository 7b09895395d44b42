//! Text encoding for binary material crossing the host boundary
//!
//! Standard base64 alphabet with `=` padding. Decoding is strict: characters
//! outside the alphabet, truncated groups and non-canonical trailing bits are
//! rejected rather than skipped.

use base64::{Engine, engine::general_purpose::STANDARD};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Encode bytes as padded standard base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded standard base64 back into bytes.
///
/// # Errors
///
/// - `MalformedEncoding`: invalid character, invalid length or bad padding
pub fn decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(text)
        .map_err(|err| CryptoError::MalformedEncoding { reason: err.to_string() })
}

/// Decode base64 that must contain exactly `N` bytes.
///
/// The intermediate buffer is zeroized on drop.
///
/// # Errors
///
/// - `MalformedEncoding`: text is not valid base64
/// - `InvalidKeyLength`: decoded length differs from `N`
pub fn decode_array<const N: usize>(text: &str) -> Result<[u8; N], CryptoError> {
    let bytes = Zeroizing::new(decode(text)?);
    <[u8; N]>::try_from(bytes.as_slice())
        .map_err(|_| CryptoError::InvalidKeyLength { expected: N, actual: bytes.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_vectors() {
        // RFC 4648 section 10
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"fo"), "Zm8=");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(b"foob"), "Zm9vYg==");
        assert_eq!(encode(b"fooba"), "Zm9vYmE=");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn decode_known_vectors() {
        assert_eq!(decode("Zg==").unwrap(), b"f");
        assert_eq!(decode("Zm8=").unwrap(), b"fo");
        assert_eq!(decode("Zm9vYmFy").unwrap(), b"foobar");
    }

    #[test]
    fn decode_empty_is_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_rejects_single_character() {
        assert!(matches!(decode("A"), Err(CryptoError::MalformedEncoding { .. })));
    }

    #[test]
    fn decode_rejects_characters_outside_alphabet() {
        assert!(matches!(decode("Zm9v!mFy"), Err(CryptoError::MalformedEncoding { .. })));
        assert!(matches!(decode("Zm9v YmFy"), Err(CryptoError::MalformedEncoding { .. })));
        assert!(matches!(decode("Zm9v\nYmFy"), Err(CryptoError::MalformedEncoding { .. })));
    }

    #[test]
    fn decode_rejects_url_safe_alphabet() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet
        assert_eq!(decode("+/8=").unwrap(), vec![0xfb, 0xff]);
        assert!(matches!(decode("-_8="), Err(CryptoError::MalformedEncoding { .. })));
    }

    #[test]
    fn decode_rejects_missing_padding() {
        assert!(matches!(decode("Zg"), Err(CryptoError::MalformedEncoding { .. })));
    }

    #[test]
    fn decode_rejects_non_canonical_trailing_bits() {
        // "Zh==" carries bits that "Zg==" zeroes out
        assert!(matches!(decode("Zh=="), Err(CryptoError::MalformedEncoding { .. })));
    }

    #[test]
    fn decode_array_accepts_exact_length() {
        let text = encode(&[7u8; 32]);
        let key: [u8; 32] = decode_array(&text).unwrap();
        assert_eq!(key, [7u8; 32]);
    }

    #[test]
    fn decode_array_rejects_wrong_length() {
        let text = encode(&[7u8; 31]);
        let result = decode_array::<32>(&text);
        assert_eq!(result, Err(CryptoError::InvalidKeyLength { expected: 32, actual: 31 }));
    }

    #[test]
    fn decode_array_reports_malformed_before_length() {
        let result = decode_array::<32>("not base64!");
        assert!(matches!(result, Err(CryptoError::MalformedEncoding { .. })));
    }
}
