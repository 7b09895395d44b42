//! X25519 identity keys and shared-secret derivation
//!
//! # Security Properties
//!
//! - Private keys and shared secrets are zeroized on drop
//! - Private keys never appear in `Debug` output
//! - Agreement is commutative: `derive(a, B) == derive(b, A)`
//! - Public keys are length-checked only; low-order points are accepted as
//!   the underlying primitive accepts them

use x25519_dalek::StaticSecret;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{error::CryptoError, random::RandomSource};

/// Size of private keys, public keys and shared secrets (32 bytes)
pub const KEY_SIZE: usize = 32;

/// X25519 private scalar.
///
/// Stored unclamped; clamping happens inside the scalar multiplication.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; KEY_SIZE],
}

impl PrivateKey {
    /// Create from raw bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: input is not exactly 32 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes = <[u8; KEY_SIZE]>::try_from(bytes)
            .map_err(|_| CryptoError::InvalidKeyLength { expected: KEY_SIZE, actual: bytes.len() })?;
        Ok(Self { bytes })
    }

    /// Raw scalar bytes, for export by the owner.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// The public point for this scalar.
    ///
    /// Deterministic: the same private key always yields the same public key.
    pub fn public_key(&self) -> PublicKey {
        let secret = StaticSecret::from(self.bytes);
        PublicKey { bytes: x25519_dalek::PublicKey::from(&secret).to_bytes() }
    }
}

impl From<[u8; KEY_SIZE]> for PrivateKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// X25519 public point.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; KEY_SIZE],
}

impl PublicKey {
    /// Create from raw bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: input is not exactly 32 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes = <[u8; KEY_SIZE]>::try_from(bytes)
            .map_err(|_| CryptoError::InvalidKeyLength { expected: KEY_SIZE, actual: bytes.len() })?;
        Ok(Self { bytes })
    }

    /// Raw point bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl From<[u8; KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({:02x}{:02x}..)", self.bytes[0], self.bytes[1])
    }
}

/// Long-lived identity keypair.
///
/// Invariant: `public == private.public_key()`.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a new identity keypair from 32 random bytes.
    ///
    /// # Errors
    ///
    /// - `RandomSourceFailure`: the random source could not produce bytes
    pub fn generate(random: &impl RandomSource) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; KEY_SIZE];
        let filled = random.fill(&mut bytes);
        if let Err(err) = filled {
            bytes.zeroize();
            return Err(err);
        }

        let private = PrivateKey::from(bytes);
        bytes.zeroize();
        Ok(Self::from_private(private))
    }

    /// Rebuild a keypair from an existing private key.
    pub fn from_private(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }

    /// The private half.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// The public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

/// 32-byte X25519 output shared by two identities.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; KEY_SIZE],
}

impl SharedSecret {
    /// Create from raw bytes (e.g. a secret the caller cached).
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: input is not exactly 32 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes = <[u8; KEY_SIZE]>::try_from(bytes)
            .map_err(|_| CryptoError::InvalidKeyLength { expected: KEY_SIZE, actual: bytes.len() })?;
        Ok(Self { bytes })
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl From<[u8; KEY_SIZE]> for SharedSecret {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Derive the shared secret between our private key and a peer's public key.
///
/// Both parties compute the same value: `derive(a, B) == derive(b, A)`.
pub fn derive_shared_secret(own: &PrivateKey, peer: &PublicKey) -> SharedSecret {
    let secret = StaticSecret::from(own.bytes);
    let peer = x25519_dalek::PublicKey::from(peer.bytes);
    SharedSecret { bytes: secret.diffie_hellman(&peer).to_bytes() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::OsRandom;

    struct FixedRandom(u8);

    impl RandomSource for FixedRandom {
        fn fill(&self, buffer: &mut [u8]) -> Result<(), CryptoError> {
            buffer.fill(self.0);
            Ok(())
        }
    }

    struct FailingRandom;

    impl RandomSource for FailingRandom {
        fn fill(&self, _buffer: &mut [u8]) -> Result<(), CryptoError> {
            Err(CryptoError::RandomSourceFailure { reason: "entropy unavailable".to_string() })
        }
    }

    fn key_from_hex(hex_str: &str) -> [u8; KEY_SIZE] {
        let bytes = hex::decode(hex_str).unwrap();
        <[u8; KEY_SIZE]>::try_from(bytes.as_slice()).unwrap()
    }

    // RFC 7748 section 6.1
    const ALICE_PRIVATE: &str = "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a";
    const ALICE_PUBLIC: &str = "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a";
    const BOB_PRIVATE: &str = "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb";
    const BOB_PUBLIC: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";
    const SHARED: &str = "4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742";

    #[test]
    fn rfc7748_public_keys() {
        let alice = PrivateKey::from(key_from_hex(ALICE_PRIVATE));
        let bob = PrivateKey::from(key_from_hex(BOB_PRIVATE));

        assert_eq!(alice.public_key().as_bytes(), &key_from_hex(ALICE_PUBLIC));
        assert_eq!(bob.public_key().as_bytes(), &key_from_hex(BOB_PUBLIC));
    }

    #[test]
    fn rfc7748_shared_secret() {
        let alice = PrivateKey::from(key_from_hex(ALICE_PRIVATE));
        let bob_public = PublicKey::from(key_from_hex(BOB_PUBLIC));

        let shared = derive_shared_secret(&alice, &bob_public);
        assert_eq!(shared.as_bytes(), &key_from_hex(SHARED));
    }

    #[test]
    fn agreement_is_symmetric() {
        let alice = KeyPair::generate(&OsRandom).unwrap();
        let bob = KeyPair::generate(&OsRandom).unwrap();

        let secret_a = derive_shared_secret(alice.private_key(), bob.public_key());
        let secret_b = derive_shared_secret(bob.private_key(), alice.public_key());

        assert_eq!(secret_a.as_bytes(), secret_b.as_bytes());
    }

    #[test]
    fn public_key_is_deterministic() {
        let private = PrivateKey::from([0x42; KEY_SIZE]);
        assert_eq!(private.public_key(), private.public_key());
    }

    #[test]
    fn generate_uses_random_source() {
        let pair = KeyPair::generate(&FixedRandom(0x11)).unwrap();
        assert_eq!(pair.private_key().as_bytes(), &[0x11; KEY_SIZE]);
        assert_eq!(pair.public_key(), &PrivateKey::from([0x11; KEY_SIZE]).public_key());
    }

    #[test]
    fn generate_propagates_random_failure() {
        let result = KeyPair::generate(&FailingRandom);
        assert!(matches!(result, Err(CryptoError::RandomSourceFailure { .. })));
    }

    #[test]
    fn generated_keypairs_differ() {
        let first = KeyPair::generate(&OsRandom).unwrap();
        let second = KeyPair::generate(&OsRandom).unwrap();
        assert_ne!(first.public_key(), second.public_key());
    }

    #[test]
    fn from_private_recomputes_public() {
        let original = KeyPair::generate(&OsRandom).unwrap();
        let restored = KeyPair::from_private(original.private_key().clone());
        assert_eq!(original.public_key(), restored.public_key());
    }

    #[test]
    fn from_bytes_rejects_wrong_lengths() {
        for len in [0, 1, 31, 33, 64] {
            let bytes = vec![0u8; len];
            let expected = Err(CryptoError::InvalidKeyLength { expected: KEY_SIZE, actual: len });

            assert_eq!(PrivateKey::from_bytes(&bytes).map(|_| ()), expected);
            assert_eq!(PublicKey::from_bytes(&bytes).map(|_| ()), expected);
            assert_eq!(SharedSecret::from_bytes(&bytes).map(|_| ()), expected);
        }
    }

    #[test]
    fn debug_does_not_leak_secrets() {
        let private = PrivateKey::from([0xAB; KEY_SIZE]);
        let shared = SharedSecret::from([0xCD; KEY_SIZE]);

        assert_eq!(format!("{private:?}"), "PrivateKey(..)");
        assert_eq!(format!("{shared:?}"), "SharedSecret(..)");
        let pair = format!("{:?}", KeyPair::from_private(private));
        assert!(pair.contains("PrivateKey(..)"));
    }
}
