//! Text-encoded messaging crypto service.
//!
//! The single implementation of the host-facing operations. Which random
//! source backs it is decided at build time by the type parameter.

use hushwire_crypto::{
    ChatKey, ConversationContext, CryptoError, KeyPair, OsRandom, PrivateKey, PublicKey,
    RandomSource, SealedMessage, SharedSecret, codec, derive_chat_key, derive_shared_secret,
    open_message, seal_message,
};
use zeroize::{Zeroize, Zeroizing};

use crate::{config::CoreConfig, error::CoreError};

/// A freshly generated identity keypair in text form.
#[derive(Clone)]
pub struct EncodedKeyPair {
    /// base64 private scalar; owned by the caller, never persisted here
    pub private_key: Zeroizing<String>,
    /// base64 public point, safe to publish
    pub public_key: String,
}

impl std::fmt::Debug for EncodedKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedKeyPair")
            .field("private_key", &"..")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Operations exposed to host applications.
///
/// All binary values are base64 text. Implementations hold no state between
/// calls and are safe to call concurrently.
pub trait MessageCrypto {
    /// Generate a new X25519 identity keypair.
    fn generate_identity_keypair(&self) -> Result<EncodedKeyPair, CoreError>;

    /// Recompute the public key belonging to a private key.
    fn public_key_of(&self, private_key: &str) -> Result<String, CoreError>;

    /// Derive the shared secret between our private key and a peer's public
    /// key.
    fn derive_shared_secret(
        &self,
        own_private_key: &str,
        peer_public_key: &str,
    ) -> Result<Zeroizing<String>, CoreError>;

    /// Seal plaintext for a chat, binding the chat and sender ids.
    fn seal_message(
        &self,
        shared_secret: &str,
        chat_id: &str,
        sender_id: &str,
        plaintext: &str,
    ) -> Result<String, CoreError>;

    /// Open sealed text produced by [`MessageCrypto::seal_message`] with the
    /// same chat and sender ids.
    fn open_message(
        &self,
        shared_secret: &str,
        chat_id: &str,
        sender_id: &str,
        sealed: &str,
    ) -> Result<String, CoreError>;
}

/// Decode base64 key material and parse it as a 32-byte key type.
///
/// The decoded buffer is zeroized on drop.
fn decode_key<K>(
    text: &str,
    parse: impl FnOnce(&[u8]) -> Result<K, CryptoError>,
) -> Result<K, CoreError> {
    let bytes = Zeroizing::new(codec::decode(text)?);
    Ok(parse(&bytes)?)
}

/// Production [`MessageCrypto`] implementation.
#[derive(Debug, Clone, Default)]
pub struct CryptoService<R = OsRandom> {
    random: R,
    config: CoreConfig,
}

impl CryptoService<OsRandom> {
    /// Service backed by the OS CSPRNG.
    pub fn new(config: CoreConfig) -> Self {
        Self { random: OsRandom, config }
    }
}

impl<R: RandomSource> CryptoService<R> {
    /// Service backed by a specific random source.
    pub fn with_random(random: R, config: CoreConfig) -> Self {
        Self { random, config }
    }

    /// Active limits.
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    fn check_limit(field: &'static str, actual: usize, limit: usize) -> Result<(), CoreError> {
        if actual > limit {
            return Err(CoreError::LimitExceeded { field, limit, actual });
        }
        Ok(())
    }

    fn check_identifiers(&self, chat_id: &str, sender_id: &str) -> Result<(), CoreError> {
        let limit = self.config.max_identifier_bytes;
        Self::check_limit("chat_id", chat_id.len(), limit)?;
        Self::check_limit("sender_id", sender_id.len(), limit)
    }

    fn chat_key(shared_secret: &str, chat_id: &str) -> Result<ChatKey, CoreError> {
        let secret = decode_key(shared_secret, SharedSecret::from_bytes)?;
        Ok(derive_chat_key(&secret, chat_id))
    }
}

impl<R: RandomSource> MessageCrypto for CryptoService<R> {
    fn generate_identity_keypair(&self) -> Result<EncodedKeyPair, CoreError> {
        let pair = KeyPair::generate(&self.random).inspect_err(|err| {
            tracing::error!(error = %err, "identity keypair generation failed");
        })?;

        tracing::debug!("generated identity keypair");

        Ok(EncodedKeyPair {
            private_key: Zeroizing::new(codec::encode(pair.private_key().as_bytes())),
            public_key: codec::encode(pair.public_key().as_bytes()),
        })
    }

    fn public_key_of(&self, private_key: &str) -> Result<String, CoreError> {
        let private = decode_key(private_key, PrivateKey::from_bytes)?;
        Ok(codec::encode(private.public_key().as_bytes()))
    }

    fn derive_shared_secret(
        &self,
        own_private_key: &str,
        peer_public_key: &str,
    ) -> Result<Zeroizing<String>, CoreError> {
        let own = decode_key(own_private_key, PrivateKey::from_bytes)?;
        let peer = decode_key(peer_public_key, PublicKey::from_bytes)?;

        let shared = derive_shared_secret(&own, &peer);
        tracing::debug!("derived shared secret");

        Ok(Zeroizing::new(codec::encode(shared.as_bytes())))
    }

    fn seal_message(
        &self,
        shared_secret: &str,
        chat_id: &str,
        sender_id: &str,
        plaintext: &str,
    ) -> Result<String, CoreError> {
        self.check_identifiers(chat_id, sender_id)?;
        Self::check_limit("plaintext", plaintext.len(), self.config.max_plaintext_bytes)?;

        let key = Self::chat_key(shared_secret, chat_id)?;
        let context = ConversationContext::new(chat_id, sender_id);
        let sealed = seal_message(&key, &context, plaintext.as_bytes(), &self.random)
            .inspect_err(|err| tracing::error!(error = %err, "seal failed"))?;

        tracing::debug!(plaintext_len = plaintext.len(), "sealed message");

        Ok(codec::encode(&sealed.to_bytes()))
    }

    fn open_message(
        &self,
        shared_secret: &str,
        chat_id: &str,
        sender_id: &str,
        sealed: &str,
    ) -> Result<String, CoreError> {
        self.check_identifiers(chat_id, sender_id)?;
        Self::check_limit("sealed message", sealed.len(), self.config.max_sealed_text_bytes())?;

        let key = Self::chat_key(shared_secret, chat_id)?;
        let sealed = SealedMessage::from_bytes(&codec::decode(sealed)?)?;
        Self::check_limit("plaintext", sealed.plaintext_len(), self.config.max_plaintext_bytes)?;

        let context = ConversationContext::new(chat_id, sender_id);
        let plaintext = open_message(&key, &context, &sealed).inspect_err(|err| {
            if err.is_security_event() {
                tracing::warn!(
                    sealed_len = sealed.ciphertext.len(),
                    "message authentication failed"
                );
            }
        })?;

        tracing::debug!(plaintext_len = plaintext.len(), "opened message");

        String::from_utf8(plaintext).map_err(|err| {
            err.into_bytes().zeroize();
            CoreError::InvalidPlaintext
        })
    }
}

#[cfg(test)]
mod tests {
    use hushwire_crypto::{KEY_SIZE, NONCE_SIZE};

    use super::*;

    struct FailingRandom;

    impl RandomSource for FailingRandom {
        fn fill(&self, _buffer: &mut [u8]) -> Result<(), CryptoError> {
            Err(CryptoError::RandomSourceFailure { reason: "entropy unavailable".to_string() })
        }
    }

    fn service() -> CryptoService {
        CryptoService::new(CoreConfig::default())
    }

    #[test]
    fn concrete_two_party_scenario() {
        let service = service();
        let alice = service.generate_identity_keypair().unwrap();
        let bob = service.generate_identity_keypair().unwrap();

        let secret_a = service.derive_shared_secret(&alice.private_key, &bob.public_key).unwrap();
        let secret_b = service.derive_shared_secret(&bob.private_key, &alice.public_key).unwrap();
        assert_eq!(secret_a, secret_b);

        let sealed = service.seal_message(&secret_a, "c1", "u1", "hello").unwrap();
        let opened = service.open_message(&secret_b, "c1", "u1", &sealed).unwrap();
        assert_eq!(opened, "hello");
    }

    #[test]
    fn public_key_of_matches_generated() {
        let service = service();
        let pair = service.generate_identity_keypair().unwrap();

        assert_eq!(service.public_key_of(&pair.private_key).unwrap(), pair.public_key);
    }

    #[test]
    fn generated_keys_are_32_bytes() {
        let pair = service().generate_identity_keypair().unwrap();

        assert_eq!(codec::decode(&pair.private_key).unwrap().len(), KEY_SIZE);
        assert_eq!(codec::decode(&pair.public_key).unwrap().len(), KEY_SIZE);
    }

    #[test]
    fn derive_rejects_short_private_key() {
        let peer = service().generate_identity_keypair().unwrap();
        let short = codec::encode(&[1u8; 16]);

        let result = service().derive_shared_secret(&short, &peer.public_key);
        assert_eq!(
            result.map(|_| ()),
            Err(CoreError::Crypto(CryptoError::InvalidKeyLength { expected: 32, actual: 16 }))
        );
    }

    #[test]
    fn derive_rejects_long_public_key() {
        let own = service().generate_identity_keypair().unwrap();
        let long = codec::encode(&[1u8; 33]);

        let result = service().derive_shared_secret(&own.private_key, &long);
        assert_eq!(
            result.map(|_| ()),
            Err(CoreError::Crypto(CryptoError::InvalidKeyLength { expected: 32, actual: 33 }))
        );
    }

    #[test]
    fn derive_rejects_malformed_text() {
        let own = service().generate_identity_keypair().unwrap();

        let result = service().derive_shared_secret(&own.private_key, "%%%");
        assert!(matches!(result, Err(CoreError::Crypto(CryptoError::MalformedEncoding { .. }))));
    }

    #[test]
    fn seal_rejects_bad_secret_length() {
        let secret = codec::encode(&[0u8; 31]);

        let result = service().seal_message(&secret, "c1", "u1", "hello");
        assert_eq!(
            result,
            Err(CoreError::Crypto(CryptoError::InvalidKeyLength { expected: 32, actual: 31 }))
        );
    }

    #[test]
    fn open_rejects_bad_secret_length() {
        let valid = codec::encode(&[7u8; 32]);
        let sealed = service().seal_message(&valid, "c1", "u1", "hello").unwrap();
        let secret = codec::encode(&[7u8; 31]);

        let result = service().open_message(&secret, "c1", "u1", &sealed);
        assert_eq!(
            result,
            Err(CoreError::Crypto(CryptoError::InvalidKeyLength { expected: 32, actual: 31 }))
        );
    }

    #[test]
    fn sealed_text_layout() {
        let secret = codec::encode(&[7u8; 32]);
        let sealed = service().seal_message(&secret, "c1", "u1", "hello").unwrap();

        let bytes = codec::decode(&sealed).unwrap();
        assert_eq!(bytes.len(), NONCE_SIZE + "hello".len() + 16);
    }

    #[test]
    fn same_plaintext_seals_differently() {
        let secret = codec::encode(&[7u8; 32]);
        let service = service();

        let first = service.seal_message(&secret, "c1", "u1", "hello").unwrap();
        let second = service.seal_message(&secret, "c1", "u1", "hello").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn open_with_other_context_fails_authentication() {
        let secret = codec::encode(&[7u8; 32]);
        let service = service();
        let sealed = service.seal_message(&secret, "c1", "u1", "hello").unwrap();

        for (chat, sender) in [("c2", "u1"), ("c1", "u2")] {
            let result = service.open_message(&secret, chat, sender, &sealed);
            assert_eq!(result, Err(CoreError::Crypto(CryptoError::AuthenticationFailure)));
        }
    }

    #[test]
    fn open_with_wrong_secret_fails_authentication() {
        let service = service();
        let sealed = service.seal_message(&codec::encode(&[1u8; 32]), "c1", "u1", "hi").unwrap();

        let result = service.open_message(&codec::encode(&[2u8; 32]), "c1", "u1", &sealed);
        assert!(result.as_ref().is_err_and(CoreError::is_security_event));
    }

    #[test]
    fn open_rejects_short_ciphertext() {
        let secret = codec::encode(&[7u8; 32]);
        let short = codec::encode(&[0u8; 27]);

        let result = service().open_message(&secret, "c1", "u1", &short);
        assert_eq!(
            result,
            Err(CoreError::Crypto(CryptoError::InvalidCiphertext { actual: 27, minimum: 28 }))
        );
    }

    #[test]
    fn open_rejects_malformed_text() {
        let secret = codec::encode(&[7u8; 32]);

        let result = service().open_message(&secret, "c1", "u1", "A");
        assert!(matches!(result, Err(CoreError::Crypto(CryptoError::MalformedEncoding { .. }))));
    }

    #[test]
    fn limits_are_enforced() {
        let config = CoreConfig { max_plaintext_bytes: 4, max_identifier_bytes: 3 };
        let service = CryptoService::new(config);
        let secret = codec::encode(&[7u8; 32]);

        assert!(matches!(
            service.seal_message(&secret, "c1", "u1", "hello"),
            Err(CoreError::LimitExceeded { field: "plaintext", limit: 4, actual: 5 })
        ));
        assert!(matches!(
            service.seal_message(&secret, "chat", "u1", "hi"),
            Err(CoreError::LimitExceeded { field: "chat_id", .. })
        ));
        assert!(matches!(
            service.seal_message(&secret, "c1", "user", "hi"),
            Err(CoreError::LimitExceeded { field: "sender_id", .. })
        ));
    }

    #[test]
    fn open_enforces_plaintext_limit() {
        let secret = codec::encode(&[7u8; 32]);
        let sealed = service().seal_message(&secret, "c1", "u1", "hello world").unwrap();

        let strict = CryptoService::new(CoreConfig { max_plaintext_bytes: 8, max_identifier_bytes: 8 });
        assert!(matches!(
            strict.open_message(&secret, "c1", "u1", &sealed),
            Err(CoreError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn open_rejects_non_utf8_plaintext() {
        let secret_bytes = [7u8; 32];
        let key = derive_chat_key(&SharedSecret::from(secret_bytes), "c1");
        let context = ConversationContext::new("c1", "u1");
        let sealed = hushwire_crypto::seal_with_nonce(&key, &context, &[0xFF, 0xFE], [1; NONCE_SIZE]);

        let result = service().open_message(
            &codec::encode(&secret_bytes),
            "c1",
            "u1",
            &codec::encode(&sealed.to_bytes()),
        );
        assert_eq!(result, Err(CoreError::InvalidPlaintext));
    }

    #[test]
    fn random_failure_aborts_keygen_and_seal() {
        let service = CryptoService::with_random(FailingRandom, CoreConfig::default());

        let keygen = service.generate_identity_keypair();
        assert!(keygen.is_err_and(|err| err.is_fatal()));

        let seal = service.seal_message(&codec::encode(&[7u8; 32]), "c1", "u1", "hello");
        assert!(seal.is_err_and(|err| err.is_fatal()));
    }
}
