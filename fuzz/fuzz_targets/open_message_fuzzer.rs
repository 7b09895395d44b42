//! Fuzz target for opening sealed messages
//!
//! Seals a message under an arbitrary key and context, then mutates the
//! sealed bytes and the context before opening.
//!
//! # Invariants
//!
//! - Opening never panics, whatever the input
//! - An unmodified message opens to the original plaintext
//! - Any change to the sealed bytes, the chat id or the sender id fails
//! - Short inputs fail with `InvalidCiphertext`, never authenticate

#![no_main]

use arbitrary::Arbitrary;
use hushwire_crypto::{
    open_message, seal_with_nonce, ChatKey, ConversationContext, CryptoError, SealedMessage,
    MIN_SEALED_SIZE, NONCE_SIZE,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct OpenScenario {
    key: [u8; 32],
    nonce: [u8; NONCE_SIZE],
    chat_id: String,
    sender_id: String,
    plaintext: Vec<u8>,
    mutation: Mutation,
}

#[derive(Debug, Arbitrary)]
enum Mutation {
    None,
    FlipBit { index: usize, bit: u8 },
    Truncate { len: usize },
    Append(Vec<u8>),
    OtherChat(String),
    OtherSender(String),
    Raw(Vec<u8>),
}

fuzz_target!(|scenario: OpenScenario| {
    let key = ChatKey::from_bytes(scenario.key);
    let context = ConversationContext::new(&scenario.chat_id, &scenario.sender_id);
    let sealed = seal_with_nonce(&key, &context, &scenario.plaintext, scenario.nonce).to_bytes();

    let (bytes, chat_id, sender_id, modified) = match scenario.mutation {
        Mutation::None => (sealed, scenario.chat_id.clone(), scenario.sender_id.clone(), false),
        Mutation::FlipBit { index, bit } => {
            let mut bytes = sealed;
            let index = index % bytes.len();
            bytes[index] ^= 1 << (bit % 8);
            (bytes, scenario.chat_id.clone(), scenario.sender_id.clone(), true)
        },
        Mutation::Truncate { len } => {
            let mut bytes = sealed;
            let len = len % bytes.len();
            bytes.truncate(len);
            (bytes, scenario.chat_id.clone(), scenario.sender_id.clone(), true)
        },
        Mutation::Append(extra) => {
            let modified = !extra.is_empty();
            let mut bytes = sealed;
            bytes.extend_from_slice(&extra);
            (bytes, scenario.chat_id.clone(), scenario.sender_id.clone(), modified)
        },
        Mutation::OtherChat(chat_id) => {
            let modified = chat_id != scenario.chat_id;
            (sealed, chat_id, scenario.sender_id.clone(), modified)
        },
        Mutation::OtherSender(sender_id) => {
            let modified = sender_id != scenario.sender_id;
            (sealed, scenario.chat_id.clone(), sender_id, modified)
        },
        Mutation::Raw(raw) => {
            let modified = raw != sealed;
            (raw, scenario.chat_id.clone(), scenario.sender_id.clone(), modified)
        },
    };

    let context = ConversationContext::new(&chat_id, &sender_id);
    let result = SealedMessage::from_bytes(&bytes).and_then(|msg| open_message(&key, &context, &msg));

    if bytes.len() < MIN_SEALED_SIZE {
        assert!(matches!(result, Err(CryptoError::InvalidCiphertext { .. })));
        return;
    }

    if modified {
        assert_eq!(result, Err(CryptoError::AuthenticationFailure), "modified message opened");
    } else {
        assert_eq!(result.as_deref(), Ok(scenario.plaintext.as_slice()));
    }
});
