use hushwire_crypto::{KEY_SIZE, PublicKey, codec};
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::error::CoreError;

/// A user profile as published by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreUser {
    /// User identifier
    pub id: UserId,
    /// Display name
    pub display_name: String,
    /// base64 X25519 identity public key
    pub public_key_base64: String,
    /// Optional unique handle
    pub tag: Option<String>,
    /// Optional phone number
    pub phone_number: Option<String>,
    /// Optional base64 avatar image
    pub avatar_base64: Option<String>,
}

impl CoreUser {
    /// Decode and length-check the published identity key.
    pub fn public_key(&self) -> Result<PublicKey, CoreError> {
        Ok(PublicKey::from(codec::decode_array::<KEY_SIZE>(&self.public_key_base64)?))
    }
}
