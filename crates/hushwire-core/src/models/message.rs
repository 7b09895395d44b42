use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::{ChatId, MessageId, UserId};
use crate::{error::CoreError, service::MessageCrypto};

/// Delivery progress of a message, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MessageDeliveryStatus {
    /// Sealed locally, not yet acknowledged by the server
    Sending,
    /// Accepted by the server
    SentToServer,
    /// Delivered to the peer's device
    DeliveredToPeer,
    /// Read by the peer
    Read,
}

/// Milliseconds since the Unix epoch, as stored in `created_at_ms`.
///
/// # Errors
///
/// - `Clock`: the system clock is before the epoch or out of `i64` range
pub fn now_ms() -> Result<i64, CoreError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| CoreError::Clock(err.to_string()))?;

    i64::try_from(elapsed.as_millis())
        .map_err(|_| CoreError::Clock("timestamp exceeds i64 milliseconds".to_string()))
}

/// A message record. Holds sealed text only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreMessage {
    /// Message identifier
    pub id: MessageId,
    /// Chat the message belongs to; bound into the ciphertext
    pub chat_id: ChatId,
    /// Author; bound into the ciphertext
    pub sender_id: UserId,
    /// base64 `nonce || ciphertext || tag`
    pub encrypted_payload_base64: String,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at_ms: i64,
    /// Delivery progress
    pub status: MessageDeliveryStatus,
}

impl CoreMessage {
    /// Seal `plaintext` into a new outgoing record in status `Sending`.
    pub fn seal_outgoing(
        crypto: &impl MessageCrypto,
        shared_secret: &str,
        id: MessageId,
        chat_id: ChatId,
        sender_id: UserId,
        plaintext: &str,
        created_at_ms: i64,
    ) -> Result<Self, CoreError> {
        let encrypted_payload_base64 =
            crypto.seal_message(shared_secret, &chat_id, &sender_id, plaintext)?;

        Ok(Self {
            id,
            chat_id,
            sender_id,
            encrypted_payload_base64,
            created_at_ms,
            status: MessageDeliveryStatus::Sending,
        })
    }

    /// [`CoreMessage::seal_outgoing`] stamped with the current time.
    pub fn seal_outgoing_now(
        crypto: &impl MessageCrypto,
        shared_secret: &str,
        id: MessageId,
        chat_id: ChatId,
        sender_id: UserId,
        plaintext: &str,
    ) -> Result<Self, CoreError> {
        let created_at_ms = now_ms()?;
        Self::seal_outgoing(crypto, shared_secret, id, chat_id, sender_id, plaintext, created_at_ms)
    }

    /// Open the payload using this record's chat and sender ids.
    ///
    /// A record whose ids were altered after sealing fails authentication.
    pub fn open(
        &self,
        crypto: &impl MessageCrypto,
        shared_secret: &str,
    ) -> Result<String, CoreError> {
        crypto.open_message(
            shared_secret,
            &self.chat_id,
            &self.sender_id,
            &self.encrypted_payload_base64,
        )
    }

    /// Move the delivery status forward.
    ///
    /// Setting the current status again is a no-op.
    pub fn advance_status(&mut self, next: MessageDeliveryStatus) -> Result<(), CoreError> {
        if next < self.status {
            return Err(CoreError::InvalidStatusTransition { from: self.status, to: next });
        }
        self.status = next;
        Ok(())
    }

    /// Encode the record as CBOR for local storage.
    pub fn to_cbor(&self) -> Result<Vec<u8>, CoreError> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(self, &mut bytes)
            .map_err(|e| CoreError::Serialization(format!("CBOR encode failed: {e}")))?;
        Ok(bytes)
    }

    /// Decode a record previously produced by [`CoreMessage::to_cbor`].
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, CoreError> {
        ciborium::de::from_reader(bytes)
            .map_err(|e| CoreError::Serialization(format!("CBOR decode failed: {e}")))
    }
}
