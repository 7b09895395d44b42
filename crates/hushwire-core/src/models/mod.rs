//! Records the host application persists and syncs.
//!
//! Messages only ever carry sealed text; plaintext exists transiently between
//! [`CoreMessage::open`] and the UI.

mod chat;
mod message;
mod user;

pub use chat::CoreChat;
pub use message::{CoreMessage, MessageDeliveryStatus, now_ms};
pub use user::CoreUser;

/// Opaque user identifier assigned by the host backend
pub type UserId = String;

/// Opaque chat identifier assigned by the host backend
pub type ChatId = String;

/// Opaque message identifier assigned by the host backend
pub type MessageId = String;
