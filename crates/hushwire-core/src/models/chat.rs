use serde::{Deserialize, Serialize};

use super::{ChatId, UserId};

/// A chat and its participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreChat {
    /// Chat identifier
    pub id: ChatId,
    /// Participants, in backend order
    pub participant_user_ids: Vec<UserId>,
}

impl CoreChat {
    /// Whether `user_id` takes part in this chat.
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participant_user_ids.iter().any(|id| id == user_id)
    }

    /// The other participant of a one-to-one chat.
    ///
    /// Returns `None` unless the chat has exactly two participants and
    /// `user_id` is one of them.
    pub fn peer_of(&self, user_id: &str) -> Option<&UserId> {
        match self.participant_user_ids.as_slice() {
            [a, b] if a == user_id => Some(b),
            [a, b] if b == user_id => Some(a),
            _ => None,
        }
    }
}
