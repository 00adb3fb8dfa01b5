//! Pure message visibility rules.
//!
//! Visibility never consults the live participant set: a requester that
//! was evicted (or never joined) still sees every broadcast.

use super::{
    entity::Message,
    value_object::{Destination, ParticipantName},
};

/// Whether a single message is readable by `requester`.
///
/// A message is visible iff it is addressed to the whole room, the
/// requester sent it, or the requester is the private addressee.
pub fn is_visible_to(requester: &ParticipantName, message: &Message) -> bool {
    match &message.to {
        Destination::Everyone => true,
        Destination::Participant(addressee) => {
            &message.from == requester || addressee == requester
        }
    }
}

/// Filter a message log down to what `requester` may read, preserving
/// log order.
pub fn visible_to(requester: &ParticipantName, messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .filter(|m| is_visible_to(requester, m))
        .cloned()
        .collect()
}
