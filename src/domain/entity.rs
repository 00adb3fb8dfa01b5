//! Core domain models for the chat room.

use serde::{Deserialize, Serialize};

use super::{
    error::RoomError,
    factory::MessageIdFactory,
    value_object::{Destination, MessageId, MessageKind, MessageText, ParticipantName, Timestamp},
};

/// Status text announced when a participant joins
pub const STATUS_JOINED_TEXT: &str = "entra na sala...";

/// Status text announced when a participant is evicted
pub const STATUS_LEFT_TEXT: &str = "sai da sala...";

/// Represents a live participant session in the room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Participant name (sole identity key)
    pub name: ParticipantName,
    /// Timestamp of the most recent liveness-refreshing action
    pub last_seen: Timestamp,
}

impl Participant {
    /// Create a new participant
    pub fn new(name: ParticipantName, last_seen: Timestamp) -> Self {
        Self { name, last_seen }
    }
}

/// Represents a chat message in the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Opaque unique identifier, assigned on append
    pub id: MessageId,
    /// Sender's participant name
    pub from: ParticipantName,
    /// Destination: the whole room or one participant
    pub to: Destination,
    /// Message body
    pub text: MessageText,
    /// Broadcast, private, or system status
    pub kind: MessageKind,
    /// Display clock string (`HH:MM:SS`) captured at creation
    pub time: String,
}

/// A message as submitted for append, before the store assigns an id
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub from: ParticipantName,
    pub to: Destination,
    pub text: MessageText,
    pub kind: MessageKind,
    pub time: String,
}

impl MessageDraft {
    /// Build a system status announcement addressed to the whole room.
    pub fn status(from: ParticipantName, text: &str, time: String) -> Self {
        Self {
            from,
            to: Destination::Everyone,
            // Status texts are fixed non-empty literals
            text: MessageText::new(text.to_string()).expect("status text must be non-empty"),
            kind: MessageKind::Status,
            time,
        }
    }
}

/// Replacement fields for an edit; `from`, `id`, and `time` never change
#[derive(Debug, Clone)]
pub struct MessagePatch {
    pub to: Destination,
    pub text: MessageText,
    pub kind: MessageKind,
}

/// The shared room: live participant set plus the append-mostly message log.
///
/// All mutation goes through these methods; the repository serializes
/// access so each call is atomic with respect to concurrent requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Room {
    /// Live participants, in join order
    pub participants: Vec<Participant>,
    /// Message log, in insertion order
    pub messages: Vec<Message>,
}

impl Room {
    /// Create a new empty room
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant, compare-and-insert on the name.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::NameTaken` if the name is already live; a
    /// duplicate join is rejected, never merged.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), RoomError> {
        if self.get_participant(&participant.name).is_some() {
            return Err(RoomError::NameTaken {
                name: participant.name.into_string(),
            });
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Remove a participant from the live set by name
    pub fn remove_participant(&mut self, name: &ParticipantName) {
        self.participants.retain(|p| &p.name != name);
    }

    /// Refresh a participant's `last_seen`.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::ParticipantNotFound` if the name is not live;
    /// callers must treat this as "session lost", not retry.
    pub fn touch(&mut self, name: &ParticipantName, seen_at: Timestamp) -> Result<(), RoomError> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.name == name)
            .ok_or_else(|| RoomError::ParticipantNotFound {
                name: name.as_str().to_string(),
            })?;
        participant.last_seen = seen_at;
        Ok(())
    }

    /// Get a participant by name
    pub fn get_participant(&self, name: &ParticipantName) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.name == name)
    }

    /// Append a message to the log, assigning its id
    pub fn append_message(&mut self, draft: MessageDraft) -> MessageId {
        let id = MessageIdFactory::generate();
        self.messages.push(Message {
            id,
            from: draft.from,
            to: draft.to,
            text: draft.text,
            kind: draft.kind,
            time: draft.time,
        });
        id
    }

    /// Replace the mutable fields of an existing message.
    ///
    /// # Errors
    ///
    /// `MessageNotFound` if no message has the id (checked first);
    /// `NotMessageOwner` if the requester is not the original sender.
    pub fn edit_message(
        &mut self,
        id: &MessageId,
        patch: MessagePatch,
        requester: &ParticipantName,
    ) -> Result<(), RoomError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| RoomError::MessageNotFound { id: id.to_string() })?;
        if &message.from != requester {
            return Err(RoomError::NotMessageOwner);
        }
        message.to = patch.to;
        message.text = patch.text;
        message.kind = patch.kind;
        Ok(())
    }

    /// Remove an existing message.
    ///
    /// Ownership is the only check; liveness of the requester is not
    /// re-validated, so an evicted author may still delete their own
    /// messages.
    pub fn delete_message(
        &mut self,
        id: &MessageId,
        requester: &ParticipantName,
    ) -> Result<(), RoomError> {
        let index = self
            .messages
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| RoomError::MessageNotFound { id: id.to_string() })?;
        if &self.messages[index].from != requester {
            return Err(RoomError::NotMessageOwner);
        }
        self.messages.remove(index);
        Ok(())
    }

    /// Evict every participant with `last_seen <= cutoff`.
    ///
    /// Removals and the synthesized leave announcements are produced in
    /// one call, so under the repository lock the batch is never
    /// observable half-applied. Returns the evicted names; running the
    /// sweep again with no newly-stale participants evicts nothing.
    pub fn sweep_idle(&mut self, cutoff: Timestamp, left_at: &str) -> Vec<ParticipantName> {
        let evicted: Vec<ParticipantName> = self
            .participants
            .iter()
            .filter(|p| p.last_seen <= cutoff)
            .map(|p| p.name.clone())
            .collect();

        self.participants.retain(|p| p.last_seen > cutoff);
        for name in &evicted {
            self.append_message(MessageDraft::status(
                name.clone(),
                STATUS_LEFT_TEXT,
                left_at.to_string(),
            ));
        }

        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ParticipantName {
        ParticipantName::new(s.to_string()).unwrap()
    }

    fn draft(from: &str, to: Destination, text: &str, kind: MessageKind) -> MessageDraft {
        MessageDraft {
            from: name(from),
            to,
            text: MessageText::new(text.to_string()).unwrap(),
            kind,
            time: "12:00:00".to_string(),
        }
    }

    #[test]
    fn test_room_add_participant_success() {
        // テスト項目: 参加者を追加できる
        // given (前提条件):
        let mut room = Room::new();

        // when (操作):
        let result = room.add_participant(Participant::new(name("alice"), Timestamp::new(1000)));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(room.participants.len(), 1);
        assert_eq!(room.participants[0].name, name("alice"));
    }

    #[test]
    fn test_room_add_participant_duplicate_fails() {
        // テスト項目: 同名の参加者は追加できない（マージされない）
        // given (前提条件):
        let mut room = Room::new();
        room.add_participant(Participant::new(name("alice"), Timestamp::new(1000)))
            .unwrap();

        // when (操作):
        let result = room.add_participant(Participant::new(name("alice"), Timestamp::new(2000)));

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RoomError::NameTaken {
                name: "alice".to_string()
            }
        );
        assert_eq!(room.participants.len(), 1);
        // 元の last_seen が保持される
        assert_eq!(room.participants[0].last_seen, Timestamp::new(1000));
    }

    #[test]
    fn test_room_touch_updates_last_seen() {
        // テスト項目: touch で last_seen が更新される
        // given (前提条件):
        let mut room = Room::new();
        room.add_participant(Participant::new(name("alice"), Timestamp::new(1000)))
            .unwrap();

        // when (操作):
        let result = room.touch(&name("alice"), Timestamp::new(5000));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(room.participants[0].last_seen, Timestamp::new(5000));
    }

    #[test]
    fn test_room_touch_unknown_fails() {
        // テスト項目: 存在しない参加者の touch は ParticipantNotFound
        // given (前提条件):
        let mut room = Room::new();

        // when (操作):
        let result = room.touch(&name("ghost"), Timestamp::new(5000));

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RoomError::ParticipantNotFound {
                name: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_room_append_message_keeps_insertion_order() {
        // テスト項目: メッセージは挿入順に並び、一意な ID が振られる
        // given (前提条件):
        let mut room = Room::new();

        // when (操作):
        let id1 = room.append_message(draft(
            "alice",
            Destination::Everyone,
            "first",
            MessageKind::Broadcast,
        ));
        let id2 = room.append_message(draft(
            "alice",
            Destination::Everyone,
            "second",
            MessageKind::Broadcast,
        ));

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert_eq!(room.messages.len(), 2);
        assert_eq!(room.messages[0].text.as_str(), "first");
        assert_eq!(room.messages[1].text.as_str(), "second");
    }

    #[test]
    fn test_room_edit_message_by_owner() {
        // テスト項目: 送信者本人はメッセージを編集できる
        // given (前提条件):
        let mut room = Room::new();
        let id = room.append_message(draft(
            "alice",
            Destination::Everyone,
            "oops",
            MessageKind::Broadcast,
        ));

        // when (操作):
        let patch = MessagePatch {
            to: Destination::Participant(name("bob")),
            text: MessageText::new("fixed".to_string()).unwrap(),
            kind: MessageKind::Private,
        };
        let result = room.edit_message(&id, patch, &name("alice"));

        // then (期待する結果):
        assert!(result.is_ok());
        let message = &room.messages[0];
        assert_eq!(message.text.as_str(), "fixed");
        assert_eq!(message.kind, MessageKind::Private);
        assert_eq!(message.to.as_str(), "bob");
        // id と from は変わらない
        assert_eq!(message.id, id);
        assert_eq!(message.from, name("alice"));
    }

    #[test]
    fn test_room_edit_message_by_other_forbidden() {
        // テスト項目: 他人のメッセージの編集は NotMessageOwner
        // given (前提条件):
        let mut room = Room::new();
        let id = room.append_message(draft(
            "bob",
            Destination::Everyone,
            "mine",
            MessageKind::Broadcast,
        ));

        // when (操作):
        let patch = MessagePatch {
            to: Destination::Everyone,
            text: MessageText::new("hijacked".to_string()).unwrap(),
            kind: MessageKind::Broadcast,
        };
        let result = room.edit_message(&id, patch, &name("alice"));

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RoomError::NotMessageOwner);
        assert_eq!(room.messages[0].text.as_str(), "mine");
    }

    #[test]
    fn test_room_edit_missing_message_not_found() {
        // テスト項目: 存在しない ID の編集は MessageNotFound（所有権より先に判定）
        // given (前提条件):
        let mut room = Room::new();
        let missing = MessageIdFactory::generate();

        // when (操作):
        let patch = MessagePatch {
            to: Destination::Everyone,
            text: MessageText::new("x".to_string()).unwrap(),
            kind: MessageKind::Broadcast,
        };
        let result = room.edit_message(&missing, patch, &name("alice"));

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            RoomError::MessageNotFound { .. }
        ));
    }

    #[test]
    fn test_room_delete_message_by_owner() {
        // テスト項目: 送信者本人はメッセージを削除できる
        // given (前提条件):
        let mut room = Room::new();
        let id = room.append_message(draft(
            "alice",
            Destination::Everyone,
            "bye",
            MessageKind::Broadcast,
        ));

        // when (操作):
        let result = room.delete_message(&id, &name("alice"));

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(room.messages.is_empty());
    }

    #[test]
    fn test_room_delete_message_by_other_forbidden() {
        // テスト項目: 他人のメッセージの削除は NotMessageOwner
        // given (前提条件):
        let mut room = Room::new();
        let id = room.append_message(draft(
            "bob",
            Destination::Everyone,
            "keep",
            MessageKind::Broadcast,
        ));

        // when (操作):
        let result = room.delete_message(&id, &name("alice"));

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RoomError::NotMessageOwner);
        assert_eq!(room.messages.len(), 1);
    }

    #[test]
    fn test_room_sweep_idle_evicts_and_announces() {
        // テスト項目: cutoff 以前の参加者が全員退出し、退出メッセージが残る
        // given (前提条件):
        let mut room = Room::new();
        room.add_participant(Participant::new(name("alice"), Timestamp::new(1000)))
            .unwrap();
        room.add_participant(Participant::new(name("bob"), Timestamp::new(2000)))
            .unwrap();
        room.add_participant(Participant::new(name("carol"), Timestamp::new(9000)))
            .unwrap();

        // when (操作): last_seen <= 2000 を退出させる（境界値を含む）
        let evicted = room.sweep_idle(Timestamp::new(2000), "13:00:00");

        // then (期待する結果):
        assert_eq!(evicted, vec![name("alice"), name("bob")]);
        assert_eq!(room.participants.len(), 1);
        assert_eq!(room.participants[0].name, name("carol"));

        // 退出者一人につき一件の status ブロードキャストが追加される
        assert_eq!(room.messages.len(), 2);
        for (message, evicted_name) in room.messages.iter().zip(&evicted) {
            assert_eq!(&message.from, evicted_name);
            assert_eq!(message.to, Destination::Everyone);
            assert_eq!(message.kind, MessageKind::Status);
            assert_eq!(message.text.as_str(), STATUS_LEFT_TEXT);
            assert_eq!(message.time, "13:00:00");
        }
    }

    #[test]
    fn test_room_sweep_idle_is_idempotent() {
        // テスト項目: 新たに stale になった参加者がいなければ二度目の sweep は何もしない
        // given (前提条件):
        let mut room = Room::new();
        room.add_participant(Participant::new(name("alice"), Timestamp::new(1000)))
            .unwrap();
        room.sweep_idle(Timestamp::new(1500), "13:00:00");
        let messages_before = room.messages.len();

        // when (操作):
        let evicted = room.sweep_idle(Timestamp::new(1500), "13:00:01");

        // then (期待する結果):
        assert!(evicted.is_empty());
        assert_eq!(room.messages.len(), messages_before);
    }
}
