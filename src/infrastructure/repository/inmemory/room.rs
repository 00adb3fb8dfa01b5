//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! Room ドメインモデルそのものを `Arc<Mutex<…>>` で包んでストアとして
//! 使用します。各メソッドはロックを一度だけ取得するため、参加者集合と
//! メッセージログに対する全操作が互いに直列化されます。sweep の退出と
//! 退出通知もロック内で一括適用されるため、半適用状態が読み手から
//! 観測されることはありません。
//!
//! 外部の永続ストア（MongoDB など）を実装する場合は、同じ trait の
//! 背後で Row/Document → ドメインモデルの変換層を挟むことになります。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    common::time::clock_time_now,
    domain::{
        Message, MessageDraft, MessageId, MessagePatch, Participant, ParticipantName,
        RepositoryError, Room, RoomRepository, Timestamp,
    },
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    room: Arc<Mutex<Room>>,
}

impl InMemoryRoomRepository {
    /// 空の Room を持つリポジトリを作成
    pub fn new() -> Self {
        Self {
            room: Arc::new(Mutex::new(Room::new())),
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn add_participant(
        &self,
        name: ParticipantName,
        last_seen: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut room = self.room.lock().await;
        room.add_participant(Participant::new(name, last_seen))?;
        Ok(())
    }

    async fn remove_participant(&self, name: &ParticipantName) -> Result<(), RepositoryError> {
        let mut room = self.room.lock().await;
        room.remove_participant(name);
        Ok(())
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, RepositoryError> {
        let room = self.room.lock().await;
        Ok(room.participants.clone())
    }

    async fn touch(
        &self,
        name: &ParticipantName,
        seen_at: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut room = self.room.lock().await;
        room.touch(name, seen_at)?;
        Ok(())
    }

    async fn append_message(&self, draft: MessageDraft) -> Result<MessageId, RepositoryError> {
        let mut room = self.room.lock().await;
        Ok(room.append_message(draft))
    }

    async fn list_messages(&self) -> Result<Vec<Message>, RepositoryError> {
        let room = self.room.lock().await;
        Ok(room.messages.clone())
    }

    async fn edit_message(
        &self,
        id: &MessageId,
        patch: MessagePatch,
        requester: &ParticipantName,
    ) -> Result<(), RepositoryError> {
        let mut room = self.room.lock().await;
        room.edit_message(id, patch, requester)?;
        Ok(())
    }

    async fn delete_message(
        &self,
        id: &MessageId,
        requester: &ParticipantName,
    ) -> Result<(), RepositoryError> {
        let mut room = self.room.lock().await;
        room.delete_message(id, requester)?;
        Ok(())
    }

    async fn sweep_idle(&self, cutoff: Timestamp) -> Result<Vec<ParticipantName>, RepositoryError> {
        // Clock string is captured outside the lock; only memory ops inside.
        let left_at = clock_time_now();
        let mut room = self.room.lock().await;
        Ok(room.sweep_idle(cutoff, &left_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Destination, MessageKind, MessageText, RoomError};

    fn name(s: &str) -> ParticipantName {
        ParticipantName::new(s.to_string()).unwrap()
    }

    fn draft(from: &str, text: &str) -> MessageDraft {
        MessageDraft {
            from: name(from),
            to: Destination::Everyone,
            text: MessageText::new(text.to_string()).unwrap(),
            kind: MessageKind::Broadcast,
            time: "12:00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_participant_success() {
        // テスト項目: 参加者を追加して一覧に反映される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let result = repo.add_participant(name("alice"), Timestamp::new(1000)).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let participants = repo.list_participants().await.unwrap();
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].name, name("alice"));
        assert_eq!(participants[0].last_seen, Timestamp::new(1000));
    }

    #[tokio::test]
    async fn test_add_participant_duplicate_conflict() {
        // テスト項目: 同名の参加者の追加は NameTaken
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.add_participant(name("alice"), Timestamp::new(1000))
            .await
            .unwrap();

        // when (操作):
        let result = repo.add_participant(name("alice"), Timestamp::new(2000)).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RepositoryError::Room(RoomError::NameTaken {
                name: "alice".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_touch_unknown_not_found() {
        // テスト項目: 存在しない参加者の touch は ParticipantNotFound
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let result = repo.touch(&name("ghost"), Timestamp::new(1000)).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RepositoryError::Room(RoomError::ParticipantNotFound {
                name: "ghost".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_remove_participant() {
        // テスト項目: 参加者を削除できる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.add_participant(name("alice"), Timestamp::new(1000))
            .await
            .unwrap();

        // when (操作):
        repo.remove_participant(&name("alice")).await.unwrap();

        // then (期待する結果):
        assert!(repo.list_participants().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_and_list_messages_in_order() {
        // テスト項目: メッセージは追加順に一覧される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        repo.append_message(draft("alice", "first")).await.unwrap();
        repo.append_message(draft("bob", "second")).await.unwrap();

        // then (期待する結果):
        let messages = repo.list_messages().await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text.as_str(), "first");
        assert_eq!(messages[1].text.as_str(), "second");
    }

    #[tokio::test]
    async fn test_sweep_idle_batch_under_one_lock() {
        // テスト項目: sweep は退出と退出通知を一括で適用する
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.add_participant(name("alice"), Timestamp::new(1000))
            .await
            .unwrap();
        repo.add_participant(name("bob"), Timestamp::new(50_000))
            .await
            .unwrap();

        // when (操作):
        let evicted = repo.sweep_idle(Timestamp::new(2000)).await.unwrap();

        // then (期待する結果):
        assert_eq!(evicted, vec![name("alice")]);
        let participants = repo.list_participants().await.unwrap();
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].name, name("bob"));
        let messages = repo.list_messages().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind, MessageKind::Status);
    }

    #[tokio::test]
    async fn test_concurrent_join_and_sweep_never_duplicate() {
        // テスト項目: join と sweep が並行しても重複参加や取りこぼしが起きない
        // given (前提条件): stale な alice が在室
        let repo = Arc::new(InMemoryRoomRepository::new());
        repo.add_participant(name("alice"), Timestamp::new(0))
            .await
            .unwrap();

        // when (操作): 再入室と sweep を並行実行する
        let join_repo = Arc::clone(&repo);
        let join = tokio::spawn(async move {
            join_repo
                .add_participant(name("alice"), Timestamp::new(100_000))
                .await
        });
        let sweep_repo = Arc::clone(&repo);
        let sweep = tokio::spawn(async move { sweep_repo.sweep_idle(Timestamp::new(1000)).await });

        let join_result = join.await.unwrap();
        let sweep_result = sweep.await.unwrap().unwrap();

        // then (期待する結果): どちらの順序でも alice は高々一人
        let participants = repo.list_participants().await.unwrap();
        let alice_count = participants
            .iter()
            .filter(|p| p.name == name("alice"))
            .count();
        if join_result.is_ok() {
            // sweep が先に走り、新しい alice が残った
            assert_eq!(alice_count, 1);
            assert_eq!(sweep_result, vec![name("alice")]);
        } else {
            // join が先に走って Conflict、その後 stale な alice は残っていない
            assert_eq!(sweep_result, vec![name("alice")]);
            assert_eq!(alice_count, 0);
        }
    }
}
