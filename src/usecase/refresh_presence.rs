//! UseCase: 在室更新（heartbeat）処理
//!
//! 既に入室している参加者の last_seen を現在時刻に更新します。
//! 入室（join）とは異なり、未入室の名前は受け付けません。

use std::sync::Arc;

use crate::{
    common::time::get_timestamp_millis,
    domain::{ParticipantName, RepositoryError, RoomError, RoomRepository, Timestamp},
};

use super::error::RefreshPresenceError;

/// 在室更新のユースケース
pub struct RefreshPresenceUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl RefreshPresenceUseCase {
    /// 新しい RefreshPresenceUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 在室更新を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - last_seen が現在時刻に更新された
    /// * `Err(RefreshPresenceError::UnknownParticipant)` - セッション喪失。
    ///   呼び出し側は黙って再試行せず、再入室する必要があります。
    pub async fn execute(&self, name: ParticipantName) -> Result<(), RefreshPresenceError> {
        let now = Timestamp::new(get_timestamp_millis());
        match self.repository.touch(&name, now).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::Room(RoomError::ParticipantNotFound { name })) => {
                Err(RefreshPresenceError::UnknownParticipant(name))
            }
            Err(other) => Err(RefreshPresenceError::Store(other)),
        }
    }
}
