//! UseCase: 入室処理
//!
//! 参加者名の compare-and-insert による重複拒否と、入室を知らせる
//! status ブロードキャスト（"entra na sala..."）の合成を行います。

use std::sync::Arc;

use crate::{
    common::time::{clock_time_now, get_timestamp_millis},
    domain::{
        MessageDraft, ParticipantName, RepositoryError, RoomError, RoomRepository, Timestamp,
        STATUS_JOINED_TEXT,
    },
};

use super::error::JoinRoomError;

/// 入室のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 入室を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 入室成功（status メッセージがログに追加される）
    /// * `Err(JoinRoomError::AlreadyJoined)` - 同名の参加者が既に在室
    pub async fn execute(&self, name: ParticipantName) -> Result<(), JoinRoomError> {
        let now = Timestamp::new(get_timestamp_millis());

        match self.repository.add_participant(name.clone(), now).await {
            Ok(()) => {}
            Err(RepositoryError::Room(RoomError::NameTaken { name })) => {
                return Err(JoinRoomError::AlreadyJoined(name));
            }
            Err(other) => return Err(JoinRoomError::Store(other)),
        }

        tracing::info!("participant '{}' joined the room", name);

        let announcement = MessageDraft::status(name, STATUS_JOINED_TEXT, clock_time_now());
        self.repository
            .append_message(announcement)
            .await
            .map_err(JoinRoomError::Store)?;

        Ok(())
    }
}
