//! UseCase: メッセージ送信処理
//!
//! 送信は liveness を更新するアクションでもあるため、在室確認と
//! last_seen の更新を touch 一回で原子的に行ってから追記します。

use std::sync::Arc;

use crate::{
    common::time::{clock_time_now, get_timestamp_millis},
    domain::{
        Destination, MessageDraft, MessageId, MessageKind, MessageText, ParticipantName,
        RepositoryError, RoomError, RoomRepository, Timestamp,
    },
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ送信を実行
    ///
    /// `kind` はユーザーが送信可能な種別（message / private_message）で
    /// あることを呼び出し側（DTO 変換）が保証します。
    ///
    /// # Returns
    ///
    /// * `Ok(MessageId)` - ストアが採番したメッセージ ID
    /// * `Err(SendMessageError::UnknownSender)` - 送信者が在室していない
    pub async fn execute(
        &self,
        from: ParticipantName,
        to: Destination,
        text: MessageText,
        kind: MessageKind,
    ) -> Result<MessageId, SendMessageError> {
        let now = Timestamp::new(get_timestamp_millis());

        // 在室確認と liveness 更新を同時に行う
        match self.repository.touch(&from, now).await {
            Ok(()) => {}
            Err(RepositoryError::Room(RoomError::ParticipantNotFound { name })) => {
                return Err(SendMessageError::UnknownSender(name));
            }
            Err(other) => return Err(SendMessageError::Store(other)),
        }

        let draft = MessageDraft {
            from,
            to,
            text,
            kind,
            time: clock_time_now(),
        };
        self.repository
            .append_message(draft)
            .await
            .map_err(SendMessageError::Store)
    }
}
