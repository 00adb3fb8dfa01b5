//! UseCase: メッセージ編集処理
//!
//! 編集者の在室確認の後、所有権チェックをストアに委譲します。
//! 編集は liveness を更新するアクションではありません。

use std::sync::Arc;

use crate::domain::{
    MessageId, MessagePatch, ParticipantName, RepositoryError, RoomError, RoomRepository,
};

use super::error::EditMessageError;

/// メッセージ編集のユースケース
pub struct EditMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl EditMessageUseCase {
    /// 新しい EditMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ編集を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 編集成功
    /// * `Err(EditMessageError::UnknownSender)` - 編集者が在室していない
    /// * `Err(EditMessageError::MessageNotFound)` - 対象メッセージなし
    /// * `Err(EditMessageError::Forbidden)` - 編集者が元の送信者でない
    pub async fn execute(
        &self,
        id: &MessageId,
        from: ParticipantName,
        patch: MessagePatch,
    ) -> Result<(), EditMessageError> {
        if !self.is_live(&from).await? {
            return Err(EditMessageError::UnknownSender(from.into_string()));
        }

        match self.repository.edit_message(id, patch, &from).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::Room(RoomError::MessageNotFound { id })) => {
                Err(EditMessageError::MessageNotFound(id))
            }
            Err(RepositoryError::Room(RoomError::NotMessageOwner)) => {
                Err(EditMessageError::Forbidden)
            }
            Err(other) => Err(EditMessageError::Store(other)),
        }
    }

    /// 在室確認（touch と違い last_seen は更新しない）
    async fn is_live(&self, name: &ParticipantName) -> Result<bool, EditMessageError> {
        let participants = self
            .repository
            .list_participants()
            .await
            .map_err(EditMessageError::Store)?;
        Ok(participants.iter().any(|p| &p.name == name))
    }
}
