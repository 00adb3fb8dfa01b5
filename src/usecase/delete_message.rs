//! UseCase: メッセージ削除処理
//!
//! チェックは所有権のみ。退出済みの送信者も自分のメッセージは
//! 削除できます（在室確認は行わない）。

use std::sync::Arc;

use crate::domain::{MessageId, ParticipantName, RepositoryError, RoomError, RoomRepository};

use super::error::DeleteMessageError;

/// メッセージ削除のユースケース
pub struct DeleteMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl DeleteMessageUseCase {
    /// 新しい DeleteMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ削除を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 削除成功
    /// * `Err(DeleteMessageError::MessageNotFound)` - 対象メッセージなし
    /// * `Err(DeleteMessageError::Forbidden)` - 削除者が元の送信者でない
    pub async fn execute(
        &self,
        id: &MessageId,
        from: ParticipantName,
    ) -> Result<(), DeleteMessageError> {
        match self.repository.delete_message(id, &from).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::Room(RoomError::MessageNotFound { id })) => {
                Err(DeleteMessageError::MessageNotFound(id))
            }
            Err(RepositoryError::Room(RoomError::NotMessageOwner)) => {
                Err(DeleteMessageError::Forbidden)
            }
            Err(other) => Err(DeleteMessageError::Store(other)),
        }
    }
}
