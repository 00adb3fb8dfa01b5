//! UseCase: メッセージ一覧取得処理
//!
//! 可視性フィルタ（domain::visibility）を全ログに適用し、limit が
//! あればフィルタ後の末尾 N 件をログ順のまま返します。limit の検証は
//! フィルタより先に行い、0 以下は丸めずに拒否します。

use std::sync::Arc;

use crate::domain::{visibility, Message, ParticipantName, RoomRepository};

use super::error::ListMessagesError;

/// メッセージ一覧取得のユースケース
pub struct ListMessagesUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ListMessagesUseCase {
    /// 新しい ListMessagesUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ一覧取得を実行
    ///
    /// 要求者は在室している必要はありません。未入室の名前でも
    /// ブロードキャストと status は見えます。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Message>)` - 要求者に見えるメッセージ（ログ順）
    /// * `Err(ListMessagesError::InvalidLimit)` - limit が正の整数でない
    pub async fn execute(
        &self,
        requester: ParticipantName,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, ListMessagesError> {
        // limit はフィルタ実行前に検証する
        if let Some(limit) = limit {
            if limit <= 0 {
                return Err(ListMessagesError::InvalidLimit(limit));
            }
        }

        let messages = self
            .repository
            .list_messages()
            .await
            .map_err(ListMessagesError::Store)?;
        let mut visible = visibility::visible_to(&requester, &messages);

        // 末尾 N 件（head ではなく tail）
        if let Some(limit) = limit {
            let limit = limit as usize;
            if visible.len() > limit {
                visible.drain(..visible.len() - limit);
            }
        }

        Ok(visible)
    }
}
