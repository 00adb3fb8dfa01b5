//! UseCase 層のエラー定義
//!
//! 各ユースケースが返すエラーを thiserror で定義します。
//! ドメイン層の RoomError / RepositoryError は各ユースケースの
//! execute() 内で明示的にマッピングされます（暗黙の From 変換はしない）。

use thiserror::Error;

use crate::domain::RepositoryError;

/// 入室（join）のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    /// 同名の参加者が既に入室している（Conflict）
    #[error("participant '{0}' already joined")]
    AlreadyJoined(String),

    /// ストア由来の失敗
    #[error(transparent)]
    Store(RepositoryError),
}

/// メッセージ送信のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 送信者が入室していない（セッション喪失、再入室が必要）
    #[error("unknown sender '{0}'")]
    UnknownSender(String),

    /// ストア由来の失敗
    #[error(transparent)]
    Store(RepositoryError),
}

/// メッセージ編集のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditMessageError {
    /// 編集者が入室していない
    #[error("unknown sender '{0}'")]
    UnknownSender(String),

    /// 対象メッセージが存在しない
    #[error("message '{0}' not found")]
    MessageNotFound(String),

    /// 編集者が元の送信者でない
    #[error("only the original sender may edit a message")]
    Forbidden,

    /// ストア由来の失敗
    #[error(transparent)]
    Store(RepositoryError),
}

/// メッセージ削除のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeleteMessageError {
    /// 対象メッセージが存在しない
    #[error("message '{0}' not found")]
    MessageNotFound(String),

    /// 削除者が元の送信者でない
    #[error("only the original sender may delete a message")]
    Forbidden,

    /// ストア由来の失敗
    #[error(transparent)]
    Store(RepositoryError),
}

/// メッセージ一覧取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListMessagesError {
    /// limit は正の整数でなければならない（0 以下は丸めずに拒否する）
    #[error("limit must be a positive integer (got {0})")]
    InvalidLimit(i64),

    /// ストア由来の失敗
    #[error(transparent)]
    Store(RepositoryError),
}

/// 在室更新（heartbeat）のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshPresenceError {
    /// 対象参加者が入室していない（セッション喪失）
    #[error("unknown participant '{0}'")]
    UnknownParticipant(String),

    /// ストア由来の失敗
    #[error(transparent)]
    Store(RepositoryError),
}
