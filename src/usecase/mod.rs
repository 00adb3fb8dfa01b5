//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。
//! メッセージゲートウェイ（join / send / edit / delete / list）と
//! 在室トラッカー（refresh / sweep）で一操作一ユースケースです。

pub mod delete_message;
pub mod edit_message;
pub mod error;
pub mod join_room;
pub mod list_messages;
pub mod refresh_presence;
pub mod send_message;
pub mod sweep_idle;

pub use delete_message::DeleteMessageUseCase;
pub use edit_message::EditMessageUseCase;
pub use error::{
    DeleteMessageError, EditMessageError, JoinRoomError, ListMessagesError, RefreshPresenceError,
    SendMessageError,
};
pub use join_room::JoinRoomUseCase;
pub use list_messages::ListMessagesUseCase;
pub use refresh_presence::RefreshPresenceUseCase;
pub use send_message::SendMessageUseCase;
pub use sweep_idle::SweepIdleParticipantsUseCase;
