//! Domain layer for the chat room.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;
pub mod visibility;

pub use entity::{
    Message, MessageDraft, MessagePatch, Participant, Room, STATUS_JOINED_TEXT, STATUS_LEFT_TEXT,
};
pub use error::{RoomError, ValueObjectError};
pub use factory::MessageIdFactory;
pub use repository::{RepositoryError, RoomRepository};
pub use value_object::{
    BROADCAST_ADDRESS, Destination, MessageId, MessageKind, MessageText, ParticipantName, Timestamp,
};

#[cfg(test)]
pub use repository::MockRoomRepository;
