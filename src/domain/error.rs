//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ParticipantName validation error
    #[error("ParticipantName cannot be empty")]
    ParticipantNameEmpty,

    /// ParticipantName too long error
    #[error("ParticipantName cannot exceed {max} characters (got {actual})")]
    ParticipantNameTooLong { max: usize, actual: usize },

    /// ParticipantName reserved error (`Todos` is the broadcast address)
    #[error("ParticipantName '{0}' is reserved")]
    ParticipantNameReserved(String),

    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("MessageText cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// Destination validation error
    #[error("Destination cannot be empty")]
    DestinationEmpty,

    /// MessageKind parse error
    #[error("unknown message kind: {0}")]
    UnknownMessageKind(String),

    /// MessageKind not allowed from callers (only the system emits `status`)
    #[error("message kind '{0}' cannot be sent by a participant")]
    KindNotSendable(String),

    /// MessageId parse error (not a valid UUID)
    #[error("MessageId must be a valid UUID (got: {0})")]
    MessageIdInvalidFormat(String),
}

/// Errors related to Room domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// A participant with the same name is already in the live set
    #[error("participant '{name}' already in the room")]
    NameTaken { name: String },

    /// Participant absent from the live set (stale session)
    #[error("participant '{name}' not found")]
    ParticipantNotFound { name: String },

    /// No message with the given id in the log
    #[error("message '{id}' not found")]
    MessageNotFound { id: String },

    /// Requester is not the author of the targeted message
    #[error("only the original sender may modify a message")]
    NotMessageOwner,
}
