//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// The wire literal addressing every participant in the room.
pub const BROADCAST_ADDRESS: &str = "Todos";

/// Participant name value object.
///
/// The name is the sole identity key of a participant; there is no
/// separate id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Create a new ParticipantName.
    ///
    /// # Errors
    ///
    /// Fails on an empty name, a name longer than 100 characters, or the
    /// reserved broadcast address `Todos`.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::ParticipantNameEmpty);
        }
        let len = name.len();
        if len > 100 {
            return Err(ValueObjectError::ParticipantNameTooLong {
                max: 100,
                actual: len,
            });
        }
        if name == BROADCAST_ADDRESS {
            return Err(ValueObjectError::ParticipantNameReserved(name));
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message text value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText(String);

impl MessageText {
    /// Create a new MessageText.
    ///
    /// # Errors
    ///
    /// Fails on empty text or text longer than 10000 characters.
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.is_empty() {
            return Err(ValueObjectError::MessageTextEmpty);
        }
        let len = text.len();
        if len > 10000 {
            return Err(ValueObjectError::MessageTextTooLong {
                max: 10000,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message destination value object.
///
/// Either the whole room (the literal `Todos` on the wire) or a single
/// named participant. Serialized as a bare string in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Destination {
    /// Broadcast to the whole room (`Todos`)
    Everyone,
    /// Private destination, addressed by participant name
    Participant(ParticipantName),
}

impl Destination {
    /// Get the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Destination::Everyone => BROADCAST_ADDRESS,
            Destination::Participant(name) => name.as_str(),
        }
    }

    /// Whether this destination reaches every participant.
    pub fn is_everyone(&self) -> bool {
        matches!(self, Destination::Everyone)
    }
}

impl TryFrom<String> for Destination {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ValueObjectError::DestinationEmpty);
        }
        if value == BROADCAST_ADDRESS {
            return Ok(Destination::Everyone);
        }
        Ok(Destination::Participant(ParticipantName::new(value)?))
    }
}

impl From<Destination> for String {
    fn from(value: Destination) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message kind value object.
///
/// `Broadcast` and `Private` are the user-sendable kinds; `Status` is
/// synthesized by the system on join and eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Public chat message (wire: `message`)
    #[serde(rename = "message")]
    Broadcast,
    /// Private chat message (wire: `private_message`)
    #[serde(rename = "private_message")]
    Private,
    /// System announcement on join/leave (wire: `status`)
    #[serde(rename = "status")]
    Status,
}

impl MessageKind {
    /// Parse the wire representation.
    pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
        match value {
            "message" => Ok(MessageKind::Broadcast),
            "private_message" => Ok(MessageKind::Private),
            "status" => Ok(MessageKind::Status),
            other => Err(ValueObjectError::UnknownMessageKind(other.to_string())),
        }
    }

    /// Get the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Broadcast => "message",
            MessageKind::Private => "private_message",
            MessageKind::Status => "status",
        }
    }

    /// Whether participants may send this kind themselves.
    pub fn is_sendable(&self) -> bool {
        matches!(self, MessageKind::Broadcast | MessageKind::Private)
    }

    /// Reject kinds reserved for the system.
    pub fn ensure_sendable(self) -> Result<Self, ValueObjectError> {
        if self.is_sendable() {
            Ok(self)
        } else {
            Err(ValueObjectError::KindNotSendable(self.as_str().to_string()))
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp from Unix milliseconds.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Timestamp `millis` milliseconds earlier, saturating at i64::MIN.
    pub fn minus_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_sub(millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier value object.
///
/// Opaque unique id assigned by the store on append (UUID v4 under the
/// hood, generated through `MessageIdFactory`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(uuid::Uuid);

impl MessageId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the canonical hyphenated form.
    pub fn parse_str(value: &str) -> Result<Self, ValueObjectError> {
        uuid::Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ValueObjectError::MessageIdInvalidFormat(value.to_string()))
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
