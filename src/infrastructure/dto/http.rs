//! HTTP API request/response DTOs for the chat room.
//!
//! Request bodies carry loose strings; conversion into domain value
//! objects happens here so handlers only ever see validated values.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Destination, Message, MessageKind, MessagePatch, MessageText, Participant, ValueObjectError,
};

/// Body of `POST /participants`
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequest {
    pub name: String,
}

/// Body of `POST /messages` and `PUT /messages/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl MessageBody {
    /// Validate and convert into domain values. Only user-sendable kinds
    /// (`message`, `private_message`) pass.
    pub fn into_domain(
        self,
    ) -> Result<(Destination, MessageText, MessageKind), ValueObjectError> {
        let to = Destination::try_from(self.to)?;
        let text = MessageText::new(self.text)?;
        let kind = MessageKind::parse(&self.kind)?.ensure_sendable()?;
        Ok((to, text, kind))
    }

    /// Validate and convert into an edit patch.
    pub fn into_patch(self) -> Result<MessagePatch, ValueObjectError> {
        let (to, text, kind) = self.into_domain()?;
        Ok(MessagePatch { to, text, kind })
    }
}

/// Participant as listed by `GET /participants`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub name: String,
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

impl From<&Participant> for ParticipantDto {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.name.as_str().to_string(),
            last_status: participant.last_seen.value(),
        }
    }
}

/// Message as listed by `GET /messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            from: message.from.as_str().to_string(),
            to: message.to.as_str().to_string(),
            text: message.text.as_str().to_string(),
            kind: message.kind.as_str().to_string(),
            time: message.time.clone(),
        }
    }
}

/// Response of a successful `POST /messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreatedDto {
    pub id: String,
}
