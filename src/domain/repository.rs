//! Repository trait for the shared room store.
//!
//! The usecase layer depends on this trait only; the concrete store lives
//! in the infrastructure layer (dependency inversion). Every method must
//! be atomic with respect to every other: a join and a concurrent sweep
//! must not race to produce a duplicate participant or a lost eviction,
//! and no reader may observe a partially-applied sweep batch.

use async_trait::async_trait;
use thiserror::Error;

use super::{
    entity::{Message, MessageDraft, MessagePatch, Participant},
    error::RoomError,
    value_object::{MessageId, ParticipantName, Timestamp},
};

/// Errors surfaced by room store implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A domain rule rejected the operation
    #[error(transparent)]
    Room(#[from] RoomError),

    /// The backing store itself failed. Never retried internally:
    /// retrying a non-idempotent append could duplicate messages.
    #[error("room store unavailable: {0}")]
    Unavailable(String),
}

/// Abstraction over the single piece of mutable shared state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Compare-and-insert a participant. `RoomError::NameTaken` if the
    /// name is already live.
    async fn add_participant(
        &self,
        name: ParticipantName,
        last_seen: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// Remove a participant from the live set.
    async fn remove_participant(&self, name: &ParticipantName) -> Result<(), RepositoryError>;

    /// Live participants in join order.
    async fn list_participants(&self) -> Result<Vec<Participant>, RepositoryError>;

    /// Refresh `last_seen`. `RoomError::ParticipantNotFound` if the name
    /// is not live (session lost).
    async fn touch(
        &self,
        name: &ParticipantName,
        seen_at: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// Append a message, returning the id the store assigned.
    async fn append_message(&self, draft: MessageDraft) -> Result<MessageId, RepositoryError>;

    /// The full message log in insertion order.
    async fn list_messages(&self) -> Result<Vec<Message>, RepositoryError>;

    /// Replace the mutable fields of a message; ownership enforced by
    /// the store (`MessageNotFound` / `NotMessageOwner`).
    async fn edit_message(
        &self,
        id: &MessageId,
        patch: MessagePatch,
        requester: &ParticipantName,
    ) -> Result<(), RepositoryError>;

    /// Delete a message; ownership enforced by the store.
    async fn delete_message(
        &self,
        id: &MessageId,
        requester: &ParticipantName,
    ) -> Result<(), RepositoryError>;

    /// Evict everyone with `last_seen <= cutoff` and append their leave
    /// announcements as one atomic batch. Returns the evicted names.
    async fn sweep_idle(&self, cutoff: Timestamp) -> Result<Vec<ParticipantName>, RepositoryError>;
}
