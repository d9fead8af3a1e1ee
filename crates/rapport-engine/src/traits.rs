//! Storage and event-bus abstractions for the interaction engine.
//!
//! The orchestrator talks to its collaborators through these traits so the
//! full interaction flow can run against in-memory fakes in tests and the
//! Redis-backed implementations in production (see [`crate::redis`]).
//!
//! Persistence futures carry a `Send` bound so engine futures can be spawned
//! onto a multi-threaded runtime.

use std::future::Future;

use rapport_types::{Character, CharacterId, EcosystemEvent, Message, PairKey, Relationship};

/// Errors surfaced by a [`Persistence`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested entity does not exist in the store.
    #[error("{entity} not found")]
    NotFound {
        /// Human-readable name of the missing entity.
        entity: String,
    },

    /// The storage backend failed.
    #[error("storage backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

/// Durable state access for characters, relationships and conversations.
///
/// Implementations must be safe to share across tasks: the engine clones
/// nothing and calls these methods concurrently for unrelated pairs.
pub trait Persistence: Send + Sync {
    /// Load a character by ID.
    ///
    /// Returns [`StoreError::NotFound`] when no such character exists.
    fn load_character(
        &self,
        character_id: CharacterId,
    ) -> impl Future<Output = Result<Character, StoreError>> + Send;

    /// Load the relationship ledger entry for a pair.
    ///
    /// Returns [`StoreError::NotFound`] when the pair has never interacted;
    /// the engine starts a fresh ledger entry in that case.
    fn load_relationship(
        &self,
        pair: PairKey,
    ) -> impl Future<Output = Result<Relationship, StoreError>> + Send;

    /// Persist the complete outcome of one interaction: the updated
    /// relationship ledger entry (with any indexes needed to find it from
    /// either member of the pair), both participants' states, and the two
    /// exchanged messages, appended in order.
    ///
    /// The write set is atomic: either every record lands or none does. A
    /// failure must never leave the interaction half applied.
    fn persist_interaction(
        &self,
        relationship: &Relationship,
        initiator: &Character,
        target: &Character,
        messages: &[Message; 2],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Read a pair's conversation log in chronological order.
    fn conversation(
        &self,
        pair: PairKey,
    ) -> impl Future<Output = Result<Vec<Message>, StoreError>> + Send;

    /// All relationship ledger entries involving a character.
    ///
    /// Returns an empty list (not [`StoreError::NotFound`]) for a character
    /// with no relationships.
    fn relationships_for(
        &self,
        character_id: CharacterId,
    ) -> impl Future<Output = Result<Vec<Relationship>, StoreError>> + Send;
}

/// Fire-and-forget event publishing.
///
/// Publishing happens after an interaction has been persisted and must never
/// affect its outcome: implementations deliver asynchronously and log
/// failures instead of returning them.
pub trait EventBus: Send + Sync {
    /// Publish an event on the given channel.
    fn publish(&self, channel: &str, event: &EcosystemEvent);
}
