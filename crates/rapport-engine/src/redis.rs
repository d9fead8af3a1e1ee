//! Redis-backed collaborator implementations.
//!
//! [`RedisStore`] adapts the [`rapport_db::RedisPool`] key-pattern
//! operations to the [`Persistence`] trait, and [`RedisEventBus`] delivers
//! ecosystem events over Redis pub/sub. Both are thin: key layout and wire
//! format live in `rapport-db`, durability semantics live here.

use tracing::{debug, warn};

use rapport_db::{DbError, RedisPool};
use rapport_types::{Character, CharacterId, EcosystemEvent, Message, PairKey, Relationship};

use crate::traits::{EventBus, Persistence, StoreError};

/// [`Persistence`] over a shared Redis connection.
#[derive(Clone)]
pub struct RedisStore {
    pool: RedisPool,
}

impl RedisStore {
    /// Wrap a connected pool.
    pub const fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

impl Persistence for RedisStore {
    async fn load_character(&self, id: CharacterId) -> Result<Character, StoreError> {
        self.pool
            .get_character_state(id)
            .await
            .map_err(|e| map_db_error(e, "character"))
    }

    async fn load_relationship(&self, pair: PairKey) -> Result<Relationship, StoreError> {
        self.pool
            .get_relationship_state(pair)
            .await
            .map_err(|e| map_db_error(e, "relationship"))
    }

    async fn persist_interaction(
        &self,
        relationship: &Relationship,
        initiator: &Character,
        target: &Character,
        messages: &[Message; 2],
    ) -> Result<(), StoreError> {
        // One transaction covers the ledger entry, both index directions,
        // both character states and the message log.
        self.pool
            .persist_interaction(
                relationship.pair,
                relationship,
                [(initiator.id, initiator), (target.id, target)],
                messages,
            )
            .await
            .map_err(|e| map_db_error(e, "interaction"))
    }

    async fn conversation(&self, pair: PairKey) -> Result<Vec<Message>, StoreError> {
        self.pool
            .get_conversation_messages(pair)
            .await
            .map_err(|e| map_db_error(e, "conversation"))
    }

    async fn relationships_for(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<Relationship>, StoreError> {
        let links = self
            .pool
            .get_relationship_links(character_id)
            .await
            .map_err(|e| map_db_error(e, "relationship index"))?;
        let mut relationships = Vec::with_capacity(links.len());
        for other in links {
            let pair = PairKey::new(character_id, other);
            match self.pool.get_relationship_state(pair).await {
                Ok(relationship) => relationships.push(relationship),
                // A link can outlive its entry (deletes clear state, not
                // links); skip the gap rather than failing the whole
                // enumeration.
                Err(DbError::KeyNotFound(_)) => {}
                Err(e) => return Err(map_db_error(e, "relationship")),
            }
        }
        Ok(relationships)
    }
}

/// [`EventBus`] over Redis pub/sub.
///
/// Publishing spawns onto the current Tokio runtime and returns immediately;
/// delivery failures are logged at warn level and never surfaced.
#[derive(Clone)]
pub struct RedisEventBus {
    pool: RedisPool,
}

impl RedisEventBus {
    /// Wrap a connected pool.
    pub const fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

impl EventBus for RedisEventBus {
    fn publish(&self, channel: &str, event: &EcosystemEvent) {
        let pool = self.pool.clone();
        let channel = channel.to_owned();
        let event = event.clone();
        tokio::spawn(async move {
            match pool.publish_json(&channel, &event).await {
                Ok(receivers) => {
                    debug!(channel = %channel, receivers, "event published");
                }
                Err(e) => {
                    warn!(channel = %channel, error = %e, "failed to publish event");
                }
            }
        });
    }
}

fn map_db_error(error: DbError, entity: &str) -> StoreError {
    match error {
        DbError::KeyNotFound(_) => StoreError::NotFound {
            entity: entity.to_owned(),
        },
        other => StoreError::Backend {
            message: other.to_string(),
        },
    }
}
