//! Redis (or any Redis-compatible store) hot state operations.
//!
//! Redis holds the live social state: characters, relationship ledgers and
//! conversation logs, plus the pub/sub channel interaction events go out on.
//!
//! # Key Patterns
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `character:{id}:state` | JSON | Full character state |
//! | `character:{id}:relationships` | Set | Counterpart character IDs |
//! | `relationship:{low}:{high}:state` | JSON | Relationship ledger entry |
//! | `conversation:{low}:{high}:messages` | List | Conversation messages |
//! | `ecosystem:{id}:events` | Pub/Sub | Ecosystem event channel |
//!
//! Relationship and conversation keys embed a [`PairKey`], so both members
//! of a pair resolve to the same key regardless of argument order.

use fred::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use rapport_types::{CharacterId, PairKey};

use crate::error::DbError;

/// Connection handle to a Redis-compatible instance.
///
/// Wraps a [`fred::prelude::Client`] and provides typed operations for the
/// key patterns listed in the module documentation.
#[derive(Clone)]
pub struct RedisPool {
    client: Client,
}

impl RedisPool {
    /// Connect to Redis at the given URL.
    ///
    /// The URL should follow the Redis URL scheme:
    /// `redis://host:port` or `redis://host:port/db`
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    /// Returns [`DbError::Redis`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let config =
            Config::from_url(url).map_err(|e| DbError::Config(format!("Invalid Redis URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("Connected to Redis");
        Ok(Self { client })
    }

    // =========================================================================
    // Generic JSON get/set/delete
    // =========================================================================

    /// Serialize `value` as JSON and store it at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if serialization fails.
    /// Returns [`DbError::Redis`] if the write fails.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), DbError> {
        let json = serde_json::to_string(value)?;
        let _: () = self.client.set(key, json.as_str(), None, None, false).await?;
        Ok(())
    }

    /// Read the value at `key` and deserialize from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::KeyNotFound`] if the key does not exist.
    /// Returns [`DbError::Serialization`] if deserialization fails.
    /// Returns [`DbError::Redis`] if the read fails.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<T, DbError> {
        let value: Option<String> = self.client.get(key).await?;
        value.map_or_else(
            || Err(DbError::KeyNotFound(key.to_owned())),
            |s| Ok(serde_json::from_str(&s)?),
        )
    }

    /// Delete a key from Redis.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Redis`] if the delete fails.
    pub async fn delete(&self, key: &str) -> Result<(), DbError> {
        let _: u32 = self.client.del(key).await?;
        Ok(())
    }

    // =========================================================================
    // Character State -- character:{id}:state
    // =========================================================================

    /// Store the full character state at `character:{id}:state`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if serialization or write fails.
    pub async fn set_character_state<T: Serialize>(
        &self,
        character_id: CharacterId,
        state: &T,
    ) -> Result<(), DbError> {
        let key = format!("character:{character_id}:state");
        self.set_json(&key, state).await
    }

    /// Get the full character state from `character:{id}:state`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if not found, deserialization, or read fails.
    pub async fn get_character_state<T: DeserializeOwned>(
        &self,
        character_id: CharacterId,
    ) -> Result<T, DbError> {
        let key = format!("character:{character_id}:state");
        self.get_json(&key).await
    }

    /// Delete the character state key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Redis`] if the delete fails.
    pub async fn delete_character_state(&self, character_id: CharacterId) -> Result<(), DbError> {
        let key = format!("character:{character_id}:state");
        self.delete(&key).await
    }

    // =========================================================================
    // Relationship State -- relationship:{low}:{high}:state
    // =========================================================================

    /// Store the relationship ledger entry at `relationship:{low}:{high}:state`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if serialization or write fails.
    pub async fn set_relationship_state<T: Serialize>(
        &self,
        pair: PairKey,
        state: &T,
    ) -> Result<(), DbError> {
        let key = format!("relationship:{pair}:state");
        self.set_json(&key, state).await
    }

    /// Get the relationship ledger entry from `relationship:{low}:{high}:state`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::KeyNotFound`] if the pair has no recorded
    /// relationship yet.
    /// Returns [`DbError`] if deserialization or read fails.
    pub async fn get_relationship_state<T: DeserializeOwned>(
        &self,
        pair: PairKey,
    ) -> Result<T, DbError> {
        let key = format!("relationship:{pair}:state");
        self.get_json(&key).await
    }

    /// Delete the relationship state key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Redis`] if the delete fails.
    pub async fn delete_relationship_state(&self, pair: PairKey) -> Result<(), DbError> {
        let key = format!("relationship:{pair}:state");
        self.delete(&key).await
    }

    // =========================================================================
    // Relationship Index -- character:{id}:relationships (set)
    // =========================================================================

    /// Record that `character_id` has a relationship with `other`.
    ///
    /// Adds `other` to the `character:{id}:relationships` set. Call once per
    /// direction to keep the index symmetric.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Redis`] if the write fails.
    pub async fn add_relationship_link(
        &self,
        character_id: CharacterId,
        other: CharacterId,
    ) -> Result<(), DbError> {
        let key = format!("character:{character_id}:relationships");
        let _: u32 = self
            .client
            .sadd(&key, other.to_string().as_str())
            .await?;
        Ok(())
    }

    /// Get all counterpart character IDs from `character:{id}:relationships`.
    ///
    /// Returns an empty list for a character with no recorded relationships.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Redis`] if the read fails.
    /// Returns [`DbError::Config`] if the set contains a malformed ID.
    pub async fn get_relationship_links(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<CharacterId>, DbError> {
        let key = format!("character:{character_id}:relationships");
        let members: Vec<String> = self.client.smembers(&key).await?;
        let mut ids = Vec::with_capacity(members.len());
        for m in &members {
            let id = m.parse::<Uuid>().map_err(|e| {
                DbError::Config(format!("Invalid UUID in {key}: {e}"))
            })?;
            ids.push(CharacterId::from(id));
        }
        Ok(ids)
    }

    // =========================================================================
    // Conversation Log -- conversation:{low}:{high}:messages (list)
    // =========================================================================

    /// Append a message to the pair's conversation log
    /// (`conversation:{low}:{high}:messages`).
    ///
    /// Messages are appended to the end of the list (RPUSH), so the list
    /// reads in chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if serialization or write fails.
    pub async fn push_conversation_message<T: Serialize>(
        &self,
        pair: PairKey,
        message: &T,
    ) -> Result<(), DbError> {
        let key = format!("conversation:{pair}:messages");
        let json = serde_json::to_string(message)?;
        let _: u64 = self.client.rpush(&key, json.as_str()).await?;
        Ok(())
    }

    /// Get all messages from the pair's conversation log.
    ///
    /// Returns messages in insertion order (oldest first).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if deserialization or read fails.
    pub async fn get_conversation_messages<T: DeserializeOwned>(
        &self,
        pair: PairKey,
    ) -> Result<Vec<T>, DbError> {
        let key = format!("conversation:{pair}:messages");
        let values: Vec<String> = self.client.lrange(&key, 0, -1).await?;
        let mut messages = Vec::with_capacity(values.len());
        for v in &values {
            let parsed: T = serde_json::from_str(v)?;
            messages.push(parsed);
        }
        Ok(messages)
    }

    /// Clear a pair's conversation log.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Redis`] if the delete fails.
    pub async fn clear_conversation(&self, pair: PairKey) -> Result<(), DbError> {
        let key = format!("conversation:{pair}:messages");
        self.delete(&key).await
    }

    // =========================================================================
    // Interaction write set -- one MULTI/EXEC over the patterns above
    // =========================================================================

    /// Persist one interaction's full write set in a single MULTI/EXEC
    /// transaction: the relationship state, both directions of the
    /// relationship index, both character states, and the conversation
    /// messages in order.
    ///
    /// The queued commands apply atomically on the server, so a failure
    /// leaves none of them applied.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if any payload fails to
    /// serialize. Returns [`DbError::Redis`] if queuing or executing the
    /// transaction fails.
    pub async fn persist_interaction<R, C, M>(
        &self,
        pair: PairKey,
        relationship: &R,
        characters: [(CharacterId, &C); 2],
        messages: &[M],
    ) -> Result<(), DbError>
    where
        R: Serialize,
        C: Serialize,
        M: Serialize,
    {
        let [(first_id, first), (second_id, second)] = characters;
        let relationship_json = serde_json::to_string(relationship)?;
        let first_json = serde_json::to_string(first)?;
        let second_json = serde_json::to_string(second)?;
        let mut message_json = Vec::with_capacity(messages.len());
        for message in messages {
            message_json.push(serde_json::to_string(message)?);
        }

        let tx = self.client.multi();
        let relationship_key = format!("relationship:{pair}:state");
        let _: Value = tx
            .set(relationship_key, relationship_json.as_str(), None, None, false)
            .await?;
        let first_link_key = format!("character:{first_id}:relationships");
        let _: Value = tx
            .sadd(first_link_key, second_id.to_string().as_str())
            .await?;
        let second_link_key = format!("character:{second_id}:relationships");
        let _: Value = tx
            .sadd(second_link_key, first_id.to_string().as_str())
            .await?;
        let first_state_key = format!("character:{first_id}:state");
        let _: Value = tx
            .set(first_state_key, first_json.as_str(), None, None, false)
            .await?;
        let second_state_key = format!("character:{second_id}:state");
        let _: Value = tx
            .set(second_state_key, second_json.as_str(), None, None, false)
            .await?;
        if !message_json.is_empty() {
            let conversation_key = format!("conversation:{pair}:messages");
            let _: Value = tx.rpush(conversation_key, message_json).await?;
        }
        let _: Vec<Value> = tx.exec(true).await?;
        Ok(())
    }

    // =========================================================================
    // Event Publish -- ecosystem:{id}:events (pub/sub)
    // =========================================================================

    /// Publish a JSON payload on a pub/sub channel.
    ///
    /// Returns the number of subscribers that received the message. Zero
    /// receivers is not an error: pub/sub delivery is best effort and
    /// nothing may be listening.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if serialization fails.
    /// Returns [`DbError::Redis`] if the publish fails.
    pub async fn publish_json<T: Serialize>(
        &self,
        channel: &str,
        payload: &T,
    ) -> Result<u32, DbError> {
        let json = serde_json::to_string(payload)?;
        let receivers: u32 = self.client.publish(channel, json.as_str()).await?;
        Ok(receivers)
    }

    /// Flush all keys from the Redis instance.
    ///
    /// **WARNING:** This deletes all data. Only use for testing.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Redis`] if the flush fails.
    pub async fn flush_all(&self) -> Result<(), DbError> {
        let _: () = self.client.flushall(false).await?;
        Ok(())
    }

    /// Return a reference to the underlying [`Client`].
    pub const fn client(&self) -> &Client {
        &self.client
    }
}
