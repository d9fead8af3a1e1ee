//! The interaction pipeline: validate, execute, persist, publish.
//!
//! [`InteractionEngine`] is the single entry point for running an
//! interaction between two characters. Requests flow through staged
//! validation (existence, ecosystem, activity, energy), then execute under
//! the pair's canonical lock: both characters are reloaded and re-checked
//! on the serialized state, and sentiment analysis, the relationship
//! ledger update, emotional responses, reply generation, and energy debits
//! all complete before the write is issued. The whole write set goes to
//! the [`Persistence`] collaborator as one atomic unit; the ecosystem
//! event is published fire-and-forget after the lock is released.
//!
//! The caller never sees an `Err`: validation failures come back as
//! `success == false` with a reason, and internal faults are logged and
//! mapped to a generic failure result.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, error, warn};

use rapport_social::{
    SocialConfig, SocialError, analyze_sentiment, apply_energy_cost, apply_interaction,
    dominant_emotion, emotional_response, generate_reply, responder_energy_cost,
    scaled_energy_cost, sentiment_to_decimal,
};
use rapport_types::{
    Character, CharacterId, CharacterInteractionDetails, CompatibilityReport, InteractionMetadata,
    InteractionRequest, InteractionResult, Message, MessageId, PairKey, RejectionReason,
    Relationship, RelationshipMilestoneDetails, RelationshipSummary, SenderKind,
};

use crate::events;
use crate::pair_lock::PairLocks;
use crate::traits::{EventBus, Persistence, StoreError};

/// Errors internal to the interaction pipeline.
///
/// These never reach the caller of [`InteractionEngine::process_interaction`];
/// they are logged and mapped to [`InteractionResult::internal_failure`].
/// The read-side queries surface them directly.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A persistence collaborator call failed.
    #[error("storage error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },

    /// A domain computation failed, which means an invariant was violated.
    #[error("social computation error: {source}")]
    Social {
        /// The underlying computation error.
        #[from]
        source: SocialError,
    },
}

/// Orchestrates character interactions against pluggable collaborators.
///
/// `S` supplies durable state, `B` carries ecosystem events. Production
/// wires these to [`crate::RedisStore`] and [`crate::RedisEventBus`]; tests
/// substitute in-memory fakes.
#[derive(Debug)]
pub struct InteractionEngine<S, B> {
    store: S,
    events: B,
    locks: PairLocks,
    config: SocialConfig,
}

impl<S: Persistence, B: EventBus> InteractionEngine<S, B> {
    /// Build an engine over the given collaborators and tuning parameters.
    pub fn new(store: S, events: B, config: SocialConfig) -> Self {
        Self {
            store,
            events,
            locks: PairLocks::new(),
            config,
        }
    }

    /// Run one interaction request through the full pipeline.
    ///
    /// Always returns an [`InteractionResult`]; failed validation and
    /// internal faults are reported through `success == false` rather than
    /// an error. Internal faults are logged at error level with the detail
    /// kept out of the caller-facing reason.
    pub async fn process_interaction(&self, request: InteractionRequest) -> InteractionResult {
        let initiator = request.initiator;
        let target = request.target;
        match self.try_process(request).await {
            Ok(result) => result,
            Err(e) => {
                error!(
                    initiator = %initiator,
                    target = %target,
                    error = %e,
                    "interaction failed"
                );
                InteractionResult::internal_failure()
            }
        }
    }

    // The execute path reads top to bottom as one pipeline; splitting it
    // would scatter the staging.
    #[allow(clippy::too_many_lines)]
    async fn try_process(
        &self,
        request: InteractionRequest,
    ) -> Result<InteractionResult, EngineError> {
        let InteractionRequest {
            initiator: initiator_id,
            target: target_id,
            kind,
            content,
            context,
        } = request;

        if initiator_id == target_id {
            return Ok(reject(initiator_id, target_id, RejectionReason::SelfInteraction));
        }

        // Fast-fail validation on a pre-lock snapshot.
        let (initiator, target) = match self.load_participants(initiator_id, target_id).await? {
            Ok(loaded) => loaded,
            Err(reason) => return Ok(reject(initiator_id, target_id, reason)),
        };
        if let Err(reason) = validate_participants(&initiator, &target, &self.config) {
            return Ok(reject(initiator_id, target_id, reason));
        }

        let pair = PairKey::new(initiator_id, target_id);
        let guard = self.locks.acquire(pair).await;

        // Same-pair interactions serialize on the lock, so the snapshot
        // loaded above may already be stale. Reload and re-check on the
        // state the lock protects; every read and debit below uses this
        // copy.
        let (mut initiator, mut target) =
            match self.load_participants(initiator_id, target_id).await? {
                Ok(loaded) => loaded,
                Err(reason) => return Ok(reject(initiator_id, target_id, reason)),
            };
        if let Err(reason) = validate_participants(&initiator, &target, &self.config) {
            return Ok(reject(initiator_id, target_id, reason));
        }

        let mut relationship = match self.store.load_relationship(pair).await {
            Ok(relationship) => relationship,
            Err(StoreError::NotFound { .. }) => Relationship::fresh(pair),
            Err(source) => return Err(source.into()),
        };
        let previous_standing = relationship.standing;

        let now = Utc::now();
        let sentiment_score = analyze_sentiment(&content, "");
        let sentiment = sentiment_to_decimal(sentiment_score)?;

        let initiator_state = emotional_response(&initiator.personality, kind, sentiment_score);
        let target_state = emotional_response(&target.personality, kind, sentiment_score);

        // The responder owes a share of what the initiator actually paid,
        // so a debit clipped by the zero floor shrinks both sides.
        let cost = scaled_energy_cost(kind, sentiment)?;
        let initiator_energy = apply_energy_cost(initiator.social_energy, cost);
        let realized_debit = initiator.social_energy.saturating_sub(initiator_energy);
        let responder_cost =
            responder_energy_cost(realized_debit, self.config.responder_cost_share)?;
        initiator.social_energy = initiator_energy;
        target.social_energy = apply_energy_cost(target.social_energy, responder_cost);

        let change = apply_interaction(&mut relationship, kind, sentiment, &self.config, now)?;

        let dominant = dominant_emotion(&target_state);
        let reply = generate_reply(kind, dominant, &initiator.name);

        initiator.context.last_emotional_state = Some(initiator_state.clone());
        initiator.context.last_interaction_at = Some(now);
        target.context.last_emotional_state = Some(target_state.clone());
        target.context.last_interaction_at = Some(now);

        let initiator_message = Message {
            id: MessageId::new(),
            pair,
            sender_id: initiator.id,
            sender_name: initiator.name.clone(),
            sender_kind: SenderKind::Character,
            content,
            emotional_state: Some(initiator_state.clone()),
            interaction_type: kind,
            metadata: context,
            sent_at: now,
        };
        let responder_message = Message {
            id: MessageId::new(),
            pair,
            sender_id: target.id,
            sender_name: target.name.clone(),
            sender_kind: SenderKind::Character,
            content: reply.clone(),
            emotional_state: Some(target_state.clone()),
            interaction_type: kind,
            metadata: BTreeMap::new(),
            sent_at: now,
        };

        // Computation is done; the whole write set commits as one unit.
        let messages = [initiator_message, responder_message];
        self.store
            .persist_interaction(&relationship, &initiator, &target, &messages)
            .await?;

        drop(guard);

        let channel = events::ecosystem_channel(initiator.ecosystem_id);
        let details = CharacterInteractionDetails {
            interaction_type: kind,
            participants: [initiator.id, target.id],
            sentiment,
            initiator_emotion: dominant_emotion(&initiator_state),
            target_emotion: dominant,
            standing: change.standing,
        };
        match events::character_interaction(&details, now) {
            Ok(event) => self.events.publish(&channel, &event),
            Err(e) => warn!(error = %e, "failed to build interaction event"),
        }
        if change.standing != previous_standing {
            let details = RelationshipMilestoneDetails {
                participants: [initiator.id, target.id],
                previous: previous_standing,
                current: change.standing,
                interaction_count: change.interaction_count,
            };
            match events::relationship_milestone(&details, now) {
                Ok(event) => self.events.publish(&channel, &event),
                Err(e) => warn!(error = %e, "failed to build milestone event"),
            }
        }

        debug!(
            initiator = %initiator.id,
            target = %target.id,
            kind = %kind,
            sentiment = %sentiment,
            standing = %change.standing,
            "interaction completed"
        );

        Ok(InteractionResult {
            success: true,
            reason: None,
            response: reply,
            emotional_state: target_state,
            relationship_change: Some(change),
            metadata: Some(InteractionMetadata {
                interaction_type: kind,
                timestamp: now,
                sentiment,
            }),
        })
    }

    /// Load both participants concurrently, mapping a missing record to
    /// its rejection.
    async fn load_participants(
        &self,
        initiator_id: CharacterId,
        target_id: CharacterId,
    ) -> Result<Result<(Character, Character), RejectionReason>, EngineError> {
        let (initiator_loaded, target_loaded) = futures::join!(
            self.store.load_character(initiator_id),
            self.store.load_character(target_id),
        );
        let initiator = match initiator_loaded {
            Ok(character) => character,
            Err(StoreError::NotFound { .. }) => {
                return Ok(Err(RejectionReason::InitiatorNotFound));
            }
            Err(source) => return Err(source.into()),
        };
        let target = match target_loaded {
            Ok(character) => character,
            Err(StoreError::NotFound { .. }) => return Ok(Err(RejectionReason::TargetNotFound)),
            Err(source) => return Err(source.into()),
        };
        Ok(Ok((initiator, target)))
    }

    /// Summaries of every relationship touching a character, from that
    /// character's perspective.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the store index cannot be read.
    pub async fn relationships_for(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<RelationshipSummary>, EngineError> {
        let relationships = self.store.relationships_for(character_id).await?;
        Ok(relationships
            .iter()
            .filter_map(|r| RelationshipSummary::for_character(r, character_id))
            .collect())
    }

    /// Compatibility report for two stored characters.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if either character cannot be loaded.
    pub async fn compatibility(
        &self,
        left: CharacterId,
        right: CharacterId,
    ) -> Result<CompatibilityReport, EngineError> {
        let (left_loaded, right_loaded) = futures::join!(
            self.store.load_character(left),
            self.store.load_character(right),
        );
        let left = left_loaded?;
        let right = right_loaded?;
        Ok(rapport_social::compatibility(
            &left.personality,
            &right.personality,
        ))
    }

    /// The persisted conversation between two characters, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the conversation list cannot be
    /// read.
    pub async fn conversation(
        &self,
        a: CharacterId,
        b: CharacterId,
    ) -> Result<Vec<Message>, EngineError> {
        Ok(self.store.conversation(PairKey::new(a, b)).await?)
    }

    /// Drop idle pair-lock entries. Returns the number removed.
    pub async fn prune_locks(&self) -> usize {
        self.locks.prune().await
    }
}

fn reject(
    initiator: CharacterId,
    target: CharacterId,
    reason: RejectionReason,
) -> InteractionResult {
    debug!(
        initiator = %initiator,
        target = %target,
        reason = reason.message(),
        "interaction rejected"
    );
    InteractionResult::rejected(reason)
}

/// Staged participant validation. The first failed stage decides the
/// rejection, so ordering is part of the contract: ecosystem, activity,
/// energy.
fn validate_participants(
    initiator: &Character,
    target: &Character,
    config: &SocialConfig,
) -> Result<(), RejectionReason> {
    validate_shared_ecosystem(initiator, target)?;
    validate_active(initiator)?;
    validate_active(target)?;
    validate_energy(initiator, config)
}

fn validate_shared_ecosystem(
    initiator: &Character,
    target: &Character,
) -> Result<(), RejectionReason> {
    if initiator.ecosystem_id == target.ecosystem_id {
        Ok(())
    } else {
        Err(RejectionReason::CrossEcosystem)
    }
}

const fn validate_active(character: &Character) -> Result<(), RejectionReason> {
    if character.is_active {
        Ok(())
    } else {
        Err(RejectionReason::InactiveCharacter)
    }
}

fn validate_energy(initiator: &Character, config: &SocialConfig) -> Result<(), RejectionReason> {
    if initiator.social_energy < config.energy_floor {
        Err(RejectionReason::ExhaustedInitiator)
    } else {
        Ok(())
    }
}
