//! Core entity structs for the Rapport interaction engine.
//!
//! Covers [`Personality`], [`Character`], [`Relationship`], the interaction
//! request/result pair, persisted [`Message`]s, and published
//! [`EcosystemEvent`]s.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    Emotion, EventType, InteractionKind, RejectionReason, RelationshipStanding, SenderKind,
};
use crate::ids::{CharacterId, EcosystemId, EventId, MessageId, PairKey};

/// A distribution of emotion weights.
///
/// Weights are non-negative and, for any state produced by the emotional
/// model, sum to 1.0. An empty map means no emotional signal.
pub type EmotionalState = BTreeMap<Emotion, f64>;

/// Clamp a score into the 0.0--1.0 range.
fn clamp_unit(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE)
}

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// Five-dimension personality vector assigned at character creation.
///
/// Each trait is a [`Decimal`] in the 0.0--1.0 range. Personality shapes
/// emotional responses, interaction forecasts, and compatibility, but never
/// changes over the character's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Personality {
    /// Curiosity and appetite for novelty.
    #[ts(as = "String")]
    pub openness: Decimal,
    /// Discipline, reliability, and follow-through.
    #[ts(as = "String")]
    pub conscientiousness: Decimal,
    /// Orientation toward social engagement.
    #[ts(as = "String")]
    pub extraversion: Decimal,
    /// Warmth and willingness to cooperate.
    #[ts(as = "String")]
    pub agreeableness: Decimal,
    /// Emotional volatility and sensitivity to negative signals.
    #[ts(as = "String")]
    pub neuroticism: Decimal,
}

impl Personality {
    /// Create a personality vector, clamping every trait to 0.0--1.0.
    pub fn new(
        openness: Decimal,
        conscientiousness: Decimal,
        extraversion: Decimal,
        agreeableness: Decimal,
        neuroticism: Decimal,
    ) -> Self {
        Self {
            openness: clamp_unit(openness),
            conscientiousness: clamp_unit(conscientiousness),
            extraversion: clamp_unit(extraversion),
            agreeableness: clamp_unit(agreeableness),
            neuroticism: clamp_unit(neuroticism),
        }
    }

    /// A personality with every trait at the 0.5 midpoint.
    pub fn balanced() -> Self {
        let mid = Decimal::new(5, 1);
        Self {
            openness: mid,
            conscientiousness: mid,
            extraversion: mid,
            agreeableness: mid,
            neuroticism: mid,
        }
    }

    /// Look up a trait by its lowercase name.
    ///
    /// Returns `None` for unknown names. Exists for callers that address
    /// traits dynamically (stored profiles, scripted scenarios).
    pub fn trait_value(&self, name: &str) -> Option<Decimal> {
        match name {
            "openness" => Some(self.openness),
            "conscientiousness" => Some(self.conscientiousness),
            "extraversion" => Some(self.extraversion),
            "agreeableness" => Some(self.agreeableness),
            "neuroticism" => Some(self.neuroticism),
            _ => None,
        }
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::balanced()
    }
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// Rolling context written back to a character after each interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CharacterContext {
    /// The character's emotional state after their most recent interaction.
    pub last_emotional_state: Option<EmotionalState>,
    /// When the character last participated in an interaction.
    pub last_interaction_at: Option<DateTime<Utc>>,
}

/// A simulated character participating in social interactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,
    /// Display name, used in generated replies and messages.
    pub name: String,
    /// The ecosystem this character belongs to. Interactions never cross
    /// ecosystem boundaries.
    pub ecosystem_id: EcosystemId,
    /// Immutable personality vector.
    pub personality: Personality,
    /// Remaining social energy in the 0.0--1.0 range. Depleted by
    /// interacting; this engine never regenerates it.
    #[ts(as = "String")]
    pub social_energy: Decimal,
    /// Inactive characters cannot initiate or receive interactions.
    pub is_active: bool,
    /// Rolling interaction context.
    pub context: CharacterContext,
    /// When the character was created.
    pub created_at: DateTime<Utc>,
}

impl Character {
    /// Create an active character with full social energy and empty context.
    pub fn fresh(name: String, ecosystem_id: EcosystemId, personality: Personality) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            ecosystem_id,
            personality,
            social_energy: Decimal::ONE,
            is_active: true,
            context: CharacterContext::default(),
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

/// Persistent relationship state between one unordered pair of characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Relationship {
    /// Canonical pair key (lower character ID first).
    pub pair: PairKey,
    /// Signed affinity in the -1.0--1.0 range. Positive is warm, negative
    /// is hostile.
    #[ts(as = "String")]
    pub strength: Decimal,
    /// Trust in the 0.0--1.0 range. Easy to lose, slow to rebuild.
    #[ts(as = "String")]
    pub trust: Decimal,
    /// Familiarity in the 0.0--1.0 range. Never decreases.
    #[ts(as = "String")]
    pub familiarity: Decimal,
    /// Classified standing derived from the scalars above.
    pub standing: RelationshipStanding,
    /// Number of successful interactions recorded for this pair.
    pub interaction_count: u64,
    /// When the relationship record was first created.
    pub created_at: DateTime<Utc>,
    /// When the relationship record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Relationship {
    /// A fresh relationship with default scalars: strength 0.0, trust 0.5,
    /// familiarity 0.0, neutral standing, zero interactions.
    pub fn fresh(pair: PairKey) -> Self {
        let now = Utc::now();
        Self {
            pair,
            strength: Decimal::ZERO,
            trust: Decimal::new(5, 1),
            familiarity: Decimal::ZERO,
            standing: RelationshipStanding::Neutral,
            interaction_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The outcome of applying one interaction to a relationship.
///
/// Deltas are post-clamp differences: if a scalar was already at its bound,
/// the corresponding delta is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RelationshipChange {
    /// Change applied to strength.
    #[ts(as = "String")]
    pub strength_delta: Decimal,
    /// Change applied to trust.
    #[ts(as = "String")]
    pub trust_delta: Decimal,
    /// Change applied to familiarity. Never negative.
    #[ts(as = "String")]
    pub familiarity_delta: Decimal,
    /// Strength after the update.
    #[ts(as = "String")]
    pub new_strength: Decimal,
    /// Trust after the update.
    #[ts(as = "String")]
    pub new_trust: Decimal,
    /// Familiarity after the update.
    #[ts(as = "String")]
    pub new_familiarity: Decimal,
    /// Standing after reclassification.
    pub standing: RelationshipStanding,
    /// Interaction count after the update.
    pub interaction_count: u64,
}

/// One character's view of one of their relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RelationshipSummary {
    /// The other character in the pair.
    pub other: CharacterId,
    /// Current standing.
    pub standing: RelationshipStanding,
    /// Current strength.
    #[ts(as = "String")]
    pub strength: Decimal,
    /// Current trust.
    #[ts(as = "String")]
    pub trust: Decimal,
    /// Current familiarity.
    #[ts(as = "String")]
    pub familiarity: Decimal,
    /// Total successful interactions for the pair.
    pub interaction_count: u64,
}

impl RelationshipSummary {
    /// Summarize a relationship from one member's perspective.
    ///
    /// Returns `None` if `viewer` is not a member of the pair.
    pub fn for_character(relationship: &Relationship, viewer: CharacterId) -> Option<Self> {
        let other = relationship.pair.other(viewer)?;
        Some(Self {
            other,
            standing: relationship.standing,
            strength: relationship.strength,
            trust: relationship.trust,
            familiarity: relationship.familiarity,
            interaction_count: relationship.interaction_count,
        })
    }
}

// ---------------------------------------------------------------------------
// Personality-model reports
// ---------------------------------------------------------------------------

/// Pairwise compatibility scores, each in the 0.0--1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CompatibilityReport {
    /// Composite of the three component scores.
    pub overall: f64,
    /// Alignment of curiosity and interests (driven by openness).
    pub intellectual: f64,
    /// Day-to-day ease of getting along (driven by agreeableness).
    pub harmony: f64,
    /// Emotional steadiness of the pairing (inverse of shared neuroticism).
    pub stability: f64,
}

/// Predicted shape of an interaction before it happens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteractionForecast {
    /// Expected sentiment of the exchange, in the -1.0--1.0 range.
    pub likely_sentiment: f64,
    /// Probability the exchange turns hostile, in the 0.0--1.0 range.
    pub conflict_probability: f64,
    /// Probability the exchange strengthens the bond, in the 0.0--1.0 range.
    pub bonding_probability: f64,
    /// Expected social-energy cost for the initiator.
    pub energy_drain: f64,
}

/// One discoverable row of the interaction catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteractionProfile {
    /// The interaction kind this row describes.
    pub kind: InteractionKind,
    /// Short human-readable description.
    pub description: String,
    /// Base social-energy cost charged to the initiator.
    #[ts(as = "String")]
    pub base_energy_cost: Decimal,
    /// How strongly sentiment scales the relationship-strength delta.
    #[ts(as = "String")]
    pub sentiment_factor: Decimal,
    /// Fixed strength shift applied regardless of sentiment.
    #[ts(as = "String")]
    pub strength_bias: Decimal,
    /// Multiplier on trust loss for negative sentiment.
    #[ts(as = "String")]
    pub trust_weight: Decimal,
    /// Multiplier on familiarity gain.
    #[ts(as = "String")]
    pub familiarity_weight: Decimal,
}

// ---------------------------------------------------------------------------
// Interaction request / result
// ---------------------------------------------------------------------------

/// A request for one character to interact with another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteractionRequest {
    /// The character initiating the interaction. Pays the full energy cost.
    pub initiator: CharacterId,
    /// The character being engaged.
    pub target: CharacterId,
    /// What kind of interaction this is.
    pub kind: InteractionKind,
    /// What the initiator says or does.
    pub content: String,
    /// Caller-supplied context, carried through to the persisted messages.
    #[serde(default)]
    pub context: BTreeMap<String, serde_json::Value>,
}

impl InteractionRequest {
    /// Build a request with empty caller context.
    pub fn new(
        initiator: CharacterId,
        target: CharacterId,
        kind: InteractionKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            initiator,
            target,
            kind,
            content: content.into(),
            context: BTreeMap::new(),
        }
    }
}

/// Metadata describing a completed interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteractionMetadata {
    /// The kind of interaction that ran.
    pub interaction_type: InteractionKind,
    /// When the interaction completed.
    pub timestamp: DateTime<Utc>,
    /// The sentiment the content analysis produced.
    #[ts(as = "String")]
    pub sentiment: Decimal,
}

/// The outcome of an interaction request.
///
/// Validation rejections and internal faults both come back as
/// `success == false` with a populated `reason`; the engine never surfaces
/// an error to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteractionResult {
    /// Whether the interaction executed.
    pub success: bool,
    /// Why the interaction did not execute. `None` on success.
    pub reason: Option<String>,
    /// The responder's generated reply. Empty when the interaction failed.
    pub response: String,
    /// The responder's emotional state after the exchange.
    pub emotional_state: EmotionalState,
    /// How the relationship moved. `None` when the interaction failed.
    pub relationship_change: Option<RelationshipChange>,
    /// Interaction metadata. `None` when the interaction failed.
    pub metadata: Option<InteractionMetadata>,
}

impl InteractionResult {
    /// A failed result for a validation rejection.
    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            success: false,
            reason: Some(String::from(reason.message())),
            response: String::new(),
            emotional_state: EmotionalState::new(),
            relationship_change: None,
            metadata: None,
        }
    }

    /// A failed result for an internal fault. Internal detail goes to the
    /// logs, not to the caller.
    pub fn internal_failure() -> Self {
        Self {
            success: false,
            reason: Some(String::from("interaction could not be completed")),
            response: String::new(),
            emotional_state: EmotionalState::new(),
            relationship_change: None,
            metadata: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// A persisted conversation message.
///
/// Every successful interaction appends two: the initiator's content and the
/// generated response, both tied to the pair's conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// The conversation this message belongs to (the pair's canonical key).
    pub pair: PairKey,
    /// Who sent it.
    pub sender_id: CharacterId,
    /// Sender display name at the time of sending.
    pub sender_name: String,
    /// What kind of sender produced this message.
    pub sender_kind: SenderKind,
    /// The message text.
    pub content: String,
    /// The sender's emotional state at the time of sending, when known.
    pub emotional_state: Option<EmotionalState>,
    /// The interaction kind that produced this message.
    pub interaction_type: InteractionKind,
    /// Caller-supplied context carried over from the request.
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Ecosystem events
// ---------------------------------------------------------------------------

/// Payload detail for a [`EventType::CharacterInteraction`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CharacterInteractionDetails {
    /// The kind of interaction that ran.
    pub interaction_type: InteractionKind,
    /// Initiator first, target second.
    pub participants: [CharacterId; 2],
    /// Sentiment of the exchange.
    #[ts(as = "String")]
    pub sentiment: Decimal,
    /// The initiator's dominant emotion after the exchange.
    pub initiator_emotion: Emotion,
    /// The responder's dominant emotion after the exchange.
    pub target_emotion: Emotion,
    /// The pair's standing after the update.
    pub standing: RelationshipStanding,
}

/// Payload detail for a [`EventType::RelationshipMilestone`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RelationshipMilestoneDetails {
    /// Initiator first, target second.
    pub participants: [CharacterId; 2],
    /// The standing before this interaction.
    pub previous: RelationshipStanding,
    /// The standing after this interaction.
    pub current: RelationshipStanding,
    /// Interactions recorded for the pair so far.
    pub interaction_count: u64,
}

/// An event published on an ecosystem channel.
///
/// Serializes with a `type` discriminator so channel consumers can dispatch
/// without knowing every payload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EcosystemEvent {
    /// Unique event identifier.
    pub id: EventId,
    /// Event discriminator.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Structured payload; shape depends on `event_type`.
    pub data: serde_json::Value,
    /// When the event was created.
    pub timestamp: DateTime<Utc>,
}
