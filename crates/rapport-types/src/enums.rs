//! Enumeration types for the Rapport interaction engine.
//!
//! Wire names are `snake_case`: stored records, published events, and the
//! `TypeScript` bindings all see `"emotional_support"`, `"character_interaction"`,
//! and so on.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Interaction kinds
// ---------------------------------------------------------------------------

/// A kind of social interaction a character can initiate.
///
/// Each kind carries its own energy cost and relationship multipliers; the
/// catalogue lives with the social model and is discoverable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum InteractionKind {
    /// A brief social acknowledgement. Cheap, mildly warming.
    Greeting,
    /// Casual open-ended conversation.
    Chat,
    /// A focused exchange of views. Costs more energy than a chat.
    Discussion,
    /// Working together toward a shared goal. Strong bonding signal.
    Collaboration,
    /// An adversarial confrontation. Damages trust faster than strength.
    Conflict,
    /// Comforting a character in distress. Builds trust.
    EmotionalSupport,
}

impl InteractionKind {
    /// Every interaction kind, in catalogue order.
    pub const ALL: [Self; 6] = [
        Self::Greeting,
        Self::Chat,
        Self::Discussion,
        Self::Collaboration,
        Self::Conflict,
        Self::EmotionalSupport,
    ];

    /// The `snake_case` wire name for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Chat => "chat",
            Self::Discussion => "discussion",
            Self::Collaboration => "collaboration",
            Self::Conflict => "conflict",
            Self::EmotionalSupport => "emotional_support",
        }
    }
}

impl core::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Emotions
// ---------------------------------------------------------------------------

/// A discrete emotion tracked in a character's emotional state.
///
/// Emotional states are distributions over `Joy`, `Sadness`, `Anger`, `Fear`,
/// and `Surprise`. `Neutral` never appears in a distribution; it is the
/// dominant-emotion answer for an empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Emotion {
    /// Warmth, pleasure, satisfaction.
    Joy,
    /// Loss, disappointment, dejection.
    Sadness,
    /// Hostility, frustration.
    Anger,
    /// Threat response, anxiety.
    Fear,
    /// Reaction to the unexpected, positive or negative.
    Surprise,
    /// Absence of any signal. Only reported, never stored in a distribution.
    Neutral,
}

impl Emotion {
    /// The emotions that participate in a distribution, in canonical order.
    pub const DISTRIBUTION: [Self; 5] = [
        Self::Joy,
        Self::Sadness,
        Self::Anger,
        Self::Fear,
        Self::Surprise,
    ];

    /// The `snake_case` wire name for this emotion.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Neutral => "neutral",
        }
    }
}

impl core::fmt::Display for Emotion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Relationship standing
// ---------------------------------------------------------------------------

/// The classified standing of a relationship, derived from its scalars.
///
/// Classification thresholds live with the relationship ledger. `Neutral` is
/// the starting standing for every fresh pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RelationshipStanding {
    /// No meaningful history yet.
    #[default]
    Neutral,
    /// A few interactions with mildly positive affinity.
    Acquaintance,
    /// Sustained positive affinity and decent trust.
    Friend,
    /// High affinity, high trust, long shared history.
    Close,
    /// Persistent negative affinity.
    Rival,
    /// Strong negative affinity.
    Enemy,
}

impl RelationshipStanding {
    /// The `snake_case` wire name for this standing.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Acquaintance => "acquaintance",
            Self::Friend => "friend",
            Self::Close => "close",
            Self::Rival => "rival",
            Self::Enemy => "enemy",
        }
    }
}

impl core::fmt::Display for RelationshipStanding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Message senders
// ---------------------------------------------------------------------------

/// The kind of sender that produced a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SenderKind {
    /// A simulated character.
    Character,
    /// The engine itself (system notices).
    System,
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A type of event published on an ecosystem channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventType {
    /// Two characters completed an interaction.
    CharacterInteraction,
    /// A relationship crossed into a new standing.
    RelationshipMilestone,
}

// ---------------------------------------------------------------------------
// Rejection reasons
// ---------------------------------------------------------------------------

/// The reason an interaction request was rejected before execution.
///
/// Rejections are expected outcomes, not faults: they come back as a
/// failed [`crate::InteractionResult`], never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// The initiating character does not exist.
    InitiatorNotFound,
    /// The target character does not exist.
    TargetNotFound,
    /// A character cannot interact with itself.
    SelfInteraction,
    /// The two characters live in different ecosystems.
    CrossEcosystem,
    /// One of the characters is inactive.
    InactiveCharacter,
    /// The initiator's social energy is below the interaction floor.
    ExhaustedInitiator,
}

impl RejectionReason {
    /// Human-readable rejection message.
    ///
    /// Callers match on stable substrings: `"not found"`, `"same ecosystem"`,
    /// `"inactive"`, `"exhausted"`.
    pub const fn message(self) -> &'static str {
        match self {
            Self::InitiatorNotFound => "initiator character not found",
            Self::TargetNotFound => "target character not found",
            Self::SelfInteraction => "a character cannot interact with itself",
            Self::CrossEcosystem => "characters must belong to the same ecosystem",
            Self::InactiveCharacter => "character is inactive",
            Self::ExhaustedInitiator => "initiator is too exhausted to interact",
        }
    }
}

impl core::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
