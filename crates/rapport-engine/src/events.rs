//! Ecosystem event construction.
//!
//! Every ecosystem broadcasts interaction outcomes on its own channel,
//! `ecosystem:{id}:events`. Events carry a typed payload serialized into the
//! `data` field so subscribers can dispatch on `type` without knowing every
//! payload shape.

use chrono::{DateTime, Utc};

use rapport_types::{
    CharacterInteractionDetails, EcosystemEvent, EcosystemId, EventId, EventType,
    RelationshipMilestoneDetails,
};

/// Pub/sub channel carrying events for one ecosystem.
pub fn ecosystem_channel(ecosystem_id: EcosystemId) -> String {
    format!("ecosystem:{ecosystem_id}:events")
}

/// Build a `character_interaction` event from a completed interaction.
///
/// # Errors
///
/// Returns an error if the details cannot be serialized.
pub fn character_interaction(
    details: &CharacterInteractionDetails,
    timestamp: DateTime<Utc>,
) -> Result<EcosystemEvent, serde_json::Error> {
    Ok(EcosystemEvent {
        id: EventId::new(),
        event_type: EventType::CharacterInteraction,
        data: serde_json::to_value(details)?,
        timestamp,
    })
}

/// Build a `relationship_milestone` event for a standing transition.
///
/// # Errors
///
/// Returns an error if the details cannot be serialized.
pub fn relationship_milestone(
    details: &RelationshipMilestoneDetails,
    timestamp: DateTime<Utc>,
) -> Result<EcosystemEvent, serde_json::Error> {
    Ok(EcosystemEvent {
        id: EventId::new(),
        event_type: EventType::RelationshipMilestone,
        data: serde_json::to_value(details)?,
        timestamp,
    })
}
