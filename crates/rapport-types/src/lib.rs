//! Shared type definitions for the Rapport interaction engine.
//!
//! This crate is the single source of truth for all types used across the
//! Rapport workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for dashboard consumers.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers and the canonical pair key
//! - [`enums`] -- Enumeration types (interaction kinds, emotions, standings, events)
//! - [`structs`] -- Core entity structs (characters, relationships, messages, results)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Emotion, EventType, InteractionKind, RejectionReason, RelationshipStanding, SenderKind,
};
pub use ids::{CharacterId, EcosystemId, EventId, MessageId, PairKey};
pub use structs::{
    Character, CharacterContext, CharacterInteractionDetails, CompatibilityReport, EcosystemEvent,
    EmotionalState, InteractionForecast, InteractionMetadata, InteractionProfile,
    InteractionRequest, InteractionResult, Message, Personality, Relationship, RelationshipChange,
    RelationshipMilestoneDetails, RelationshipSummary,
};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::CharacterId::export_all();
        let _ = crate::ids::EcosystemId::export_all();
        let _ = crate::ids::MessageId::export_all();
        let _ = crate::ids::EventId::export_all();
        let _ = crate::ids::PairKey::export_all();

        // Enums
        let _ = crate::enums::InteractionKind::export_all();
        let _ = crate::enums::Emotion::export_all();
        let _ = crate::enums::RelationshipStanding::export_all();
        let _ = crate::enums::SenderKind::export_all();
        let _ = crate::enums::EventType::export_all();
        let _ = crate::enums::RejectionReason::export_all();

        // Structs
        let _ = crate::structs::Personality::export_all();
        let _ = crate::structs::CharacterContext::export_all();
        let _ = crate::structs::Character::export_all();
        let _ = crate::structs::Relationship::export_all();
        let _ = crate::structs::RelationshipChange::export_all();
        let _ = crate::structs::RelationshipSummary::export_all();
        let _ = crate::structs::CompatibilityReport::export_all();
        let _ = crate::structs::InteractionForecast::export_all();
        let _ = crate::structs::InteractionProfile::export_all();
        let _ = crate::structs::InteractionRequest::export_all();
        let _ = crate::structs::InteractionMetadata::export_all();
        let _ = crate::structs::InteractionResult::export_all();
        let _ = crate::structs::Message::export_all();
        let _ = crate::structs::CharacterInteractionDetails::export_all();
        let _ = crate::structs::RelationshipMilestoneDetails::export_all();
        let _ = crate::structs::EcosystemEvent::export_all();
    }
}
