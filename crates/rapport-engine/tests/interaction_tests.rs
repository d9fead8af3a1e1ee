//! End-to-end tests for the interaction pipeline.
//!
//! Tests drive [`InteractionEngine`] against in-memory collaborator fakes,
//! so every scenario runs without a live Redis instance: validation
//! rejections, the happy path, write-set atomicity, fail-closed behavior,
//! event publishing, and per-pair serialization.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing
)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use rapport_engine::{EngineError, EventBus, InteractionEngine, Persistence, StoreError};
use rapport_social::SocialConfig;
use rapport_types::{
    Character, CharacterId, EcosystemEvent, EventType, InteractionKind, InteractionRequest,
    Message, PairKey, Personality, Relationship, RelationshipStanding,
};

// =============================================================================
// Collaborator fakes
// =============================================================================

/// In-memory [`Persistence`] backed by maps behind std mutexes. Lock guards
/// are never held across an await, so the async methods stay `Send`.
#[derive(Clone, Default)]
struct MemoryStore {
    characters: Arc<Mutex<BTreeMap<CharacterId, Character>>>,
    relationships: Arc<Mutex<BTreeMap<PairKey, Relationship>>>,
    messages: Arc<Mutex<Vec<Message>>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryStore {
    fn insert_character(&self, character: &Character) {
        self.characters
            .lock()
            .unwrap()
            .insert(character.id, character.clone());
    }

    fn character(&self, id: CharacterId) -> Character {
        self.characters
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .expect("character should be stored")
    }

    fn relationship(&self, pair: PairKey) -> Option<Relationship> {
        self.relationships.lock().unwrap().get(&pair).cloned()
    }

    fn relationship_count(&self) -> usize {
        self.relationships.lock().unwrap().len()
    }

    fn stored_messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }

    fn break_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }

    fn saves_broken(&self) -> bool {
        self.fail_saves.load(Ordering::SeqCst)
    }
}

impl Persistence for MemoryStore {
    async fn load_character(&self, id: CharacterId) -> Result<Character, StoreError> {
        self.characters
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "character".to_owned(),
            })
    }

    async fn load_relationship(&self, pair: PairKey) -> Result<Relationship, StoreError> {
        self.relationships
            .lock()
            .unwrap()
            .get(&pair)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "relationship".to_owned(),
            })
    }

    async fn persist_interaction(
        &self,
        relationship: &Relationship,
        initiator: &Character,
        target: &Character,
        messages: &[Message; 2],
    ) -> Result<(), StoreError> {
        if self.saves_broken() {
            return Err(StoreError::Backend {
                message: "interaction write refused".to_owned(),
            });
        }
        // Mirrors the transactional store: the whole set lands in one step.
        self.relationships
            .lock()
            .unwrap()
            .insert(relationship.pair, relationship.clone());
        {
            let mut characters = self.characters.lock().unwrap();
            characters.insert(initiator.id, initiator.clone());
            characters.insert(target.id, target.clone());
        }
        self.messages
            .lock()
            .unwrap()
            .extend(messages.iter().cloned());
        Ok(())
    }

    async fn conversation(&self, pair: PairKey) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|message| message.pair == pair)
            .cloned()
            .collect())
    }

    async fn relationships_for(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<Relationship>, StoreError> {
        Ok(self
            .relationships
            .lock()
            .unwrap()
            .values()
            .filter(|relationship| relationship.pair.contains(character_id))
            .cloned()
            .collect())
    }
}

/// [`EventBus`] fake that records publishes synchronously, so assertions can
/// run immediately after `process_interaction` returns.
#[derive(Clone, Default)]
struct RecordingBus {
    events: Arc<Mutex<Vec<(String, EcosystemEvent)>>>,
}

impl RecordingBus {
    fn published(&self) -> Vec<(String, EcosystemEvent)> {
        self.events.lock().unwrap().clone()
    }
}

impl EventBus for RecordingBus {
    fn publish(&self, channel: &str, event: &EcosystemEvent) {
        self.events
            .lock()
            .unwrap()
            .push((channel.to_owned(), event.clone()));
    }
}

// =============================================================================
// Builders
// =============================================================================

type TestEngine = InteractionEngine<MemoryStore, RecordingBus>;

fn test_engine(store: &MemoryStore, bus: &RecordingBus) -> TestEngine {
    InteractionEngine::new(store.clone(), bus.clone(), SocialConfig::default())
}

/// Two balanced characters in the same ecosystem, already stored.
fn seeded_pair() -> (MemoryStore, RecordingBus, Character, Character) {
    let store = MemoryStore::default();
    let bus = RecordingBus::default();
    let ecosystem = rapport_types::EcosystemId::new();
    let alice = Character::fresh("Alice".to_owned(), ecosystem, Personality::balanced());
    let bob = Character::fresh("Bob".to_owned(), ecosystem, Personality::balanced());
    store.insert_character(&alice);
    store.insert_character(&bob);
    (store, bus, alice, bob)
}

fn friendly_chat(initiator: &Character, target: &Character) -> InteractionRequest {
    InteractionRequest::new(
        initiator.id,
        target.id,
        InteractionKind::Chat,
        "What a wonderful day, so glad to see you!",
    )
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn successful_chat_updates_everything() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);

    let mut request = friendly_chat(&alice, &bob);
    request
        .context
        .insert("scene".to_owned(), serde_json::json!("market"));
    let result = engine.process_interaction(request).await;

    assert!(result.success, "unexpected failure: {:?}", result.reason);
    assert_eq!(result.reason, None);
    assert!(!result.response.is_empty());
    assert!(!result.response.contains("{name}"), "placeholder left in reply");

    // The responder's emotional state is a distribution.
    let total: f64 = result.emotional_state.values().sum();
    assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");

    let change = result.relationship_change.expect("change should be present");
    assert_eq!(change.interaction_count, 1);
    assert!(change.strength_delta > Decimal::ZERO);
    assert!(change.familiarity_delta > Decimal::ZERO);

    let metadata = result.metadata.expect("metadata should be present");
    assert_eq!(metadata.interaction_type, InteractionKind::Chat);
    assert!(metadata.sentiment > Decimal::ZERO);

    // Both characters paid energy; the initiator paid more.
    let alice_after = store.character(alice.id);
    let bob_after = store.character(bob.id);
    assert!(alice_after.social_energy < Decimal::ONE);
    assert!(bob_after.social_energy < Decimal::ONE);
    assert!(alice_after.social_energy < bob_after.social_energy);
    assert!(alice_after.context.last_interaction_at.is_some());
    assert!(bob_after.context.last_emotional_state.is_some());

    // Both sides of the exchange were persisted, caller context included.
    let messages = store.stored_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender_id, alice.id);
    assert_eq!(
        messages[0].metadata.get("scene"),
        Some(&serde_json::json!("market"))
    );
    assert_eq!(messages[1].sender_id, bob.id);
    assert!(messages[1].metadata.is_empty());

    // One event, on the ecosystem's channel, tagged for dispatch.
    let published = bus.published();
    assert_eq!(published.len(), 1);
    let (channel, event) = &published[0];
    assert_eq!(*channel, format!("ecosystem:{}:events", alice.ecosystem_id));
    assert_eq!(event.event_type, EventType::CharacterInteraction);
    let participants = event.data.get("participants").expect("participants");
    assert_eq!(
        participants,
        &serde_json::json!([alice.id, bob.id])
    );
}

#[tokio::test]
async fn repeated_chats_accumulate_history() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);

    for _ in 0..3 {
        let result = engine.process_interaction(friendly_chat(&alice, &bob)).await;
        assert!(result.success);
    }

    let relationship = store
        .relationship(PairKey::new(alice.id, bob.id))
        .expect("relationship should exist");
    assert_eq!(relationship.interaction_count, 3);
    assert!(relationship.strength > Decimal::ZERO);
    assert!(relationship.familiarity > Decimal::ZERO);
    assert_eq!(store.stored_messages().len(), 6);
}

#[tokio::test]
async fn reversed_initiator_shares_the_relationship() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);

    let forward = engine.process_interaction(friendly_chat(&alice, &bob)).await;
    let backward = engine.process_interaction(friendly_chat(&bob, &alice)).await;
    assert!(forward.success && backward.success);

    assert_eq!(store.relationship_count(), 1);
    let relationship = store
        .relationship(PairKey::new(bob.id, alice.id))
        .expect("relationship should exist");
    assert_eq!(relationship.interaction_count, 2);
}

#[tokio::test]
async fn hostile_conflict_pushes_strength_negative() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);

    let request = InteractionRequest::new(
        alice.id,
        bob.id,
        InteractionKind::Conflict,
        "I hate this. You are awful and everything you did is wrong!",
    );
    let result = engine.process_interaction(request).await;

    assert!(result.success);
    let change = result.relationship_change.expect("change should be present");
    assert!(change.strength_delta < Decimal::ZERO);
    assert!(change.new_strength < Decimal::ZERO);
    assert!(change.trust_delta < Decimal::ZERO);
}

#[tokio::test]
async fn initiator_at_the_floor_still_pays_more_than_the_responder() {
    let (store, bus, mut alice, bob) = seeded_pair();
    alice.social_energy = SocialConfig::default().energy_floor;
    store.insert_character(&alice);
    let engine = test_engine(&store, &bus);

    // Conflict costs more than the floor balance, so the debit is clipped
    // at zero and the responder's share shrinks with it.
    let request = InteractionRequest::new(
        alice.id,
        bob.id,
        InteractionKind::Conflict,
        "I hate this. You are awful and everything you did is wrong!",
    );
    let result = engine.process_interaction(request).await;
    assert!(result.success, "unexpected failure: {:?}", result.reason);

    let alice_after = store.character(alice.id);
    let bob_after = store.character(bob.id);
    assert_eq!(alice_after.social_energy, Decimal::ZERO);

    let initiator_drop = alice.social_energy.saturating_sub(alice_after.social_energy);
    let responder_drop = Decimal::ONE.saturating_sub(bob_after.social_energy);
    assert!(
        initiator_drop > responder_drop,
        "initiator drop {initiator_drop} must exceed responder drop {responder_drop}"
    );
}

#[tokio::test]
async fn standing_milestones_publish_their_own_event() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);

    // Three warm exchanges lift a fresh pair to acquaintance.
    for _ in 0..3 {
        let result = engine.process_interaction(friendly_chat(&alice, &bob)).await;
        assert!(result.success);
    }

    let relationship = store
        .relationship(PairKey::new(alice.id, bob.id))
        .expect("relationship should exist");
    assert_eq!(relationship.standing, RelationshipStanding::Acquaintance);

    let published = bus.published();
    // Three interaction events plus exactly one milestone.
    assert_eq!(published.len(), 4);
    let milestones: Vec<_> = published
        .iter()
        .filter(|(_, event)| event.event_type == EventType::RelationshipMilestone)
        .collect();
    assert_eq!(milestones.len(), 1);
    let (_, milestone) = milestones[0];
    assert_eq!(
        milestone.data.get("current").and_then(serde_json::Value::as_str),
        Some("acquaintance")
    );
    assert_eq!(
        milestone.data.get("previous").and_then(serde_json::Value::as_str),
        Some("neutral")
    );
}

// =============================================================================
// Validation rejections
// =============================================================================

#[tokio::test]
async fn unknown_initiator_is_rejected() {
    let (store, bus, _, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);

    let ghost = CharacterId::new();
    let request = InteractionRequest::new(ghost, bob.id, InteractionKind::Chat, "Hello!");
    let result = engine.process_interaction(request).await;

    assert!(!result.success);
    let reason = result.reason.expect("reason should be present");
    assert!(reason.contains("not found"), "reason was {reason:?}");
}

#[tokio::test]
async fn unknown_target_is_rejected() {
    let (store, bus, alice, _) = seeded_pair();
    let engine = test_engine(&store, &bus);

    let ghost = CharacterId::new();
    let request = InteractionRequest::new(alice.id, ghost, InteractionKind::Chat, "Hello!");
    let result = engine.process_interaction(request).await;

    assert!(!result.success);
    let reason = result.reason.expect("reason should be present");
    assert!(reason.contains("not found"), "reason was {reason:?}");
}

#[tokio::test]
async fn characters_cannot_interact_with_themselves() {
    let (store, bus, alice, _) = seeded_pair();
    let engine = test_engine(&store, &bus);

    let request = InteractionRequest::new(alice.id, alice.id, InteractionKind::Chat, "Hi me!");
    let result = engine.process_interaction(request).await;

    assert!(!result.success);
    let reason = result.reason.expect("reason should be present");
    assert!(reason.contains("itself"), "reason was {reason:?}");
    assert!(store.stored_messages().is_empty());
}

#[tokio::test]
async fn cross_ecosystem_interaction_is_rejected() {
    let store = MemoryStore::default();
    let bus = RecordingBus::default();
    let alice = Character::fresh(
        "Alice".to_owned(),
        rapport_types::EcosystemId::new(),
        Personality::balanced(),
    );
    let bob = Character::fresh(
        "Bob".to_owned(),
        rapport_types::EcosystemId::new(),
        Personality::balanced(),
    );
    store.insert_character(&alice);
    store.insert_character(&bob);
    let engine = test_engine(&store, &bus);

    let result = engine.process_interaction(friendly_chat(&alice, &bob)).await;

    assert!(!result.success);
    let reason = result.reason.expect("reason should be present");
    assert!(reason.contains("same ecosystem"), "reason was {reason:?}");
    assert!(bus.published().is_empty());
}

#[tokio::test]
async fn inactive_characters_cannot_be_engaged() {
    let (store, bus, alice, mut bob) = seeded_pair();
    bob.is_active = false;
    store.insert_character(&bob);
    let engine = test_engine(&store, &bus);

    let result = engine.process_interaction(friendly_chat(&alice, &bob)).await;

    assert!(!result.success);
    let reason = result.reason.expect("reason should be present");
    assert!(reason.contains("inactive"), "reason was {reason:?}");
}

#[tokio::test]
async fn exhausted_initiator_is_rejected_without_side_effects() {
    let (store, bus, mut alice, bob) = seeded_pair();
    alice.social_energy = Decimal::new(5, 2);
    store.insert_character(&alice);
    let engine = test_engine(&store, &bus);

    let result = engine.process_interaction(friendly_chat(&alice, &bob)).await;

    assert!(!result.success);
    let reason = result.reason.expect("reason should be present");
    assert!(reason.contains("exhausted"), "reason was {reason:?}");

    // Rejections leave no trace: no writes, no events.
    assert!(store.stored_messages().is_empty());
    assert!(store.relationship(PairKey::new(alice.id, bob.id)).is_none());
    assert!(bus.published().is_empty());
    assert_eq!(store.character(alice.id).social_energy, Decimal::new(5, 2));
}

// =============================================================================
// Fail-closed behavior
// =============================================================================

#[tokio::test]
async fn store_failure_fails_closed() {
    let (store, bus, alice, bob) = seeded_pair();
    store.break_saves();
    let engine = test_engine(&store, &bus);

    let result = engine.process_interaction(friendly_chat(&alice, &bob)).await;

    assert!(!result.success);
    assert_eq!(
        result.reason.as_deref(),
        Some("interaction could not be completed")
    );
    assert!(result.response.is_empty());
    assert!(result.relationship_change.is_none());

    // The refused write set aborts the pipeline before any event goes out.
    assert!(store.stored_messages().is_empty());
    assert!(bus.published().is_empty());
}

#[tokio::test]
async fn a_refused_write_set_leaves_no_partial_state() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);

    // Establish one interaction, then refuse the next write set.
    let result = engine.process_interaction(friendly_chat(&alice, &bob)).await;
    assert!(result.success);
    let before = store
        .relationship(PairKey::new(alice.id, bob.id))
        .expect("relationship should exist");
    let alice_before = store.character(alice.id);
    let bob_before = store.character(bob.id);

    store.break_saves();
    let refused = engine.process_interaction(friendly_chat(&alice, &bob)).await;
    assert!(!refused.success);

    // The ledger, both balances and the log read exactly as they did
    // before the refused attempt: nothing landed halfway.
    let after = store
        .relationship(PairKey::new(alice.id, bob.id))
        .expect("relationship should exist");
    assert_eq!(after.interaction_count, before.interaction_count);
    assert_eq!(after.strength, before.strength);
    assert_eq!(after.trust, before.trust);
    assert_eq!(after.familiarity, before.familiarity);
    assert_eq!(
        store.character(alice.id).social_energy,
        alice_before.social_energy
    );
    assert_eq!(
        store.character(bob.id).social_energy,
        bob_before.social_energy
    );
    assert_eq!(store.stored_messages().len(), 2);
    assert_eq!(bus.published().len(), 1);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_interactions_on_one_pair_serialize() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = Arc::new(test_engine(&store, &bus));

    let mut handles = Vec::new();
    for _ in 0..2 {
        let engine = Arc::clone(&engine);
        let request = friendly_chat(&alice, &bob);
        handles.push(tokio::spawn(
            async move { engine.process_interaction(request).await },
        ));
    }
    for handle in handles {
        let result = handle.await.expect("task should not panic");
        assert!(result.success);
    }

    // Both ledger updates landed; neither overwrote the other.
    let relationship = store
        .relationship(PairKey::new(alice.id, bob.id))
        .expect("relationship should exist");
    assert_eq!(relationship.interaction_count, 2);
    assert_eq!(store.stored_messages().len(), 4);

    // Both energy debits landed too. A sequential run of the same two
    // requests gives the reference balances; the serialized concurrent
    // run must land on the same ones.
    let (seq_store, seq_bus, seq_alice, seq_bob) = seeded_pair();
    let seq_engine = test_engine(&seq_store, &seq_bus);
    for _ in 0..2 {
        let result = seq_engine
            .process_interaction(friendly_chat(&seq_alice, &seq_bob))
            .await;
        assert!(result.success);
    }
    assert_eq!(
        store.character(alice.id).social_energy,
        seq_store.character(seq_alice.id).social_energy
    );
    assert_eq!(
        store.character(bob.id).social_energy,
        seq_store.character(seq_bob.id).social_energy
    );
}

// =============================================================================
// Read-side queries
// =============================================================================

#[tokio::test]
async fn relationship_summaries_take_the_viewers_side() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);
    let result = engine.process_interaction(friendly_chat(&alice, &bob)).await;
    assert!(result.success);

    let summaries = engine
        .relationships_for(alice.id)
        .await
        .expect("summaries should load");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].other, bob.id);
    assert_eq!(summaries[0].interaction_count, 1);

    let from_bob = engine
        .relationships_for(bob.id)
        .await
        .expect("summaries should load");
    assert_eq!(from_bob[0].other, alice.id);
}

#[tokio::test]
async fn conversation_query_returns_the_log_in_order() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);
    let result = engine.process_interaction(friendly_chat(&alice, &bob)).await;
    assert!(result.success);

    let log = engine
        .conversation(bob.id, alice.id)
        .await
        .expect("conversation should load");
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].sender_id, alice.id);
    assert_eq!(log[1].sender_id, bob.id);
    assert_eq!(log[1].content, result.response);
}

#[tokio::test]
async fn compatibility_query_reports_stored_characters() {
    let (store, bus, alice, bob) = seeded_pair();
    let engine = test_engine(&store, &bus);

    let report = engine
        .compatibility(alice.id, bob.id)
        .await
        .expect("report should load");
    assert!(report.overall > 0.6, "identical personalities score high");

    let missing = engine.compatibility(alice.id, CharacterId::new()).await;
    assert!(matches!(missing, Err(EngineError::Store { .. })));
}
