//! Emotional response modelling.
//!
//! Turns an interaction (kind + sentiment) and a personality into a
//! normalized distribution over discrete emotions. All weights here are
//! `f64`; personality traits are bridged from [`Decimal`] at the boundary.
//!
//! # Invariants
//!
//! - Every produced distribution has non-negative weights summing to 1.0.
//! - An empty distribution is only ever produced for degenerate input and
//!   reads as neutral.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use rapport_types::{Emotion, EmotionalState, InteractionKind, Personality};

use crate::sentiment::clamp_sentiment;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sentiment at or above this still counts as near-neutral for the
/// agreeableness and extraversion joy lift.
const NEAR_NEUTRAL_FLOOR: f64 = -0.1;

/// How strongly neuroticism amplifies negative emotions under negative
/// sentiment. At neuroticism 1.0 the amplifier is 1.4x.
const NEUROTICISM_GAIN: f64 = 0.8;

/// How strongly low agreeableness sharpens anger under negative sentiment.
const HOSTILITY_GAIN: f64 = 0.5;

/// Joy lift per point of agreeableness above the midpoint.
const AGREEABLENESS_JOY_GAIN: f64 = 0.3;

/// Joy lift per point of extraversion above the midpoint.
const EXTRAVERSION_JOY_GAIN: f64 = 0.15;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute a character's emotional response to an interaction.
///
/// Starts from the kind's base mix, shifts it by sentiment, modulates it by
/// personality, floors every weight at zero, and normalizes the result so
/// the weights sum to 1.0.
pub fn emotional_response(
    personality: &Personality,
    kind: InteractionKind,
    sentiment: f64,
) -> EmotionalState {
    let sentiment = clamp_sentiment(sentiment);

    let mut weights: BTreeMap<Emotion, f64> = base_weights(kind).into_iter().collect();
    shift_for_sentiment(&mut weights, sentiment);
    modulate_for_traits(&mut weights, personality, sentiment);

    normalize(weights)
}

/// The strongest emotion in a state, or [`Emotion::Neutral`] for an empty
/// state. Never panics.
pub fn dominant_emotion(state: &EmotionalState) -> Emotion {
    state
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(core::cmp::Ordering::Equal))
        .map_or(Emotion::Neutral, |(emotion, _)| *emotion)
}

/// Normalized distance between two emotional states in the 0.0--1.0 range.
///
/// Euclidean distance over the union of emotion keys (missing keys count as
/// zero), divided by the distance between two disjoint unit states.
pub fn emotional_distance(a: &EmotionalState, b: &EmotionalState) -> f64 {
    let mut keys: BTreeSet<Emotion> = a.keys().copied().collect();
    keys.extend(b.keys().copied());

    let sum_of_squares: f64 = keys
        .iter()
        .map(|emotion| {
            let left = a.get(emotion).copied().unwrap_or(0.0);
            let right = b.get(emotion).copied().unwrap_or(0.0);
            (left - right).powi(2)
        })
        .sum();

    (sum_of_squares.sqrt() / core::f64::consts::SQRT_2).clamp(0.0, 1.0)
}

/// Base emotion mix for each interaction kind, before sentiment and
/// personality adjustments. Each mix sums to 1.0.
pub const fn base_weights(kind: InteractionKind) -> [(Emotion, f64); 5] {
    match kind {
        InteractionKind::Greeting => [
            (Emotion::Joy, 0.5),
            (Emotion::Surprise, 0.2),
            (Emotion::Sadness, 0.1),
            (Emotion::Anger, 0.1),
            (Emotion::Fear, 0.1),
        ],
        InteractionKind::Chat => [
            (Emotion::Joy, 0.4),
            (Emotion::Surprise, 0.2),
            (Emotion::Sadness, 0.15),
            (Emotion::Anger, 0.15),
            (Emotion::Fear, 0.1),
        ],
        InteractionKind::Discussion => [
            (Emotion::Joy, 0.3),
            (Emotion::Surprise, 0.25),
            (Emotion::Anger, 0.2),
            (Emotion::Sadness, 0.15),
            (Emotion::Fear, 0.1),
        ],
        InteractionKind::Collaboration => [
            (Emotion::Joy, 0.45),
            (Emotion::Surprise, 0.2),
            (Emotion::Anger, 0.15),
            (Emotion::Sadness, 0.1),
            (Emotion::Fear, 0.1),
        ],
        InteractionKind::Conflict => [
            (Emotion::Anger, 0.4),
            (Emotion::Sadness, 0.2),
            (Emotion::Fear, 0.2),
            (Emotion::Surprise, 0.1),
            (Emotion::Joy, 0.1),
        ],
        InteractionKind::EmotionalSupport => [
            (Emotion::Joy, 0.3),
            (Emotion::Sadness, 0.3),
            (Emotion::Anger, 0.15),
            (Emotion::Fear, 0.15),
            (Emotion::Surprise, 0.1),
        ],
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn trait_score(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Shift the mix toward joy for positive sentiment, toward the negative
/// emotions for negative sentiment. Magnitudes scale with |sentiment|.
fn shift_for_sentiment(weights: &mut BTreeMap<Emotion, f64>, sentiment: f64) {
    if sentiment >= 0.0 {
        add_weight(weights, Emotion::Joy, sentiment * 0.4);
        add_weight(weights, Emotion::Surprise, sentiment * 0.1);
        add_weight(weights, Emotion::Anger, -sentiment * 0.2);
        add_weight(weights, Emotion::Sadness, -sentiment * 0.2);
        add_weight(weights, Emotion::Fear, -sentiment * 0.1);
    } else {
        let magnitude = sentiment.abs();
        add_weight(weights, Emotion::Anger, magnitude * 0.3);
        add_weight(weights, Emotion::Sadness, magnitude * 0.3);
        add_weight(weights, Emotion::Fear, magnitude * 0.15);
        add_weight(weights, Emotion::Joy, -magnitude * 0.35);
    }
}

fn modulate_for_traits(
    weights: &mut BTreeMap<Emotion, f64>,
    personality: &Personality,
    sentiment: f64,
) {
    let agreeableness = trait_score(personality.agreeableness);
    let extraversion = trait_score(personality.extraversion);
    let neuroticism = trait_score(personality.neuroticism);

    // Warm, outgoing characters read near-neutral and positive exchanges
    // as pleasant.
    if sentiment >= NEAR_NEUTRAL_FLOOR {
        add_weight(weights, Emotion::Joy, (agreeableness - 0.5) * AGREEABLENESS_JOY_GAIN);
        add_weight(weights, Emotion::Joy, (extraversion - 0.5) * EXTRAVERSION_JOY_GAIN);
    }

    if sentiment < 0.0 {
        let amplifier = (1.0 + (neuroticism - 0.5) * NEUROTICISM_GAIN).max(0.0);
        scale_weight(weights, Emotion::Sadness, amplifier);
        scale_weight(weights, Emotion::Anger, amplifier);
        scale_weight(weights, Emotion::Fear, amplifier);

        let hostility = (1.0 + (0.5 - agreeableness) * HOSTILITY_GAIN).max(0.0);
        scale_weight(weights, Emotion::Anger, hostility);
    }
}

/// Add a delta to one weight, flooring the result at zero.
fn add_weight(weights: &mut BTreeMap<Emotion, f64>, emotion: Emotion, delta: f64) {
    let entry = weights.entry(emotion).or_insert(0.0);
    *entry = (*entry + delta).max(0.0);
}

fn scale_weight(weights: &mut BTreeMap<Emotion, f64>, emotion: Emotion, factor: f64) {
    if let Some(entry) = weights.get_mut(&emotion) {
        *entry = (*entry * factor).max(0.0);
    }
}

/// Drop zero weights and rescale the rest to sum to 1.0.
fn normalize(weights: BTreeMap<Emotion, f64>) -> EmotionalState {
    let total: f64 = weights.values().sum();
    if total <= f64::EPSILON {
        return EmotionalState::new();
    }

    weights
        .into_iter()
        .filter(|(_, weight)| *weight > 0.0)
        .map(|(emotion, weight)| (emotion, weight / total))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_sum(state: &EmotionalState) -> f64 {
        state.values().sum()
    }

    fn weight_of(state: &EmotionalState, emotion: Emotion) -> f64 {
        state.get(&emotion).copied().unwrap_or(0.0)
    }

    fn agreeable() -> Personality {
        Personality::new(
            Decimal::new(5, 1),
            Decimal::new(5, 1),
            Decimal::new(6, 1),
            Decimal::new(8, 1),
            Decimal::new(3, 1),
        )
    }

    fn anxious() -> Personality {
        Personality::new(
            Decimal::new(5, 1),
            Decimal::new(5, 1),
            Decimal::new(4, 1),
            Decimal::new(3, 1),
            Decimal::new(9, 1),
        )
    }

    // -----------------------------------------------------------------------
    // Distribution shape
    // -----------------------------------------------------------------------

    #[test]
    fn weights_are_normalized_and_non_negative() {
        let cases = [
            (InteractionKind::Greeting, 0.0),
            (InteractionKind::Chat, 0.7),
            (InteractionKind::Conflict, -0.8),
            (InteractionKind::EmotionalSupport, -0.3),
            (InteractionKind::Collaboration, 1.0),
            (InteractionKind::Discussion, -1.0),
        ];

        for (kind, sentiment) in cases {
            let state = emotional_response(&anxious(), kind, sentiment);
            assert!(
                (weight_sum(&state) - 1.0).abs() < 0.01,
                "weights for {kind} at {sentiment} should sum to 1.0"
            );
            assert!(state.values().all(|w| *w >= 0.0));
        }
    }

    #[test]
    fn base_mixes_sum_to_one() {
        for kind in InteractionKind::ALL {
            let total: f64 = base_weights(kind).iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-9, "base mix for {kind}");
        }
    }

    // -----------------------------------------------------------------------
    // Kind-specific responses
    // -----------------------------------------------------------------------

    #[test]
    fn greeting_brings_joy_to_the_agreeable() {
        let neutral = emotional_response(&agreeable(), InteractionKind::Greeting, 0.0);
        assert!(weight_of(&neutral, Emotion::Joy) > 0.2);

        let warm = emotional_response(&agreeable(), InteractionKind::Greeting, 0.5);
        assert!(weight_of(&warm, Emotion::Joy) > 0.2);
    }

    #[test]
    fn hostile_conflict_reads_hostile() {
        let state = emotional_response(&agreeable(), InteractionKind::Conflict, -0.6);
        let anger = weight_of(&state, Emotion::Anger);
        let sadness = weight_of(&state, Emotion::Sadness);
        assert!(anger > 0.1 || sadness > 0.1);
        assert!(weight_of(&state, Emotion::Joy) < anger);
    }

    #[test]
    fn neuroticism_amplifies_negative_emotions() {
        let steady = emotional_response(&agreeable(), InteractionKind::Chat, -0.5);
        let volatile = emotional_response(&anxious(), InteractionKind::Chat, -0.5);

        let negative_share = |state: &EmotionalState| {
            weight_of(state, Emotion::Sadness)
                + weight_of(state, Emotion::Anger)
                + weight_of(state, Emotion::Fear)
        };

        assert!(negative_share(&volatile) > negative_share(&steady));
    }

    #[test]
    fn positive_sentiment_lifts_joy() {
        let flat = emotional_response(&agreeable(), InteractionKind::Chat, 0.0);
        let bright = emotional_response(&agreeable(), InteractionKind::Chat, 0.8);
        assert!(weight_of(&bright, Emotion::Joy) > weight_of(&flat, Emotion::Joy));
    }

    // -----------------------------------------------------------------------
    // Dominant emotion
    // -----------------------------------------------------------------------

    #[test]
    fn dominant_of_empty_state_is_neutral() {
        let state = EmotionalState::new();
        assert_eq!(dominant_emotion(&state), Emotion::Neutral);
    }

    #[test]
    fn dominant_picks_the_heaviest_weight() {
        let state: EmotionalState = [
            (Emotion::Joy, 0.2),
            (Emotion::Anger, 0.5),
            (Emotion::Fear, 0.3),
        ]
        .into_iter()
        .collect();
        assert_eq!(dominant_emotion(&state), Emotion::Anger);
    }

    // -----------------------------------------------------------------------
    // Emotional distance
    // -----------------------------------------------------------------------

    #[test]
    fn identical_states_have_near_zero_distance() {
        let state = emotional_response(&agreeable(), InteractionKind::Chat, 0.4);
        assert!(emotional_distance(&state, &state) < 1e-9);
    }

    #[test]
    fn opposite_states_are_far_apart() {
        let all_joy: EmotionalState = [(Emotion::Joy, 1.0)].into_iter().collect();
        let all_anger: EmotionalState = [(Emotion::Anger, 1.0)].into_iter().collect();
        let distance = emotional_distance(&all_joy, &all_anger);
        assert!(distance > 0.5);
        assert!(distance <= 1.0);
    }

    #[test]
    fn distance_handles_disjoint_keys() {
        let a: EmotionalState = [(Emotion::Joy, 0.5), (Emotion::Surprise, 0.5)]
            .into_iter()
            .collect();
        let b: EmotionalState = [(Emotion::Fear, 1.0)].into_iter().collect();
        let distance = emotional_distance(&a, &b);
        assert!(distance > 0.0);
        assert!(distance <= 1.0);
    }
}
