//! Personality-driven descriptions and interaction forecasts.
//!
//! Traits are stored as [`Decimal`] scores in the 0.0--1.0 range and bridged
//! to `f64` for forecast arithmetic. Forecasts are advisory only and never
//! mutate character state.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use rapport_types::{InteractionForecast, InteractionKind, Personality};

use crate::catalog::base_energy_cost;
use crate::emotion::trait_score;
use crate::sentiment::clamp_sentiment;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How strongly shared agreeableness pulls the expected sentiment upward.
const SENTIMENT_AGREEABLENESS_GAIN: f64 = 1.2;

/// How strongly shared neuroticism drags the expected sentiment down.
const SENTIMENT_NEUROTICISM_DRAG: f64 = 0.6;

/// Agreeableness contribution to the bonding probability.
const BONDING_AGREEABLENESS_GAIN: f64 = 0.8;

/// Neuroticism drag on the bonding probability.
const BONDING_NEUROTICISM_DRAG: f64 = 0.4;

/// How much a likely conflict inflates the forecast energy drain.
const CONFLICT_DRAIN_GAIN: f64 = 0.5;

/// A trait at or above this threshold earns its "high" descriptor.
fn high_trait() -> Decimal {
    Decimal::new(8, 1)
}

/// A trait at or below this threshold earns its "low" descriptor.
fn low_trait() -> Decimal {
    Decimal::new(2, 1)
}

// ---------------------------------------------------------------------------
// Descriptions
// ---------------------------------------------------------------------------

/// Render a personality as a short human-readable phrase.
///
/// Each trait outside the 0.2--0.8 band contributes one descriptor, in trait
/// order. A personality with every trait inside the band reads as balanced.
pub fn describe_personality(personality: &Personality) -> String {
    let high = high_trait();
    let low = low_trait();

    let bands: [(Decimal, &str, &str); 5] = [
        (personality.openness, "creative", "conventional"),
        (personality.conscientiousness, "disciplined", "spontaneous"),
        (personality.extraversion, "outgoing", "reserved"),
        (personality.agreeableness, "warm", "competitive"),
        (personality.neuroticism, "sensitive", "steady"),
    ];

    let descriptors: Vec<&str> = bands
        .iter()
        .filter_map(|(value, high_word, low_word)| {
            if *value >= high {
                Some(*high_word)
            } else if *value <= low {
                Some(*low_word)
            } else {
                None
            }
        })
        .collect();

    join_descriptors(&descriptors)
}

/// Join descriptors into a phrase, with "and" before the final one.
fn join_descriptors(descriptors: &[&str]) -> String {
    match descriptors {
        [] => String::from("balanced and even-tempered"),
        [only] => String::from(*only),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}

// ---------------------------------------------------------------------------
// Forecasting
// ---------------------------------------------------------------------------

/// Predict how an interaction between two personalities is likely to land.
///
/// Blends the midpoint of both characters' agreeableness and neuroticism
/// with a per-kind bias. All outputs are clamped to their documented ranges.
pub fn interaction_forecast(
    left: &Personality,
    right: &Personality,
    kind: InteractionKind,
) -> InteractionForecast {
    let avg_agreeableness = midpoint(left.agreeableness, right.agreeableness);
    let avg_neuroticism = midpoint(left.neuroticism, right.neuroticism);

    let likely_sentiment = clamp_sentiment(
        (avg_agreeableness - 0.5) * SENTIMENT_AGREEABLENESS_GAIN
            - (avg_neuroticism - 0.5) * SENTIMENT_NEUROTICISM_DRAG
            + sentiment_bias(kind),
    );

    let conflict_probability = (0.5 - (avg_agreeableness - 0.5) + (avg_neuroticism - 0.5)
        + conflict_bias(kind))
    .clamp(0.0, 1.0);

    let bonding_probability = (0.5 + (avg_agreeableness - 0.5) * BONDING_AGREEABLENESS_GAIN
        - (avg_neuroticism - 0.5) * BONDING_NEUROTICISM_DRAG
        + bonding_bias(kind))
    .clamp(0.0, 1.0);

    let base_cost = base_energy_cost(kind).to_f64().unwrap_or(0.0);
    let energy_drain = base_cost * (1.0 + conflict_probability * CONFLICT_DRAIN_GAIN);

    InteractionForecast {
        likely_sentiment,
        conflict_probability,
        bonding_probability,
        energy_drain,
    }
}

fn midpoint(left: Decimal, right: Decimal) -> f64 {
    (trait_score(left) + trait_score(right)) / 2.0
}

/// Baseline sentiment skew per interaction kind.
const fn sentiment_bias(kind: InteractionKind) -> f64 {
    match kind {
        InteractionKind::Greeting => 0.05,
        InteractionKind::Chat => 0.0,
        InteractionKind::Discussion => -0.05,
        InteractionKind::Collaboration | InteractionKind::EmotionalSupport => 0.1,
        InteractionKind::Conflict => -0.5,
    }
}

/// Extra conflict likelihood baked into the kind itself.
const fn conflict_bias(kind: InteractionKind) -> f64 {
    match kind {
        InteractionKind::Conflict => 0.25,
        InteractionKind::Discussion => 0.05,
        _ => 0.0,
    }
}

/// Extra bonding likelihood baked into the kind itself.
const fn bonding_bias(kind: InteractionKind) -> f64 {
    match kind {
        InteractionKind::Collaboration | InteractionKind::EmotionalSupport => 0.15,
        InteractionKind::Chat => 0.05,
        InteractionKind::Conflict => -0.3,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
