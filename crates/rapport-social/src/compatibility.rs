//! Pairwise personality compatibility scoring.
//!
//! Produces a [`CompatibilityReport`] from two personalities. Scores are
//! symmetric: swapping the arguments yields the same report.

use rapport_types::{CompatibilityReport, Personality};

use crate::emotion::trait_score;

/// Penalty applied per point of openness gap between the two characters.
const OPENNESS_GAP_PENALTY: f64 = 1.4;

/// Weight of the pair's average agreeableness in the harmony score.
const HARMONY_LEVEL_WEIGHT: f64 = 0.7;

/// Weight of agreeableness similarity in the harmony score.
const HARMONY_SIMILARITY_WEIGHT: f64 = 0.3;

/// Score how well two personalities fit together.
///
/// - `intellectual` rewards similar openness.
/// - `harmony` rewards mutual, similar agreeableness.
/// - `stability` rewards low combined neuroticism.
/// - `overall` is the mean of the three component scores.
pub fn compatibility(left: &Personality, right: &Personality) -> CompatibilityReport {
    let openness_gap = (trait_score(left.openness) - trait_score(right.openness)).abs();
    let intellectual = (1.0 - openness_gap * OPENNESS_GAP_PENALTY).clamp(0.0, 1.0);

    let left_agreeableness = trait_score(left.agreeableness);
    let right_agreeableness = trait_score(right.agreeableness);
    let avg_agreeableness = (left_agreeableness + right_agreeableness) / 2.0;
    let agreeableness_gap = (left_agreeableness - right_agreeableness).abs();
    let harmony = (avg_agreeableness * HARMONY_LEVEL_WEIGHT
        + (1.0 - agreeableness_gap) * HARMONY_SIMILARITY_WEIGHT)
        .clamp(0.0, 1.0);

    let avg_neuroticism =
        (trait_score(left.neuroticism) + trait_score(right.neuroticism)) / 2.0;
    let stability = (1.0 - avg_neuroticism).clamp(0.0, 1.0);

    let overall = (intellectual + harmony + stability) / 3.0;

    CompatibilityReport {
        overall,
        intellectual,
        harmony,
        stability,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
