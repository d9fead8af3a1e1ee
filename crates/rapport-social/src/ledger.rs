//! Relationship ledger scoring.
//!
//! Applies the effect of one interaction to a [`Relationship`]: strength,
//! trust and familiarity move by kind-weighted deltas, then the standing is
//! reclassified. All score math runs through checked [`Decimal`] operations.
//!
//! # Invariants
//!
//! - Strength stays in the -1.0--1.0 range, trust and familiarity in
//!   0.0--1.0, after every application.
//! - Gains taper as a score approaches its cap; losses taper toward the
//!   floor the same way for strength.
//! - Reported deltas are post-clamp: they always equal new minus old.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use rapport_types::{InteractionKind, Relationship, RelationshipChange, RelationshipStanding};

use crate::catalog::{familiarity_weight, sentiment_factor, strength_bias, trust_weight};
use crate::config::SocialConfig;
use crate::error::SocialError;

// ---------------------------------------------------------------------------
// Score bounds
// ---------------------------------------------------------------------------

/// Upper bound for every ledger score.
const SCORE_MAX: Decimal = Decimal::ONE;

/// Lower bound for strength.
const SCORE_MIN: Decimal = Decimal::NEGATIVE_ONE;

/// Lower bound for trust and familiarity.
const UNIT_MIN: Decimal = Decimal::ZERO;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply one interaction's outcome to a relationship.
///
/// Updates strength, trust, familiarity, interaction count, standing and
/// the `updated_at` stamp in place, and returns a [`RelationshipChange`]
/// describing exactly what moved.
///
/// # Errors
///
/// Returns [`SocialError::ArithmeticOverflow`] if any score computation
/// overflows `Decimal`.
pub fn apply_interaction(
    relationship: &mut Relationship,
    kind: InteractionKind,
    sentiment: Decimal,
    config: &SocialConfig,
    now: DateTime<Utc>,
) -> Result<RelationshipChange, SocialError> {
    let sentiment = clamp_signed(sentiment);

    let previous_strength = relationship.strength;
    let previous_trust = relationship.trust;
    let previous_familiarity = relationship.familiarity;

    let new_strength = clamp_signed(checked_add(
        previous_strength,
        strength_delta(previous_strength, kind, sentiment, config)?,
        "strength update",
    )?);
    let new_trust = clamp_unit(checked_add(
        previous_trust,
        trust_delta(previous_trust, kind, sentiment, config)?,
        "trust update",
    )?);
    let new_familiarity = clamp_unit(checked_add(
        previous_familiarity,
        familiarity_delta(previous_familiarity, kind, config)?,
        "familiarity update",
    )?);

    let interaction_count = relationship.interaction_count.saturating_add(1);
    let standing = classify_standing(new_strength, new_trust, interaction_count, config);

    relationship.strength = new_strength;
    relationship.trust = new_trust;
    relationship.familiarity = new_familiarity;
    relationship.standing = standing;
    relationship.interaction_count = interaction_count;
    relationship.updated_at = now;

    Ok(RelationshipChange {
        strength_delta: checked_sub(new_strength, previous_strength, "strength delta")?,
        trust_delta: checked_sub(new_trust, previous_trust, "trust delta")?,
        familiarity_delta: checked_sub(new_familiarity, previous_familiarity, "familiarity delta")?,
        new_strength,
        new_trust,
        new_familiarity,
        standing,
        interaction_count,
    })
}

/// Classify a relationship's standing from its current scores.
///
/// Hostile standings are checked first so a strongly negative bond never
/// reads as an acquaintance, then the positive tiers from closest down.
pub fn classify_standing(
    strength: Decimal,
    trust: Decimal,
    interaction_count: u64,
    config: &SocialConfig,
) -> RelationshipStanding {
    if strength <= config.enemy_strength {
        RelationshipStanding::Enemy
    } else if strength <= config.rival_strength {
        RelationshipStanding::Rival
    } else if strength >= config.close_strength
        && trust >= config.close_trust
        && interaction_count >= config.close_count
    {
        RelationshipStanding::Close
    } else if strength >= config.friend_strength
        && trust >= config.friend_trust
        && interaction_count >= config.friend_count
    {
        RelationshipStanding::Friend
    } else if strength >= config.acquaintance_strength
        && interaction_count >= config.acquaintance_count
    {
        RelationshipStanding::Acquaintance
    } else {
        RelationshipStanding::Neutral
    }
}

// ---------------------------------------------------------------------------
// Deltas
// ---------------------------------------------------------------------------

/// Strength movement for one interaction.
///
/// Sentiment is scaled by the kind's sentiment factor, shifted by the kind's
/// bias, then tapered by how close strength already is to its cap or floor.
fn strength_delta(
    current: Decimal,
    kind: InteractionKind,
    sentiment: Decimal,
    config: &SocialConfig,
) -> Result<Decimal, SocialError> {
    let weighted = checked_add(
        checked_mul(sentiment, sentiment_factor(kind), "strength sentiment weight")?,
        strength_bias(kind),
        "strength bias",
    )?;
    let headroom = checked_sub(SCORE_MAX, current.abs(), "strength headroom")?;
    checked_mul(
        checked_mul(weighted, config.strength_base_rate, "strength rate")?,
        headroom,
        "strength taper",
    )
}

/// Trust movement for one interaction.
///
/// Positive sentiment grows trust in proportion to the trust already held,
/// so trust builds slowly from a low base. Negative sentiment cuts trust at
/// the faster loss rate, weighted by how trust-sensitive the kind is.
fn trust_delta(
    current: Decimal,
    kind: InteractionKind,
    sentiment: Decimal,
    config: &SocialConfig,
) -> Result<Decimal, SocialError> {
    if sentiment >= Decimal::ZERO {
        checked_mul(
            checked_mul(sentiment, config.trust_gain_rate, "trust gain rate")?,
            current,
            "trust gain",
        )
    } else {
        checked_mul(
            checked_mul(sentiment, config.trust_loss_rate, "trust loss rate")?,
            trust_weight(kind),
            "trust loss",
        )
    }
}

/// Familiarity movement for one interaction. Always non-negative, tapering
/// as familiarity approaches 1.0.
fn familiarity_delta(
    current: Decimal,
    kind: InteractionKind,
    config: &SocialConfig,
) -> Result<Decimal, SocialError> {
    let headroom = checked_sub(SCORE_MAX, current, "familiarity headroom")?;
    checked_mul(
        checked_mul(config.familiarity_rate, familiarity_weight(kind), "familiarity rate")?,
        headroom,
        "familiarity taper",
    )
}

// ---------------------------------------------------------------------------
// Checked helpers
// ---------------------------------------------------------------------------

fn checked_add(left: Decimal, right: Decimal, context: &str) -> Result<Decimal, SocialError> {
    left.checked_add(right)
        .ok_or_else(|| SocialError::ArithmeticOverflow {
            context: String::from(context),
        })
}

fn checked_sub(left: Decimal, right: Decimal, context: &str) -> Result<Decimal, SocialError> {
    left.checked_sub(right)
        .ok_or_else(|| SocialError::ArithmeticOverflow {
            context: String::from(context),
        })
}

fn checked_mul(left: Decimal, right: Decimal, context: &str) -> Result<Decimal, SocialError> {
    left.checked_mul(right)
        .ok_or_else(|| SocialError::ArithmeticOverflow {
            context: String::from(context),
        })
}

fn clamp_signed(value: Decimal) -> Decimal {
    if value > SCORE_MAX {
        SCORE_MAX
    } else if value < SCORE_MIN {
        SCORE_MIN
    } else {
        value
    }
}

fn clamp_unit(value: Decimal) -> Decimal {
    if value > SCORE_MAX {
        SCORE_MAX
    } else if value < UNIT_MIN {
        UNIT_MIN
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
