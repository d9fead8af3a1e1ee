//! The interaction catalogue: energy costs and per-kind multipliers.
//!
//! Every [`InteractionKind`] maps to a base energy cost and a set of
//! multipliers that shape how the relationship ledger responds to it. The
//! full table is discoverable at runtime via [`interaction_catalogue`].
//!
//! All values are [`Decimal`] and all combining arithmetic is checked.

use rust_decimal::Decimal;

use rapport_types::{InteractionKind, InteractionProfile};

use crate::error::SocialError;

/// Base social-energy cost charged to the initiator, before sentiment
/// scaling.
///
/// Costs reflect intensity:
/// - Greeting: 0.03
/// - Chat: 0.05
/// - `EmotionalSupport`: 0.08
/// - Discussion: 0.10
/// - Collaboration: 0.12
/// - Conflict: 0.15
pub fn base_energy_cost(kind: InteractionKind) -> Decimal {
    match kind {
        InteractionKind::Greeting => Decimal::new(3, 2),
        InteractionKind::Chat => Decimal::new(5, 2),
        InteractionKind::Discussion => Decimal::new(1, 1),
        InteractionKind::Collaboration => Decimal::new(12, 2),
        InteractionKind::Conflict => Decimal::new(15, 2),
        InteractionKind::EmotionalSupport => Decimal::new(8, 2),
    }
}

/// How strongly sentiment scales the strength delta for each kind.
///
/// - Greeting: 0.4
/// - Chat: 1.0
/// - Discussion: 1.2
/// - Collaboration: 1.1
/// - Conflict: 0.6
/// - `EmotionalSupport`: 0.9
pub fn sentiment_factor(kind: InteractionKind) -> Decimal {
    match kind {
        InteractionKind::Greeting => Decimal::new(4, 1),
        InteractionKind::Chat => Decimal::ONE,
        InteractionKind::Discussion => Decimal::new(12, 1),
        InteractionKind::Collaboration => Decimal::new(11, 1),
        InteractionKind::Conflict => Decimal::new(6, 1),
        InteractionKind::EmotionalSupport => Decimal::new(9, 1),
    }
}

/// Fixed strength shift applied regardless of sentiment.
///
/// Conflict is the only kind with a negative bias: a hostile exchange pushes
/// strength down even when the content scores mild.
///
/// - Greeting: +0.15
/// - Chat: +0.05
/// - Discussion: 0.0
/// - Collaboration: +0.10
/// - Conflict: -0.15
/// - `EmotionalSupport`: +0.10
#[allow(clippy::match_same_arms)] // Each kind has its own tuned bias; keeping them separate for traceability.
pub fn strength_bias(kind: InteractionKind) -> Decimal {
    match kind {
        InteractionKind::Greeting => Decimal::new(15, 2),
        InteractionKind::Chat => Decimal::new(5, 2),
        InteractionKind::Discussion => Decimal::ZERO,
        InteractionKind::Collaboration => Decimal::new(1, 1),
        InteractionKind::Conflict => Decimal::new(-15, 2),
        InteractionKind::EmotionalSupport => Decimal::new(1, 1),
    }
}

/// Multiplier on trust loss when sentiment is negative.
///
/// Conflict weighs heaviest: betrayed trust decays faster than affinity.
///
/// - Greeting: 0.8
/// - Chat: 1.0
/// - Discussion: 1.1
/// - Collaboration: 1.0
/// - Conflict: 1.5
/// - `EmotionalSupport`: 0.8
#[allow(clippy::match_same_arms)] // Each kind has its own tuned weight; keeping them separate for traceability.
pub fn trust_weight(kind: InteractionKind) -> Decimal {
    match kind {
        InteractionKind::Greeting => Decimal::new(8, 1),
        InteractionKind::Chat => Decimal::ONE,
        InteractionKind::Discussion => Decimal::new(11, 1),
        InteractionKind::Collaboration => Decimal::ONE,
        InteractionKind::Conflict => Decimal::new(15, 1),
        InteractionKind::EmotionalSupport => Decimal::new(8, 1),
    }
}

/// Multiplier on familiarity gain.
///
/// Deeper exchanges teach you more about the other character, conflict
/// included.
///
/// - Greeting: 0.4
/// - Chat: 1.0
/// - Discussion: 1.3
/// - Collaboration: 1.5
/// - Conflict: 1.2
/// - `EmotionalSupport`: 1.4
pub fn familiarity_weight(kind: InteractionKind) -> Decimal {
    match kind {
        InteractionKind::Greeting => Decimal::new(4, 1),
        InteractionKind::Chat => Decimal::ONE,
        InteractionKind::Discussion => Decimal::new(13, 1),
        InteractionKind::Collaboration => Decimal::new(15, 1),
        InteractionKind::Conflict => Decimal::new(12, 1),
        InteractionKind::EmotionalSupport => Decimal::new(14, 1),
    }
}

/// Short human-readable description for catalogue rows.
pub const fn kind_description(kind: InteractionKind) -> &'static str {
    match kind {
        InteractionKind::Greeting => "A brief social acknowledgement",
        InteractionKind::Chat => "Casual open-ended conversation",
        InteractionKind::Discussion => "A focused exchange of views",
        InteractionKind::Collaboration => "Working together toward a shared goal",
        InteractionKind::Conflict => "An adversarial confrontation",
        InteractionKind::EmotionalSupport => "Comforting a character in distress",
    }
}

/// The full discoverable interaction catalogue, one row per kind.
pub fn interaction_catalogue() -> Vec<InteractionProfile> {
    InteractionKind::ALL
        .iter()
        .map(|&kind| InteractionProfile {
            kind,
            description: String::from(kind_description(kind)),
            base_energy_cost: base_energy_cost(kind),
            sentiment_factor: sentiment_factor(kind),
            strength_bias: strength_bias(kind),
            trust_weight: trust_weight(kind),
            familiarity_weight: familiarity_weight(kind),
        })
        .collect()
}

/// Energy cost for the initiator: the base cost scaled up by sentiment
/// magnitude. A maximally charged exchange costs twice the base.
pub fn scaled_energy_cost(
    kind: InteractionKind,
    sentiment: Decimal,
) -> Result<Decimal, SocialError> {
    let scale = Decimal::ONE.checked_add(sentiment.abs()).ok_or_else(|| {
        SocialError::ArithmeticOverflow {
            context: String::from("energy cost sentiment scaling overflow"),
        }
    })?;

    base_energy_cost(kind).checked_mul(scale).ok_or_else(|| {
        SocialError::ArithmeticOverflow {
            context: String::from("energy cost scaling overflow"),
        }
    })
}

/// Energy cost for the responder: a configured fraction of what the
/// initiator actually paid. Charging from the realized debit rather than
/// the nominal cost keeps the initiator's drop strictly larger even when
/// the zero floor clips it short.
pub fn responder_energy_cost(
    initiator_debit: Decimal,
    responder_share: Decimal,
) -> Result<Decimal, SocialError> {
    initiator_debit.checked_mul(responder_share).ok_or_else(|| {
        SocialError::ArithmeticOverflow {
            context: String::from("responder energy cost overflow"),
        }
    })
}

/// Subtract an energy cost from a character's remaining energy, never going
/// below zero.
pub fn apply_energy_cost(energy: Decimal, cost: Decimal) -> Decimal {
    let remaining = energy.saturating_sub(cost);
    if remaining < Decimal::ZERO {
        Decimal::ZERO
    } else {
        remaining
    }
}
