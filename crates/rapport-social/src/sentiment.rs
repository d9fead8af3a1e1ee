//! Lexical sentiment analysis for interaction content.
//!
//! Scores free-form text into the -1.0 to 1.0 range using a small weighted
//! lexicon. The scorer is intentionally simple: lowercase tokenization, a
//! negation window that flips hits, intensifiers that scale the following
//! hit, and a small exclamation boost in the direction of the base score.
//!
//! # Invariants
//!
//! - Scores are always clamped to [-1.0, 1.0].
//! - Text with no lexicon hits scores exactly 0.0.
//! - The sign of the score follows the dominant valence of the hits.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::SocialError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How many preceding tokens a negation can reach across.
const NEGATION_WINDOW: usize = 2;

/// Score added per exclamation mark, in the direction of the base score.
const EXCLAMATION_BOOST: f64 = 0.05;

/// Maximum number of exclamation marks that contribute to the boost.
const EXCLAMATION_CAP: u32 = 3;

/// Decimal places kept when bridging a score into [`Decimal`].
const SCORE_PRECISION: u32 = 4;

/// Signed word weights. Positive entries read as warm or approving,
/// negative entries as hostile or dejected.
const LEXICON: &[(&str, f64)] = &[
    // --- Positive ---
    ("love", 0.8),
    ("wonderful", 0.8),
    ("amazing", 0.8),
    ("excellent", 0.8),
    ("brilliant", 0.8),
    ("perfect", 0.8),
    ("great", 0.7),
    ("happy", 0.7),
    ("excited", 0.7),
    ("beautiful", 0.7),
    ("fantastic", 0.7),
    ("glad", 0.6),
    ("thanks", 0.6),
    ("thank", 0.6),
    ("appreciate", 0.6),
    ("enjoy", 0.6),
    ("enjoyed", 0.6),
    ("delighted", 0.6),
    ("good", 0.5),
    ("nice", 0.5),
    ("fun", 0.5),
    ("kind", 0.5),
    ("agree", 0.5),
    ("trust", 0.5),
    ("friend", 0.4),
    ("welcome", 0.4),
    ("help", 0.4),
    ("interesting", 0.4),
    ("together", 0.3),
    // --- Negative ---
    ("hate", -0.8),
    ("terrible", -0.8),
    ("awful", -0.8),
    ("horrible", -0.8),
    ("furious", -0.8),
    ("worst", -0.8),
    ("idiot", -0.8),
    ("angry", -0.7),
    ("stupid", -0.7),
    ("useless", -0.7),
    ("liar", -0.7),
    ("disgusting", -0.7),
    ("sad", -0.6),
    ("upset", -0.6),
    ("annoying", -0.6),
    ("disappointed", -0.6),
    ("miserable", -0.6),
    ("bad", -0.5),
    ("afraid", -0.5),
    ("worried", -0.5),
    ("disagree", -0.5),
    ("unfair", -0.5),
    ("wrong", -0.4),
    ("boring", -0.4),
    ("tired", -0.3),
];

/// Tokens that flip the sign of a following lexicon hit.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "hardly", "don't", "doesn't", "didn't", "can't", "won't", "isn't",
    "aren't", "wasn't", "couldn't",
];

/// Tokens that scale the weight of the immediately following hit.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("really", 1.5),
    ("so", 1.3),
    ("truly", 1.4),
    ("absolutely", 1.6),
    ("extremely", 1.8),
    ("incredibly", 1.7),
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score an exchange of content into the -1.0 to 1.0 range.
///
/// Both texts contribute to a single combined score, so the sign follows
/// whichever side carries the stronger valence. Either side may be empty.
pub fn analyze_sentiment(initiating: &str, response: &str) -> f64 {
    let mut tokens = tokenize(initiating);
    tokens.extend(tokenize(response));

    let exclamations =
        count_exclamations(initiating).saturating_add(count_exclamations(response));

    score_tokens(&tokens, exclamations)
}

/// Score a single piece of text. Equivalent to analyzing it against an
/// empty response.
pub fn score_text(text: &str) -> f64 {
    analyze_sentiment(text, "")
}

/// Clamp a sentiment score to the valid range [-1.0, 1.0].
pub const fn clamp_sentiment(score: f64) -> f64 {
    score.clamp(-1.0, 1.0)
}

/// Bridge a sentiment score into [`Decimal`] for the relationship ledger.
///
/// Rounds to four decimal places so stored deltas stay stable across
/// serialization.
pub fn sentiment_to_decimal(score: f64) -> Result<Decimal, SocialError> {
    Decimal::from_f64(clamp_sentiment(score))
        .map(|value| value.round_dp(SCORE_PRECISION))
        .ok_or(SocialError::UnrepresentableScore { value: score })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Lowercase alphanumeric tokens, apostrophes kept so contractions survive.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn count_exclamations(text: &str) -> u32 {
    u32::try_from(text.chars().filter(|c| *c == '!').count()).unwrap_or(u32::MAX)
}

fn lexicon_weight(token: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, weight)| *weight)
}

fn intensifier_boost(token: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, boost)| *boost)
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token)
}

/// Core scoring pass: average the adjusted weights of all lexicon hits,
/// then apply the exclamation boost and clamp.
fn score_tokens(tokens: &[String], exclamations: u32) -> f64 {
    let mut weighted_sum = 0.0;
    let mut hits: u32 = 0;

    for (index, token) in tokens.iter().enumerate() {
        let Some(weight) = lexicon_weight(token) else {
            continue;
        };

        let mut value = weight;

        // An intensifier directly before the hit scales it.
        if let Some(boost) = index
            .checked_sub(1)
            .and_then(|i| tokens.get(i))
            .and_then(|previous| intensifier_boost(previous))
        {
            value *= boost;
        }

        // A negation within the window flips the hit.
        let negated = (1..=NEGATION_WINDOW).any(|offset| {
            index
                .checked_sub(offset)
                .and_then(|i| tokens.get(i))
                .is_some_and(|t| is_negation(t))
        });
        if negated {
            value = -value;
        }

        weighted_sum += value;
        hits = hits.saturating_add(1);
    }

    if hits == 0 {
        return 0.0;
    }

    let mut score = weighted_sum / f64::from(hits);

    if score != 0.0 {
        let boost = EXCLAMATION_BOOST * f64::from(exclamations.min(EXCLAMATION_CAP));
        score += boost.copysign(score);
    }

    clamp_sentiment(score)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
