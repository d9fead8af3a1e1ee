//! Tunable parameters for social scoring.
//!
//! Every rate and threshold used by the ledger and energy model lives here
//! so deployments can reshape social dynamics without code changes. The
//! struct deserializes from the engine's YAML configuration; omitted fields
//! fall back to the defaults below.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Social scoring parameters.
///
/// Thresholds are checked by the standing classifier in tier order, so a
/// deployment that tightens `close_strength` without touching the friend
/// thresholds simply makes the top tier rarer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SocialConfig {
    /// Scales every strength delta (default: 0.2).
    #[serde(default = "default_strength_base_rate")]
    pub strength_base_rate: Decimal,

    /// Scales trust gains from positive interactions (default: 0.1).
    #[serde(default = "default_trust_gain_rate")]
    pub trust_gain_rate: Decimal,

    /// Scales trust losses from negative interactions (default: 0.25).
    /// Steeper than the gain rate: trust breaks faster than it builds.
    #[serde(default = "default_trust_loss_rate")]
    pub trust_loss_rate: Decimal,

    /// Scales familiarity growth per interaction (default: 0.05).
    #[serde(default = "default_familiarity_rate")]
    pub familiarity_rate: Decimal,

    /// Minimum social energy required to initiate an interaction
    /// (default: 0.1).
    #[serde(default = "default_energy_floor")]
    pub energy_floor: Decimal,

    /// Fraction of the initiator's energy cost charged to the responder
    /// (default: 0.6).
    #[serde(default = "default_responder_cost_share")]
    pub responder_cost_share: Decimal,

    /// Strength at or below which a pair are enemies (default: -0.6).
    #[serde(default = "default_enemy_strength")]
    pub enemy_strength: Decimal,

    /// Strength at or below which a pair are rivals (default: -0.2).
    #[serde(default = "default_rival_strength")]
    pub rival_strength: Decimal,

    /// Minimum strength for a close bond (default: 0.7).
    #[serde(default = "default_close_strength")]
    pub close_strength: Decimal,

    /// Minimum trust for a close bond (default: 0.7).
    #[serde(default = "default_close_trust")]
    pub close_trust: Decimal,

    /// Minimum interaction count for a close bond (default: 10).
    #[serde(default = "default_close_count")]
    pub close_count: u64,

    /// Minimum strength for friendship (default: 0.4).
    #[serde(default = "default_friend_strength")]
    pub friend_strength: Decimal,

    /// Minimum trust for friendship (default: 0.5).
    #[serde(default = "default_friend_trust")]
    pub friend_trust: Decimal,

    /// Minimum interaction count for friendship (default: 5).
    #[serde(default = "default_friend_count")]
    pub friend_count: u64,

    /// Minimum strength for acquaintance (default: 0.1).
    #[serde(default = "default_acquaintance_strength")]
    pub acquaintance_strength: Decimal,

    /// Minimum interaction count for acquaintance (default: 3).
    #[serde(default = "default_acquaintance_count")]
    pub acquaintance_count: u64,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            strength_base_rate: default_strength_base_rate(),
            trust_gain_rate: default_trust_gain_rate(),
            trust_loss_rate: default_trust_loss_rate(),
            familiarity_rate: default_familiarity_rate(),
            energy_floor: default_energy_floor(),
            responder_cost_share: default_responder_cost_share(),
            enemy_strength: default_enemy_strength(),
            rival_strength: default_rival_strength(),
            close_strength: default_close_strength(),
            close_trust: default_close_trust(),
            close_count: default_close_count(),
            friend_strength: default_friend_strength(),
            friend_trust: default_friend_trust(),
            friend_count: default_friend_count(),
            acquaintance_strength: default_acquaintance_strength(),
            acquaintance_count: default_acquaintance_count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_strength_base_rate() -> Decimal {
    Decimal::new(2, 1)
}

fn default_trust_gain_rate() -> Decimal {
    Decimal::new(1, 1)
}

fn default_trust_loss_rate() -> Decimal {
    Decimal::new(25, 2)
}

fn default_familiarity_rate() -> Decimal {
    Decimal::new(5, 2)
}

fn default_energy_floor() -> Decimal {
    Decimal::new(1, 1)
}

fn default_responder_cost_share() -> Decimal {
    Decimal::new(6, 1)
}

fn default_enemy_strength() -> Decimal {
    Decimal::new(-6, 1)
}

fn default_rival_strength() -> Decimal {
    Decimal::new(-2, 1)
}

fn default_close_strength() -> Decimal {
    Decimal::new(7, 1)
}

fn default_close_trust() -> Decimal {
    Decimal::new(7, 1)
}

const fn default_close_count() -> u64 {
    10
}

fn default_friend_strength() -> Decimal {
    Decimal::new(4, 1)
}

fn default_friend_trust() -> Decimal {
    Decimal::new(5, 1)
}

const fn default_friend_count() -> u64 {
    5
}

fn default_acquaintance_strength() -> Decimal {
    Decimal::new(1, 1)
}

const fn default_acquaintance_count() -> u64 {
    3
}
