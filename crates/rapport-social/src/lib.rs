//! Social reasoning for character interactions.
//!
//! Pure domain logic with no I/O: everything here is deterministic given its
//! inputs, except reply phrasing which draws from small random template
//! pools. Storage and orchestration live in the engine crate.
//!
//! # Modules
//!
//! - [`sentiment`]: lexicon-based sentiment scoring of dialogue text.
//! - [`emotion`]: emotional response distributions, dominance and distance.
//! - [`personality`]: trait descriptions and interaction forecasts.
//! - [`compatibility`]: pairwise personality compatibility reports.
//! - [`ledger`]: relationship strength, trust, familiarity and standing.
//! - [`catalog`]: interaction kinds, their costs and scoring weights.
//! - [`response`]: reply text generation.
//! - [`config`]: tunable social scoring parameters.
//! - [`error`]: crate error type.

pub mod catalog;
pub mod compatibility;
pub mod config;
pub mod emotion;
pub mod error;
pub mod ledger;
pub mod personality;
pub mod response;
pub mod sentiment;

pub use catalog::{
    apply_energy_cost, base_energy_cost, interaction_catalogue, responder_energy_cost,
    scaled_energy_cost,
};
pub use compatibility::compatibility;
pub use config::SocialConfig;
pub use emotion::{dominant_emotion, emotional_distance, emotional_response};
pub use error::SocialError;
pub use ledger::{apply_interaction, classify_standing};
pub use personality::{describe_personality, interaction_forecast};
pub use response::generate_reply;
pub use sentiment::{analyze_sentiment, clamp_sentiment, score_text, sentiment_to_decimal};
