//! Interaction orchestration for the Rapport simulation.
//!
//! This crate owns the interaction pipeline that drives the simulation:
//! staged validation, execution under a per-pair lock, atomic persistence
//! of the interaction write set, and fire-and-forget event publishing.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `rapport-config.yaml` into
//!   strongly-typed structs.
//! - [`events`] -- Ecosystem event construction and channel naming.
//! - [`orchestrator`] -- [`InteractionEngine`], the caller-facing entry
//!   point.
//! - [`pair_lock`] -- Canonical per-pair execution locks.
//! - [`redis`] -- Production [`Persistence`] and [`EventBus`]
//!   implementations over Redis.
//! - [`traits`] -- Collaborator traits the orchestrator is generic over.
//!
//! [`InteractionEngine`]: orchestrator::InteractionEngine
//! [`Persistence`]: traits::Persistence
//! [`EventBus`]: traits::EventBus

pub mod config;
pub mod events;
pub mod orchestrator;
pub mod pair_lock;
pub mod redis;
pub mod traits;

// Re-export primary types for convenience.
pub use config::{ConfigError, EngineConfig, InfrastructureConfig, LoggingConfig};
pub use events::ecosystem_channel;
pub use orchestrator::{EngineError, InteractionEngine};
pub use pair_lock::PairLocks;
pub use redis::{RedisEventBus, RedisStore};
pub use traits::{EventBus, Persistence, StoreError};
