//! Data layer for the Rapport interaction engine (Redis-compatible store).
//!
//! All live social state is held in Redis: character records, relationship
//! ledger entries and conversation logs, written through typed key-pattern
//! helpers. Interaction events fan out over Redis pub/sub on per-ecosystem
//! channels. There is no cold store; history beyond the conversation logs
//! is out of scope for this crate.
//!
//! # Modules
//!
//! - [`store`] -- Redis connection pool and key-pattern operations
//! - [`error`] -- Shared error types

pub mod error;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use store::RedisPool;
