//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity in the engine has a strongly-typed ID to prevent accidental
//! mixing of identifiers at compile time. All IDs use UUID v7 (time-ordered)
//! so that stored records sort by creation time.
//!
//! [`PairKey`] is the canonical key for anything shared by two characters:
//! relationship records, conversation logs, and the per-pair execution locks.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a character.
    CharacterId
}

define_id! {
    /// Unique identifier for an ecosystem (the scope characters interact within).
    EcosystemId
}

define_id! {
    /// Unique identifier for a persisted conversation message.
    MessageId
}

define_id! {
    /// Unique identifier for a published ecosystem event.
    EventId
}

// ---------------------------------------------------------------------------
// Pair key
// ---------------------------------------------------------------------------

/// Canonical unordered pair of character identifiers.
///
/// Construction sorts the two IDs, so `PairKey::new(a, b)` and
/// `PairKey::new(b, a)` produce the same key. Relationship state, conversation
/// logs, and execution locks are all keyed by this type, which is what makes
/// relationship lookups symmetric and pair locking deadlock-free under
/// reversed argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PairKey {
    low: CharacterId,
    high: CharacterId,
}

impl PairKey {
    /// Build the canonical key for two characters, given in either order.
    pub fn new(a: CharacterId, b: CharacterId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The lower-ordered character ID.
    pub const fn low(self) -> CharacterId {
        self.low
    }

    /// The higher-ordered character ID.
    pub const fn high(self) -> CharacterId {
        self.high
    }

    /// Both member IDs in canonical order.
    pub const fn members(self) -> (CharacterId, CharacterId) {
        (self.low, self.high)
    }

    /// Whether the given character is a member of this pair.
    pub fn contains(self, id: CharacterId) -> bool {
        self.low == id || self.high == id
    }

    /// The counterpart of the given member, or `None` if the character is
    /// not part of this pair.
    pub fn other(self, id: CharacterId) -> Option<CharacterId> {
        if id == self.low {
            Some(self.high)
        } else if id == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

impl core::fmt::Display for PairKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let character = CharacterId::new();
        let ecosystem = EcosystemId::new();
        // These are different types -- the compiler enforces no mixing.
        assert_ne!(character.into_inner(), Uuid::nil());
        assert_ne!(ecosystem.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = CharacterId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<CharacterId, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert!(restored.is_ok());
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = CharacterId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn pair_key_is_order_independent() {
        let a = CharacterId::new();
        let b = CharacterId::new();
        assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
        assert_eq!(PairKey::new(a, b).to_string(), PairKey::new(b, a).to_string());
    }

    #[test]
    fn pair_key_sorts_members() {
        let a = CharacterId::new();
        let b = CharacterId::new();
        let key = PairKey::new(a, b);
        assert!(key.low() <= key.high());
        assert!(key.contains(a));
        assert!(key.contains(b));
    }

    #[test]
    fn pair_key_other_returns_counterpart() {
        let a = CharacterId::new();
        let b = CharacterId::new();
        let key = PairKey::new(a, b);
        assert_eq!(key.other(a), Some(b));
        assert_eq!(key.other(b), Some(a));
        assert_eq!(key.other(CharacterId::new()), None);
    }

    #[test]
    fn pair_key_display_is_colon_joined() {
        let a = CharacterId::new();
        let b = CharacterId::new();
        let key = PairKey::new(a, b);
        let expected = format!("{}:{}", key.low(), key.high());
        assert_eq!(key.to_string(), expected);
    }
}
