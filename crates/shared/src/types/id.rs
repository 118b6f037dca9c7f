//! Typed IDs for type-safe ledger references.
//!
//! Using typed IDs prevents accidentally passing a `PartnerId` where an `AccountId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Creates a deterministic ID from a number (fixtures, snapshots).
            #[must_use]
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(AccountId, "Unique identifier for a chart of accounts entry.");
typed_id!(PartnerId, "Unique identifier for a partner (customer or vendor).");
typed_id!(PartnerTagId, "Unique identifier for a partner tag.");
typed_id!(JournalId, "Unique identifier for a journal.");
typed_id!(MoveId, "Unique identifier for a journal entry (move).");
typed_id!(LineId, "Unique identifier for a ledger line.");
typed_id!(
    ReconciliationId,
    "Unique identifier for a partial reconciliation."
);
typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(
    ReportNodeId,
    "Unique identifier for a financial report hierarchy node."
);
