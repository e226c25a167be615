//! # Identifier Newtypes
//!
//! Newtype wrappers for every identifier in the register. These prevent
//! accidental identifier confusion — you cannot pass a `RequirementId`
//! where a `SystemId` is expected, and a mapping can never be looked up
//! with the wrong kind of key.
//!
//! All identifiers are random UUIDv4: collision-resistant, opaque, and
//! stable across a record's lifetime.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registered AI system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(pub Uuid);

/// Unique identifier for a catalog requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementId(pub Uuid);

/// Unique identifier for a tracking record (requirement x system mapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingId(pub Uuid);

/// Unique identifier for a piece of compliance evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceId(pub Uuid);

macro_rules! id_impl {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

id_impl!(SystemId, "system");
id_impl!(RequirementId, "requirement");
id_impl!(MappingId, "mapping");
id_impl!(EvidenceId, "evidence");
