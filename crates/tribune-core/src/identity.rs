//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the Tribune Stack.
//! Each identifier is a distinct type — you cannot pass a [`MilestoneId`]
//! where a [`DisputeId`] is expected.
//!
//! UUID-based identifiers are always valid by construction; no string
//! parsing happens outside serde.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a dispute raised against an escrow milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisputeId(Uuid);

impl DisputeId {
    /// Create a new random dispute identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a dispute identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DisputeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DisputeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dispute:{}", self.0)
    }
}

/// A unique identifier for a milestone within an escrow contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneId(Uuid);

impl MilestoneId {
    /// Create a new random milestone identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a milestone identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MilestoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "milestone:{}", self.0)
    }
}
