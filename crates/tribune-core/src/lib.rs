#![deny(missing_docs)]

//! # tribune-core — Foundational Types for the Tribune Stack
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `thiserror`,
//! `chrono`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`MilestoneId`] where a [`DisputeId`]
//!    is expected.
//!
//! 2. **Closed resolution set.** [`Resolution`] is the exhaustive set of
//!    outcomes an investigation can produce. Anything the model says that
//!    does not normalize into this set never reaches the ledger.
//!
//! 3. **Explicit policy, no globals.** Round caps and the model allow-list
//!    live in [`InvestigationPolicy`] values constructed by the host, so a
//!    standard-tier and an appeal-tier investigation can run side by side
//!    with different limits.
//!
//! 4. **Structured errors with `thiserror`.** Validation failures are typed
//!    here; each subsystem crate owns its own error enum, and the composed
//!    investigation error lives at the pipeline boundary. No
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod dispute;
pub mod error;
pub mod identity;
pub mod policy;
pub mod resolution;
pub mod round;

// Re-export primary types at crate root for ergonomic imports.
pub use dispute::{ChatMessage, DisputeContext, EvidenceText};
pub use error::ValidationError;
pub use identity::{DisputeId, MilestoneId};
pub use policy::{InvestigationPolicy, InvestigationTier, ModelAllowList};
pub use resolution::Resolution;
pub use round::{InvestigationResult, InvestigationRound, TeeSignature};
