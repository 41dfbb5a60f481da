#![deny(missing_docs)]

//! # tribune-pipeline — The AI Investigation Pipeline
//!
//! Composes the Tribune Stack's leaf components into the bounded,
//! attested investigation loop:
//!
//! - **Prompt** ([`prompt`]): round prompt construction from a template,
//!   round counters, and prior-round findings.
//!
//! - **Evidence** ([`evidence`]): the collector seam to the encrypted
//!   evidence vault; per-file decrypt failures degrade gracefully.
//!
//! - **Investigator** ([`investigator`]): the strictly sequential round
//!   loop — anonymize, prompt, infer, attest, parse, append — with a safe
//!   termination policy.
//!
//! - **Submission** ([`submission`]): conversion of a TEE signature into
//!   the raw byte encodings an on-chain verification call consumes.

pub mod error;
pub mod evidence;
pub mod investigator;
pub mod prompt;
pub mod submission;

// Re-export primary types.
pub use error::InvestigationError;
pub use evidence::{EvidenceCollector, EvidenceReference, NoEvidence};
pub use investigator::Investigator;
pub use prompt::{build_round_prompt, DEFAULT_INVESTIGATION_TEMPLATE};
pub use submission::{build_submission_payload, PayloadError, SubmissionPayload};
