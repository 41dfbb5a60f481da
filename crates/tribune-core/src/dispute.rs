//! # Dispute Context
//!
//! The immutable snapshot of a milestone disagreement that an investigation
//! runs against: contract terms, the disputed milestone, the dispute reason,
//! the parties, and optional chat transcript and evidence text.
//!
//! A [`DisputeContext`] is built once per investigation and never mutated
//! mid-run. Validation happens at the pipeline entry, before any network
//! call is made.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{DisputeId, MilestoneId};

/// One message from the dispute's chat transcript.
///
/// `sender` is the raw platform identity (wallet address, username); the
/// anonymizer maps it to a role token before the model ever sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Raw sender identity as recorded by the chat transport.
    pub sender: String,
    /// Message body.
    pub text: String,
}

/// A decrypted evidence file rendered to text.
///
/// Binary evidence is excluded upstream by the evidence collector; this type
/// only ever carries text the model can read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceText {
    /// Original filename, shown as a section header in the prompt.
    pub filename: String,
    /// Decrypted file content.
    pub content: String,
}

/// Immutable snapshot of a disputed milestone, assembled once per
/// investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisputeContext {
    /// The dispute this context belongs to.
    pub dispute_id: DisputeId,
    /// The milestone under dispute.
    pub milestone_id: MilestoneId,
    /// Contract title.
    pub contract_title: String,
    /// Contract description / scope of work.
    pub contract_description: String,
    /// Title of the disputed milestone.
    pub milestone_title: String,
    /// Description of the disputed milestone's deliverables.
    pub milestone_description: String,
    /// Milestone amount as a decimal string (ledger-native units).
    pub milestone_amount: String,
    /// The reason given when the dispute was raised.
    pub dispute_reason: String,
    /// Identity of the party who raised the dispute.
    pub raised_by: String,
    /// Client identity string (the paying party).
    pub client_identity: String,
    /// Freelancer identity string (the working party).
    pub freelancer_identity: String,
    /// Chat transcript between the parties, oldest first.
    #[serde(default)]
    pub chat_transcript: Vec<ChatMessage>,
    /// Decrypted evidence files rendered to text.
    #[serde(default)]
    pub evidence: Vec<EvidenceText>,
}

impl DisputeContext {
    /// Validate that every field the investigation depends on is present.
    ///
    /// Fails fast with the first missing field so the pipeline rejects a
    /// malformed dispute before issuing any network call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField { field });
            }
            Ok(())
        }

        require(&self.contract_title, "contract_title")?;
        require(&self.milestone_title, "milestone_title")?;
        require(&self.milestone_amount, "milestone_amount")?;
        require(&self.dispute_reason, "dispute_reason")?;
        require(&self.client_identity, "client_identity")?;
        require(&self.freelancer_identity, "freelancer_identity")?;
        Ok(())
    }
}
