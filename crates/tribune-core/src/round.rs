//! # Investigation Rounds and Results
//!
//! One [`InvestigationRound`] records a complete request/response/attestation
//! cycle. Rounds are appended to an ordered sequence as they complete and
//! never mutated afterward; the terminal [`InvestigationResult`] designates
//! the last round as the final resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::resolution::Resolution;

/// Hardware attestation for exactly one model response.
///
/// All three fields are opaque transport-encoded text at this layer. The
/// submission payload builder in `tribune-pipeline` converts them to raw
/// bytes; nothing else decodes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeeSignature {
    /// The verbatim response text that was signed inside the TEE.
    pub response_text: String,
    /// Signature over `response_text`, base64-encoded.
    pub signature_b64: String,
    /// Address of the TEE signing key (hex or base64 text).
    pub signing_address: String,
}

/// The result of one completed investigation round.
///
/// Created at the end of the round, appended to the run's sequence, never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationRound {
    /// 1-based round number, monotonically increasing within a run.
    pub round: u32,
    /// Free-text analysis from the model.
    pub analysis: String,
    /// Free-text findings carried into the next round's prompt.
    pub findings: String,
    /// Model-reported confidence, clamped to 0..=100 at construction.
    pub confidence: u8,
    /// Whether the model asked for another round.
    pub needs_more_analysis: bool,
    /// The decision, present only when the round rendered one.
    pub resolution: Option<Resolution>,
    /// Optional remediation guidance addressed to the freelancer.
    pub context_for_freelancer: Option<String>,
    /// Hardware attestation over this round's response.
    pub signature: TeeSignature,
    /// When the round completed.
    pub recorded_at: DateTime<Utc>,
}

/// Terminal artifact of an investigation: the ordered round sequence plus
/// the designated final resolution round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationResult {
    /// All completed rounds, in order.
    pub rounds: Vec<InvestigationRound>,
    /// The last round; its resolution is the decision submitted on-chain.
    pub final_resolution: InvestigationRound,
}

impl InvestigationResult {
    /// Build a result from a completed round sequence.
    ///
    /// Enforces the structural invariants: the sequence is non-empty, at
    /// most `round_cap` long, round numbers are the contiguous 1-based
    /// sequence, and `final_resolution` is the last element.
    pub fn from_rounds(
        rounds: Vec<InvestigationRound>,
        round_cap: u32,
    ) -> Result<Self, ValidationError> {
        if rounds.is_empty() {
            return Err(ValidationError::InvalidResult {
                reason: "round sequence is empty".into(),
            });
        }
        if rounds.len() as u32 > round_cap {
            return Err(ValidationError::InvalidResult {
                reason: format!("{} rounds exceed cap {round_cap}", rounds.len()),
            });
        }
        for (i, r) in rounds.iter().enumerate() {
            let expected = i as u32 + 1;
            if r.round != expected {
                return Err(ValidationError::InvalidResult {
                    reason: format!("round number {} at position {i}, expected {expected}", r.round),
                });
            }
        }
        let final_resolution = rounds
            .last()
            .cloned()
            .ok_or_else(|| ValidationError::InvalidResult {
                reason: "round sequence is empty".into(),
            })?;
        Ok(Self {
            rounds,
            final_resolution,
        })
    }
}
