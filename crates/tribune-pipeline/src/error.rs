//! Composed investigation error.
//!
//! Everything except per-file evidence decrypt failures surfaces here, to
//! the immediate caller of the orchestrator. The orchestrator performs no
//! internal retries or backoff; retries, if desired, are the caller
//! re-invoking the whole pipeline.

use thiserror::Error;

use tribune_anonymize::AnonymizeError;
use tribune_core::ValidationError;
use tribune_tee_client::{AttestationError, InferenceError};
use tribune_verdict::VerdictError;

use crate::submission::PayloadError;

/// Any failure that aborts an investigation.
///
/// Carries the originating subsystem error unchanged; no partial round
/// sequence accompanies an error — the run's rounds are discarded with it.
#[derive(Error, Debug)]
pub enum InvestigationError {
    /// Malformed dispute context, caught before any network call.
    #[error("anonymization failed: {0}")]
    Anonymize(#[from] AnonymizeError),

    /// Structural invariant violation (round sequence, policy).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Inference service failure (transport, non-2xx, empty response).
    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),

    /// Attestation service failure.
    #[error("attestation failed: {0}")]
    Attestation(#[from] AttestationError),

    /// Model output could not be normalized into a verdict.
    #[error("verdict parsing failed: {0}")]
    Verdict(#[from] VerdictError),

    /// TEE signature could not be decoded for ledger submission.
    #[error("submission payload failed: {0}")]
    Payload(#[from] PayloadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert_from_both_paths() {
        let direct: InvestigationError = ValidationError::ZeroRoundCap { cap: 0 }.into();
        assert!(matches!(direct, InvestigationError::Validation(_)));

        let via_anonymize: InvestigationError = AnonymizeError::Validation(
            ValidationError::MissingField { field: "dispute_reason" },
        )
        .into();
        assert!(matches!(via_anonymize, InvestigationError::Anonymize(_)));
        assert!(format!("{via_anonymize}").contains("dispute_reason"));
    }

    #[test]
    fn inference_error_display_is_preserved() {
        let err: InvestigationError = InferenceError::EmptyResponse {
            model: "llama-3.3-70b".into(),
        }
        .into();
        assert!(format!("{err}").contains("empty response"));
    }
}
