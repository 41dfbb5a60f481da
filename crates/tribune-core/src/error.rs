//! # Validation Errors
//!
//! Structural validation failures caught before any network call is made,
//! built with `thiserror`. Subsystem-specific errors (inference,
//! attestation, verdict parsing, payload decoding) live in their owning
//! crates; the composed investigation error lives in `tribune-pipeline`.

use thiserror::Error;

/// Validation failures caught before any network call is made.
///
/// Never retried automatically: retrying an allow-list rejection or a blank
/// required field cannot succeed.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required dispute-context field is missing or blank.
    #[error("dispute context field '{field}' is missing or blank")]
    MissingField {
        /// The name of the offending field.
        field: &'static str,
    },

    /// The requested model is not on the configured allow-list.
    #[error("model '{model}' is not on the allow-list ({allowed})")]
    ModelNotAllowed {
        /// The rejected model identifier.
        model: String,
        /// Comma-joined allow-list contents, for the operator.
        allowed: String,
    },

    /// Split percentage outside the valid 1..=99 range.
    #[error("split freelancer_pct {pct} outside valid range 1..=99")]
    SplitOutOfRange {
        /// The offending percentage.
        pct: u8,
    },

    /// An investigation result violated its structural invariant.
    #[error("investigation result invariant violated: {reason}")]
    InvalidResult {
        /// Why the result was rejected.
        reason: String,
    },

    /// A policy was constructed with an unusable round cap.
    #[error("round cap must be at least 1, got {cap}")]
    ZeroRoundCap {
        /// The rejected cap.
        cap: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = ValidationError::MissingField {
            field: "contract_title",
        };
        assert!(format!("{err}").contains("contract_title"));
    }

    #[test]
    fn model_not_allowed_lists_the_allow_list() {
        let err = ValidationError::ModelNotAllowed {
            model: "gpt-x".into(),
            allowed: "llama-3.3-70b, deepseek-r1".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("gpt-x"));
        assert!(msg.contains("llama-3.3-70b"));
    }

    #[test]
    fn split_out_of_range_shows_value() {
        let err = ValidationError::SplitOutOfRange { pct: 150 };
        assert!(format!("{err}").contains("150"));
    }

    #[test]
    fn zero_round_cap_rejected_message() {
        let err = ValidationError::ZeroRoundCap { cap: 0 };
        assert!(format!("{err}").contains("at least 1"));
    }
}
