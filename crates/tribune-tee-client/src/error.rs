//! TEE client error types.
//!
//! Inference and attestation keep separate error enums: callers treat "the
//! model said nothing" differently from "the attestation service is down",
//! and the investigation error at the pipeline boundary preserves that
//! distinction.

pub use crate::config::ConfigError;

/// Errors from the inference service client.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// Model rejected by the allow-list before any request was issued.
    /// Never retried.
    #[error("validation error: {0}")]
    Validation(#[from] tribune_core::ValidationError),

    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Endpoint label (method + path).
        endpoint: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// Inference service returned a non-2xx status.
    #[error("inference service {endpoint} returned {status}: {body}")]
    Service {
        /// Endpoint label (method + path).
        endpoint: String,
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream response body.
        body: String,
    },

    /// The stream completed but yielded no content. Kept distinct from
    /// [`InferenceError::Service`] so callers can tell "the model said
    /// nothing" apart from "the service failed".
    #[error("AI returned empty response for model '{model}'")]
    EmptyResponse {
        /// The model that produced the empty stream.
        model: String,
    },

    /// The response could not be decoded as a chat completion.
    #[error("failed to decode inference response from {endpoint}: {detail}")]
    Decode {
        /// Endpoint label (method + path).
        endpoint: String,
        /// What failed to decode.
        detail: String,
    },
}

/// Errors from the attestation service client.
#[derive(Debug, thiserror::Error)]
pub enum AttestationError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Endpoint label (method + path).
        endpoint: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// Attestation service returned a non-2xx status.
    #[error("attestation service {endpoint} returned {status}: {body}")]
    Service {
        /// Endpoint label (method + path).
        endpoint: String,
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream response body.
        body: String,
    },

    /// The response was not a well-formed signature record.
    #[error("failed to decode attestation response from {endpoint}: {source}")]
    Decode {
        /// Endpoint label (method + path).
        endpoint: String,
        /// The underlying deserialization error.
        source: reqwest::Error,
    },
}
