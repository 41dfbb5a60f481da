#![deny(missing_docs)]

//! # tribune-tee-client — Typed Client for TEE Inference & Attestation
//!
//! Provides ergonomic, typed access to the two services an investigation
//! talks to:
//!
//! - **Inference** — OpenAI-shaped chat completions served from inside a
//!   TEE, with SSE streaming support ([`inference::InferenceClient`]).
//! - **Attestation** — hardware-rooted signatures over a completed chat's
//!   response text ([`attestation::AttestationClient`]).
//!
//! ## Architecture
//!
//! This crate is the ONLY authorized network path out of the Tribune Stack.
//! Direct HTTP requests to the inference or attestation endpoints from any
//! other crate are forbidden; everything flows through [`TeeClient`].
//!
//! ## Ordering Contract
//!
//! Attestation is keyed by the conversation id the inference service
//! assigns, which [`inference::ChatResponse`] only carries once the stream
//! has fully completed. Fetching a signature for an in-progress answer is
//! therefore impossible by construction.

pub mod attestation;
pub mod config;
pub mod error;
pub mod inference;
pub(crate) mod retry;
pub(crate) mod stream;

pub use config::TeeClientConfig;
pub use error::{AttestationError, ConfigError, InferenceError};

use std::time::Duration;

/// Top-level TEE service client. Holds sub-clients for inference and
/// attestation over one shared HTTP connection pool.
#[derive(Debug, Clone)]
pub struct TeeClient {
    inference: inference::InferenceClient,
    attestation: attestation::AttestationClient,
}

impl TeeClient {
    /// Create a new TEE service client from configuration.
    pub fn new(config: TeeClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!(
                        "Bearer {}",
                        config.api_token.as_str()
                    ))
                    .map_err(|_| ConfigError::MissingToken)?,
                );
                headers
            })
            .build()?;

        Ok(Self {
            inference: inference::InferenceClient::new(
                http.clone(),
                config.inference_url,
                config.allow_list,
            ),
            attestation: attestation::AttestationClient::new(http, config.attestation_url),
        })
    }

    /// Access the inference (chat completion) client.
    pub fn inference(&self) -> &inference::InferenceClient {
        &self.inference
    }

    /// Access the attestation (TEE signature) client.
    pub fn attestation(&self) -> &attestation::AttestationClient {
        &self.attestation
    }
}
