//! TEE client configuration.
//!
//! Base URLs, credentials, and the model allow-list are supplied by the
//! host — either explicitly or via environment variables. Nothing in this
//! crate carries a default production endpoint; pointing an investigation
//! at the wrong inference service must be a loud, explicit act.

use url::Url;
use zeroize::Zeroizing;

use tribune_core::ModelAllowList;

/// Configuration for connecting to TEE inference and attestation services.
///
/// Custom `Debug` implementation redacts the `api_token` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct TeeClientConfig {
    /// Base URL of the inference service.
    pub inference_url: Url,
    /// Base URL of the attestation service.
    pub attestation_url: Url,
    /// Bearer token for API authentication.
    pub api_token: Zeroizing<String>,
    /// Allow-listed model identifiers the inference client will accept.
    pub allow_list: ModelAllowList,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for TeeClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeeClientConfig")
            .field("inference_url", &self.inference_url)
            .field("attestation_url", &self.attestation_url)
            .field("api_token", &"[REDACTED]")
            .field("allow_list", &self.allow_list)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl TeeClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `TRIBUNE_INFERENCE_URL` (required)
    /// - `TRIBUNE_ATTESTATION_URL` (required)
    /// - `TRIBUNE_API_TOKEN` (required)
    /// - `TRIBUNE_ALLOWED_MODELS` (required; comma-separated)
    /// - `TRIBUNE_TIMEOUT_SECS` (default: 120 — streamed investigations
    ///   are slow)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = Zeroizing::new(
            std::env::var("TRIBUNE_API_TOKEN").map_err(|_| ConfigError::MissingToken)?,
        );
        let allow_list = std::env::var("TRIBUNE_ALLOWED_MODELS")
            .map_err(|_| ConfigError::MissingVar {
                var: "TRIBUNE_ALLOWED_MODELS",
            })
            .map(|raw| {
                ModelAllowList::new(
                    raw.split(',')
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(str::to_string),
                )
            })?;

        Ok(Self {
            inference_url: env_url("TRIBUNE_INFERENCE_URL")?,
            attestation_url: env_url("TRIBUNE_ATTESTATION_URL")?,
            api_token,
            allow_list,
            timeout_secs: std::env::var("TRIBUNE_TIMEOUT_SECS")
                .ok()
                .map(|raw| {
                    raw.parse().map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })
                })
                .transpose()?
                .unwrap_or(120),
        })
    }
}

/// Read a required URL-valued environment variable.
fn env_url(var: &'static str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).map_err(|_| ConfigError::MissingVar { var })?;
    raw.parse().map_err(|_| ConfigError::InvalidUrl { var, value: raw })
}

/// TEE client configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `TRIBUNE_API_TOKEN` is unset, or the token is not header-safe.
    #[error("TRIBUNE_API_TOKEN is not set or not a valid header value")]
    MissingToken,

    /// A required environment variable is unset.
    #[error("required environment variable {var} is not set")]
    MissingVar {
        /// The variable name.
        var: &'static str,
    },

    /// An environment variable did not parse as a URL.
    #[error("environment variable {var} is not a valid URL: {value}")]
    InvalidUrl {
        /// The variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },

    /// `TRIBUNE_TIMEOUT_SECS` did not parse as an integer.
    #[error("TRIBUNE_TIMEOUT_SECS is not a valid integer: {value}")]
    InvalidTimeout {
        /// The rejected value.
        value: String,
    },

    /// The underlying HTTP client failed to build.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
