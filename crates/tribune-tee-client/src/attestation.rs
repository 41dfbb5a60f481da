//! Typed client for the TEE attestation service.
//!
//! Given the conversation id of a *completed* chat and the model that
//! produced it, fetches the hardware-rooted signature over the exact
//! response text. All returned fields are opaque transport-encoded text at
//! this layer; decoding to raw bytes happens in the submission payload
//! builder, nowhere else.

use serde::Deserialize;
use url::Url;

use tribune_core::TeeSignature;

use crate::error::AttestationError;

const ENDPOINT: &str = "GET /v1/attestation";

/// Signing algorithm tag sent with every attestation request.
const SIGNING_ALGO: &str = "ecdsa";

/// Wire shape of an attestation response.
#[derive(Debug, Deserialize)]
struct AttestationResponse {
    /// Verbatim signed response text.
    text: String,
    /// Signature over `text`, base64-encoded.
    signature: String,
    /// Signing key address.
    signing_address: String,
}

/// Client for the TEE attestation service.
#[derive(Debug, Clone)]
pub struct AttestationClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AttestationClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch the TEE signature for a completed chat.
    ///
    /// Calls `GET {base_url}v1/attestation?chat_id=..&model=..&algo=ecdsa`.
    pub async fn fetch_signature(
        &self,
        chat_id: &str,
        model: &str,
    ) -> Result<TeeSignature, AttestationError> {
        let url = format!("{}v1/attestation", self.base_url);

        tracing::debug!(chat_id, model, "fetching TEE signature");
        let resp = crate::retry::retry_send(|| {
            self.http
                .get(&url)
                .query(&[("chat_id", chat_id), ("model", model), ("algo", SIGNING_ALGO)])
                .send()
        })
        .await
        .map_err(|e| AttestationError::Http {
            endpoint: ENDPOINT.into(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AttestationError::Service {
                endpoint: ENDPOINT.into(),
                status,
                body,
            });
        }

        let wire: AttestationResponse =
            resp.json().await.map_err(|e| AttestationError::Decode {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        Ok(TeeSignature {
            response_text: wire.text,
            signature_b64: wire.signature,
            signing_address: wire.signing_address,
        })
    }
}
