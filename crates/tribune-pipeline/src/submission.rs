//! Ledger submission payload construction.
//!
//! A [`tribune_core::TeeSignature`] carries transport-encoded text; the
//! on-chain signature-verification call consumes raw bytes. This module is
//! the only place that decoding happens: pure, deterministic, no I/O.
//!
//! Signatures are base64. Signing addresses are hex with an optional `0x`
//! prefix (the common attestation-service shape), with a base64 fallback
//! for services that encode addresses like signatures.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use tribune_core::TeeSignature;

/// Raw byte encodings ready for an on-chain verification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    /// The verbatim signed response text, as bytes.
    pub signed_text: Vec<u8>,
    /// Decoded signature bytes.
    pub signature: Vec<u8>,
    /// Decoded signing-address bytes.
    pub signing_address: Vec<u8>,
}

/// Errors decoding a TEE signature into ledger-ready bytes.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The signature text is not valid base64.
    #[error("signature is not valid base64: {detail}")]
    InvalidSignatureEncoding {
        /// Decoder diagnostic.
        detail: String,
    },

    /// The signing address is neither hex (optionally 0x-prefixed) nor
    /// base64.
    #[error("signing address '{address}' is neither hex nor base64")]
    InvalidAddressEncoding {
        /// The offending address text.
        address: String,
    },
}

/// Decode a TEE signature into the byte arrays the ledger consumes.
pub fn build_submission_payload(sig: &TeeSignature) -> Result<SubmissionPayload, PayloadError> {
    let signature = BASE64.decode(sig.signature_b64.trim()).map_err(|e| {
        PayloadError::InvalidSignatureEncoding {
            detail: e.to_string(),
        }
    })?;

    let signing_address = decode_address(&sig.signing_address)?;

    Ok(SubmissionPayload {
        signed_text: sig.response_text.as_bytes().to_vec(),
        signature,
        signing_address,
    })
}

/// Decode an address: hex first (with optional `0x`), base64 fallback.
fn decode_address(address: &str) -> Result<Vec<u8>, PayloadError> {
    let trimmed = address.trim();
    let hex_body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if !hex_body.is_empty() && hex_body.len() % 2 == 0 {
        if let Ok(bytes) = hex::decode(hex_body) {
            return Ok(bytes);
        }
    }
    BASE64
        .decode(trimmed)
        .map_err(|_| PayloadError::InvalidAddressEncoding {
            address: address.to_string(),
        })
}
