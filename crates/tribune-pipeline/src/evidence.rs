//! Evidence collector seam.
//!
//! The encrypted evidence vault is an external collaborator: this module
//! defines the trait the pipeline consumes and the graceful-degradation
//! policy around it. A file that fails to decrypt (or is not text) is
//! skipped with a warning — the investigation proceeds with fewer evidence
//! files considered, it does not fail.

use tribune_core::{DisputeId, EvidenceText};

/// Reference to one encrypted evidence file in the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceReference {
    /// Original filename, shown in the anonymized prompt.
    pub filename: String,
    /// Vault-specific locator for the encrypted blob.
    pub locator: String,
}

/// Access to the encrypted evidence vault.
///
/// Implementations own upload/retrieval/authorization mechanics; the
/// pipeline only lists references and fetches decrypted bytes. Binary
/// evidence is the implementation's responsibility to exclude.
pub trait EvidenceCollector {
    /// Collector-specific failure type; rendered into warnings, never
    /// propagated.
    type Error: std::fmt::Display;

    /// List evidence references attached to a dispute.
    fn list_references(
        &self,
        dispute: DisputeId,
    ) -> impl std::future::Future<Output = Result<Vec<EvidenceReference>, Self::Error>> + Send;

    /// Fetch and decrypt the bytes behind one reference.
    fn fetch_decrypted(
        &self,
        reference: &EvidenceReference,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, Self::Error>> + Send;
}

/// Collector for disputes with no vault evidence (or evidence already
/// inlined in the dispute context).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvidence;

impl EvidenceCollector for NoEvidence {
    type Error = std::convert::Infallible;

    async fn list_references(
        &self,
        _dispute: DisputeId,
    ) -> Result<Vec<EvidenceReference>, Self::Error> {
        Ok(Vec::new())
    }

    async fn fetch_decrypted(
        &self,
        _reference: &EvidenceReference,
    ) -> Result<Vec<u8>, Self::Error> {
        Ok(Vec::new())
    }
}

/// Assemble evidence text for a dispute, skipping anything that fails.
///
/// Listing failures degrade to "no vault evidence"; per-file fetch/decrypt
/// failures and non-UTF-8 content skip that file. Every skip is logged
/// with `tracing::warn!`.
pub(crate) async fn assemble_evidence<C: EvidenceCollector>(
    collector: &C,
    dispute: DisputeId,
) -> Vec<EvidenceText> {
    let references = match collector.list_references(dispute).await {
        Ok(refs) => refs,
        Err(e) => {
            tracing::warn!(%dispute, "evidence listing failed, continuing without vault evidence: {e}");
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(references.len());
    for reference in &references {
        match collector.fetch_decrypted(reference).await {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => out.push(EvidenceText {
                    filename: reference.filename.clone(),
                    content,
                }),
                Err(_) => {
                    tracing::warn!(
                        filename = %reference.filename,
                        "evidence file is not text, skipping"
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    filename = %reference.filename,
                    "evidence decrypt failed, skipping: {e}"
                );
            }
        }
    }
    out
}
