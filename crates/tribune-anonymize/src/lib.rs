#![deny(missing_docs)]

//! # tribune-anonymize — Identity Scrubbing for Model Exposure
//!
//! Deterministic textual transform that removes personally identifying
//! tokens from a dispute context before the inference service ever sees it.
//! The same input always yields the same output: no randomness, no external
//! state, no network.
//!
//! ## Transform Order
//!
//! 1. **Role substitution.** Every literal occurrence of the client's and
//!    freelancer's identity strings becomes a fixed role token — "Party A"
//!    for the client, "Party B" for the freelancer — case-insensitively.
//! 2. **Pattern scrubbing.** Remaining account-shaped identifiers, emails,
//!    phone numbers, URLs, IPv4 addresses, long hex hashes, and
//!    API-key-shaped tokens are replaced with fixed placeholder tags.
//!
//! Pattern scrubbing runs *after* role substitution, and no pattern can
//! match the role tokens themselves, so roles are never re-masked.
//!
//! Chat senders are classified binarily: a sender equal to the contract's
//! client identity renders as "Party A", anything else as "Party B". A
//! non-party sender (a future arbitrator role, say) is therefore
//! misattributed to Party B — documented behavior, kept because a third
//! role would change the prompt contract with the inference service.

use regex::Regex;

use tribune_core::{ChatMessage, DisputeContext, ValidationError};

/// Role token substituted for the client's identity.
pub const CLIENT_ROLE: &str = "Party A";

/// Role token substituted for the freelancer's identity.
pub const FREELANCER_ROLE: &str = "Party B";

/// Errors building or applying the anonymizer.
#[derive(Debug, thiserror::Error)]
pub enum AnonymizeError {
    /// The dispute context failed structural validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A scrub pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Compiled identity scrubber for one dispute's parties.
///
/// Patterns are compiled once at construction; all transform methods are
/// pure and deterministic.
#[derive(Debug)]
pub struct Anonymizer {
    client_identity: String,
    client_pattern: Regex,
    freelancer_pattern: Regex,
    scrub_passes: Vec<(Regex, &'static str)>,
}

impl Anonymizer {
    /// Compile an anonymizer for the given party identities.
    ///
    /// Identities must be non-blank; an empty identity would turn the role
    /// substitution into an everywhere-match.
    pub fn new(client_identity: &str, freelancer_identity: &str) -> Result<Self, AnonymizeError> {
        if client_identity.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "client_identity",
            }
            .into());
        }
        if freelancer_identity.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "freelancer_identity",
            }
            .into());
        }

        let literal = |id: &str| Regex::new(&format!("(?i){}", regex::escape(id)));

        // Order matters: emails before URLs (a mailto URL contains an
        // email), long hex before the generic account pass (a tx hash is
        // also a long alphanumeric run).
        let scrub_passes = vec![
            (
                Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")?,
                "[EMAIL]",
            ),
            (Regex::new(r"https?://[^\s)>\]]+")?, "[URL]"),
            (Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b")?, "[IP]"),
            (Regex::new(r"\b0x[A-Fa-f0-9]{8,}\b|\b[A-Fa-f0-9]{40,}\b")?, "[HASH]"),
            (
                Regex::new(r"\b(?:sk|pk|api|key|tok)[-_][A-Za-z0-9_-]{16,}\b")?,
                "[KEY]",
            ),
            (Regex::new(r"\+?\d[\d\s().-]{7,}\d")?, "[PHONE]"),
            (Regex::new(r"\b[A-Za-z0-9]{32,}\b")?, "[ACCOUNT]"),
        ];

        Ok(Self {
            client_identity: client_identity.to_string(),
            client_pattern: literal(client_identity)?,
            freelancer_pattern: literal(freelancer_identity)?,
            scrub_passes,
        })
    }

    /// Compile an anonymizer from a validated dispute context.
    pub fn for_context(ctx: &DisputeContext) -> Result<Self, AnonymizeError> {
        ctx.validate()?;
        Self::new(&ctx.client_identity, &ctx.freelancer_identity)
    }

    /// Apply role substitution, then pattern scrubbing, to one text block.
    pub fn scrub(&self, text: &str) -> String {
        let mut out = self
            .client_pattern
            .replace_all(text, CLIENT_ROLE)
            .into_owned();
        out = self
            .freelancer_pattern
            .replace_all(&out, FREELANCER_ROLE)
            .into_owned();
        for (pattern, tag) in &self.scrub_passes {
            out = pattern.replace_all(&out, *tag).into_owned();
        }
        out
    }

    /// Attribute a chat sender to a role token.
    ///
    /// Binary classification: equality with the client identity means
    /// "Party A"; everything else is "Party B".
    pub fn attribute_sender(&self, sender: &str) -> &'static str {
        if sender == self.client_identity {
            CLIENT_ROLE
        } else {
            FREELANCER_ROLE
        }
    }

    fn render_transcript(&self, transcript: &[ChatMessage], out: &mut String) {
        out.push_str("=== Chat Transcript ===\n");
        for msg in transcript {
            out.push_str(self.attribute_sender(&msg.sender));
            out.push_str(": ");
            out.push_str(&self.scrub(&msg.text));
            out.push('\n');
        }
    }

    /// Render the full anonymized dispute block for model consumption.
    ///
    /// `prior_explanation` carries the previous investigation's reasoning
    /// into an appeal run, scrubbed like everything else.
    pub fn render_context(
        &self,
        ctx: &DisputeContext,
        prior_explanation: Option<&str>,
    ) -> String {
        let mut out = String::new();

        out.push_str("=== Contract ===\n");
        out.push_str(&format!("Title: {}\n", self.scrub(&ctx.contract_title)));
        out.push_str(&format!(
            "Description: {}\n\n",
            self.scrub(&ctx.contract_description)
        ));

        out.push_str("=== Disputed Milestone ===\n");
        out.push_str(&format!("Title: {}\n", self.scrub(&ctx.milestone_title)));
        out.push_str(&format!(
            "Description: {}\n",
            self.scrub(&ctx.milestone_description)
        ));
        out.push_str(&format!("Amount: {}\n\n", self.scrub(&ctx.milestone_amount)));

        out.push_str("=== Dispute ===\n");
        out.push_str(&format!(
            "Raised by: {}\n",
            self.attribute_sender(&ctx.raised_by)
        ));
        out.push_str(&format!("Reason: {}\n", self.scrub(&ctx.dispute_reason)));

        if !ctx.chat_transcript.is_empty() {
            out.push('\n');
            self.render_transcript(&ctx.chat_transcript, &mut out);
        }

        for file in &ctx.evidence {
            out.push_str(&format!(
                "\n--- Evidence file: {} ---\n",
                self.scrub(&file.filename)
            ));
            out.push_str(&self.scrub(&file.content));
            out.push('\n');
        }

        if let Some(explanation) = prior_explanation {
            out.push_str("\n=== Prior Investigation Explanation ===\n");
            out.push_str(&self.scrub(explanation));
            out.push('\n');
        }

        out
    }
}

/// Validate a dispute context and render its anonymized block in one step.
///
/// This is the single entry point the pipeline uses; it fails fast with a
/// validation error before any network call can be made.
pub fn anonymize_context(
    ctx: &DisputeContext,
    prior_explanation: Option<&str>,
) -> Result<String, AnonymizeError> {
    let anonymizer = Anonymizer::for_context(ctx)?;
    Ok(anonymizer.render_context(ctx, prior_explanation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribune_core::{DisputeId, EvidenceText, MilestoneId};

    fn context() -> DisputeContext {
        DisputeContext {
            dispute_id: DisputeId::new(),
            milestone_id: MilestoneId::new(),
            contract_title: "Logo design for AcmeCorp".into(),
            contract_description: "Brand identity work ordered by alice@acme.example".into(),
            milestone_title: "Final logo delivery".into(),
            milestone_description: "Vector files uploaded to https://vault.example/files/123"
                .into(),
            milestone_amount: "1200".into(),
            dispute_reason: "Alice rejected the delivery from bob_dev".into(),
            raised_by: "alice".into(),
            client_identity: "alice".into(),
            freelancer_identity: "bob_dev".into(),
            chat_transcript: vec![
                ChatMessage {
                    sender: "alice".into(),
                    text: "The colors are wrong, bob_dev.".into(),
                },
                ChatMessage {
                    sender: "bob_dev".into(),
                    text: "They match the brief, alice. Call me at +1 (555) 123-4567.".into(),
                },
            ],
            evidence: vec![EvidenceText {
                filename: "brief.txt".into(),
                content: "Approved palette, see 0xdeadbeefcafebabe1234 on chain".into(),
            }],
        }
    }

    #[test]
    fn identities_never_survive_the_transform() {
        let out = anonymize_context(&context(), None).unwrap();
        let lowered = out.to_lowercase();
        assert!(!lowered.contains("alice"));
        assert!(!lowered.contains("bob_dev"));
        assert!(out.contains(CLIENT_ROLE));
        assert!(out.contains(FREELANCER_ROLE));
    }

    #[test]
    fn role_substitution_is_case_insensitive() {
        let anon = Anonymizer::new("Alice", "Bob").unwrap();
        assert_eq!(anon.scrub("ALICE met aLiCe"), "Party A met Party A");
    }

    #[test]
    fn emails_urls_phones_and_hashes_are_tagged() {
        let anon = Anonymizer::new("alice", "bob_dev").unwrap();
        let out = anon.scrub(
            "mail carol@example.com, see https://x.example/p, ping 10.0.0.1, \
             tx 0xdeadbeefcafebabe1234, call +44 20 7946 0958",
        );
        assert!(out.contains("[EMAIL]"));
        assert!(out.contains("[URL]"));
        assert!(out.contains("[IP]"));
        assert!(out.contains("[HASH]"));
        assert!(out.contains("[PHONE]"));
        assert!(!out.contains("carol@example.com"));
    }

    #[test]
    fn api_key_and_account_shapes_are_tagged() {
        let anon = Anonymizer::new("alice", "bob_dev").unwrap();
        let out = anon.scrub("sk_live_abcdefghijklmnop1234 and 9f8e7d6c5b4a39281716fa9b8c7d6e5f");
        assert!(out.contains("[KEY]"));
        assert!(out.contains("[ACCOUNT]") || out.contains("[HASH]"));
    }

    #[test]
    fn role_tokens_are_not_re_masked() {
        let anon = Anonymizer::new("alice", "bob_dev").unwrap();
        let out = anon.scrub("alice says hi to bob_dev");
        assert_eq!(out, "Party A says hi to Party B");
    }

    #[test]
    fn transform_is_deterministic() {
        let ctx = context();
        let a = anonymize_context(&ctx, Some("prior reasoning")).unwrap();
        let b = anonymize_context(&ctx, Some("prior reasoning")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn chat_attribution_is_binary() {
        let anon = Anonymizer::new("alice", "bob_dev").unwrap();
        assert_eq!(anon.attribute_sender("alice"), CLIENT_ROLE);
        assert_eq!(anon.attribute_sender("bob_dev"), FREELANCER_ROLE);
        // A non-party sender collapses into Party B. Documented behavior.
        assert_eq!(anon.attribute_sender("mediator"), FREELANCER_ROLE);
    }

    #[test]
    fn evidence_files_render_with_filename_headers() {
        let out = anonymize_context(&context(), None).unwrap();
        assert!(out.contains("--- Evidence file: brief.txt ---"));
    }

    #[test]
    fn prior_explanation_is_scrubbed_and_rendered() {
        let out =
            anonymize_context(&context(), Some("alice previously argued the palette"))
                .unwrap();
        assert!(out.contains("=== Prior Investigation Explanation ==="));
        assert!(out.contains("Party A previously argued"));
    }

    #[test]
    fn blank_identity_rejected_at_construction() {
        assert!(Anonymizer::new("", "bob").is_err());
        assert!(Anonymizer::new("alice", "  ").is_err());
    }

    #[test]
    fn invalid_context_fails_before_rendering() {
        let mut ctx = context();
        ctx.milestone_amount = String::new();
        assert!(anonymize_context(&ctx, None).is_err());
    }
}
