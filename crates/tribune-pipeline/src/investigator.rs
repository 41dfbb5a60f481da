//! The investigation orchestrator.
//!
//! A strictly sequential state machine over rounds, bounded by the
//! policy's round cap. Round *k+1* never begins before round *k*'s
//! attestation is retrieved, because round *k+1*'s prompt embeds round
//! *k*'s findings — there is no parallel fan-out across rounds.
//!
//! Failure at any step inside a round aborts the entire investigation and
//! discards the rounds built so far; the orchestrator performs no internal
//! retries. Callers wanting retry re-invoke the whole pipeline. Callers
//! wanting hard cancellation wrap the returned future with their own
//! deadline — nothing here enforces one beyond the per-request timeout.

use chrono::Utc;

use tribune_anonymize::Anonymizer;
use tribune_core::{
    DisputeContext, InvestigationPolicy, InvestigationResult, InvestigationRound,
};
use tribune_tee_client::TeeClient;
use tribune_verdict::parse_verdict;

use crate::error::InvestigationError;
use crate::evidence::{assemble_evidence, EvidenceCollector};
use crate::prompt::{build_round_prompt, DEFAULT_INVESTIGATION_TEMPLATE};

/// Runs bounded, attested investigations against the TEE services.
///
/// One `Investigator` may serve many disputes; each `investigate` call is
/// a fully isolated pipeline instance with no shared mutable state.
#[derive(Debug, Clone)]
pub struct Investigator {
    client: TeeClient,
    policy: InvestigationPolicy,
    template: String,
}

impl Investigator {
    /// Create an investigator with the default round template.
    pub fn new(client: TeeClient, policy: InvestigationPolicy) -> Self {
        Self {
            client,
            policy,
            template: DEFAULT_INVESTIGATION_TEMPLATE.to_string(),
        }
    }

    /// Override the round template. Marker contract is documented in
    /// [`crate::prompt`].
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// The policy this investigator runs under.
    pub fn policy(&self) -> &InvestigationPolicy {
        &self.policy
    }

    /// Run one full investigation for a dispute.
    ///
    /// `prior_explanation` carries the previous run's reasoning into an
    /// appeal. `on_round` fires after each completed round, for live
    /// progress reporting; it must not fail.
    ///
    /// Sequence per round: build the prompt from all completed rounds,
    /// call inference, fetch the attestation for the returned conversation
    /// id, parse the verdict, append the round. The loop stops after the
    /// first round whose verdict does not ask for more analysis, or at the
    /// round cap, whichever comes first.
    pub async fn investigate<C, F>(
        &self,
        ctx: &DisputeContext,
        collector: &C,
        prior_explanation: Option<&str>,
        mut on_round: F,
    ) -> Result<InvestigationResult, InvestigationError>
    where
        C: EvidenceCollector,
        F: FnMut(&InvestigationRound),
    {
        // Context validation precedes every suspension point, evidence
        // listing included.
        let anonymizer = Anonymizer::for_context(ctx)?;

        let vault_evidence = assemble_evidence(collector, ctx.dispute_id).await;
        let anonymized = if vault_evidence.is_empty() {
            anonymizer.render_context(ctx, prior_explanation)
        } else {
            let mut enriched = ctx.clone();
            enriched.evidence.extend(vault_evidence);
            anonymizer.render_context(&enriched, prior_explanation)
        };

        let max_rounds = self.policy.max_rounds;
        let mut rounds: Vec<InvestigationRound> = Vec::new();

        for round_number in 1..=max_rounds {
            tracing::debug!(
                dispute = %ctx.dispute_id,
                round = round_number,
                max_rounds,
                tier = %self.policy.tier,
                "starting investigation round"
            );

            let prompt =
                build_round_prompt(&self.template, round_number, max_rounds, &rounds);

            let response = self
                .client
                .inference()
                .chat(&self.policy.model, &anonymized, &prompt)
                .await?;

            // Attestation is keyed by the conversation id of the fully
            // completed response; it must precede the next round.
            let signature = self
                .client
                .attestation()
                .fetch_signature(&response.chat_id, &self.policy.model)
                .await?;

            let verdict = parse_verdict(&response.content)?;

            let analysis = if verdict.analysis.is_empty() {
                verdict.explanation.clone()
            } else {
                verdict.analysis
            };
            let continue_loop = verdict.needs_more_analysis && round_number < max_rounds;
            let round = InvestigationRound {
                round: round_number,
                analysis,
                findings: verdict.findings,
                confidence: verdict.confidence,
                needs_more_analysis: verdict.needs_more_analysis,
                resolution: verdict.resolution,
                context_for_freelancer: verdict.context_for_freelancer,
                signature,
                recorded_at: Utc::now(),
            };

            tracing::info!(
                dispute = %ctx.dispute_id,
                round = round_number,
                confidence = round.confidence,
                needs_more = round.needs_more_analysis,
                resolution = round.resolution.map(|r| r.as_str()),
                "round completed"
            );

            rounds.push(round);
            if let Some(appended) = rounds.last() {
                on_round(appended);
            }

            if !continue_loop {
                break;
            }
        }

        Ok(InvestigationResult::from_rounds(rounds, max_rounds)?)
    }
}
