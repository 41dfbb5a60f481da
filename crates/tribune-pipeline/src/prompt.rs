//! Round prompt construction.
//!
//! Substitution is purely textual — literal string replacement of three
//! markers, no templating language, no escaping. Template authors are
//! responsible for marker uniqueness.

use tribune_core::InvestigationRound;

/// Marker replaced with the current 1-based round number.
pub const ROUND_MARKER: &str = "{{ROUND}}";

/// Marker replaced with the configured round cap.
pub const MAX_ROUNDS_MARKER: &str = "{{MAX_ROUNDS}}";

/// Marker replaced with the rendered prior-round findings.
pub const PRIOR_FINDINGS_MARKER: &str = "{{PRIOR_FINDINGS}}";

/// Fixed literal rendered when no prior rounds exist, so the model never
/// receives ambiguous emptiness.
pub const FIRST_ROUND_FINDINGS: &str = "This is the first round of investigation.";

/// Default investigation round template.
///
/// Instructs the model to answer with a single JSON object in the shape
/// `tribune-verdict` normalizes.
pub const DEFAULT_INVESTIGATION_TEMPLATE: &str = "\
You are mediating a dispute over a milestone-based escrow agreement between \
Party A (the client) and Party B (the freelancer). The full dispute context \
is provided in the system message.

This is investigation round {{ROUND}} of at most {{MAX_ROUNDS}}.

Previous findings:
{{PRIOR_FINDINGS}}

Investigate the dispute and respond with exactly one JSON object with these \
fields: \"analysis\" (your reasoning this round), \"findings\" (facts \
established this round), \"confidence\" (0-100), \"needs_more_analysis\" \
(true only if another round would materially change the outcome and rounds \
remain), \"resolution\" (one of \"Freelancer\", \"Client\", \
\"ContinueWork\", or {\"Split\": {\"freelancer_pct\": N}} with N between 1 \
and 99), \"explanation\" (justification a party can read), and optionally \
\"context_for_freelancer\" (remediation guidance).";

/// Render one completed round as a labeled findings block.
fn render_round(round: &InvestigationRound) -> String {
    format!(
        "Round {} (confidence {}%):\nAnalysis: {}\nFindings: {}",
        round.round, round.confidence, round.analysis, round.findings
    )
}

/// Build the concrete prompt for the next round.
///
/// `completed` is the ordered list of previously completed rounds; when it
/// is empty the prior-findings section renders [`FIRST_ROUND_FINDINGS`]
/// rather than an empty string.
pub fn build_round_prompt(
    template: &str,
    round: u32,
    max_rounds: u32,
    completed: &[InvestigationRound],
) -> String {
    let prior = if completed.is_empty() {
        FIRST_ROUND_FINDINGS.to_string()
    } else {
        completed
            .iter()
            .map(render_round)
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    template
        .replace(ROUND_MARKER, &round.to_string())
        .replace(MAX_ROUNDS_MARKER, &max_rounds.to_string())
        .replace(PRIOR_FINDINGS_MARKER, &prior)
}
