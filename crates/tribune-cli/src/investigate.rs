//! # Investigate Subcommand
//!
//! Runs the full investigation pipeline for one dispute: evidence is
//! expected inline in the dispute file (the vault collector is a host
//! integration, not a CLI concern), the TEE services come from the
//! environment, and the resulting round sequence is written as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tribune_core::{DisputeContext, InvestigationPolicy, InvestigationTier};
use tribune_pipeline::{Investigator, NoEvidence};
use tribune_tee_client::{TeeClient, TeeClientConfig};

/// Arguments for the `tribune investigate` subcommand.
#[derive(Args, Debug)]
pub struct InvestigateArgs {
    /// Path to the dispute context JSON file.
    #[arg(long, value_name = "PATH")]
    pub dispute: PathBuf,

    /// Investigation tier (controls the round cap).
    #[arg(long, value_enum, default_value_t = TierArg::Standard)]
    pub tier: TierArg,

    /// Model identifier; defaults to the first allow-listed model.
    #[arg(long)]
    pub model: Option<String>,

    /// Path to a file carrying the prior run's explanation (appeals).
    #[arg(long, value_name = "PATH")]
    pub prior_explanation: Option<PathBuf>,

    /// Write the investigation result JSON here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// CLI mirror of [`InvestigationTier`].
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum TierArg {
    /// First investigation, 3-round cap.
    Standard,
    /// Appeal re-investigation, 5-round cap.
    Appeal,
}

impl From<TierArg> for InvestigationTier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Standard => InvestigationTier::Standard,
            TierArg::Appeal => InvestigationTier::Appeal,
        }
    }
}

/// Execute the investigate subcommand.
///
/// Returns exit code: 0 on success, 1 on any investigation failure.
pub async fn run_investigate(args: &InvestigateArgs) -> Result<u8> {
    let config = TeeClientConfig::from_env().context("TEE client configuration")?;

    let raw = std::fs::read_to_string(&args.dispute)
        .with_context(|| format!("reading dispute file {}", args.dispute.display()))?;
    let ctx: DisputeContext =
        serde_json::from_str(&raw).context("dispute file is not a valid dispute context")?;

    let prior = args
        .prior_explanation
        .as_ref()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("reading prior explanation {}", path.display()))
        })
        .transpose()?;

    let tier: InvestigationTier = args.tier.into();
    let model = match &args.model {
        Some(model) => model.clone(),
        None => config
            .allow_list
            .models()
            .first()
            .cloned()
            .context("TRIBUNE_ALLOWED_MODELS is empty")?,
    };
    let policy = InvestigationPolicy::new(
        tier,
        &model,
        tier.default_round_cap(),
        &config.allow_list,
    )?;

    tracing::info!(
        dispute = %ctx.dispute_id,
        model,
        tier = %policy.tier,
        max_rounds = policy.max_rounds,
        "starting investigation"
    );

    let investigator = Investigator::new(TeeClient::new(config)?, policy);
    let result = investigator
        .investigate(&ctx, &NoEvidence, prior.as_deref(), |round| {
            tracing::info!(
                round = round.round,
                confidence = round.confidence,
                needs_more = round.needs_more_analysis,
                "round complete"
            );
        })
        .await?;

    let rendered = serde_json::to_string_pretty(&result)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing result to {}", path.display()))?;
            tracing::info!(out = %path.display(), "investigation result written");
        }
        None => println!("{rendered}"),
    }

    if let Some(resolution) = result.final_resolution.resolution {
        tracing::info!(resolution = %resolution, "final resolution");
    } else {
        tracing::warn!("final round carried no recognized resolution variant");
    }

    Ok(0)
}
