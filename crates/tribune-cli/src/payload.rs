//! # Payload Subcommand
//!
//! Re-derives the ledger submission bytes from a stored investigation
//! result, for operators submitting (or re-submitting) a resolution
//! out-of-band. Output is a JSON object with hex-encoded byte fields, the
//! shape ledger tooling ingests.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tribune_core::InvestigationResult;
use tribune_pipeline::build_submission_payload;

/// Arguments for the `tribune payload` subcommand.
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Path to a stored investigation result JSON file.
    #[arg(long, value_name = "PATH")]
    pub result: PathBuf,

    /// Write the payload JSON here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Execute the payload subcommand.
///
/// Returns exit code: 0 on success, 1 on decode failure.
pub fn run_payload(args: &PayloadArgs) -> Result<u8> {
    let raw = std::fs::read_to_string(&args.result)
        .with_context(|| format!("reading result file {}", args.result.display()))?;
    let result: InvestigationResult =
        serde_json::from_str(&raw).context("result file is not a valid investigation result")?;

    let payload = build_submission_payload(&result.final_resolution.signature)
        .context("decoding TEE signature for submission")?;

    let rendered = serde_json::to_string_pretty(&serde_json::json!({
        "signed_text_hex": hex::encode(&payload.signed_text),
        "signature_hex": hex::encode(&payload.signature),
        "signing_address_hex": hex::encode(&payload.signing_address),
        "resolution": result.final_resolution.resolution,
        "explanation": result.final_resolution.analysis,
    }))?;

    match &args.out {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("writing payload to {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(0)
}
