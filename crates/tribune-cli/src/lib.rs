//! # tribune-cli — CLI Tool for the Tribune Stack
//!
//! Provides the `tribune` command-line interface for operators and for
//! wiring the pipeline into host automation.
//!
//! ## Subcommands
//!
//! - `tribune investigate` — Run a full attested investigation for a
//!   dispute described in a JSON file, against the configured TEE
//!   services.
//! - `tribune payload` — Re-derive the ledger submission payload bytes
//!   from a stored investigation result.
//!
//! Service endpoints, credentials, and the model allow-list come from the
//! `TRIBUNE_*` environment variables (see `tribune-tee-client`).

pub mod investigate;
pub mod payload;
