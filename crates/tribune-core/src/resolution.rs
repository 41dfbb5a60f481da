//! # Resolution Variants
//!
//! The closed set of outcomes an investigation can produce. The parser in
//! `tribune-verdict` is deliberately permissive about out-of-range split
//! percentages (the model is not trusted to stay in bounds); callers that
//! submit to the ledger must run [`Resolution::validate`] first — the ledger
//! is the enforcement point, not the parser.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The outcome of a dispute investigation.
///
/// Exactly one variant is active per round outcome. `Split` percentages are
/// freelancer-side: `freelancer_pct: 70` releases 70% of the milestone to
/// the freelancer and refunds 30% to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Release the milestone amount to the freelancer.
    Freelancer,
    /// Refund the milestone amount to the client.
    Client,
    /// No release yet; the freelancer should continue working.
    ContinueWork,
    /// Split the milestone between the parties.
    Split {
        /// Percentage of the milestone released to the freelancer.
        freelancer_pct: u8,
    },
}

impl Resolution {
    /// Validate ledger-side invariants.
    ///
    /// `Split.freelancer_pct` must lie in `1..=99`; 0 and 100 are the
    /// `Client`/`Freelancer` variants, and anything else is a parsing or
    /// model defect that must not reach the ledger.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Split { freelancer_pct } if !(1..=99).contains(freelancer_pct) => {
                Err(ValidationError::SplitOutOfRange {
                    pct: *freelancer_pct,
                })
            }
            _ => Ok(()),
        }
    }

    /// The canonical string name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freelancer => "Freelancer",
            Self::Client => "Client",
            Self::ContinueWork => "ContinueWork",
            Self::Split { .. } => "Split",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Split { freelancer_pct } => write!(f, "Split({freelancer_pct}%)"),
            other => f.write_str(other.as_str()),
        }
    }
}
