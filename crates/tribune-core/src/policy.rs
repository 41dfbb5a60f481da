//! # Investigation Policy
//!
//! Explicit configuration passed to the orchestrator at construction.
//! Round caps and the model allow-list are *values*, not module constants,
//! so a standard-tier and an appeal-tier investigation can run side by side
//! with different limits and no global mutation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Round cap applied to standard-tier investigations.
pub const STANDARD_ROUND_CAP: u32 = 3;

/// Round cap applied to appeal-tier investigations.
pub const APPEAL_ROUND_CAP: u32 = 5;

/// The investigation tier a dispute runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationTier {
    /// First investigation of a dispute.
    Standard,
    /// Re-investigation after a party appeals.
    Appeal,
}

impl InvestigationTier {
    /// The default round cap for this tier.
    pub fn default_round_cap(&self) -> u32 {
        match self {
            Self::Standard => STANDARD_ROUND_CAP,
            Self::Appeal => APPEAL_ROUND_CAP,
        }
    }
}

impl std::fmt::Display for InvestigationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Appeal => f.write_str("appeal"),
        }
    }
}

/// Explicit allow-list of inference model identifiers.
///
/// Rejecting an unknown model is a configuration/security control, not a
/// retryable condition: an investigation against an unvetted model must
/// never be issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAllowList(Vec<String>);

impl ModelAllowList {
    /// Build an allow-list from model identifiers.
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(models.into_iter().map(Into::into).collect())
    }

    /// Check a model identifier against the list.
    pub fn check(&self, model: &str) -> Result<(), ValidationError> {
        if self.0.iter().any(|m| m == model) {
            Ok(())
        } else {
            Err(ValidationError::ModelNotAllowed {
                model: model.to_string(),
                allowed: self.0.join(", "),
            })
        }
    }

    /// The listed model identifiers.
    pub fn models(&self) -> &[String] {
        &self.0
    }
}

/// Policy for one investigation run: which model, how many rounds.
///
/// Constructed by the host per tier; the orchestrator holds it immutably
/// for the duration of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestigationPolicy {
    /// The tier this policy was built for.
    pub tier: InvestigationTier,
    /// Allow-listed model identifier to investigate with.
    pub model: String,
    /// Maximum number of rounds before the loop is forced to stop.
    pub max_rounds: u32,
}

impl InvestigationPolicy {
    /// Build a policy, checking the model against the allow-list and the
    /// round cap for sanity.
    pub fn new(
        tier: InvestigationTier,
        model: &str,
        max_rounds: u32,
        allow_list: &ModelAllowList,
    ) -> Result<Self, ValidationError> {
        allow_list.check(model)?;
        if max_rounds == 0 {
            return Err(ValidationError::ZeroRoundCap { cap: max_rounds });
        }
        Ok(Self {
            tier,
            model: model.to_string(),
            max_rounds,
        })
    }

    /// Standard-tier policy with the default round cap.
    pub fn standard(model: &str, allow_list: &ModelAllowList) -> Result<Self, ValidationError> {
        Self::new(
            InvestigationTier::Standard,
            model,
            STANDARD_ROUND_CAP,
            allow_list,
        )
    }

    /// Appeal-tier policy with the default round cap.
    pub fn appeal(model: &str, allow_list: &ModelAllowList) -> Result<Self, ValidationError> {
        Self::new(InvestigationTier::Appeal, model, APPEAL_ROUND_CAP, allow_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> ModelAllowList {
        ModelAllowList::new(["llama-3.3-70b", "deepseek-r1"])
    }

    #[test]
    fn allowed_model_accepted() {
        assert!(allow_list().check("llama-3.3-70b").is_ok());
    }

    #[test]
    fn unknown_model_rejected_with_list() {
        let err = allow_list().check("gpt-x").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("gpt-x"));
        assert!(msg.contains("deepseek-r1"));
    }

    #[test]
    fn tier_constructors_use_default_caps() {
        let std_policy = InvestigationPolicy::standard("llama-3.3-70b", &allow_list()).unwrap();
        assert_eq!(std_policy.max_rounds, STANDARD_ROUND_CAP);
        let appeal = InvestigationPolicy::appeal("deepseek-r1", &allow_list()).unwrap();
        assert_eq!(appeal.max_rounds, APPEAL_ROUND_CAP);
        assert_eq!(appeal.tier, InvestigationTier::Appeal);
    }

    #[test]
    fn policy_rejects_disallowed_model() {
        assert!(InvestigationPolicy::standard("gpt-x", &allow_list()).is_err());
    }

    #[test]
    fn policy_rejects_zero_round_cap() {
        let err =
            InvestigationPolicy::new(InvestigationTier::Standard, "deepseek-r1", 0, &allow_list())
                .unwrap_err();
        assert!(matches!(err, ValidationError::ZeroRoundCap { .. }));
    }

    #[test]
    fn two_tiers_coexist_without_global_state() {
        let list = allow_list();
        let a = InvestigationPolicy::standard("llama-3.3-70b", &list).unwrap();
        let b = InvestigationPolicy::appeal("llama-3.3-70b", &list).unwrap();
        assert_ne!(a.max_rounds, b.max_rounds);
    }
}
