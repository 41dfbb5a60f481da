#![deny(missing_docs)]

//! # tribune-verdict — Free-Text to Typed Resolution
//!
//! The inference service answers in prose with a JSON object embedded
//! somewhere inside it. This crate carves that object out and normalizes it
//! into the closed [`Resolution`] set, with defensive defaults for every
//! field the model might omit.
//!
//! ## Carving
//!
//! The carve is a bracket-depth scan from the first `{`, aware of JSON
//! string literals and escapes, returning the first *balanced* object
//! substring. A greedy first-`{`-to-last-`}` match would swallow trailing
//! prose that happens to contain a `}`; the depth scan cannot.
//!
//! ## Permissive by Contract
//!
//! An out-of-range `Split.freelancer_pct` is preserved as-is: the parser
//! normalizes structure, the ledger enforces bounds (via
//! [`Resolution::validate`]). No network I/O; fully deterministic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tribune_core::Resolution;

/// Errors normalizing free-text model output into a verdict.
#[derive(Debug, thiserror::Error)]
pub enum VerdictError {
    /// The model output contains no balanced JSON object at all.
    #[error("model output contains no JSON object (starts with {preview:?})")]
    NoJsonObject {
        /// Leading slice of the offending output, for diagnostics.
        preview: String,
    },

    /// A balanced brace-delimited substring was found but is not valid JSON.
    #[error("carved candidate is not valid JSON: {source}")]
    MalformedJson {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The carved JSON parsed but is not an object.
    #[error("carved JSON is not an object (got {kind})")]
    NotAnObject {
        /// The JSON type that was found instead.
        kind: &'static str,
    },
}

/// One parsed and normalized model verdict.
///
/// `raw_resolution` carries the normalized JSON value even when it does not
/// map into the closed set, so callers can log exactly what the model said;
/// `resolution` is `Some` only for the recognized variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedVerdict {
    /// Typed resolution, when the normalized value maps into the closed set.
    pub resolution: Option<Resolution>,
    /// The normalized `resolution` JSON value, whatever its shape.
    pub raw_resolution: Value,
    /// Model explanation; empty string when absent.
    pub explanation: String,
    /// Round analysis text; empty string when absent.
    pub analysis: String,
    /// Round findings text, carried into the next round's prompt; empty
    /// string when absent.
    pub findings: String,
    /// Model confidence 0..=100; defaults to 50 when absent or non-numeric.
    pub confidence: u8,
    /// Whether the model asked for another investigation round; defaults to
    /// false when absent.
    pub needs_more_analysis: bool,
    /// Remediation guidance addressed to the freelancer, when given.
    pub context_for_freelancer: Option<String>,
}

/// Locate the first balanced `{...}` object substring in `text`.
///
/// The scan tracks brace depth and skips over JSON string literals
/// (including escape sequences), so braces inside quoted text do not
/// unbalance the carve and trailing prose containing `}` is never captured.
pub fn carve_json_object(text: &str) -> Result<&str, VerdictError> {
    let no_object = || VerdictError::NoJsonObject {
        preview: text.chars().take(120).collect(),
    };

    let start = text.find('{').ok_or_else(no_object)?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    // Opening brace never closed.
    Err(no_object())
}

/// Normalize a raw `resolution` value into canonical shape.
///
/// - Case-insensitive strings `"freelancer"`, `"client"`, `"continuework"`
///   become the canonical capitalized strings.
/// - An object carrying a `Split`/`split` key becomes
///   `{"Split": {"freelancer_pct": <int>}}`, tolerating the inner key
///   variants `freelancer_pct`, `freelancerPct`, and `percentage`.
/// - Any other shape passes through unchanged.
fn normalize_resolution(raw: &Value) -> Value {
    match raw {
        Value::String(s) => match s.to_lowercase().as_str() {
            "freelancer" => Value::String("Freelancer".into()),
            "client" => Value::String("Client".into()),
            "continuework" | "continue_work" => Value::String("ContinueWork".into()),
            _ => raw.clone(),
        },
        Value::Object(map) => {
            let split = map
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("split"))
                .map(|(_, v)| v);
            match split {
                Some(inner) => {
                    let pct = split_pct(inner);
                    match pct {
                        Some(pct) => serde_json::json!({"Split": {"freelancer_pct": pct}}),
                        None => raw.clone(),
                    }
                }
                None => raw.clone(),
            }
        }
        _ => raw.clone(),
    }
}

/// Extract the freelancer percentage from a `Split` payload.
fn split_pct(inner: &Value) -> Option<i64> {
    match inner {
        // {"Split": {"freelancer_pct": 60}} and key variants.
        Value::Object(map) => map
            .iter()
            .find(|(k, _)| {
                k.eq_ignore_ascii_case("freelancer_pct")
                    || k.eq_ignore_ascii_case("freelancerpct")
                    || k.eq_ignore_ascii_case("percentage")
            })
            .and_then(|(_, v)| v.as_i64()),
        // {"Split": 60} shorthand.
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Map a normalized resolution value into the closed typed set.
fn typed_resolution(normalized: &Value) -> Option<Resolution> {
    match normalized {
        Value::String(s) => match s.as_str() {
            "Freelancer" => Some(Resolution::Freelancer),
            "Client" => Some(Resolution::Client),
            "ContinueWork" => Some(Resolution::ContinueWork),
            _ => None,
        },
        Value::Object(map) => {
            let pct = map.get("Split")?.get("freelancer_pct")?.as_i64()?;
            // Preserved permissively in raw form; typed only when it fits.
            u8::try_from(pct).ok().map(|freelancer_pct| Resolution::Split {
                freelancer_pct,
            })
        }
        _ => None,
    }
}

/// Parse raw model output into a normalized verdict.
///
/// Carves the first balanced JSON object, normalizes `resolution`, and
/// applies the defensive defaults: confidence 50 (clamped to 0..=100),
/// empty explanation, `needs_more_analysis` false, no freelancer context.
pub fn parse_verdict(text: &str) -> Result<ParsedVerdict, VerdictError> {
    let carved = carve_json_object(text)?;
    let value: Value = serde_json::from_str(carved)?;
    let map = match &value {
        Value::Object(map) => map,
        Value::Array(_) => return Err(VerdictError::NotAnObject { kind: "array" }),
        Value::String(_) => return Err(VerdictError::NotAnObject { kind: "string" }),
        Value::Number(_) => return Err(VerdictError::NotAnObject { kind: "number" }),
        Value::Bool(_) => return Err(VerdictError::NotAnObject { kind: "bool" }),
        Value::Null => return Err(VerdictError::NotAnObject { kind: "null" }),
    };

    let raw_resolution = map
        .get("resolution")
        .map(normalize_resolution)
        .unwrap_or(Value::Null);
    let resolution = typed_resolution(&raw_resolution);

    let confidence = map
        .get("confidence")
        .and_then(Value::as_f64)
        .map(|c| c.clamp(0.0, 100.0) as u8)
        .unwrap_or(50);

    let text_field = |key: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let explanation = text_field("explanation");
    let analysis = text_field("analysis");
    let findings = text_field("findings");

    let needs_more_analysis = map
        .get("needs_more_analysis")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let context_for_freelancer = map
        .get("context_for_freelancer")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ParsedVerdict {
        resolution,
        raw_resolution,
        explanation,
        analysis,
        findings,
        confidence,
        needs_more_analysis,
        context_for_freelancer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carve_ignores_trailing_prose_with_braces() {
        let text = r#"Here is my verdict: {"resolution":"Client"} and so on } done"#;
        assert_eq!(carve_json_object(text).unwrap(), r#"{"resolution":"Client"}"#);
    }

    #[test]
    fn carve_handles_nested_objects() {
        let text = r#"x {"a":{"b":{"c":1}},"d":2} y"#;
        assert_eq!(carve_json_object(text).unwrap(), r#"{"a":{"b":{"c":1}},"d":2}"#);
    }

    #[test]
    fn carve_skips_braces_inside_strings() {
        let text = r#"{"explanation":"use {curly} braces \" carefully"}"#;
        assert_eq!(carve_json_object(text).unwrap(), text);
    }

    #[test]
    fn no_braces_is_a_parse_error_never_a_default() {
        let err = parse_verdict("The freelancer deserves the funds.").unwrap_err();
        assert!(matches!(err, VerdictError::NoJsonObject { .. }));
    }

    #[test]
    fn unclosed_brace_is_a_parse_error() {
        assert!(carve_json_object(r#"{"resolution":"Client""#).is_err());
    }

    #[test]
    fn case_insensitive_resolution_strings_normalize() {
        for raw in ["freelancer", "Freelancer", "FREELANCER"] {
            let verdict =
                parse_verdict(&format!(r#"{{"resolution":"{raw}"}}"#)).unwrap();
            assert_eq!(verdict.resolution, Some(Resolution::Freelancer));
        }
        for raw in ["client", "CLIENT"] {
            let verdict =
                parse_verdict(&format!(r#"{{"resolution":"{raw}"}}"#)).unwrap();
            assert_eq!(verdict.resolution, Some(Resolution::Client));
        }
        for raw in ["continuework", "ContinueWork", "CONTINUEWORK"] {
            let verdict =
                parse_verdict(&format!(r#"{{"resolution":"{raw}"}}"#)).unwrap();
            assert_eq!(verdict.resolution, Some(Resolution::ContinueWork));
        }
    }

    #[test]
    fn split_key_variants_normalize_to_canonical_shape() {
        for body in [
            r#"{"resolution":{"Split":{"freelancer_pct":60}}}"#,
            r#"{"resolution":{"split":{"freelancerPct":60}}}"#,
            r#"{"resolution":{"SPLIT":{"percentage":60}}}"#,
            r#"{"resolution":{"Split":60}}"#,
        ] {
            let verdict = parse_verdict(body).unwrap();
            assert_eq!(
                verdict.raw_resolution,
                serde_json::json!({"Split": {"freelancer_pct": 60}}),
                "failed for {body}"
            );
            assert_eq!(verdict.resolution, Some(Resolution::Split { freelancer_pct: 60 }));
        }
    }

    #[test]
    fn out_of_range_split_preserved_but_fails_ledger_validation() {
        let verdict =
            parse_verdict(r#"{"resolution":{"Split":{"freelancer_pct":150}}}"#).unwrap();
        assert_eq!(
            verdict.raw_resolution,
            serde_json::json!({"Split": {"freelancer_pct": 150}})
        );
        // Typed variant still carries 150; the ledger-side check rejects it.
        let typed = verdict.resolution.unwrap();
        assert!(typed.validate().is_err());
    }

    #[test]
    fn unknown_resolution_shape_passes_through() {
        let verdict = parse_verdict(r#"{"resolution":"Escalate"}"#).unwrap();
        assert_eq!(verdict.resolution, None);
        assert_eq!(verdict.raw_resolution, serde_json::json!("Escalate"));
    }

    #[test]
    fn confidence_defaults_to_fifty() {
        let verdict = parse_verdict(r#"{"resolution":"Client"}"#).unwrap();
        assert_eq!(verdict.confidence, 50);
        let verdict = parse_verdict(r#"{"resolution":"Client","confidence":"high"}"#).unwrap();
        assert_eq!(verdict.confidence, 50);
    }

    #[test]
    fn confidence_is_clamped() {
        let verdict = parse_verdict(r#"{"confidence":250}"#).unwrap();
        assert_eq!(verdict.confidence, 100);
        let verdict = parse_verdict(r#"{"confidence":-5}"#).unwrap();
        assert_eq!(verdict.confidence, 0);
    }

    #[test]
    fn remaining_fields_default_as_specified() {
        let verdict = parse_verdict(r#"{"resolution":"Client"}"#).unwrap();
        assert_eq!(verdict.explanation, "");
        assert!(!verdict.needs_more_analysis);
        assert_eq!(verdict.context_for_freelancer, None);
    }

    #[test]
    fn analysis_and_findings_default_to_empty() {
        let verdict = parse_verdict(r#"{"resolution":"Client"}"#).unwrap();
        assert_eq!(verdict.analysis, "");
        assert_eq!(verdict.findings, "");
        let verdict = parse_verdict(
            r#"{"analysis":"compared deliverables","findings":"palette mismatch"}"#,
        )
        .unwrap();
        assert_eq!(verdict.analysis, "compared deliverables");
        assert_eq!(verdict.findings, "palette mismatch");
    }

    #[test]
    fn populated_fields_survive() {
        let verdict = parse_verdict(
            r#"{"resolution":"Freelancer","explanation":"delivered per brief",
               "confidence":90,"needs_more_analysis":true,
               "context_for_freelancer":"resubmit the invoice"}"#,
        )
        .unwrap();
        assert_eq!(verdict.explanation, "delivered per brief");
        assert_eq!(verdict.confidence, 90);
        assert!(verdict.needs_more_analysis);
        assert_eq!(
            verdict.context_for_freelancer.as_deref(),
            Some("resubmit the invoice")
        );
    }

    #[test]
    fn carved_array_is_not_an_object() {
        // First brace belongs to an object nested in prose about arrays;
        // a bare top-level array has no '{' at all and is NoJsonObject.
        let err = parse_verdict(r#"[1, 2, 3]"#).unwrap_err();
        assert!(matches!(err, VerdictError::NoJsonObject { .. }));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn split_round_trips_for_all_valid_percentages(pct in 1u8..=99) {
                let body = format!(
                    r#"{{"resolution":{{"Split":{{"freelancer_pct":{pct}}}}}}}"#
                );
                let verdict = parse_verdict(&body).unwrap();
                prop_assert_eq!(
                    verdict.resolution,
                    Some(Resolution::Split { freelancer_pct: pct })
                );
                prop_assert_eq!(
                    verdict.raw_resolution,
                    serde_json::json!({"Split": {"freelancer_pct": pct}})
                );
                prop_assert!(verdict.resolution.unwrap().validate().is_ok());
            }

            #[test]
            fn resolution_normalization_is_case_insensitively_idempotent(
                word in prop::sample::select(vec!["freelancer", "client", "continuework"]),
                mask in proptest::collection::vec(any::<bool>(), 12)
            ) {
                let mixed: String = word
                    .chars()
                    .zip(mask.iter().cycle())
                    .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                    .collect();
                let verdict =
                    parse_verdict(&format!(r#"{{"resolution":"{mixed}"}}"#)).unwrap();
                prop_assert!(verdict.resolution.is_some());
                // Re-normalizing the canonical output changes nothing.
                let canon = verdict.raw_resolution.as_str().unwrap().to_string();
                let again =
                    parse_verdict(&format!(r#"{{"resolution":"{canon}"}}"#)).unwrap();
                prop_assert_eq!(verdict.raw_resolution, again.raw_resolution);
            }

            #[test]
            fn prose_without_braces_always_errors(s in "[A-Za-z0-9 .,!?-]{0,200}") {
                prop_assert!(parse_verdict(&s).is_err());
            }
        }
    }
}
