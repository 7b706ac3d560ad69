//! Stage 4 — claim classification, spec.md §4.C9.
//!
//! Regex heuristics over chunk content; first match wins, checked in
//! this order: definition → method → result → limitation → unknown.

use std::sync::LazyLock;

use regex::Regex;

pub use noema_core::model::chunk::ClaimType;

static DEFINITION_STARTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(is|means|refers to)\b").unwrap());
static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)definition|defined as").unwrap());
// `mechanism(s)` is folded into the method bucket alongside the spec's
// literal keyword list: prose that names an attention/gating/whatever
// *mechanism* is describing a method just as much as prose that names
// an "algorithm" or "technique" (see scenario S4 in DESIGN.md).
static METHOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)method|algorithm|approach|technique|mechanism|how to|implement|calculate").unwrap());
static RESULT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)result|showed|demonstrated|proved|conclus").unwrap());
static LIMITATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)limitation|however|\bbut\b|fail").unwrap());

/// Classify a chunk's content into the claim taxonomy, per the fixed
/// priority order above.
pub fn classify(content: &str) -> ClaimType {
    if DEFINITION_RE.is_match(content) || DEFINITION_STARTS_RE.is_match(content) {
        ClaimType::Definition
    } else if METHOD_RE.is_match(content) {
        ClaimType::Method
    } else if RESULT_RE.is_match(content) {
        ClaimType::Result
    } else if LIMITATION_RE.is_match(content) {
        ClaimType::Limitation
    } else {
        ClaimType::Unknown
    }
}
