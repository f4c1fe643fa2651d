//! Result Interpreter: normalizes the ATS evaluation artifact.
//!
//! The evaluation arrives as whatever the AI pipeline produced: ideally a
//! structured object, often a JSON string wrapped in a markdown fence,
//! sometimes text that is not JSON at all. Normalization is a total
//! function; the worst input degrades to a raw-text view, never an error.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Canonical form of a structured evaluation. Every field is optional;
/// absence suppresses the corresponding display section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EvaluationReport {
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub breakdown: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub missing_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub quick_wins: Option<Vec<String>>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl EvaluationReport {
    /// Collapses falsy values (zero score, empty collections, empty
    /// summary) to absent, so rendering only has `None` to check.
    fn prune(mut self) -> Self {
        if self.overall_score == Some(0.0) {
            self.overall_score = None;
        }
        if self.breakdown.as_ref().is_some_and(|m| m.is_empty()) {
            self.breakdown = None;
        }
        if self.missing_keywords.as_ref().is_some_and(|v| v.is_empty()) {
            self.missing_keywords = None;
        }
        if self.quick_wins.as_ref().is_some_and(|v| v.is_empty()) {
            self.quick_wins = None;
        }
        if self.summary.as_ref().is_some_and(|s| s.is_empty()) {
            self.summary = None;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.overall_score.is_none()
            && self.breakdown.is_none()
            && self.missing_keywords.is_none()
            && self.quick_wins.is_none()
            && self.summary.is_none()
    }
}

/// The displayable form of the evaluation artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationView {
    /// Structured record; sections render individually.
    Report(EvaluationReport),
    /// Text that could not be decoded; shown verbatim.
    RawText(String),
    /// A value that is neither text nor a usable mapping; shown as a
    /// pretty-printed dump.
    Unstructured(Value),
}

/// Normalizes the evaluation payload. First matching rule wins: an object is
/// projected directly; a string is unfenced and decoded, falling back to the
/// original text verbatim when decoding fails; anything else is dumped
/// as-is.
pub fn normalize_evaluation(raw: &Value) -> EvaluationView {
    match raw {
        Value::Object(_) => project(raw.clone()),
        Value::String(text) => {
            let cleaned = strip_json_fence(text);
            match serde_json::from_str::<Value>(cleaned.trim()) {
                Ok(decoded @ Value::Object(_)) => project(decoded),
                Ok(decoded) => EvaluationView::Unstructured(decoded),
                Err(e) => {
                    debug!("evaluation text is not structured JSON: {e}");
                    // Deliberate recovery path: keep the original text, not
                    // the partially unfenced intermediate.
                    EvaluationView::RawText(text.clone())
                }
            }
        }
        other => EvaluationView::Unstructured(other.clone()),
    }
}

/// Projects a decoded object onto the known fields, ignoring the rest. A
/// shape that cannot map (a non-numeric score, say) falls through to the
/// unstructured dump so normalization stays total.
fn project(value: Value) -> EvaluationView {
    match serde_json::from_value::<EvaluationReport>(value.clone()) {
        Ok(report) => EvaluationView::Report(report.prune()),
        Err(e) => {
            debug!("evaluation object does not match the known shape: {e}");
            EvaluationView::Unstructured(value)
        }
    }
}

/// Removes a markdown fence around a JSON payload: the first "```json"
/// opener (plus one following newline) and a trailing "```" closer. This is
/// not a general fence scanner; bare fences without the json tag are left
/// alone and fail the decode step naturally.
fn strip_json_fence(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    let Some(pos) = text.find("```json") else {
        return text;
    };
    text.replace_range(pos..pos + "```json".len(), "");
    if text[pos..].starts_with('\n') {
        text.remove(pos);
    }
    if let Some(stripped) = text.trim_end().strip_suffix("```") {
        return stripped.trim_end().to_string();
    }
    text
}
