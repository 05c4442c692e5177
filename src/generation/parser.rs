//! Quiz extraction from free-form model output.
//!
//! Models wrap their JSON in prose more often than not ("Sure! Here you
//! go: [...] Hope that helps."), so extraction is best-effort by design:
//! slice from the first `[` to the last `]`, parse, validate. Anything that
//! fails any step falls back to a deterministic single-item quiz — callers
//! always get at least one usable item, never an error. Isolating the
//! technique behind this module keeps it swappable for a structured-output
//! mode if the inference server grows one.

use serde::Deserialize;

use super::types::{OptionLabel, QuizItem};

/// Quiz item shape as requested from the model, before validation.
#[derive(Debug, Deserialize)]
struct RawQuizItem {
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct: String,
    #[serde(default)]
    explanation: Option<String>,
}

// ─── Extraction ──────────────────────────────────────────────────────────────

/// Extract validated quiz items from raw model text.
///
/// Validation is all-or-nothing per batch: one malformed item discards the
/// whole generation attempt and triggers the fallback. (Partial-batch
/// recovery — keep valid items, drop invalid ones — is a candidate
/// improvement, deliberately not implemented to preserve existing semantics.)
///
/// Never returns an empty vector: every failure path yields the single
/// [`fallback_quiz_item`] for `topic`.
pub fn extract_quiz_items(raw_text: &str, topic: &str) -> Vec<QuizItem> {
    match parse_quiz_batch(raw_text) {
        Some(items) if !items.is_empty() => items,
        _ => {
            tracing::warn!(topic, "quiz output unusable, returning fallback item");
            vec![fallback_quiz_item(topic)]
        }
    }
}

/// Parse and validate one quiz batch. `None` means "use the fallback".
fn parse_quiz_batch(raw_text: &str) -> Option<Vec<QuizItem>> {
    let json = extract_json_array(raw_text)?;

    let raw_items: Vec<RawQuizItem> = match serde_json::from_str(json) {
        Ok(items) => items,
        Err(e) => {
            tracing::debug!(error = %e, "quiz JSON did not parse");
            return None;
        }
    };

    raw_items.into_iter().map(validate_item).collect()
}

/// Slice from the first `[` to the last `]`, greedy across newlines.
///
/// Tolerates models that wrap the array in prose or markdown fences.
fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Validate one raw item into a [`QuizItem`].
///
/// Requires a non-empty question, exactly four options, and a correct label
/// in A–D (which then necessarily indexes one of the four options).
fn validate_item(raw: RawQuizItem) -> Option<QuizItem> {
    if raw.question.trim().is_empty() {
        tracing::debug!("quiz item rejected: empty question");
        return None;
    }

    let options: [String; 4] = match raw.options.try_into() {
        Ok(options) => options,
        Err(options) => {
            tracing::debug!(count = options.len(), "quiz item rejected: wrong option count");
            return None;
        }
    };

    let Some(correct) = OptionLabel::from_letter(&raw.correct) else {
        tracing::debug!(label = %raw.correct, "quiz item rejected: bad correct label");
        return None;
    };

    Some(QuizItem {
        question: raw.question,
        options,
        correct,
        explanation: raw.explanation,
    })
}

// ─── Fallback ────────────────────────────────────────────────────────────────

/// The deterministic substitute item used when generation or parsing fails.
///
/// Also used by the orchestrator when the availability probe fails before
/// any generation call is made.
pub fn fallback_quiz_item(topic: &str) -> QuizItem {
    QuizItem {
        question: format!("What is an important concept to understand about {topic}?"),
        options: [
            "It requires foundational knowledge".to_string(),
            "It can be learned quickly".to_string(),
            "It has no practical applications".to_string(),
            "It is only theoretical".to_string(),
        ],
        correct: OptionLabel::A,
        explanation: Some(
            "Understanding foundational concepts is crucial for mastering any topic."
                .to_string(),
        ),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
