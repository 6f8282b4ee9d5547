//! The normalize entry point — fence strip → brace scan → classify →
//! line fallback.
//!
//! Pure and synchronous: no I/O, no shared state, same outcome for the same
//! `(task, raw)` every time. Every failure mode degrades to `json: None`
//! with the raw text preserved so the caller always has something to show.

use serde_json::Value;
use tracing::debug;

use crate::draft::canonical::{CanonicalResult, Outcome, TaskKind};
use crate::draft::extract::extract_json;
use crate::draft::fallback::{lines_to_bullets, looks_like_code};
use crate::draft::fences::strip_fences;
use crate::draft::normalizer::normalize_value;

/// One task's raw output as it arrives from the task API: absent, free
/// text, or already decoded by the transport layer.
#[derive(Debug, Clone)]
pub enum RawOutput {
    Absent,
    Text(String),
    Value(Value),
}

impl From<Option<String>> for RawOutput {
    fn from(text: Option<String>) -> Self {
        match text {
            Some(text) => RawOutput::Text(text),
            None => RawOutput::Absent,
        }
    }
}

impl From<&str> for RawOutput {
    fn from(text: &str) -> Self {
        RawOutput::Text(text.to_string())
    }
}

impl From<Value> for RawOutput {
    fn from(value: Value) -> Self {
        RawOutput::Value(value)
    }
}

/// Normalizes one task's raw output into an `Outcome`.
///
/// Absent or null input is an immediate `None` with empty raw text. An
/// already-decoded value skips straight to classification (a string value
/// re-enters the text path). Text runs the full pipeline.
pub fn normalize(task: TaskKind, raw: impl Into<RawOutput>) -> Outcome {
    match raw.into() {
        RawOutput::Absent | RawOutput::Value(Value::Null) => Outcome {
            json: None,
            raw: String::new(),
        },
        RawOutput::Value(Value::String(text)) => normalize_text(task, text),
        RawOutput::Value(value) => {
            let raw = render_raw(&value);
            Outcome {
                json: normalize_value_outcome(&value),
                raw,
            }
        }
        RawOutput::Text(text) => normalize_text(task, text),
    }
}

/// Classifies an already-decoded value, logging any elements dropped by
/// per-item validation.
pub(crate) fn normalize_value_outcome(value: &Value) -> Option<CanonicalResult> {
    let normalization = normalize_value(value);
    if normalization.dropped > 0 {
        debug!(dropped = normalization.dropped, "dropped invalid elements");
    }
    normalization.result
}

fn normalize_text(task: TaskKind, text: String) -> Outcome {
    let json = structure_text(task, &text);
    Outcome { json, raw: text }
}

/// Full text pipeline including the bullets-only line fallback.
pub(crate) fn structure_text(task: TaskKind, text: &str) -> Option<CanonicalResult> {
    match extract_json(strip_fences(text)) {
        // JSON was extracted: its classification is final. A JSON payload
        // that fits no shape does not get the line fallback.
        Some(value) => normalize_value_outcome(&value),
        None if task == TaskKind::Bullets && !looks_like_code(text) => {
            lines_to_bullets(text).map(CanonicalResult::Bullets)
        }
        None => None,
    }
}

/// Fence strip → brace scan → classify, with no line fallback. Used for
/// envelope fields where degrading to pseudo-bullets is not wanted.
pub(crate) fn parse_and_classify(text: &str) -> Option<CanonicalResult> {
    extract_json(strip_fences(text)).and_then(|value| normalize_value_outcome(&value))
}

/// Best-effort stringification of a non-string payload for literal display.
pub(crate) fn render_raw(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "(no output)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::canonical::Bullet;
    use serde_json::json;

    #[test]
    fn test_well_formed_v1_bullets_round_trip() {
        let raw = r#"{"bullets":[{"text":"Led X"},{"text":"Built Y","job_chunks":[1,2]}]}"#;
        let outcome = normalize(TaskKind::Bullets, raw);
        assert_eq!(outcome.raw, raw);
        let Some(CanonicalResult::Bullets(set)) = outcome.json else {
            panic!("expected bullets");
        };
        assert_eq!(
            set.bullets,
            vec![
                Bullet::plain("Led X"),
                Bullet {
                    job_chunks: Some(vec![1, 2]),
                    ..Bullet::plain("Built Y")
                },
            ],
            "exact round trip, no spurious v2 fields"
        );
    }

    #[test]
    fn test_fenced_alignment_json_recovered() {
        let raw = "```json\n{\"coverage\": 72, \"summary\":\"ok\",\"strengths\":[]}\n```";
        let outcome = normalize(TaskKind::Alignment, raw);
        let Some(CanonicalResult::Alignment(report)) = outcome.json else {
            panic!("expected alignment");
        };
        assert_eq!(report.coverage_percent(), 72);
        assert_eq!(report.summary, "ok");
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn test_prose_wrapped_json_recovered() {
        let raw = "Sure! Here's your letter:\n{\"subject\":\"Re: Role\",\"greeting\":\"Hi\",\"body_paragraphs\":[\"I build.\"],\"valediction\":\"Best\",\"signature\":\"Sam\"}\nLet me know!";
        let outcome = normalize(TaskKind::CoverLetter, raw);
        let Some(CanonicalResult::CoverLetter(letter)) = outcome.json else {
            panic!("expected cover letter");
        };
        assert_eq!(letter.subject, "Re: Role");
    }

    #[test]
    fn test_line_fallback_only_for_bullets_task() {
        let raw = "- First thing\n• Second thing\n\n";

        let bullets = normalize(TaskKind::Bullets, raw);
        let Some(CanonicalResult::Bullets(set)) = bullets.json else {
            panic!("expected fallback bullets");
        };
        assert_eq!(
            set.bullets,
            vec![Bullet::plain("First thing"), Bullet::plain("Second thing")]
        );

        let alignment = normalize(TaskKind::Alignment, raw);
        assert!(alignment.json.is_none(), "no fallback for non-bullet tasks");
        assert_eq!(alignment.raw, raw);
    }

    #[test]
    fn test_no_fallback_when_json_was_extracted_but_unclassifiable() {
        // Parses as JSON, fits no shape: final answer is None even for
        // the bullets task.
        let raw = "- note\n{\"unrelated\": true}";
        let outcome = normalize(TaskKind::Bullets, raw);
        assert!(outcome.json.is_none());
    }

    #[test]
    fn test_broken_json_text_gets_no_fallback() {
        // Starts with '{' so it is broken JSON, not line-oriented text.
        let raw = "{\"bullets\": [";
        let outcome = normalize(TaskKind::Bullets, raw);
        assert!(outcome.json.is_none());
        assert_eq!(outcome.raw, raw);
    }

    #[test]
    fn test_unrecoverable_prose_is_none_for_every_task() {
        // Not JSON and not glyphed lines: nothing to structure.
        let raw = "The model refused to answer.";
        for task in [
            TaskKind::Bullets,
            TaskKind::TalkingPoints,
            TaskKind::CoverLetter,
            TaskKind::Alignment,
        ] {
            let outcome = normalize(task, raw);
            assert!(outcome.json.is_none(), "{task:?} must not structure prose");
            assert_eq!(outcome.raw, raw);
        }
    }

    #[test]
    fn test_absent_and_null_inputs() {
        let outcome = normalize(TaskKind::Bullets, RawOutput::Absent);
        assert!(outcome.json.is_none());
        assert_eq!(outcome.raw, "");

        let outcome = normalize(TaskKind::Alignment, json!(null));
        assert!(outcome.json.is_none());
        assert_eq!(outcome.raw, "");
    }

    #[test]
    fn test_decoded_value_skips_text_pipeline() {
        let value = json!({"points": [{"text": "Lead with impact", "type": "emphasis"}]});
        let outcome = normalize(TaskKind::TalkingPoints, value.clone());
        assert!(matches!(
            outcome.json,
            Some(CanonicalResult::TalkingPoints(_))
        ));
        assert_eq!(
            outcome.raw,
            serde_json::to_string_pretty(&value).unwrap(),
            "raw is the pretty-printed payload"
        );
    }

    #[test]
    fn test_string_value_reenters_text_path() {
        let value = json!("```json\n{\"bullets\":[{\"text\":\"a\"}]}\n```");
        let outcome = normalize(TaskKind::Bullets, value);
        assert!(matches!(outcome.json, Some(CanonicalResult::Bullets(_))));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let raw = "```json\n{\"coverage\": 150, \"summary\":\"hot\",\"strengths\":[]}\n```";
        let first = normalize(TaskKind::Alignment, raw);
        let second = normalize(TaskKind::Alignment, raw);
        assert_eq!(first, second, "same input, same outcome");
    }
}
