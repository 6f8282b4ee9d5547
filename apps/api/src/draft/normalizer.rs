//! Shape normalizer — builds a typed `CanonicalResult` from a value that
//! passed a classifier.
//!
//! Policy: lossy-but-available beats all-or-nothing. Array elements that
//! fail per-item validation are dropped (and counted) rather than rejecting
//! the whole collection; unrecognized fields are discarded. `None` comes
//! back only when nothing useful survives filtering.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::draft::canonical::{
    AlignmentReport, AlignmentStrength, AtsSummary, Bullet, BulletSet, CanonicalResult,
    CoverLetter, InterviewQuestion, PlaybookGap, PlaybookStrength, PlaybookSummary, SuggestedEdit,
    TalkingPlaybook, TalkingPoint, TalkingPoints,
};
use crate::draft::classify::{aliased_array, classify, items_look_talking, Shape};

/// Result of one normalization attempt. `dropped` counts array elements
/// discarded by per-item validation; the HTTP contract never reports it,
/// but tests observe it.
#[derive(Debug, Default)]
pub struct Normalization {
    pub result: Option<CanonicalResult>,
    pub dropped: usize,
}

/// Classifies and normalizes a decoded JSON value. `None` result when no
/// classifier matches or nothing useful survives filtering.
pub fn normalize_value(value: &Value) -> Normalization {
    match classify(value) {
        None => Normalization::default(),
        Some(Shape::Playbook) => normalize_playbook(value),
        Some(Shape::BulletsV1 | Shape::BulletsV2) => normalize_bullets(value),
        Some(Shape::TalkingPoints) => normalize_talking_points(value),
        Some(Shape::CoverLetter) => normalize_cover_letter(value),
        Some(Shape::Alignment) => normalize_alignment(value),
        Some(Shape::ItemsEnvelope) => normalize_items(value),
    }
}

fn normalize_bullets(value: &Value) -> Normalization {
    let mut dropped = 0;
    let Some(items) = value.get("bullets").and_then(Value::as_array) else {
        return Normalization::default();
    };
    let bullets: Vec<Bullet> = collect_items(items, &mut dropped);
    if bullets.is_empty() {
        return Normalization { result: None, dropped };
    }
    let ats_summary = value
        .get("ats_summary")
        .or_else(|| value.get("atsSummary"))
        .and_then(|ats| serde_json::from_value::<AtsSummary>(ats.clone()).ok());
    Normalization {
        result: Some(CanonicalResult::Bullets(BulletSet { bullets, ats_summary })),
        dropped,
    }
}

fn normalize_talking_points(value: &Value) -> Normalization {
    let mut dropped = 0;
    let Some(items) = value.get("points").and_then(Value::as_array) else {
        return Normalization::default();
    };
    let points: Vec<TalkingPoint> = collect_items(items, &mut dropped);
    if points.is_empty() {
        return Normalization { result: None, dropped };
    }
    let notes = string_list(value.get("notes"));
    Normalization {
        result: Some(CanonicalResult::TalkingPoints(TalkingPoints { points, notes })),
        dropped,
    }
}

fn normalize_playbook(value: &Value) -> Normalization {
    let mut dropped = 0;
    let Some(map) = value.as_object() else {
        return Normalization::default();
    };

    let strengths: Vec<PlaybookStrength> = map
        .get("strengths")
        .and_then(Value::as_array)
        .map(|items| collect_items(items, &mut dropped))
        .unwrap_or_default();
    let gaps: Vec<PlaybookGap> = map
        .get("gaps")
        .and_then(Value::as_array)
        .map(|items| collect_items(items, &mut dropped))
        .unwrap_or_default();
    let interview_questions: Vec<InterviewQuestion> =
        aliased_array(map, &["interview_questions", "interviewQuestions"])
            .map(|items| collect_items(items, &mut dropped))
            .unwrap_or_default();

    // A playbook with all three sections empty carries nothing to show.
    if strengths.is_empty() && gaps.is_empty() && interview_questions.is_empty() {
        return Normalization { result: None, dropped };
    }

    let summary = map
        .get("summary")
        .and_then(|s| serde_json::from_value::<PlaybookSummary>(s.clone()).ok());
    Normalization {
        result: Some(CanonicalResult::Playbook(TalkingPlaybook {
            strengths,
            gaps,
            interview_questions,
            summary,
        })),
        dropped,
    }
}

fn normalize_cover_letter(value: &Value) -> Normalization {
    let mut dropped = 0;
    let Some(map) = value.as_object() else {
        return Normalization::default();
    };
    let Some(subject) = map.get("subject").and_then(Value::as_str) else {
        return Normalization::default();
    };

    let body_paragraphs: Vec<String> = aliased_array(map, &["body_paragraphs", "bodyParagraphs"])
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item.as_str() {
                    Some(paragraph) => Some(paragraph.to_string()),
                    None => {
                        dropped += 1;
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    // A letter with no body is nothing useful.
    if body_paragraphs.is_empty() {
        return Normalization { result: None, dropped };
    }

    Normalization {
        result: Some(CanonicalResult::CoverLetter(CoverLetter {
            subject: subject.to_string(),
            greeting: string_or_empty(map.get("greeting")),
            body_paragraphs,
            valediction: string_or_empty(map.get("valediction")),
            signature: string_or_empty(map.get("signature")),
        })),
        dropped,
    }
}

fn normalize_alignment(value: &Value) -> Normalization {
    let mut dropped = 0;
    let Some(coverage) = value.get("coverage").and_then(Value::as_f64) else {
        return Normalization::default();
    };

    let strengths: Vec<AlignmentStrength> = value
        .get("strengths")
        .and_then(Value::as_array)
        .map(|items| collect_items(items, &mut dropped))
        .unwrap_or_default();
    let gaps = value
        .get("gaps")
        .and_then(Value::as_array)
        .map(|items| collect_items(items, &mut dropped))
        .unwrap_or_default();
    let suggested_edits: Option<Vec<SuggestedEdit>> = value
        .get("suggested_edits")
        .and_then(Value::as_array)
        .map(|items| collect_items(items, &mut dropped));

    // Coverage + summary are useful on their own; an empty strengths array
    // is legitimate here, unlike bullets or points.
    Normalization {
        result: Some(CanonicalResult::Alignment(AlignmentReport {
            summary: string_or_empty(value.get("summary")),
            coverage,
            strengths,
            gaps,
            missing_keywords: string_list(value.get("missing_keywords")),
            suggested_edits,
            questions_for_candidate: string_list(value.get("questions_for_candidate")),
        })),
        dropped,
    }
}

/// Normalizes the v2 `items[]` wire envelope into talking points or bullets
/// depending on the type tags present.
fn normalize_items(value: &Value) -> Normalization {
    let mut dropped = 0;
    let Some(items) = value.get("items").and_then(Value::as_array) else {
        return Normalization::default();
    };

    if items_look_talking(value) {
        let points: Vec<TalkingPoint> = collect_items(items, &mut dropped);
        if points.is_empty() {
            return Normalization { result: None, dropped };
        }
        let notes = string_list(value.get("notes"));
        return Normalization {
            result: Some(CanonicalResult::TalkingPoints(TalkingPoints { points, notes })),
            dropped,
        };
    }

    let bullets: Vec<Bullet> = collect_items(items, &mut dropped);
    if bullets.is_empty() {
        return Normalization { result: None, dropped };
    }
    let ats_summary = value
        .get("ats_summary")
        .or_else(|| value.get("atsSummary"))
        .and_then(|ats| serde_json::from_value::<AtsSummary>(ats.clone()).ok());
    Normalization {
        result: Some(CanonicalResult::Bullets(BulletSet { bullets, ats_summary })),
        dropped,
    }
}

/// Deserializes each element, dropping (and counting) the ones that fail
/// per-item validation.
fn collect_items<T: DeserializeOwned>(items: &[Value], dropped: &mut usize) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                debug!("dropping invalid element: {err}");
                *dropped += 1;
                None
            }
        })
        .collect()
}

/// Filters an optional array down to its string elements; `None` when
/// absent or nothing survives.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    let strings: Vec<String> = items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect();
    if strings.is_empty() {
        None
    } else {
        Some(strings)
    }
}

fn string_or_empty(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
