//! Shape classifiers — pure predicates over decoded JSON.
//!
//! Classification runs independently of the requested task kind, since the
//! upstream task runner can mislabel output. Discrimination order matters:
//! richer shapes are tested before their looser supersets so a playbook is
//! never mistaken for an alignment report just because both carry
//! `strengths`.

use serde_json::{Map, Value};

/// The recognized wire shapes, in discrimination precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Playbook,
    BulletsV2,
    BulletsV1,
    TalkingPoints,
    CoverLetter,
    Alignment,
    ItemsEnvelope,
}

/// Runs the classifiers in fixed precedence and returns the first match.
pub fn classify(value: &Value) -> Option<Shape> {
    if looks_playbook(value) {
        Some(Shape::Playbook)
    } else if looks_bullets_v2(value) {
        Some(Shape::BulletsV2)
    } else if looks_bullets(value) {
        Some(Shape::BulletsV1)
    } else if looks_talking_points(value) {
        Some(Shape::TalkingPoints)
    } else if looks_cover_letter(value) {
        Some(Shape::CoverLetter)
    } else if looks_alignment(value) {
        Some(Shape::Alignment)
    } else if looks_items_envelope(value) {
        Some(Shape::ItemsEnvelope)
    } else {
        None
    }
}

/// Structured interview playbook: `strengths` and `gaps` keyed by
/// requirement plus an interview-question list (snake_case or camelCase).
pub fn looks_playbook(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };
    let Some(strengths) = map.get("strengths").and_then(Value::as_array) else {
        return false;
    };
    let Some(gaps) = map.get("gaps").and_then(Value::as_array) else {
        return false;
    };
    let Some(questions) = aliased_array(map, &["interview_questions", "interviewQuestions"])
    else {
        return false;
    };
    all_have_string(strengths, "requirement")
        && all_have_string(gaps, "requirement")
        && all_have_string(questions, "question")
}

/// Generic (v1) bullets: a `bullets` array whose elements all carry a
/// string `text`.
pub fn looks_bullets(value: &Value) -> bool {
    value
        .get("bullets")
        .and_then(Value::as_array)
        .map(|items| all_have_string(items, "text"))
        .unwrap_or(false)
}

const V2_BULLET_HINTS: [&str; 4] = ["evidence", "keywords", "rationale", "transferable"];

/// Rich (v2) bullets: a valid bullet list where at least one item carries a
/// v2-only field, or the root carries an ATS summary. Plain `{text}`-only
/// arrays stay v1.
pub fn looks_bullets_v2(value: &Value) -> bool {
    if !looks_bullets(value) {
        return false;
    }
    let has_ats = value
        .get("ats_summary")
        .or_else(|| value.get("atsSummary"))
        .map(Value::is_object)
        .unwrap_or(false);
    if has_ats {
        return true;
    }
    value
        .get("bullets")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .any(|item| V2_BULLET_HINTS.iter().any(|hint| item.get(hint).is_some()))
        })
        .unwrap_or(false)
}

/// Flat (v1) talking points: a `points` array whose elements all carry a
/// string `text`.
pub fn looks_talking_points(value: &Value) -> bool {
    value
        .get("points")
        .and_then(Value::as_array)
        .map(|items| all_have_string(items, "text"))
        .unwrap_or(false)
}

/// Cover letter: string `subject` plus a body-paragraph array.
pub fn looks_cover_letter(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };
    map.get("subject").map(Value::is_string).unwrap_or(false)
        && aliased_array(map, &["body_paragraphs", "bodyParagraphs"]).is_some()
}

/// Alignment report: numeric `coverage` plus a `strengths` array. The
/// coverage must be a plain JSON number — numeric strings do not classify.
pub fn looks_alignment(value: &Value) -> bool {
    value.get("coverage").map(Value::is_number).unwrap_or(false)
        && value.get("strengths").map(Value::is_array).unwrap_or(false)
}

/// v2 wire envelope: the payload arrives as a generic `items` array instead
/// of a shape-named field.
pub fn looks_items_envelope(value: &Value) -> bool {
    value
        .get("items")
        .and_then(Value::as_array)
        .map(|items| all_have_string(items, "text"))
        .unwrap_or(false)
}

const POINT_TAGS: [&str; 3] = ["strength", "emphasis", "reminder"];

/// Disambiguates an `items[]` envelope: talking points when any item carries
/// a recognized type tag or the root carries `notes`, bullets otherwise.
pub fn items_look_talking(value: &Value) -> bool {
    if value.get("notes").map(Value::is_array).unwrap_or(false) {
        return true;
    }
    value
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items.iter().any(|item| {
                item.get("type")
                    .and_then(Value::as_str)
                    .map(|tag| POINT_TAGS.contains(&tag))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

/// Looks up the first of `keys` that holds an array.
pub(crate) fn aliased_array<'a>(
    map: &'a Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Vec<Value>> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array))
}

fn all_have_string(items: &[Value], key: &str) -> bool {
    items
        .iter()
        .all(|item| item.get(key).map(Value::is_string).unwrap_or(false))
}
