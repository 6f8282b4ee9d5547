//! Axum route handlers for the Draft Normalization API.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::draft::canonical::{CanonicalResult, Outcome, TaskKind};
use crate::draft::pipeline::{normalize_value_outcome, parse_and_classify, structure_text};
use crate::draft::render::{format_outcome, select_renderer, RenderChoice};

/// The task-API response envelope as the consumer receives it from
/// `/draft/run-form`. `output_json` is preferred; `output` and `bullets`
/// are text fallbacks (older task runs stuffed JSON, or plain lines, into
/// `bullets`).
#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub task: TaskKind,
    #[serde(default)]
    pub output_json: Option<Value>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub bullets: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub json: Option<CanonicalResult>,
    pub raw: String,
    pub view: RenderChoice,
    pub formatted: String,
}

/// POST /api/v1/draft/normalize
///
/// Normalizes one task's raw output into its canonical shape. Always 200
/// for a well-formed envelope; unstructurable output comes back as
/// `json: null` with the raw text preserved, never an HTTP error.
pub async fn handle_normalize(Json(request): Json<NormalizeRequest>) -> Json<NormalizeResponse> {
    let outcome = normalize_envelope(&request);
    let view = select_renderer(&outcome);
    let formatted = format_outcome(request.task, &outcome);
    debug!(
        task = ?request.task,
        structured = outcome.json.is_some(),
        "normalized draft output"
    );
    Json(NormalizeResponse {
        json: outcome.json,
        raw: outcome.raw,
        view,
        formatted,
    })
}

/// Resolves the envelope's candidate fields in the order the consumer does:
/// `output_json` first, then `output` as text, then `bullets` as text. The
/// line fallback applies only to the `bullets` field.
pub fn normalize_envelope(request: &NormalizeRequest) -> Outcome {
    let raw = raw_for(request);

    let mut json: Option<CanonicalResult> = None;
    if let Some(value) = &request.output_json {
        if !value.is_null() {
            json = normalize_value_outcome(value);
        }
    }
    if json.is_none() {
        if let Some(text) = &request.output {
            json = parse_and_classify(text);
        }
    }
    if json.is_none() {
        if let Some(text) = &request.bullets {
            json = structure_text(request.task, text);
        }
    }

    Outcome { json, raw }
}

/// The always-displayable raw text: the `output` string when present, a
/// pretty-printed `output_json` otherwise, then `bullets`.
fn raw_for(request: &NormalizeRequest) -> String {
    if let Some(text) = &request.output {
        return text.clone();
    }
    if let Some(value) = &request.output_json {
        if !value.is_null() {
            return crate::draft::pipeline::render_raw(value);
        }
    }
    request.bullets.clone().unwrap_or_default()
}
