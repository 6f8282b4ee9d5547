//! Canonical result shapes — the strongly-typed targets of normalization.
//!
//! Model output arrives in several wire dialects (v1 flat arrays, v2 `items[]`
//! envelopes, snake_case or camelCase keys). Everything normalizes into the
//! types here; serialization is always canonical snake_case, and optional
//! fields are omitted when absent so a plain v1 payload round-trips without
//! spurious v2 fields.

use serde::{Deserialize, Serialize};

/// The four artifact kinds a draft run can request. Fixed for the lifetime
/// of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Bullets,
    TalkingPoints,
    CoverLetter,
    Alignment,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Bullets => "Resume Bullets",
            TaskKind::TalkingPoints => "Talking Points",
            TaskKind::CoverLetter => "Cover Letter",
            TaskKind::Alignment => "Alignment",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bullets
// ────────────────────────────────────────────────────────────────────────────

/// A single résumé bullet. v1 payloads carry only `text` and `job_chunks`;
/// v2 payloads may add evidence, keywords, rationale, and transferable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_chunks: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transferable: Option<bool>,
}

impl Bullet {
    /// A bare text-only bullet, as produced by the line-splitting fallback.
    pub fn plain(text: impl Into<String>) -> Self {
        Bullet {
            text: text.into(),
            job_chunks: None,
            evidence: None,
            keywords: None,
            rationale: None,
            transferable: None,
        }
    }

    /// True when any v2-only field is present.
    pub fn is_rich(&self) -> bool {
        self.evidence.is_some()
            || self.keywords.is_some()
            || self.rationale.is_some()
            || self.transferable.is_some()
    }
}

/// Per-keyword ATS coverage entry: how often a keyword appears and in which
/// bullets (by index).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCoverage {
    pub keyword: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub bullets: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageDetail {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "byKeyword")]
    pub by_keyword: Option<Vec<KeywordCoverage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "coverageRate")]
    pub coverage_rate: Option<f64>,
}

impl CoverageDetail {
    /// `coverage_rate` arrives either as a 0–1 fraction or a 0–100
    /// percentage. Values ≤ 1 are fractions; the result is clamped and
    /// rounded to an integer percent for display.
    pub fn coverage_percent(&self) -> Option<u32> {
        self.coverage_rate.map(|rate| {
            let pct = if rate <= 1.0 { rate * 100.0 } else { rate };
            pct.clamp(0.0, 100.0).round() as u32
        })
    }
}

/// ATS keyword summary attached to v2 bullet payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsSummary {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "coveredKeywords"
    )]
    pub covered_keywords: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "missingKeywords"
    )]
    pub missing_keywords: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "coverageDetail"
    )]
    pub coverage_detail: Option<CoverageDetail>,
}

/// Canonical bullet list, optionally paired with an ATS summary (v2 only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletSet {
    pub bullets: Vec<Bullet>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "atsSummary")]
    pub ats_summary: Option<AtsSummary>,
}

impl BulletSet {
    /// True when the set carries v2 detail worth a card UI; plain `{text}`
    /// lists render as preformatted text instead.
    pub fn is_rich(&self) -> bool {
        self.ats_summary.is_some() || self.bullets.iter().any(Bullet::is_rich)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Talking points (v1 flat list + v2 items envelope both land here)
// ────────────────────────────────────────────────────────────────────────────

/// Recognized talking-point tags. Anything else fails per-item validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Strength,
    Emphasis,
    Reminder,
}

impl PointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointKind::Strength => "strength",
            PointKind::Emphasis => "emphasis",
            PointKind::Reminder => "reminder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkingPoint {
    pub text: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PointKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_chunks: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkingPoints {
    pub points: Vec<TalkingPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Talking playbook (v2 structured interview prep)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybookStrength {
    pub requirement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybookGap {
    pub requirement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "expectedFocus"
    )]
    pub expected_focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "answerTips")]
    pub answer_tips: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "prepExample"
    )]
    pub prep_example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybookSummary {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "overallStrengths"
    )]
    pub overall_strengths: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "overallGaps"
    )]
    pub overall_gaps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "prepFocus")]
    pub prep_focus: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkingPlaybook {
    pub strengths: Vec<PlaybookStrength>,
    pub gaps: Vec<PlaybookGap>,
    #[serde(alias = "interviewQuestions")]
    pub interview_questions: Vec<InterviewQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PlaybookSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Cover letter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetter {
    pub subject: String,
    #[serde(default)]
    pub greeting: String,
    #[serde(alias = "bodyParagraphs")]
    pub body_paragraphs: Vec<String>,
    #[serde(default)]
    pub valediction: String,
    #[serde(default)]
    pub signature: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Alignment report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStrength {
    pub requirement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_chunks: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGap {
    pub requirement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_it_matters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_edit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedEdit {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    pub after: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentReport {
    #[serde(default)]
    pub summary: String,
    /// Raw model-reported coverage. Must be a plain JSON number to classify;
    /// display goes through [`AlignmentReport::coverage_percent`].
    pub coverage: f64,
    pub strengths: Vec<AlignmentStrength>,
    #[serde(default)]
    pub gaps: Vec<AlignmentGap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_edits: Option<Vec<SuggestedEdit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_for_candidate: Option<Vec<String>>,
}

impl AlignmentReport {
    /// Coverage clamped to [0, 100] and rounded for display. Out-of-range
    /// values are clamped, not rejected.
    pub fn coverage_percent(&self) -> u32 {
        self.coverage.clamp(0.0, 100.0).round() as u32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// The tagged union + outcome pair
// ────────────────────────────────────────────────────────────────────────────

/// Canonical in-memory shape of one task's normalized output.
///
/// Serialized untagged so the wire form matches what the task API emits
/// (`{"bullets": [...]}`, `{"points": [...]}`, …). The variant order mirrors
/// classifier precedence: richer shapes first so they are not swallowed by
/// their looser supersets on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalResult {
    Playbook(TalkingPlaybook),
    Bullets(BulletSet),
    TalkingPoints(TalkingPoints),
    CoverLetter(CoverLetter),
    Alignment(AlignmentReport),
}

/// What the caller gets back: the canonical result when one was recovered,
/// plus the always-preserved raw text for literal display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub json: Option<CanonicalResult>,
    pub raw: String,
}
