//! Renderer selection and plain-text formatting.
//!
//! Selection is pure and re-derivable from the outcome alone. Structured
//! views need a non-null result; bullets additionally need the v2 look for
//! the card view, otherwise they render as preformatted text. A failed
//! normalization gets a task-specific canned message, never a stack trace.

use serde::Serialize;

use crate::draft::canonical::{
    AlignmentReport, BulletSet, CanonicalResult, CoverLetter, Outcome, TalkingPlaybook,
    TalkingPoints, TaskKind,
};

/// Which presentation the consumer should use for one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderChoice {
    BulletCards,
    TalkingPointList,
    PlaybookSections,
    CoverLetterSheet,
    AlignmentDashboard,
    PlainText,
    FallbackMessage,
}

/// Chooses the presentation for one outcome.
pub fn select_renderer(outcome: &Outcome) -> RenderChoice {
    match &outcome.json {
        None => RenderChoice::FallbackMessage,
        Some(CanonicalResult::Bullets(set)) if set.is_rich() => RenderChoice::BulletCards,
        Some(CanonicalResult::Bullets(_)) => RenderChoice::PlainText,
        Some(CanonicalResult::TalkingPoints(_)) => RenderChoice::TalkingPointList,
        Some(CanonicalResult::Playbook(_)) => RenderChoice::PlaybookSections,
        Some(CanonicalResult::CoverLetter(_)) => RenderChoice::CoverLetterSheet,
        Some(CanonicalResult::Alignment(_)) => RenderChoice::AlignmentDashboard,
    }
}

/// Canned, human-readable message for a task whose output could not be
/// structured at all.
pub fn fallback_message(task: TaskKind) -> &'static str {
    match task {
        TaskKind::Bullets => {
            "Couldn't structure the generated bullets. Showing the raw output instead."
        }
        TaskKind::TalkingPoints => {
            "Couldn't structure the talking points. Showing the raw output instead."
        }
        TaskKind::CoverLetter => {
            "Couldn't structure the cover letter. Showing the raw output instead."
        }
        TaskKind::Alignment => {
            "Couldn't structure the alignment report. Showing the raw output instead."
        }
    }
}

/// Plain-text rendering of an outcome: the structured result when one
/// exists, the preserved raw text otherwise (or the canned message when
/// even that is empty).
pub fn format_outcome(task: TaskKind, outcome: &Outcome) -> String {
    match &outcome.json {
        Some(result) => format_result(result),
        None if outcome.raw.is_empty() => fallback_message(task).to_string(),
        None => outcome.raw.clone(),
    }
}

fn format_result(result: &CanonicalResult) -> String {
    match result {
        CanonicalResult::Bullets(set) => format_bullets(set),
        CanonicalResult::TalkingPoints(points) => format_points(points),
        CanonicalResult::Playbook(playbook) => format_playbook(playbook),
        CanonicalResult::CoverLetter(letter) => format_cover_letter(letter),
        CanonicalResult::Alignment(report) => format_alignment(report),
    }
}

fn format_bullets(set: &BulletSet) -> String {
    set.bullets
        .iter()
        .map(|bullet| format!("• {}{}", bullet.text, chunk_refs(&bullet.job_chunks)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_points(talking: &TalkingPoints) -> String {
    let mut lines: Vec<String> = talking
        .points
        .iter()
        .map(|point| {
            let kind = point.kind.map(|k| k.as_str()).unwrap_or("point");
            format!("• ({kind}) {}", point.text)
        })
        .collect();
    lines.extend(
        talking
            .notes
            .iter()
            .flatten()
            .map(|note| format!("note: {note}")),
    );
    lines.join("\n")
}

fn format_playbook(playbook: &TalkingPlaybook) -> String {
    let mut lines = vec!["Strengths:".to_string()];
    for strength in &playbook.strengths {
        lines.push(format!("+ {}", strength.requirement));
        if let Some(evidence) = &strength.evidence {
            lines.push(format!("  evidence: {evidence}"));
        }
        if let Some(rationale) = &strength.rationale {
            lines.push(format!("  why: {rationale}"));
        }
    }
    lines.push(String::new());
    lines.push("Gaps & Mitigations:".to_string());
    for gap in &playbook.gaps {
        lines.push(format!("- {}", gap.requirement));
        if let Some(rationale) = &gap.rationale {
            lines.push(format!("  why: {rationale}"));
        }
        if let Some(mitigation) = &gap.mitigation {
            lines.push(format!("  mitigation: {mitigation}"));
        }
    }
    lines.push(String::new());
    lines.push("Likely Interview Questions:".to_string());
    for question in &playbook.interview_questions {
        lines.push(format!("? {}", question.question));
        if let Some(focus) = &question.expected_focus {
            lines.push(format!("  focus: {focus}"));
        }
        if let Some(tips) = &question.answer_tips {
            lines.push(format!("  tips: {}", tips.join(" / ")));
        }
    }
    if let Some(summary) = &playbook.summary {
        lines.push(String::new());
        lines.push("Summary:".to_string());
        for (label, entries) in [
            ("strengths", &summary.overall_strengths),
            ("gaps", &summary.overall_gaps),
            ("prep focus", &summary.prep_focus),
        ] {
            if let Some(entries) = entries {
                lines.push(format!("  {label}: {}", entries.join(", ")));
            }
        }
    }
    lines.join("\n")
}

fn format_cover_letter(letter: &CoverLetter) -> String {
    let mut lines = vec![letter.subject.clone(), String::new()];
    if !letter.greeting.is_empty() {
        lines.push(letter.greeting.clone());
        lines.push(String::new());
    }
    lines.extend(letter.body_paragraphs.iter().cloned());
    lines.push(String::new());
    lines.push(letter.valediction.clone());
    lines.push(letter.signature.clone());
    lines.join("\n")
}

fn format_alignment(report: &AlignmentReport) -> String {
    let mut lines = vec![
        format!("Summary: {}", report.summary),
        format!("Coverage: {}%", report.coverage_percent()),
    ];
    if let Some(missing) = &report.missing_keywords {
        lines.push(format!("Missing keywords: {}", missing.join(", ")));
    }
    lines.push(String::new());
    lines.push("Strengths:".to_string());
    for strength in &report.strengths {
        let evidence = strength
            .evidence_resume
            .as_deref()
            .map(|e| format!(" ({e})"))
            .unwrap_or_default();
        lines.push(format!(
            "+ {}{evidence}{}",
            strength.requirement,
            chunk_refs(&strength.job_chunks)
        ));
    }
    lines.push(String::new());
    lines.push("Gaps:".to_string());
    for gap in &report.gaps {
        let why = gap
            .why_it_matters
            .as_deref()
            .map(|w| format!(" ({w})"))
            .unwrap_or_default();
        lines.push(format!("- {}{why}", gap.requirement));
        if let Some(edit) = &gap.suggested_edit {
            lines.push(format!("  suggested: {edit}"));
        }
    }
    if let Some(questions) = &report.questions_for_candidate {
        lines.push(String::new());
        lines.push("Questions for you:".to_string());
        for question in questions {
            lines.push(format!("? {question}"));
        }
    }
    lines.join("\n")
}

fn chunk_refs(chunks: &Option<Vec<i64>>) -> String {
    match chunks.as_deref() {
        Some(chunks) if !chunks.is_empty() => {
            let joined = chunks
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!(" [{joined}]")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::canonical::{AlignmentStrength, Bullet, PointKind, TalkingPoint};
    use crate::draft::pipeline::normalize;
    use serde_json::json;

    fn outcome_of(task: TaskKind, value: serde_json::Value) -> Outcome {
        normalize(task, value)
    }

    #[test]
    fn test_plain_bullets_get_preformatted_text_not_cards() {
        let outcome = outcome_of(
            TaskKind::Bullets,
            json!({"bullets": [{"text": "Led X", "job_chunks": [1, 2]}]}),
        );
        assert_eq!(select_renderer(&outcome), RenderChoice::PlainText);
        assert_eq!(
            format_outcome(TaskKind::Bullets, &outcome),
            "• Led X [1,2]"
        );
    }

    #[test]
    fn test_rich_bullets_get_cards() {
        let outcome = outcome_of(
            TaskKind::Bullets,
            json!({"bullets": [{"text": "Led X", "evidence": "repo"}]}),
        );
        assert_eq!(select_renderer(&outcome), RenderChoice::BulletCards);
    }

    #[test]
    fn test_structured_views_per_shape() {
        let talking = outcome_of(
            TaskKind::TalkingPoints,
            json!({"points": [{"text": "a"}]}),
        );
        assert_eq!(select_renderer(&talking), RenderChoice::TalkingPointList);

        let playbook = outcome_of(
            TaskKind::TalkingPoints,
            json!({
                "strengths": [{"requirement": "Rust"}],
                "gaps": [],
                "interview_questions": [{"question": "Why?"}]
            }),
        );
        assert_eq!(select_renderer(&playbook), RenderChoice::PlaybookSections);

        let letter = outcome_of(
            TaskKind::CoverLetter,
            json!({"subject": "Re: Role", "body_paragraphs": ["p"]}),
        );
        assert_eq!(select_renderer(&letter), RenderChoice::CoverLetterSheet);

        let alignment = outcome_of(
            TaskKind::Alignment,
            json!({"coverage": 10, "strengths": []}),
        );
        assert_eq!(select_renderer(&alignment), RenderChoice::AlignmentDashboard);
    }

    #[test]
    fn test_failed_normalization_selects_fallback_message() {
        let outcome = normalize(TaskKind::CoverLetter, "nope");
        assert_eq!(select_renderer(&outcome), RenderChoice::FallbackMessage);
        assert_eq!(
            format_outcome(TaskKind::CoverLetter, &outcome),
            "nope",
            "raw text shown when present"
        );

        let empty = Outcome {
            json: None,
            raw: String::new(),
        };
        assert_eq!(
            format_outcome(TaskKind::CoverLetter, &empty),
            fallback_message(TaskKind::CoverLetter)
        );
    }

    #[test]
    fn test_fallback_messages_are_task_specific() {
        let messages: Vec<&str> = [
            TaskKind::Bullets,
            TaskKind::TalkingPoints,
            TaskKind::CoverLetter,
            TaskKind::Alignment,
        ]
        .iter()
        .map(|task| fallback_message(*task))
        .collect();
        for window in messages.windows(2) {
            assert_ne!(window[0], window[1]);
        }
    }

    #[test]
    fn test_format_points_includes_kind_and_notes() {
        let outcome = Outcome {
            json: Some(CanonicalResult::TalkingPoints(TalkingPoints {
                points: vec![
                    TalkingPoint {
                        text: "Own the migration story".to_string(),
                        kind: Some(PointKind::Strength),
                        job_chunks: None,
                    },
                    TalkingPoint {
                        text: "Mention oncall".to_string(),
                        kind: None,
                        job_chunks: None,
                    },
                ],
                notes: Some(vec!["keep it short".to_string()]),
            })),
            raw: String::new(),
        };
        assert_eq!(
            format_outcome(TaskKind::TalkingPoints, &outcome),
            "• (strength) Own the migration story\n• (point) Mention oncall\nnote: keep it short"
        );
    }

    #[test]
    fn test_format_cover_letter_layout() {
        let outcome = outcome_of(
            TaskKind::CoverLetter,
            json!({
                "subject": "Re: Backend role",
                "greeting": "Hi Dana,",
                "body_paragraphs": ["First.", "Second."],
                "valediction": "Best,",
                "signature": "Sam"
            }),
        );
        assert_eq!(
            format_outcome(TaskKind::CoverLetter, &outcome),
            "Re: Backend role\n\nHi Dana,\n\nFirst.\nSecond.\n\nBest,\nSam"
        );
    }

    #[test]
    fn test_format_alignment_clamps_coverage_for_display() {
        let outcome = outcome_of(
            TaskKind::Alignment,
            json!({"coverage": 150, "summary": "hot", "strengths": []}),
        );
        let formatted = format_outcome(TaskKind::Alignment, &outcome);
        assert!(
            formatted.contains("Coverage: 100%"),
            "150 clamps to 100, got: {formatted}"
        );
    }

    #[test]
    fn test_format_alignment_full_report() {
        let report = AlignmentReport {
            summary: "ok".to_string(),
            coverage: 60.0,
            strengths: vec![AlignmentStrength {
                requirement: "Rust".to_string(),
                evidence_resume: Some("3 yrs".to_string()),
                job_chunks: Some(vec![0, 3]),
            }],
            gaps: vec![],
            missing_keywords: Some(vec!["grpc".to_string(), "k8s".to_string()]),
            suggested_edits: None,
            questions_for_candidate: None,
        };
        let outcome = Outcome {
            json: Some(CanonicalResult::Alignment(report)),
            raw: String::new(),
        };
        let formatted = format_outcome(TaskKind::Alignment, &outcome);
        assert!(formatted.contains("Missing keywords: grpc, k8s"));
        assert!(formatted.contains("+ Rust (3 yrs) [0,3]"));
    }

    #[test]
    fn test_format_bullets_omits_empty_chunk_refs() {
        let outcome = Outcome {
            json: Some(CanonicalResult::Bullets(BulletSet {
                bullets: vec![Bullet {
                    job_chunks: Some(vec![]),
                    ..Bullet::plain("Led X")
                }],
                ats_summary: None,
            })),
            raw: String::new(),
        };
        assert_eq!(format_outcome(TaskKind::Bullets, &outcome), "• Led X");
    }
}
