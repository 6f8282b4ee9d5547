//! Brace-scanning JSON extraction from free-form model text.

use serde_json::Value;

/// Attempts to pull a JSON value out of text that may wrap it in prose or
/// commentary.
///
/// The widest plausible `{...}` span (first `{` to last `}`) is tried first,
/// then the whole trimmed text as a second candidate. `None` means "no JSON
/// available" — an expected outcome for model output, not an error.
pub fn extract_json(text: &str) -> Option<Value> {
    if let (Some(first), Some(last)) = (text.find('{'), text.rfind('}')) {
        if first < last {
            if let Ok(value) = serde_json::from_str(&text[first..=last]) {
                return Some(value);
            }
        }
    }
    serde_json::from_str(text.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_object_parses() {
        assert_eq!(
            extract_json(r#"{"a": 1}"#),
            Some(json!({"a": 1}))
        );
    }

    #[test]
    fn test_prose_wrapped_object_parses() {
        let text = r#"Here is the JSON you asked for: {"a": 1} — hope it helps!"#;
        assert_eq!(extract_json(text), Some(json!({"a": 1})));
    }

    #[test]
    fn test_widest_span_wins_over_inner_objects() {
        let text = r#"{"outer": {"inner": true}}"#;
        assert_eq!(
            extract_json(text),
            Some(json!({"outer": {"inner": true}}))
        );
    }

    #[test]
    fn test_plain_prose_fails() {
        assert_eq!(extract_json("The model refused to answer."), None);
    }

    #[test]
    fn test_broken_braces_fall_through_to_none() {
        // Brace span is invalid JSON and the whole text is too.
        assert_eq!(extract_json(r#"oops {"a": } oops"#), None);
    }

    #[test]
    fn test_whole_text_is_second_candidate() {
        // No braces at all, but the trimmed text is valid JSON.
        assert_eq!(extract_json("  [1, 2, 3]  "), Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_reversed_braces_ignored() {
        // Last '}' before first '{' — span is not plausible.
        assert_eq!(extract_json("} not json {"), None);
    }
}
