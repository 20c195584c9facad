//! Placeholder extraction and substitution
//!
//! Placeholders are written `{{name}}`. Names are case-sensitive and trimmed.

use crate::patterns::{PLACEHOLDER_PATTERN, SUBSTITUTION_PATTERN};
use contract_types::AnswerSet;

/// Distinct placeholder names in order of first appearance
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for caps in PLACEHOLDER_PATTERN.captures_iter(template) {
        let name = caps[1].trim();
        if name.is_empty() || found.iter().any(|f| f == name) {
            continue;
        }
        found.push(name.to_string());
    }

    found
}

/// Replace every answered `{{name}}` marker with its answer
///
/// Clause activation answers (`clause_<id>`) are never substituted and
/// unanswered markers stay in the text as written. Answers are inserted raw
/// and are not scanned again for markers.
pub fn substitute_placeholders(text: &str, answers: &AnswerSet) -> String {
    SUBSTITUTION_PATTERN
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let key = &caps[1];
            answers
                .placeholder(key)
                .or_else(|| answers.placeholder(key.trim()))
                .map(str::to_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Placeholder markers still present in the text
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    extract_placeholders(text)
}
