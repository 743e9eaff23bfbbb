//! Best-effort extraction and repair of JSON embedded in model output.
//!
//! Completions rarely arrive as clean JSON: the model wraps the object in
//! commentary or a fence, and a token limit can cut it off mid-structure.
//! Two heuristics run before the single authoritative validation:
//!
//! 1. [`extract_candidate`] slices from the first `{` to the last `}`,
//!    assuming any non-JSON content sits strictly outside that span.
//! 2. [`close_open_delimiters`] scans the candidate with string/escape
//!    tracking, and appends the closers for whatever the model left open,
//!    innermost first.
//!
//! Neither fixes interior mismatches or trailing commas — a candidate the
//! heuristics cannot save still fails validation with a diagnostic.

/// Slice the JSON candidate out of raw model output.
///
/// The span runs from the first `{` to the last `}`, inclusive. If either
/// brace is absent the whole text is returned with surrounding whitespace
/// trimmed — there is nothing better to guess at.
pub fn extract_candidate(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => {
            text.get(start..=end).unwrap_or_else(|| text.trim())
        }
        _ => text.trim(),
    }
}

/// Close structures a truncated completion left open.
///
/// The scanner tracks string and escape state, so delimiters inside string
/// literals never count, and keeps a stack of structural `{` / `[` openers.
/// A closer pops the stack only when it matches the innermost opener;
/// interior mismatches are left for validation to reject. At the end of
/// input, an unterminated string literal is closed with `"` and the
/// remaining stack is closed innermost-first. A document truncated anywhere
/// after a complete token repairs to something parseable; a cut right after
/// `:` or `,` still fails downstream.
pub fn close_open_delimiters(candidate: &str) -> String {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in candidate.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.last() == Some(&c) {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    let mut repaired = candidate.to_string();
    if in_string {
        repaired.push('"');
    }
    while let Some(closer) = stack.pop() {
        repaired.push(closer);
    }
    repaired
}

/// Extract the JSON candidate and close its open structures.
pub fn repair(text: &str) -> String {
    close_open_delimiters(extract_candidate(text))
}
