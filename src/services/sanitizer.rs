//! Text sanitation for extracted metadata.
//!
//! Page markup routinely carries hard line breaks inside titles and
//! descriptions; every string headed for a `Bookmark` field passes through
//! `sanitize` first.

/// Normalizes extracted text: each run of CR/LF characters collapses to a
/// single space, then leading and trailing whitespace is trimmed.
///
/// `None` (no value extracted) yields the empty string. Idempotent:
/// `sanitize(Some(&sanitize(x)))` equals `sanitize(x)`.
pub fn sanitize(input: Option<&str>) -> String {
    let Some(text) = input else {
        return String::new();
    };

    let mut normalized = String::with_capacity(text.len());
    let mut in_break = false;
    for ch in text.chars() {
        if ch == '\r' || ch == '\n' {
            if !in_break {
                normalized.push(' ');
                in_break = true;
            }
        } else {
            normalized.push(ch);
            in_break = false;
        }
    }
    normalized.trim().to_string()
}
