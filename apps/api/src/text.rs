//! Free-text normalization applied before resume and JD text reaches a prompt.

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans raw resume text for extraction.
pub fn clean_resume_text(text: &str) -> String {
    normalize_whitespace(text)
}

/// Truncates `text` to at most `max_chars` characters, appending `...`.
///
/// When a space falls within the last 10% of the kept window the cut moves back
/// to it so words are not split.
pub fn truncate_for_prompt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();

    if let Some(last_space) = truncated.rfind(' ') {
        let char_pos = truncated[..last_space].chars().count();
        if char_pos as f64 > max_chars as f64 * 0.9 {
            truncated.truncate(last_space);
        }
    }

    truncated.push_str("...");
    truncated
}

/// First paragraph of the raw resume, used as the "current summary".
/// The first 300 characters are kept as written; a blank slice is `None`.
pub fn leading_paragraph(text: &str) -> Option<String> {
    let first: String = text.split("\n\n").next()?.chars().take(300).collect();
    if first.trim().is_empty() {
        return None;
    }
    Some(first)
}

/// Shortens `text` for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
