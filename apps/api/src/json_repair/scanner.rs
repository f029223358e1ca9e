//! Quote-aware character scanning shared by every repair strategy.
//!
//! All structural decisions (bracket depth, stray-token filtering, trailing
//! comma removal) are made only for characters that sit outside JSON string
//! literals. Inside a string, `\` consumes the following character, so `\"`
//! and `\\"` are handled correctly.

/// Where a character sits relative to JSON string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// Structural text between string literals.
    Outside,
    /// An opening or closing `"` delimiter.
    Quote,
    /// Content of a string literal, including escape pairs.
    InString,
}

#[derive(Debug, Default)]
pub struct QuoteTracker {
    in_string: bool,
    escaped: bool,
}

impl QuoteTracker {
    pub fn classify(&mut self, c: char) -> Lexeme {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
                return Lexeme::InString;
            }
            match c {
                '\\' => {
                    self.escaped = true;
                    Lexeme::InString
                }
                '"' => {
                    self.in_string = false;
                    Lexeme::Quote
                }
                _ => Lexeme::InString,
            }
        } else if c == '"' {
            self.in_string = true;
            Lexeme::Quote
        } else {
            Lexeme::Outside
        }
    }
}

/// Byte range of a bracketed region. `end` is `None` when the region never closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: Option<usize>,
}

impl Span {
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        match self.end {
            Some(end) => &text[self.start..end],
            None => &text[self.start..],
        }
    }
}

fn closer_for(opener: char) -> char {
    match opener {
        '[' => ']',
        _ => '}',
    }
}

/// Locates the first character in `openers` and walks forward until the
/// combined depth of those brackets returns to zero.
pub fn find_span(text: &str, openers: &[char]) -> Option<Span> {
    let start = text.find(|c: char| openers.contains(&c))?;
    let closers: Vec<char> = openers.iter().map(|&o| closer_for(o)).collect();

    let mut tracker = QuoteTracker::default();
    let mut depth: usize = 0;

    for (offset, c) in text[start..].char_indices() {
        if tracker.classify(c) != Lexeme::Outside {
            continue;
        }
        if openers.contains(&c) {
            depth += 1;
        } else if closers.contains(&c) {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(Span {
                    start,
                    end: Some(start + offset + c.len_utf8()),
                });
            }
        }
    }

    Some(Span { start, end: None })
}

/// Removes markdown code fences (```json, ```).
pub fn strip_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn allowed_outside_strings(c: char) -> bool {
    matches!(
        c,
        '{' | '}' | '[' | ']' | ',' | ':' | ' ' | '\n' | '\t' | '\r' | '-' | '_' | '.' | '+'
    ) || c.is_ascii_alphanumeric()
}

/// Drops every character outside string literals that cannot appear in JSON
/// structure, numbers, or the `true`/`false`/`null` literals.
pub fn strip_stray_tokens(text: &str) -> String {
    let mut tracker = QuoteTracker::default();
    text.chars()
        .filter(|&c| match tracker.classify(c) {
            Lexeme::Outside => allowed_outside_strings(c),
            Lexeme::Quote | Lexeme::InString => true,
        })
        .collect()
}

/// Removes a `,` that is followed (after optional whitespace) by `}` or `]`.
pub fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut tracker = QuoteTracker::default();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let lexeme = tracker.classify(c);
        if lexeme == Lexeme::Outside && c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }

    out
}
