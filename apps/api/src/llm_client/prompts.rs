// Shared prompt fragments and prompt-building utilities.
// Each feature module keeps its own prompts.rs; this file holds what they share.

/// Closing instruction for prompts that expect a single JSON object.
pub const JSON_OBJECT_ONLY: &str = "Return ONLY the JSON object, nothing else. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Closing instruction for prompts that expect a JSON array.
pub const JSON_ARRAY_ONLY: &str = "Return ONLY the JSON array, nothing else. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a system preamble and a user message into one prompt.
/// Vertex AI receives both as a single user turn.
pub fn compose(system: &str, user: &str) -> String {
    format!("{system}\n\n{user}")
}

/// Pretty JSON for embedding resume data in a prompt.
pub fn pretty_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
}
