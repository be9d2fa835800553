use regex::Regex;
use std::sync::OnceLock;

fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_+.\-]*[ \t]*\r?\n?(.*?)```")
            .expect("fence pattern compiles")
    })
}

/// Returns the structured part of a model answer.
///
/// When the answer contains a back-tick fence, the trimmed text between the first opening fence
/// (and its optional language hint) and the next closing fence is returned. Otherwise the whole
/// answer is returned trimmed.
pub fn extract_structured_block(answer: &str) -> &str {
    match fence_pattern().captures(answer).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => answer.trim(),
    }
}
