//! Unwrapping of model output that arrives inside a markdown code fence.
//!
//! Models asked for "only JSON" or "only the Dockerfile" still like to wrap
//! their answer in a fenced block and add a sentence before or after it.

use regex::Regex;
use std::sync::OnceLock;

static FENCE_RE: OnceLock<Regex> = OnceLock::new();

/// Opening fence with an optional language tag, a lazily matched body, and
/// the nearest closing fence.
fn fence_re() -> &'static Regex {
    FENCE_RE.get_or_init(|| Regex::new(r"```[a-zA-Z]*\n?((?s:.*?))\n?```").unwrap())
}

/// Return the body of the first complete fenced block in `text`, trimmed.
/// Without a fence the whole input is returned trimmed.
///
/// The match is non-greedy, so two independent blocks never merge into one
/// and a later fence never closes an earlier one.
pub fn sanitize_response(text: &str) -> &str {
    if text.is_empty() {
        return text;
    }
    match fence_re().captures(text).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().trim(),
        None => text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_unchanged() {
        assert_eq!(sanitize_response(""), "");
    }

    #[test]
    fn plain_text_is_trimmed() {
        for text in ["{\"a\": 1}", "  hello\n", "\n\nFROM ubuntu:24.04\n"] {
            assert_eq!(sanitize_response(text), text.trim());
        }
    }

    #[test]
    fn tagged_fence_is_unwrapped() {
        for body in ["{\"title\": \"x\"}", "  line one\nline two  ", "{\n  \"steps\": []\n}"] {
            let wrapped = format!("```json\n{body}\n```");
            assert_eq!(sanitize_response(&wrapped), body.trim());
        }
    }

    #[test]
    fn untagged_fence_without_trailing_newline() {
        assert_eq!(sanitize_response("```\nFROM turtorial:latest```"), "FROM turtorial:latest");
    }

    #[test]
    fn surrounding_prose_is_dropped() {
        let text = "Here is the plan you asked for:\n```json\n{\"steps\": []}\n```\nLet me know!";
        assert_eq!(sanitize_response(text), "{\"steps\": []}");
    }

    #[test]
    fn only_first_block_is_used() {
        let text = "```json\n{\"first\": true}\n```\n\nand also\n\n```json\n{\"second\": true}\n```";
        assert_eq!(sanitize_response(text), "{\"first\": true}");
    }

    #[test]
    fn unclosed_fence_falls_back_to_trim() {
        let text = "  ```json\n{\"a\": 1}\n";
        assert_eq!(sanitize_response(text), text.trim());
    }

    #[test]
    fn multiline_body_is_preserved() {
        let text = "```dockerfile\nFROM turtorial:latest\nRUN apt-get update\n\nENV X=1\n```";
        assert_eq!(
            sanitize_response(text),
            "FROM turtorial:latest\nRUN apt-get update\n\nENV X=1"
        );
    }
}
