//! Extraction of the JSON payload from free-form model replies.

use serde::de::DeserializeOwned;

use super::error::{LlmError, LlmResult};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";
const EXCERPT_CHARS: usize = 80;

/// Return the JSON text inside a model reply.
///
/// A ```` ```json ```` fence wins over a bare fence; without fences the whole
/// reply is returned. The result is trimmed.
pub fn extract_json(reply: &str) -> &str {
    let reply = reply.trim();
    if let Some((_, rest)) = reply.split_once(JSON_FENCE) {
        return until_fence(rest);
    }
    if let Some((_, rest)) = reply.split_once(FENCE) {
        return until_fence(rest);
    }
    reply
}

fn until_fence(text: &str) -> &str {
    text.split_once(FENCE)
        .map_or(text, |(inner, _)| inner)
        .trim()
}

/// Extract and deserialize the JSON payload of a model reply.
pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> LlmResult<T> {
    let payload = extract_json(reply);
    serde_json::from_str(payload).map_err(|source| LlmError::MalformedJson {
        source,
        excerpt: payload.chars().take(EXCERPT_CHARS).collect(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn plain_json_is_returned_as_is() {
        assert_eq!(extract_json("  {\"a\": 1} \n"), "{\"a\": 1}");
    }

    #[test]
    fn json_fence_is_preferred() {
        let reply = "Here you go:\n```json\n{\"a\": 1}\n```\nAnything else?";
        assert_eq!(extract_json(reply), "{\"a\": 1}");
    }

    #[test]
    fn bare_fence_is_accepted() {
        let reply = "```\n[1, 2]\n```";
        assert_eq!(extract_json(reply), "[1, 2]");
    }

    #[test]
    fn unterminated_fence_keeps_the_tail() {
        let reply = "```json\n{\"a\": 1}";
        assert_eq!(extract_json(reply), "{\"a\": 1}");
    }

    #[test]
    fn parse_reply_decodes_fenced_payload() {
        let value: Value = parse_reply("```json\n{\"quality_score\": 90}\n```").unwrap();
        assert_eq!(value, json!({"quality_score": 90}));
    }

    #[test]
    fn parse_reply_reports_malformed_json() {
        let err = parse_reply::<Value>("I cannot do that").unwrap_err();
        match err {
            LlmError::MalformedJson { excerpt, .. } => assert_eq!(excerpt, "I cannot do that"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
