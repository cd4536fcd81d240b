//! Reading chat-completion responses.

use persona_core::{AppError, AppResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    #[serde(default)]
    message: Option<ResponseMessage>,
    #[serde(default)]
    delta: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extract `choices[0].message.content` from a response body.
pub fn extract_reply(body: &str) -> AppResult<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Llm(format!("Failed to parse chat response: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Llm("Empty choices in chat response".to_string()))?;

    Ok(choice
        .message
        .and_then(|message| message.content)
        .unwrap_or_default())
}

/// Text carried by one server-sent event line of a streamed response.
///
/// Returns `None` for non-data lines, the `[DONE]` marker, undecodable
/// payloads, and deltas without content.
pub fn stream_delta(line: &str) -> Option<String> {
    let payload = line.trim().strip_prefix("data:")?.trim();
    if payload == "[DONE]" {
        return None;
    }

    let chunk: ChatResponse = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            tracing::debug!("Skipping undecodable stream chunk: {}", e);
            return None;
        }
    };

    chunk
        .choices
        .into_iter()
        .next()?
        .delta?
        .content
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Hello there."}}]}"#;
        assert_eq!(extract_reply(body).unwrap(), "Hello there.");
    }

    #[test]
    fn test_extract_reply_errors() {
        assert!(extract_reply("not json").is_err());
        assert!(extract_reply(r#"{"choices":[]}"#).is_err());
    }

    #[test]
    fn test_stream_delta() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hel"}}]}"#;
        assert_eq!(stream_delta(line), Some("Hel".to_string()));

        assert_eq!(stream_delta("data: [DONE]"), None);
        assert_eq!(stream_delta(": keep-alive"), None);
        assert_eq!(stream_delta(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#), None);
        assert_eq!(stream_delta("data: {broken"), None);
    }
}
