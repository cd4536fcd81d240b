//! Chat-completion request bodies.
//!
//! Bodies follow the OpenAI-compatible `/chat/completions` shape used by
//! DeepSeek and similar endpoints.

use persona_core::{AppError, AppResult};
use persona_prompt::{attach_stop, build_messages, ChatMessage, PromptSpec};
use serde::{Deserialize, Serialize};

/// Chat-completion request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "deepseek-chat")
    pub model: String,

    /// Request a server-sent event stream
    #[serde(default)]
    pub stream: bool,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Ordered conversation
    pub messages: Vec<ChatMessage>,

    /// Stop sequences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl ChatRequest {
    /// Create a new request with required fields.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            stream: false,
            temperature: None,
            messages,
            stop: None,
        }
    }

    /// Build a request from a persona spec and a transcript.
    ///
    /// With a spec, messages come from [`build_messages`] and the spec's stop
    /// sequences are attached. Without one the transcript is sent as-is.
    ///
    /// # Example
    /// ```
    /// use persona_llm::ChatRequest;
    /// use persona_prompt::parse_spec;
    ///
    /// let spec = parse_spec("persona: Mira\nstop:\n  - \"User:\"\n");
    /// let request = ChatRequest::from_spec("deepseek-chat", Some(&spec), &["user"], &["hi"])?;
    /// assert_eq!(request.messages.len(), 2);
    /// assert_eq!(request.stop, Some(vec!["User:".to_string()]));
    /// # Ok::<(), persona_core::AppError>(())
    /// ```
    pub fn from_spec<R, C>(
        model: impl Into<String>,
        spec: Option<&PromptSpec>,
        roles: &[R],
        contents: &[C],
    ) -> AppResult<Self>
    where
        R: AsRef<str>,
        C: AsRef<str>,
    {
        validate_transcript(roles, contents)?;

        let request = match spec {
            Some(spec) => Self::new(model, build_messages(spec, roles, contents))
                .with_stop(attach_stop(spec).map(<[String]>::to_vec)),
            None => {
                tracing::debug!("No persona spec available, sending transcript only");
                let messages = roles
                    .iter()
                    .zip(contents)
                    .map(|(role, content)| ChatMessage::new(role.as_ref(), content.as_ref()))
                    .collect();
                Self::new(model, messages)
            }
        };

        Ok(request)
    }

    /// Enable streaming for this request.
    pub fn with_streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set or clear the stop sequences.
    pub fn with_stop(mut self, stop: Option<Vec<String>>) -> Self {
        self.stop = stop;
        self
    }

    /// Render the request body as JSON.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render the request body as indented JSON.
    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Check that a transcript is non-empty and its roles and contents pair up.
pub fn validate_transcript<R, C>(roles: &[R], contents: &[C]) -> AppResult<()>
where
    R: AsRef<str>,
    C: AsRef<str>,
{
    if roles.is_empty() {
        return Err(AppError::Llm("Invalid messages: transcript is empty".to_string()));
    }

    if roles.len() != contents.len() {
        return Err(AppError::Llm(format!(
            "Invalid messages: {} roles but {} contents",
            roles.len(),
            contents.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_prompt::parse_spec;

    const SPEC: &str = r#"
persona: Mira
tts_friendly: false
stop:
  - "User:"
few_shots:
  - user: hi
    assistant: hello
"#;

    #[test]
    fn test_request_from_spec() {
        let spec = parse_spec(SPEC);
        let request = ChatRequest::from_spec("deepseek-chat", Some(&spec), &["user"], &["bye"])
            .unwrap()
            .with_temperature(0.7);

        assert_eq!(
            request.messages,
            vec![
                ChatMessage::system("Mira"),
                ChatMessage::user("hi"),
                ChatMessage::assistant("hello"),
                ChatMessage::user("bye"),
            ]
        );
        assert_eq!(request.stop, Some(vec!["User:".to_string()]));
        assert_eq!(request.temperature, Some(0.7));
        assert!(!request.stream);
    }

    #[test]
    fn test_fallback_without_spec() {
        let request =
            ChatRequest::from_spec("deepseek-chat", None, &["user", "assistant"], &["a", "b"])
                .unwrap();

        assert_eq!(
            request.messages,
            vec![ChatMessage::user("a"), ChatMessage::assistant("b")]
        );
        assert!(request.stop.is_none());
    }

    #[test]
    fn test_rejects_invalid_transcripts() {
        let spec = parse_spec(SPEC);
        let empty: [&str; 0] = [];

        assert!(ChatRequest::from_spec("m", Some(&spec), &empty, &empty).is_err());
        assert!(ChatRequest::from_spec("m", Some(&spec), &["user", "user"], &["a"]).is_err());
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let request = ChatRequest::new("deepseek-chat", vec![ChatMessage::user("hi")]);
        let json: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model": "deepseek-chat",
                "stream": false,
                "messages": [{ "role": "user", "content": "hi" }]
            })
        );
    }

    #[test]
    fn test_json_includes_stop_and_stream() {
        let request = ChatRequest::new("m", vec![ChatMessage::user("hi")])
            .with_streaming()
            .with_stop(Some(vec!["###".to_string()]));
        let json: serde_json::Value =
            serde_json::from_str(&request.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["stream"], serde_json::json!(true));
        assert_eq!(json["stop"], serde_json::json!(["###"]));
    }
}
