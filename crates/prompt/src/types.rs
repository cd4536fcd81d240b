//! Prompt types for the persona prompt toolkit.
//!
//! This module defines the parsed persona spec and the chat messages built
//! from it.

use serde::{Deserialize, Serialize};

/// A demonstration user/assistant exchange included ahead of the transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FewShotExample {
    /// Example user turn
    #[serde(default)]
    pub user: String,

    /// Example assistant turn
    #[serde(default)]
    pub assistant: String,
}

impl FewShotExample {
    /// Create an example from both sides of the exchange.
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }

    /// True when neither side carries any text.
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.assistant.is_empty()
    }
}

/// A persona spec parsed from a persona file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSpec {
    /// Assistant identity
    #[serde(default)]
    pub persona: String,

    /// Tone/register directive
    #[serde(default)]
    pub style: String,

    /// Behavioral constraints
    #[serde(default)]
    pub constraints: String,

    /// Desired response shape
    #[serde(default)]
    pub output_format: String,

    /// Append the speech-synthesis directive to the system prompt
    #[serde(default = "default_true")]
    pub tts_friendly: bool,

    /// Memory/context items, rendered as a numbered list
    #[serde(default)]
    pub facts: Vec<String>,

    /// Stop sequences for the downstream model call
    #[serde(default)]
    pub stop: Vec<String>,

    /// Demonstration exchanges
    #[serde(default)]
    pub few_shots: Vec<FewShotExample>,
}

fn default_true() -> bool {
    true
}

impl Default for PromptSpec {
    fn default() -> Self {
        Self {
            persona: String::new(),
            style: String::new(),
            constraints: String::new(),
            output_format: String::new(),
            tts_friendly: true,
            facts: Vec::new(),
            stop: Vec::new(),
            few_shots: Vec::new(),
        }
    }
}

/// A single role/content chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role ("system", "user", "assistant" or a caller-supplied role)
    pub role: String,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a message with an arbitrary role.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a `system` message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a `user` message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create an `assistant` message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_defaults() {
        let spec = PromptSpec::default();
        assert!(spec.persona.is_empty());
        assert!(spec.output_format.is_empty());
        assert!(spec.tts_friendly);
        assert!(spec.facts.is_empty());
        assert!(spec.stop.is_empty());
        assert!(spec.few_shots.is_empty());
    }

    #[test]
    fn test_few_shot_is_empty() {
        assert!(FewShotExample::default().is_empty());
        assert!(!FewShotExample::new("hi", "").is_empty());
        assert!(!FewShotExample::new("", "hello").is_empty());
    }

    #[test]
    fn test_chat_message_json_shape() {
        let msg = ChatMessage::assistant("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "role": "assistant", "content": "hello" })
        );
    }

    #[test]
    fn test_spec_deserialization_fills_defaults() {
        let spec: PromptSpec = serde_json::from_str(r#"{ "persona": "Guide" }"#).unwrap();
        assert_eq!(spec.persona, "Guide");
        assert!(spec.tts_friendly);
        assert!(spec.few_shots.is_empty());
    }
}
