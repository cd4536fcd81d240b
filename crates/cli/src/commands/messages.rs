//! Messages command handler.
//!
//! Shows the full message sequence (system prompt, few-shot examples and the
//! given transcript) that a request would carry.

use clap::Args;
use persona_core::{AppConfig, AppError, AppResult};
use persona_prompt::{build_messages, ChatMessage};

/// Print the message sequence for a transcript
#[derive(Args, Debug)]
pub struct MessagesCommand {
    /// Transcript turns as `role:content` (e.g. "user:Hello")
    pub turns: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl MessagesCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing messages command");
        tracing::debug!("Messages options: {:?}", self);

        let (roles, contents) = super::parse_turns(&self.turns)?;
        let spec = super::load_active_spec(config)?;
        let messages = build_messages(&spec, &roles, &contents);

        if self.json {
            let json = serde_json::to_string_pretty(&messages)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            print!("{}", format_messages(&messages));
        }

        Ok(())
    }
}

/// Plain-text listing, one `[role]` header per message.
fn format_messages(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|msg| format!("[{}]\n{}\n", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_messages() {
        let messages = vec![ChatMessage::system("Be kind."), ChatMessage::user("hi")];
        assert_eq!(
            format_messages(&messages),
            "[system]\nBe kind.\n\n[user]\nhi\n"
        );
    }
}
