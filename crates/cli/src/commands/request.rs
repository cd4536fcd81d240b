//! Request command handler.
//!
//! Prints the chat-completion request body for a transcript. If the persona
//! spec cannot be loaded the transcript is used on its own.

use clap::Args;
use persona_core::{AppConfig, AppResult};
use persona_llm::ChatRequest;

/// Print the chat-completion request body for a transcript
#[derive(Args, Debug)]
pub struct RequestCommand {
    /// Transcript turns as `role:content` (e.g. "user:Hello")
    #[arg(required = true)]
    pub turns: Vec<String>,

    /// Temperature for response generation (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Request a streamed response
    #[arg(long)]
    pub stream: bool,

    /// Print compact JSON instead of indented
    #[arg(long)]
    pub compact: bool,
}

impl RequestCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing request command");
        tracing::debug!("Request options: {:?}", self);

        let config = config
            .clone()
            .with_overrides(None, None, None, self.temperature, None, false, false);
        config.validate()?;

        let (roles, contents) = super::parse_turns(&self.turns)?;

        let spec = match super::load_active_spec(&config) {
            Ok(spec) => Some(spec),
            Err(e) => {
                tracing::warn!("Persona spec unavailable, sending transcript only: {}", e);
                None
            }
        };

        let mut request = ChatRequest::from_spec(&config.model, spec.as_ref(), &roles, &contents)?;

        if let Some(temperature) = config.temperature {
            request = request.with_temperature(temperature);
        }

        if self.stream {
            request = request.with_streaming();
        }

        let body = if self.compact {
            request.to_json()?
        } else {
            request.to_json_pretty()?
        };
        println!("{}", body);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_core::AppError;

    fn command(temperature: Option<f32>) -> RequestCommand {
        RequestCommand {
            turns: vec!["user:hi".to_string()],
            temperature,
            stream: false,
            compact: false,
        }
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let result = command(Some(9.0)).execute(&AppConfig::default());
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = command(Some(-0.5)).execute(&AppConfig::default());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_temperature_checked_before_transcript() {
        let mut cmd = command(Some(3.0));
        cmd.turns = vec!["not a turn".to_string()];
        let result = cmd.execute(&AppConfig::default());
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
