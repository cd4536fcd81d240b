//! Inspect command handler.
//!
//! Shows what the parser made of the active persona spec.

use clap::Args;
use persona_core::{AppConfig, AppError, AppResult};
use persona_prompt::PromptSpec;

/// Show the parsed persona spec
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl InspectCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing inspect command");

        let spec = super::load_active_spec(config)?;

        if self.json {
            let json = serde_json::to_string_pretty(&spec)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            print!("{}", summarize(&spec));
        }

        Ok(())
    }
}

fn summarize(spec: &PromptSpec) -> String {
    let mut out = String::new();

    for (label, value) in [
        ("persona", &spec.persona),
        ("style", &spec.style),
        ("constraints", &spec.constraints),
        ("output_format", &spec.output_format),
    ] {
        let shown = if value.is_empty() { "(empty)" } else { value.as_str() };
        out.push_str(&format!("{}: {}\n", label, shown));
    }

    out.push_str(&format!("tts_friendly: {}\n", spec.tts_friendly));
    out.push_str(&format!("facts: {}\n", spec.facts.len()));
    out.push_str(&format!("stop: {}\n", spec.stop.join(", ")));
    out.push_str(&format!("few_shots: {}\n", spec.few_shots.len()));

    out
}
