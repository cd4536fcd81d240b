//! Render command handler.
//!
//! Prints the system prompt built from the active persona spec.

use clap::Args;
use persona_core::{AppConfig, AppResult};
use persona_prompt::build_system_prompt;

/// Print the system prompt for the active persona spec
#[derive(Args, Debug)]
pub struct RenderCommand {}

impl RenderCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing render command");

        let spec = super::load_active_spec(config)?;
        println!("{}", build_system_prompt(&spec));

        Ok(())
    }
}
