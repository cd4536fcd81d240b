//! Command handlers for the persona CLI.
//!
//! This module organizes all CLI commands into separate submodules, plus the
//! helpers they share for loading the active spec and reading transcripts.

pub mod inspect;
pub mod list;
pub mod messages;
pub mod render;
pub mod request;

// Re-export command types for convenience
pub use inspect::InspectCommand;
pub use list::ListCommand;
pub use messages::MessagesCommand;
pub use render::RenderCommand;
pub use request::RequestCommand;

use persona_core::{AppConfig, AppError, AppResult};
use persona_prompt::{load_spec, PromptSpec};

/// Load the persona spec the configuration points at.
pub(crate) fn load_active_spec(config: &AppConfig) -> AppResult<PromptSpec> {
    let path = config.spec_path();
    tracing::debug!("Active persona spec: {:?}", path);
    load_spec(&path)
}

/// Split `role:content` transcript arguments into parallel role/content lists.
pub(crate) fn parse_turns(turns: &[String]) -> AppResult<(Vec<String>, Vec<String>)> {
    let mut roles = Vec::with_capacity(turns.len());
    let mut contents = Vec::with_capacity(turns.len());

    for turn in turns {
        let (role, content) = turn
            .split_once(':')
            .map(|(role, content)| (role.trim(), content.trim_start()))
            .filter(|(role, _)| !role.is_empty())
            .ok_or_else(|| {
                AppError::Other(format!(
                    "Invalid turn '{}'. Expected 'role:content', e.g. 'user:Hello'",
                    turn
                ))
            })?;

        roles.push(role.to_string());
        contents.push(content.to_string());
    }

    Ok((roles, contents))
}
