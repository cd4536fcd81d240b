//! List command handler.

use clap::Args;
use persona_core::{AppConfig, AppResult};
use persona_prompt::list_specs;
use std::path::PathBuf;

/// List persona files next to the active spec
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Directory to search instead of the active spec's directory
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

impl ListCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing list command");

        let dir = match self.dir {
            Some(ref dir) => dir.clone(),
            None => config
                .spec_path()
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| config.workspace.clone()),
        };

        let specs = list_specs(&dir)?;
        if specs.is_empty() {
            tracing::info!("No persona files found in {:?}", dir);
        }

        for path in specs {
            println!("{}", path.display());
        }

        Ok(())
    }
}
