//! Loader for persona files on disk.

use crate::types::PromptSpec;
use persona_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Load and parse a persona file.
///
/// Only reading the file can fail; the contents themselves are parsed
/// leniently (see [`crate::parser`]).
///
/// # Example
/// ```no_run
/// use persona_prompt::load_spec;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let spec = load_spec(Path::new("Persona/Memory.yaml"))?;
/// println!("Persona: {}", spec.persona);
/// # Ok(())
/// # }
/// ```
pub fn load_spec(path: &Path) -> AppResult<PromptSpec> {
    let mut spec = PromptSpec::default();
    spec.load_from_yaml(path)?;
    Ok(spec)
}

impl PromptSpec {
    /// Reset this spec, then populate it from a persona file.
    ///
    /// On failure the spec is left in its default state.
    pub fn load_from_yaml(&mut self, path: &Path) -> AppResult<()> {
        *self = PromptSpec::default();

        tracing::debug!("Loading persona spec from: {:?}", path);

        let contents = std::fs::read_to_string(path).map_err(|e| {
            tracing::warn!("Could not read persona file {:?}: {}", path, e);
            AppError::Prompt(format!("Failed to read persona file {:?}: {}", path, e))
        })?;

        self.parse_yaml(&contents);

        tracing::info!(
            "Loaded persona spec {:?} ({} facts, {} few-shot examples)",
            path,
            self.facts.len(),
            self.few_shots.len()
        );

        Ok(())
    }
}

/// List persona files (`.yaml`/`.yml`) directly inside a directory.
///
/// A missing directory yields an empty list. Results are sorted.
pub fn list_specs(dir: &Path) -> AppResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut specs = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        if path.is_file() && is_yaml {
            specs.push(path.to_path_buf());
        }
    }

    specs.sort();
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MEMORY_YAML: &str = r#"
persona: |
  You are Mira, the museum guide.
style: "warm"
tts_friendly: false
facts:
  - "Opens at 9am"
stop:
  - "User:"
few_shots:
  - user: "Where is the cafe?"
    assistant: "Downstairs."
"#;

    #[test]
    fn test_load_valid_spec() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Memory.yaml");
        fs::write(&path, MEMORY_YAML).unwrap();

        let spec = load_spec(&path).unwrap();
        assert_eq!(spec.persona, "You are Mira, the museum guide.");
        assert_eq!(spec.style, "warm");
        assert!(!spec.tts_friendly);
        assert_eq!(spec.facts, vec!["Opens at 9am"]);
        assert_eq!(spec.stop, vec!["User:"]);
        assert_eq!(spec.few_shots.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_spec(&temp_dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_failed_load_leaves_default() {
        let temp_dir = TempDir::new().unwrap();
        let mut spec = PromptSpec::from_yaml_str("persona: P\nfacts:\n  - a\n");

        let result = spec.load_from_yaml(&temp_dir.path().join("missing.yaml"));
        assert!(result.is_err());
        assert_eq!(spec, PromptSpec::default());
    }

    #[test]
    fn test_list_specs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.yml"), "persona: B").unwrap();
        fs::write(temp_dir.path().join("a.yaml"), "persona: A").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::create_dir(temp_dir.path().join("nested.yaml")).unwrap();

        let specs = list_specs(temp_dir.path()).unwrap();
        let names: Vec<_> = specs
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.yml"]);
    }

    #[test]
    fn test_list_specs_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let specs = list_specs(&temp_dir.path().join("Persona")).unwrap();
        assert!(specs.is_empty());
    }
}
