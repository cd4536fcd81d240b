//! Configuration management for the persona prompt toolkit.
//!
//! Configuration is merged from, in increasing precedence:
//! - Built-in defaults
//! - The config file (`.persona/config.yaml` or `PERSONA_CONFIG`)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Persona file location relative to the workspace, used when no spec is configured.
pub const DEFAULT_SPEC_PATH: &str = "Persona/Memory.yaml";

/// Model name placed in request bodies by default.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workspace root; relative spec paths resolve against it
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Explicit persona spec path
    pub spec: Option<PathBuf>,

    /// Model identifier written into request bodies
    pub model: String,

    /// Sampling temperature written into request bodies
    pub temperature: Option<f32>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    workspace: Option<WorkspaceConfig>,
    spec: Option<SpecConfig>,
    request: Option<RequestConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpecConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RequestConfig {
    model: Option<String>,
    temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            spec: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment and the default config file.
    ///
    /// Environment variables:
    /// - `PERSONA_WORKSPACE`: Override workspace path
    /// - `PERSONA_CONFIG`: Path to config file
    /// - `PERSONA_SPEC`: Path to the persona spec
    /// - `PERSONA_MODEL`: Model identifier
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use persona_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Spec: {:?}", config.spec_path());
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Like [`AppConfig::load`], but with an explicit workspace and/or config
    /// file taking the place of the environment/default locations.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) =
            workspace.or_else(|| std::env::var("PERSONA_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        config.config_file = config_file.or_else(|| {
            std::env::var("PERSONA_CONFIG").ok().map(PathBuf::from)
        });

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.persona_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(spec) = std::env::var("PERSONA_SPEC") {
            config.spec = Some(PathBuf::from(spec));
        }

        if let Ok(model) = std::env::var("PERSONA_MODEL") {
            config.model = model;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        self.merge_yaml_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file {:?}: {}", path, e)))
    }

    fn merge_yaml_str(&self, contents: &str) -> AppResult<Self> {
        // An empty file deserializes to null rather than an empty mapping.
        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(contents)?
        };

        let mut result = self.clone();

        if let Some(path) = config_file.workspace.and_then(|ws| ws.path) {
            result.workspace = PathBuf::from(path);
        }

        if let Some(path) = config_file.spec.and_then(|spec| spec.path) {
            result.spec = Some(PathBuf::from(path));
        }

        if let Some(request) = config_file.request {
            if let Some(model) = request.model {
                result.model = model;
            }
            if request.temperature.is_some() {
                result.temperature = request.temperature;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over everything else.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        spec: Option<PathBuf>,
        model: Option<String>,
        temperature: Option<f32>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(spec) = spec {
            self.spec = Some(spec);
        }

        if let Some(model) = model {
            self.model = model;
        }

        if temperature.is_some() {
            self.temperature = temperature;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the `.persona` directory.
    pub fn persona_dir(&self) -> PathBuf {
        self.workspace.join(".persona")
    }

    /// Resolve the persona spec path.
    ///
    /// Relative paths are taken relative to the workspace root.
    pub fn spec_path(&self) -> PathBuf {
        match self.spec {
            Some(ref spec) if spec.is_absolute() => spec.clone(),
            Some(ref spec) => self.workspace.join(spec),
            None => self.workspace.join(DEFAULT_SPEC_PATH),
        }
    }

    /// Validate request-related settings.
    pub fn validate(&self) -> AppResult<()> {
        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model name cannot be empty".to_string()));
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(AppError::Config(format!(
                    "Temperature {} is out of range. Expected 0.0-2.0",
                    temperature
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.spec.is_none());
        assert!(config.temperature.is_none());
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_default_spec_path() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/srv/game");
        assert_eq!(
            config.spec_path(),
            PathBuf::from("/srv/game/Persona/Memory.yaml")
        );
    }

    #[test]
    fn test_relative_spec_path_resolves_against_workspace() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/srv/game");
        config.spec = Some(PathBuf::from("personas/guide.yaml"));
        assert_eq!(
            config.spec_path(),
            PathBuf::from("/srv/game/personas/guide.yaml")
        );
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            Some(PathBuf::from("guide.yaml")),
            Some("gpt-4o-mini".to_string()),
            Some(0.7),
            None,
            true,
            false,
        );

        assert_eq!(overridden.spec, Some(PathBuf::from("guide.yaml")));
        assert_eq!(overridden.model, "gpt-4o-mini");
        assert_eq!(overridden.temperature, Some(0.7));
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml_str() {
        let yaml = r#"
spec:
  path: Persona/Guide.yaml
request:
  model: local-model
  temperature: 0.4
logging:
  level: trace
  color: false
"#;
        let merged = AppConfig::default().merge_yaml_str(yaml).unwrap();
        assert_eq!(merged.spec, Some(PathBuf::from("Persona/Guide.yaml")));
        assert_eq!(merged.model, "local-model");
        assert_eq!(merged.temperature, Some(0.4));
        assert_eq!(merged.log_level, Some("trace".to_string()));
        assert!(merged.no_color);
    }

    #[test]
    fn test_merge_empty_yaml_keeps_defaults() {
        let merged = AppConfig::default().merge_yaml_str("").unwrap();
        assert_eq!(merged.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_merge_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "request:\n  model: from-file\n").unwrap();

        let merged = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(merged.model, "from-file");
    }

    #[test]
    fn test_merge_invalid_yaml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "request: [unclosed").unwrap();

        let result = AppConfig::default().merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_from_workspace_reads_persona_dir() {
        let temp_dir = TempDir::new().unwrap();
        let persona_dir = temp_dir.path().join(".persona");
        std::fs::create_dir_all(&persona_dir).unwrap();
        std::fs::write(
            persona_dir.join("config.yaml"),
            "request:\n  temperature: 0.3\n",
        )
        .unwrap();

        let config = AppConfig::load_from(Some(temp_dir.path().to_path_buf()), None).unwrap();
        assert_eq!(config.workspace, temp_dir.path());
        assert_eq!(config.temperature, Some(0.3));
    }

    #[test]
    fn test_load_from_missing_explicit_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load_from(
            Some(temp_dir.path().to_path_buf()),
            Some(temp_dir.path().join("absent.yaml")),
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_from_missing_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load_from(Some(temp_dir.path().join("gone")), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = AppConfig::default();
        config.temperature = Some(2.5);
        assert!(config.validate().is_err());

        config.temperature = Some(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = AppConfig::default();
        config.model = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
