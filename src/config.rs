//! Configuration System
//!
//! Layered configuration for generator runs: where staged assets go, which
//! platform the build targets, how staleness is detected, and logging.
//! CLI flags are applied on top by the binary.

use crate::dirty::DirtyPolicy;
use crate::error::GeneratorError;
use crate::generator::GeneratorContext;
use crate::logging::LoggingConfig;
use crate::platform::TargetPlatform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_path, WORKSPACE_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetgenConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Deploy directory, relative to the workspace root unless absolute
    #[serde(default = "default_deploy_dir")]
    pub deploy_dir: PathBuf,

    /// Target platform; the host platform when unset
    #[serde(default)]
    pub target_platform: Option<TargetPlatform>,

    #[serde(default)]
    pub dirty_policy: DirtyPolicy,
}

fn default_deploy_dir() -> PathBuf {
    PathBuf::from("deploy")
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            deploy_dir: default_deploy_dir(),
            target_platform: None,
            dirty_policy: DirtyPolicy::default(),
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.deploy_dir.as_os_str().is_empty() {
            return Err("Deploy directory cannot be empty".to_string());
        }
        Ok(())
    }

    /// Build the context handed to generators.
    pub fn context(&self, workspace_root: &Path) -> GeneratorContext {
        let deploy_dir = if self.deploy_dir.is_absolute() {
            self.deploy_dir.clone()
        } else {
            workspace_root.join(&self.deploy_dir)
        };
        GeneratorContext {
            deploy_dir,
            target_platform: self.target_platform.unwrap_or_else(TargetPlatform::host),
            dirty_policy: self.dirty_policy,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Generator(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Generator(msg) => write!(f, "Generator: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AssetgenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.generator.validate() {
            errors.push(ValidationError::Generator(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Load and validate in one step.
    pub fn load_validated(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<Self, GeneratorError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workspace_root)?,
        };
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            GeneratorError::Config(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
