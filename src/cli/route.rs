//! CLI route: run context and the command dispatch table.

use crate::cli::parse::{Commands, TargetArgs};
use crate::cli::presentation::{format_outcome, format_status};
use crate::config::AssetgenConfig;
use crate::error::GeneratorError;
use crate::generator::{GeneratorContext, GeneratorKind};
use crate::runner::{self, GenerateRequest};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime context for CLI execution: workspace root and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: AssetgenConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GeneratorError> {
        let config = AssetgenConfig::load_validated(&workspace_root, config_path.as_deref())?;
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn with_config(workspace_root: PathBuf, config: AssetgenConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &AssetgenConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Generator context from config, with command-line overrides applied.
    pub fn generator_context(&self, args: &TargetArgs) -> Result<GeneratorContext, GeneratorError> {
        let mut context = self.config.generator.context(&self.workspace_root);
        if let Some(ref dir) = args.deploy_dir {
            context.deploy_dir = self.workspace_root.join(dir);
        }
        if let Some(ref target) = args.target {
            context.target_platform = target.parse()?;
        }
        if let Some(ref policy) = args.dirty_policy {
            context.dirty_policy = policy.parse()?;
        }
        debug!(
            deploy_dir = %context.deploy_dir.display(),
            target_platform = %context.target_platform,
            dirty_policy = ?context.dirty_policy,
            "generator context"
        );
        Ok(context)
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, GeneratorError> {
        match command {
            Commands::Copy { target, force } => self.run(GeneratorKind::Copy, target, *force),
            Commands::Dump { target, force } => self.run(GeneratorKind::Dump, target, *force),
            Commands::Check {
                generator,
                target,
                format,
            } => {
                let kind: GeneratorKind = generator.parse()?;
                let context = self.generator_context(target)?;
                let request = GenerateRequest::new(&target.descriptor, &target.header);
                let status = runner::inspect(kind.build().as_ref(), &request, &context)?;
                format_status(&status, format)
            }
        }
    }

    fn run(
        &self,
        kind: GeneratorKind,
        target: &TargetArgs,
        force: bool,
    ) -> Result<String, GeneratorError> {
        let context = self.generator_context(target)?;
        let request = GenerateRequest::new(&target.descriptor, &target.header).force(force);
        let generator = kind.build();
        let outcome = runner::generate(generator.as_ref(), &request, &context)?;
        Ok(format_outcome(generator.name(), &outcome))
    }
}
