//! ConfigLoader: single entry point for layered configuration loading.

use super::merge::merge_policy;
use super::sources::{self, global_file, workspace_file};
use super::AssetgenConfig;
use config::File;
use std::path::Path;

/// Loads configuration from defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global config file,
    /// `<workspace>/assetgen.toml`, `ASSETGEN_*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<AssetgenConfig, config::ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = sources::add_environment(builder);
        builder.build()?.try_deserialize()
    }

    /// Load configuration from one explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<AssetgenConfig, config::ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = sources::add_environment(builder);
        builder.build()?.try_deserialize()
    }
}
