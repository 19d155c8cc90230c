//! Configuration file and environment sources.

pub mod global_file;
pub mod workspace_file;

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

/// `ASSETGEN_GENERATOR__DIRTY_POLICY=content` -> `generator.dirty_policy`.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("ASSETGEN")
            .prefix_separator("_")
            .separator("__"),
    )
}
