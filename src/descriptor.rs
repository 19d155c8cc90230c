//! Generator descriptors
//!
//! A descriptor is the YAML file a generator processes. It is parsed once
//! into an immutable [`Descriptor`]; everything that depends on the build
//! (target platform, deploy directory) is resolved separately into
//! [`DescriptorOptions`].

use crate::error::GeneratorError;
use crate::platform::TargetPlatform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-platform overrides under `options.<platform>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOptions {
    /// Subdirectory of the deploy directory to copy into.
    #[serde(default)]
    pub dst_dir: Option<String>,
}

/// Parsed descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Source files, relative to the source root.
    pub files: Vec<String>,

    /// Optional subdirectory of the descriptor's directory holding the sources.
    #[serde(default)]
    pub root: Option<String>,

    /// Platform name -> overrides.
    #[serde(default)]
    pub options: BTreeMap<String, PlatformOptions>,
}

/// Directories a descriptor resolves to for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorOptions {
    /// Directory the listed files are read from.
    pub src_root: PathBuf,
    /// Directory the listed files are written to (copy generator only).
    pub dst_dir: PathBuf,
}

impl Descriptor {
    /// Read and parse a descriptor file.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GeneratorError::MissingInput(path.to_path_buf())
            } else {
                GeneratorError::io(path, e)
            }
        })?;
        Self::parse(path, &text)
    }

    /// Parse descriptor text; `path` is only used for error locations.
    pub fn parse(path: &Path, text: &str) -> Result<Self, GeneratorError> {
        let descriptor: Descriptor =
            serde_yaml::from_str(text).map_err(|e| GeneratorError::yaml(path, &e))?;
        descriptor.validate(path)?;
        Ok(descriptor)
    }

    fn validate(&self, path: &Path) -> Result<(), GeneratorError> {
        for (index, file) in self.files.iter().enumerate() {
            let rel = Path::new(file);
            if file.is_empty() || rel.is_absolute() {
                return Err(GeneratorError::Parse {
                    file: path.to_path_buf(),
                    line: 1,
                    message: format!(
                        "files[{}]: expected a non-empty relative path, got '{}'",
                        index, file
                    ),
                });
            }
        }
        Ok(())
    }

    /// Source root: the descriptor's directory, joined with `root` when declared.
    pub fn source_root(&self, descriptor_path: &Path) -> PathBuf {
        let base = descriptor_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        match self.root.as_deref() {
            Some(root) if !root.is_empty() => base.join(root),
            _ => base,
        }
    }

    /// Overrides that apply to `platform`, if the descriptor has any.
    pub fn platform_options(&self, platform: TargetPlatform) -> Option<&PlatformOptions> {
        platform
            .option_keys()
            .iter()
            .find_map(|key| self.options.get(*key))
    }

    /// Destination directory: `deploy_dir`, joined with the platform's `dst_dir` override.
    pub fn destination_dir(&self, deploy_dir: &Path, platform: TargetPlatform) -> PathBuf {
        match self
            .platform_options(platform)
            .and_then(|o| o.dst_dir.as_deref())
        {
            Some(sub) if !sub.is_empty() => deploy_dir.join(sub),
            _ => deploy_dir.to_path_buf(),
        }
    }

    /// Resolve both directories for one invocation.
    pub fn resolve(
        &self,
        descriptor_path: &Path,
        deploy_dir: &Path,
        platform: TargetPlatform,
    ) -> DescriptorOptions {
        DescriptorOptions {
            src_root: self.source_root(descriptor_path),
            dst_dir: self.destination_dir(deploy_dir, platform),
        }
    }

    /// Absolute paths of every listed source file.
    pub fn source_paths(&self, options: &DescriptorOptions) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(|f| crate::dirty::path::absolute(&options.src_root.join(f)))
            .collect()
    }
}
