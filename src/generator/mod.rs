//! Generators
//!
//! A generator turns one descriptor into a set of output artifacts. Each
//! generator carries a version that is stamped into its header; bumping it
//! invalidates every output produced by older versions.

pub mod copy;
pub mod dump;

pub use copy::CopyGenerator;
pub use dump::DumpGenerator;

use crate::descriptor::{Descriptor, DescriptorOptions};
use crate::dirty::{DirtyPolicy, Marker};
use crate::error::GeneratorError;
use crate::platform::TargetPlatform;
use crate::types::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Build settings passed explicitly into every generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorContext {
    /// Directory staged assets are copied into.
    pub deploy_dir: PathBuf,
    pub target_platform: TargetPlatform,
    pub dirty_policy: DirtyPolicy,
}

impl Default for GeneratorContext {
    fn default() -> Self {
        Self {
            deploy_dir: PathBuf::from("deploy"),
            target_platform: TargetPlatform::host(),
            dirty_policy: DirtyPolicy::Mtime,
        }
    }
}

/// A file to write and its full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Overwrite the target, creating missing parent directories.
    pub fn write(&self) -> Result<(), GeneratorError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
            }
        }
        fs::write(&self.path, &self.contents).map_err(|e| GeneratorError::io(&self.path, e))
    }
}

/// One descriptor resolved against a context.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Absolute descriptor path.
    pub descriptor_path: PathBuf,
    pub descriptor: Descriptor,
    pub options: DescriptorOptions,
    /// Generated header the build system tracks.
    pub header: PathBuf,
}

impl Invocation {
    /// Load and resolve a descriptor. Fails with `Parse` on malformed YAML.
    pub fn load(
        descriptor_path: &Path,
        header: &Path,
        context: &GeneratorContext,
    ) -> Result<Self, GeneratorError> {
        let descriptor_path = crate::dirty::path::absolute(descriptor_path);
        let descriptor = Descriptor::load(&descriptor_path)?;
        let options = descriptor.resolve(
            &descriptor_path,
            &context.deploy_dir,
            context.target_platform,
        );
        Ok(Self {
            descriptor_path,
            descriptor,
            options,
            header: crate::dirty::path::absolute(header),
        })
    }

    /// Absolute paths of the listed source files.
    pub fn sources(&self) -> Vec<PathBuf> {
        self.descriptor.source_paths(&self.options)
    }
}

/// A generator: name, format version, and the transform from descriptor to artifacts.
pub trait Generator {
    fn name(&self) -> &'static str;

    fn version(&self) -> Version;

    /// Files whose change makes the outputs stale: the descriptor, then every source.
    fn inputs(&self, invocation: &Invocation) -> Vec<PathBuf> {
        let mut inputs = vec![invocation.descriptor_path.clone()];
        inputs.extend(invocation.sources());
        inputs
    }

    /// Every file the generator writes.
    fn outputs(&self, invocation: &Invocation) -> Vec<PathBuf>;

    /// Outputs that carry the version marker. Other outputs only count for
    /// existence and modification time.
    fn stamped_outputs(&self, invocation: &Invocation) -> Vec<PathBuf> {
        vec![invocation.header.clone()]
    }

    /// Produce all artifacts in memory. The header must start with `marker`.
    /// Nothing is written here, so a failure leaves prior outputs untouched.
    fn plan(&self, invocation: &Invocation, marker: &Marker)
        -> Result<Vec<Artifact>, GeneratorError>;
}

/// Generators selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Copy,
    Dump,
}

impl GeneratorKind {
    pub fn build(self) -> Box<dyn Generator> {
        match self {
            GeneratorKind::Copy => Box::new(CopyGenerator),
            GeneratorKind::Dump => Box::new(DumpGenerator),
        }
    }
}

impl std::str::FromStr for GeneratorKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy" => Ok(GeneratorKind::Copy),
            "dump" => Ok(GeneratorKind::Dump),
            other => Err(GeneratorError::Config(format!(
                "Unknown generator: {} (must be 'copy' or 'dump')",
                other
            ))),
        }
    }
}

/// Read a declared source, mapping "not found" to `MissingInput`.
pub(crate) fn read_source(path: &Path) -> Result<Vec<u8>, GeneratorError> {
    fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GeneratorError::MissingInput(path.to_path_buf())
        } else {
            GeneratorError::io(path, e)
        }
    })
}
