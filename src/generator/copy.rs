//! Asset copy generator
//!
//! Stages the files a descriptor lists into the deploy directory, honoring
//! per-platform `dst_dir` overrides, and writes a stamped header so the
//! build system has a tracked output for the step.

use super::{read_source, Artifact, Generator, Invocation};
use crate::dirty::Marker;
use crate::error::GeneratorError;
use crate::types::Version;
use std::path::PathBuf;
use tracing::info;

pub const VERSION: Version = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyGenerator;

impl CopyGenerator {
    fn destinations(&self, invocation: &Invocation) -> Vec<PathBuf> {
        invocation
            .descriptor
            .files
            .iter()
            .map(|f| crate::dirty::path::absolute(&invocation.options.dst_dir.join(f)))
            .collect()
    }
}

impl Generator for CopyGenerator {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn version(&self) -> Version {
        VERSION
    }

    fn outputs(&self, invocation: &Invocation) -> Vec<PathBuf> {
        let mut outputs = vec![invocation.header.clone()];
        outputs.extend(self.destinations(invocation));
        outputs
    }

    fn plan(
        &self,
        invocation: &Invocation,
        marker: &Marker,
    ) -> Result<Vec<Artifact>, GeneratorError> {
        let files = &invocation.descriptor.files;
        let mut artifacts = Vec::with_capacity(files.len() + 1);

        for ((name, src), dst) in files
            .iter()
            .zip(invocation.sources())
            .zip(self.destinations(invocation))
        {
            let contents = read_source(&src)?;
            info!("cp '{}' => '{}'", name, dst.display());
            artifacts.push(Artifact::new(dst, contents));
        }

        // Only descriptor-relative names, so the header is identical across checkouts.
        let mut header = format!(
            "{}#pragma once\n// {} asset file(s) staged\n",
            marker.render(),
            files.len()
        );
        for name in files {
            header.push_str("// ");
            header.push_str(name);
            header.push('\n');
        }
        artifacts.push(Artifact::new(invocation.header.clone(), header));
        Ok(artifacts)
    }
}
