//! Incremental Generator Runner
//!
//! Runs a generator against one descriptor only when its outputs are dirty.
//! Every artifact is planned in memory before the first write, so a missing
//! or unreadable source fails the run without touching prior outputs.

use crate::dirty::{self, digest, DirtyPolicy, DirtyReason, Marker};
use crate::error::GeneratorError;
use crate::generator::{Generator, GeneratorContext, Invocation};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// One generator run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub descriptor: PathBuf,
    pub header: PathBuf,
    /// Regenerate even when the outputs are clean.
    pub force: bool,
}

impl GenerateRequest {
    pub fn new(descriptor: impl Into<PathBuf>, header: impl Into<PathBuf>) -> Self {
        Self {
            descriptor: descriptor.into(),
            header: header.into(),
            force: false,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateOutcome {
    Skipped,
    Regenerated {
        /// `None` when forced on clean outputs.
        reason: Option<DirtyReason>,
        artifacts: Vec<PathBuf>,
    },
}

impl GenerateOutcome {
    pub fn regenerated(&self) -> bool {
        matches!(self, GenerateOutcome::Regenerated { .. })
    }
}

/// Result of a dry dirty check.
#[derive(Debug, Clone, Serialize)]
pub struct DirtyStatus {
    pub generator: String,
    pub version: u32,
    pub descriptor: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
    pub reason: Option<DirtyReason>,
}

impl DirtyStatus {
    pub fn dirty(&self) -> bool {
        self.reason.is_some()
    }
}

/// Check whether `generator` would regenerate for `request`, without writing.
pub fn inspect(
    generator: &dyn Generator,
    request: &GenerateRequest,
    context: &GeneratorContext,
) -> Result<DirtyStatus, GeneratorError> {
    let invocation = Invocation::load(&request.descriptor, &request.header, context)?;
    let inputs = generator.inputs(&invocation);
    let outputs = generator.outputs(&invocation);
    let reason = dirty::check_stamped(
        generator.version(),
        &inputs,
        &outputs,
        &generator.stamped_outputs(&invocation),
        context.dirty_policy,
    );
    Ok(DirtyStatus {
        generator: generator.name().to_string(),
        version: generator.version(),
        descriptor: invocation.descriptor_path,
        inputs,
        outputs,
        reason,
    })
}

/// Run `generator` for `request` if its outputs are dirty (or `force` is set).
pub fn generate(
    generator: &dyn Generator,
    request: &GenerateRequest,
    context: &GeneratorContext,
) -> Result<GenerateOutcome, GeneratorError> {
    let invocation = Invocation::load(&request.descriptor, &request.header, context)?;
    let inputs = generator.inputs(&invocation);
    let outputs = generator.outputs(&invocation);

    let reason = dirty::check_stamped(
        generator.version(),
        &inputs,
        &outputs,
        &generator.stamped_outputs(&invocation),
        context.dirty_policy,
    );
    if reason.is_none() && !request.force {
        debug!(
            generator = generator.name(),
            descriptor = %invocation.descriptor_path.display(),
            "outputs up to date"
        );
        return Ok(GenerateOutcome::Skipped);
    }

    // Report absent sources before any of them is read; other read
    // failures surface from `plan` as `Io`.
    for source in invocation.sources() {
        match source.try_exists() {
            Ok(true) => {}
            Ok(false) => return Err(GeneratorError::MissingInput(source)),
            Err(e) => return Err(GeneratorError::io(&source, e)),
        }
    }

    let mut marker = Marker::new(generator.version());
    if context.dirty_policy == DirtyPolicy::Content {
        marker = marker.with_inputs(digest::compute_inputs_digest(&inputs)?);
    }

    let artifacts = generator.plan(&invocation, &marker)?;
    for artifact in &artifacts {
        artifact.write()?;
    }

    let why = reason
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "forced".to_string());
    info!(
        generator = generator.name(),
        version = generator.version(),
        descriptor = %invocation.descriptor_path.display(),
        artifacts = artifacts.len(),
        reason = %why,
        "regenerated"
    );

    Ok(GenerateOutcome::Regenerated {
        reason,
        artifacts: artifacts.into_iter().map(|a| a.path).collect(),
    })
}
