//! Dirty Checking
//!
//! Decides whether a generator's outputs are out of date. The state is
//! derived on every call from the filesystem: output existence, the version
//! marker stamped into generated headers, and modification times of inputs
//! versus outputs. Nothing is cached between invocations.

pub mod digest;
pub mod marker;
pub mod path;

pub use marker::Marker;

use crate::types::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Staleness test applied on top of the missing-output and version checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirtyPolicy {
    /// Any input newer than any output.
    #[default]
    Mtime,
    /// Mtime test, plus a BLAKE3 digest of the inputs recorded in the marker.
    /// Catches edits that land within the filesystem's timestamp granularity.
    Content,
}

impl std::str::FromStr for DirtyPolicy {
    type Err = crate::error::GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mtime" => Ok(DirtyPolicy::Mtime),
            "content" => Ok(DirtyPolicy::Content),
            other => Err(crate::error::GeneratorError::Config(format!(
                "Invalid dirty policy: {} (must be 'mtime' or 'content')",
                other
            ))),
        }
    }
}

/// Why a generator has to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DirtyReason {
    OutputMissing {
        path: PathBuf,
    },
    InputMissing {
        path: PathBuf,
    },
    NoMarker,
    VersionMismatch {
        path: PathBuf,
        found: Version,
        expected: Version,
    },
    InputNewer {
        input: PathBuf,
        output: PathBuf,
    },
    InputsChanged,
}

impl fmt::Display for DirtyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirtyReason::OutputMissing { path } => {
                write!(f, "output missing: {}", path.display())
            }
            DirtyReason::InputMissing { path } => write!(f, "input missing: {}", path.display()),
            DirtyReason::NoMarker => write!(f, "no version marker in outputs"),
            DirtyReason::VersionMismatch {
                path,
                found,
                expected,
            } => write!(
                f,
                "version {} in {} (generator is version {})",
                found,
                path.display(),
                expected
            ),
            DirtyReason::InputNewer { input, output } => write!(
                f,
                "{} is newer than {}",
                input.display(),
                output.display()
            ),
            DirtyReason::InputsChanged => write!(f, "input contents changed"),
        }
    }
}

/// Returns true when the outputs must be regenerated.
///
/// `inputs` are the descriptor plus every source it references, as absolute
/// paths; `outputs` are every artifact the generator produces.
pub fn should_regenerate(version: Version, inputs: &[PathBuf], outputs: &[PathBuf]) -> bool {
    check(version, inputs, outputs, DirtyPolicy::Mtime).is_some()
}

/// Full dirty check: `None` when clean, otherwise the first reason found.
/// Every output is scanned for a version marker.
pub fn check(
    version: Version,
    inputs: &[PathBuf],
    outputs: &[PathBuf],
    policy: DirtyPolicy,
) -> Option<DirtyReason> {
    check_stamped(version, inputs, outputs, outputs, policy)
}

/// Dirty check where only `stamped` (a subset of `outputs`) is scanned for
/// the version marker. Staged files are passed through verbatim, so their
/// contents must not be mistaken for a marker.
pub fn check_stamped(
    version: Version,
    inputs: &[PathBuf],
    outputs: &[PathBuf],
    stamped: &[PathBuf],
    policy: DirtyPolicy,
) -> Option<DirtyReason> {
    let reason = find_reason(version, inputs, outputs, stamped, policy);
    match &reason {
        Some(r) => debug!(version, reason = %r, "outputs dirty"),
        None => debug!(version, outputs = outputs.len(), "outputs clean"),
    }
    reason
}

fn find_reason(
    version: Version,
    inputs: &[PathBuf],
    outputs: &[PathBuf],
    stamped: &[PathBuf],
    policy: DirtyPolicy,
) -> Option<DirtyReason> {
    // Oldest output; every output must exist.
    let mut oldest_output: Option<(SystemTime, &PathBuf)> = None;
    for output in outputs {
        let Some(mtime) = modified(output) else {
            return Some(DirtyReason::OutputMissing {
                path: output.clone(),
            });
        };
        if oldest_output.map_or(true, |(t, _)| mtime < t) {
            oldest_output = Some((mtime, output));
        }
    }

    // Version marker: stamped outputs without one are skipped, but at least
    // one has to carry it.
    let mut marker: Option<Marker> = None;
    for output in stamped {
        if let Some(found) = Marker::read(output) {
            if found.version != version {
                return Some(DirtyReason::VersionMismatch {
                    path: output.clone(),
                    found: found.version,
                    expected: version,
                });
            }
            marker.get_or_insert(found);
        }
    }
    let Some(marker) = marker else {
        return Some(DirtyReason::NoMarker);
    };

    // Newest input against oldest output.
    let mut newest_input: Option<(SystemTime, &PathBuf)> = None;
    for input in inputs {
        let Some(mtime) = modified(input) else {
            return Some(DirtyReason::InputMissing {
                path: input.clone(),
            });
        };
        if newest_input.map_or(true, |(t, _)| mtime > t) {
            newest_input = Some((mtime, input));
        }
    }
    if let (Some((in_time, input)), Some((out_time, output))) = (newest_input, oldest_output) {
        if in_time > out_time {
            return Some(DirtyReason::InputNewer {
                input: input.clone(),
                output: output.clone(),
            });
        }
    }

    if policy == DirtyPolicy::Content {
        let current = digest::compute_inputs_digest(inputs).ok();
        if current.is_none() || marker.inputs != current {
            return Some(DirtyReason::InputsChanged);
        }
    }

    None
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
