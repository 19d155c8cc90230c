//! Content digests of generator inputs using BLAKE3

use crate::error::GeneratorError;
use crate::types::Hash;
use blake3::Hasher;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Compute the digest of a set of input files.
///
/// digest = hash(count || for each input: path_len || path || content_len || content)
///
/// Inputs are hashed in the order given, so callers pass them in a stable
/// order (descriptor first, then sources in declaration order).
pub fn compute_inputs_digest(inputs: &[PathBuf]) -> Result<Hash, GeneratorError> {
    let mut hasher = Hasher::new();
    hasher.update(&(inputs.len() as u64).to_be_bytes());

    for input in inputs {
        let path_string = input.to_string_lossy();
        let path_bytes = path_string.as_bytes();
        hasher.update(&(path_bytes.len() as u64).to_be_bytes());
        hasher.update(path_bytes);

        let len = file_len(input)?;
        hasher.update(&len.to_be_bytes());
        let mut file = File::open(input).map_err(|e| open_error(input, e))?;
        io::copy(&mut file, &mut hasher).map_err(|e| GeneratorError::io(input, e))?;
    }

    Ok(*hasher.finalize().as_bytes())
}

fn file_len(path: &Path) -> Result<u64, GeneratorError> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| open_error(path, e))
}

fn open_error(path: &Path, e: io::Error) -> GeneratorError {
    if e.kind() == io::ErrorKind::NotFound {
        GeneratorError::MissingInput(path.to_path_buf())
    } else {
        GeneratorError::io(path, e)
    }
}
