//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::GeneratorError;

/// Map generator errors to the string printed on failure.
///
/// Parse errors already read `file:line: message`, which editors and build
/// logs pick up as a location.
pub fn map_error(e: &GeneratorError) -> String {
    match e {
        GeneratorError::Parse { .. } => e.to_string(),
        _ => format!("error: {}", e),
    }
}
