//! Binary dump generator
//!
//! Embeds binary files into a C header as `unsigned char` arrays, followed
//! by a `dump_items` lookup table of (name, pointer, size).

use super::{read_source, Artifact, Generator, Invocation};
use crate::dirty::Marker;
use crate::error::GeneratorError;
use crate::types::Version;
use std::collections::BTreeSet;
use std::fmt::Write;
use std::path::{Path, PathBuf};

pub const VERSION: Version = 1;

/// Byte literals per emitted line.
const BYTES_PER_LINE: usize = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct DumpGenerator;

/// Item name for a file: its stem with non-identifier characters replaced by `_`.
pub fn item_name(file: &str) -> String {
    let stem = Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        name.push('_');
    }
    name
}

/// C array name for a file.
pub fn array_name(file: &str) -> String {
    format!("dump_{}", item_name(file))
}

/// Append `unsigned char <name>[N] = { ... };` for `bytes`.
pub fn write_byte_array(out: &mut String, name: &str, bytes: &[u8]) {
    let _ = writeln!(out, "unsigned char {}[{}] = {{", name, bytes.len());
    for line in bytes.chunks(BYTES_PER_LINE) {
        for byte in line {
            let _ = write!(out, "{:#04x}, ", byte);
        }
        out.push('\n');
    }
    out.push_str("};\n");
}

impl Generator for DumpGenerator {
    fn name(&self) -> &'static str {
        "dump"
    }

    fn version(&self) -> Version {
        VERSION
    }

    fn outputs(&self, invocation: &Invocation) -> Vec<PathBuf> {
        vec![invocation.header.clone()]
    }

    fn plan(
        &self,
        invocation: &Invocation,
        marker: &Marker,
    ) -> Result<Vec<Artifact>, GeneratorError> {
        let mut out = marker.render();
        out.push_str("#pragma once\n#include <stdint.h>\n");

        let mut seen = BTreeSet::new();
        let mut items = Vec::new();
        for (file, path) in invocation
            .descriptor
            .files
            .iter()
            .zip(invocation.sources())
        {
            let name = item_name(file);
            if !seen.insert(name.clone()) {
                return Err(GeneratorError::Parse {
                    file: invocation.descriptor_path.clone(),
                    line: 1,
                    message: format!("'{}' maps to duplicate array name dump_{}", file, name),
                });
            }
            let bytes = read_source(&path)?;
            write_byte_array(&mut out, &format!("dump_{}", name), &bytes);
            items.push((name, bytes.len()));
        }

        out.push_str(
            "typedef struct { const char* name; const uint8_t* ptr; int size; } dump_item;\n",
        );
        let _ = writeln!(out, "#define DUMP_NUM_ITEMS ({})", items.len());
        out.push_str("dump_item dump_items[DUMP_NUM_ITEMS] = {\n");
        for (name, size) in &items {
            let _ = writeln!(out, "{{ \"{}\", dump_{}, {} }},", name, name, size);
        }
        out.push_str("};\n");

        Ok(vec![Artifact::new(invocation.header.clone(), out)])
    }
}
