//! Version marker embedded in generated headers
//!
//! Every generated header starts with:
//!
//! ```text
//! // #version:<N>#
//! // machine generated, do not edit!
//! ```
//!
//! optionally followed by `// #inputs:<hex>#` when the content dirty policy
//! is active. This block is the only state generators persist.

use crate::types::{Hash, Version};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const NOTICE: &str = "// machine generated, do not edit!";

/// Only the head of a file is searched for a marker.
const SCAN_BYTES: u64 = 1024;
const SCAN_LINES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub version: Version,
    /// Digest of the inputs the output was generated from.
    pub inputs: Option<Hash>,
}

impl Marker {
    pub fn new(version: Version) -> Self {
        Self {
            version,
            inputs: None,
        }
    }

    pub fn with_inputs(mut self, digest: Hash) -> Self {
        self.inputs = Some(digest);
        self
    }

    /// Render the marker block, newline terminated.
    pub fn render(&self) -> String {
        let mut out = format!("// #version:{}#\n{}\n", self.version, NOTICE);
        if let Some(digest) = self.inputs {
            out.push_str(&format!("// #inputs:{}#\n", hex::encode(digest)));
        }
        out
    }

    /// Find a marker in the first lines of `text`.
    pub fn parse(text: &str) -> Option<Marker> {
        let mut version = None;
        let mut inputs = None;
        for line in text.lines().take(SCAN_LINES) {
            if version.is_none() {
                version = tag_value(line, "#version:").and_then(|v| v.parse::<Version>().ok());
            }
            if inputs.is_none() {
                inputs = tag_value(line, "#inputs:").and_then(decode_digest);
            }
        }
        version.map(|version| Marker { version, inputs })
    }

    /// Read the marker from the head of a file. Unreadable or unmarked files yield `None`.
    pub fn read(path: &Path) -> Option<Marker> {
        let file = File::open(path).ok()?;
        let mut head = Vec::with_capacity(SCAN_BYTES as usize);
        file.take(SCAN_BYTES).read_to_end(&mut head).ok()?;
        Self::parse(&String::from_utf8_lossy(&head))
    }
}

/// Text between `tag` and the next `#` on the line.
fn tag_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let start = line.find(tag)? + tag.len();
    let rest = &line[start..];
    let end = rest.find('#')?;
    Some(rest[..end].trim())
}

fn decode_digest(value: &str) -> Option<Hash> {
    let bytes = hex::decode(value).ok()?;
    bytes.try_into().ok()
}
