//! Target platform identifier
//!
//! The platform a build targets decides which per-platform destination
//! override a descriptor applies. It travels inside the generator context;
//! nothing reads it from process-wide state.

use crate::error::GeneratorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Linux,
    Windows,
    #[serde(alias = "macos")]
    Osx,
    Ios,
    Android,
    Emscripten,
}

impl TargetPlatform {
    /// Platform of the running host, used when nothing else is configured.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => TargetPlatform::Windows,
            "macos" => TargetPlatform::Osx,
            "ios" => TargetPlatform::Ios,
            "android" => TargetPlatform::Android,
            _ => TargetPlatform::Linux,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::Linux => "linux",
            TargetPlatform::Windows => "windows",
            TargetPlatform::Osx => "osx",
            TargetPlatform::Ios => "ios",
            TargetPlatform::Android => "android",
            TargetPlatform::Emscripten => "emscripten",
        }
    }

    /// Keys under a descriptor's `options` map that apply to this platform,
    /// in lookup order.
    pub fn option_keys(&self) -> &'static [&'static str] {
        match self {
            TargetPlatform::Osx => &["macos", "osx"],
            TargetPlatform::Linux => &["linux"],
            TargetPlatform::Windows => &["windows"],
            TargetPlatform::Ios => &["ios"],
            TargetPlatform::Android => &["android"],
            TargetPlatform::Emscripten => &["emscripten"],
        }
    }
}

impl Default for TargetPlatform {
    fn default() -> Self {
        TargetPlatform::host()
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetPlatform {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(TargetPlatform::Linux),
            "win32" | "win64" | "windows" => Ok(TargetPlatform::Windows),
            "osx" | "macos" => Ok(TargetPlatform::Osx),
            "ios" => Ok(TargetPlatform::Ios),
            "android" => Ok(TargetPlatform::Android),
            "emscripten" | "wasm" => Ok(TargetPlatform::Emscripten),
            other => Err(GeneratorError::Config(format!(
                "Unknown target platform: {} (expected linux, windows, osx, ios, android or emscripten)",
                other
            ))),
        }
    }
}
