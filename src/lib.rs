//! assetgen: incremental asset generators
//!
//! Build-step generators for C/C++ projects. The copy generator stages asset
//! files into a deploy directory; the dump generator embeds binary files as
//! C byte arrays. Both run only when their outputs are dirty: an output is
//! missing, the version marker stamped into the generated header differs
//! from the generator's version, or an input is newer than an output.

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod dirty;
pub mod error;
pub mod generator;
pub mod logging;
pub mod platform;
pub mod runner;
pub mod types;

pub use dirty::should_regenerate;
pub use error::GeneratorError;
pub use generator::{Generator, GeneratorContext};
pub use runner::{generate, GenerateOutcome, GenerateRequest};
