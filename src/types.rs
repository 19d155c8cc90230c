//! Shared type aliases.

/// BLAKE3 digest (32 bytes).
pub type Hash = [u8; 32];

/// Generator output-format version, recorded in every generated header.
pub type Version = u32;
