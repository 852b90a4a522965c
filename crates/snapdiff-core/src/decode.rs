//! Decode input bytes into a [`Value`] tree.
//!
//! The input format is selected by file extension: `.msgpack` means
//! MessagePack, everything else (including stdin) is JSON.

use std::path::Path;

use crate::error::Result;
use crate::value::Value;

/// Supported input encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Msgpack,
}

impl Format {
    /// Pick the decoder for a file path by its extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("msgpack") => Format::Msgpack,
            _ => Format::Json,
        }
    }
}

/// Decode one complete document.
pub fn decode(bytes: &[u8], format: Format) -> Result<Value> {
    match format {
        Format::Json => Ok(serde_json::from_slice(bytes)?),
        Format::Msgpack => Ok(rmp_serde::from_slice(bytes)?),
    }
}
