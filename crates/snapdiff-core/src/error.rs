//! Error types for decoding, ignore-pattern compilation, and key fixup.

use thiserror::Error;

/// Errors that can occur while loading or transforming a document.
#[derive(Error, Debug)]
pub enum DiffError {
    /// The input bytes were not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The input bytes were not valid MessagePack.
    #[error("MessagePack parse error: {0}")]
    MsgpackParse(#[from] rmp_serde::decode::Error),

    /// An ignore pattern failed to compile. Rejected at startup so a typo
    /// never degrades into a rule that silently matches nothing.
    #[error("invalid ignore pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    /// Key fixup was given a document that is not a two-element
    /// `[payload, key-names]` list.
    #[error("key fixup expects a two-element [payload, key-names] list: {0}")]
    InvalidShape(&'static str),

    /// An object key referenced a key-table entry that does not exist.
    #[error("key table index {index} out of range (table has {len} entries)")]
    KeyTable { index: usize, len: usize },

    /// A key-table entry held bytes that do not decode as UTF-8.
    #[error("key table entry {index} is not valid UTF-8")]
    KeyTableUtf8 { index: usize },
}

/// Convenience alias used throughout snapdiff-core.
pub type Result<T> = std::result::Result<T, DiffError>;
