//! # snapdiff-core
//!
//! Structural diff engine for snapshots of semi-structured data.
//!
//! Two documents -- decoded from JSON or MessagePack into a [`Value`] tree --
//! are walked in lock-step and their differences reported as a flat stream of
//! [`ChangeRecord`]s: additions, removals, type changes, and value changes,
//! with glob-based path ignore rules pruning noisy subtrees before they are
//! reported.
//!
//! ## Quick start
//!
//! ```rust
//! use snapdiff_core::{decode, diff_to_vec, DiffOptions, Format, IgnoreSet};
//!
//! let left = decode(br#"{"a": 1, "b": 2}"#, Format::Json).unwrap();
//! let right = decode(br#"{"b": 2, "c": 3}"#, Format::Json).unwrap();
//!
//! let records = diff_to_vec(&left, &right, &IgnoreSet::empty(), DiffOptions::default());
//! let lines: Vec<String> = records.iter().map(|r| r.to_string()).collect();
//! assert_eq!(lines, ["-/a", "+/c"]);
//! ```
//!
//! ## Modules
//!
//! - [`value`] -- the `Value` tree both inputs decode into
//! - [`decode`] -- JSON/MessagePack decoding and format detection
//! - [`ignore`] -- glob-style path ignore rules
//! - [`diff`] -- the recursive tree comparator and change records
//! - [`fixup`] -- integer-key to name remapping via a key table
//! - [`report`] -- line-oriented record output
//! - [`inspect`] -- child-count and pretty-JSON dump helpers
//! - [`error`] -- error types for decode/pattern/fixup failures

pub mod decode;
pub mod diff;
pub mod error;
pub mod fixup;
pub mod ignore;
pub mod inspect;
pub mod report;
pub mod value;

pub use decode::{decode, Format};
pub use diff::{diff, diff_to_vec, ChangeRecord, DiffOptions, ValueRepr, FLOAT_TOLERANCE};
pub use error::{DiffError, Result};
pub use fixup::fixup_keys;
pub use ignore::IgnoreSet;
pub use inspect::{count_report, to_pretty_json};
pub use report::Reporter;
pub use value::Value;
