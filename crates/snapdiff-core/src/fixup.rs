//! Key fixup: remap compact integer object keys back to human-readable names.
//!
//! Documents produced with key compaction arrive as a two-element list
//! `[payload, keyNames]` where `keyNames` is the ordered table of original
//! key strings. The transform rewrites every object inside the payload,
//! replacing each integer key with its table entry. It runs once per
//! document, before comparison.

use std::collections::BTreeMap;

use crate::error::{DiffError, Result};
use crate::value::Value;

/// Validate the `[payload, keyNames]` shape, then rewrite the payload.
///
/// Key names may be strings (JSON input) or UTF-8 byte-strings (MessagePack
/// input). An out-of-range table index is fatal -- a corrupt or mismatched
/// key table must not be silently ignored. Keys that are not integers pass
/// through unchanged.
pub fn fixup_keys(document: &Value) -> Result<Value> {
    let Value::Array(parts) = document else {
        return Err(DiffError::InvalidShape("document root is not a list"));
    };
    if parts.len() != 2 {
        return Err(DiffError::InvalidShape(
            "document does not have exactly two elements",
        ));
    }
    let Value::Array(names) = &parts[1] else {
        return Err(DiffError::InvalidShape("second element is not a list"));
    };

    let mut table = Vec::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        match name {
            Value::String(s) => table.push(s.clone()),
            Value::Bytes(b) => table.push(
                String::from_utf8(b.clone()).map_err(|_| DiffError::KeyTableUtf8 { index })?,
            ),
            _ => {
                return Err(DiffError::InvalidShape(
                    "key table entry is neither a string nor bytes",
                ))
            }
        }
    }

    remap(&parts[0], &table)
}

fn remap(value: &Value, table: &[String]) -> Result<Value> {
    match value {
        Value::Object(map) => {
            let mut out = BTreeMap::new();
            for (key, child) in map {
                let name = match key.parse::<usize>() {
                    Ok(index) => table
                        .get(index)
                        .ok_or(DiffError::KeyTable {
                            index,
                            len: table.len(),
                        })?
                        .clone(),
                    Err(_) => key.clone(),
                };
                // Colliding remapped names: last write wins.
                out.insert(name, remap(child, table)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|item| remap(item, table))
                .collect::<Result<Vec<_>>>()?,
        )),
        scalar => Ok(scalar.clone()),
    }
}
