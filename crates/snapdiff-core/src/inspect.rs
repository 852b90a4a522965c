//! Debug dump helpers -- pure inspection, no comparison logic.

use std::fmt::Write as _;

use crate::diff::join_path;
use crate::error::Result;
use crate::value::Value;

/// Child counts for every object/list node, one line per node in pre-order:
/// `{count:>6}: {path}`. Nesting depth is implicit in the path column.
pub fn count_report(value: &Value) -> String {
    let mut out = String::new();
    count_node(value, "/", &mut out);
    out
}

fn count_node(value: &Value, path: &str, out: &mut String) {
    match value {
        Value::Object(map) => {
            let _ = writeln!(out, "{:>6}: {}", map.len(), path);
            for (key, child) in map {
                count_node(child, &join_path(path, key), out);
            }
        }
        Value::Array(items) => {
            let _ = writeln!(out, "{:>6}: {}", items.len(), path);
            for (index, child) in items.iter().enumerate() {
                count_node(child, &join_path(path, &index.to_string()), out);
            }
        }
        _ => {}
    }
}

/// Pretty-printed JSON with sorted keys, for `--dump-fixedup`. Byte-string
/// scalars come out as decoded text (see the `Value` serializer).
pub fn to_pretty_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
