//! The tree comparator: walks two decoded documents in lock-step and emits
//! one change record per observed difference.
//!
//! At every node pair exactly one strategy applies, tried in this order:
//!
//! 1. ignored path -- emit nothing, do not recurse
//! 2. object vs object -- key-set difference, recurse into shared keys
//! 3. list vs list, set-sort mode, all elements int/str/bytes -- set difference
//! 4. list vs list -- one length-mismatch record, recurse over shared prefix
//! 5. differing types (numeric int/float pairs exempt) -- type change
//! 6. float vs float -- value change outside the absolute tolerance
//! 7. anything else -- value change when unequal
//!
//! Records are emitted through a caller-supplied sink; the comparator holds
//! no state beyond the traversal stack.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::mem::discriminant;

use crate::ignore::IgnoreSet;
use crate::value::Value;

/// Two floats closer than this are reported as equal.
pub const FLOAT_TOLERANCE: f64 = 1e-5;

/// Comparison switches supplied once per run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffOptions {
    /// Treat lists whose elements are all int/str/bytes scalars as unordered
    /// sets instead of positional sequences.
    pub set_sort: bool,
}

/// Type tag and display form of one side of a changed scalar or subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRepr {
    pub type_name: &'static str,
    pub repr: String,
}

impl ValueRepr {
    fn of(value: &Value) -> Self {
        Self {
            type_name: value.type_name(),
            repr: value.to_string(),
        }
    }
}

/// One reported difference between the two documents at a given path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeRecord {
    /// Key or set element present only in the left document.
    Removed { path: String },
    /// Key or set element present only in the right document.
    Added { path: String },
    /// Ordered list got longer; reported once per differing pair.
    ListGrown { path: String, added: usize },
    /// Ordered list got shorter; reported once per differing pair.
    ListShrunk { path: String, removed: usize },
    /// The node changed type (int/float cross pairs never land here).
    TypeChanged {
        path: String,
        left: ValueRepr,
        right: ValueRepr,
    },
    /// Same type, different value.
    ValueChanged {
        path: String,
        left: ValueRepr,
        right: ValueRepr,
    },
}

impl ChangeRecord {
    /// The path the record was emitted at.
    pub fn path(&self) -> &str {
        match self {
            ChangeRecord::Removed { path }
            | ChangeRecord::Added { path }
            | ChangeRecord::ListGrown { path, .. }
            | ChangeRecord::ListShrunk { path, .. }
            | ChangeRecord::TypeChanged { path, .. }
            | ChangeRecord::ValueChanged { path, .. } => path,
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeRecord::Removed { path } => write!(f, "-{path}"),
            ChangeRecord::Added { path } => write!(f, "+{path}"),
            ChangeRecord::ListGrown { path, added } => write!(f, "+{path}/[{added}]/..."),
            ChangeRecord::ListShrunk { path, removed } => write!(f, "-{path}/[{removed}]"),
            ChangeRecord::TypeChanged { path, left, right } => write!(
                f,
                "!{path}: {}\"{}\" -> {}\"{}\"",
                left.type_name, left.repr, right.type_name, right.repr
            ),
            ChangeRecord::ValueChanged { path, left, right } => {
                if left.type_name == "float" && right.type_name == "float" {
                    write!(f, "~{path}: {}f -> {}f", left.repr, right.repr)
                } else {
                    write!(
                        f,
                        "~{path}: {}\"{}\" -> {}\"{}\"",
                        left.type_name, left.repr, right.type_name, right.repr
                    )
                }
            }
        }
    }
}

/// Join a parent path and a child segment. The root is `/`.
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}

/// Compare two documents from the root, streaming records into `emit`.
pub fn diff(
    left: &Value,
    right: &Value,
    ignore: &IgnoreSet,
    options: DiffOptions,
    emit: &mut dyn FnMut(ChangeRecord),
) {
    diff_at(left, right, "/", ignore, options, emit);
}

/// Convenience wrapper collecting the record stream into a vector.
pub fn diff_to_vec(
    left: &Value,
    right: &Value,
    ignore: &IgnoreSet,
    options: DiffOptions,
) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    diff(left, right, ignore, options, &mut |record| {
        records.push(record)
    });
    records
}

fn diff_at(
    left: &Value,
    right: &Value,
    path: &str,
    ignore: &IgnoreSet,
    options: DiffOptions,
    emit: &mut dyn FnMut(ChangeRecord),
) {
    if ignore.is_ignored(path) {
        return;
    }
    match (left, right) {
        (Value::Object(l), Value::Object(r)) => diff_objects(l, r, path, ignore, options, emit),
        (Value::Array(l), Value::Array(r)) => {
            if options.set_sort && set_eligible(l) && set_eligible(r) {
                diff_scalar_sets(l, r, path, ignore, emit);
            } else {
                diff_lists(l, r, path, ignore, options, emit);
            }
        }
        _ if discriminant(left) != discriminant(right) && !(numeric(left) && numeric(right)) => {
            emit(ChangeRecord::TypeChanged {
                path: path.to_owned(),
                left: ValueRepr::of(left),
                right: ValueRepr::of(right),
            });
        }
        (Value::Float(a), Value::Float(b)) => {
            if (a - b).abs() > FLOAT_TOLERANCE {
                emit(ChangeRecord::ValueChanged {
                    path: path.to_owned(),
                    left: ValueRepr::of(left),
                    right: ValueRepr::of(right),
                });
            }
        }
        _ => {
            if !scalar_eq(left, right) {
                emit(ChangeRecord::ValueChanged {
                    path: path.to_owned(),
                    left: ValueRepr::of(left),
                    right: ValueRepr::of(right),
                });
            }
        }
    }
}

/// Key-set difference over two objects: removed keys, then shared keys
/// (recursing), then added keys. Each emitted path is re-checked against the
/// ignore rules independently of its parent.
fn diff_objects(
    left: &BTreeMap<String, Value>,
    right: &BTreeMap<String, Value>,
    path: &str,
    ignore: &IgnoreSet,
    options: DiffOptions,
    emit: &mut dyn FnMut(ChangeRecord),
) {
    for key in left.keys().filter(|key| !right.contains_key(*key)) {
        let child = join_path(path, key);
        if !ignore.is_ignored(&child) {
            emit(ChangeRecord::Removed { path: child });
        }
    }
    for (key, left_child) in left {
        if let Some(right_child) = right.get(key) {
            let child = join_path(path, key);
            diff_at(left_child, right_child, &child, ignore, options, emit);
        }
    }
    for key in right.keys().filter(|key| !left.contains_key(*key)) {
        let child = join_path(path, key);
        if !ignore.is_ignored(&child) {
            emit(ChangeRecord::Added { path: child });
        }
    }
}

/// True when every element may participate in set-mode comparison. Floats and
/// booleans are deliberately excluded.
fn set_eligible(items: &[Value]) -> bool {
    items
        .iter()
        .all(|item| matches!(item, Value::Integer(_) | Value::String(_) | Value::Bytes(_)))
}

/// A set-comparable scalar. Cross-type equality never holds: the integer `1`
/// and the string `1` are distinct members even though they share a path form.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SetElement<'a> {
    Int(i64),
    Str(&'a str),
    Bytes(&'a [u8]),
}

impl fmt::Display for SetElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetElement::Int(n) => write!(f, "{n}"),
            SetElement::Str(s) => f.write_str(s),
            SetElement::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

/// Set-mode list comparison: membership is the only signal, no recursion and
/// no per-element type or value diffing.
fn diff_scalar_sets(
    left: &[Value],
    right: &[Value],
    path: &str,
    ignore: &IgnoreSet,
    emit: &mut dyn FnMut(ChangeRecord),
) {
    let left_set: BTreeSet<SetElement<'_>> = left.iter().filter_map(set_element).collect();
    let right_set: BTreeSet<SetElement<'_>> = right.iter().filter_map(set_element).collect();

    for element in left_set.difference(&right_set) {
        let child = join_path(path, &element.to_string());
        if !ignore.is_ignored(&child) {
            emit(ChangeRecord::Removed { path: child });
        }
    }
    for element in right_set.difference(&left_set) {
        let child = join_path(path, &element.to_string());
        if !ignore.is_ignored(&child) {
            emit(ChangeRecord::Added { path: child });
        }
    }
}

fn set_element(value: &Value) -> Option<SetElement<'_>> {
    match value {
        Value::Integer(n) => Some(SetElement::Int(*n)),
        Value::String(s) => Some(SetElement::Str(s)),
        Value::Bytes(b) => Some(SetElement::Bytes(b)),
        _ => None,
    }
}

/// Ordered list comparison: one record for a length mismatch, then pairwise
/// recursion over the overlapping prefix. Elements past the shorter length
/// are not individually visited.
fn diff_lists(
    left: &[Value],
    right: &[Value],
    path: &str,
    ignore: &IgnoreSet,
    options: DiffOptions,
    emit: &mut dyn FnMut(ChangeRecord),
) {
    if left.len() < right.len() {
        emit(ChangeRecord::ListGrown {
            path: path.to_owned(),
            added: right.len() - left.len(),
        });
    } else if left.len() > right.len() {
        emit(ChangeRecord::ListShrunk {
            path: path.to_owned(),
            removed: left.len() - right.len(),
        });
    }
    for (index, (left_child, right_child)) in left.iter().zip(right).enumerate() {
        let child = join_path(path, &index.to_string());
        diff_at(left_child, right_child, &child, ignore, options, emit);
    }
}

fn numeric(value: &Value) -> bool {
    matches!(value, Value::Integer(_) | Value::Float(_))
}

/// Final equality check for equal-typed scalars and int/float cross pairs.
fn scalar_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(n), Value::Float(x)) | (Value::Float(x), Value::Integer(n)) => {
            *n as f64 == *x
        }
        _ => left == right,
    }
}
