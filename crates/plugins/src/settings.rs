//! Dotted-path access into plugin settings blobs.
//!
//! `set_path` is read-merge-write: it only touches the addressed leaf and
//! whatever non-object values sit in its way, never replacing the whole blob.

use serde_json::Value;

/// Look up `a.b.c` inside a JSON value. Returns `None` when any segment is
/// missing or a non-object is hit before the last segment.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Set `a.b.c` inside a JSON value, creating intermediate objects as needed.
/// Intermediate non-object values are replaced by objects; sibling keys are
/// preserved.
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    if !root.is_object() {
        *root = Value::Object(serde_json::Map::new());
    }

    let mut current = root;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        let map = match current.as_object_mut() {
            Some(map) => map,
            // Unreachable: every branch below leaves an object in place.
            None => return,
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        let entry = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(serde_json::Map::new());
        }
        current = entry;
    }
}
